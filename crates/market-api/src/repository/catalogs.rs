//! Catalogs Repository

use chrono::{DateTime, Utc};
use market_core::{Catalog, NewCatalog};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// 카탈로그 레코드
#[derive(Debug, Clone, FromRow)]
pub struct CatalogRecord {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub products: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CatalogRecord> for Catalog {
    fn from(record: CatalogRecord) -> Self {
        Catalog {
            id: record.id,
            seller_id: record.seller_id,
            products: record.products,
            created_at: record.created_at,
        }
    }
}

/// Catalogs Repository
pub struct CatalogRepository;

impl CatalogRepository {
    /// 카탈로그 삽입
    pub async fn insert(pool: &PgPool, catalog: &NewCatalog) -> Result<CatalogRecord, sqlx::Error> {
        sqlx::query_as::<_, CatalogRecord>(
            r#"
            INSERT INTO catalogs (id, seller_id, products)
            VALUES ($1, $2, $3)
            RETURNING id, seller_id, products, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(catalog.seller_id)
        .bind(&catalog.products)
        .fetch_one(pool)
        .await
    }

    /// 판매자의 가장 오래된 카탈로그 조회
    pub async fn find_first_by_seller(
        pool: &PgPool,
        seller_id: Uuid,
    ) -> Result<Option<CatalogRecord>, sqlx::Error> {
        sqlx::query_as::<_, CatalogRecord>(
            r#"
            SELECT id, seller_id, products, created_at
            FROM catalogs
            WHERE seller_id = $1
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .bind(seller_id)
        .fetch_optional(pool)
        .await
    }
}
