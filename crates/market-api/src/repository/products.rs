//! Products Repository
//!
//! 카탈로그/주문 페이로드에서 인라인으로 생성되는 상품을 저장합니다.

use market_core::{NewProduct, Product};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// 상품 레코드
#[derive(Debug, Clone, FromRow)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            id: record.id.to_string(),
            name: record.name,
            price: record.price,
        }
    }
}

/// Products Repository
pub struct ProductRepository;

impl ProductRepository {
    /// 상품 일괄 삽입 (단일 트랜잭션, 입력 순서 유지)
    pub async fn insert_many(
        pool: &PgPool,
        products: &[NewProduct],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut records = Vec::with_capacity(products.len());

        for product in products {
            let record = sqlx::query_as::<_, ProductRecord>(
                r#"
                INSERT INTO products (id, name, price)
                VALUES ($1, $2, $3)
                RETURNING id, name, price
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&product.name)
            .bind(product.price)
            .fetch_one(&mut *tx)
            .await?;

            records.push(record);
        }

        tx.commit().await?;
        Ok(records)
    }
}
