//! Orders Repository
//!
//! 구매자가 판매자에게 넣은 주문을 저장합니다.

use chrono::{DateTime, Utc};
use market_core::{NewOrder, Order};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// 주문 레코드
#[derive(Debug, Clone, FromRow)]
pub struct OrderRecord {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub items: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Order {
            id: record.id,
            buyer_id: record.buyer_id,
            seller_id: record.seller_id,
            items: record.items,
            created_at: record.created_at,
        }
    }
}

/// Orders Repository
pub struct OrderRepository;

impl OrderRepository {
    /// 주문 삽입
    pub async fn insert(pool: &PgPool, order: &NewOrder) -> Result<OrderRecord, sqlx::Error> {
        sqlx::query_as::<_, OrderRecord>(
            r#"
            INSERT INTO orders (id, buyer_id, seller_id, items)
            VALUES ($1, $2, $3, $4)
            RETURNING id, buyer_id, seller_id, items, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order.buyer_id)
        .bind(order.seller_id)
        .bind(&order.items)
        .fetch_one(pool)
        .await
    }

    /// 판매자가 받은 주문 목록 (오래된 순)
    pub async fn list_by_seller(
        pool: &PgPool,
        seller_id: Uuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, buyer_id, seller_id, items, created_at
            FROM orders
            WHERE seller_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(seller_id)
        .fetch_all(pool)
        .await
    }
}
