//! 구매 주문.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ProductId;

/// 구매자가 판매자에게 넣은 주문.
///
/// 항목은 판매자 카탈로그와 대조하지 않고 그대로 기록합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub items: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
}

/// 새 주문 입력.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub items: Vec<ProductId>,
}
