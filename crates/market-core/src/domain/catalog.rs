//! 판매자 카탈로그.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ProductId;

/// 판매자가 게시한 카탈로그.
///
/// 생성 후 변경되지 않으며 `products`는 상품 ID 목록을 순서대로 보존합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub products: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
}

/// 새 카탈로그 입력.
#[derive(Debug, Clone)]
pub struct NewCatalog {
    pub seller_id: Uuid,
    pub products: Vec<ProductId>,
}
