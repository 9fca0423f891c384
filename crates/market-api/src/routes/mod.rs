//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/auth` - 가입, 로그인
//! - `/api/buyer` - 판매자 목록, 카탈로그 조회, 주문 생성 (buyer 전용)
//! - `/api/seller` - 카탈로그 게시, 받은 주문 조회 (seller 전용)

pub mod auth;
pub mod buyer;
pub mod health;
pub mod seller;

pub use auth::{
    auth_router, AuthOutcome, AuthResponse, LoginRequest, OutcomeResponse, RegisterRequest,
    TokenResponse,
};
pub use buyer::buyer_router;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use seller::seller_router;

use axum::Router;
use market_core::ProductItem;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::state::AppState;

/// 카탈로그/주문 생성 요청.
///
/// 각 항목은 기존 상품 ID 문자열 또는 `{name, price}` 인라인 상품입니다.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ItemsRequest {
    pub items: Vec<ProductItem>,
}

/// 생성 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub message: String,
    pub id: Uuid,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, id: Uuid) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // API 엔드포인트
        .nest("/api/auth", auth_router())
        .nest("/api/buyer", buyer_router())
        .nest("/api/seller", seller_router())
}
