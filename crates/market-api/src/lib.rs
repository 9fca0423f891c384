//! 마켓플레이스 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 서명 토큰 인증 및 역할 기반 접근 제어
//! - PostgreSQL / 인메모리 저장소 어댑터
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 토큰, 비밀번호 해싱, 권한 관리
//! - [`services`]: 자격증명/카탈로그/주문 서비스
//! - [`repository`]: 저장소 구현
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`openapi`]: OpenAPI 문서

pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{
    hash_password, verify_password, Claims, JwtAuth, JwtAuthError, Permission, RequirePermission,
    TokenService,
};
pub use error::{ApiErrorResponse, ApiResult};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use repository::{MemoryStore, PgStore};
pub use routes::{create_api_router, CreatedResponse, HealthResponse, ItemsRequest};
pub use services::{CatalogService, CredentialService, OrderService};
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
