//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! 스펙 JSON은 `/api-docs/openapi.json` 경로에서 제공됩니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use market_core::{Catalog, NewProduct, Order, Product, ProductItem, Role, UserSummary};

use crate::error::ApiErrorResponse;
use crate::routes::{
    AuthOutcome, AuthResponse, ComponentHealth, ComponentStatus, CreatedResponse, HealthResponse,
    ItemsRequest, LoginRequest, OutcomeResponse, RegisterRequest, TokenResponse,
};

// ==================== OpenAPI 문서 정의 ====================

/// Marketplace API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace API",
        version = "0.1.0",
        description = r#"
# 두 역할 마켓플레이스 REST API

판매자(seller)는 카탈로그를 게시하고 받은 주문을 조회합니다.
구매자(buyer)는 판매자 목록과 카탈로그를 조회하고 주문을 생성합니다.

## 인증

`/api/auth` 이외의 엔드포인트는 Bearer 토큰이 필요합니다.
`Authorization: Bearer <token>` 헤더를 포함하세요.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 가입, 로그인"),
        (name = "buyer", description = "구매자 - 판매자/카탈로그 조회, 주문 생성"),
        (name = "seller", description = "판매자 - 카탈로그 게시, 주문 조회")
    ),
    modifiers(&SecurityAddon),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,
            CreatedResponse,
            ItemsRequest,

            // ===== Auth =====
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            AuthOutcome,
            OutcomeResponse,
            AuthResponse,
            Role,

            // ===== Domain =====
            UserSummary,
            Product,
            NewProduct,
            ProductItem,
            Catalog,
            Order,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::register,
        crate::routes::auth::login,

        // ===== Buyer =====
        crate::routes::buyer::list_sellers,
        crate::routes::buyer::seller_catalog,
        crate::routes::buyer::create_order,

        // ===== Seller =====
        crate::routes::seller::create_catalog,
        crate::routes::seller::list_orders,
    )
)]
pub struct ApiDoc;

/// Bearer 토큰 보안 스킴 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

// ==================== 문서 라우터 ====================

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// OpenAPI 문서 라우터 생성.
///
/// `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

// ==================== 테스트 ====================
