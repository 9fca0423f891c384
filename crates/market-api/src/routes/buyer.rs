//! 구매자 endpoint.
//!
//! 모든 엔드포인트는 buyer 역할 토큰이 필요합니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/buyer/list-of-sellers` - 판매자 목록
//! - `GET /api/buyer/seller-catalog/{sellerId}` - 판매자 카탈로그
//! - `POST /api/buyer/create-order/{sellerId}` - 주문 생성

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use market_core::{Catalog, UserSummary};
use tracing::debug;
use uuid::Uuid;

use super::{CreatedResponse, ItemsRequest};
use crate::auth::capability::{BrowseSellers, PlaceOrder, ViewCatalog};
use crate::auth::RequirePermission;
use crate::error::{json_rejection, market_error, path_rejection, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 판매자 목록 조회.
///
/// GET /api/buyer/list-of-sellers
#[utoipa::path(
    get,
    path = "/api/buyer/list-of-sellers",
    responses(
        (status = 200, description = "판매자 목록", body = Vec<UserSummary>),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "buyer 역할 아님", body = ApiErrorResponse)
    ),
    tag = "buyer"
)]
pub async fn list_sellers(
    RequirePermission(identity, _): RequirePermission<BrowseSellers>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<UserSummary>>> {
    debug!(user_id = %identity.user_id, "GET /list-of-sellers");

    let sellers = state
        .catalogs
        .list_sellers(&identity)
        .await
        .map_err(market_error)?;

    Ok(Json(sellers))
}

/// 판매자 카탈로그 조회.
///
/// GET /api/buyer/seller-catalog/{sellerId}
#[utoipa::path(
    get,
    path = "/api/buyer/seller-catalog/{sellerId}",
    params(("sellerId" = Uuid, Path, description = "판매자 ID")),
    responses(
        (status = 200, description = "카탈로그", body = Catalog),
        (status = 400, description = "잘못된 판매자 ID", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "buyer 역할 아님", body = ApiErrorResponse),
        (status = 404, description = "카탈로그 없음", body = ApiErrorResponse)
    ),
    tag = "buyer"
)]
pub async fn seller_catalog(
    RequirePermission(identity, _): RequirePermission<ViewCatalog>,
    State(state): State<Arc<AppState>>,
    seller_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Catalog>> {
    let Path(seller_id) = seller_id.map_err(path_rejection)?;
    debug!(user_id = %identity.user_id, seller_id = %seller_id, "GET /seller-catalog");

    let catalog = state
        .catalogs
        .get_catalog(&identity, seller_id)
        .await
        .map_err(market_error)?;

    Ok(Json(catalog))
}

/// 주문 생성.
///
/// POST /api/buyer/create-order/{sellerId}
#[utoipa::path(
    post,
    path = "/api/buyer/create-order/{sellerId}",
    params(("sellerId" = Uuid, Path, description = "판매자 ID")),
    request_body = ItemsRequest,
    responses(
        (status = 201, description = "주문 생성", body = CreatedResponse),
        (status = 400, description = "잘못된 요청", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "buyer 역할 아님", body = ApiErrorResponse)
    ),
    tag = "buyer"
)]
pub async fn create_order(
    RequirePermission(identity, _): RequirePermission<PlaceOrder>,
    State(state): State<Arc<AppState>>,
    seller_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ItemsRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Path(seller_id) = seller_id.map_err(path_rejection)?;
    let Json(req) = payload.map_err(json_rejection)?;

    let order = state
        .orders
        .create_order(&identity, seller_id, req.items)
        .await
        .map_err(market_error)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Order created successfully", order.id)),
    ))
}

/// 구매자 라우터 생성.
pub fn buyer_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list-of-sellers", get(list_sellers))
        .route("/seller-catalog/{seller_id}", get(seller_catalog))
        .route("/create-order/{seller_id}", post(create_order))
}
