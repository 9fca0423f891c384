//! 판매자 endpoint.
//!
//! 모든 엔드포인트는 seller 역할 토큰이 필요합니다.
//!
//! # 엔드포인트
//!
//! - `POST /api/seller/create-catalog` - 카탈로그 게시
//! - `GET /api/seller/orders` - 받은 주문 목록

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use market_core::Order;
use tracing::debug;

use super::{CreatedResponse, ItemsRequest};
use crate::auth::capability::{PublishCatalog, ViewSellerOrders};
use crate::auth::RequirePermission;
use crate::error::{json_rejection, market_error, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 카탈로그 게시.
///
/// POST /api/seller/create-catalog
#[utoipa::path(
    post,
    path = "/api/seller/create-catalog",
    request_body = ItemsRequest,
    responses(
        (status = 201, description = "카탈로그 생성", body = CreatedResponse),
        (status = 400, description = "잘못된 요청", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "seller 역할 아님", body = ApiErrorResponse)
    ),
    tag = "seller"
)]
pub async fn create_catalog(
    RequirePermission(identity, _): RequirePermission<PublishCatalog>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ItemsRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(req) = payload.map_err(json_rejection)?;

    let catalog = state
        .catalogs
        .create_catalog(&identity, req.items)
        .await
        .map_err(market_error)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Catalog created successfully", catalog.id)),
    ))
}

/// 받은 주문 목록.
///
/// GET /api/seller/orders
#[utoipa::path(
    get,
    path = "/api/seller/orders",
    responses(
        (status = 200, description = "주문 목록 (오래된 순)", body = Vec<Order>),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "seller 역할 아님", body = ApiErrorResponse)
    ),
    tag = "seller"
)]
pub async fn list_orders(
    RequirePermission(identity, _): RequirePermission<ViewSellerOrders>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Order>>> {
    debug!(user_id = %identity.user_id, "GET /orders");

    let orders = state
        .orders
        .list_orders_for_seller(&identity)
        .await
        .map_err(market_error)?;

    Ok(Json(orders))
}

/// 판매자 라우터 생성.
pub fn seller_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create-catalog", post(create_catalog))
        .route("/orders", get(list_orders))
}
