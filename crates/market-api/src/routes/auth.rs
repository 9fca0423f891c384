//! 인증 endpoint.
//!
//! 가입과 로그인을 처리하고 서명된 토큰을 발급합니다.
//!
//! 중복 사용자 이름, 존재하지 않는 사용자, 잘못된 비밀번호는 에러가 아니라
//! 200 응답의 `outcome` 값으로 구분해서 돌려줍니다.
//!
//! # 엔드포인트
//!
//! - `POST /api/auth/register` - 가입
//! - `POST /api/auth/login` - 로그인

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use market_core::{AuthError, Identity, MarketError, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{json_rejection, market_error, validation_error, ApiResult};
use crate::state::AppState;

// ==================== 요청/응답 타입 ====================

/// 가입 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// 사용자 이름 (1~64자)
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    /// 평문 비밀번호
    #[validate(length(min = 1))]
    pub password: String,
    /// 사용자 역할 (buyer | seller)
    pub user_type: Role,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// 토큰 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// 서명된 토큰
    pub token: String,
}

/// 토큰 없이 끝난 인증 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthOutcome {
    /// 이미 사용 중인 사용자 이름
    UsernameTaken,
    /// 존재하지 않는 사용자
    UserNotFound,
    /// 비밀번호 불일치
    BadPassword,
}

/// 인증 결과 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OutcomeResponse {
    pub outcome: AuthOutcome,
}

/// 가입/로그인 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AuthResponse {
    Token(TokenResponse),
    Outcome(OutcomeResponse),
}

impl AuthResponse {
    fn outcome(outcome: AuthOutcome) -> Json<Self> {
        Json(AuthResponse::Outcome(OutcomeResponse { outcome }))
    }
}

// ==================== 핸들러 ====================

fn issue_token(state: &AppState, identity: Identity) -> ApiResult<Json<AuthResponse>> {
    let token = state.tokens.issue(identity).map_err(market_error)?;
    Ok(Json(AuthResponse::Token(TokenResponse { token })))
}

/// 가입.
///
/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "토큰 발급 또는 username_taken", body = AuthResponse),
        (status = 400, description = "잘못된 요청", body = crate::error::ApiErrorResponse),
        (status = 500, description = "서버 오류", body = crate::error::ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload.map_err(json_rejection)?;
    req.validate().map_err(validation_error)?;

    match state
        .credentials
        .register(&req.username, &req.password, req.user_type)
        .await
    {
        Ok(identity) => issue_token(&state, identity),
        Err(MarketError::Conflict(_)) => Ok(AuthResponse::outcome(AuthOutcome::UsernameTaken)),
        Err(e) => Err(market_error(e)),
    }
}

/// 로그인.
///
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "토큰 발급 또는 user_not_found / bad_password", body = AuthResponse),
        (status = 400, description = "잘못된 요청", body = crate::error::ApiErrorResponse),
        (status = 500, description = "서버 오류", body = crate::error::ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload.map_err(json_rejection)?;
    req.validate().map_err(validation_error)?;

    match state
        .credentials
        .authenticate(&req.username, &req.password)
        .await
    {
        Ok(identity) => issue_token(&state, identity),
        Err(MarketError::Auth(AuthError::NotFound)) => {
            Ok(AuthResponse::outcome(AuthOutcome::UserNotFound))
        }
        Err(MarketError::Auth(AuthError::BadPassword)) => {
            Ok(AuthResponse::outcome(AuthOutcome::BadPassword))
        }
        Err(e) => Err(market_error(e)),
    }
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(create_test_state());
        let router = Router::new()
            .nest("/api/auth", auth_router())
            .with_state(state.clone());
        (router, state)
    }

    async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_issues_verifiable_token() {
        let (app, state) = app();

        let response = post_json(
            app,
            "/api/auth/register",
            serde_json::json!({"username": "alice", "password": "p1", "userType": "seller"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let token = body["token"].as_str().unwrap();
        let claims = state.tokens.verify(token).unwrap();
        assert_eq!(claims.user_type, Role::Seller);
    }

    #[tokio::test]
    async fn test_register_duplicate_reports_outcome() {
        let (app, _) = app();
        let body = serde_json::json!({"username": "alice", "password": "p1", "userType": "seller"});

        post_json(app.clone(), "/api/auth/register", body.clone()).await;
        let response = post_json(app, "/api/auth/register", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["outcome"], "username_taken");
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let (app, _) = app();
        post_json(
            app.clone(),
            "/api/auth/register",
            serde_json::json!({"username": "bob", "password": "p2", "userType": "buyer"}),
        )
        .await;

        let ok = post_json(
            app.clone(),
            "/api/auth/login",
            serde_json::json!({"username": "bob", "password": "p2"}),
        )
        .await;
        assert!(json_body(ok).await["token"].is_string());

        let bad = post_json(
            app.clone(),
            "/api/auth/login",
            serde_json::json!({"username": "bob", "password": "nope"}),
        )
        .await;
        assert_eq!(json_body(bad).await["outcome"], "bad_password");

        let missing = post_json(
            app,
            "/api/auth/login",
            serde_json::json!({"username": "ghost", "password": "p2"}),
        )
        .await;
        assert_eq!(json_body(missing).await["outcome"], "user_not_found");
    }

    #[tokio::test]
    async fn test_invalid_bodies_rejected() {
        let (app, _) = app();

        let unknown_role = post_json(
            app.clone(),
            "/api/auth/register",
            serde_json::json!({"username": "eve", "password": "p", "userType": "admin"}),
        )
        .await;
        assert_eq!(unknown_role.status(), StatusCode::BAD_REQUEST);

        let empty_name = post_json(
            app,
            "/api/auth/register",
            serde_json::json!({"username": "", "password": "p", "userType": "buyer"}),
        )
        .await;
        assert_eq!(empty_name.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(empty_name).await["code"], "INVALID_INPUT");
    }
}
