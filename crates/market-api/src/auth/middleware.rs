//! Axum용 JWT 인증 추출기.
//!
//! 보호된 핸들러의 첫 번째 인자로 사용하면 핸들러 본문이 실행되기 전에
//! 토큰 검증과 역할 확인이 끝납니다.

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use market_core::{Identity, TokenError};

use super::capability::Capability;
use super::{ensure_permission, Claims, Permission, TokenService};
use crate::error::ApiErrorResponse;

/// JWT 인증 추출기.
///
/// 역할과 무관하게 유효한 토큰만 요구합니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(claims): JwtAuth,
/// ) -> impl IntoResponse {
///     format!("Authenticated user: {}", claims.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

/// JWT 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtAuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("권한이 부족합니다: {}", .0.description())]
    InsufficientPermission(Permission),
}

impl From<TokenError> for JwtAuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => JwtAuthError::TokenExpired,
            TokenError::Malformed | TokenError::BadSignature => JwtAuthError::InvalidToken,
        }
    }
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            JwtAuthError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            JwtAuthError::InvalidAuthHeader => (StatusCode::UNAUTHORIZED, "INVALID_AUTH_HEADER"),
            JwtAuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            JwtAuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            JwtAuthError::InsufficientPermission(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        };

        (status, Json(ApiErrorResponse::new(code, self.to_string()))).into_response()
    }
}

/// Authorization 헤더 값에서 토큰을 꺼냅니다.
///
/// `Bearer <token>` 형식과 토큰만 있는 형식을 모두 허용합니다.
fn extract_token(parts: &Parts) -> Result<&str, JwtAuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(JwtAuthError::MissingToken)?
        .to_str()
        .map_err(|_| JwtAuthError::InvalidAuthHeader)?
        .trim();

    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .unwrap_or(header)
        .trim();

    if token.is_empty() {
        return Err(JwtAuthError::MissingToken);
    }

    Ok(token)
}

impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
    TokenService: FromRef<S>,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let tokens = TokenService::from_ref(state);

        let claims = tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            JwtAuthError::from(e)
        })?;

        Ok(JwtAuth(claims))
    }
}

/// 선언된 권한을 요구하는 추출기.
///
/// 토큰 검증 후 `C::PERMISSION`의 역할과 호출자 역할을 비교합니다.
/// 핸들러의 첫 번째 인자로 두면 데이터 접근 전에 거절됩니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn create_order(
///     RequirePermission(identity, _): RequirePermission<PlaceOrder>,
/// ) -> impl IntoResponse {
///     format!("buyer {}", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequirePermission<C>(pub Identity, pub PhantomData<C>);

impl<S, C> FromRequestParts<S> for RequirePermission<C>
where
    S: Send + Sync,
    TokenService: FromRef<S>,
    C: Capability + Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let JwtAuth(claims) = JwtAuth::from_request_parts(parts, state).await?;
        let identity = claims.identity();

        ensure_permission(&identity, C::PERMISSION)
            .map_err(|_| JwtAuthError::InsufficientPermission(C::PERMISSION))?;

        Ok(RequirePermission(identity, PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::capability::{
        BrowseSellers, PlaceOrder, PublishCatalog, ViewSellerOrders,
    };
    use axum::http::Request;
    use market_core::Role;
    use secrecy::SecretString;
    use uuid::Uuid;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    fn tokens() -> TokenService {
        TokenService::new(&SecretString::from(TEST_SECRET), None)
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/buyer/list-of-sellers");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn token_for(role: Role) -> String {
        tokens()
            .issue(Identity {
                user_id: Uuid::new_v4(),
                role,
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_header() {
        let mut parts = parts_with_auth(None);
        let result = JwtAuth::from_request_parts(&mut parts, &tokens()).await;
        assert!(matches!(result, Err(JwtAuthError::MissingToken)));
    }

    #[tokio::test]
    async fn test_bearer_and_raw_token_accepted() {
        let token = token_for(Role::Buyer);

        let mut bearer = parts_with_auth(Some(&format!("Bearer {}", token)));
        assert!(JwtAuth::from_request_parts(&mut bearer, &tokens()).await.is_ok());

        let mut raw = parts_with_auth(Some(&token));
        assert!(JwtAuth::from_request_parts(&mut raw, &tokens()).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_token_rejected() {
        let mut parts = parts_with_auth(Some("Bearer not.a.token"));
        let result = JwtAuth::from_request_parts(&mut parts, &tokens()).await;
        assert!(matches!(result, Err(JwtAuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_permission_extractor_follows_required_role() {
        let seller_token = token_for(Role::Seller);

        let mut parts = parts_with_auth(Some(&seller_token));
        let RequirePermission(identity, _) =
            RequirePermission::<PublishCatalog>::from_request_parts(&mut parts, &tokens())
                .await
                .unwrap();
        assert_eq!(identity.role, Role::Seller);

        let mut parts = parts_with_auth(Some(&seller_token));
        let result = RequirePermission::<PlaceOrder>::from_request_parts(&mut parts, &tokens()).await;
        assert!(matches!(
            result,
            Err(JwtAuthError::InsufficientPermission(Permission::PlaceOrder))
        ));

        let mut parts = parts_with_auth(Some(&seller_token));
        let result =
            RequirePermission::<BrowseSellers>::from_request_parts(&mut parts, &tokens()).await;
        assert!(matches!(
            result,
            Err(JwtAuthError::InsufficientPermission(Permission::BrowseSellers))
        ));
    }

    #[tokio::test]
    async fn test_permission_extractor_requires_token() {
        let mut parts = parts_with_auth(None);
        let result = RequirePermission::<ViewSellerOrders>::from_request_parts(&mut parts, &tokens()).await;
        assert!(matches!(result, Err(JwtAuthError::MissingToken)));
    }

    #[test]
    fn test_forbidden_message_names_permission() {
        let error = JwtAuthError::InsufficientPermission(Permission::PlaceOrder);
        assert!(error.to_string().contains(Permission::PlaceOrder.description()));
    }

    #[test]
    fn test_jwt_auth_error_responses() {
        let cases = [
            (JwtAuthError::MissingToken, StatusCode::UNAUTHORIZED),
            (JwtAuthError::InvalidAuthHeader, StatusCode::UNAUTHORIZED),
            (JwtAuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (JwtAuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (
                JwtAuthError::InsufficientPermission(Permission::ViewCatalog),
                StatusCode::FORBIDDEN,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
