//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공하고,
//! 도메인 에러(`MarketError`)를 HTTP 상태 코드로 변환합니다.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    Json,
};
use market_core::{AuthError, MarketError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "찾을 수 없음: catalog for seller 0b4f...",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_INPUT", "FORBIDDEN", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    ///
    /// # Example
    ///
    /// ```
    /// use market_api::error::ApiErrorResponse;
    ///
    /// let error = ApiErrorResponse::new("NOT_FOUND", "Catalog not found");
    /// assert!(error.timestamp.is_some());
    /// ```
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 도메인 에러에 대응하는 HTTP 상태 코드.
pub fn status_for(err: &MarketError) -> StatusCode {
    match err {
        MarketError::Conflict(_) => StatusCode::CONFLICT,
        MarketError::Auth(AuthError::NotFound | AuthError::BadPassword) => {
            StatusCode::UNAUTHORIZED
        }
        MarketError::Unauthenticated => StatusCode::UNAUTHORIZED,
        MarketError::Forbidden => StatusCode::FORBIDDEN,
        MarketError::NotFound(_) => StatusCode::NOT_FOUND,
        MarketError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        MarketError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 도메인 에러를 API 에러 응답으로 변환합니다.
///
/// 내부 에러는 로그에만 남기고 클라이언트에는 일반 메시지만 전달합니다.
pub fn market_error(err: MarketError) -> (StatusCode, Json<ApiErrorResponse>) {
    let status = status_for(&err);

    let message = if err.is_client_error() {
        err.to_string()
    } else {
        tracing::error!(error = %err, "Internal error while handling request");
        "내부 서버 오류가 발생했습니다".to_string()
    };

    (status, Json(ApiErrorResponse::new(err.code(), message)))
}

/// 요청 본문 검증 실패 응답.
pub fn validation_error(errors: validator::ValidationErrors) -> (StatusCode, Json<ApiErrorResponse>) {
    let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::with_details(
            "INVALID_INPUT",
            "요청 값이 유효하지 않습니다",
            details,
        )),
    )
}

/// JSON 본문 추출 실패 응답 (400).
pub fn json_rejection(rejection: JsonRejection) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new("INVALID_INPUT", rejection.body_text())),
    )
}

/// 경로 파라미터 추출 실패 응답 (400).
pub fn path_rejection(rejection: PathRejection) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new("INVALID_INPUT", rejection.body_text())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
        assert!(error.timestamp.is_some());
        assert!(error.details.is_none());
    }

    #[test]
    fn test_json_serialization_skips_details() {
        let error = ApiErrorResponse::new("NOT_FOUND", "Resource not found");
        let json = serde_json::to_string(&error).unwrap();

        assert!(!json.contains("details"));
        assert!(json.contains(r#""code":"NOT_FOUND""#));
        assert!(json.contains(r#""message":"Resource not found""#));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&MarketError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(&MarketError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(&MarketError::NotFound("catalog".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&MarketError::InvalidInput("items".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_error_is_opaque() {
        let (status, Json(body)) =
            market_error(MarketError::Internal("password authentication failed for user".into()));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(!body.message.contains("password authentication"));
    }
}
