//! 마켓플레이스의 에러 타입.
//!
//! 이 모듈은 자격증명 저장소, 토큰 서비스, 접근 제어, 카탈로그/주문 서비스
//! 전반에서 사용되는 에러 분류 체계를 정의합니다.

use thiserror::Error;

use crate::domain::StoreError;

/// 자격증명 인증 실패 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// 해당 사용자 이름이 존재하지 않음
    #[error("사용자를 찾을 수 없습니다")]
    NotFound,
    /// 비밀번호 해시 비교 실패
    #[error("비밀번호가 일치하지 않습니다")]
    BadPassword,
}

/// 토큰 검증 실패 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// 파싱할 수 없는 토큰
    #[error("잘못된 토큰 형식")]
    Malformed,
    /// 서명 불일치
    #[error("토큰 서명이 유효하지 않습니다")]
    BadSignature,
    /// 만료된 토큰 (TTL 설정 시에만 발생)
    #[error("토큰이 만료되었습니다")]
    Expired,
}

/// 핵심 마켓플레이스 에러.
#[derive(Debug, Error)]
pub enum MarketError {
    /// 중복된 사용자 이름
    #[error("이미 사용 중인 사용자 이름입니다: {0}")]
    Conflict(String),

    /// 자격증명 인증 실패
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// 토큰 누락 또는 검증 실패
    #[error("인증이 필요합니다")]
    Unauthenticated,

    /// 역할 불일치
    #[error("권한이 부족합니다")]
    Forbidden,

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 저장소/인프라 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 마켓플레이스 작업을 위한 Result 타입.
pub type MarketResult<T> = Result<T, MarketError>;

impl MarketError {
    /// 호출자 측 에러인지 확인합니다.
    ///
    /// 내부 에러를 제외한 모든 에러는 클라이언트에 그대로 전달됩니다.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, MarketError::Internal(_))
    }

    /// API 응답용 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            MarketError::Conflict(_) => "USERNAME_TAKEN",
            MarketError::Auth(AuthError::NotFound) => "USER_NOT_FOUND",
            MarketError::Auth(AuthError::BadPassword) => "BAD_PASSWORD",
            MarketError::Unauthenticated => "UNAUTHENTICATED",
            MarketError::Forbidden => "FORBIDDEN",
            MarketError::NotFound(_) => "NOT_FOUND",
            MarketError::InvalidInput(_) => "INVALID_INPUT",
            MarketError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<TokenError> for MarketError {
    fn from(_: TokenError) -> Self {
        MarketError::Unauthenticated
    }
}

impl From<StoreError> for MarketError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => MarketError::Conflict(msg),
            StoreError::Backend(msg) => MarketError::Internal(msg),
        }
    }
}
