//! 인증 및 권한 부여.
//!
//! JWT 기반 인증 및 역할 기반 접근 제어(RBAC)를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`TokenService`]: 토큰 발급/검증 (HS256)
//! - [`Claims`]: JWT 페이로드 (`userId`, `userType`)
//! - [`Permission`]: 작업별 필요 권한
//! - [`JwtAuth`], [`RequirePermission`]: Axum 추출기
//! - [`capability`]: 추출기에 권한을 선언하는 마커 타입
//! - 비밀번호 해싱/검증 함수
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! // 판매자 전용 라우트
//! async fn seller_handler(
//!     RequirePermission(identity, _): RequirePermission<ViewSellerOrders>,
//! ) -> impl IntoResponse {
//!     format!("Hello, seller {}!", identity.user_id)
//! }
//! ```

mod jwt;
mod middleware;
mod password;
mod roles;

pub use jwt::{Claims, TokenService};
pub use middleware::{JwtAuth, JwtAuthError, RequirePermission};
pub use password::{
    hash_password, hash_password_blocking, validate_password_input, verify_password,
    verify_password_blocking, PasswordError, MAX_PASSWORD_BYTES,
};
pub use roles::{capability, ensure_permission, has_permission, Permission};
