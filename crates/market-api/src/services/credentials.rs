//! 자격증명 서비스.
//!
//! 사용자 등록과 인증을 담당합니다. 비밀번호는 Argon2id 해시로만 저장되며
//! 평문 비밀번호는 로그나 에러 메시지에 포함되지 않습니다.

use std::sync::Arc;

use market_core::{AuthError, Identity, MarketError, MarketResult, MarketStore, NewUser, Role};
use tracing::{info, warn};

use crate::auth::{
    hash_password_blocking, validate_password_input, verify_password_blocking, PasswordError,
};
use crate::metrics::{record_login, record_registration};

/// 사용자 이름 최대 길이 (문자 수).
pub const MAX_USERNAME_CHARS: usize = 64;

/// 자격증명 서비스.
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn MarketStore>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// 새 사용자를 등록합니다.
    ///
    /// # Errors
    ///
    /// - `MarketError::InvalidInput`: 사용자 이름/비밀번호 형식 오류
    /// - `MarketError::Conflict`: 이미 존재하는 사용자 이름
    /// - `MarketError::Internal`: 해싱 또는 저장소 실패
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> MarketResult<Identity> {
        validate_username(username)?;
        validate_password_input(password)
            .map_err(|reason| MarketError::InvalidInput(reason.to_string()))?;

        // 조기 거절용 사전 확인. 고유성은 저장소 제약이 최종 보장합니다.
        if self.store.find_user_by_username(username).await?.is_some() {
            info!(username = %username, "Registration rejected: username taken");
            return Err(MarketError::Conflict(username.to_string()));
        }

        let password_hash = hash_password_blocking(password.to_string())
            .await
            .map_err(internal_password_error)?;

        let user = self
            .store
            .insert_user(NewUser {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await
            .map_err(|e| {
                let err = MarketError::from(e);
                if matches!(err, MarketError::Conflict(_)) {
                    info!(username = %username, "Registration lost uniqueness race");
                }
                err
            })?;

        record_registration(role.as_str());
        info!(user_id = %user.id, role = %role, "User registered");

        Ok(user.identity())
    }

    /// 사용자 이름과 비밀번호로 인증합니다.
    ///
    /// # Errors
    ///
    /// - `MarketError::Auth(AuthError::NotFound)`: 사용자 없음
    /// - `MarketError::Auth(AuthError::BadPassword)`: 비밀번호 불일치
    /// - `MarketError::Internal`: 저장소 실패 또는 손상된 해시
    pub async fn authenticate(&self, username: &str, password: &str) -> MarketResult<Identity> {
        let Some(user) = self.store.find_user_by_username(username).await? else {
            record_login("user_not_found");
            info!(username = %username, "Login failed: user not found");
            return Err(AuthError::NotFound.into());
        };

        match verify_password_blocking(password.to_string(), user.password_hash.clone()).await {
            Ok(()) => {
                record_login("success");
                info!(user_id = %user.id, role = %user.role, "User logged in");
                Ok(user.identity())
            }
            Err(PasswordError::VerificationFailed) => {
                record_login("bad_password");
                warn!(user_id = %user.id, "Login failed: bad password");
                Err(AuthError::BadPassword.into())
            }
            Err(e) => Err(internal_password_error(e)),
        }
    }
}

fn validate_username(username: &str) -> MarketResult<()> {
    if username.trim().is_empty() {
        return Err(MarketError::InvalidInput("username must not be empty".to_string()));
    }
    if username.trim() != username {
        return Err(MarketError::InvalidInput(
            "username must not have surrounding whitespace".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(MarketError::InvalidInput(format!(
            "username must be at most {} characters",
            MAX_USERNAME_CHARS
        )));
    }
    Ok(())
}

fn internal_password_error(err: PasswordError) -> MarketError {
    MarketError::Internal(err.to_string())
}
