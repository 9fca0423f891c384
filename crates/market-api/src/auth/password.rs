//! 비밀번호 해싱 유틸리티.
//!
//! Argon2 기반 비밀번호 해싱 및 검증.
//! 해싱은 CPU 집약적이므로 비동기 코드에서는 `*_blocking` 변형을 사용합니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 최대 길이 (바이트).
pub const MAX_PASSWORD_BYTES: usize = 128;

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("비밀번호 검증 실패")]
    VerificationFailed,
    #[error("잘못된 해시 형식")]
    InvalidHashFormat,
    #[error("해싱 작업이 중단되었습니다")]
    TaskAborted,
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘(기본 파라미터)을 사용하며 솔트는 자동으로 생성됩니다.
///
/// # Returns
///
/// PHC 형식의 해시 문자열 (솔트 포함)
///
/// # Example
///
/// ```rust,ignore
/// let hash = hash_password("my_secure_password").unwrap();
/// // "$argon2id$v=19$m=19456,t=2,p=1$..."
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 저장된 해시와 입력된 비밀번호를 비교합니다. 비교는 Argon2 구현에 위임되며
/// 상수 시간으로 수행됩니다.
///
/// # Returns
///
/// 비밀번호가 일치하면 Ok(()), 불일치하면 `PasswordError::VerificationFailed`
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// 블로킹 스레드 풀에서 비밀번호를 해싱합니다.
pub async fn hash_password_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| PasswordError::TaskAborted)?
}

/// 블로킹 스레드 풀에서 비밀번호를 검증합니다.
pub async fn verify_password_blocking(password: String, hash: String) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|_| PasswordError::TaskAborted)?
}

/// 비밀번호 입력 형식 검증.
///
/// 강도 정책은 두지 않고 비어 있지 않음과 최대 길이만 확인합니다.
pub fn validate_password_input(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("password must not be empty");
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err("password must be at most 128 bytes");
    }

    Ok(())
}
