//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 로드합니다.
//! 설정은 기본값 → TOML 파일 → `MARKET__*` 환경 변수 순으로 덮어씁니다.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// JWT 서명 비밀 키의 최소 길이 (바이트).
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// 설정 로드/검증 에러.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// 소스 로드 또는 역직렬화 실패
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    /// 값 검증 실패
    #[error("설정 값이 유효하지 않습니다: {0}")]
    Invalid(String),
}

/// 애플리케이션 설정.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL (미설정 시 인메모리 저장소 사용)
    #[serde(default)]
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connect_timeout_secs: u64,
    /// 유휴 타임아웃 (초)
    pub idle_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout_secs: 10,
            idle_timeout_secs: 300,
        }
    }
}

/// 인증 설정.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// 토큰 서명용 비밀 키
    pub jwt_secret: SecretString,
    /// 토큰 유효 시간 (분). 미설정 시 만료 없음.
    #[serde(default)]
    pub token_ttl_minutes: Option<i64>,
}

impl AuthConfig {
    /// 주어진 비밀 키로 만료 없는 인증 설정을 생성합니다.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::from(jwt_secret.into()),
            token_ttl_minutes: None,
        }
    }

    /// 토큰 유효 시간을 설정합니다.
    pub fn with_token_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_minutes = Some(minutes);
        self
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// 파일명과 줄 번호 출력 여부
    #[serde(default)]
    pub with_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            with_file: false,
        }
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, SettingsError> {
        let mut builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 10)?
            .set_default("database.connect_timeout_secs", 10)?
            .set_default("database.idle_timeout_secs", 300)?
            .set_default("auth.jwt_secret", "")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("logging.with_file", false)?;

        // 파일에서 로드 (없어도 무방)
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(false));
        }

        // 환경 변수로 오버라이드
        let config = builder
            .add_source(
                config::Environment::with_prefix("MARKET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    ///
    /// `MARKET_CONFIG` 환경 변수가 있으면 그 경로를, 없으면 `config/default.toml`을 사용합니다.
    pub fn load_default() -> Result<Self, SettingsError> {
        let path =
            std::env::var("MARKET_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
        Self::load(Some(path))
    }

    /// 로드된 값을 검증합니다.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let secret_len = self.auth.jwt_secret.expose_secret().len();
        if secret_len < MIN_JWT_SECRET_LEN {
            return Err(SettingsError::Invalid(format!(
                "auth.jwt_secret must be at least {} bytes (got {})",
                MIN_JWT_SECRET_LEN, secret_len
            )));
        }

        if let Some(ttl) = self.auth.token_ttl_minutes {
            if ttl <= 0 {
                return Err(SettingsError::Invalid(format!(
                    "auth.token_ttl_minutes must be positive (got {})",
                    ttl
                )));
            }
        }

        if self.database.max_connections == 0 {
            return Err(SettingsError::Invalid(
                "database.max_connections must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
