//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 시작 시 한 번 생성되어 Arc로 래핑되고, 이후 변경되지 않습니다.
//! 서명 비밀 키와 저장소 핸들은 전역 변수가 아니라 이 상태를 통해서만 전달됩니다.

use std::sync::Arc;

use axum::extract::FromRef;
use market_core::MarketStore;

use crate::auth::TokenService;
use crate::services::{CatalogService, CredentialService, OrderService};

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 마켓플레이스 저장소 (PostgreSQL 또는 인메모리)
    pub store: Arc<dyn MarketStore>,

    /// 토큰 발급/검증 서비스
    pub tokens: TokenService,

    /// 자격증명 서비스 - 등록, 인증
    pub credentials: CredentialService,

    /// 카탈로그 서비스 - 판매자 목록, 카탈로그 조회/게시
    pub catalogs: CatalogService,

    /// 주문 서비스 - 주문 생성, 판매자 주문 조회
    pub orders: OrderService,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// # 인자
    /// * `store` - 저장소 구현
    /// * `tokens` - 토큰 서비스
    pub fn new(store: Arc<dyn MarketStore>, tokens: TokenService) -> Self {
        Self {
            credentials: CredentialService::new(Arc::clone(&store)),
            catalogs: CatalogService::new(Arc::clone(&store)),
            orders: OrderService::new(Arc::clone(&store)),
            store,
            tokens,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// 저장소 연결 상태 확인.
    pub async fn is_store_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, backend = self.store.backend_name(), "Store health check failed");
                false
            }
        }
    }
}

impl FromRef<Arc<AppState>> for TokenService {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.tokens.clone()
    }
}

/// 테스트용 AppState 생성 (인메모리 저장소, 만료 없는 토큰).
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use secrecy::SecretString;

    use crate::repository::MemoryStore;

    let tokens = TokenService::new(
        &SecretString::from("test-secret-key-for-jwt-testing-minimum-32-chars"),
        None,
    );
    AppState::new(Arc::new(MemoryStore::new()), tokens)
}
