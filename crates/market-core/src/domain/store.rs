//! 저장소 추상화.
//!
//! 사용자, 상품, 카탈로그, 주문을 영속화하기 위한 저장소 중립적인
//! 인터페이스를 제공합니다. PostgreSQL 저장소와 인메모리 저장소가
//! 같은 trait를 구현합니다.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::{
    Catalog, NewCatalog, NewOrder, NewProduct, NewUser, Order, Product, Role, User, UserSummary,
};

// =============================================================================
// 에러 타입
// =============================================================================

/// 저장소 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 고유 제약 위반 (예: 중복 사용자 이름)
    #[error("고유 제약 위반: {0}")]
    Conflict(String),

    /// 백엔드 에러 (연결 실패, 쿼리 실패 등)
    #[error("저장소 에러: {0}")]
    Backend(String),
}

// =============================================================================
// 저장소 trait
// =============================================================================

/// 사용자 저장소.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 새 사용자를 삽입합니다.
    ///
    /// 사용자 이름 검사와 삽입은 하나의 원자적 연산입니다.
    /// 동시에 같은 이름으로 여러 요청이 와도 정확히 하나만 성공합니다.
    ///
    /// # Errors
    ///
    /// - `StoreError::Conflict`: 사용자 이름이 이미 존재
    /// - `StoreError::Backend`: 저장소 장애
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// 사용자 이름으로 조회합니다.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// 주어진 역할의 사용자 목록을 사용자 이름 순으로 조회합니다.
    async fn list_users_by_role(&self, role: Role) -> Result<Vec<UserSummary>, StoreError>;
}

/// 상품 저장소.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 상품들을 삽입하고 입력 순서대로 생성된 레코드를 반환합니다.
    async fn insert_products(&self, products: Vec<NewProduct>)
        -> Result<Vec<Product>, StoreError>;
}

/// 카탈로그 저장소.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// 새 카탈로그를 삽입합니다.
    async fn insert_catalog(&self, catalog: NewCatalog) -> Result<Catalog, StoreError>;

    /// 판매자의 가장 먼저 생성된 카탈로그를 조회합니다.
    async fn find_first_catalog_by_seller(
        &self,
        seller_id: Uuid,
    ) -> Result<Option<Catalog>, StoreError>;
}

/// 주문 저장소.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// 새 주문을 삽입합니다.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// 판매자가 받은 주문을 생성 순서대로 조회합니다.
    async fn list_orders_by_seller(&self, seller_id: Uuid) -> Result<Vec<Order>, StoreError>;
}

/// 마켓플레이스 전체 저장소.
#[async_trait]
pub trait MarketStore: UserStore + ProductStore + CatalogStore + OrderStore {
    /// 저장소 연결 상태를 확인합니다.
    async fn ping(&self) -> Result<(), StoreError>;

    /// 로그/헬스체크용 백엔드 이름.
    fn backend_name(&self) -> &'static str;
}
