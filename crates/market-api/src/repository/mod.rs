//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 서비스 계층에서 분리하여 관리합니다.
//! 테이블별 Repository는 static methods 패턴을 사용하고,
//! [`PgStore`]가 이를 묶어 `market-core`의 저장소 trait를 구현합니다.

pub mod catalogs;
pub mod memory;
pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use market_core::{
    Catalog, CatalogStore, DatabaseConfig, MarketStore, NewCatalog, NewOrder, NewProduct, NewUser,
    Order, OrderStore, Product, ProductStore, Role, StoreError, User, UserStore, UserSummary,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub use catalogs::{CatalogRecord, CatalogRepository};
pub use memory::MemoryStore;
pub use orders::{OrderRecord, OrderRepository};
pub use products::{ProductRecord, ProductRepository};
pub use users::{UserRecord, UserRepository, UserSummaryRecord};

/// sqlx 에러를 저장소 에러로 변환합니다.
///
/// PostgreSQL 고유 제약 위반(23505)만 `Conflict`로 분류합니다.
fn store_error(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(db_err.message().to_string());
        }
    }
    StoreError::Backend(err.to_string())
}

/// PostgreSQL 기반 마켓플레이스 저장소.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// 설정으로부터 연결 풀을 생성합니다.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        info!(max_connections = config.max_connections, "Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        info!("Database connection established");

        Ok(Self { pool })
    }

    /// 데이터베이스 마이그레이션을 실행합니다.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        info!("Running database migrations...");

        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        info!("Migrations completed successfully");
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        match UserRepository::insert(&self.pool, &user).await {
            Ok(record) => User::try_from(record),
            Err(e) => match store_error(e) {
                StoreError::Conflict(_) => Err(StoreError::Conflict(user.username)),
                other => Err(other),
            },
        }
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        UserRepository::find_by_username(&self.pool, username)
            .await
            .map_err(store_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<UserSummary>, StoreError> {
        let records = UserRepository::list_by_role(&self.pool, role)
            .await
            .map_err(store_error)?;
        Ok(records.into_iter().map(UserSummary::from).collect())
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn insert_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, StoreError> {
        let records = ProductRepository::insert_many(&self.pool, &products)
            .await
            .map_err(store_error)?;
        Ok(records.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn insert_catalog(&self, catalog: NewCatalog) -> Result<Catalog, StoreError> {
        CatalogRepository::insert(&self.pool, &catalog)
            .await
            .map(Catalog::from)
            .map_err(store_error)
    }

    async fn find_first_catalog_by_seller(
        &self,
        seller_id: Uuid,
    ) -> Result<Option<Catalog>, StoreError> {
        CatalogRepository::find_first_by_seller(&self.pool, seller_id)
            .await
            .map(|record| record.map(Catalog::from))
            .map_err(store_error)
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        OrderRepository::insert(&self.pool, &order)
            .await
            .map(Order::from)
            .map_err(store_error)
    }

    async fn list_orders_by_seller(&self, seller_id: Uuid) -> Result<Vec<Order>, StoreError> {
        let records = OrderRepository::list_by_seller(&self.pool, seller_id)
            .await
            .map_err(store_error)?;
        Ok(records.into_iter().map(Order::from).collect())
    }
}

#[async_trait]
impl MarketStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
