//! 카탈로그 서비스.
//!
//! 판매자 목록 조회, 판매자 카탈로그 조회, 카탈로그 게시를 담당합니다.

use std::sync::Arc;

use market_core::{
    Catalog, Identity, MarketError, MarketResult, MarketStore, NewCatalog, ProductItem, Role,
    UserSummary,
};
use tracing::info;
use uuid::Uuid;

use super::resolve_items;
use crate::auth::{ensure_permission, Permission};
use crate::metrics::record_catalog_created;

/// 카탈로그 서비스.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn MarketStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// 모든 판매자를 ID + 사용자 이름으로 조회합니다 (구매자 전용).
    pub async fn list_sellers(&self, caller: &Identity) -> MarketResult<Vec<UserSummary>> {
        ensure_permission(caller, Permission::BrowseSellers)?;
        Ok(self.store.list_users_by_role(Role::Seller).await?)
    }

    /// 판매자의 카탈로그를 조회합니다 (구매자 전용).
    ///
    /// 판매자가 여러 카탈로그를 가진 경우 가장 먼저 생성된 것을 반환합니다.
    ///
    /// # Errors
    ///
    /// - `MarketError::Forbidden`: 호출자가 구매자가 아님
    /// - `MarketError::NotFound`: 카탈로그 없음
    pub async fn get_catalog(&self, caller: &Identity, seller_id: Uuid) -> MarketResult<Catalog> {
        ensure_permission(caller, Permission::ViewCatalog)?;

        self.store
            .find_first_catalog_by_seller(seller_id)
            .await?
            .ok_or_else(|| MarketError::NotFound(format!("catalog for seller {}", seller_id)))
    }

    /// 호출자 소유의 새 카탈로그를 생성합니다 (판매자 전용).
    ///
    /// 기존 카탈로그와 병합하거나 중복을 제거하지 않습니다.
    pub async fn create_catalog(
        &self,
        caller: &Identity,
        items: Vec<ProductItem>,
    ) -> MarketResult<Catalog> {
        ensure_permission(caller, Permission::PublishCatalog)?;

        let products = resolve_items(self.store.as_ref(), items).await?;
        let catalog = self
            .store
            .insert_catalog(NewCatalog {
                seller_id: caller.user_id,
                products,
            })
            .await?;

        record_catalog_created();
        info!(
            catalog_id = %catalog.id,
            seller_id = %caller.user_id,
            products = catalog.products.len(),
            "Catalog created"
        );

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use market_core::{NewUser, UserStore};

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    fn items(ids: &[&str]) -> Vec<ProductItem> {
        ids.iter()
            .map(|id| ProductItem::Reference(id.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_list_sellers_projects_summary() {
        let store = Arc::new(MemoryStore::new());
        for (username, role) in [("alice", Role::Seller), ("bob", Role::Buyer)] {
            store
                .insert_user(NewUser {
                    username: username.to_string(),
                    password_hash: "hash".to_string(),
                    role,
                })
                .await
                .unwrap();
        }
        let catalogs = CatalogService::new(store);

        let sellers = catalogs.list_sellers(&identity(Role::Buyer)).await.unwrap();

        assert_eq!(sellers.len(), 1);
        assert_eq!(sellers[0].username, "alice");
    }

    #[tokio::test]
    async fn test_get_catalog_returns_oldest() {
        let catalogs = CatalogService::new(Arc::new(MemoryStore::new()));
        let seller = identity(Role::Seller);
        let buyer = identity(Role::Buyer);

        let first = catalogs.create_catalog(&seller, items(&["p1", "p2"])).await.unwrap();
        catalogs.create_catalog(&seller, items(&["p3"])).await.unwrap();

        let found = catalogs.get_catalog(&buyer, seller.user_id).await.unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.products, vec!["p1".to_string(), "p2".to_string()]);
    }

    #[tokio::test]
    async fn test_get_catalog_not_found() {
        let catalogs = CatalogService::new(Arc::new(MemoryStore::new()));

        let result = catalogs.get_catalog(&identity(Role::Buyer), Uuid::new_v4()).await;
        assert!(matches!(result, Err(MarketError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_role_checked_before_lookup() {
        let catalogs = CatalogService::new(Arc::new(MemoryStore::new()));
        let seller = identity(Role::Seller);

        // 카탈로그가 없어도 역할 불일치가 먼저 보고됨
        let result = catalogs.get_catalog(&seller, Uuid::new_v4()).await;
        assert!(matches!(result, Err(MarketError::Forbidden)));

        let result = catalogs.create_catalog(&identity(Role::Buyer), items(&["p1"])).await;
        assert!(matches!(result, Err(MarketError::Forbidden)));
    }
}
