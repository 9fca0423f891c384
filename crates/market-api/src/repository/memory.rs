//! 인메모리 저장소.
//!
//! 데이터베이스 없이 실행할 때와 테스트에서 사용합니다.
//! 모든 컬렉션은 하나의 `RwLock` 아래에 있으며, 사용자 이름 고유성은
//! 쓰기 잠금 안에서 `HashMap` 엔트리 삽입으로 보장됩니다.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use market_core::{
    Catalog, CatalogStore, MarketStore, NewCatalog, NewOrder, NewProduct, NewUser, Order,
    OrderStore, Product, ProductStore, Role, StoreError, User, UserStore, UserSummary,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    /// 사용자 이름 → 사용자
    users: HashMap<String, User>,
    products: Vec<Product>,
    /// 삽입 순서 유지
    catalogs: Vec<Catalog>,
    /// 삽입 순서 유지
    orders: Vec<Order>,
}

/// 인메모리 마켓플레이스 저장소.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 사용자 수.
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }

    /// 저장된 상품 수.
    pub async fn product_count(&self) -> usize {
        self.inner.read().await.products.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;

        match inner.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(user.username)),
            Entry::Vacant(slot) => {
                let record = User {
                    id: Uuid::new_v4(),
                    username: user.username,
                    password_hash: user.password_hash,
                    role: user.role,
                    created_at: Utc::now(),
                };
                Ok(slot.insert(record).clone())
            }
        }
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(username).cloned())
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<UserSummary>, StoreError> {
        let inner = self.inner.read().await;
        let mut users: Vec<UserSummary> = inner
            .users
            .values()
            .filter(|u| u.role == role)
            .map(User::summary)
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, StoreError> {
        let created: Vec<Product> = products
            .into_iter()
            .map(|p| Product {
                id: Uuid::new_v4().to_string(),
                name: p.name,
                price: p.price,
            })
            .collect();

        self.inner.write().await.products.extend(created.iter().cloned());
        Ok(created)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert_catalog(&self, catalog: NewCatalog) -> Result<Catalog, StoreError> {
        let record = Catalog {
            id: Uuid::new_v4(),
            seller_id: catalog.seller_id,
            products: catalog.products,
            created_at: Utc::now(),
        };

        self.inner.write().await.catalogs.push(record.clone());
        Ok(record)
    }

    async fn find_first_catalog_by_seller(
        &self,
        seller_id: Uuid,
    ) -> Result<Option<Catalog>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .catalogs
            .iter()
            .find(|c| c.seller_id == seller_id)
            .cloned())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let record = Order {
            id: Uuid::new_v4(),
            buyer_id: order.buyer_id,
            seller_id: order.seller_id,
            items: order.items,
            created_at: Utc::now(),
        };

        self.inner.write().await.orders.push(record.clone());
        Ok(record)
    }

    async fn list_orders_by_seller(&self, seller_id: Uuid) -> Result<Vec<Order>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .orders
            .iter()
            .filter(|o| o.seller_id == seller_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn new_user(username: &str, role: Role) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();

        store.insert_user(new_user("alice", Role::Seller)).await.unwrap();
        let result = store.insert_user(new_user("alice", Role::Buyer)).await;

        assert!(matches!(result, Err(StoreError::Conflict(ref name)) if name == "alice"));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_single_winner() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.insert_user(new_user("carol", Role::Buyer)).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_list_users_by_role_sorted() {
        let store = MemoryStore::new();
        store.insert_user(new_user("zed", Role::Seller)).await.unwrap();
        store.insert_user(new_user("bob", Role::Buyer)).await.unwrap();
        store.insert_user(new_user("alice", Role::Seller)).await.unwrap();

        let sellers = store.list_users_by_role(Role::Seller).await.unwrap();
        let names: Vec<_> = sellers.iter().map(|s| s.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "zed"]);
    }

    #[tokio::test]
    async fn test_usernames_sorted_by_bytes() {
        let store = MemoryStore::new();
        for name in ["Zed", "alice", "Bob"] {
            store.insert_user(new_user(name, Role::Seller)).await.unwrap();
        }

        let sellers = store.list_users_by_role(Role::Seller).await.unwrap();
        let names: Vec<_> = sellers.iter().map(|s| s.username.as_str()).collect();
        // 대문자가 소문자보다 앞
        assert_eq!(names, vec!["Bob", "Zed", "alice"]);
    }

    #[tokio::test]
    async fn test_first_catalog_is_oldest() {
        let store = MemoryStore::new();
        let seller_id = Uuid::new_v4();

        let first = store
            .insert_catalog(NewCatalog {
                seller_id,
                products: vec!["p1".to_string()],
            })
            .await
            .unwrap();
        store
            .insert_catalog(NewCatalog {
                seller_id,
                products: vec!["p2".to_string()],
            })
            .await
            .unwrap();

        let found = store.find_first_catalog_by_seller(seller_id).await.unwrap();
        assert_eq!(found, Some(first));
        assert!(store
            .find_first_catalog_by_seller(Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_insert_products_preserves_order() {
        let store = MemoryStore::new();
        let created = store
            .insert_products(vec![
                NewProduct {
                    name: "Tea".to_string(),
                    price: dec!(4.5),
                },
                NewProduct {
                    name: "Mug".to_string(),
                    price: dec!(12),
                },
            ])
            .await
            .unwrap();

        assert_eq!(created[0].name, "Tea");
        assert_eq!(created[1].name, "Mug");
        assert_ne!(created[0].id, created[1].id);
        assert_eq!(store.product_count().await, 2);
    }

    #[tokio::test]
    async fn test_orders_filtered_by_seller() {
        let store = MemoryStore::new();
        let buyer_id = Uuid::new_v4();
        let seller_a = Uuid::new_v4();
        let seller_b = Uuid::new_v4();

        for (seller_id, item) in [(seller_a, "p1"), (seller_b, "p2"), (seller_a, "p3")] {
            store
                .insert_order(NewOrder {
                    buyer_id,
                    seller_id,
                    items: vec![item.to_string()],
                })
                .await
                .unwrap();
        }

        let orders = store.list_orders_by_seller(seller_a).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].items, vec!["p1".to_string()]);
        assert_eq!(orders[1].items, vec!["p3".to_string()]);
    }
}
