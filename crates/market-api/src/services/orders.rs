//! 주문 서비스.
//!
//! 주문 항목은 판매자 카탈로그와 대조하지 않으며, `seller_id`가 실제 판매자인지도
//! 확인하지 않습니다.

use std::sync::Arc;

use market_core::{Identity, MarketResult, MarketStore, NewOrder, Order, ProductItem};
use tracing::info;
use uuid::Uuid;

use super::resolve_items;
use crate::auth::{ensure_permission, Permission};
use crate::metrics::record_order_created;

/// 주문 서비스.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn MarketStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// 판매자에게 주문을 생성합니다 (구매자 전용). 구매자는 호출자입니다.
    pub async fn create_order(
        &self,
        caller: &Identity,
        seller_id: Uuid,
        items: Vec<ProductItem>,
    ) -> MarketResult<Order> {
        ensure_permission(caller, Permission::PlaceOrder)?;

        let items = resolve_items(self.store.as_ref(), items).await?;
        let order = self
            .store
            .insert_order(NewOrder {
                buyer_id: caller.user_id,
                seller_id,
                items,
            })
            .await?;

        record_order_created();
        info!(
            order_id = %order.id,
            buyer_id = %caller.user_id,
            seller_id = %seller_id,
            items = order.items.len(),
            "Order created"
        );

        Ok(order)
    }

    /// 호출자가 받은 주문을 오래된 순으로 조회합니다 (판매자 전용).
    pub async fn list_orders_for_seller(&self, caller: &Identity) -> MarketResult<Vec<Order>> {
        ensure_permission(caller, Permission::ViewSellerOrders)?;
        Ok(self.store.list_orders_by_seller(caller.user_id).await?)
    }
}
