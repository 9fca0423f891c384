//! 마켓플레이스 비즈니스 서비스.
//!
//! 자격증명, 카탈로그, 주문 서비스를 제공합니다. 각 서비스는 저장소 trait 객체를
//! 공유하며, 보호된 작업은 저장소에 접근하기 전에 권한을 다시 확인합니다.

pub mod catalog;
pub mod credentials;
pub mod orders;

pub use catalog::CatalogService;
pub use credentials::{CredentialService, MAX_USERNAME_CHARS};
pub use orders::OrderService;

use market_core::{MarketError, MarketResult, MarketStore, NewProduct, ProductId, ProductItem};

/// 페이로드 항목을 상품 ID 목록으로 변환합니다.
///
/// 참조 항목은 그대로 두고, 인라인 상품은 한 번에 삽입한 뒤 새 ID로 바꿉니다.
/// 결과는 입력 순서를 유지합니다.
///
/// 모든 항목을 먼저 검증하므로 형식 오류가 있으면 상품이 하나도 삽입되지 않습니다.
/// 인라인 상품은 이후의 카탈로그/주문 삽입과 같은 트랜잭션에 묶이지 않습니다.
/// 뒤따르는 삽입이 실패하면 어디에서도 참조되지 않는 상품 행이 남을 수 있습니다.
pub(crate) async fn resolve_items(
    store: &dyn MarketStore,
    items: Vec<ProductItem>,
) -> MarketResult<Vec<ProductId>> {
    for (idx, item) in items.iter().enumerate() {
        item.validate()
            .map_err(|reason| MarketError::InvalidInput(format!("items[{}]: {}", idx, reason)))?;
    }

    let inline: Vec<NewProduct> = items
        .iter()
        .filter_map(|item| match item {
            ProductItem::Inline(product) => Some(product.clone()),
            ProductItem::Reference(_) => None,
        })
        .collect();

    let mut created = if inline.is_empty() {
        Vec::new()
    } else {
        store.insert_products(inline).await?
    }
    .into_iter();

    items
        .into_iter()
        .map(|item| match item {
            ProductItem::Reference(id) => Ok(id),
            ProductItem::Inline(_) => created.next().map(|p| p.id).ok_or_else(|| {
                MarketError::Internal("product store returned fewer rows than inserted".to_string())
            }),
        })
        .collect()
}
