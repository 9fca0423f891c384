//! 상품 및 상품 참조.
//!
//! 상품은 독립적인 생명주기가 없고, 카탈로그나 주문 페이로드에서
//! 인라인으로 지정될 때 암묵적으로 생성됩니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 상품 식별자.
///
/// 클라이언트가 보낸 참조는 검증 없이 그대로 저장되므로 불투명 문자열입니다.
pub type ProductId = String;

/// 가격 소수점 이하 최대 자릿수 (`NUMERIC(20, 8)`).
pub const MAX_PRICE_SCALE: u32 = 8;

/// 가격 정수부 최대 자릿수 (`NUMERIC(20, 8)`).
pub const MAX_PRICE_INTEGER_DIGITS: u32 = 12;

/// 상품 레코드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
}

/// 인라인 상품 입력.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
}

/// 카탈로그/주문 페이로드의 상품 항목.
///
/// JSON 문자열이면 기존 상품 참조, 객체면 새 상품으로 취급합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum ProductItem {
    /// 기존 상품 ID 참조
    Reference(ProductId),
    /// 새로 생성할 상품
    Inline(NewProduct),
}

impl ProductItem {
    /// 항목 형식을 검증합니다.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ProductItem::Reference(id) if id.trim().is_empty() => {
                Err("product reference must not be empty".to_string())
            }
            ProductItem::Inline(product) if product.name.trim().is_empty() => {
                Err("product name must not be empty".to_string())
            }
            ProductItem::Inline(product) => validate_price(product.price),
            ProductItem::Reference(_) => Ok(()),
        }
    }
}

/// 가격이 음수가 아니고 저장 가능한 정밀도 안에 있는지 확인합니다.
///
/// `NUMERIC(20, 8)`에 들어가지 않는 값은 저장소에 닿기 전에 거절합니다.
fn validate_price(price: Decimal) -> Result<(), String> {
    if price.is_sign_negative() {
        return Err(format!("product price must not be negative: {}", price));
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(format!(
            "product price must have at most {} decimal places: {}",
            MAX_PRICE_SCALE, price
        ));
    }
    let limit = Decimal::from(10_i64.pow(MAX_PRICE_INTEGER_DIGITS));
    if price.trunc() >= limit {
        return Err(format!(
            "product price must have at most {} integer digits: {}",
            MAX_PRICE_INTEGER_DIGITS, price
        ));
    }
    Ok(())
}
