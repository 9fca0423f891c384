//! 마켓플레이스 도메인 모델.

mod catalog;
mod order;
mod product;
mod store;
mod user;

pub use catalog::*;
pub use order::*;
pub use product::*;
pub use store::*;
pub use user::*;
