//! # Market Core
//!
//! 마켓플레이스 백엔드의 핵심 도메인 모델 및 공용 인프라를 제공합니다.
//!
//! 이 크레이트는 API 서버와 저장소 어댑터가 공유하는 기본 타입을 제공합니다:
//! - 사용자(구매자/판매자)와 역할
//! - 상품, 카탈로그, 주문
//! - 저장소 포트 (trait) 및 저장소 에러
//! - 에러 분류 체계
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
