//! 사용자, 역할, 신원.
//!
//! - `Role` - 구매자/판매자 역할
//! - `User` - 저장된 사용자 레코드 (비밀번호 해시 포함, 직렬화하지 않음)
//! - `Identity` - 사용자 ID + 역할
//! - `UserSummary` - 외부 노출용 ID + 사용자 이름

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 사용자 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 구매자 - 판매자 목록/카탈로그 조회, 주문 생성
    Buyer,
    /// 판매자 - 카탈로그 생성, 받은 주문 조회
    Seller,
}

impl Role {
    /// 저장소/토큰에 쓰이는 문자열 표현.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }

    /// 문자열에서 역할 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "buyer" => Some(Role::Buyer),
            "seller" => Some(Role::Seller),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 저장된 사용자 레코드.
///
/// 등록 후 변경되지 않습니다. `password_hash`가 외부로 새지 않도록
/// `Serialize`를 구현하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 사용자의 신원(ID + 역할).
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.id,
            role: self.role,
        }
    }

    /// 외부 노출용 요약.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// 새 사용자 입력 (비밀번호는 이미 해싱된 상태).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// 사용자 신원.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

/// 사용자 요약 (ID + 사용자 이름).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("buyer"), Some(Role::Buyer));
        assert_eq!(Role::parse("SELLER"), Some(Role::Seller));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Seller).unwrap();
        assert_eq!(json, "\"seller\"");

        let parsed: Role = serde_json::from_str("\"buyer\"").unwrap();
        assert_eq!(parsed, Role::Buyer);
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
    }

    #[test]
    fn test_summary_hides_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            role: Role::Seller,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user.summary()).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("argon2"));
        assert_eq!(user.identity().role, Role::Seller);
    }
}
