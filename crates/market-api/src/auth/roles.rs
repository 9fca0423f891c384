//! 역할 기반 접근 제어 (RBAC).
//!
//! 보호된 작업마다 필요한 권한을 선언하고, 각 권한은 정확히 하나의 역할에 대응합니다.

use market_core::{Identity, MarketError, MarketResult, Role};

/// 시스템 권한.
///
/// 각 작업에 필요한 권한을 정의합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// 판매자 목록 조회
    BrowseSellers,
    /// 판매자 카탈로그 조회
    ViewCatalog,
    /// 주문 생성
    PlaceOrder,
    /// 카탈로그 게시
    PublishCatalog,
    /// 받은 주문 조회
    ViewSellerOrders,
}

impl Permission {
    /// 권한에 필요한 역할.
    pub fn required_role(&self) -> Role {
        match self {
            Permission::BrowseSellers | Permission::ViewCatalog | Permission::PlaceOrder => {
                Role::Buyer
            }
            Permission::PublishCatalog | Permission::ViewSellerOrders => Role::Seller,
        }
    }

    /// 권한에 대한 설명 반환.
    pub fn description(&self) -> &'static str {
        match self {
            Permission::BrowseSellers => "판매자 목록 조회",
            Permission::ViewCatalog => "카탈로그 조회",
            Permission::PlaceOrder => "주문 생성",
            Permission::PublishCatalog => "카탈로그 게시",
            Permission::ViewSellerOrders => "받은 주문 조회",
        }
    }
}

/// 추출기에서 사용하는 권한 마커 타입.
///
/// 핸들러는 `RequirePermission<PlaceOrder>`처럼 마커로 필요한 권한을 선언합니다.
pub mod capability {
    use super::Permission;

    /// 타입 수준에서 권한을 나타내는 마커.
    pub trait Capability {
        const PERMISSION: Permission;
    }

    macro_rules! capabilities {
        ($($name:ident),* $(,)?) => {
            $(
                #[doc = concat!("[`Permission::", stringify!($name), "`] 마커.")]
                #[derive(Debug, Clone, Copy)]
                pub struct $name;

                impl Capability for $name {
                    const PERMISSION: Permission = Permission::$name;
                }
            )*
        };
    }

    capabilities!(
        BrowseSellers,
        ViewCatalog,
        PlaceOrder,
        PublishCatalog,
        ViewSellerOrders,
    );
}

/// 역할이 특정 권한을 가지는지 확인.
pub fn has_permission(role: Role, permission: Permission) -> bool {
    permission.required_role() == role
}

/// 신원이 권한을 가지지 않으면 `MarketError::Forbidden`을 반환합니다.
pub fn ensure_permission(identity: &Identity, permission: Permission) -> MarketResult<()> {
    if has_permission(identity.role, permission) {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %identity.user_id,
            role = %identity.role,
            permission = ?permission,
            "Permission denied"
        );
        Err(MarketError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const ALL: [Permission; 5] = [
        Permission::BrowseSellers,
        Permission::ViewCatalog,
        Permission::PlaceOrder,
        Permission::PublishCatalog,
        Permission::ViewSellerOrders,
    ];

    #[test]
    fn test_each_permission_has_exactly_one_role() {
        for permission in ALL {
            let buyer = has_permission(Role::Buyer, permission);
            let seller = has_permission(Role::Seller, permission);
            assert!(buyer ^ seller, "{:?}", permission);
        }
    }

    #[test]
    fn test_role_permissions() {
        assert!(has_permission(Role::Buyer, Permission::PlaceOrder));
        assert!(has_permission(Role::Buyer, Permission::ViewCatalog));
        assert!(!has_permission(Role::Buyer, Permission::PublishCatalog));

        assert!(has_permission(Role::Seller, Permission::PublishCatalog));
        assert!(has_permission(Role::Seller, Permission::ViewSellerOrders));
        assert!(!has_permission(Role::Seller, Permission::BrowseSellers));
    }

    #[test]
    fn test_markers_match_variants() {
        use capability::*;

        assert_eq!(BrowseSellers::PERMISSION, Permission::BrowseSellers);
        assert_eq!(ViewCatalog::PERMISSION, Permission::ViewCatalog);
        assert_eq!(PlaceOrder::PERMISSION, Permission::PlaceOrder);
        assert_eq!(PublishCatalog::PERMISSION, Permission::PublishCatalog);
        assert_eq!(ViewSellerOrders::PERMISSION, Permission::ViewSellerOrders);
    }

    #[test]
    fn test_ensure_permission() {
        let seller = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Seller,
        };

        assert!(ensure_permission(&seller, Permission::PublishCatalog).is_ok());
        assert!(matches!(
            ensure_permission(&seller, Permission::PlaceOrder),
            Err(MarketError::Forbidden)
        ));
    }
}
