//! JWT 토큰 처리.
//!
//! 사용자 신원(ID + 역할)을 담은 토큰을 HS256으로 서명하고 검증합니다.
//! 서버에는 세션 상태가 없으며, 서명 비밀 키는 `TokenService`만 보유합니다.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use market_core::{AuthConfig, Identity, MarketError, MarketResult, Role, TokenError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT 페이로드.
///
/// 서명 검증을 통과한 값만 신뢰합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// 사용자 ID
    pub user_id: Uuid,
    /// 사용자 역할
    pub user_type: Role,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - TTL이 설정된 경우에만 포함
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// 신원으로부터 Claims 생성.
    pub fn new(identity: Identity, ttl: Option<Duration>) -> Self {
        let now = Utc::now();
        Self {
            user_id: identity.user_id,
            user_type: identity.role,
            iat: now.timestamp(),
            exp: ttl.map(|ttl| (now + ttl).timestamp()),
        }
    }

    /// Claims가 나타내는 신원.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            role: self.user_type,
        }
    }
}

struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

/// 토큰 발급/검증 서비스.
///
/// 시작 시 한 번 생성되어 애플리케이션 상태로 공유됩니다. 복제 비용은 `Arc` 복제입니다.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<TokenKeys>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.keys.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// 비밀 키와 선택적 TTL(분)로 서비스를 생성합니다.
    pub fn new(secret: &SecretString, ttl_minutes: Option<i64>) -> Self {
        let secret = secret.expose_secret().as_bytes();
        let ttl = ttl_minutes.map(Duration::minutes);

        let mut validation = Validation::new(Algorithm::HS256);
        if ttl.is_some() {
            validation.leeway = 0;
        } else {
            // 만료 없는 토큰
            validation.validate_exp = false;
            validation.required_spec_claims = HashSet::new();
        }

        Self {
            keys: Arc::new(TokenKeys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
                ttl,
            }),
        }
    }

    /// 인증 설정으로부터 서비스를 생성합니다.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_minutes)
    }

    /// 신원에 대한 서명된 토큰을 발급합니다.
    pub fn issue(&self, identity: Identity) -> MarketResult<String> {
        self.encode_claims(&Claims::new(identity, self.keys.ttl))
    }

    /// 토큰을 검증하고 Claims를 반환합니다.
    ///
    /// # Errors
    ///
    /// - `TokenError::BadSignature`: 서명 불일치
    /// - `TokenError::Expired`: TTL 설정 시 만료된 토큰
    /// - `TokenError::Malformed`: 그 외 파싱할 수 없는 토큰
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.keys.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }

    fn encode_claims(&self, claims: &Claims) -> MarketResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys.encoding).map_err(|e| {
            tracing::error!(error = %e, "Failed to encode token");
            MarketError::Internal("token encoding failed".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    fn service(ttl_minutes: Option<i64>) -> TokenService {
        TokenService::new(&SecretString::from(TEST_SECRET), ttl_minutes)
    }

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service(None);
        let alice = identity(Role::Seller);

        let token = tokens.issue(alice).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.identity(), alice);
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_payload_field_names() {
        let claims = Claims::new(identity(Role::Buyer), None);
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["userType"], "buyer");
        assert!(value.get("userId").is_some());
        assert!(value.get("exp").is_none());
    }

    #[test]
    fn test_wrong_secret() {
        let token = service(None).issue(identity(Role::Buyer)).unwrap();
        let other = TokenService::new(
            &SecretString::from("wrong-secret-key-for-testing-minimum-32-chars"),
            None,
        );

        assert_eq!(other.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed_token() {
        let tokens = service(None);
        assert_eq!(tokens.verify("invalid.token.here"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_ttl_sets_expiration() {
        let tokens = service(Some(30));
        let token = tokens.issue(identity(Role::Seller)).unwrap();
        let claims = tokens.verify(&token).unwrap();

        let exp = claims.exp.unwrap();
        assert_eq!(exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_expired_token() {
        let tokens = service(Some(30));
        let mut claims = Claims::new(identity(Role::Buyer), Some(Duration::minutes(30)));
        claims.exp = Some(Utc::now().timestamp() - 120);

        let token = tokens.encode_claims(&claims).unwrap();
        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_ttl_service_rejects_token_without_exp() {
        let token = service(None).issue(identity(Role::Buyer)).unwrap();
        assert!(service(Some(30)).verify(&token).is_err());
    }

    proptest! {
        #[test]
        fn prop_round_trip(raw_id in any::<u128>(), is_seller in any::<bool>()) {
            let tokens = service(None);
            let role = if is_seller { Role::Seller } else { Role::Buyer };
            let identity = Identity { user_id: Uuid::from_u128(raw_id), role };

            let token = tokens.issue(identity).unwrap();
            let claims = tokens.verify(&token).unwrap();

            prop_assert_eq!(claims.user_id, identity.user_id);
            prop_assert_eq!(claims.user_type, role);
        }

        #[test]
        fn prop_tampering_is_detected(
            raw_id in any::<u128>(),
            position in any::<prop::sample::Index>(),
            new_byte in any::<u8>(),
        ) {
            let tokens = service(None);
            let identity = Identity { user_id: Uuid::from_u128(raw_id), role: Role::Buyer };
            let token = tokens.issue(identity).unwrap();

            let mut bytes = token.into_bytes();
            let idx = position.index(bytes.len());
            prop_assume!(bytes[idx] != new_byte);
            bytes[idx] = new_byte;
            // UTF-8이 아닌 바이트는 U+FFFD로 바뀌어도 여전히 원본과 다름
            let tampered = String::from_utf8_lossy(&bytes).into_owned();

            let result = tokens.verify(&tampered);
            prop_assert!(
                matches!(result, Err(TokenError::BadSignature) | Err(TokenError::Malformed)),
                "tampered token accepted: {:?}",
                result
            );
        }
    }
}
