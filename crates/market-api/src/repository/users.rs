//! Users Repository
//!
//! 사용자 관련 데이터베이스 연산을 담당합니다.

use chrono::{DateTime, Utc};
use market_core::{NewUser, Role, StoreError, User, UserSummary};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

// ================================================================================================
// Types
// ================================================================================================

/// 사용자 레코드
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRecord> for User {
    type Error = StoreError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let role = Role::parse(&record.role)
            .ok_or_else(|| StoreError::Backend(format!("unknown role in users table: {}", record.role)))?;

        Ok(User {
            id: record.id,
            username: record.username,
            password_hash: record.password_hash,
            role,
            created_at: record.created_at,
        })
    }
}

/// 사용자 요약 레코드
#[derive(Debug, Clone, FromRow)]
pub struct UserSummaryRecord {
    pub id: Uuid,
    pub username: String,
}

impl From<UserSummaryRecord> for UserSummary {
    fn from(record: UserSummaryRecord) -> Self {
        UserSummary {
            id: record.id,
            username: record.username,
        }
    }
}

// ================================================================================================
// Repository
// ================================================================================================

/// Users Repository
pub struct UserRepository;

impl UserRepository {
    /// 사용자 삽입.
    ///
    /// `users_username_key` 고유 제약이 중복 이름을 막습니다.
    pub async fn insert(pool: &PgPool, user: &NewUser) -> Result<UserRecord, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, role, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(pool)
        .await
    }

    /// 사용자 이름으로 조회
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// 역할별 사용자 목록 (사용자 이름의 바이트 순)
    ///
    /// 로케일 정렬 대신 `"C"` 콜레이션을 사용해 인메모리 저장소와 같은 순서를 냅니다.
    pub async fn list_by_role(
        pool: &PgPool,
        role: Role,
    ) -> Result<Vec<UserSummaryRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserSummaryRecord>(
            r#"
            SELECT id, username
            FROM users
            WHERE role = $1
            ORDER BY username COLLATE "C"
            "#,
        )
        .bind(role.as_str())
        .fetch_all(pool)
        .await
    }
}
