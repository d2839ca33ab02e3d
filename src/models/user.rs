use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// 数据库中的用户记录
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_superuser: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// 经过认证的请求主体
///
/// 由认证中间件根据访问令牌构建并写入请求扩展,
/// 服务层只通过它判定可见范围。
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    pub is_superuser: bool,
}

impl Principal {
    /// 记录所有者或超级用户可以访问
    pub fn can_access(&self, owner_id: i64) -> bool {
        self.is_superuser || self.user_id == owner_id
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "Passw0rd123")]
    pub password: String,
    /// 确认密码, 仅用于校验, 不会被保存
    #[schema(example = "Passw0rd123")]
    pub password2: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Passw0rd123")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_access() {
        let owner = Principal {
            user_id: 1,
            username: "alice".to_string(),
            is_superuser: false,
        };
        let stranger = Principal {
            user_id: 2,
            username: "bob".to_string(),
            is_superuser: false,
        };
        let admin = Principal {
            user_id: 3,
            username: "admin".to_string(),
            is_superuser: true,
        };

        assert!(owner.can_access(1));
        assert!(!stranger.can_access(1));
        assert!(admin.can_access(1));
    }
}
