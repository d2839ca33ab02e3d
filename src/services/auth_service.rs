use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use sqlx::SqlitePool;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_superuser, created_at, updated_at";

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: SqlitePool, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<MessageResponse> {
        let username = request.username.trim();
        let email = request.email.trim();

        // 校验输入
        if username.is_empty() {
            return Err(AppError::field_validation("username", "用户名不能为空"));
        }
        if username.chars().count() > 150 {
            return Err(AppError::field_validation(
                "username",
                "用户名不能超过150个字符",
            ));
        }
        validate_email(email)?;

        // 两次输入的密码必须一致, 确认密码不会被保存
        if request.password != request.password2 {
            return Err(AppError::field_validation(
                "password",
                "两次输入的密码不一致",
            ));
        }
        validate_password(&request.password)?;

        // 用户名与邮箱大小写不敏感唯一
        let existing = sqlx::query("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::field_validation("username", "用户名已存在"));
        }

        let existing = sqlx::query("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::field_validation("email", "邮箱已被注册"));
        }

        // 密码只保存单向哈希
        let password_hash = hash_password(&request.password)?;

        sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
            .bind(username)
            .bind(email)
            .bind(&password_hash)
            .execute(&self.pool)
            .await?;

        log::info!("New user registered: {username}");

        Ok(MessageResponse {
            message: "注册成功".to_string(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenPairResponse> {
        let user = self.find_by_username(&request.username).await?;

        // 用户不存在与密码错误对外表现一致
        let user = user.ok_or_else(|| AppError::AuthError("用户名或密码错误".to_string()))?;

        let is_valid = verify_password(&request.password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::AuthError("用户名或密码错误".to_string()));
        }

        let access =
            self.jwt_service
                .generate_access_token(user.id, &user.username, user.is_superuser)?;
        let refresh =
            self.jwt_service
                .generate_refresh_token(user.id, &user.username, user.is_superuser)?;

        Ok(TokenPairResponse { access, refresh })
    }

    pub async fn refresh(&self, request: RefreshRequest) -> AppResult<AccessTokenResponse> {
        let claims = self.jwt_service.verify_refresh_token(&request.refresh)?;
        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("无效的刷新令牌".to_string()))?;

        // 确认用户仍然存在, 并以当前库中的身份签发新令牌
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::AuthError("用户不存在".to_string()))?;

        let access =
            self.jwt_service
                .generate_access_token(user.id, &user.username, user.is_superuser)?;

        Ok(AccessTokenResponse { access })
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
