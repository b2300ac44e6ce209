//! User service - account persistence and credential checks.
//!
//! HTTP handlers only see the [`UserService`] trait, so the PostgreSQL
//! implementation can be swapped for an in-memory double in tests.
//!
//! Business conflicts (duplicate registration, bad login) are returned as
//! [`RegisterOutcome`] / [`LoginOutcome`] variants; everything else that goes
//! wrong is an [`AppError`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::user::{
        LoginOutcome, LoginRequest, LoginResponse, RegisterOutcome, RegisterRequest,
        UpdateUserRequest, User, UserResponse, normalize_email,
    },
    services::{password, token::TokenService},
};

/// Role granted to every newly registered user.
pub const DEFAULT_ROLE: &str = "user";

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, password_salt, created_at, updated_at";

/// Operations the user controller delegates to.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn login_user(&self, request: LoginRequest) -> Result<LoginOutcome, AppError>;

    async fn register_user(&self, request: RegisterRequest) -> Result<RegisterOutcome, AppError>;

    async fn get_all_users(&self) -> Result<Vec<UserResponse>, AppError>;

    async fn get_user(&self, id: &str) -> Result<UserResponse, AppError>;

    async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError>;

    async fn delete_user(&self, id: &str) -> Result<(), AppError>;

    async fn get_user_roles(&self, id: &str) -> Result<Vec<String>, AppError>;
}

/// Parse a path `_id` into a user UUID.
pub fn parse_user_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidRequest(format!("invalid user id: {id}")))
}

/// [`UserService`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgUserService {
    pool: DbPool,
    tokens: TokenService,
}

impl PgUserService {
    pub fn new(pool: DbPool, tokens: TokenService) -> Self {
        Self { pool, tokens }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserService for PgUserService {
    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    async fn login_user(&self, request: LoginRequest) -> Result<LoginOutcome, AppError> {
        request.validate()?;

        let Some(user) = self.find_by_email(&normalize_email(&request.email)).await? else {
            return Ok(LoginOutcome::InvalidCredentials);
        };

        if !password::verify_password(&request.password, &user.password_salt, &user.password_hash)
        {
            return Ok(LoginOutcome::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(LoginOutcome::LoggedIn(LoginResponse {
            token,
            user: user.into(),
        }))
    }

    /// Create a user and grant the default role in one transaction.
    ///
    /// `ON CONFLICT DO NOTHING` makes concurrent registrations of the same
    /// email resolve to exactly one `Created` and the rest `AlreadyExists`.
    async fn register_user(&self, request: RegisterRequest) -> Result<RegisterOutcome, AppError> {
        request.validate()?;

        let salt = password::generate_salt();
        let hash = password::hash_password(&request.password, &salt);

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, password_salt)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(request.first_name.trim())
        .bind(request.last_name.trim())
        .bind(normalize_email(&request.email))
        .bind(&hash)
        .bind(&salt)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user) = inserted else {
            tx.rollback().await?;
            return Ok(RegisterOutcome::AlreadyExists);
        };

        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(user.id)
            .bind(DEFAULT_ROLE)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(user_id = %user.id, "user registered");

        Ok(RegisterOutcome::Created(user.into()))
    }

    /// All users, newest first.
    async fn get_all_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    async fn get_user(&self, id: &str) -> Result<UserResponse, AppError> {
        let user_id = parse_user_id(id)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UserNotFound)?;

        Ok(user.into())
    }

    /// Partial update. A new password gets a new salt.
    async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let user_id = parse_user_id(id)?;
        request.validate()?;

        let credentials = request.password.as_deref().map(|new_password| {
            let salt = password::generate_salt();
            (password::hash_password(new_password, &salt), salt)
        });
        let (hash, salt) = credentials.unzip();

        let updated = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                password_hash = COALESCE($5, password_hash),
                password_salt = COALESCE($6, password_salt),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(request.first_name.as_deref().map(str::trim))
        .bind(request.last_name.as_deref().map(str::trim))
        .bind(request.email.as_deref().map(normalize_email))
        .bind(hash)
        .bind(salt)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::EmailTaken,
            other => AppError::Database(other),
        })?
        .ok_or(AppError::UserNotFound)?;

        Ok(updated.into())
    }

    /// Remove a user; roles go with it via `ON DELETE CASCADE`.
    async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let user_id = parse_user_id(id)?;

        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::UserNotFound);
        }

        tracing::info!(%user_id, "user deleted");
        Ok(())
    }

    async fn get_user_roles(&self, id: &str) -> Result<Vec<String>, AppError> {
        let user_id = parse_user_id(id)?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        if !exists {
            return Err(AppError::UserNotFound);
        }

        let roles: Vec<String> =
            sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = $1 ORDER BY role")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(roles)
    }
}
