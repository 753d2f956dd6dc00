use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::IdentityRepository;

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<UserId, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return RepositoryError::Conflict;
                }
            }
            unavailable(e)
        })?;

        Ok(UserId(row.try_get("id").map_err(unavailable)?))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, pass_hash
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(User {
            id: UserId(row.try_get("id").map_err(unavailable)?),
            email: row.try_get("email").map_err(unavailable)?,
            password_hash: row.try_get("pass_hash").map_err(unavailable)?,
        })
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT
                EXISTS (SELECT 1 FROM users WHERE id = $1) AS user_exists,
                EXISTS (SELECT 1 FROM admins WHERE user_id = $1) AS is_admin
            "#,
        )
        .bind(user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(unavailable)?;

        let user_exists: bool = row.try_get("user_exists").map_err(unavailable)?;
        if !user_exists {
            return Err(RepositoryError::NotFound);
        }

        row.try_get("is_admin").map_err(unavailable)
    }

    async fn find_application(&self, app_id: AppId) -> Result<Application, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(app_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Application {
            id: AppId(row.try_get("id").map_err(unavailable)?),
            name: row.try_get("name").map_err(unavailable)?,
            secret: row.try_get("secret").map_err(unavailable)?,
        })
    }
}
