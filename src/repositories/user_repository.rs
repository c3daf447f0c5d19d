//! Repositorio de usuarios
//!
//! Los usuarios nunca se borran físicamente; el borrado lógico vía deleted_at
//! los excluye de todas las consultas. El email es único entre cuentas vivas
//! (índice único parcial).

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{User, UserChanges};
use crate::utils::errors::{map_unique_violation, AppError};

pub const EMAIL_CONFLICT_MESSAGE: &str = "El email ya está registrado";

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insertar un usuario; email duplicado entre no eliminados → `Conflict`
    async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<User, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Comprobar si otro usuario vivo ya usa este email
    async fn email_taken_by_other(&self, email: &str, user_id: Uuid) -> Result<bool, AppError>;

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, AppError>;

    async fn soft_delete(&self, id: Uuid) -> Result<(), AppError>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, EMAIL_CONFLICT_MESSAGE))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn email_taken_by_other(&self, email: &str, user_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2 AND deleted_at IS NULL)",
        )
        .bind(email)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, email = $3, password_hash = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name.unwrap_or(current.name))
        .bind(changes.email.unwrap_or(current.email))
        .bind(changes.password_hash.unwrap_or(current.password_hash))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, EMAIL_CONFLICT_MESSAGE))?;

        Ok(user)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        Ok(())
    }
}
