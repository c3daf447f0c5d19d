//! Controller de usuarios
//!
//! Registro, actualización de perfil y baja lógica. La normalización de
//! email (trim + lowercase) ocurre siempre antes del check de duplicados y
//! del insert; el índice único parcial sobre cuentas vivas es el backstop.

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{RegisterRequest, UpdateUserRequest, UserResponse};
use crate::models::user::{User, UserChanges};
use crate::repositories::UserRepository;
use crate::utils::errors::AppError;

pub struct UserController {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserController {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    pub async fn create(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        let name = request.name.trim().to_string();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;

        let user = self.users.create(name, email, password_hash).await?;

        tracing::info!("👤 Usuario {} registrado", user.id);

        Ok(user.into())
    }

    /// Verificar credenciales; cualquier fallo devuelve el mismo 401 para no
    /// filtrar qué emails existen
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim().to_lowercase();

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        Ok(user)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        request.validate()?;

        let mut changes = UserChanges::default();

        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            if self.users.email_taken_by_other(&email, user_id).await? {
                return Err(AppError::Conflict("El email ya está registrado".to_string()));
            }
            changes.email = Some(email);
        }

        if let Some(name) = request.name {
            changes.name = Some(name.trim().to_string());
        }

        if let Some(password) = request.password {
            changes.password_hash = Some(self.hash_password(&password)?);
        }

        let user = self.users.update(user_id, changes).await?;

        Ok(user.into())
    }

    pub async fn soft_delete(&self, user_id: Uuid) -> Result<(), AppError> {
        self.users.soft_delete(user_id).await?;
        tracing::info!("🗑️ Usuario {} dado de baja", user_id);
        Ok(())
    }

    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))
    }
}
