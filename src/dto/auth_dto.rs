//! DTOs de autenticación y usuarios

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::User;

/// Request de registro
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "email inválido"))]
    pub email: String,

    #[validate(length(min = 6, message = "la contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
}

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email inválido"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Request para actualizar el perfil - todos los campos opcionales
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "la contraseña debe tener al menos 6 caracteres"))]
    pub password: Option<String>,
}

/// Proyección pública de un usuario (nunca incluye el hash)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Response de registro
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Response de login (el token viaja en la cookie, no en el body)
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Response de GET /auth/me
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}
