//! Controller de autenticación
//!
//! Registro delegado al controller de usuarios y login que emite el JWT
//! que viaja en la cookie HttpOnly. La mecánica de cookie vive en las
//! routes; aquí solo credenciales y tokens.

use crate::controllers::user_controller::UserController;
use crate::dto::auth_dto::{LoginRequest, RegisterRequest, RegisterResponse, UserResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use validator::Validate;

pub struct AuthController {
    users: UserController,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: UserController::new(state.users.clone(), state.config.bcrypt_cost),
            jwt: JwtConfig::from(&state.config),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AppError> {
        let user = self.users.create(request).await?;

        Ok(RegisterResponse {
            message: "Usuario registrado con éxito".to_string(),
            user,
        })
    }

    /// Verificar credenciales y emitir el token de sesión
    pub async fn login(&self, request: LoginRequest) -> Result<(UserResponse, String), AppError> {
        request.validate()?;

        let user = self
            .users
            .verify_credentials(&request.email, &request.password)
            .await?;

        let token = generate_token(user.id, &user.email, &user.name, &self.jwt)?;

        tracing::info!("🔑 Login de usuario {}", user.id);

        Ok((user.into(), token))
    }
}
