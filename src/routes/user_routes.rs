use axum::{
    extract::{Extension, State},
    http::StatusCode,
    middleware,
    routing::{delete, patch},
    Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::auth_dto::{UpdateUserRequest, UserResponse};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", patch(update_profile))
        .route("/", delete(delete_account))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = UserController::new(state.users.clone(), state.config.bcrypt_cost);
    let response = controller.update(user.user_id, request).await?;
    Ok(Json(response))
}

async fn delete_account(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<StatusCode, AppError> {
    let controller = UserController::new(state.users.clone(), state.config.bcrypt_cost);
    controller.soft_delete(user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
