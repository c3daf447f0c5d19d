use axum::{
    extract::{Extension, State},
    http::{header, StatusCode},
    middleware,
    response::AppendHeaders,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse, UserResponse,
};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{build_auth_cookie, build_logout_cookie, JwtConfig};

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let protected = Router::new()
        .route("/me", get(me))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let controller = AuthController::new(&state);
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<
    (
        AppendHeaders<[(header::HeaderName, String); 1]>,
        Json<LoginResponse>,
    ),
    AppError,
> {
    let controller = AuthController::new(&state);
    let (user, token) = controller.login(request).await?;

    let cookie = build_auth_cookie(&token, &JwtConfig::from(&state.config));

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse {
            message: "Login correcto".to_string(),
            user,
        }),
    ))
}

async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<MeResponse> {
    Json(MeResponse {
        user: UserResponse {
            id: user.user_id,
            name: user.name,
            email: user.email,
        },
    })
}

async fn logout() -> (
    AppendHeaders<[(header::HeaderName, String); 1]>,
    Json<serde_json::Value>,
) {
    (
        AppendHeaders([(header::SET_COOKIE, build_logout_cookie())]),
        Json(json!({ "message": "Sesión cerrada" })),
    )
}
