use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::reservation_dto::{
    CreateReservationRequest, CreateReservationResponse, ListReservationsQuery,
    ListReservationsResponse, ReservationItem, UpdateReservationRequest,
};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reservation_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_reservation))
        .route("/", get(list_reservations))
        .route("/:id", patch(update_reservation))
        .route("/:id/cancel", patch(cancel_reservation))
        .route("/:id/complete", patch(complete_reservation))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<CreateReservationResponse>), AppError> {
    let controller = ReservationController::new(state.reservations.clone(), state.vehicles.clone());
    let response = controller.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_reservations(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<Json<ListReservationsResponse>, AppError> {
    let controller = ReservationController::new(state.reservations.clone(), state.vehicles.clone());
    let response = controller.find_by_user(user.user_id, query).await?;
    Ok(Json(response))
}

async fn update_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReservationRequest>,
) -> Result<Json<ReservationItem>, AppError> {
    let controller = ReservationController::new(state.reservations.clone(), state.vehicles.clone());
    let response = controller.update(user.user_id, id, request).await?;
    Ok(Json(response))
}

async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationItem>, AppError> {
    let controller = ReservationController::new(state.reservations.clone(), state.vehicles.clone());
    let response = controller.cancel(user.user_id, id).await?;
    Ok(Json(response))
}

async fn complete_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationItem>, AppError> {
    let controller = ReservationController::new(state.reservations.clone(), state.vehicles.clone());
    let response = controller.complete(user.user_id, id).await?;
    Ok(Json(response))
}
