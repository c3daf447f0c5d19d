//! DTOs de reservas
//!
//! Requests y responses del módulo de reservas. Los nombres en el wire van
//! en camelCase, los structs internos en snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::reservation::{Reservation, ReservationStatus};

/// Request para crear una reserva
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Request para actualizar una reserva activa (solo la fecha de fin)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    pub end_date: Option<DateTime<Utc>>,
}

/// Filtros de listado de reservas
#[derive(Debug, Deserialize)]
pub struct ListReservationsQuery {
    pub status: Option<ReservationStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Response de creación - sin timestamps, igual que el resto de proyecciones
/// de alta
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub status: ReservationStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<Reservation> for CreateReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            status: r.status,
            start_date: r.start_date,
            end_date: r.end_date,
        }
    }
}

/// Proyección completa de una reserva para listados y detalle
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub status: ReservationStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationItem {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            status: r.status,
            start_date: r.start_date,
            end_date: r.end_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Página de reservas con totales calculados sobre el filtro completo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReservationsResponse {
    pub data: Vec<ReservationItem>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}
