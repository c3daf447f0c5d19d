//! Modelo de Reservation
//!
//! Este módulo contiene el struct Reservation y el enum de estado.
//! Mapea exactamente a la tabla reservations y al ENUM reservation_status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la reserva - mapea al ENUM reservation_status
///
/// ACTIVE es el único estado que bloquea nuevas reservas sobre el mismo
/// vehículo o usuario. Las transiciones son unidireccionales:
/// ACTIVE → CANCELLED y ACTIVE → COMPLETED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "reservation_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Active,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Active => "ACTIVE",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Completed => "COMPLETED",
        }
    }
}

/// Reservation principal - mapea exactamente a la tabla reservations
///
/// Las referencias a usuario y vehículo son débiles (solo IDs); el store de
/// reservas es el único dueño de estos registros y nunca los borra, los
/// estados terminales se conservan como historial.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub status: ReservationStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&ReservationStatus::Active).unwrap();
        assert_eq!(json, "\"ACTIVE\"");

        let parsed: ReservationStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Cancelled);
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(ReservationStatus::Completed.as_str(), "COMPLETED");
    }
}
