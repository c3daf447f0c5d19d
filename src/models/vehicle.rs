//! Modelo de Vehicle
//!
//! Mapea exactamente a la tabla vehicles. El borrado es lógico: deleted_at
//! marca el registro como eliminado y lo excluye de las consultas normales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal
///
/// La unicidad de la matrícula es parcial: solo aplica entre registros
/// no eliminados, un vehículo borrado puede compartir matrícula con uno vivo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub year: String,
    pub vehicle_type: String,
    pub engine: String,
    pub size: String,
    pub license_plate: String,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para crear un vehículo (la matrícula ya viene normalizada)
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub year: String,
    pub vehicle_type: String,
    pub engine: String,
    pub size: String,
    pub license_plate: String,
}

/// Cambios parciales sobre un vehículo - solo se aplican los campos presentes
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub name: Option<String>,
    pub year: Option<String>,
    pub vehicle_type: Option<String>,
    pub engine: Option<String>,
    pub size: Option<String>,
}
