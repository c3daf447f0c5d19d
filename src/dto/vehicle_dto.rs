//! DTOs de vehículos

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

lazy_static! {
    static ref YEAR_RE: Regex = Regex::new(r"^\d{4}$").unwrap();
    static ref SIZE_RE: Regex = Regex::new(r"^\d+$").unwrap();
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(regex(path = "YEAR_RE", message = "year debe ser un año válido en formato YYYY"))]
    pub year: String,

    #[validate(length(min = 1, max = 50))]
    #[serde(rename = "type")]
    pub vehicle_type: String,

    #[validate(length(min = 1, max = 20))]
    pub engine: String,

    #[validate(regex(path = "SIZE_RE", message = "size debe ser un número válido"))]
    pub size: String,

    #[validate(length(min = 1, max = 10))]
    pub license_plate: String,
}

/// Request para actualizar un vehículo existente - todos los campos opcionales
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(regex(path = "YEAR_RE", message = "year debe ser un año válido en formato YYYY"))]
    pub year: Option<String>,

    #[validate(length(min = 1, max = 50))]
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub engine: Option<String>,

    #[validate(regex(path = "SIZE_RE", message = "size debe ser un número válido"))]
    pub size: Option<String>,
}

/// Filtros de listado de vehículos
#[derive(Debug, Deserialize)]
pub struct ListVehiclesQuery {
    pub available: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Proyección de vehículo con la disponibilidad derivada del estado de las
/// reservas (no es un campo persistido)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleItem {
    pub id: Uuid,
    pub name: String,
    pub year: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub engine: String,
    pub size: String,
    pub license_plate: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl VehicleItem {
    pub fn from_vehicle(vehicle: Vehicle, available: bool) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            year: vehicle.year,
            vehicle_type: vehicle.vehicle_type,
            engine: vehicle.engine,
            size: vehicle.size,
            license_plate: vehicle.license_plate,
            available,
            created_at: vehicle.created_at,
        }
    }
}

/// Página de vehículos
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVehiclesResponse {
    pub data: Vec<VehicleItem>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}
