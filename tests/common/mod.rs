//! Soporte compartido de los tests de integración
//!
//! Repositorios en memoria que implementan las mismas interfaces que los
//! respaldados por PostgreSQL, incluidos los invariantes de unicidad que en
//! producción garantizan los índices únicos parciales: una reserva ACTIVE
//! por usuario y por vehículo, email único entre cuentas vivas y matrícula
//! única entre vehículos no eliminados.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use vehicle_reservations::config::EnvironmentConfig;
use vehicle_reservations::models::reservation::{Reservation, ReservationStatus};
use vehicle_reservations::models::user::{User, UserChanges};
use vehicle_reservations::models::vehicle::{NewVehicle, Vehicle, VehicleChanges};
use vehicle_reservations::repositories::{
    ReservationRepository, UserRepository, VehicleRepository, CONFLICT_MESSAGE,
    EMAIL_CONFLICT_MESSAGE, PLATE_CONFLICT_MESSAGE,
};
use vehicle_reservations::utils::errors::AppError;
use vehicle_reservations::AppState;

/// Configuración fija para tests (sin leer variables de entorno)
pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiration: 3600,
        cors_origins: vec!["http://localhost:4200".to_string()],
        // Costo mínimo de bcrypt para que los tests no tarden
        bcrypt_cost: 4,
    }
}

/// Estado con los tres repositorios en memoria
pub fn test_state() -> AppState {
    AppState::with_repositories(
        test_config(),
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryVehicleRepository::new()),
        Arc::new(InMemoryReservationRepository::new()),
    )
}

// ============================================================
// Usuarios
// ============================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        // Mismo contrato que el índice único parcial sobre email
        if users
            .iter()
            .any(|u| u.deleted_at.is_none() && u.email == email)
        {
            return Err(AppError::Conflict(EMAIL_CONFLICT_MESSAGE.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }

    async fn email_taken_by_other(&self, email: &str, user_id: Uuid) -> Result<bool, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .any(|u| u.email == email && u.id != user_id && u.deleted_at.is_none()))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        if let Some(email) = &changes.email {
            if users
                .iter()
                .any(|u| u.email == *email && u.id != id && u.deleted_at.is_none())
            {
                return Err(AppError::Conflict(EMAIL_CONFLICT_MESSAGE.to_string()));
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;
        user.deleted_at = Some(Utc::now());
        user.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================
// Vehículos
// ============================================================

#[derive(Default)]
pub struct InMemoryVehicleRepository {
    vehicles: Mutex<Vec<Vehicle>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insertar un vehículo ya construido (atajo para armar escenarios)
    pub fn seed(&self, vehicle: Vehicle) {
        self.vehicles.lock().unwrap().push(vehicle);
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let mut vehicles = self.vehicles.lock().unwrap();

        if vehicles
            .iter()
            .any(|v| v.deleted_at.is_none() && v.license_plate == vehicle.license_plate)
        {
            return Err(AppError::Conflict(PLATE_CONFLICT_MESSAGE.to_string()));
        }

        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            name: vehicle.name,
            year: vehicle.year,
            vehicle_type: vehicle.vehicle_type,
            engine: vehicle.engine,
            size: vehicle.size,
            license_plate: vehicle.license_plate,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicles = self.vehicles.lock().unwrap();
        Ok(vehicles
            .iter()
            .find(|v| v.id == id && v.deleted_at.is_none())
            .cloned())
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = self.vehicles.lock().unwrap();
        // Inserción secuencial: recorrer al revés equivale a created_at DESC
        Ok(vehicles
            .iter()
            .rev()
            .filter(|v| v.deleted_at.is_none())
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = self.vehicles.lock().unwrap();
        Ok(vehicles
            .iter()
            .rev()
            .filter(|v| v.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let vehicles = self.vehicles.lock().unwrap();
        Ok(vehicles.iter().filter(|v| v.deleted_at.is_none()).count() as i64)
    }

    async fn license_plate_exists(&self, license_plate: &str) -> Result<bool, AppError> {
        let vehicles = self.vehicles.lock().unwrap();
        Ok(vehicles
            .iter()
            .any(|v| v.license_plate == license_plate && v.deleted_at.is_none()))
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> Result<Vehicle, AppError> {
        let mut vehicles = self.vehicles.lock().unwrap();
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id && v.deleted_at.is_none())
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if let Some(name) = changes.name {
            vehicle.name = name;
        }
        if let Some(year) = changes.year {
            vehicle.year = year;
        }
        if let Some(vehicle_type) = changes.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(engine) = changes.engine {
            vehicle.engine = engine;
        }
        if let Some(size) = changes.size {
            vehicle.size = size;
        }
        vehicle.updated_at = Utc::now();
        Ok(vehicle.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut vehicles = self.vehicles.lock().unwrap();
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id && v.deleted_at.is_none())
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;
        vehicle.deleted_at = Some(Utc::now());
        vehicle.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================
// Reservas
// ============================================================

#[derive(Default)]
pub struct InMemoryReservationRepository {
    reservations: Mutex<Vec<Reservation>>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Reservation, AppError> {
        let mut reservations = self.reservations.lock().unwrap();

        // Mismo contrato que los índices únicos parciales sobre status ACTIVE
        let conflicts = reservations.iter().any(|r| {
            r.status == ReservationStatus::Active
                && (r.user_id == user_id || r.vehicle_id == vehicle_id)
        });
        if conflicts {
            return Err(AppError::Conflict(CONFLICT_MESSAGE.to_string()));
        }

        let now = Utc::now();
        let reservation = Reservation {
            id: Uuid::new_v4(),
            user_id,
            vehicle_id,
            status: ReservationStatus::Active,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        };
        reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id_and_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Reservation>, AppError> {
        let reservations = self.reservations.lock().unwrap();
        Ok(reservations
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn find_active_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<Reservation>, AppError> {
        let reservations = self.reservations.lock().unwrap();
        Ok(reservations
            .iter()
            .find(|r| r.vehicle_id == vehicle_id && r.status == ReservationStatus::Active)
            .cloned())
    }

    async fn find_active_by_user(&self, user_id: Uuid) -> Result<Option<Reservation>, AppError> {
        let reservations = self.reservations.lock().unwrap();
        Ok(reservations
            .iter()
            .find(|r| r.user_id == user_id && r.status == ReservationStatus::Active)
            .cloned())
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        status: Option<ReservationStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Reservation>, AppError> {
        let reservations = self.reservations.lock().unwrap();
        Ok(reservations
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .filter(|r| status.map_or(true, |s| r.status == s))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_by_user(
        &self,
        user_id: Uuid,
        status: Option<ReservationStatus>,
    ) -> Result<i64, AppError> {
        let reservations = self.reservations.lock().unwrap();
        Ok(reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| status.map_or(true, |s| r.status == s))
            .count() as i64)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<Reservation, AppError> {
        let mut reservations = self.reservations.lock().unwrap();
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;
        reservation.status = status;
        reservation.updated_at = Utc::now();
        Ok(reservation.clone())
    }

    async fn complete(&self, id: Uuid, end_date: DateTime<Utc>) -> Result<Reservation, AppError> {
        let mut reservations = self.reservations.lock().unwrap();
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;
        reservation.status = ReservationStatus::Completed;
        reservation.end_date = Some(end_date);
        reservation.updated_at = Utc::now();
        Ok(reservation.clone())
    }

    async fn set_end_date(
        &self,
        id: Uuid,
        end_date: DateTime<Utc>,
    ) -> Result<Reservation, AppError> {
        let mut reservations = self.reservations.lock().unwrap();
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;
        reservation.end_date = Some(end_date);
        reservation.updated_at = Utc::now();
        Ok(reservation.clone())
    }

    async fn reserved_vehicle_ids(&self, vehicle_ids: &[Uuid]) -> Result<HashSet<Uuid>, AppError> {
        let reservations = self.reservations.lock().unwrap();
        Ok(reservations
            .iter()
            .filter(|r| {
                r.status == ReservationStatus::Active && vehicle_ids.contains(&r.vehicle_id)
            })
            .map(|r| r.vehicle_id)
            .collect())
    }
}
