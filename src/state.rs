//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los repositorios entran como interfaces
//! explícitas, no como singletons ambientes, para poder sustituirlos en
//! los tests por implementaciones en memoria.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::repositories::{
    PgReservationRepository, PgUserRepository, PgVehicleRepository, ReservationRepository,
    UserRepository, VehicleRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub users: Arc<dyn UserRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
}

impl AppState {
    /// Estado de producción respaldado por PostgreSQL
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            config,
            users: Arc::new(PgUserRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            reservations: Arc::new(PgReservationRepository::new(pool)),
        }
    }

    /// Estado con repositorios arbitrarios (tests)
    pub fn with_repositories(
        config: EnvironmentConfig,
        users: Arc<dyn UserRepository>,
        vehicles: Arc<dyn VehicleRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            config,
            users,
            vehicles,
            reservations,
        }
    }
}
