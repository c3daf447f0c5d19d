//! API REST de reservas de vehículos
//!
//! Cuentas de usuario, inventario de vehículos y reservas con fechas que los
//! vinculan, con autenticación JWT por cookie. El núcleo es el ciclo de vida
//! de las reservas: como máximo una reserva ACTIVE por usuario y por
//! vehículo, transiciones unidireccionales (ACTIVE → CANCELLED/COMPLETED) y
//! disponibilidad derivada del estado de las reservas.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
