//! Repositorio de vehículos
//!
//! Todas las consultas excluyen los registros con borrado lógico. La unicidad
//! de matrícula es parcial: el índice único solo cubre filas con
//! deleted_at IS NULL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleChanges};
use crate::utils::errors::{map_unique_violation, AppError};

pub const PLATE_CONFLICT_MESSAGE: &str = "Ya existe un vehículo con esa matrícula";

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError>;

    /// Buscar por id excluyendo eliminados
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError>;

    /// Página de vehículos no eliminados, ordenados por creación descendente
    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<Vehicle>, AppError>;

    /// Todos los vehículos no eliminados - insumo del filtrado por
    /// disponibilidad, que necesita la población completa para los totales
    async fn find_all(&self) -> Result<Vec<Vehicle>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    async fn license_plate_exists(&self, license_plate: &str) -> Result<bool, AppError>;

    /// Mezclar solo los campos presentes; `NotFound` si no existe o fue
    /// eliminado
    async fn update(&self, id: Uuid, changes: VehicleChanges) -> Result<Vehicle, AppError>;

    /// Borrado lógico. No comprueba reservas activas existentes.
    async fn soft_delete(&self, id: Uuid) -> Result<(), AppError>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, name, year, vehicle_type, engine, size, license_plate, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle.name)
        .bind(vehicle.year)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.engine)
        .bind(vehicle.size)
        .bind(vehicle.license_plate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, PLATE_CONFLICT_MESSAGE))?;

        Ok(vehicle)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE deleted_at IS NULL ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM vehicles WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn license_plate_exists(&self, license_plate: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1 AND deleted_at IS NULL)",
        )
        .bind(license_plate)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET name = $2, year = $3, vehicle_type = $4, engine = $5, size = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name.unwrap_or(current.name))
        .bind(changes.year.unwrap_or(current.year))
        .bind(changes.vehicle_type.unwrap_or(current.vehicle_type))
        .bind(changes.engine.unwrap_or(current.engine))
        .bind(changes.size.unwrap_or(current.size))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE vehicles SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        Ok(())
    }
}
