//! Repositorio de reservas
//!
//! El store de reservas es el dueño exclusivo de los registros y el árbitro
//! final de los invariantes de unicidad: los índices únicos parciales sobre
//! (user_id) y (vehicle_id) restringidos a status ACTIVE garantizan que como
//! máximo una reserva activa exista por usuario y por vehículo, incluso
//! cuando dos creates concurrentes pasan los pre-checks del controller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::reservation::{Reservation, ReservationStatus};
use crate::utils::errors::{map_unique_violation, AppError};

pub const CONFLICT_MESSAGE: &str = "La reserva entra en conflicto con una reserva activa";

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insertar una reserva ACTIVE. Una violación de unicidad (carrera con
    /// otro create) se traduce a `Conflict`.
    async fn create(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Reservation, AppError>;

    async fn find_by_id_and_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Reservation>, AppError>;

    async fn find_active_by_vehicle(&self, vehicle_id: Uuid)
        -> Result<Option<Reservation>, AppError>;

    async fn find_active_by_user(&self, user_id: Uuid) -> Result<Option<Reservation>, AppError>;

    /// Reservas del usuario ordenadas por creación descendente
    async fn find_by_user(
        &self,
        user_id: Uuid,
        status: Option<ReservationStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Reservation>, AppError>;

    /// Total que matchea el filtro, ignorando la paginación
    async fn count_by_user(
        &self,
        user_id: Uuid,
        status: Option<ReservationStatus>,
    ) -> Result<i64, AppError>;

    async fn set_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<Reservation, AppError>;

    /// Marcar COMPLETED fijando end_date (pisa cualquier valor previo)
    async fn complete(&self, id: Uuid, end_date: DateTime<Utc>) -> Result<Reservation, AppError>;

    async fn set_end_date(
        &self,
        id: Uuid,
        end_date: DateTime<Utc>,
    ) -> Result<Reservation, AppError>;

    /// IDs de vehículos con reserva en estado bloqueante (ACTIVE) dentro del
    /// conjunto dado - insumo del resolver de disponibilidad
    async fn reserved_vehicle_ids(&self, vehicle_ids: &[Uuid]) -> Result<HashSet<Uuid>, AppError>;
}

pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn create(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (id, user_id, vehicle_id, status, start_date, end_date, created_at, updated_at)
            VALUES ($1, $2, $3, 'ACTIVE', $4, $5, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(vehicle_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, CONFLICT_MESSAGE))?;

        Ok(reservation)
    }

    async fn find_by_id_and_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    async fn find_active_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE vehicle_id = $1 AND status = 'ACTIVE'",
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    async fn find_active_by_user(&self, user_id: Uuid) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE user_id = $1 AND status = 'ACTIVE'",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        status: Option<ReservationStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Reservation>, AppError> {
        let reservations = match status {
            Some(status) => {
                sqlx::query_as::<_, Reservation>(
                    r#"
                    SELECT * FROM reservations
                    WHERE user_id = $1 AND status = $2
                    ORDER BY created_at DESC
                    OFFSET $3 LIMIT $4
                    "#,
                )
                .bind(user_id)
                .bind(status)
                .bind(offset)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Reservation>(
                    r#"
                    SELECT * FROM reservations
                    WHERE user_id = $1
                    ORDER BY created_at DESC
                    OFFSET $2 LIMIT $3
                    "#,
                )
                .bind(user_id)
                .bind(offset)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(reservations)
    }

    async fn count_by_user(
        &self,
        user_id: Uuid,
        status: Option<ReservationStatus>,
    ) -> Result<i64, AppError> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM reservations WHERE user_id = $1 AND status = $2",
                )
                .bind(user_id)
                .bind(status)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(reservation)
    }

    async fn complete(&self, id: Uuid, end_date: DateTime<Utc>) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'COMPLETED', end_date = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(end_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(reservation)
    }

    async fn set_end_date(
        &self,
        id: Uuid,
        end_date: DateTime<Utc>,
    ) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET end_date = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(end_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(reservation)
    }

    async fn reserved_vehicle_ids(
        &self,
        vehicle_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, AppError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT vehicle_id FROM reservations WHERE status = 'ACTIVE' AND vehicle_id = ANY($1)",
        )
        .bind(vehicle_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }
}
