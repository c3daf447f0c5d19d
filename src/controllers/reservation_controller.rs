//! Controller del ciclo de vida de reservas
//!
//! Orquesta create/list/cancel/complete/update aplicando las reglas de
//! transición de estado y los invariantes de una-reserva-activa por usuario
//! y por vehículo. Los checks de conflicto aquí son consultivos (mensajes
//! tempranos y específicos); la red de seguridad real son los índices únicos
//! parciales del store, que resuelven cualquier carrera entre creates
//! concurrentes rechazando el segundo insert.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::reservation_dto::{
    CreateReservationRequest, CreateReservationResponse, ListReservationsQuery,
    ListReservationsResponse, ReservationItem, UpdateReservationRequest,
};
use crate::models::reservation::ReservationStatus;
use crate::repositories::{ReservationRepository, VehicleRepository};
use crate::utils::errors::AppError;

pub struct ReservationController {
    reservations: Arc<dyn ReservationRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl ReservationController {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        vehicles: Arc<dyn VehicleRepository>,
    ) -> Self {
        Self {
            reservations,
            vehicles,
        }
    }

    /// Crear una reserva para el usuario autenticado.
    ///
    /// Precondiciones en orden: el vehículo existe y no está eliminado
    /// (NotFound), el vehículo no tiene reserva activa (Conflict), el usuario
    /// no tiene reserva activa (Conflict).
    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateReservationRequest,
    ) -> Result<CreateReservationResponse, AppError> {
        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if self
            .reservations
            .find_active_by_vehicle(request.vehicle_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "El vehículo ya está reservado".to_string(),
            ));
        }

        if self
            .reservations
            .find_active_by_user(user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "El usuario ya tiene una reserva activa".to_string(),
            ));
        }

        let reservation = self
            .reservations
            .create(user_id, request.vehicle_id, request.start_date, request.end_date)
            .await?;

        tracing::info!(
            "📝 Reserva {} creada: usuario {} → vehículo {}",
            reservation.id,
            user_id,
            reservation.vehicle_id
        );

        Ok(reservation.into())
    }

    /// Listar las reservas del usuario, paginadas y ordenadas por creación
    /// descendente. El total ignora la paginación.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        query: ListReservationsQuery,
    ) -> Result<ListReservationsResponse, AppError> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).max(1);
        let offset = (page - 1) * limit;

        let reservations = self
            .reservations
            .find_by_user(user_id, query.status, offset, limit)
            .await?;
        let total = self.reservations.count_by_user(user_id, query.status).await?;

        Ok(ListReservationsResponse {
            data: reservations.into_iter().map(ReservationItem::from).collect(),
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        })
    }

    /// Cancelar una reserva activa que todavía no comenzó
    pub async fn cancel(
        &self,
        user_id: Uuid,
        reservation_id: Uuid,
    ) -> Result<ReservationItem, AppError> {
        let reservation = self
            .reservations
            .find_by_id_and_user(reservation_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if reservation.status != ReservationStatus::Active {
            return Err(AppError::InvalidState(
                "Solo las reservas activas pueden cancelarse".to_string(),
            ));
        }

        if reservation.start_date <= Utc::now() {
            return Err(AppError::InvalidState(
                "No es posible cancelar una reserva que ya comenzó".to_string(),
            ));
        }

        let updated = self
            .reservations
            .set_status(reservation_id, ReservationStatus::Cancelled)
            .await?;

        tracing::info!("🚫 Reserva {} cancelada", updated.id);

        Ok(updated.into())
    }

    /// Finalizar una reserva activa; fija end_date al instante actual
    /// pisando cualquier valor previo
    pub async fn complete(
        &self,
        user_id: Uuid,
        reservation_id: Uuid,
    ) -> Result<ReservationItem, AppError> {
        let reservation = self
            .reservations
            .find_by_id_and_user(reservation_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if reservation.status != ReservationStatus::Active {
            return Err(AppError::InvalidState(
                "Solo las reservas activas pueden finalizarse".to_string(),
            ));
        }

        let updated = self.reservations.complete(reservation_id, Utc::now()).await?;

        tracing::info!(
            "✅ Reserva {} finalizada, vehículo {} liberado",
            updated.id,
            updated.vehicle_id
        );

        Ok(updated.into())
    }

    /// Enmienda opcional: actualizar end_date mientras la reserva siga activa
    pub async fn update(
        &self,
        user_id: Uuid,
        reservation_id: Uuid,
        request: UpdateReservationRequest,
    ) -> Result<ReservationItem, AppError> {
        let reservation = self
            .reservations
            .find_by_id_and_user(reservation_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if reservation.status != ReservationStatus::Active {
            return Err(AppError::InvalidState(
                "Solo las reservas activas pueden actualizarse".to_string(),
            ));
        }

        let updated = match request.end_date {
            Some(end_date) => self.reservations.set_end_date(reservation_id, end_date).await?,
            None => reservation,
        };

        Ok(updated.into())
    }
}

/// totalPages = ceil(total / limit)
pub fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}
