//! Controller de vehículos
//!
//! CRUD de inventario más el resolver de disponibilidad: un vehículo está
//! disponible si no aparece en el conjunto de reservas en estado bloqueante
//! (ACTIVE). La disponibilidad es derivada, nunca se persiste.

use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::reservation_controller::total_pages;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, ListVehiclesQuery, ListVehiclesResponse, UpdateVehicleRequest,
    VehicleItem,
};
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleChanges};
use crate::repositories::{ReservationRepository, VehicleRepository};
use crate::utils::errors::AppError;

pub struct VehicleController {
    vehicles: Arc<dyn VehicleRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl VehicleController {
    pub fn new(
        vehicles: Arc<dyn VehicleRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            vehicles,
            reservations,
        }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<VehicleItem, AppError> {
        request.validate()?;

        // La matrícula se normaliza antes del check y del insert
        let license_plate = request.license_plate.trim().to_uppercase();

        if self.vehicles.license_plate_exists(&license_plate).await? {
            return Err(AppError::Conflict(
                "Ya existe un vehículo con esa matrícula".to_string(),
            ));
        }

        let vehicle = self
            .vehicles
            .create(NewVehicle {
                name: request.name.trim().to_string(),
                year: request.year,
                vehicle_type: request.vehicle_type,
                engine: request.engine,
                size: request.size,
                license_plate,
            })
            .await?;

        tracing::info!("🚗 Vehículo {} registrado ({})", vehicle.id, vehicle.license_plate);

        // Un vehículo recién creado no tiene reservas
        Ok(VehicleItem::from_vehicle(vehicle, true))
    }

    /// Listado paginado decorado con disponibilidad.
    ///
    /// Sin filtro de disponibilidad se pagina en el store y la resolución se
    /// hace solo sobre la página. Con filtro, el filtrado es posterior al
    /// cálculo, así que se resuelve sobre la población completa para que
    /// total y totalPages reflejen el conjunto filtrado y no la página
    /// actual.
    pub async fn find_all(&self, query: ListVehiclesQuery) -> Result<ListVehiclesResponse, AppError> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).max(1);
        let offset = (page - 1) * limit;

        match query.available {
            None => {
                let vehicles = self.vehicles.find_page(offset, limit).await?;
                let total = self.vehicles.count().await?;
                let reserved = self.resolve_reserved(&vehicles).await?;

                Ok(ListVehiclesResponse {
                    data: decorate(vehicles, &reserved),
                    total,
                    page,
                    limit,
                    total_pages: total_pages(total, limit),
                })
            }
            Some(want_available) => {
                let vehicles = self.vehicles.find_all().await?;
                let reserved = self.resolve_reserved(&vehicles).await?;

                let filtered: Vec<Vehicle> = vehicles
                    .into_iter()
                    .filter(|v| !reserved.contains(&v.id) == want_available)
                    .collect();

                let total = filtered.len() as i64;
                let start = (offset as usize).min(filtered.len());
                let end = (start + limit as usize).min(filtered.len());
                let data = decorate(filtered[start..end].to_vec(), &reserved);

                Ok(ListVehiclesResponse {
                    data,
                    total,
                    page,
                    limit,
                    total_pages: total_pages(total, limit),
                })
            }
        }
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<VehicleItem, AppError> {
        request.validate()?;

        let vehicle = self
            .vehicles
            .update(
                id,
                VehicleChanges {
                    name: request.name.map(|n| n.trim().to_string()),
                    year: request.year,
                    vehicle_type: request.vehicle_type,
                    engine: request.engine,
                    size: request.size,
                },
            )
            .await?;

        let reserved = self
            .reservations
            .reserved_vehicle_ids(&[vehicle.id])
            .await?;
        let available = !reserved.contains(&vehicle.id);

        Ok(VehicleItem::from_vehicle(vehicle, available))
    }

    /// Borrado lógico del vehículo. No bloquea aunque exista una reserva
    /// activa; la reserva conserva su referencia histórica por id.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        self.vehicles.soft_delete(id).await?;
        tracing::info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }

    async fn resolve_reserved(&self, vehicles: &[Vehicle]) -> Result<HashSet<Uuid>, AppError> {
        if vehicles.is_empty() {
            return Ok(HashSet::new());
        }
        let ids: Vec<Uuid> = vehicles.iter().map(|v| v.id).collect();
        self.reservations.reserved_vehicle_ids(&ids).await
    }
}

fn decorate(vehicles: Vec<Vehicle>, reserved: &HashSet<Uuid>) -> Vec<VehicleItem> {
    vehicles
        .into_iter()
        .map(|v| {
            let available = !reserved.contains(&v.id);
            VehicleItem::from_vehicle(v, available)
        })
        .collect()
}
