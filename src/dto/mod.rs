pub mod auth_dto;
pub mod reservation_dto;
pub mod vehicle_dto;
