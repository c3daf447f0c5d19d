pub mod reservation_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use reservation_repository::{PgReservationRepository, ReservationRepository, CONFLICT_MESSAGE};
pub use user_repository::{PgUserRepository, UserRepository, EMAIL_CONFLICT_MESSAGE};
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository, PLATE_CONFLICT_MESSAGE};
