pub mod auth_controller;
pub mod reservation_controller;
pub mod user_controller;
pub mod vehicle_controller;
