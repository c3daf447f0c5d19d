pub mod reservation;
pub mod user;
pub mod vehicle;
