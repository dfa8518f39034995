pub mod auth;
pub mod dashboard;
pub mod moves;
pub mod residents;
pub mod roles;
pub mod secretaries;
pub mod staff;
