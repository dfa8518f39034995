pub mod auth;
pub mod dashboard;
pub mod ids;
pub mod moves;
pub mod residents;
pub mod roles;
pub mod staff;
