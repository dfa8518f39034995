pub mod auth;
pub mod move_service;
pub mod resident_service;
pub mod scope;
pub mod seed;
pub mod session;
pub mod staff_service;
