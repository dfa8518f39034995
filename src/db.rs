pub mod store;
pub use store::{Dataset, MovingStore, SharedStore};
pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod resident_repo;
pub use resident_repo::ResidentRepository;
pub mod move_repo;
pub use move_repo::MoveRepository;
pub mod pg_store;
pub use pg_store::PgStore;

#[cfg(test)]
pub mod memory;
