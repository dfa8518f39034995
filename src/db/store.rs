// src/db/store.rs

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::{
    common::error::AppError,
    models::{
        ids::RecordId,
        moves::{Move, MoveDetailsUpdate, NewMove},
        residents::{NewResident, Resident},
        staff::{NewStaff, Staff, StaffDetailsUpdate},
    },
};

/// Fotografia completa do banco, lida a cada interação.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub staff: Vec<Staff>,
    pub residents: Vec<Resident>,
    pub moves: Vec<Move>,
}

impl Dataset {
    pub fn staff_by_id(&self, id: RecordId) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    pub fn resident_by_id(&self, id: RecordId) -> Option<&Resident> {
        self.residents.iter().find(|r| r.id == id)
    }

    pub fn move_by_id(&self, id: RecordId) -> Option<&Move> {
        self.moves.iter().find(|m| m.id == id)
    }
}

/// Tudo o que o núcleo precisa do armazenamento.
/// Falhas do banco voltam como `AppError::PersistenceFailure`.
#[async_trait]
pub trait MovingStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Dataset, AppError>;

    async fn find_staff_by_id(&self, id: RecordId) -> Result<Option<Staff>, AppError>;

    /// Busca sem diferenciar maiúsculas/minúsculas.
    async fn find_staff_by_email(&self, email: &str) -> Result<Option<Staff>, AppError>;

    async fn insert_staff(&self, staff: &NewStaff) -> Result<Staff, AppError>;

    /// Insere uma secretária já vinculada a si mesma (secretaryId = id).
    async fn insert_secretary(&self, staff: &NewStaff) -> Result<Staff, AppError>;

    async fn insert_resident(&self, resident: &NewResident) -> Result<Resident, AppError>;

    async fn insert_move(&self, order: &NewMove) -> Result<Move, AppError>;

    async fn update_move_details(
        &self,
        move_id: RecordId,
        details: &MoveDetailsUpdate,
    ) -> Result<Move, AppError>;

    async fn update_staff_details(
        &self,
        staff_id: RecordId,
        details: &StaffDetailsUpdate,
    ) -> Result<Staff, AppError>;
}

pub type SharedStore = Arc<dyn MovingStore>;
