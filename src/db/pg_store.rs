// src/db/pg_store.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        store::{Dataset, MovingStore},
        MoveRepository, ResidentRepository, StaffRepository,
    },
    models::{
        ids::RecordId,
        moves::{Move, MoveDetailsUpdate, NewMove},
        residents::{NewResident, Resident},
        staff::{NewStaff, Staff, StaffDetailsUpdate},
    },
};

// Implementação PostgreSQL do armazenamento, montada sobre os repositórios
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    staff_repo: StaffRepository,
    resident_repo: ResidentRepository,
    move_repo: MoveRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            staff_repo: StaffRepository::new(pool.clone()),
            resident_repo: ResidentRepository::new(pool.clone()),
            move_repo: MoveRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl MovingStore for PgStore {
    async fn fetch_all(&self) -> Result<Dataset, AppError> {
        // Snapshot consistente das três tabelas
        let mut tx = self.pool.begin().await?;

        let staff = self.staff_repo.list_all(&mut *tx).await?;
        let residents = self.resident_repo.list_all(&mut *tx).await?;
        let moves = self.move_repo.list_all(&mut *tx).await?;

        tx.commit().await?;

        Ok(Dataset { staff, residents, moves })
    }

    async fn find_staff_by_id(&self, id: RecordId) -> Result<Option<Staff>, AppError> {
        self.staff_repo.find_by_id(id).await
    }

    async fn find_staff_by_email(&self, email: &str) -> Result<Option<Staff>, AppError> {
        self.staff_repo.find_by_email(email).await
    }

    async fn insert_staff(&self, staff: &NewStaff) -> Result<Staff, AppError> {
        self.staff_repo.create(&self.pool, staff).await
    }

    async fn insert_secretary(&self, staff: &NewStaff) -> Result<Staff, AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        // Se o auto-vínculo falhar, a secretária criada é desfeita (rollback no drop).
        let mut tx = self.pool.begin().await?;

        let created = self.staff_repo.create(&mut *tx, staff).await?;
        let linked = self.staff_repo.link_to_self(&mut *tx, created.id).await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        Ok(linked)
    }

    async fn insert_resident(&self, resident: &NewResident) -> Result<Resident, AppError> {
        self.resident_repo.create(resident).await
    }

    async fn insert_move(&self, order: &NewMove) -> Result<Move, AppError> {
        self.move_repo.create(order).await
    }

    async fn update_move_details(
        &self,
        move_id: RecordId,
        details: &MoveDetailsUpdate,
    ) -> Result<Move, AppError> {
        self.move_repo.update_details(move_id, details).await
    }

    async fn update_staff_details(
        &self,
        staff_id: RecordId,
        details: &StaffDetailsUpdate,
    ) -> Result<Staff, AppError> {
        self.staff_repo.update_details(staff_id, details).await
    }
}
