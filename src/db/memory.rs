// src/db/memory.rs

// Armazenamento em memória para os testes dos serviços.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    common::error::AppError,
    db::store::{Dataset, MovingStore},
    models::{
        ids::RecordId,
        moves::{Move, MoveDetailsUpdate, NewMove},
        residents::{NewResident, Resident},
        staff::{NewStaff, Staff, StaffDetailsUpdate},
    },
};

/// Uma sequência por tabela, como os BIGSERIAL do Postgres.
#[derive(Default)]
struct Sequences {
    staff: i64,
    residents: i64,
    moves: i64,
}

fn next_id(sequence: &mut i64) -> RecordId {
    *sequence += 1;
    RecordId(*sequence)
}

#[derive(Default)]
struct Tables {
    data: Dataset,
    sequences: Sequences,
    writes: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toda escrita falha, como um banco fora do ar.
    pub fn failing() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    /// Quantas escritas chegaram ao armazenamento.
    pub fn writes(&self) -> usize {
        self.tables.lock().unwrap().writes
    }

    pub fn snapshot(&self) -> Dataset {
        self.tables.lock().unwrap().data.clone()
    }

    fn write<T>(&self, op: impl FnOnce(&mut Tables) -> Result<T, AppError>) -> Result<T, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.writes += 1;
        if self.fail_writes {
            return Err(AppError::PersistenceFailure(sqlx::Error::PoolTimedOut));
        }
        op(&mut tables)
    }
}

fn staff_row(id: RecordId, new_staff: &NewStaff) -> Staff {
    Staff {
        id,
        name: new_staff.name.clone(),
        email: new_staff.email.clone(),
        password_hash: new_staff.password_hash.clone(),
        role: new_staff.role.as_str().to_string(),
        job_title: new_staff.job_title.clone(),
        secretary_id: new_staff.secretary_id,
        branch_name: new_staff.branch_name.clone(),
        created_at: Utc::now(),
    }
}

fn email_taken(tables: &Tables, email: &str, except: Option<RecordId>) -> bool {
    tables
        .data
        .staff
        .iter()
        .any(|s| s.email.eq_ignore_ascii_case(email) && Some(s.id) != except)
}

#[async_trait]
impl MovingStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Dataset, AppError> {
        Ok(self.snapshot())
    }

    async fn find_staff_by_id(&self, id: RecordId) -> Result<Option<Staff>, AppError> {
        Ok(self.snapshot().staff_by_id(id).cloned())
    }

    async fn find_staff_by_email(&self, email: &str) -> Result<Option<Staff>, AppError> {
        Ok(self
            .snapshot()
            .staff
            .into_iter()
            .find(|s| s.email.eq_ignore_ascii_case(email.trim())))
    }

    async fn insert_staff(&self, staff: &NewStaff) -> Result<Staff, AppError> {
        self.write(|tables| {
            if email_taken(tables, &staff.email, None) {
                return Err(AppError::EmailAlreadyExists);
            }
            let id = next_id(&mut tables.sequences.staff);
            let row = staff_row(id, staff);
            tables.data.staff.push(row.clone());
            Ok(row)
        })
    }

    async fn insert_secretary(&self, staff: &NewStaff) -> Result<Staff, AppError> {
        self.write(|tables| {
            if email_taken(tables, &staff.email, None) {
                return Err(AppError::EmailAlreadyExists);
            }
            let id = next_id(&mut tables.sequences.staff);
            let mut row = staff_row(id, staff);
            row.secretary_id = Some(id);
            tables.data.staff.push(row.clone());
            Ok(row)
        })
    }

    async fn insert_resident(&self, resident: &NewResident) -> Result<Resident, AppError> {
        self.write(|tables| {
            let id = next_id(&mut tables.sequences.residents);
            let f = &resident.fields;
            let row = Resident {
                id,
                name: f.name.clone(),
                selo: f.selo.clone(),
                contact: f.contact.clone(),
                origin_address: f.origin_address.clone(),
                origin_number: f.origin_number.clone(),
                origin_neighborhood: f.origin_neighborhood.clone(),
                dest_address: f.dest_address.clone(),
                dest_number: f.dest_number.clone(),
                dest_neighborhood: f.dest_neighborhood.clone(),
                observation: f.observation.clone(),
                move_date: f.move_date,
                move_time: f.move_time,
                secretary_id: resident.secretary_id,
                created_at: Utc::now(),
            };
            tables.data.residents.push(row.clone());
            Ok(row)
        })
    }

    async fn insert_move(&self, order: &NewMove) -> Result<Move, AppError> {
        self.write(|tables| {
            let id = next_id(&mut tables.sequences.moves);
            let row = Move {
                id,
                resident_id: order.resident_id,
                date: order.date,
                time: order.time,
                metragem: order.metragem,
                supervisor_id: order.supervisor_id,
                coordinator_id: order.coordinator_id,
                driver_id: order.driver_id,
                status: order.status,
                secretary_id: order.secretary_id,
                completion_date: None,
                completion_time: None,
                created_at: Utc::now(),
            };
            tables.data.moves.push(row.clone());
            Ok(row)
        })
    }

    async fn update_move_details(
        &self,
        move_id: RecordId,
        details: &MoveDetailsUpdate,
    ) -> Result<Move, AppError> {
        self.write(|tables| {
            let row = tables
                .data
                .moves
                .iter_mut()
                .find(|m| m.id == move_id)
                .ok_or_else(|| AppError::NotFound(format!("OS #{}", move_id)))?;
            row.metragem = details.metragem;
            row.status = details.status;
            row.completion_date = details.completion_date;
            row.completion_time = details.completion_time;
            Ok(row.clone())
        })
    }

    async fn update_staff_details(
        &self,
        staff_id: RecordId,
        details: &StaffDetailsUpdate,
    ) -> Result<Staff, AppError> {
        self.write(|tables| {
            if email_taken(tables, &details.email, Some(staff_id)) {
                return Err(AppError::EmailAlreadyExists);
            }
            let row = tables
                .data
                .staff
                .iter_mut()
                .find(|s| s.id == staff_id)
                .ok_or_else(|| AppError::NotFound(format!("Funcionário #{}", staff_id)))?;
            row.name = details.name.clone();
            row.job_title = details.job_title.clone();
            row.email = details.email.clone();
            row.role = details.role.as_str().to_string();
            Ok(row.clone())
        })
    }
}
