// src/db/staff_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{
        ids::RecordId,
        staff::{NewStaff, Staff, StaffDetailsUpdate},
    },
};

const STAFF_COLUMNS: &str =
    "id, name, email, password_hash, role, job_title, secretary_id, branch_name, created_at";

// Repositório de funcionários: todas as interações com a tabela 'staff'
#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Staff>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {} FROM staff ORDER BY id",
            STAFF_COLUMNS
        ))
        .fetch_all(executor)
        .await?;

        Ok(staff)
    }

    pub async fn find_by_id(&self, id: RecordId) -> Result<Option<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {} FROM staff WHERE id = $1",
            STAFF_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(staff)
    }

    // Login é case-insensitive no e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {} FROM staff WHERE LOWER(email) = LOWER($1) ORDER BY id LIMIT 1",
            STAFF_COLUMNS
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn create<'e, E>(&self, executor: E, new_staff: &NewStaff) -> Result<Staff, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Staff>(&format!(
            r#"
            INSERT INTO staff (name, email, password_hash, role, job_title, secretary_id, branch_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            STAFF_COLUMNS
        ))
        .bind(&new_staff.name)
        .bind(&new_staff.email)
        .bind(&new_staff.password_hash)
        .bind(new_staff.role.as_str())
        .bind(&new_staff.job_title)
        .bind(new_staff.secretary_id)
        .bind(&new_staff.branch_name)
        .fetch_one(executor)
        .await
        .map_err(map_unique_email)
    }

    // Secretária: o secretaryId aponta para o próprio id
    pub async fn link_to_self<'e, E>(&self, executor: E, id: RecordId) -> Result<Staff, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "UPDATE staff SET secretary_id = id WHERE id = $1 RETURNING {}",
            STAFF_COLUMNS
        ))
        .bind(id)
        .fetch_one(executor)
        .await?;

        Ok(staff)
    }

    pub async fn update_details(
        &self,
        id: RecordId,
        details: &StaffDetailsUpdate,
    ) -> Result<Staff, AppError> {
        sqlx::query_as::<_, Staff>(&format!(
            r#"
            UPDATE staff
            SET name = $1, job_title = $2, email = $3, role = $4
            WHERE id = $5
            RETURNING {}
            "#,
            STAFF_COLUMNS
        ))
        .bind(&details.name)
        .bind(&details.job_title)
        .bind(&details.email)
        .bind(details.role.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_email)?
        .ok_or_else(|| AppError::NotFound(format!("Funcionário #{}", id)))
    }
}

// Converte erro de violação de chave única em um erro mais amigável
fn map_unique_email(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::EmailAlreadyExists;
        }
    }
    e.into()
}
