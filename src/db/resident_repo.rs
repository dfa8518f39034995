// src/db/resident_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::residents::{NewResident, Resident},
};

#[derive(Clone)]
pub struct ResidentRepository {
    pool: PgPool,
}

impl ResidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Resident>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let residents = sqlx::query_as::<_, Resident>("SELECT * FROM residents ORDER BY id")
            .fetch_all(executor)
            .await?;

        Ok(residents)
    }

    pub async fn create(&self, resident: &NewResident) -> Result<Resident, AppError> {
        let fields = &resident.fields;

        let created = sqlx::query_as::<_, Resident>(
            r#"
            INSERT INTO residents (
                name, selo, contact,
                origin_address, origin_number, origin_neighborhood,
                dest_address, dest_number, dest_neighborhood,
                observation, move_date, move_time, secretary_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.selo)
        .bind(&fields.contact)
        .bind(&fields.origin_address)
        .bind(&fields.origin_number)
        .bind(&fields.origin_neighborhood)
        .bind(&fields.dest_address)
        .bind(&fields.dest_number)
        .bind(&fields.dest_neighborhood)
        .bind(&fields.observation)
        .bind(fields.move_date)
        .bind(fields.move_time)
        .bind(resident.secretary_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
