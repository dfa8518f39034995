// src/db/move_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{
        ids::RecordId,
        moves::{Move, MoveDetailsUpdate, NewMove},
    },
};

// Ordens de Serviço (tabela 'moves')
#[derive(Clone)]
pub struct MoveRepository {
    pool: PgPool,
}

impl MoveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Move>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let moves = sqlx::query_as::<_, Move>("SELECT * FROM moves ORDER BY date, time, id")
            .fetch_all(executor)
            .await?;

        Ok(moves)
    }

    pub async fn create(&self, order: &NewMove) -> Result<Move, AppError> {
        let created = sqlx::query_as::<_, Move>(
            r#"
            INSERT INTO moves (
                resident_id, date, time, metragem,
                supervisor_id, coordinator_id, driver_id,
                status, secretary_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(order.resident_id)
        .bind(order.date)
        .bind(order.time)
        .bind(order.metragem)
        .bind(order.supervisor_id)
        .bind(order.coordinator_id)
        .bind(order.driver_id)
        .bind(order.status)
        .bind(order.secretary_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    // Último a gravar vence; não há controle de concorrência
    pub async fn update_details(
        &self,
        id: RecordId,
        details: &MoveDetailsUpdate,
    ) -> Result<Move, AppError> {
        sqlx::query_as::<_, Move>(
            r#"
            UPDATE moves
            SET metragem = $1, status = $2, completion_date = $3, completion_time = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(details.metragem)
        .bind(details.status)
        .bind(details.completion_date)
        .bind(details.completion_time)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("OS #{}", id)))
    }
}
