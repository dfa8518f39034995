// src/models/moves.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::ids::RecordId;
use crate::services::scope::Scoped;

// --- Enums ---

// Fluxo A realizar -> Realizando -> Concluído. Qualquer valor pode ser
// atribuído a qualquer momento por quem pode editar a OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "move_status")]
pub enum MoveStatus {
    #[serde(rename = "A realizar")]
    #[sqlx(rename = "A realizar")]
    Pending,

    #[serde(rename = "Realizando")]
    #[sqlx(rename = "Realizando")]
    InProgress,

    #[serde(rename = "Concluído")]
    #[sqlx(rename = "Concluído")]
    Done,
}

impl MoveStatus {
    pub const ALL: [MoveStatus; 3] = [MoveStatus::Pending, MoveStatus::InProgress, MoveStatus::Done];

    pub fn label(self) -> &'static str {
        match self {
            MoveStatus::Pending => "A realizar",
            MoveStatus::InProgress => "Realizando",
            MoveStatus::Done => "Concluído",
        }
    }
}

// --- Ordem de Serviço ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    #[schema(example = 1024)]
    pub id: RecordId,

    pub resident_id: RecordId,

    #[schema(example = "2025-03-10")]
    pub date: NaiveDate,
    #[schema(example = "08:00:00")]
    pub time: NaiveTime,

    // Volume em m³
    #[schema(example = "15.00")]
    pub metragem: Decimal,

    pub supervisor_id: RecordId,
    pub coordinator_id: Option<RecordId>,
    pub driver_id: Option<RecordId>,

    pub status: MoveStatus,

    pub secretary_id: RecordId,

    pub completion_date: Option<NaiveDate>,
    pub completion_time: Option<NaiveTime>,

    pub created_at: DateTime<Utc>,
}

impl Scoped for Move {
    fn field(&self, key: &str) -> Option<RecordId> {
        match key {
            "id" => Some(self.id),
            "secretaryId" => Some(self.secretary_id),
            "residentId" => Some(self.resident_id),
            "supervisorId" => Some(self.supervisor_id),
            "coordinatorId" => self.coordinator_id,
            "driverId" => self.driver_id,
            _ => None,
        }
    }
}

// OS + nomes resolvidos, como aparece na tabela de OS
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveView {
    #[serde(flatten)]
    pub order: Move,

    #[schema(example = "João Silva")]
    pub resident_name: String,

    #[schema(example = "Maria Supervisora")]
    pub supervisor_name: String,
}

// O que o repositório grava
#[derive(Debug, Clone)]
pub struct NewMove {
    pub resident_id: RecordId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub metragem: Decimal,
    pub supervisor_id: RecordId,
    pub coordinator_id: Option<RecordId>,
    pub driver_id: Option<RecordId>,
    pub status: MoveStatus,
    pub secretary_id: RecordId,
}

// Campos editáveis da OS
#[derive(Debug, Clone)]
pub struct MoveDetailsUpdate {
    pub metragem: Decimal,
    pub status: MoveStatus,
    pub completion_date: Option<NaiveDate>,
    pub completion_time: Option<NaiveTime>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMovePayload {
    pub resident_id: Option<RecordId>,

    #[schema(example = "2025-03-10")]
    pub date: NaiveDate,
    #[schema(example = "08:00:00")]
    pub time: NaiveTime,

    // Obrigatório; Option só para a mensagem de erro ser a do negócio
    pub supervisor_id: Option<RecordId>,
    pub coordinator_id: Option<RecordId>,
    pub driver_id: Option<RecordId>,

    // Obrigatório apenas para o Admin
    pub secretary_id: Option<RecordId>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovePayload {
    #[schema(example = "18.50")]
    pub metragem: Decimal,

    pub status: MoveStatus,

    pub completion_date: Option<NaiveDate>,
    pub completion_time: Option<NaiveTime>,
}

impl From<UpdateMovePayload> for MoveDetailsUpdate {
    fn from(payload: UpdateMovePayload) -> Self {
        Self {
            metragem: payload.metragem,
            status: payload.status,
            completion_date: payload.completion_date,
            completion_time: payload.completion_time,
        }
    }
}
