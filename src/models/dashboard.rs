// src/models/dashboard.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::moves::MoveStatus;

// Os cards do topo do painel
#[derive(Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub to_do: usize,       // A realizar
    pub in_progress: usize, // Realizando
    pub done: usize,        // Concluído
}

// Filtros de "Buscar Mudanças"
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MoveSearchQuery {
    /// Status exato; ausente = "Todos"
    pub status: Option<MoveStatus>,
    /// Data exata da mudança (AAAA-MM-DD)
    pub date: Option<NaiveDate>,
    /// Trecho do nome do cliente (sem diferenciar maiúsculas)
    pub client_name: Option<String>,
}
