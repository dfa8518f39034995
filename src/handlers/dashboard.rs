// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        dashboard::{DashboardSummary, MoveSearchQuery},
        moves::MoveView,
    },
    services::session::SessionContext,
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contagem de OS por status", body = DashboardSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    session: SessionContext,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.move_service.summary(&session)))
}

// GET /api/dashboard/moves
#[utoipa::path(
    get,
    path = "/api/dashboard/moves",
    tag = "Dashboard",
    params(MoveSearchQuery),
    responses(
        (status = 200, description = "OS filtradas", body = Vec<MoveView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn search_moves(
    State(app_state): State<AppState>,
    session: SessionContext,
    Query(query): Query<MoveSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.move_service.search(&session, &query)))
}
