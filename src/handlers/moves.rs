// src/handlers/moves.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{CanSchedule, RequireRole},
    models::{
        ids::RecordId,
        moves::{Move, MoveView, ScheduleMovePayload, UpdateMovePayload},
    },
    services::session::SessionContext,
};

// GET /api/moves
#[utoipa::path(
    get,
    path = "/api/moves",
    tag = "Moves",
    responses(
        (status = 200, description = "Ordens de Serviço no escopo do usuário", body = Vec<MoveView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_moves(
    State(app_state): State<AppState>,
    session: SessionContext,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.move_service.list(&session)))
}

// POST /api/moves
#[utoipa::path(
    post,
    path = "/api/moves",
    tag = "Moves",
    request_body = ScheduleMovePayload,
    responses(
        (status = 201, description = "OS agendada com status 'A realizar'", body = Move),
        (status = 400, description = "Morador, supervisor ou secretária ausente/fora da base")
    ),
    security(("api_jwt" = []))
)]
pub async fn schedule_move(
    State(app_state): State<AppState>,
    _guard: RequireRole<CanSchedule>,
    mut session: SessionContext,
    Json(payload): Json<ScheduleMovePayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state
        .move_service
        .schedule(&mut session, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

// PATCH /api/moves/{move_id}
#[utoipa::path(
    patch,
    path = "/api/moves/{move_id}",
    tag = "Moves",
    request_body = UpdateMovePayload,
    responses(
        (status = 200, description = "OS atualizada", body = Move),
        (status = 400, description = "Metragem negativa"),
        (status = 404, description = "OS fora do escopo")
    ),
    params(
        ("move_id" = i64, Path, description = "ID da OS")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_move(
    State(app_state): State<AppState>,
    mut session: SessionContext,
    Path(move_id): Path<RecordId>,
    Json(payload): Json<UpdateMovePayload>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state
        .move_service
        .update_details(&mut session, move_id, payload.into())
        .await?;

    Ok(Json(updated))
}
