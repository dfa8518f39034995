// src/handlers/residents.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{CanSchedule, RequireRole},
    models::residents::{CreateResidentPayload, Resident},
    services::session::SessionContext,
};

// GET /api/residents
#[utoipa::path(
    get,
    path = "/api/residents",
    tag = "Residents",
    responses(
        (status = 200, description = "Moradores no escopo do usuário", body = Vec<Resident>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_residents(
    State(app_state): State<AppState>,
    session: SessionContext,
) -> Result<impl IntoResponse, AppError> {
    let residents = app_state.resident_service.list(&session).to_vec();
    Ok(Json(residents))
}

// POST /api/residents
#[utoipa::path(
    post,
    path = "/api/residents",
    tag = "Residents",
    request_body = CreateResidentPayload,
    responses(
        (status = 201, description = "Morador cadastrado", body = Resident),
        (status = 400, description = "Nome ausente ou secretária não informada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_resident(
    State(app_state): State<AppState>,
    _guard: RequireRole<CanSchedule>,
    mut session: SessionContext,
    Json(payload): Json<CreateResidentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let resident = app_state
        .resident_service
        .create(&mut session, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(resident)))
}
