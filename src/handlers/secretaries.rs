// src/handlers/secretaries.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AdminOnly, RequireRole},
    models::staff::{CreateSecretaryPayload, SecretaryOption, StaffProfile},
    services::session::SessionContext,
};

// GET /api/secretaries
#[utoipa::path(
    get,
    path = "/api/secretaries",
    tag = "Secretaries",
    responses(
        (status = 200, description = "Secretarias (bases) cadastradas", body = Vec<SecretaryOption>),
        (status = 403, description = "Somente o Administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_secretaries(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    session: SessionContext,
) -> Result<impl IntoResponse, AppError> {
    let options = app_state.staff_service.list_secretaries(&session)?;
    Ok(Json(options))
}

// POST /api/secretaries
#[utoipa::path(
    post,
    path = "/api/secretaries",
    tag = "Secretaries",
    request_body = CreateSecretaryPayload,
    responses(
        (status = 201, description = "Secretaria criada, com login gerado", body = StaffProfile),
        (status = 409, description = "Já existe uma secretaria com este login")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_secretary(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    mut session: SessionContext,
    Json(payload): Json<CreateSecretaryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = app_state
        .staff_service
        .create_secretary(&mut session, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(StaffProfile::from(created))))
}
