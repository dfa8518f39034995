// src/handlers/staff.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{ManageStaff, RequireRole},
    models::{
        ids::RecordId,
        staff::{CreateStaffPayload, StaffProfile, UpdateStaffPayload},
    },
    services::session::SessionContext,
};

// GET /api/staff
#[utoipa::path(
    get,
    path = "/api/staff",
    tag = "Staff",
    responses(
        (status = 200, description = "Funcionários no escopo do usuário", body = Vec<StaffProfile>),
        (status = 403, description = "Cargo sem acesso")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_staff(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManageStaff>,
    session: SessionContext,
) -> Result<impl IntoResponse, AppError> {
    let staff = app_state.staff_service.list(&session)?;
    let profiles: Vec<StaffProfile> = staff.iter().cloned().map(StaffProfile::from).collect();

    Ok(Json(profiles))
}

// POST /api/staff
#[utoipa::path(
    post,
    path = "/api/staff",
    tag = "Staff",
    request_body = CreateStaffPayload,
    responses(
        (status = 201, description = "Funcionário cadastrado", body = StaffProfile),
        (status = 400, description = "Cargo desconhecido ou secretária não informada"),
        (status = 409, description = "E-mail já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_staff(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManageStaff>,
    mut session: SessionContext,
    Json(payload): Json<CreateStaffPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = app_state.staff_service.create(&mut session, payload).await?;

    Ok((StatusCode::CREATED, Json(StaffProfile::from(created))))
}

// PATCH /api/staff/{staff_id}
#[utoipa::path(
    patch,
    path = "/api/staff/{staff_id}",
    tag = "Staff",
    request_body = UpdateStaffPayload,
    responses(
        (status = 200, description = "Funcionário atualizado", body = StaffProfile),
        (status = 403, description = "Somente o Administrador concede Admin/Secretária"),
        (status = 404, description = "Funcionário fora do escopo")
    ),
    params(
        ("staff_id" = i64, Path, description = "ID do Funcionário")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_staff(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManageStaff>,
    mut session: SessionContext,
    Path(staff_id): Path<RecordId>,
    Json(payload): Json<UpdateStaffPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let updated = app_state
        .staff_service
        .update(&mut session, staff_id, payload)
        .await?;

    Ok(Json(StaffProfile::from(updated)))
}
