// src/handlers/auth.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedStaff,
    models::{
        auth::{AuthResponse, LoginPayload, MeResponse},
        staff::StaffProfile,
    },
    services::scope::{resolve_scope, Actor},
};

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário autenticado", body = MeResponse),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    AuthenticatedStaff(staff): AuthenticatedStaff,
) -> Result<Json<MeResponse>, AppError> {
    let scope = resolve_scope(&Actor::from(&staff))?;

    Ok(Json(MeResponse {
        profile: StaffProfile::from(staff),
        scope_secretary_id: scope.secretary_id(),
    }))
}
