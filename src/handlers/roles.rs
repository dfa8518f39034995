// src/handlers/roles.rs

use axum::Json;

use crate::models::roles::{role_table, RoleEntry};

// GET /api/roles
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Roles",
    responses(
        (status = 200, description = "Tabela fixa de cargos", body = Vec<RoleEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_roles() -> Json<Vec<RoleEntry>> {
    Json(role_table())
}
