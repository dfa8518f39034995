// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Staff ---
        handlers::staff::list_staff,
        handlers::staff::create_staff,
        handlers::staff::update_staff,

        // --- Secretaries ---
        handlers::secretaries::list_secretaries,
        handlers::secretaries::create_secretary,

        // --- Residents ---
        handlers::residents::list_residents,
        handlers::residents::create_resident,

        // --- Moves ---
        handlers::moves::list_moves,
        handlers::moves::schedule_move,
        handlers::moves::update_move,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::search_moves,

        // --- Roles ---
        handlers::roles::list_roles,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,

            // --- Staff ---
            models::ids::RecordId,
            models::roles::RoleKey,
            models::roles::RoleEntry,
            models::staff::Staff,
            models::staff::StaffProfile,
            models::staff::SecretaryOption,
            models::staff::CreateStaffPayload,
            models::staff::UpdateStaffPayload,
            models::staff::CreateSecretaryPayload,

            // --- Residents ---
            models::residents::Resident,
            models::residents::CreateResidentPayload,

            // --- Moves ---
            models::moves::MoveStatus,
            models::moves::Move,
            models::moves::MoveView,
            models::moves::ScheduleMovePayload,
            models::moves::UpdateMovePayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Dados do Usuário e Escopo"),
        (name = "Staff", description = "Gestão de Funcionários"),
        (name = "Secretaries", description = "Secretarias / Bases (somente Admin)"),
        (name = "Residents", description = "Cadastro de Moradores"),
        (name = "Moves", description = "Ordens de Serviço de Mudança"),
        (name = "Dashboard", description = "Painel e Busca de Mudanças"),
        (name = "Roles", description = "Tabela de Cargos e Permissões")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented_with_bearer_auth() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/auth/login",
            "/api/users/me",
            "/api/staff",
            "/api/staff/{staff_id}",
            "/api/secretaries",
            "/api/residents",
            "/api/moves",
            "/api/moves/{move_id}",
            "/api/dashboard/summary",
            "/api/dashboard/moves",
            "/api/roles",
        ] {
            assert!(doc.paths.paths.contains_key(path), "rota sem documentação: {}", path);
        }

        let schemes = doc.components.expect("components").security_schemes;
        assert!(schemes.contains_key("api_jwt"));
    }
}
