// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    middleware::auth::AuthenticatedStaff,
    models::roles::RoleKey,
    services::scope::Actor,
};

/// 1. O Trait que define quais cargos passam pelo guardião
pub trait RoleGuard: Send + Sync + 'static {
    fn allows(role: RoleKey) -> bool;
    fn action() -> &'static str;
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleGuard,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedStaff(staff) = AuthenticatedStaff::from_request_parts(parts, state).await?;

        // Cargo ausente ou desconhecido é InvalidActor, não Forbidden
        let role = Actor::from(&staff).role_key()?;

        if !T::allows(role) {
            tracing::warn!("{} ({}) tentou {}", staff.name, role.as_str(), T::action());
            return Err(AppError::Forbidden(format!(
                "o cargo {} não pode {}",
                role.label(),
                T::action()
            )));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS GUARDIÕES (TIPOS)
// ---

pub struct CanSchedule;
impl RoleGuard for CanSchedule {
    fn allows(role: RoleKey) -> bool { role.can_schedule() }
    fn action() -> &'static str { "agendar mudanças" }
}

pub struct ManageStaff;
impl RoleGuard for ManageStaff {
    fn allows(role: RoleKey) -> bool { role.can_manage_staff() }
    fn action() -> &'static str { "gerenciar funcionários" }
}

pub struct AdminOnly;
impl RoleGuard for AdminOnly {
    fn allows(role: RoleKey) -> bool { role.can_manage_secretaries() }
    fn action() -> &'static str { "gerenciar secretarias" }
}
