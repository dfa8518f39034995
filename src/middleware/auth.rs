// src/middleware/auth.rs

use axum::{
    body::Body,
    extract::{FromRef, FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{
    common::error::AppError,
    config::AppState,
    db::SharedStore,
    models::staff::Staff,
    services::session::SessionContext,
};

// Valida o Bearer token e anexa o funcionário à requisição
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::InvalidToken)?;

    let staff = app_state.auth_service.validate_token(bearer.token()).await?;
    tracing::debug!("Requisição autenticada de {} ({})", staff.name, staff.role);

    request.extensions_mut().insert(AuthenticatedStaff(staff));
    Ok(next.run(request).await)
}

// Extrator para obter o funcionário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedStaff(pub Staff);

impl<S> FromRequestParts<S> for AuthenticatedStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedStaff>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

// A sessão (escopo + dados visíveis) é montada a cada requisição
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
    SharedStore: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedStaff(staff) = AuthenticatedStaff::from_request_parts(parts, state).await?;
        let store = SharedStore::from_ref(state);

        SessionContext::for_staff(store.as_ref(), &staff).await
    }
}
