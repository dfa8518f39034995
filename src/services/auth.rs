// src/services/auth.rs

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::{error::AppError, password::verify_password},
    db::SharedStore,
    models::{auth::Claims, ids::RecordId, staff::Staff},
};

#[derive(Clone)]
pub struct AuthService {
    store: SharedStore,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(store: SharedStore, jwt_secret: String) -> Self {
        Self { store, jwt_secret }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let Some(staff) = self.store.find_staff_by_email(email.trim()).await? else {
            tracing::warn!("Tentativa de login com e-mail desconhecido: {}", email.trim());
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password, &staff.password_hash).await? {
            tracing::warn!("Senha incorreta para {}", staff.email);
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("🔑 {} entrou no sistema", staff.name);
        self.create_token(staff.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<Staff, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        // Funcionário removido depois da emissão do token
        self.store
            .find_staff_by_id(RecordId(token_data.claims.sub))
            .await?
            .ok_or(AppError::InvalidToken)
    }

    pub fn create_token(&self, staff_id: RecordId) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: staff_id.0,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
