// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Erro único da aplicação. Toda falha chega ao usuário como mensagem;
// nenhuma é engolida e nenhuma é repetida automaticamente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Regra de negócio violada (ex: OS sem secretária, supervisor ausente)
    #[error("{0}")]
    ValidationFailure(String),

    // Usuário autenticado com cargo ausente/desconhecido ou sem secretária
    #[error("Usuário inválido: {0}")]
    InvalidActor(String),

    #[error("Cargo desconhecido: {0}")]
    UnknownRole(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    #[error("{0} não encontrado(a)")]
    NotFound(String),

    // Qualquer falha do banco ao inserir/atualizar/consultar
    #[error("Erro de banco de dados: {0}")]
    PersistenceFailure(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::ValidationFailure(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownRole(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidActor(_) | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::EmailAlreadyExists => "Este e-mail já está em uso.".to_string(),
            AppError::InvalidCredentials => "Credenciais inválidas.".to_string(),
            AppError::InvalidToken => "Token de autenticação inválido ou ausente.".to_string(),
            e @ (AppError::ValidationFailure(_)
                | AppError::InvalidActor(_)
                | AppError::UnknownRole(_)
                | AppError::Forbidden(_)
                | AppError::NotFound(_)) => e.to_string(),

            // Banco, bcrypt, JWT e afins viram 500; o detalhe só vai para o log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(AppError::ValidationFailure("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::UnknownRole("Chefe".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidActor("sem cargo".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("OS #9".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn persistence_failures_are_internal() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::PersistenceFailure(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
