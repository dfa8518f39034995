// src/models/staff.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{ids::RecordId, roles::RoleKey};
use crate::services::scope::Scoped;

// Funcionário (inclui Admin e Secretárias) como vem do banco
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: RecordId,

    #[schema(example = "Carlos Motorista")]
    pub name: String,

    #[schema(example = "carlos@telemim.com")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    // Texto cru da coluna; validado ao virar Actor
    #[schema(example = "DRIVER")]
    pub role: String,

    #[schema(example = "Motorista")]
    pub job_title: String,

    // Secretária dona do registro. Para secretárias aponta para o próprio id.
    pub secretary_id: Option<RecordId>,

    #[schema(example = "Matriz")]
    pub branch_name: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Staff {
    pub fn role_key(&self) -> Option<RoleKey> {
        RoleKey::from_key(&self.role)
    }

    pub fn has_role(&self, role: RoleKey) -> bool {
        self.role_key() == Some(role)
    }

    /// Nome usado nos seletores de secretária: a base, ou o nome quando não há base.
    pub fn display_label(&self) -> &str {
        self.branch_name
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or(&self.name)
    }
}

impl Scoped for Staff {
    fn field(&self, key: &str) -> Option<RecordId> {
        match key {
            "id" => Some(self.id),
            "secretaryId" => self.secretary_id,
            _ => None,
        }
    }
}

// Funcionário + rótulo do cargo, para as telas
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    #[serde(flatten)]
    pub staff: Staff,

    #[schema(example = "Motorista")]
    pub role_label: Option<String>,
}

impl From<Staff> for StaffProfile {
    fn from(staff: Staff) -> Self {
        let role_label = staff.role_key().map(|r| r.label().to_string());
        Self { staff, role_label }
    }
}

// Secretária como opção de vínculo ("Vincular à Secretária")
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretaryOption {
    pub id: RecordId,
    #[schema(example = "Matriz")]
    pub label: String,
    pub email: String,
}

impl From<&Staff> for SecretaryOption {
    fn from(staff: &Staff) -> Self {
        Self {
            id: staff.id,
            label: staff.display_label().to_string(),
            email: staff.email.clone(),
        }
    }
}

// O que o repositório grava. A senha já chega com hash.
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: RoleKey,
    pub job_title: String,
    pub secretary_id: Option<RecordId>,
    pub branch_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StaffDetailsUpdate {
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub role: RoleKey,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffPayload {
    #[validate(length(min = 1, message = "Nome obrigatório"))]
    #[schema(example = "Paulo Ajudante")]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "paulo@telemim.com")]
    pub email: String,

    // Sem senha, vale a senha padrão configurada
    pub password: Option<String>,

    // Rótulo do cargo, como aparece no seletor
    #[schema(example = "Ajudante")]
    pub role: String,

    // Só o Admin escolhe; a Secretária vincula a si mesma
    pub secretary_id: Option<RecordId>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffPayload {
    #[validate(length(min = 1, message = "Nome obrigatório"))]
    pub name: String,

    #[validate(length(min = 1, message = "Cargo obrigatório"))]
    #[schema(example = "Motorista Sênior")]
    pub job_title: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[schema(example = "Motorista")]
    pub role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSecretaryPayload {
    #[validate(length(min = 1, message = "Nome da Secretaria / Base obrigatório"))]
    #[schema(example = "Base Norte")]
    pub name: String,
}
