// src/models/roles.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::error::AppError;

/// Chave de permissão gravada na coluna `staff.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleKey {
    Admin,
    Secretary,
    Supervisor,
    Coordinator,
    Driver,
    Helper,
}

impl RoleKey {
    // A ordem define os ids exibidos em /api/roles.
    pub const ALL: [RoleKey; 6] = [
        RoleKey::Admin,
        RoleKey::Secretary,
        RoleKey::Supervisor,
        RoleKey::Coordinator,
        RoleKey::Driver,
        RoleKey::Helper,
    ];

    /// Valor persistido ("ADMIN", "DRIVER", ...).
    pub fn as_str(self) -> &'static str {
        match self {
            RoleKey::Admin => "ADMIN",
            RoleKey::Secretary => "SECRETARY",
            RoleKey::Supervisor => "SUPERVISOR",
            RoleKey::Coordinator => "COORDINATOR",
            RoleKey::Driver => "DRIVER",
            RoleKey::Helper => "HELPER",
        }
    }

    /// Rótulo exibido ("Administrador", "Motorista", ...).
    pub fn label(self) -> &'static str {
        match self {
            RoleKey::Admin => "Administrador",
            RoleKey::Secretary => "Secretária",
            RoleKey::Supervisor => "Supervisor",
            RoleKey::Coordinator => "Coordenador",
            RoleKey::Driver => "Motorista",
            RoleKey::Helper => "Ajudante",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == key)
    }

    /// Converte o rótulo escolhido num seletor de volta para a chave.
    /// Rótulo desconhecido é erro, nunca um cargo padrão.
    pub fn from_label(label: &str) -> Result<Self, AppError> {
        Self::ALL
            .into_iter()
            .find(|role| role.label() == label)
            .ok_or_else(|| AppError::UnknownRole(label.to_string()))
    }

    /// Cadastro de moradores e agendamento de OS.
    pub fn can_schedule(self) -> bool {
        matches!(
            self,
            RoleKey::Admin | RoleKey::Secretary | RoleKey::Coordinator | RoleKey::Supervisor
        )
    }

    pub fn can_manage_staff(self) -> bool {
        matches!(self, RoleKey::Admin | RoleKey::Secretary)
    }

    pub fn can_manage_secretaries(self) -> bool {
        self == RoleKey::Admin
    }

    /// Cargos que o cadastro de funcionários pode atribuir.
    /// Admin e Secretária têm fluxos próprios.
    pub fn is_assignable(self) -> bool {
        !matches!(self, RoleKey::Admin | RoleKey::Secretary)
    }
}

// O que sai em GET /api/roles
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleEntry {
    #[schema(example = 5)]
    pub id: i64,

    #[schema(example = "Motorista")]
    pub name: String,

    pub permission: RoleKey,

    #[schema(example = true)]
    pub assignable: bool,
}

pub fn role_table() -> Vec<RoleEntry> {
    RoleKey::ALL
        .iter()
        .enumerate()
        .map(|(i, role)| RoleEntry {
            id: i as i64 + 1,
            name: role.label().to_string(),
            permission: *role,
            assignable: role.is_assignable(),
        })
        .collect()
}
