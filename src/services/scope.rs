// src/services/scope.rs

//! Escopo de visibilidade: quem vê o quê.
//!
//! O Admin vê tudo. A Secretária vê os registros ligados ao próprio id.
//! Os demais cargos herdam o escopo da secretária a que pertencem.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    common::error::AppError,
    models::{ids::RecordId, roles::RoleKey, staff::Staff},
};

/// Campo testado por padrão ao filtrar.
pub const DEFAULT_SCOPE_KEY: &str = "secretaryId";

/// Usuário autenticado, como chega da borda (banco ou token).
/// O cargo é texto cru: a validação acontece em `resolve_scope`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: RecordId,
    pub name: String,
    pub role: Option<String>,
    pub secretary_id: Option<RecordId>,
}

impl Actor {
    pub fn role_key(&self) -> Result<RoleKey, AppError> {
        let raw = self
            .role
            .as_deref()
            .ok_or_else(|| AppError::InvalidActor(format!("funcionário #{} sem cargo", self.id)))?;

        RoleKey::from_key(raw)
            .ok_or_else(|| AppError::InvalidActor(format!("cargo '{}' desconhecido", raw)))
    }
}

impl From<&Staff> for Actor {
    fn from(staff: &Staff) -> Self {
        Self {
            id: staff.id,
            name: staff.name.clone(),
            role: Some(staff.role.clone()),
            secretary_id: staff.secretary_id,
        }
    }
}

/// Resultado da resolução de escopo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Admin: sem restrição.
    Unrestricted,
    /// Restrito à secretária indicada.
    Owned(RecordId),
}

impl Scope {
    pub fn secretary_id(&self) -> Option<RecordId> {
        match self {
            Scope::Unrestricted => None,
            Scope::Owned(id) => Some(*id),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Scope::Unrestricted)
    }
}

/// Decide o escopo do usuário. Função pura.
pub fn resolve_scope(actor: &Actor) -> Result<Scope, AppError> {
    match actor.role_key()? {
        RoleKey::Admin => Ok(Scope::Unrestricted),
        RoleKey::Secretary => Ok(Scope::Owned(actor.id)),
        role => actor.secretary_id.map(Scope::Owned).ok_or_else(|| {
            AppError::InvalidActor(format!(
                "{} #{} não está vinculado a uma secretária",
                role.label(),
                actor.id
            ))
        }),
    }
}

/// Acesso a campos de id pelo nome serializado ("id", "secretaryId", ...).
pub trait Scoped {
    /// `None` quando o campo não existe, é nulo ou não é um id.
    fn field(&self, key: &str) -> Option<RecordId>;
}

impl Scoped for Value {
    fn field(&self, key: &str) -> Option<RecordId> {
        self.get(key).and_then(RecordId::from_json)
    }
}

fn is_visible<T: Scoped>(record: &T, scope_key: &str, owner: RecordId) -> bool {
    // O segundo teste deixa a Secretária ver a própria linha de funcionária,
    // mesmo quando o secretaryId dela está nulo.
    record.field(scope_key) == Some(owner) || record.field("id") == Some(owner)
}

/// Devolve, em nova coleção e na ordem original, os registros visíveis no escopo.
pub fn filter_by_scope<T: Scoped + Clone>(records: &[T], scope_key: &str, scope: Scope) -> Vec<T> {
    match scope {
        Scope::Unrestricted => records.to_vec(),
        Scope::Owned(owner) => records
            .iter()
            .filter(|record| is_visible(*record, scope_key, owner))
            .cloned()
            .collect(),
    }
}

/// Atalho com a chave padrão (`secretaryId`).
pub fn filter_owned<T: Scoped + Clone>(records: &[T], scope: Scope) -> Vec<T> {
    filter_by_scope(records, DEFAULT_SCOPE_KEY, scope)
}

/// Filtro estrito: só o campo dono (`secretaryId`), sem a regra do próprio id.
/// Usado para tabelas cujos ids não são ids de funcionário (moradores, OS).
pub fn filter_strictly_owned<T: Scoped + Clone>(records: &[T], scope: Scope) -> Vec<T> {
    match scope {
        Scope::Unrestricted => records.to_vec(),
        Scope::Owned(owner) => records
            .iter()
            .filter(|record| belongs_to(*record, owner))
            .cloned()
            .collect(),
    }
}

/// O registro pertence à secretária indicada?
pub fn belongs_to<T: Scoped>(record: &T, owner: RecordId) -> bool {
    record.field(DEFAULT_SCOPE_KEY) == Some(owner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn actor(id: i64, role: Option<&str>, secretary_id: Option<i64>) -> Actor {
        Actor {
            id: RecordId(id),
            name: format!("Funcionário {}", id),
            role: role.map(str::to_string),
            secretary_id: secretary_id.map(RecordId),
        }
    }

    #[test]
    fn admin_is_unrestricted() {
        let admin = actor(1, Some("ADMIN"), None);
        assert_eq!(resolve_scope(&admin).unwrap(), Scope::Unrestricted);

        // Mesmo com secretaryId preenchido
        let linked_admin = actor(1, Some("ADMIN"), Some(9));
        assert_eq!(resolve_scope(&linked_admin).unwrap(), Scope::Unrestricted);
    }

    #[test]
    fn secretary_scope_is_her_own_id() {
        let secretary = actor(5, Some("SECRETARY"), None);
        assert_eq!(resolve_scope(&secretary).unwrap(), Scope::Owned(RecordId(5)));
    }

    #[test]
    fn other_roles_inherit_their_secretary() {
        for role in ["SUPERVISOR", "COORDINATOR", "DRIVER", "HELPER"] {
            let staff = actor(7, Some(role), Some(5));
            assert_eq!(resolve_scope(&staff).unwrap(), Scope::Owned(RecordId(5)));
        }
    }

    #[test]
    fn unknown_or_missing_role_is_invalid() {
        assert!(matches!(
            resolve_scope(&actor(1, Some("MANAGER"), Some(2))),
            Err(AppError::InvalidActor(_))
        ));
        assert!(matches!(
            resolve_scope(&actor(1, None, Some(2))),
            Err(AppError::InvalidActor(_))
        ));
        // Rótulo não é chave
        assert!(matches!(
            resolve_scope(&actor(1, Some("Motorista"), Some(2))),
            Err(AppError::InvalidActor(_))
        ));
    }

    #[test]
    fn subordinate_without_secretary_is_invalid() {
        assert!(matches!(
            resolve_scope(&actor(3, Some("DRIVER"), None)),
            Err(AppError::InvalidActor(_))
        ));
    }

    #[test]
    fn unrestricted_keeps_everything_in_order() {
        let records = vec![
            json!({"id": 3, "secretaryId": 2}),
            json!({"id": 1, "secretaryId": 1}),
            json!({"id": 2}),
        ];
        let visible = filter_by_scope(&records, DEFAULT_SCOPE_KEY, Scope::Unrestricted);
        assert_eq!(visible, records);
    }

    #[test]
    fn owned_scope_matches_key_or_own_id() {
        let s = 10;
        let records = vec![
            json!({"id": 1, "secretaryId": s}),
            json!({"id": 2, "secretaryId": 20}),
            json!({"id": s, "secretaryId": null}),
        ];
        let visible = filter_by_scope(&records, DEFAULT_SCOPE_KEY, Scope::Owned(RecordId(s)));
        assert_eq!(visible, vec![records[0].clone(), records[2].clone()]);
    }

    #[test]
    fn comparison_tolerates_strings_and_numbers() {
        let records = vec![
            json!({"id": "4", "secretaryId": "1"}),
            json!({"id": 5, "secretaryId": 1.0}),
            json!({"id": 6, "secretaryId": "2"}),
        ];
        let visible = filter_by_scope(&records, DEFAULT_SCOPE_KEY, Scope::Owned(RecordId(1)));
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0]["id"], json!("4"));
        assert_eq!(visible[1]["id"], json!(5));
    }

    #[test]
    fn absent_or_malformed_key_excludes_without_failing() {
        let records = vec![
            json!({"id": 8}),
            json!({"id": 9, "secretaryId": "abc"}),
            json!({"id": 11, "secretaryId": {"nested": 1}}),
            json!("not even an object"),
        ];
        let visible = filter_by_scope(&records, DEFAULT_SCOPE_KEY, Scope::Owned(RecordId(1)));
        assert!(visible.is_empty());
    }

    #[test]
    fn custom_key_is_honoured() {
        let records = vec![
            json!({"id": 1, "residentId": 4, "secretaryId": 9}),
            json!({"id": 2, "residentId": 5, "secretaryId": 4}),
        ];
        let visible = filter_by_scope(&records, "residentId", Scope::Owned(RecordId(4)));
        assert_eq!(visible, vec![records[0].clone()]);
    }

    #[test]
    fn input_is_left_untouched() {
        let records = vec![json!({"id": 1, "secretaryId": 1}), json!({"id": 2, "secretaryId": 2})];
        let snapshot = records.clone();
        let _ = filter_by_scope(&records, DEFAULT_SCOPE_KEY, Scope::Owned(RecordId(2)));
        assert_eq!(records, snapshot);
    }

    #[test]
    fn residents_scenario_by_actor() {
        // Admin, SecA (id 1) e Motorista1 (secretária 1); moradores das secretárias 1 e 2
        let admin = actor(100, Some("ADMIN"), None);
        let sec_a = actor(1, Some("SECRETARY"), None);
        let driver = actor(3, Some("DRIVER"), Some(1));

        let residents = vec![
            json!({"id": 50, "name": "Morador A", "secretaryId": 1}),
            json!({"id": 51, "name": "Morador B", "secretaryId": 2}),
        ];

        let sec_view = filter_owned(&residents, resolve_scope(&sec_a).unwrap());
        assert_eq!(sec_view, vec![residents[0].clone()]);

        let driver_view = filter_owned(&residents, resolve_scope(&driver).unwrap());
        assert_eq!(driver_view, sec_view);

        let admin_view = filter_owned(&residents, resolve_scope(&admin).unwrap());
        assert_eq!(admin_view, residents);
    }

    #[test]
    fn strict_filter_ignores_matching_own_id() {
        // Morador #2 da secretária 7: o id coincide com o da secretária 2
        let records = vec![
            json!({"id": 2, "secretaryId": 7}),
            json!({"id": 3, "secretaryId": 2}),
        ];

        assert!(belongs_to(&records[0], RecordId(7)));
        assert!(!belongs_to(&records[0], RecordId(2)));

        let strict = filter_strictly_owned(&records, Scope::Owned(RecordId(2)));
        assert_eq!(strict, vec![records[1].clone()]);

        let widened = filter_by_scope(&records, DEFAULT_SCOPE_KEY, Scope::Owned(RecordId(2)));
        assert_eq!(widened.len(), 2);

        assert_eq!(filter_strictly_owned(&records, Scope::Unrestricted), records);
    }
}
