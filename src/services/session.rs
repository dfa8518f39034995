// src/services/session.rs

use crate::{
    common::error::AppError,
    db::{Dataset, MovingStore},
    models::{ids::RecordId, roles::RoleKey, staff::Staff},
    services::scope::{filter_owned, filter_strictly_owned, resolve_scope, Actor, Scope},
};

/// Contexto de uma interação: quem está agindo, o escopo dele e os dados
/// que ele pode ver. Montado a cada requisição e recarregado após cada escrita.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub actor: Actor,
    pub role: RoleKey,
    pub scope: Scope,
    pub data: Dataset,
}

impl SessionContext {
    pub async fn load(store: &dyn MovingStore, actor: Actor) -> Result<Self, AppError> {
        let role = actor.role_key()?;
        let scope = resolve_scope(&actor)?;
        let data = scoped_dataset(store.fetch_all().await?, scope);

        Ok(Self { actor, role, scope, data })
    }

    pub async fn for_staff(store: &dyn MovingStore, staff: &Staff) -> Result<Self, AppError> {
        Self::load(store, Actor::from(staff)).await
    }

    /// Relê o banco. Só deve ser chamado depois de uma escrita bem-sucedida.
    pub async fn refresh(&mut self, store: &dyn MovingStore) -> Result<(), AppError> {
        self.data = scoped_dataset(store.fetch_all().await?, self.scope);
        Ok(())
    }

    pub fn require(&self, allowed: fn(RoleKey) -> bool, action: &str) -> Result<(), AppError> {
        if allowed(self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "o cargo {} não pode {}",
                self.role.label(),
                action
            )))
        }
    }

    /// Secretária dona de um registro novo (morador, OS, funcionário).
    ///
    /// Fora do Admin o dono é sempre o escopo do usuário e o pedido é ignorado.
    /// O Admin precisa indicar uma secretária existente.
    pub fn owner_for_new_record(&self, requested: Option<RecordId>) -> Result<RecordId, AppError> {
        match self.scope {
            Scope::Owned(owner) => {
                if let Some(other) = requested.filter(|r| *r != owner) {
                    tracing::debug!(
                        "Secretária #{} pedida por {} ignorada; usando o escopo #{}",
                        other,
                        self.actor.name,
                        owner
                    );
                }
                Ok(owner)
            }
            Scope::Unrestricted => {
                let requested = requested.ok_or_else(|| {
                    AppError::ValidationFailure(
                        "O ID da Secretária não foi definido. O Admin deve selecionar uma Secretária."
                            .to_string(),
                    )
                })?;

                self.data
                    .staff_by_id(requested)
                    .filter(|s| s.has_role(RoleKey::Secretary))
                    .map(|s| s.id)
                    .ok_or_else(|| {
                        AppError::ValidationFailure(format!(
                            "#{} não é uma Secretária cadastrada.",
                            requested
                        ))
                    })
            }
        }
    }

    pub fn secretaries(&self) -> impl Iterator<Item = &Staff> {
        self.data.staff.iter().filter(|s| s.has_role(RoleKey::Secretary))
    }
}

fn scoped_dataset(full: Dataset, scope: Scope) -> Dataset {
    if scope.is_unrestricted() {
        return full;
    }

    // A regra do próprio id só vale para funcionários: é o que deixa a
    // Secretária ver a própria linha. Moradores e OS têm sequências de id próprias.
    Dataset {
        staff: filter_owned(&full.staff, scope),
        residents: filter_strictly_owned(&full.residents, scope),
        moves: filter_strictly_owned(&full.moves, scope),
    }
}
