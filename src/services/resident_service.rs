// src/services/resident_service.rs

use crate::{
    common::error::AppError,
    db::SharedStore,
    models::{
        residents::{CreateResidentPayload, NewResident, Resident},
        roles::RoleKey,
    },
    services::session::SessionContext,
};

#[derive(Clone)]
pub struct ResidentService {
    store: SharedStore,
}

impl ResidentService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn list<'s>(&self, session: &'s SessionContext) -> &'s [Resident] {
        &session.data.residents
    }

    pub async fn create(
        &self,
        session: &mut SessionContext,
        payload: CreateResidentPayload,
    ) -> Result<Resident, AppError> {
        session.require(RoleKey::can_schedule, "cadastrar moradores")?;

        let (fields, requested_owner) = payload.into_parts();
        if fields.name.is_empty() {
            return Err(AppError::ValidationFailure("Nome é obrigatório.".to_string()));
        }

        let secretary_id = session.owner_for_new_record(requested_owner)?;

        let created = self
            .store
            .insert_resident(&NewResident { fields, secretary_id })
            .await?;
        tracing::info!(
            "🏠 Morador '{}' cadastrado por {} (secretária #{})",
            created.name,
            session.actor.name,
            secretary_id
        );

        session.refresh(self.store.as_ref()).await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::ids::RecordId,
        services::session::fixtures::two_branches,
    };

    fn payload(name: &str, secretary_id: Option<RecordId>) -> CreateResidentPayload {
        CreateResidentPayload {
            name: name.to_string(),
            selo: Some("A101".to_string()),
            contact: None,
            origin_address: Some("Rua A".to_string()),
            origin_number: Some("100".to_string()),
            origin_neighborhood: None,
            dest_address: Some("Rua B".to_string()),
            dest_number: Some("200".to_string()),
            dest_neighborhood: None,
            observation: None,
            move_date: None,
            move_time: None,
            secretary_id,
        }
    }

    #[tokio::test]
    async fn coordinator_registers_resident_in_own_branch() {
        let env = two_branches().await;
        let service = ResidentService::new(env.store.clone());
        let mut session = SessionContext::for_staff(env.store.as_ref(), &env.coordinator_a)
            .await
            .unwrap();

        let created = service
            .create(&mut session, payload("  Maria Oliveira ", Some(env.sec_b.id)))
            .await
            .unwrap();

        assert_eq!(created.name, "Maria Oliveira");
        assert_eq!(created.secretary_id, env.sec_a.id);
        assert_eq!(service.list(&session).len(), 2);
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_persistence() {
        let env = two_branches().await;
        let service = ResidentService::new(env.store.clone());
        let mut session = SessionContext::for_staff(env.store.as_ref(), &env.sec_a).await.unwrap();
        let before = env.store.writes();

        let err = service.create(&mut session, payload("   ", None)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationFailure(_)));
        assert_eq!(env.store.writes(), before);
    }

    #[tokio::test]
    async fn admin_must_link_the_resident_to_a_secretary() {
        let env = two_branches().await;
        let service = ResidentService::new(env.store.clone());
        let mut session = SessionContext::for_staff(env.store.as_ref(), &env.admin).await.unwrap();
        let before = env.store.writes();

        let err = service.create(&mut session, payload("Ana", None)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationFailure(_)));
        assert_eq!(env.store.writes(), before);

        let created = service
            .create(&mut session, payload("Ana", Some(env.sec_b.id)))
            .await
            .unwrap();
        assert_eq!(created.secretary_id, env.sec_b.id);
    }

    #[tokio::test]
    async fn helper_cannot_register_residents() {
        let env = two_branches().await;
        let service = ResidentService::new(env.store.clone());
        let mut session = SessionContext::for_staff(env.store.as_ref(), &env.driver_a).await.unwrap();

        let err = service.create(&mut session, payload("Ana", None)).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
