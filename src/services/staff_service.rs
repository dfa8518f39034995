// src/services/staff_service.rs

use std::sync::Arc;

use crate::{
    common::{error::AppError, password::hash_password},
    config::AppConfig,
    db::SharedStore,
    models::{
        ids::RecordId,
        roles::RoleKey,
        staff::{
            CreateSecretaryPayload, CreateStaffPayload, NewStaff, SecretaryOption, Staff,
            StaffDetailsUpdate, UpdateStaffPayload,
        },
    },
    services::session::SessionContext,
};

/// Login gerado para uma secretária: nome sem espaços, minúsculo, no domínio da empresa.
pub fn secretary_login(name: &str, domain: &str) -> String {
    let local: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!("{}@{}", local, domain)
}

#[derive(Clone)]
pub struct StaffService {
    store: SharedStore,
    config: Arc<AppConfig>,
}

impl StaffService {
    pub fn new(store: SharedStore, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub fn list<'s>(&self, session: &'s SessionContext) -> Result<&'s [Staff], AppError> {
        session.require(RoleKey::can_manage_staff, "gerenciar funcionários")?;
        Ok(&session.data.staff)
    }

    pub async fn create(
        &self,
        session: &mut SessionContext,
        payload: CreateStaffPayload,
    ) -> Result<Staff, AppError> {
        session.require(RoleKey::can_manage_staff, "gerenciar funcionários")?;

        let name = payload.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationFailure("Nome obrigatório".to_string()));
        }

        let role = RoleKey::from_label(payload.role.trim())?;
        if !role.is_assignable() {
            return Err(AppError::ValidationFailure(format!(
                "O cargo {} não pode ser atribuído pelo cadastro de funcionários.",
                role.label()
            )));
        }

        let secretary_id = session.owner_for_new_record(payload.secretary_id)?;

        let password = payload
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(self.config.default_staff_password.as_str());
        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;

        let new_staff = NewStaff {
            name: name.to_string(),
            email: payload.email.trim().to_string(),
            password_hash,
            role,
            // O cargo exibido nasce igual ao rótulo
            job_title: role.label().to_string(),
            secretary_id: Some(secretary_id),
            branch_name: None,
        };

        let created = self.store.insert_staff(&new_staff).await?;
        tracing::info!(
            "👤 {} ({}) cadastrado por {} na secretária #{}",
            created.name,
            role.label(),
            session.actor.name,
            secretary_id
        );

        session.refresh(self.store.as_ref()).await?;
        Ok(created)
    }

    pub async fn update(
        &self,
        session: &mut SessionContext,
        staff_id: RecordId,
        payload: UpdateStaffPayload,
    ) -> Result<Staff, AppError> {
        session.require(RoleKey::can_manage_staff, "gerenciar funcionários")?;

        let target = session
            .data
            .staff_by_id(staff_id)
            .ok_or_else(|| AppError::NotFound(format!("Funcionário #{}", staff_id)))?;

        let role = RoleKey::from_label(payload.role.trim())?;
        if !role.is_assignable() && session.role != RoleKey::Admin {
            return Err(AppError::Forbidden(format!(
                "somente o Administrador pode conceder o cargo {}",
                role.label()
            )));
        }
        // Cargo subordinado sem secretária vira um usuário sem escopo
        if role.is_assignable() && target.secretary_id.is_none() {
            return Err(AppError::ValidationFailure(format!(
                "{} não está vinculado a uma secretária e não pode receber o cargo {}.",
                target.name,
                role.label()
            )));
        }

        let details = StaffDetailsUpdate {
            name: payload.name.trim().to_string(),
            job_title: payload.job_title.trim().to_string(),
            email: payload.email.trim().to_string(),
            role,
        };

        let updated = self.store.update_staff_details(staff_id, &details).await?;
        tracing::info!("Funcionário #{} atualizado por {}", staff_id, session.actor.name);

        session.refresh(self.store.as_ref()).await?;
        Ok(updated)
    }

    // =========================================================================
    //  SECRETARIAS (BASES)
    // =========================================================================

    pub fn list_secretaries(&self, session: &SessionContext) -> Result<Vec<SecretaryOption>, AppError> {
        session.require(RoleKey::can_manage_secretaries, "gerenciar secretarias")?;
        Ok(session.secretaries().map(SecretaryOption::from).collect())
    }

    pub async fn create_secretary(
        &self,
        session: &mut SessionContext,
        payload: CreateSecretaryPayload,
    ) -> Result<Staff, AppError> {
        session.require(RoleKey::can_manage_secretaries, "gerenciar secretarias")?;

        let name = payload.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationFailure(
                "Nome da Secretaria / Base obrigatório".to_string(),
            ));
        }

        let email = secretary_login(name, &self.config.staff_email_domain);
        let password_hash =
            hash_password(&self.config.default_staff_password, self.config.bcrypt_cost).await?;

        let new_secretary = NewStaff {
            name: name.to_string(),
            email,
            password_hash,
            role: RoleKey::Secretary,
            job_title: RoleKey::Secretary.label().to_string(),
            secretary_id: None,
            branch_name: Some(name.to_string()),
        };

        let created = self.store.insert_secretary(&new_secretary).await?;
        tracing::info!("🏢 Secretaria '{}' criada com login {}", created.name, created.email);

        session.refresh(self.store.as_ref()).await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session::fixtures::{two_branches, TwoBranches};

    fn service(env: &TwoBranches) -> StaffService {
        StaffService::new(env.store.clone(), Arc::new(AppConfig::for_tests()))
    }

    async fn session_of(env: &TwoBranches, staff: &Staff) -> SessionContext {
        SessionContext::for_staff(env.store.as_ref(), staff).await.unwrap()
    }

    fn create_payload(name: &str, role: &str, secretary_id: Option<RecordId>) -> CreateStaffPayload {
        CreateStaffPayload {
            name: name.to_string(),
            email: format!("{}@telemim.com", name.to_lowercase().replace(' ', ".")),
            password: None,
            role: role.to_string(),
            secretary_id,
        }
    }

    #[test]
    fn secretary_login_drops_spaces_and_case() {
        assert_eq!(secretary_login("Base Norte", "telemim.com"), "basenorte@telemim.com");
        assert_eq!(secretary_login("  Matriz ", "telemim.com"), "matriz@telemim.com");
    }

    #[tokio::test]
    async fn secretary_links_new_staff_to_herself() {
        let env = two_branches().await;
        let service = service(&env);
        let mut session = session_of(&env, &env.sec_a).await;

        let created = service
            .create(&mut session, create_payload("Paulo Ajudante", "Ajudante", Some(env.sec_b.id)))
            .await
            .unwrap();

        assert_eq!(created.secretary_id, Some(env.sec_a.id));
        assert_eq!(created.role, "HELPER");
        assert_eq!(created.job_title, "Ajudante");
        assert!(crate::common::password::verify_password("123", &created.password_hash)
            .await
            .unwrap());
        assert!(session.data.staff.iter().any(|s| s.id == created.id));
    }

    #[tokio::test]
    async fn admin_and_secretary_roles_cannot_be_created_here() {
        let env = two_branches().await;
        let service = service(&env);
        let mut session = session_of(&env, &env.admin).await;
        let before = env.store.writes();

        for label in ["Administrador", "Secretária"] {
            let err = service
                .create(&mut session, create_payload("Novo", label, Some(env.sec_a.id)))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::ValidationFailure(_)));
        }

        let err = service
            .create(&mut session, create_payload("Novo", "Gerente", Some(env.sec_a.id)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownRole(_)));

        assert_eq!(env.store.writes(), before);
    }

    #[tokio::test]
    async fn admin_must_choose_a_secretary_for_new_staff() {
        let env = two_branches().await;
        let service = service(&env);
        let mut session = session_of(&env, &env.admin).await;

        let err = service
            .create(&mut session, create_payload("Novo", "Motorista", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationFailure(_)));

        let created = service
            .create(&mut session, create_payload("Novo", "Motorista", Some(env.sec_b.id)))
            .await
            .unwrap();
        assert_eq!(created.secretary_id, Some(env.sec_b.id));
    }

    #[tokio::test]
    async fn field_roles_cannot_manage_staff() {
        let env = two_branches().await;
        let service = service(&env);
        let session = session_of(&env, &env.supervisor_a).await;
        assert!(matches!(service.list(&session), Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn only_admin_grants_admin_or_secretary() {
        let env = two_branches().await;
        let service = service(&env);
        let promote = |role: &str| UpdateStaffPayload {
            name: "Carlos Motorista".to_string(),
            job_title: "Chefe".to_string(),
            email: "carlosmotorista@telemim.com".to_string(),
            role: role.to_string(),
        };

        let mut secretary = session_of(&env, &env.sec_a).await;
        let err = service
            .update(&mut secretary, env.driver_a.id, promote("Administrador"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let updated = service
            .update(&mut secretary, env.driver_a.id, promote("Supervisor"))
            .await
            .unwrap();
        assert_eq!(updated.role, "SUPERVISOR");
        assert_eq!(updated.job_title, "Chefe");

        let mut admin = session_of(&env, &env.admin).await;
        let updated = service
            .update(&mut admin, env.driver_a.id, promote("Administrador"))
            .await
            .unwrap();
        assert_eq!(updated.role, "ADMIN");
    }

    #[tokio::test]
    async fn unlinked_staff_cannot_take_a_subordinate_role() {
        let env = two_branches().await;
        let service = service(&env);
        let mut admin = session_of(&env, &env.admin).await;
        let before = env.store.writes();

        let payload = UpdateStaffPayload {
            name: "Admin Geral".to_string(),
            job_title: "Motorista".to_string(),
            email: env.admin.email.clone(),
            role: "Motorista".to_string(),
        };
        let err = service
            .update(&mut admin, env.admin.id, payload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationFailure(_)));
        assert_eq!(env.store.writes(), before);

        // A conta continua com sessão válida
        let stored = env.store.snapshot().staff_by_id(env.admin.id).cloned().unwrap();
        assert_eq!(stored.role, "ADMIN");
        assert!(SessionContext::for_staff(env.store.as_ref(), &stored).await.is_ok());
    }

    #[tokio::test]
    async fn staff_of_another_branch_is_not_found() {
        let env = two_branches().await;
        let service = service(&env);
        let mut session = session_of(&env, &env.sec_a).await;

        let payload = UpdateStaffPayload {
            name: "Beto".to_string(),
            job_title: "Supervisor".to_string(),
            email: "beto@telemim.com".to_string(),
            role: "Supervisor".to_string(),
        };
        let err = service
            .update(&mut session, env.supervisor_b.id, payload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn admin_creates_self_linked_secretary() {
        let env = two_branches().await;
        let service = service(&env);
        let mut session = session_of(&env, &env.admin).await;

        let created = service
            .create_secretary(&mut session, CreateSecretaryPayload { name: "Base Norte".to_string() })
            .await
            .unwrap();

        assert_eq!(created.email, "basenorte@telemim.com");
        assert_eq!(created.secretary_id, Some(created.id));
        assert_eq!(created.job_title, "Secretária");
        assert_eq!(created.branch_name.as_deref(), Some("Base Norte"));

        let options = service.list_secretaries(&session).unwrap();
        assert_eq!(options.len(), 3);
        assert!(options.iter().any(|o| o.label == "Base Norte"));
    }

    #[tokio::test]
    async fn secretary_cannot_create_secretaries() {
        let env = two_branches().await;
        let service = service(&env);
        let mut session = session_of(&env, &env.sec_a).await;

        let err = service
            .create_secretary(&mut session, CreateSecretaryPayload { name: "Base Sul".to_string() })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
