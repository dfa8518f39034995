// src/services/move_service.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::SharedStore,
    models::{
        dashboard::{DashboardSummary, MoveSearchQuery},
        ids::RecordId,
        moves::{Move, MoveDetailsUpdate, MoveStatus, MoveView, NewMove, ScheduleMovePayload},
        roles::RoleKey,
        staff::Staff,
    },
    services::{scope::belongs_to, session::SessionContext},
};

/// Maior metragem que cabe em `NUMERIC(10,2)`.
const MAX_METRAGEM: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Clone)]
pub struct MoveService {
    store: SharedStore,
}

impl MoveService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    pub fn list(&self, session: &SessionContext) -> Vec<MoveView> {
        session
            .data
            .moves
            .iter()
            .map(|m| to_view(session, m))
            .collect()
    }

    /// "Buscar Mudanças": status exato, data exata e trecho do nome do cliente.
    pub fn search(&self, session: &SessionContext, query: &MoveSearchQuery) -> Vec<MoveView> {
        let client_name = query
            .client_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase);

        self.list(session)
            .into_iter()
            .filter(|v| query.status.is_none_or(|s| v.order.status == s))
            .filter(|v| query.date.is_none_or(|d| v.order.date == d))
            .filter(|v| {
                client_name
                    .as_deref()
                    .is_none_or(|n| v.resident_name.to_lowercase().contains(n))
            })
            .collect()
    }

    pub fn summary(&self, session: &SessionContext) -> DashboardSummary {
        let count = |status: MoveStatus| {
            session.data.moves.iter().filter(|m| m.status == status).count()
        };

        DashboardSummary {
            to_do: count(MoveStatus::Pending),
            in_progress: count(MoveStatus::InProgress),
            done: count(MoveStatus::Done),
        }
    }

    // =========================================================================
    //  AGENDAMENTO
    // =========================================================================

    pub async fn schedule(
        &self,
        session: &mut SessionContext,
        payload: ScheduleMovePayload,
    ) -> Result<Move, AppError> {
        session.require(RoleKey::can_schedule, "agendar Ordens de Serviço")?;

        // Dono primeiro: sem secretária a OS nunca chega ao banco
        let owner = session.owner_for_new_record(payload.secretary_id)?;

        let (resident_id, supervisor_id) = match (payload.resident_id, payload.supervisor_id) {
            (Some(r), Some(s)) => (r, s),
            _ => {
                return Err(AppError::ValidationFailure(
                    "Selecione o Morador e o Supervisor.".to_string(),
                ))
            }
        };

        let resident = session
            .data
            .resident_by_id(resident_id)
            .filter(|r| belongs_to(*r, owner))
            .ok_or_else(|| {
                AppError::ValidationFailure(format!(
                    "Morador #{} não pertence a esta base.",
                    resident_id
                ))
            })?;

        let supervisor = team_member(session, owner, supervisor_id, RoleKey::Supervisor)?;
        let coordinator = payload
            .coordinator_id
            .map(|id| team_member(session, owner, id, RoleKey::Coordinator))
            .transpose()?;
        let driver = payload
            .driver_id
            .map(|id| team_member(session, owner, id, RoleKey::Driver))
            .transpose()?;

        let new_move = NewMove {
            resident_id: resident.id,
            date: payload.date,
            time: payload.time,
            // Metragem inicial é zero; é informada na edição da OS
            metragem: Decimal::ZERO,
            supervisor_id: supervisor.id,
            coordinator_id: coordinator.map(|c| c.id),
            driver_id: driver.map(|d| d.id),
            status: MoveStatus::Pending,
            secretary_id: owner,
        };

        let created = self.store.insert_move(&new_move).await?;
        tracing::info!(
            "🚚 OS #{} agendada por {} para {} (secretária #{})",
            created.id,
            session.actor.name,
            created.date,
            owner
        );

        session.refresh(self.store.as_ref()).await?;
        Ok(created)
    }

    // =========================================================================
    //  EDIÇÃO
    // =========================================================================

    pub async fn update_details(
        &self,
        session: &mut SessionContext,
        move_id: RecordId,
        details: MoveDetailsUpdate,
    ) -> Result<Move, AppError> {
        if session.data.move_by_id(move_id).is_none() {
            return Err(AppError::NotFound(format!("OS #{}", move_id)));
        }

        if details.metragem < Decimal::ZERO {
            return Err(AppError::ValidationFailure(
                "A metragem não pode ser negativa.".to_string(),
            ));
        }
        if details.metragem.normalize().scale() > 2 || details.metragem > MAX_METRAGEM {
            return Err(AppError::ValidationFailure(format!(
                "Metragem inválida: no máximo duas casas decimais e até {}.",
                MAX_METRAGEM
            )));
        }

        let updated = self.store.update_move_details(move_id, &details).await?;
        tracing::info!(
            "OS #{} atualizada por {}: {} / {} m³",
            move_id,
            session.actor.name,
            updated.status.label(),
            updated.metragem
        );

        session.refresh(self.store.as_ref()).await?;
        Ok(updated)
    }
}

/// Nome do registro com o id dado, ou "N/A".
pub fn name_by_id<'a, I>(records: I, id: RecordId) -> String
where
    I: IntoIterator<Item = (RecordId, &'a str)>,
{
    records
        .into_iter()
        .find(|(record_id, _)| *record_id == id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn to_view(session: &SessionContext, order: &Move) -> MoveView {
    let residents = session.data.residents.iter().map(|r| (r.id, r.name.as_str()));
    let staff = session.data.staff.iter().map(|s| (s.id, s.name.as_str()));

    MoveView {
        resident_name: name_by_id(residents, order.resident_id),
        supervisor_name: name_by_id(staff, order.supervisor_id),
        order: order.clone(),
    }
}

// Membro da equipe da base, com o cargo exigido
fn team_member<'s>(
    session: &'s SessionContext,
    owner: RecordId,
    id: RecordId,
    role: RoleKey,
) -> Result<&'s Staff, AppError> {
    session
        .data
        .staff_by_id(id)
        .filter(|s| s.has_role(role) && belongs_to(*s, owner))
        .ok_or_else(|| {
            AppError::ValidationFailure(format!(
                "#{} não é {} desta base.",
                id,
                role.label()
            ))
        })
}
