// src/services/seed.rs

// Dados de demonstração para um banco vazio.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::{
    common::{error::AppError, password::hash_password},
    config::AppConfig,
    db::MovingStore,
    models::{
        moves::{MoveStatus, NewMove},
        residents::{NewResident, ResidentFields},
        roles::RoleKey,
        staff::NewStaff,
    },
};

/// Popula o banco se a tabela de funcionários estiver vazia.
/// Devolve `true` quando inseriu os dados.
pub async fn seed_demo_data(store: &dyn MovingStore, config: &AppConfig) -> Result<bool, AppError> {
    if !store.fetch_all().await?.staff.is_empty() {
        return Ok(false);
    }

    tracing::info!("Banco de dados vazio. Inserindo dados iniciais de demonstração...");

    let password_hash = hash_password(&config.default_staff_password, config.bcrypt_cost).await?;
    let member = |name: &str, login: &str, role: RoleKey| NewStaff {
        name: name.to_string(),
        email: format!("{}@{}", login, config.staff_email_domain),
        password_hash: password_hash.clone(),
        role,
        job_title: role.label().to_string(),
        secretary_id: None,
        branch_name: None,
    };

    store.insert_staff(&member("Admin Geral", "admin", RoleKey::Admin)).await?;

    let ana = store
        .insert_secretary(&NewStaff {
            branch_name: Some("Matriz".to_string()),
            ..member("Ana Secretária", "ana", RoleKey::Secretary)
        })
        .await?;

    let carlos = store
        .insert_staff(&NewStaff {
            secretary_id: Some(ana.id),
            ..member("Carlos Motorista", "carlos", RoleKey::Driver)
        })
        .await?;
    let maria = store
        .insert_staff(&NewStaff {
            secretary_id: Some(ana.id),
            ..member("Maria Supervisora", "maria", RoleKey::Supervisor)
        })
        .await?;

    let some = |v: &str| Some(v.to_string());
    let date = NaiveDate::from_ymd_opt(2023, 12, 1);
    let time = NaiveTime::from_hms_opt(8, 0, 0);

    let joao = store
        .insert_resident(&NewResident {
            fields: ResidentFields {
                name: "João Silva".to_string(),
                selo: some("A101"),
                contact: some("1199999999"),
                origin_address: some("Rua A, 100"),
                origin_number: some("S/N"),
                origin_neighborhood: some("Centro"),
                dest_address: some("Rua B, 200"),
                dest_number: some("S/N"),
                dest_neighborhood: some("Bairro Novo"),
                observation: some("Piano de cauda"),
                move_date: date,
                move_time: time,
            },
            secretary_id: ana.id,
        })
        .await?;

    if let (Some(date), Some(time)) = (date, time) {
        store
            .insert_move(&NewMove {
                resident_id: joao.id,
                date,
                time,
                metragem: Decimal::from(15),
                supervisor_id: maria.id,
                coordinator_id: None,
                driver_id: Some(carlos.id),
                status: MoveStatus::Pending,
                secretary_id: ana.id,
            })
            .await?;
    }

    tracing::info!("✅ Dados de demonstração inseridos (login admin@{})", config.staff_email_domain);
    Ok(true)
}
