// src/models/residents.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::ids::RecordId;
use crate::services::scope::Scoped;

// Morador (cliente da mudança)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: RecordId,

    #[schema(example = "João Silva")]
    pub name: String,

    #[schema(example = "A101")]
    pub selo: Option<String>,

    #[schema(example = "1199999999")]
    pub contact: Option<String>,

    #[schema(example = "Rua A, 100")]
    pub origin_address: Option<String>,
    pub origin_number: Option<String>,
    pub origin_neighborhood: Option<String>,

    #[schema(example = "Rua B, 200")]
    pub dest_address: Option<String>,
    pub dest_number: Option<String>,
    pub dest_neighborhood: Option<String>,

    #[schema(example = "Piano de cauda")]
    pub observation: Option<String>,

    // Previsão informada no cadastro
    pub move_date: Option<NaiveDate>,
    pub move_time: Option<NaiveTime>,

    pub secretary_id: RecordId,

    pub created_at: DateTime<Utc>,
}

impl Scoped for Resident {
    fn field(&self, key: &str) -> Option<RecordId> {
        match key {
            "id" => Some(self.id),
            "secretaryId" => Some(self.secretary_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResidentFields {
    pub name: String,
    pub selo: Option<String>,
    pub contact: Option<String>,
    pub origin_address: Option<String>,
    pub origin_number: Option<String>,
    pub origin_neighborhood: Option<String>,
    pub dest_address: Option<String>,
    pub dest_number: Option<String>,
    pub dest_neighborhood: Option<String>,
    pub observation: Option<String>,
    pub move_date: Option<NaiveDate>,
    pub move_time: Option<NaiveTime>,
}

// O que o repositório grava: os campos + a secretária dona
#[derive(Debug, Clone)]
pub struct NewResident {
    pub fields: ResidentFields,
    pub secretary_id: RecordId,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResidentPayload {
    #[validate(length(min = 1, message = "Nome é obrigatório."))]
    #[schema(example = "Maria Oliveira")]
    pub name: String,

    pub selo: Option<String>,
    pub contact: Option<String>,

    pub origin_address: Option<String>,
    pub origin_number: Option<String>,
    pub origin_neighborhood: Option<String>,

    pub dest_address: Option<String>,
    pub dest_number: Option<String>,
    pub dest_neighborhood: Option<String>,

    pub observation: Option<String>,

    #[schema(example = "2025-03-10")]
    pub move_date: Option<NaiveDate>,
    #[schema(example = "08:00:00")]
    pub move_time: Option<NaiveTime>,

    // Obrigatório apenas para o Admin ("Vincular à Secretária")
    pub secretary_id: Option<RecordId>,
}

impl CreateResidentPayload {
    pub fn into_parts(self) -> (ResidentFields, Option<RecordId>) {
        let fields = ResidentFields {
            name: self.name.trim().to_string(),
            selo: self.selo,
            contact: self.contact,
            origin_address: self.origin_address,
            origin_number: self.origin_number,
            origin_neighborhood: self.origin_neighborhood,
            dest_address: self.dest_address,
            dest_number: self.dest_number,
            dest_neighborhood: self.dest_neighborhood,
            observation: self.observation,
            move_date: self.move_date,
            move_time: self.move_time,
        };
        (fields, self.secretary_id)
    }
}
