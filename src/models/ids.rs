// src/models/ids.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Identificador numérico de qualquer registro (funcionário, morador, OS).
///
/// Ids chegam de fontes diferentes (banco, JSON do front, planilhas antigas)
/// às vezes como número e às vezes como texto; `1`, `1.0` e `"1"` são o mesmo id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, sqlx::Type, ToSchema)]
#[sqlx(transparent)]
#[serde(transparent)]
#[schema(example = 42)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Lê um id de um valor JSON qualquer. Valores que não representam um
    /// inteiro (null, objetos, "abc", 1.5) não são ids.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(RecordId(i));
                }
                // `as` satura fora da faixa; 2^63 já não cabe em i64
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| RecordId(f as i64))
            }
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // "7.0" vem de planilhas que gravam tudo como float
        let integral = trimmed.strip_suffix(".0").unwrap_or(trimmed);
        integral.parse::<i64>().map(RecordId)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        RecordId::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("id inválido: {}", value)))
    }
}
