use crate::quantity::parse_quantity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestRecord {
    #[serde(alias = "dia")]
    pub day: u32,
    #[serde(alias = "quantidade")]
    pub quantity: f64,
    #[serde(alias = "data")]
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub average: f64,
    pub total: f64,
}

/// Quantity as typed by the user: either a JSON number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(f64),
    Text(String),
}

impl RawQuantity {
    pub fn parse(&self) -> Option<f64> {
        match self {
            RawQuantity::Number(value) if value.is_finite() => Some(*value + 0.0),
            RawQuantity::Number(_) => None,
            RawQuantity::Text(text) => parse_quantity(text),
        }
    }
}

impl std::fmt::Display for RawQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawQuantity::Number(value) => write!(f, "{value}"),
            RawQuantity::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for RawQuantity {
    fn from(value: f64) -> Self {
        RawQuantity::Number(value)
    }
}

impl From<i32> for RawQuantity {
    fn from(value: i32) -> Self {
        RawQuantity::Number(f64::from(value))
    }
}

impl From<&str> for RawQuantity {
    fn from(value: &str) -> Self {
        RawQuantity::Text(value.to_string())
    }
}

impl From<String> for RawQuantity {
    fn from(value: String) -> Self {
        RawQuantity::Text(value)
    }
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: RawQuantity,
}

#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerView {
    pub records: Vec<HarvestRecord>,
    pub summary: Summary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub message: String,
    pub view: LedgerView,
}
