use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{ApiError, Violations};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum HustleType {
    SaaS,
    Instagram,
    Gig,
    #[default]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewHustle {
    pub user_id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: HustleType,
}

impl NewHustle {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::default();
        v.require_text(&self.user_id, "user_id");
        v.require_text(&self.name, "name");
        v.finish()
    }
}

/// A user's income-generating venture. Transactions reference it by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hustle {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: HustleType,
}

impl Hustle {
    pub fn create(new: NewHustle) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            name: new.name.trim().to_string(),
            kind: new.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub user_id: String,
    #[serde(default)]
    pub hustle_id: Option<Uuid>,
    #[serde(default)]
    pub hustle_name: Option<String>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub occurred_at: Option<OffsetDateTime>,
}

impl Transaction {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::default();
        v.require_text(&self.user_id, "user_id");
        v.check(self.amount.is_finite(), "amount", "must be a number");
        v.finish()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct HustleTotals {
    pub income: f64,
    pub expense: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Forecast {
    pub income: f64,
    pub expense: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoneySummary {
    pub per_hustle: BTreeMap<String, HustleTotals>,
    pub monthly_forecast: Forecast,
}
