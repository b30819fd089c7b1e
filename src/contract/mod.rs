//! Contract domain types: the aggregate the wizard builds up step by step.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the contractor gets paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractType {
    FixedRate,
    Milestone,
    HourlyBasis,
}

impl ContractType {
    pub fn all() -> &'static [ContractType] {
        &[
            ContractType::FixedRate,
            ContractType::Milestone,
            ContractType::HourlyBasis,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContractType::FixedRate => "Fixed rate",
            ContractType::Milestone => "Milestone",
            ContractType::HourlyBasis => "Hourly basis",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContractType::FixedRate => "Contracts that have a fixed rate on every payment",
            ContractType::Milestone => "Contract that will be paid as milestones get completed",
            ContractType::HourlyBasis => "Contract that will be paid by hours worked",
        }
    }

    /// Label for the amount field on the contract-amount step.
    pub fn amount_label(&self) -> &'static str {
        match self {
            ContractType::FixedRate => "Fixed amount",
            ContractType::Milestone => "Amount per milestone",
            ContractType::HourlyBasis => "Hourly rate",
        }
    }

    /// Wire name as it appears in the draft JSON (e.g. `fixed-rate`).
    pub fn wire_name(&self) -> &'static str {
        match self {
            ContractType::FixedRate => "fixed-rate",
            ContractType::Milestone => "milestone",
            ContractType::HourlyBasis => "hourly-basis",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<ContractType> {
        ContractType::all()
            .iter()
            .find(|t| t.wire_name() == name)
            .copied()
    }
}

/// Currencies the amount step offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn all() -> &'static [Currency] {
        &[Currency::Usd, Currency::Eur, Currency::Gbp]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub fn from_code(code: &str) -> Option<Currency> {
        Currency::all()
            .iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .copied()
    }
}

/// The accumulated wizard result. Every field is optional; each step merges
/// its own fields into a copy of the prior draft and the stepper stores what
/// comes back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation_description: Option<String>,
}

impl ContractDraft {
    /// Length of the job in days, when both dates are set.
    pub fn duration_days(&self) -> Option<i64> {
        match (self.starts_on, self.ends_on) {
            (Some(from), Some(to)) => Some((to - from).num_days()),
            _ => None,
        }
    }

    /// Pretty JSON for the review step and the final output.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
