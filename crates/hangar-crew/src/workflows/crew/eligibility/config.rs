use serde::{Deserialize, Serialize};

use super::super::domain::{MaintenanceVisit, Technician};

/// Rubric configuration describing criterion weights and injectable bonus rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    pub weights: CriterionWeights,
    /// Authorization basis/category codes that count as relevant.
    pub qualifying_bases: Vec<String>,
    /// Support codes that count as available on the visit start date.
    pub availability_codes: Vec<String>,
    pub job_title_keywords: Vec<String>,
    pub bonus_rules: Vec<BonusRule>,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            weights: CriterionWeights::default(),
            qualifying_bases: vec!["B1".to_string(), "B2".to_string(), "C".to_string()],
            availability_codes: vec!["AV".to_string(), "O".to_string()],
            job_title_keywords: vec![
                "technician".to_string(),
                "engineer".to_string(),
                "mechanic".to_string(),
                "inspector".to_string(),
            ],
            bonus_rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriterionWeights {
    pub aircraft_type: u8,
    pub certification: u8,
    pub authorization_basis: u8,
    pub availability: u8,
    pub job_title: u8,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            aircraft_type: 30,
            certification: 25,
            authorization_basis: 20,
            availability: 15,
            job_title: 10,
        }
    }
}

/// Externally supplied score override, applied after the rubric and capped at 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusRule {
    pub name: String,
    pub condition: BonusCondition,
    pub bonus: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BonusCondition {
    RegistrationEquals(String),
    RegistrationPrefix(String),
    VisitIdEquals(String),
    TechnicianIdEquals(String),
    AircraftNameContains(String),
}

impl BonusCondition {
    pub fn matches(&self, technician: &Technician, visit: &MaintenanceVisit) -> bool {
        match self {
            Self::RegistrationEquals(value) => visit
                .registration
                .trim()
                .eq_ignore_ascii_case(value.trim()),
            Self::RegistrationPrefix(value) => {
                let prefix = value.trim().to_ascii_uppercase();
                !prefix.is_empty()
                    && visit
                        .registration
                        .trim()
                        .to_ascii_uppercase()
                        .starts_with(&prefix)
            }
            Self::VisitIdEquals(value) => visit.id.0 == *value,
            Self::TechnicianIdEquals(value) => technician.id.0 == *value,
            Self::AircraftNameContains(value) => {
                let needle = value.trim().to_lowercase();
                !needle.is_empty() && visit.aircraft_name.to_lowercase().contains(&needle)
            }
        }
    }
}
