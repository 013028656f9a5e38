mod config;
mod rules;
mod trade;

pub use config::{BonusCondition, BonusRule, CriterionWeights, EligibilityConfig};
pub use trade::classify_trade;

use super::domain::{MaintenanceVisit, Technician, TechnicianId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless scorer that applies the rubric configuration to a technician.
#[derive(Debug, Clone, Default)]
pub struct EligibilityScorer {
    config: EligibilityConfig,
}

impl EligibilityScorer {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Fit of `technician` for `visit`, in `0..=100`.
    pub fn score(&self, technician: &Technician, visit: &MaintenanceVisit) -> u8 {
        rules::score_technician(technician, visit, &self.config).1
    }

    pub fn evaluate(&self, technician: &Technician, visit: &MaintenanceVisit) -> EligibilityOutcome {
        let (components, score) = rules::score_technician(technician, visit, &self.config);
        debug!(
            technician = %technician.id.0,
            visit = %visit.id.0,
            score,
            "scored technician"
        );

        EligibilityOutcome {
            technician_id: technician.id.clone(),
            score,
            components,
        }
    }

    /// Score every technician, record the score on it, and sort best first.
    ///
    /// The sort is stable, so ties keep their input order.
    pub fn rank_pool(
        &self,
        mut technicians: Vec<Technician>,
        visit: &MaintenanceVisit,
    ) -> Vec<Technician> {
        for technician in &mut technicians {
            technician.match_score = self.score(technician, visit);
        }
        technicians.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        technicians
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityCriterion {
    AircraftType,
    Certification,
    AuthorizationBasis,
    Availability,
    JobTitle,
    Bonus,
}

/// Discrete contribution to a score, so the UI can explain a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub criterion: EligibilityCriterion,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub technician_id: TechnicianId,
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}
