//! Technician-to-visit matching: eligibility scoring, crew proposals, staffing
//! requirement tracking, and the per-visit assignment store.

pub mod domain;
pub mod eligibility;
pub mod proposals;
pub mod requirements;
pub mod router;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Authorization, Certification, CertifiedAircraft, MaintenanceVisit, SupportRecord,
    Technician, TechnicianId, Trade, VisitId, VisitStatus,
};
pub use eligibility::{
    BonusCondition, BonusRule, EligibilityConfig, EligibilityCriterion, EligibilityOutcome,
    EligibilityScorer, ScoreComponent,
};
pub use proposals::{propose, CandidateTeam, TeamTier};
pub use requirements::{
    FulfillmentStatus, RequirementEntry, RequirementSource, RequirementTable, TradeRequirement,
    TradeRequirementSummary,
};
pub use router::{crew_router, MatchRequest};
pub use session::{SessionError, SnapshotGeneration, VisitSession};
pub use snapshot::{TechnicianRecord, VisitSnapshot};
pub use store::{AssignmentError, AssignmentOutcome, AssignmentStore, StatusTransition};
pub use views::{CandidateTeamView, RankedTechnicianView, VisitMatchSummary};
