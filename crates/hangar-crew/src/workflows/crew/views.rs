use serde::Serialize;

use super::domain::{Technician, TechnicianId, Trade, VisitId, VisitStatus};
use super::eligibility::{EligibilityScorer, ScoreComponent};
use super::proposals::{CandidateTeam, TeamTier};
use super::requirements::{RequirementSource, TradeRequirementSummary};
use super::store::{AssignmentStore, StatusTransition};

#[derive(Debug, Clone, Serialize)]
pub struct RankedTechnicianView {
    pub id: TechnicianId,
    pub name: String,
    pub job_title: String,
    pub trade: Trade,
    pub trade_label: &'static str,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ScoreComponent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateTeamView {
    pub id: String,
    pub tier: TeamTier,
    pub label: String,
    pub score: u8,
    pub members: Vec<TechnicianId>,
}

impl From<&CandidateTeam> for CandidateTeamView {
    fn from(team: &CandidateTeam) -> Self {
        Self {
            id: team.id.clone(),
            tier: team.tier,
            label: team.label.clone(),
            score: team.score,
            members: team.member_ids(),
        }
    }
}

/// Everything the assignment dialog renders for one visit.
#[derive(Debug, Clone, Serialize)]
pub struct VisitMatchSummary {
    pub visit_id: VisitId,
    pub status: VisitStatus,
    pub status_label: &'static str,
    pub locked: bool,
    pub available: Vec<RankedTechnicianView>,
    pub assigned: Vec<RankedTechnicianView>,
    pub proposals: Vec<CandidateTeamView>,
    pub requirement_source: RequirementSource,
    pub requirements: Vec<TradeRequirementSummary>,
    pub fully_staffed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_change: Option<StatusTransition>,
}

impl VisitMatchSummary {
    pub fn from_store(
        store: &AssignmentStore,
        scorer: &EligibilityScorer,
        status_change: Option<StatusTransition>,
    ) -> Self {
        let visit = store.visit();
        let view = |tech: &Technician| {
            let outcome = scorer.evaluate(tech, visit);
            RankedTechnicianView {
                id: tech.id.clone(),
                name: tech.name.clone(),
                job_title: tech.job_title.clone(),
                trade: tech.trade,
                trade_label: tech.trade.label(),
                score: tech.match_score,
                components: outcome.components,
            }
        };

        Self {
            visit_id: visit.id.clone(),
            status: visit.status,
            status_label: visit.status.label(),
            locked: store.is_locked(),
            available: store.available().iter().map(view).collect(),
            assigned: store.assigned().iter().map(view).collect(),
            proposals: store.proposals().iter().map(CandidateTeamView::from).collect(),
            requirement_source: store.requirements().source(),
            requirements: store.requirement_summary(),
            fully_staffed: store.requirements().is_fully_staffed(),
            status_change,
        }
    }
}
