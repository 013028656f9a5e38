use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{MaintenanceVisit, Technician, TechnicianId, VisitId, VisitStatus};
use super::eligibility::EligibilityScorer;
use super::proposals::{propose, CandidateTeam};
use super::requirements::{RequirementTable, TradeRequirementSummary};
use super::snapshot::VisitSnapshot;

/// Status change the caller must persist; the store never writes it back itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub visit_id: VisitId,
    pub from: VisitStatus,
    pub to: VisitStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub moved: Vec<TechnicianId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_change: Option<StatusTransition>,
}

/// Owns the available/assigned split for one open visit.
#[derive(Debug, Clone)]
pub struct AssignmentStore {
    visit: MaintenanceVisit,
    scorer: Arc<EligibilityScorer>,
    available: Vec<Technician>,
    assigned: Vec<Technician>,
    requirements: RequirementTable,
    transition_signalled: bool,
}

impl AssignmentStore {
    /// Score the snapshot's technicians, place recorded crew, and seed requirements.
    pub fn open(snapshot: VisitSnapshot, scorer: Arc<EligibilityScorer>) -> Self {
        let ranked = scorer.rank_pool(snapshot.technicians(), &snapshot.visit);
        let recorded: HashSet<&TechnicianId> = snapshot.assigned.iter().collect();
        let (assigned, available): (Vec<Technician>, Vec<Technician>) = ranked
            .into_iter()
            .partition(|tech| recorded.contains(&tech.id));

        let mut requirements = RequirementTable::seed(snapshot.requirements, &snapshot.visit);
        requirements.recompute(&assigned);

        info!(
            visit = %snapshot.visit.id,
            status = snapshot.visit.status.label(),
            available = available.len(),
            assigned = assigned.len(),
            "opened visit for crew assignment"
        );

        Self {
            visit: snapshot.visit,
            scorer,
            available,
            assigned,
            requirements,
            transition_signalled: false,
        }
    }

    pub fn visit(&self) -> &MaintenanceVisit {
        &self.visit
    }

    /// Ranked best first.
    pub fn available(&self) -> &[Technician] {
        &self.available
    }

    pub fn assigned(&self) -> &[Technician] {
        &self.assigned
    }

    pub fn requirements(&self) -> &RequirementTable {
        &self.requirements
    }

    pub fn requirement_summary(&self) -> Vec<TradeRequirementSummary> {
        self.requirements.summary()
    }

    pub fn is_locked(&self) -> bool {
        self.visit.status.is_locked()
    }

    /// Candidate teams over the current available pool; empty for locked visits.
    pub fn proposals(&self) -> Vec<CandidateTeam> {
        if self.is_locked() {
            return Vec::new();
        }
        propose(&self.available)
    }

    /// Move technicians from available to assigned. Nothing moves if any id is invalid.
    pub fn assign(&mut self, ids: &[TechnicianId]) -> Result<AssignmentOutcome, AssignmentError> {
        self.ensure_unlocked()?;

        let mut requested: Vec<&TechnicianId> = Vec::new();
        for id in ids {
            if requested.contains(&id) {
                continue;
            }
            if !self.available.iter().any(|tech| &tech.id == id) {
                return Err(if self.assigned.iter().any(|tech| &tech.id == id) {
                    AssignmentError::AlreadyAssigned(id.clone())
                } else {
                    AssignmentError::UnknownTechnician(id.clone())
                });
            }
            requested.push(id);
        }

        let mut moved = Vec::with_capacity(requested.len());
        for id in requested {
            if let Some(position) = self.available.iter().position(|tech| &tech.id == id) {
                let technician = self.available.remove(position);
                moved.push(technician.id.clone());
                self.assigned.push(technician);
            }
        }
        self.requirements.recompute(&self.assigned);

        let status_change = if !moved.is_empty()
            && self.visit.status == VisitStatus::Scheduled
            && !self.transition_signalled
        {
            self.transition_signalled = true;
            Some(StatusTransition {
                visit_id: self.visit.id.clone(),
                from: VisitStatus::Scheduled,
                to: VisitStatus::InProgress,
            })
        } else {
            None
        };

        info!(
            visit = %self.visit.id,
            moved = moved.len(),
            assigned = self.assigned.len(),
            "assigned technicians"
        );

        Ok(AssignmentOutcome {
            moved,
            status_change,
        })
    }

    /// Assign every member of `team` that is still available.
    pub fn assign_team(
        &mut self,
        team: &CandidateTeam,
    ) -> Result<AssignmentOutcome, AssignmentError> {
        let ids: Vec<TechnicianId> = team
            .members
            .iter()
            .filter(|member| self.available.iter().any(|tech| tech.id == member.id))
            .map(|member| member.id.clone())
            .collect();
        self.assign(&ids)
    }

    /// Return a technician to the pool, re-scored against this visit.
    pub fn unassign(&mut self, id: &TechnicianId) -> Result<AssignmentOutcome, AssignmentError> {
        self.ensure_unlocked()?;

        let position = self
            .assigned
            .iter()
            .position(|tech| &tech.id == id)
            .ok_or_else(|| AssignmentError::NotAssigned(id.clone()))?;
        let mut technician = self.assigned.remove(position);
        technician.match_score = self.scorer.score(&technician, &self.visit);

        let slot = self
            .available
            .iter()
            .position(|tech| tech.match_score < technician.match_score)
            .unwrap_or(self.available.len());
        self.available.insert(slot, technician);
        self.requirements.recompute(&self.assigned);

        info!(
            visit = %self.visit.id,
            technician = %id,
            assigned = self.assigned.len(),
            "unassigned technician"
        );

        Ok(AssignmentOutcome {
            moved: vec![id.clone()],
            status_change: None,
        })
    }

    fn ensure_unlocked(&self) -> Result<(), AssignmentError> {
        if self.is_locked() {
            return Err(AssignmentError::Locked {
                status: self.visit.status,
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    #[error("visit is {} and its crew can no longer change", .status.label())]
    Locked { status: VisitStatus },
    #[error("technician {0} is not part of this visit")]
    UnknownTechnician(TechnicianId),
    #[error("technician {0} is already assigned")]
    AlreadyAssigned(TechnicianId),
    #[error("technician {0} is not assigned")]
    NotAssigned(TechnicianId),
}
