use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::VisitId;
use super::eligibility::EligibilityScorer;
use super::snapshot::VisitSnapshot;
use super::store::AssignmentStore;

/// Token issued when a visit starts loading; snapshots must present it on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotGeneration(pub u64);

/// Holds the store for whichever visit was opened last.
///
/// Loading happens outside the core, so a slow fetch for an earlier visit can
/// arrive after a newer one was requested. Only the snapshot carrying the most
/// recently issued generation is installed.
#[derive(Debug)]
pub struct VisitSession {
    scorer: Arc<EligibilityScorer>,
    issued: u64,
    pending: Option<(SnapshotGeneration, VisitId)>,
    store: Option<(SnapshotGeneration, AssignmentStore)>,
}

impl VisitSession {
    pub fn new(scorer: Arc<EligibilityScorer>) -> Self {
        Self {
            scorer,
            issued: 0,
            pending: None,
            store: None,
        }
    }

    /// Start opening `visit_id`; any earlier outstanding load becomes stale.
    pub fn begin(&mut self, visit_id: VisitId) -> SnapshotGeneration {
        self.issued += 1;
        let generation = SnapshotGeneration(self.issued);
        info!(visit = %visit_id, generation = generation.0, "loading visit snapshot");
        self.pending = Some((generation, visit_id));
        generation
    }

    pub fn install(
        &mut self,
        generation: SnapshotGeneration,
        snapshot: VisitSnapshot,
    ) -> Result<&mut AssignmentStore, SessionError> {
        let current = SnapshotGeneration(self.issued);
        let visit_id = match &self.pending {
            Some((expected, visit_id)) if *expected == generation => visit_id.clone(),
            _ if generation <= current => {
                warn!(
                    generation = generation.0,
                    current = current.0,
                    "discarding stale visit snapshot"
                );
                return Err(SessionError::Stale {
                    generation,
                    current,
                });
            }
            _ => return Err(SessionError::NotLoading { generation }),
        };

        if snapshot.visit.id != visit_id {
            return Err(SessionError::VisitMismatch {
                expected: visit_id,
                received: snapshot.visit.id,
            });
        }

        self.pending = None;
        let store = AssignmentStore::open(snapshot, Arc::clone(&self.scorer));
        let (_, store) = self.store.insert((generation, store));
        Ok(store)
    }

    pub fn generation(&self) -> Option<SnapshotGeneration> {
        self.store.as_ref().map(|(generation, _)| *generation)
    }

    pub fn current(&self) -> Option<&AssignmentStore> {
        self.store.as_ref().map(|(_, store)| store)
    }

    pub fn current_mut(&mut self) -> Option<&mut AssignmentStore> {
        self.store.as_mut().map(|(_, store)| store)
    }

    /// Drop the open visit and forget any outstanding load.
    pub fn close(&mut self) {
        self.pending = None;
        self.store = None;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("snapshot generation {} is stale; generation {} is current", .generation.0, .current.0)]
    Stale {
        generation: SnapshotGeneration,
        current: SnapshotGeneration,
    },
    #[error("snapshot for visit {received} does not match requested visit {expected}")]
    VisitMismatch { expected: VisitId, received: VisitId },
    #[error("no visit is loading; snapshot generation {} was not requested", .generation.0)]
    NotLoading { generation: SnapshotGeneration },
}
