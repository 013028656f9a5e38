use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;

use crate::error::AppError;

use super::domain::TechnicianId;
use super::eligibility::EligibilityScorer;
use super::snapshot::VisitSnapshot;
use super::store::AssignmentStore;
use super::views::VisitMatchSummary;

/// Snapshot plus an optional batch of technicians to assign before summarizing.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    #[serde(flatten)]
    pub snapshot: VisitSnapshot,
    #[serde(default)]
    pub assign: Vec<TechnicianId>,
}

/// Router exposing the stateless matching endpoint.
pub fn crew_router(scorer: Arc<EligibilityScorer>) -> Router {
    Router::new()
        .route("/api/v1/crew/match", post(match_handler))
        .with_state(scorer)
}

pub(crate) async fn match_handler(
    State(scorer): State<Arc<EligibilityScorer>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response {
    let MatchRequest { snapshot, assign } = request;
    let mut store = AssignmentStore::open(snapshot, Arc::clone(&scorer));

    let status_change = if assign.is_empty() {
        None
    } else {
        match store.assign(&assign) {
            Ok(outcome) => outcome.status_change,
            Err(error) => return AppError::from(error).into_response(),
        }
    };

    let summary = VisitMatchSummary::from_store(&store, &scorer, status_change);
    (StatusCode::OK, axum::Json(summary)).into_response()
}
