//! End-to-end scenarios for opening a visit, ranking technicians, proposing
//! teams, and assigning crew through the public matching API.

mod common {
    use std::sync::Arc;

    use serde_json::json;

    use hangar_crew::workflows::crew::{EligibilityConfig, EligibilityScorer, VisitSnapshot};

    pub(super) fn scorer() -> Arc<EligibilityScorer> {
        Arc::new(EligibilityScorer::new(EligibilityConfig::default()))
    }

    /// Ten-person roster for a narrowbody C-check; scores descend with the index.
    pub(super) fn snapshot() -> VisitSnapshot {
        serde_json::from_value(json!({
            "visit": {
                "id": "visit-a320-c",
                "registration": "G-EZWX",
                "aircraft_name": "AIRBUS 320",
                "hangar": "Hangar 3",
                "start_date": "2025-06-02",
                "end_date": "2025-06-12",
                "status": "scheduled",
                "check_type": "C-check"
            },
            "technicians": [
                { "id": "e-01", "name": "Priya", "job_title": "Senior Technician" },
                { "id": "e-02", "name": "Tom", "job_title": "Licensed Engineer" },
                { "id": "e-03", "name": "Marta", "job_title": "Avionics Engineer" },
                { "id": "e-04", "name": "Kofi", "job_title": "Aircraft Mechanic" },
                { "id": "e-05", "name": "Lena", "job_title": "Structures Technician" },
                { "id": "e-06", "name": "Ravi", "job_title": "Cabin Technician" },
                { "id": "e-07", "name": "Joe", "job_title": "Composite Technician" },
                { "id": "e-08", "name": "Ines", "job_title": "NDT Inspector" },
                { "id": "e-09", "name": "Sam", "job_title": "Paint Sprayer" },
                { "id": "e-10", "name": "Alex", "job_title": "Stores Clerk" }
            ],
            "authorizations": [
                { "employee_id": "e-01", "aircraft_type": "A320", "basis": "B1" },
                { "employee_id": "e-02", "aircraft_type": "A321", "basis": "B1" },
                { "employee_id": "e-03", "aircraft_type_code": "A20N", "basis": "B2" },
                { "employee_id": "e-04", "aircraft_type": "B737", "category": "C" }
            ],
            "certifications": [
                { "employee_id": "e-01", "code": "TR", "aircraft": { "registration": "G-EZWX" } },
                { "employee_id": "e-02", "code": "TR", "aircraft": { "aircraft_type": "Airbus 320 family" } }
            ],
            "support": [
                { "employee_id": "e-01", "date": "2025-06-02", "code": "AV" },
                { "employee_id": "e-02", "date": "2025-06-02", "code": "AV" },
                { "employee_id": "e-04", "date": "2025-06-02", "code": "AV" },
                { "employee_id": "e-05", "date": "2025-06-02", "code": "O" },
                { "employee_id": "e-06", "date": "2025-06-02", "code": "AV" },
                { "employee_id": "e-07", "date": "2025-06-03", "code": "AV" }
            ]
        }))
        .expect("snapshot parses")
    }
}

use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use hangar_crew::workflows::crew::{
    crew_router, AssignmentError, AssignmentStore, FulfillmentStatus, SessionError, TeamTier,
    TechnicianId, Trade, VisitId, VisitSession, VisitStatus,
};

use common::*;

fn ids(values: &[&str]) -> Vec<TechnicianId> {
    values.iter().map(|value| TechnicianId::new(*value)).collect()
}

#[test]
fn ranking_follows_rubric() {
    let store = AssignmentStore::open(snapshot(), scorer());
    let ranked: Vec<(&str, u8)> = store
        .available()
        .iter()
        .map(|tech| (tech.id.as_str(), tech.match_score))
        .collect();

    assert_eq!(
        ranked,
        vec![
            ("e-01", 100),
            ("e-02", 100),
            ("e-03", 60),
            ("e-04", 45),
            ("e-05", 25),
            ("e-06", 25),
            ("e-07", 10),
            ("e-08", 10),
            ("e-09", 0),
            ("e-10", 0),
        ]
    );
    let trades: Vec<Trade> = store.available().iter().map(|tech| tech.trade).collect();
    assert_eq!(trades[0], Trade::B1Tech);
    assert_eq!(trades[2], Trade::B2Tech);
    assert_eq!(trades[3], Trade::BaseMaintenance);
}

#[test]
fn proposals_follow_tier_rules_for_six_qualified() {
    let store = AssignmentStore::open(snapshot(), scorer());
    let proposals = store.proposals();

    assert_eq!(proposals.len(), 3);
    assert_eq!(proposals[0].tier, TeamTier::HighPerformance);
    assert_eq!(
        proposals[0].member_ids(),
        ids(&["e-01", "e-02", "e-03", "e-04", "e-05", "e-06"])
    );
    assert_eq!(proposals[0].score, 60);

    assert_eq!(proposals[1].tier, TeamTier::Standard);
    assert_eq!(
        proposals[1].member_ids(),
        ids(&["e-03", "e-04", "e-05", "e-06", "e-01", "e-02"])
    );

    assert_eq!(proposals[2].tier, TeamTier::Training);
    assert_eq!(
        proposals[2].member_ids(),
        ids(&["e-01", "e-02", "e-04", "e-05", "e-06", "e-03"])
    );
    for team in &proposals {
        assert!((60..=98).contains(&team.score));
    }
}

#[test]
fn assigning_a_proposal_staffs_the_visit() {
    let mut store = AssignmentStore::open(snapshot(), scorer());
    let team = store.proposals().remove(0);

    let outcome = store.assign_team(&team).expect("team assigned");
    let change = outcome.status_change.expect("first assignment signals");
    assert_eq!(change.to, VisitStatus::InProgress);
    assert_eq!(store.assigned().len(), 6);

    let summary = store.requirement_summary();
    let b1 = summary
        .iter()
        .find(|row| row.trade == Trade::B1Tech)
        .expect("B1 row");
    assert_eq!(b1.status, FulfillmentStatus::Partial);
    let structures = summary
        .iter()
        .find(|row| row.trade == Trade::StructuresAndComposites)
        .expect("structures row");
    assert_eq!(structures.status, FulfillmentStatus::Fulfilled);
    let general = summary
        .iter()
        .find(|row| row.trade == Trade::General)
        .expect("general row");
    assert_eq!(general.status, FulfillmentStatus::Unfulfilled);

    // Four technicians remain, too few for any proposal.
    assert!(store.proposals().is_empty());
}

#[test]
fn stale_session_load_never_replaces_current_visit() {
    let mut session = VisitSession::new(scorer());
    let slow = session.begin(VisitId::new("visit-a320-c"));
    let fast = session.begin(VisitId::new("visit-a320-c"));

    session
        .install(fast, snapshot())
        .expect("latest snapshot installs");
    session
        .current_mut()
        .expect("store open")
        .assign(&ids(&["e-01"]))
        .expect("assign succeeds");

    let stale = session.install(slow, snapshot());
    assert!(matches!(stale, Err(SessionError::Stale { .. })));
    let store = session.current().expect("store still open");
    assert_eq!(store.assigned().len(), 1);

    let mut locked = snapshot();
    locked.visit.status = VisitStatus::InProgress;
    let generation = session.begin(VisitId::new("visit-a320-c"));
    let store = session.install(generation, locked).expect("installs");
    assert!(matches!(
        store.assign(&ids(&["e-02"])),
        Err(AssignmentError::Locked { .. })
    ));
}

#[tokio::test]
async fn match_route_serves_ranked_summary() {
    let mut payload = serde_json::to_value(snapshot()).expect("serializes");
    payload["assign"] = serde_json::json!(["e-02"]);

    let response = crew_router(scorer())
        .oneshot(
            Request::post("/api/v1/crew/match")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&payload).expect("serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    let summary: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(summary["assigned"][0]["id"], "e-02");
    assert_eq!(summary["available"][0]["id"], "e-01");
    assert_eq!(summary["status_change"]["from"], "scheduled");
    assert_eq!(summary["fully_staffed"], false);
}
