use std::sync::Arc;

use chrono::NaiveDate;

use crate::workflows::crew::domain::{
    Authorization, Certification, CertifiedAircraft, MaintenanceVisit, SupportRecord,
    Technician, TechnicianId, VisitId, VisitStatus,
};
use crate::workflows::crew::eligibility::{EligibilityConfig, EligibilityScorer};
use crate::workflows::crew::snapshot::{TechnicianRecord, VisitSnapshot};

pub(super) fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, day).expect("valid date")
}

pub(super) fn id(value: &str) -> TechnicianId {
    TechnicianId::new(value)
}

pub(super) fn visit() -> MaintenanceVisit {
    MaintenanceVisit {
        id: VisitId::new("visit-100"),
        registration: "G-EZTA".to_string(),
        aircraft_name: "AIRBUS 320".to_string(),
        hangar: Some("Hangar 1".to_string()),
        start_date: may(1),
        end_date: may(10),
        status: VisitStatus::Scheduled,
        customer: Some("Blue Skies".to_string()),
        check_type: Some("C-check".to_string()),
    }
}

pub(super) fn scorer() -> Arc<EligibilityScorer> {
    Arc::new(EligibilityScorer::new(EligibilityConfig::default()))
}

pub(super) fn authorization(
    employee: &str,
    aircraft_type: Option<&str>,
    basis: Option<&str>,
) -> Authorization {
    Authorization {
        employee_id: id(employee),
        aircraft_model: None,
        aircraft_type: aircraft_type.map(str::to_string),
        aircraft_type_code: None,
        engine_model: None,
        basis: basis.map(str::to_string),
        category: None,
        active: true,
        expires_on: Some(NaiveDate::from_ymd_opt(2027, 1, 1).expect("valid date")),
    }
}

pub(super) fn certification(
    employee: &str,
    aircraft_type: &str,
    registration: Option<&str>,
) -> Certification {
    Certification {
        employee_id: id(employee),
        aircraft: Some(CertifiedAircraft {
            registration: registration.map(str::to_string),
            aircraft_type: Some(aircraft_type.to_string()),
            type_code: None,
        }),
        code: "TYPE-RATING".to_string(),
        expires_on: Some(NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid date")),
    }
}

pub(super) fn support(employee: &str, date: NaiveDate, code: &str) -> SupportRecord {
    SupportRecord {
        employee_id: id(employee),
        date,
        code: code.to_string(),
    }
}

pub(super) fn technician(
    employee: &str,
    job_title: &str,
    authorizations: Vec<Authorization>,
    certifications: Vec<Certification>,
    support: Vec<SupportRecord>,
) -> Technician {
    Technician::new(
        id(employee),
        employee.trim_start_matches("t-").to_uppercase(),
        job_title,
        authorizations,
        certifications,
        support,
    )
}

/// Technician matching every criterion against [`visit`].
pub(super) fn ideal_technician() -> Technician {
    technician(
        "t-ana",
        "Senior Technician",
        vec![authorization("t-ana", Some("A320"), Some("B1"))],
        vec![certification("t-ana", "A320", Some("G-EZTA"))],
        vec![support("t-ana", may(1), "AV")],
    )
}

/// Eight technicians scoring 100, 45, 60, 25, 10, 40, 0, 40 in input order.
pub(super) fn snapshot() -> VisitSnapshot {
    let roster = [
        ("t-ana", "Senior Technician"),
        ("t-cai", "Aircraft Mechanic"),
        ("t-ben", "Licensed Engineer"),
        ("t-dee", "Structures Technician"),
        ("t-eli", "Cabin Inspector"),
        ("t-fay", "NDT Inspector"),
        ("t-gus", "Stores Clerk"),
        ("t-hal", "Paint Technician"),
    ];

    let mut fay_auth = authorization("t-fay", None, None);
    fay_auth.aircraft_type_code = Some("A320".to_string());
    let mut hal_auth = authorization("t-hal", None, None);
    hal_auth.aircraft_model = Some("Airbus 320neo".to_string());

    VisitSnapshot {
        visit: visit(),
        technicians: roster
            .iter()
            .map(|(employee, title)| TechnicianRecord {
                id: id(employee),
                name: employee.trim_start_matches("t-").to_uppercase(),
                job_title: title.to_string(),
            })
            .collect(),
        authorizations: vec![
            authorization("t-ana", Some("A320"), Some("B1")),
            authorization("t-ben", Some("A321"), Some("B2")),
            authorization("t-cai", Some("B737"), Some("C")),
            fay_auth,
            hal_auth,
        ],
        certifications: vec![
            certification("t-ana", "A320", Some("G-EZTA")),
            certification("t-dee", "B767", Some("G-OTHR")),
        ],
        support: vec![
            support("t-ana", may(1), "AV"),
            support("t-cai", may(1), "O"),
            support("t-dee", may(1), "AV"),
            support("t-eli", may(2), "AV"),
        ],
        requirements: Vec::new(),
        assigned: Vec::new(),
    }
}

pub(super) fn ids_of(technicians: &[Technician]) -> Vec<&str> {
    technicians.iter().map(|tech| tech.id.as_str()).collect()
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json body")
}
