use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::eligibility::classify_trade;

/// Employee identifier as issued by the workforce roster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TechnicianId(pub String);

impl TechnicianId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TechnicianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for a scheduled maintenance visit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VisitId(pub String);

impl VisitId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Formal qualification linking a technician to an aircraft/engine model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub employee_id: TechnicianId,
    #[serde(default)]
    pub aircraft_model: Option<String>,
    #[serde(default)]
    pub aircraft_type: Option<String>,
    #[serde(default)]
    pub aircraft_type_code: Option<String>,
    #[serde(default)]
    pub engine_model: Option<String>,
    /// Free-form basis code, notably "B1", "B2" or "C".
    #[serde(default)]
    pub basis: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

/// Aircraft reference carried by a certification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertifiedAircraft {
    #[serde(default)]
    pub registration: Option<String>,
    #[serde(default)]
    pub aircraft_type: Option<String>,
    #[serde(default)]
    pub type_code: Option<String>,
}

/// Expirable credential tied to an aircraft or aircraft type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub employee_id: TechnicianId,
    #[serde(default)]
    pub aircraft: Option<CertifiedAircraft>,
    pub code: String,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
}

/// Per-date duty tag ("AV" available, "O" off-duty, and so on).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportRecord {
    pub employee_id: TechnicianId,
    pub date: NaiveDate,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl VisitStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// In-progress and completed visits show their recorded crew instead of proposals.
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }
}

/// A scheduled maintenance event for one aircraft in one hangar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceVisit {
    pub id: VisitId,
    pub registration: String,
    /// Aircraft family or name text, e.g. "AIRBUS 320".
    pub aircraft_name: String,
    #[serde(default)]
    pub hangar: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: VisitStatus,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub check_type: Option<String>,
}

impl MaintenanceVisit {
    /// Inclusive number of days in the visit window, never less than one.
    pub fn duration_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        days.max(1) as u32
    }
}

/// Functional specialization used for team composition and requirement counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trade {
    #[serde(rename = "B1 Tech")]
    B1Tech,
    #[serde(rename = "B2 Tech")]
    B2Tech,
    #[serde(rename = "Base Maintenance")]
    BaseMaintenance,
    #[serde(rename = "STRUC & COMP")]
    StructuresAndComposites,
    #[serde(rename = "PAINT")]
    Paint,
    #[serde(rename = "CABIN")]
    Cabin,
    #[serde(rename = "NDT")]
    Ndt,
    #[serde(rename = "General")]
    General,
}

impl Trade {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::B1Tech,
            Self::B2Tech,
            Self::BaseMaintenance,
            Self::StructuresAndComposites,
            Self::Paint,
            Self::Cabin,
            Self::Ndt,
            Self::General,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::B1Tech => "B1 Tech",
            Self::B2Tech => "B2 Tech",
            Self::BaseMaintenance => "Base Maintenance",
            Self::StructuresAndComposites => "STRUC & COMP",
            Self::Paint => "PAINT",
            Self::Cabin => "CABIN",
            Self::Ndt => "NDT",
            Self::General => "General",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ordered()
            .into_iter()
            .find(|trade| trade.label().eq_ignore_ascii_case(label))
    }
}

/// A technician materialized for one open visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technician {
    pub id: TechnicianId,
    pub name: String,
    pub job_title: String,
    pub trade: Trade,
    #[serde(default)]
    pub authorizations: Vec<Authorization>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub support: Vec<SupportRecord>,
    /// Last computed match score against the open visit.
    #[serde(default)]
    pub match_score: u8,
}

impl Technician {
    pub fn new(
        id: TechnicianId,
        name: impl Into<String>,
        job_title: impl Into<String>,
        authorizations: Vec<Authorization>,
        certifications: Vec<Certification>,
        support: Vec<SupportRecord>,
    ) -> Self {
        let job_title = job_title.into();
        let trade = classify_trade(&job_title, &authorizations);
        Self {
            id,
            name: name.into(),
            job_title,
            trade,
            authorizations,
            certifications,
            support,
            match_score: 0,
        }
    }

    /// Support codes recorded for `date`, in record order.
    pub fn support_codes_on(&self, date: NaiveDate) -> impl Iterator<Item = &str> {
        self.support
            .iter()
            .filter(move |record| record.date == date)
            .map(|record| record.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).expect("valid date")
    }

    #[test]
    fn duration_is_inclusive_and_never_zero() {
        let mut visit = MaintenanceVisit {
            id: VisitId::new("v-1"),
            registration: "G-EZTA".to_string(),
            aircraft_name: "AIRBUS 320".to_string(),
            hangar: None,
            start_date: date(1),
            end_date: date(10),
            status: VisitStatus::Scheduled,
            customer: None,
            check_type: None,
        };
        assert_eq!(visit.duration_days(), 10);

        visit.end_date = date(1);
        assert_eq!(visit.duration_days(), 1);

        visit.end_date = NaiveDate::from_ymd_opt(2025, 4, 28).expect("valid date");
        assert_eq!(visit.duration_days(), 1);
    }

    #[test]
    fn trade_labels_round_trip_through_lookup() {
        for trade in Trade::ordered() {
            assert_eq!(Trade::from_label(trade.label()), Some(trade));
        }
        assert_eq!(Trade::from_label("struc & comp"), Some(Trade::StructuresAndComposites));
        assert_eq!(Trade::from_label("Avionics"), None);
    }

    #[test]
    fn trade_serializes_as_display_label() {
        let json = serde_json::to_string(&Trade::StructuresAndComposites).expect("serializes");
        assert_eq!(json, "\"STRUC & COMP\"");
    }

    #[test]
    fn locked_statuses() {
        assert!(!VisitStatus::Scheduled.is_locked());
        assert!(VisitStatus::InProgress.is_locked());
        assert!(VisitStatus::Completed.is_locked());
    }
}
