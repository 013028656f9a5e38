use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::domain::{
    Authorization, Certification, MaintenanceVisit, SupportRecord, Technician, TechnicianId,
};
use super::requirements::TradeRequirement;

/// Roster row as fetched by the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianRecord {
    pub id: TechnicianId,
    pub name: String,
    #[serde(default)]
    pub job_title: String,
}

/// Everything fetched for one visit-open event, handed to the core in one piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitSnapshot {
    pub visit: MaintenanceVisit,
    pub technicians: Vec<TechnicianRecord>,
    #[serde(default)]
    pub authorizations: Vec<Authorization>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub support: Vec<SupportRecord>,
    #[serde(default)]
    pub requirements: Vec<TradeRequirement>,
    /// Crew already recorded against the visit.
    #[serde(default)]
    pub assigned: Vec<TechnicianId>,
}

impl VisitSnapshot {
    /// Join credential and support rows onto roster rows by employee id.
    ///
    /// Rows that reference an unknown employee are ignored; technicians with no
    /// rows simply carry empty collections.
    pub fn technicians(&self) -> Vec<Technician> {
        let mut authorizations = group_by_employee(&self.authorizations, |row| &row.employee_id);
        let mut certifications = group_by_employee(&self.certifications, |row| &row.employee_id);
        let mut support = group_by_employee(&self.support, |row| &row.employee_id);

        self.technicians
            .iter()
            .map(|record| {
                Technician::new(
                    record.id.clone(),
                    record.name.clone(),
                    record.job_title.clone(),
                    authorizations.remove(&record.id).unwrap_or_default(),
                    certifications.remove(&record.id).unwrap_or_default(),
                    support.remove(&record.id).unwrap_or_default(),
                )
            })
            .collect()
    }
}

fn group_by_employee<'a, T: Clone>(
    rows: &'a [T],
    key: impl Fn(&'a T) -> &'a TechnicianId,
) -> HashMap<&'a TechnicianId, Vec<T>> {
    let mut grouped: HashMap<&TechnicianId, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(key(row)).or_default().push(row.clone());
    }
    grouped
}
