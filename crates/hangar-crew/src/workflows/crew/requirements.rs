use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{MaintenanceVisit, Technician, Trade};

/// Day-shift archetypes used when a visit has no recorded staffing plan.
const SYNTHETIC_TRADES: [(Trade, u32); 5] = [
    (Trade::B1Tech, 3),
    (Trade::B2Tech, 2),
    (Trade::StructuresAndComposites, 1),
    (Trade::Cabin, 1),
    (Trade::General, 1),
];
const SYNTHETIC_MAX_DAYS: u32 = 7;

/// Staffing need for one trade on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementEntry {
    pub date: NaiveDate,
    pub day_required: u32,
    #[serde(default)]
    pub night_required: u32,
    #[serde(default)]
    pub day_assigned: u32,
    /// `None` until night-shift assignments are modelled.
    #[serde(default)]
    pub night_assigned: Option<u32>,
}

impl RequirementEntry {
    pub fn day_status(&self) -> FulfillmentStatus {
        FulfillmentStatus::classify(self.day_assigned, self.day_required)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequirement {
    pub trade: Trade,
    pub entries: Vec<RequirementEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    Fulfilled,
    Partial,
    Unfulfilled,
}

impl FulfillmentStatus {
    pub fn classify(assigned: u32, required: u32) -> Self {
        if assigned >= required {
            Self::Fulfilled
        } else if assigned > 0 {
            Self::Partial
        } else {
            Self::Unfulfilled
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fulfilled => "Fulfilled",
            Self::Partial => "Partial",
            Self::Unfulfilled => "Unfulfilled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementSource {
    Recorded,
    Synthesized,
}

/// Per-trade totals across every date of the visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeRequirementSummary {
    pub trade: Trade,
    pub trade_label: &'static str,
    pub day_required: u32,
    pub day_assigned: u32,
    pub night_required: u32,
    pub status: FulfillmentStatus,
    pub status_label: &'static str,
}

/// Staffing table for one open visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementTable {
    source: RequirementSource,
    rows: Vec<TradeRequirement>,
}

impl RequirementTable {
    /// Use recorded rows when there are any, otherwise synthesize a plan for `visit`.
    pub fn seed(rows: Vec<TradeRequirement>, visit: &MaintenanceVisit) -> Self {
        if rows.is_empty() {
            return Self::synthesize(visit);
        }
        Self {
            source: RequirementSource::Recorded,
            rows,
        }
    }

    pub fn synthesize(visit: &MaintenanceVisit) -> Self {
        let days = visit.duration_days().min(SYNTHETIC_MAX_DAYS);
        warn!(
            visit = %visit.id.0,
            days,
            "no staffing requirements recorded; using synthesized plan"
        );

        let rows = SYNTHETIC_TRADES
            .iter()
            .map(|(trade, day_required)| TradeRequirement {
                trade: *trade,
                entries: (0..days)
                    .map(|offset| RequirementEntry {
                        date: visit.start_date + Duration::days(i64::from(offset)),
                        day_required: *day_required,
                        night_required: 0,
                        day_assigned: 0,
                        night_assigned: None,
                    })
                    .collect(),
            })
            .collect();

        Self {
            source: RequirementSource::Synthesized,
            rows,
        }
    }

    pub fn source(&self) -> RequirementSource {
        self.source
    }

    pub fn rows(&self) -> &[TradeRequirement] {
        &self.rows
    }

    pub fn recompute(&mut self, assigned: &[Technician]) {
        recompute(&mut self.rows, assigned);
    }

    pub fn summary(&self) -> Vec<TradeRequirementSummary> {
        self.rows
            .iter()
            .map(|row| {
                let day_required: u32 = row.entries.iter().map(|entry| entry.day_required).sum();
                let day_assigned: u32 = row.entries.iter().map(|entry| entry.day_assigned).sum();
                let night_required: u32 = row.entries.iter().map(|entry| entry.night_required).sum();
                let status = FulfillmentStatus::classify(day_assigned, day_required);
                TradeRequirementSummary {
                    trade: row.trade,
                    trade_label: row.trade.label(),
                    day_required,
                    day_assigned,
                    night_required,
                    status,
                    status_label: status.label(),
                }
            })
            .collect()
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|row| &row.entries)
            .all(|entry| entry.day_status() == FulfillmentStatus::Fulfilled)
    }
}

/// Refresh assigned counts from the current crew, clamping each date to its requirement.
pub fn recompute(requirements: &mut [TradeRequirement], assigned: &[Technician]) {
    for row in requirements {
        let count = assigned.iter().filter(|tech| tech.trade == row.trade).count() as u32;
        for entry in &mut row.entries {
            entry.day_assigned = count.min(entry.day_required);
            // TODO: count night-shift crew once assignments carry a shift.
            entry.night_assigned = None;
        }
    }
}
