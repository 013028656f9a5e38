use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::config::{RendererKind, TimelineConfig};
use super::grid::DayGrid;
use super::layout::{layout, IntervalSource, PositionedInterval, TimelineInterval};
use crate::workflows::crew::domain::{MaintenanceVisit, Technician};

pub const UNASSIGNED_LANE: &str = "Unassigned";

/// One bar per visit, laned by hangar.
pub fn visit_intervals(visits: &[MaintenanceVisit]) -> Vec<TimelineInterval> {
    visits
        .iter()
        .map(|visit| TimelineInterval {
            owner_id: visit.id.0.clone(),
            lane: visit
                .hangar
                .as_deref()
                .map(str::trim)
                .filter(|hangar| !hangar.is_empty())
                .unwrap_or(UNASSIGNED_LANE)
                .to_string(),
            start: visit.start_date,
            end: visit.end_date,
            label: Some(format!("{} {}", visit.registration, visit.aircraft_name)),
            source: IntervalSource::Recorded,
        })
        .collect()
}

/// One bar per crew member across the visit window, laned by technician.
pub fn crew_intervals(visit: &MaintenanceVisit, crew: &[Technician]) -> Vec<TimelineInterval> {
    crew.iter()
        .map(|tech| TimelineInterval {
            owner_id: visit.id.0.clone(),
            lane: tech.id.0.clone(),
            start: visit.start_date,
            end: visit.end_date,
            label: Some(visit.registration.clone()),
            source: IntervalSource::Recorded,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneRow {
    pub lane: String,
    pub bars: Vec<PositionedInterval>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineLayout {
    pub renderer: RendererKind,
    pub column_width: u32,
    pub grid_width: u32,
    pub days: Vec<NaiveDate>,
    pub lanes: Vec<LaneRow>,
}

/// A day grid bound to one renderer's column width.
#[derive(Debug, Clone)]
pub struct TimelineBoard {
    renderer: RendererKind,
    column_width: u32,
    grid: DayGrid,
}

impl TimelineBoard {
    pub fn new(grid: DayGrid, renderer: RendererKind, config: &TimelineConfig) -> Self {
        Self {
            renderer,
            column_width: config.column_width(renderer),
            grid,
        }
    }

    pub fn grid(&self) -> &DayGrid {
        &self.grid
    }

    pub fn column_width(&self) -> u32 {
        self.column_width
    }

    /// Lay out every lane; lanes come back sorted by key, bars by start date.
    pub fn render(&self, intervals: &[TimelineInterval]) -> TimelineLayout {
        let mut lanes: BTreeMap<&str, Vec<TimelineInterval>> = BTreeMap::new();
        for interval in intervals {
            lanes
                .entry(interval.lane.as_str())
                .or_default()
                .push(interval.clone());
        }

        let lanes = lanes
            .into_iter()
            .map(|(lane, mut bars)| {
                bars.sort_by_key(|bar| bar.start);
                LaneRow {
                    lane: lane.to_string(),
                    bars: layout(&self.grid, &bars, self.column_width),
                }
            })
            .collect();

        TimelineLayout {
            renderer: self.renderer,
            column_width: self.column_width,
            grid_width: self.grid.pixel_width(self.column_width),
            days: self.grid.days().to_vec(),
            lanes,
        }
    }
}
