//! Day-grid timeline geometry for hangar, calendar, and roster views.

mod board;
mod config;
mod grid;
mod layout;

pub use board::{
    crew_intervals, visit_intervals, LaneRow, TimelineBoard, TimelineLayout, UNASSIGNED_LANE,
};
pub use config::{RendererKind, TimelineConfig, DEFAULT_MAX_VISIBLE_DAYS};
pub use grid::DayGrid;
pub use layout::{layout, merge_with_fallback, IntervalSource, PositionedInterval, TimelineInterval};

use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("timeline range ends ({end}) before it starts ({start})")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("timeline range {start} to {end} spans {days} days; at most {max} are visible")]
    RangeTooLong {
        start: NaiveDate,
        end: NaiveDate,
        days: i64,
        max: u32,
    },
}
