use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::grid::DayGrid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalSource {
    #[default]
    Recorded,
    Synthetic,
}

/// Date-ranged bar owned by some entity and drawn in one lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineInterval {
    pub owner_id: String,
    pub lane: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub source: IntervalSource,
}

impl TimelineInterval {
    /// Inclusive on both ends.
    pub fn overlaps(&self, other: &TimelineInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Pixel geometry for one interval; recomputed on every layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionedInterval {
    #[serde(flatten)]
    pub interval: TimelineInterval,
    pub start_index: u32,
    pub span: u32,
    pub left: u32,
    pub width: u32,
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Project intervals onto `grid` columns of `column_width` pixels.
///
/// Starts before the grid clamp to column 0. Nothing is clipped on the right;
/// bars may run past the visible grid. An empty grid has no anchor and yields
/// no geometry.
pub fn layout(
    grid: &DayGrid,
    intervals: &[TimelineInterval],
    column_width: u32,
) -> Vec<PositionedInterval> {
    let Some(first) = grid.first() else {
        return Vec::new();
    };

    intervals
        .iter()
        .map(|interval| {
            let start_index = days_between(first, interval.start).max(0);
            let span = (days_between(interval.start, interval.end) + 1).max(1);
            let start_index = u32::try_from(start_index).unwrap_or(u32::MAX);
            let span = u32::try_from(span).unwrap_or(u32::MAX);
            PositionedInterval {
                interval: interval.clone(),
                start_index,
                span,
                left: start_index.saturating_mul(column_width),
                width: span.saturating_mul(column_width),
            }
        })
        .collect()
}

/// Combine recorded intervals with fallback ones without drawing conflicting bars.
///
/// A synthetic interval is dropped when it overlaps any recorded interval in
/// the same lane; otherwise it is appended after the recorded set.
pub fn merge_with_fallback(
    recorded: Vec<TimelineInterval>,
    synthetic: Vec<TimelineInterval>,
) -> Vec<TimelineInterval> {
    let mut merged: Vec<TimelineInterval> = recorded
        .into_iter()
        .map(|interval| TimelineInterval {
            source: IntervalSource::Recorded,
            ..interval
        })
        .collect();
    let recorded_len = merged.len();

    for candidate in synthetic {
        let conflicts = merged[..recorded_len]
            .iter()
            .any(|existing| existing.lane == candidate.lane && existing.overlaps(&candidate));
        if !conflicts {
            merged.push(TimelineInterval {
                source: IntervalSource::Synthetic,
                ..candidate
            });
        }
    }

    merged
}
