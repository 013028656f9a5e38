use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::TimelineError;

/// Ordered, contiguous run of calendar days backing a timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayGrid {
    days: Vec<NaiveDate>,
}

impl DayGrid {
    /// Every day from `start` to `end`, inclusive.
    pub fn from_range(start: NaiveDate, end: NaiveDate) -> Result<Self, TimelineError> {
        if end < start {
            return Err(TimelineError::InvertedRange { start, end });
        }
        let count = (end - start).num_days() + 1;
        let days = (0..count).map(|offset| start + Duration::days(offset)).collect();
        Ok(Self { days })
    }

    /// Like [`DayGrid::from_range`], refusing ranges longer than `max_days`.
    pub fn bounded(
        start: NaiveDate,
        end: NaiveDate,
        max_days: u32,
    ) -> Result<Self, TimelineError> {
        let days = (end - start).num_days() + 1;
        if days > i64::from(max_days) {
            return Err(TimelineError::RangeTooLong {
                start,
                end,
                days,
                max: max_days,
            });
        }
        Self::from_range(start, end)
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first <= date && date <= last,
            _ => false,
        }
    }

    /// Total pixel width of the visible grid.
    pub fn pixel_width(&self, column_width: u32) -> u32 {
        (self.days.len() as u32).saturating_mul(column_width)
    }
}
