use serde::{Deserialize, Serialize};

/// Views that draw day-column timelines; each keeps its own column width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    HangarBoard,
    VisitCalendar,
    WorkforceRoster,
}

impl RendererKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::HangarBoard, Self::VisitCalendar, Self::WorkforceRoster]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HangarBoard => "Hangar Board",
            Self::VisitCalendar => "Visit Calendar",
            Self::WorkforceRoster => "Workforce Roster",
        }
    }

    pub const fn width_env_var(self) -> &'static str {
        match self {
            Self::HangarBoard => "APP_TIMELINE_HANGAR_BOARD_WIDTH",
            Self::VisitCalendar => "APP_TIMELINE_VISIT_CALENDAR_WIDTH",
            Self::WorkforceRoster => "APP_TIMELINE_WORKFORCE_ROSTER_WIDTH",
        }
    }

    const fn default_width(self) -> u32 {
        match self {
            Self::HangarBoard => 48,
            Self::VisitCalendar => 40,
            Self::WorkforceRoster => 41,
        }
    }
}

/// Longest visible range a single layout request may ask for.
pub const DEFAULT_MAX_VISIBLE_DAYS: u32 = 731;

/// Pixel width of one day column, per renderer, plus the visible-range cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub hangar_board: u32,
    pub visit_calendar: u32,
    pub workforce_roster: u32,
    pub max_visible_days: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            hangar_board: RendererKind::HangarBoard.default_width(),
            visit_calendar: RendererKind::VisitCalendar.default_width(),
            workforce_roster: RendererKind::WorkforceRoster.default_width(),
            max_visible_days: DEFAULT_MAX_VISIBLE_DAYS,
        }
    }
}

impl TimelineConfig {
    pub fn column_width(&self, kind: RendererKind) -> u32 {
        match kind {
            RendererKind::HangarBoard => self.hangar_board,
            RendererKind::VisitCalendar => self.visit_calendar,
            RendererKind::WorkforceRoster => self.workforce_roster,
        }
    }

    pub fn set_column_width(&mut self, kind: RendererKind, width: u32) {
        match kind {
            RendererKind::HangarBoard => self.hangar_board = width,
            RendererKind::VisitCalendar => self.visit_calendar = width,
            RendererKind::WorkforceRoster => self.workforce_roster = width,
        }
    }
}
