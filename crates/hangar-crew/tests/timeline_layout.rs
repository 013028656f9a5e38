//! Integration specifications for timeline geometry across the three renderers.

use chrono::NaiveDate;

use hangar_crew::workflows::crew::{MaintenanceVisit, VisitId, VisitStatus};
use hangar_crew::workflows::timeline::{
    layout, merge_with_fallback, visit_intervals, DayGrid, IntervalSource, RendererKind,
    TimelineBoard, TimelineConfig, TimelineError, TimelineInterval,
};

fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, day).expect("valid date")
}

fn interval(lane: &str, start: u32, end: u32, source: IntervalSource) -> TimelineInterval {
    TimelineInterval {
        owner_id: format!("{lane}-{start}"),
        lane: lane.to_string(),
        start: may(start),
        end: may(end),
        label: None,
        source,
    }
}

fn visit(id: &str, hangar: &str, start: u32, end: u32) -> MaintenanceVisit {
    MaintenanceVisit {
        id: VisitId::new(id),
        registration: format!("G-{}", id.to_uppercase()),
        aircraft_name: "AIRBUS 320".to_string(),
        hangar: Some(hangar.to_string()),
        start_date: may(start),
        end_date: may(end),
        status: VisitStatus::Scheduled,
        customer: None,
        check_type: None,
    }
}

#[test]
fn renderers_share_geometry_but_not_widths() {
    let grid = DayGrid::from_range(may(1), may(31)).expect("grid builds");
    let bar = interval("Hangar 1", 1, 10, IntervalSource::Recorded);
    let config = TimelineConfig::default();

    let widths: Vec<(u32, u32)> = RendererKind::ordered()
        .into_iter()
        .map(|kind| {
            let positioned = layout(&grid, std::slice::from_ref(&bar), config.column_width(kind));
            (positioned[0].left, positioned[0].width)
        })
        .collect();

    assert_eq!(widths, vec![(0, 480), (0, 400), (0, 410)]);
}

#[test]
fn bars_starting_before_the_grid_clamp_to_first_column() {
    let grid = DayGrid::from_range(may(10), may(20)).expect("grid builds");
    let early = interval("Hangar 1", 5, 12, IntervalSource::Recorded);

    let positioned = layout(&grid, &[early], 48);
    assert_eq!(positioned[0].start_index, 0);
    assert_eq!(positioned[0].left, 0);
    assert_eq!(positioned[0].span, 8);
}

#[test]
fn inverted_range_is_rejected() {
    let error = DayGrid::from_range(may(10), may(1)).expect_err("inverted range rejected");
    assert!(matches!(error, TimelineError::InvertedRange { .. }));
}

#[test]
fn fallback_intervals_never_overlap_recorded_bars() {
    let recorded = vec![
        interval("Hangar 1", 5, 9, IntervalSource::Recorded),
        interval("Hangar 2", 1, 3, IntervalSource::Recorded),
    ];
    let synthetic = vec![
        interval("Hangar 1", 7, 12, IntervalSource::Synthetic),
        interval("Hangar 1", 20, 25, IntervalSource::Synthetic),
        interval("Hangar 2", 9, 9, IntervalSource::Synthetic),
    ];

    let merged = merge_with_fallback(recorded, synthetic);
    let kept: Vec<(&str, NaiveDate)> = merged
        .iter()
        .map(|bar| (bar.lane.as_str(), bar.start))
        .collect();
    assert_eq!(
        kept,
        vec![
            ("Hangar 1", may(5)),
            ("Hangar 2", may(1)),
            ("Hangar 1", may(20)),
            ("Hangar 2", may(9)),
        ]
    );
    assert_eq!(merged[2].source, IntervalSource::Synthetic);
}

#[test]
fn hangar_board_lays_out_visits_per_hangar() {
    let visits = vec![
        visit("ezta", "Hangar 2", 6, 12),
        visit("ezwx", "Hangar 1", 1, 4),
        visit("ozzz", "Hangar 2", 2, 3),
    ];
    let grid = DayGrid::from_range(may(1), may(14)).expect("grid builds");
    let board = TimelineBoard::new(grid, RendererKind::HangarBoard, &TimelineConfig::default());

    let rendered = board.render(&visit_intervals(&visits));
    assert_eq!(rendered.grid_width, 14 * 48);
    assert_eq!(rendered.days.len(), 14);

    let lanes: Vec<&str> = rendered.lanes.iter().map(|row| row.lane.as_str()).collect();
    assert_eq!(lanes, vec!["Hangar 1", "Hangar 2"]);

    let hangar_two = &rendered.lanes[1].bars;
    assert_eq!(hangar_two[0].interval.owner_id, "ozzz");
    assert_eq!(hangar_two[0].left, 48);
    assert_eq!(hangar_two[1].left, 5 * 48);
    assert_eq!(hangar_two[1].width, 7 * 48);
    assert_eq!(
        hangar_two[1].interval.label.as_deref(),
        Some("G-EZTA AIRBUS 320")
    );
}
