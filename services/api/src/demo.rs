use crate::infra::{parse_date, parse_renderer};
use crate::routes::{build_timeline, TimelineSchedule};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use hangar_crew::config::AppConfig;
use hangar_crew::error::AppError;
use hangar_crew::workflows::crew::{
    Authorization, Certification, CertifiedAircraft, EligibilityScorer, MaintenanceVisit,
    RequirementSource, SupportRecord, TechnicianId, TechnicianRecord, VisitId, VisitMatchSummary,
    VisitSession, VisitSnapshot, VisitStatus,
};
use hangar_crew::workflows::timeline::{crew_intervals, RendererKind, TimelineLayout};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CrewMatchArgs {
    /// Visit snapshot JSON: visit, roster, credentials, support codes and requirements
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Technician id to assign before reporting (repeat for a batch)
    #[arg(long = "assign")]
    pub(crate) assign: Vec<String>,
    /// Print the summary as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TimelineLayoutArgs {
    /// First visible day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: NaiveDate,
    /// Last visible day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: NaiveDate,
    /// hangar-board, visit-calendar or workforce-roster
    #[arg(long, value_parser = parse_renderer, default_value = "hangar-board")]
    pub(crate) renderer: RendererKind,
    /// Schedule JSON with `visits`, `intervals` and `fallback` arrays
    #[arg(long)]
    pub(crate) schedule: Option<PathBuf>,
    /// Print the layout as JSON instead of a text chart
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Start date of the demo visit (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Skip the timeline portion of the demo.
    #[arg(long)]
    pub(crate) skip_timeline: bool,
}

pub(crate) fn run_crew_match(args: CrewMatchArgs) -> Result<(), AppError> {
    let CrewMatchArgs {
        snapshot,
        assign,
        json,
    } = args;

    let config = AppConfig::load()?;
    let scorer = Arc::new(EligibilityScorer::new(config.scoring));
    let snapshot: VisitSnapshot = serde_json::from_str(&fs::read_to_string(snapshot)?)?;

    let mut session = VisitSession::new(Arc::clone(&scorer));
    let generation = session.begin(snapshot.visit.id.clone());
    let store = session.install(generation, snapshot)?;

    let ids: Vec<TechnicianId> = assign.into_iter().map(TechnicianId::new).collect();
    let status_change = if ids.is_empty() {
        None
    } else {
        store.assign(&ids)?.status_change
    };

    let summary = VisitMatchSummary::from_store(store, &scorer, status_change);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        render_match_summary(&summary);
    }
    Ok(())
}

pub(crate) fn run_timeline_layout(args: TimelineLayoutArgs) -> Result<(), AppError> {
    let TimelineLayoutArgs {
        start,
        end,
        renderer,
        schedule,
        json,
    } = args;

    let config = AppConfig::load()?;
    let schedule: TimelineSchedule = match schedule {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => TimelineSchedule::default(),
    };

    let layout = build_timeline(start, end, renderer, schedule, &config.timeline)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        render_timeline(&layout);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        start,
        skip_timeline,
    } = args;

    let start = start.unwrap_or_else(|| Local::now().date_naive());
    let config = AppConfig::load()?;
    let scorer = Arc::new(EligibilityScorer::new(config.scoring.clone()));

    println!("Hangar crew matching demo");

    // Two loads race; the one for the visit opened first resolves last.
    let mut session = VisitSession::new(Arc::clone(&scorer));
    let superseded = session.begin(VisitId::new("visit-ezwx"));
    let current = session.begin(VisitId::new("visit-ezta"));
    if let Err(err) = session.install(superseded, demo_snapshot(start)) {
        println!("Discarded late snapshot: {err}");
    }
    let store = session.install(current, demo_snapshot(start))?;

    render_match_summary(&VisitMatchSummary::from_store(store, &scorer, None));

    let Some(team) = store.proposals().into_iter().next() else {
        println!("\nNo crew proposals available for this pool");
        return Ok(());
    };
    println!("\nAssigning {} ({} members)", team.label, team.members.len());
    let outcome = store.assign_team(&team)?;
    render_match_summary(&VisitMatchSummary::from_store(
        store,
        &scorer,
        outcome.status_change,
    ));

    if skip_timeline {
        return Ok(());
    }

    let visit = store.visit().clone();
    let window_end = start + Duration::days(20);
    let visits = vec![
        visit.clone(),
        demo_visit(
            "visit-ezwx",
            "G-EZWX",
            "AIRBUS 321",
            "Hangar 2",
            start + Duration::days(3),
            6,
        ),
        demo_visit(
            "visit-ozzb",
            "G-OZZB",
            "BOEING 737",
            "Hangar 1",
            start + Duration::days(14),
            4,
        ),
    ];
    let hangar_board = build_timeline(
        start,
        window_end,
        RendererKind::HangarBoard,
        TimelineSchedule {
            visits,
            ..TimelineSchedule::default()
        },
        &config.timeline,
    )?;
    render_timeline(&hangar_board);

    let roster = build_timeline(
        start,
        window_end,
        RendererKind::WorkforceRoster,
        TimelineSchedule {
            intervals: crew_intervals(&visit, store.assigned()),
            ..TimelineSchedule::default()
        },
        &config.timeline,
    )?;
    render_timeline(&roster);

    Ok(())
}

pub(crate) fn render_match_summary(summary: &VisitMatchSummary) {
    println!(
        "\nVisit {} ({}{})",
        summary.visit_id,
        summary.status_label,
        if summary.locked { ", crew locked" } else { "" }
    );

    if !summary.assigned.is_empty() {
        println!("Assigned crew");
        for tech in &summary.assigned {
            println!(
                "- {} {} [{}] score {}",
                tech.id, tech.name, tech.trade_label, tech.score
            );
        }
    }

    println!("Available technicians (best first)");
    for tech in &summary.available {
        let reasons: Vec<&str> = tech
            .components
            .iter()
            .map(|component| component.notes.as_str())
            .collect();
        println!(
            "- {} {} [{}] score {}{}",
            tech.id,
            tech.name,
            tech.trade_label,
            tech.score,
            if reasons.is_empty() {
                String::new()
            } else {
                format!(": {}", reasons.join("; "))
            }
        );
    }

    if summary.proposals.is_empty() {
        println!("Crew proposals: none");
    } else {
        println!("Crew proposals");
        for team in &summary.proposals {
            let members: Vec<&str> = team.members.iter().map(TechnicianId::as_str).collect();
            println!(
                "- {} (score {}): {}",
                team.label,
                team.score,
                members.join(", ")
            );
        }
    }

    println!(
        "Staffing requirements ({})",
        match summary.requirement_source {
            RequirementSource::Recorded => "recorded",
            RequirementSource::Synthesized => "synthesized",
        }
    );
    for row in &summary.requirements {
        println!(
            "- {}: {}/{} day shifts ({})",
            row.trade_label, row.day_assigned, row.day_required, row.status_label
        );
    }

    if let Some(change) = &summary.status_change {
        println!(
            "Status change to persist: {} -> {}",
            change.from.label(),
            change.to.label()
        );
    }
}

pub(crate) fn render_timeline(layout: &TimelineLayout) {
    println!(
        "\n{} ({} days, {}px columns, {}px wide)",
        layout.renderer.label(),
        layout.days.len(),
        layout.column_width,
        layout.grid_width
    );
    let (Some(first), Some(last)) = (layout.days.first(), layout.days.last()) else {
        println!("(empty range)");
        return;
    };
    println!("{:<14}{} .. {}", "", first, last);

    let columns = layout.days.len();
    for lane in &layout.lanes {
        let mut row = vec!['.'; columns];
        for bar in &lane.bars {
            let start = bar.start_index as usize;
            let end = start.saturating_add(bar.span as usize).min(columns);
            for cell in row.iter_mut().take(end).skip(start) {
                *cell = '#';
            }
        }
        let labels: Vec<&str> = lane
            .bars
            .iter()
            .filter_map(|bar| bar.interval.label.as_deref())
            .collect();
        println!(
            "{:<14}{} {}",
            lane.lane,
            row.into_iter().collect::<String>(),
            labels.join(", ")
        );
    }
}

fn demo_visit(
    id: &str,
    registration: &str,
    aircraft: &str,
    hangar: &str,
    start: NaiveDate,
    days: i64,
) -> MaintenanceVisit {
    MaintenanceVisit {
        id: VisitId::new(id),
        registration: registration.to_string(),
        aircraft_name: aircraft.to_string(),
        hangar: Some(hangar.to_string()),
        start_date: start,
        end_date: start + Duration::days(days - 1),
        status: VisitStatus::Scheduled,
        customer: Some("Demo Airways".to_string()),
        check_type: Some("C-check".to_string()),
    }
}

fn demo_authorization(employee: &str, aircraft_type: &str, basis: Option<&str>) -> Authorization {
    Authorization {
        employee_id: TechnicianId::new(employee),
        aircraft_model: None,
        aircraft_type: Some(aircraft_type.to_string()),
        aircraft_type_code: None,
        engine_model: None,
        basis: basis.map(str::to_string),
        category: None,
        active: true,
        expires_on: None,
    }
}

fn demo_snapshot(start: NaiveDate) -> VisitSnapshot {
    let roster = [
        ("d-01", "Ana Ruiz", "Senior Technician"),
        ("d-02", "Ben Okafor", "Licensed Engineer"),
        ("d-03", "Cai Wen", "Avionics Engineer"),
        ("d-04", "Dee Marsh", "Aircraft Mechanic"),
        ("d-05", "Eli Stone", "Structures Technician"),
        ("d-06", "Fay Lund", "Cabin Technician"),
        ("d-07", "Gus Hale", "Composite Technician"),
        ("d-08", "Hal Ives", "NDT Inspector"),
        ("d-09", "Ivy Nash", "Stores Clerk"),
    ];

    let support = ["d-01", "d-02", "d-04", "d-05", "d-06"]
        .into_iter()
        .map(|employee| SupportRecord {
            employee_id: TechnicianId::new(employee),
            date: start,
            code: "AV".to_string(),
        })
        .collect();

    VisitSnapshot {
        visit: demo_visit("visit-ezta", "G-EZTA", "AIRBUS 320", "Hangar 1", start, 10),
        technicians: roster
            .iter()
            .map(|(id, name, title)| TechnicianRecord {
                id: TechnicianId::new(*id),
                name: name.to_string(),
                job_title: title.to_string(),
            })
            .collect(),
        authorizations: vec![
            demo_authorization("d-01", "A320", Some("B1")),
            demo_authorization("d-02", "A321", Some("B1")),
            demo_authorization("d-03", "A20N", Some("B2")),
            demo_authorization("d-04", "B737", Some("C")),
        ],
        certifications: vec![Certification {
            employee_id: TechnicianId::new("d-01"),
            aircraft: Some(CertifiedAircraft {
                registration: Some("G-EZTA".to_string()),
                aircraft_type: Some("A320".to_string()),
                type_code: None,
            }),
            code: "TYPE-RATING".to_string(),
            expires_on: None,
        }],
        support,
        requirements: Vec::new(),
        assigned: Vec::new(),
    }
}
