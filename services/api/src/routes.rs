use crate::infra::{deserialize_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use hangar_crew::error::AppError;
use hangar_crew::workflows::crew::{crew_router, EligibilityScorer, MaintenanceVisit};
use hangar_crew::workflows::timeline::{
    merge_with_fallback, visit_intervals, DayGrid, RendererKind, TimelineBoard, TimelineConfig,
    TimelineInterval, TimelineLayout,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Bars to draw: visits become hangar-laned bars, `intervals` are drawn as
/// given, and `fallback` bars fill in wherever they do not collide.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TimelineSchedule {
    #[serde(default)]
    pub(crate) visits: Vec<MaintenanceVisit>,
    #[serde(default)]
    pub(crate) intervals: Vec<TimelineInterval>,
    #[serde(default)]
    pub(crate) fallback: Vec<TimelineInterval>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimelineLayoutRequest {
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) start: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) end: NaiveDate,
    #[serde(default = "default_renderer")]
    pub(crate) renderer: RendererKind,
    #[serde(flatten)]
    pub(crate) schedule: TimelineSchedule,
}

fn default_renderer() -> RendererKind {
    RendererKind::HangarBoard
}

pub(crate) fn with_service_routes(scorer: Arc<EligibilityScorer>) -> axum::Router {
    crew_router(scorer)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/timeline/layout",
            axum::routing::post(timeline_layout_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn timeline_layout_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<TimelineLayoutRequest>,
) -> Result<Json<TimelineLayout>, AppError> {
    let TimelineLayoutRequest {
        start,
        end,
        renderer,
        schedule,
    } = payload;

    let layout = build_timeline(start, end, renderer, schedule, &state.timeline)?;
    Ok(Json(layout))
}

pub(crate) fn build_timeline(
    start: NaiveDate,
    end: NaiveDate,
    renderer: RendererKind,
    schedule: TimelineSchedule,
    config: &TimelineConfig,
) -> Result<TimelineLayout, AppError> {
    let grid = DayGrid::bounded(start, end, config.max_visible_days)?;
    let TimelineSchedule {
        visits,
        intervals,
        fallback,
    } = schedule;

    let mut recorded = visit_intervals(&visits);
    recorded.extend(intervals);
    let merged = merge_with_fallback(recorded, fallback);

    Ok(TimelineBoard::new(grid, renderer, config).render(&merged))
}
