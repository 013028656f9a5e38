use chrono::NaiveDate;
use hangar_crew::workflows::timeline::{RendererKind, TimelineConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) timeline: TimelineConfig,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Accepts "hangar-board", "hangar_board" or "Hangar Board" style names.
pub(crate) fn parse_renderer(raw: &str) -> Result<RendererKind, String> {
    let normalized = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
    RendererKind::ordered()
        .into_iter()
        .find(|kind| kind.label().to_ascii_lowercase() == normalized)
        .ok_or_else(|| format!("unknown renderer '{raw}'"))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}
