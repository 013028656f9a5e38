use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::crew::eligibility::EligibilityConfig;
use crate::workflows::timeline::{RendererKind, TimelineConfig};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub timeline: TimelineConfig,
    pub scoring: EligibilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let timeline = load_timeline()?;
        let scoring = match env::var("APP_SCORING_RULES") {
            Ok(path) if !path.trim().is_empty() => load_scoring_rules(PathBuf::from(path.trim()))?,
            _ => EligibilityConfig::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            timeline,
            scoring,
        })
    }
}

fn load_timeline() -> Result<TimelineConfig, ConfigError> {
    let mut timeline = TimelineConfig::default();
    for kind in RendererKind::ordered() {
        let var = kind.width_env_var();
        if let Ok(raw) = env::var(var) {
            let width = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|width| *width > 0)
                .ok_or(ConfigError::InvalidColumnWidth { var })?;
            timeline.set_column_width(kind, width);
        }
    }
    if let Ok(raw) = env::var("APP_TIMELINE_MAX_DAYS") {
        timeline.max_visible_days = raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|days| *days > 0)
            .ok_or(ConfigError::InvalidMaxVisibleDays)?;
    }
    Ok(timeline)
}

fn load_scoring_rules(path: PathBuf) -> Result<EligibilityConfig, ConfigError> {
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::ScoringRulesIo {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::ScoringRulesFormat { path, source })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidColumnWidth {
        var: &'static str,
    },
    InvalidMaxVisibleDays,
    ScoringRulesIo {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringRulesFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidColumnWidth { var } => {
                write!(f, "{var} must be a positive pixel width")
            }
            ConfigError::InvalidMaxVisibleDays => {
                write!(f, "APP_TIMELINE_MAX_DAYS must be a positive day count")
            }
            ConfigError::ScoringRulesIo { path, .. } => {
                write!(f, "unable to read scoring rules from {}", path.display())
            }
            ConfigError::ScoringRulesFormat { path, .. } => {
                write!(f, "scoring rules in {} are not valid JSON", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidColumnWidth { .. }
            | ConfigError::InvalidMaxVisibleDays => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::ScoringRulesIo { source, .. } => Some(source),
            ConfigError::ScoringRulesFormat { source, .. } => Some(source),
        }
    }
}
