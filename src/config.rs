use crate::descriptors::{self, NO_RAIN_PLACEHOLDER};
use crate::models::{IntervalSelection, Theme};
use crate::pipeline::{DEFAULT_LOOKBACK_HOURS, MAX_LOOKBACK_HOURS};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Metrics API root, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Unset: no explicit deadline beyond the transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_cadence_secs")]
    pub cadence_secs: u64,
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: u32,
    #[serde(default)]
    pub default_interval: IntervalSelection,
    /// Drop responses older than the last one applied instead of letting the last arrival win.
    #[serde(default)]
    pub discard_stale_responses: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            cadence_secs: default_cadence_secs(),
            lookback_hours: default_lookback_hours(),
            default_interval: IntervalSelection::default(),
            discard_stale_responses: false,
        }
    }
}

fn default_cadence_secs() -> u64 {
    300
}

fn default_lookback_hours() -> u32 {
    DEFAULT_LOOKBACK_HOURS
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub theme: Theme,
    /// Elements present on the host page (chart mounts and placeholders).
    #[serde(default = "default_mount_points")]
    pub mount_points: Vec<String>,
    /// `data-interval` tokens of the selector controls, in page order.
    #[serde(default = "default_interval_controls")]
    pub interval_controls: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            mount_points: default_mount_points(),
            interval_controls: default_interval_controls(),
        }
    }
}

fn default_mount_points() -> Vec<String> {
    descriptors::all()
        .iter()
        .map(|d| d.mount_point_id.to_string())
        .chain(std::iter::once(NO_RAIN_PLACEHOLDER.to_string()))
        .collect()
}

fn default_interval_controls() -> Vec<String> {
    IntervalSelection::ALL
        .iter()
        .map(|i| i.token().to_string())
        .collect()
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading config file {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.api.base_url.trim();
        anyhow::ensure!(!base_url.is_empty(), "api.base_url must be non-empty");
        anyhow::ensure!(
            base_url.starts_with("http://") || base_url.starts_with("https://"),
            "api.base_url must start with http:// or https://, got {}",
            base_url
        );
        if let Some(secs) = self.api.request_timeout_secs {
            anyhow::ensure!(
                secs > 0,
                "api.request_timeout_secs must be > 0 when set, got {}",
                secs
            );
        }
        anyhow::ensure!(
            self.refresh.cadence_secs > 0,
            "refresh.cadence_secs must be > 0, got {}",
            self.refresh.cadence_secs
        );
        anyhow::ensure!(
            self.refresh.lookback_hours > 0,
            "refresh.lookback_hours must be > 0, got {}",
            self.refresh.lookback_hours
        );
        anyhow::ensure!(
            self.refresh.lookback_hours <= MAX_LOOKBACK_HOURS,
            "refresh.lookback_hours must be <= {}, got {}",
            MAX_LOOKBACK_HOURS,
            self.refresh.lookback_hours
        );
        anyhow::ensure!(
            self.dashboard.mount_points.iter().all(|m| !m.trim().is_empty()),
            "dashboard.mount_points must not contain empty ids"
        );
        for token in &self.dashboard.interval_controls {
            anyhow::ensure!(
                IntervalSelection::from_token(token).is_some(),
                "dashboard.interval_controls contains unknown token {:?}",
                token
            );
        }
        Ok(())
    }
}
