// Session context: the page, its widget registry, and the active interval.
// Created at load, dropped at unload; pipeline, visibility and theme sync all go through it.

use crate::chart_config::BaseConfig;
use crate::config::AppConfig;
use crate::descriptors;
use crate::error::FetchError;
use crate::models::{IntervalSelection, MetricDescriptor, TimeSeriesResponse};
use crate::page::{Page, RedrawMode, SELECTED_CLASSES, UNSELECTED_CLASSES};
use crate::pipeline::{self, ChartQuery, DEFAULT_LOOKBACK_HOURS};
use crate::registry::WidgetRegistry;
use crate::{theme_sync, visibility};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub default_interval: IntervalSelection,
    pub lookback_hours: u32,
    pub discard_stale_responses: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_interval: IntervalSelection::default(),
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
            discard_stale_responses: false,
        }
    }
}

impl From<&AppConfig> for DashboardSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_interval: config.refresh.default_interval,
            lookback_hours: config.refresh.lookback_hours,
            discard_stale_responses: config.refresh.discard_stale_responses,
        }
    }
}

/// A fetch to run. `generation` increases by one per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRequest {
    pub generation: u64,
    pub query: ChartQuery,
}

/// Result of a fetch, handed back to the dashboard that issued it.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub generation: u64,
    pub interval: IntervalSelection,
    pub result: Result<TimeSeriesResponse, FetchError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Rendered { widgets: usize },
    /// Fetch failed; widgets keep their last data.
    Failed,
    /// Older than an already applied response (stale discard enabled).
    Stale,
}

pub struct Dashboard<P: Page> {
    page: P,
    registry: WidgetRegistry,
    active_interval: IntervalSelection,
    settings: DashboardSettings,
    next_generation: u64,
    applied_generation: Option<u64>,
}

impl<P: Page> Dashboard<P> {
    /// Build the registry from the full descriptor set against `page`.
    pub fn new(page: P, settings: DashboardSettings) -> Self {
        Self::with_descriptors(page, settings, descriptors::all())
    }

    pub fn with_descriptors(
        mut page: P,
        settings: DashboardSettings,
        descriptors: &'static [MetricDescriptor],
    ) -> Self {
        let palette = theme_sync::current_palette(&page);
        let registry =
            WidgetRegistry::initialize(&mut page, descriptors, &BaseConfig::default(), palette);
        Self {
            page,
            registry,
            active_interval: settings.default_interval,
            settings,
            next_generation: 0,
            applied_generation: None,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn active_interval(&self) -> IntervalSelection {
        self.active_interval
    }

    pub fn has_widgets(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn into_page(self) -> P {
        self.page
    }

    /// User picked an interval: remember it, highlight its control, and request a fetch.
    pub fn select_interval(
        &mut self,
        interval: IntervalSelection,
        now: DateTime<Utc>,
    ) -> Option<RefreshRequest> {
        self.active_interval = interval;
        self.highlight_control(interval);
        tracing::info!(interval = %interval, "interval selected");
        self.begin_refresh(now)
    }

    /// Request for the active interval; `None` when no widget is mounted.
    pub fn begin_refresh(&mut self, now: DateTime<Utc>) -> Option<RefreshRequest> {
        if self.registry.is_empty() {
            tracing::debug!("no chart widgets; refresh skipped");
            return None;
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        Some(RefreshRequest {
            generation,
            query: ChartQuery::new(
                now,
                self.settings.lookback_hours,
                self.active_interval,
                self.registry.field_keys(),
            ),
        })
    }

    /// Apply a finished fetch. Failures leave every widget untouched.
    pub fn apply_outcome(&mut self, outcome: RefreshOutcome) -> Applied {
        let RefreshOutcome {
            generation,
            interval,
            result,
        } = outcome;

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    generation,
                    interval = %interval,
                    operation = "fetch_chart",
                    "chart refresh failed; keeping last data"
                );
                return Applied::Failed;
            }
        };

        if self.settings.discard_stale_responses
            && self.applied_generation.is_some_and(|g| generation < g)
        {
            tracing::debug!(generation, interval = %interval, "stale chart response discarded");
            return Applied::Stale;
        }

        if let Err(e) = response.check_alignment(self.registry.field_keys()) {
            tracing::warn!(
                error = %e,
                generation,
                interval = %interval,
                operation = "apply_chart",
                "chart response misaligned; keeping last data"
            );
            return Applied::Failed;
        }

        // Visibility before redraw: hosts skip hidden surfaces.
        let widgets = pipeline::assign_response(&mut self.registry, &response);
        visibility::apply(&mut self.page, &self.registry);
        pipeline::redraw_all(&mut self.registry, RedrawMode::Animated);
        self.applied_generation = Some(
            self.applied_generation
                .map_or(generation, |g| g.max(generation)),
        );
        tracing::debug!(
            generation,
            interval = %interval,
            widgets,
            points = response.labels.len(),
            "chart data applied"
        );
        Applied::Rendered { widgets }
    }

    /// Theme flag changed on the page: restyle chrome of every widget.
    pub fn on_theme_changed(&mut self) -> usize {
        let palette = theme_sync::current_palette(&self.page);
        let restyled = theme_sync::restyle(&mut self.registry, palette);
        tracing::debug!(theme = %self.page.theme(), restyled, "chart theme synchronized");
        restyled
    }

    fn highlight_control(&mut self, interval: IntervalSelection) {
        for token in self.page.interval_controls() {
            if token == interval.token() {
                self.page
                    .restyle_control(&token, &SELECTED_CLASSES, &UNSELECTED_CLASSES);
            } else {
                self.page
                    .restyle_control(&token, &UNSELECTED_CLASSES, &SELECTED_CLASSES);
            }
        }
    }
}
