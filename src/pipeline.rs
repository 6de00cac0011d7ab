// Fetch & transform: query window, display labels, response -> widget series.

use crate::models::{IntervalSelection, TimeSeriesResponse};
use crate::page::RedrawMode;
use crate::registry::WidgetRegistry;
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Hours of history every chart covers, independent of bucket size.
pub const DEFAULT_LOOKBACK_HOURS: u32 = 24;

/// Longest accepted lookback (one leap year).
pub const MAX_LOOKBACK_HOURS: u32 = 24 * 366;

/// One chart request: a fixed lookback window bucketed by `interval`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub interval: IntervalSelection,
    pub fields: Vec<&'static str>,
}

impl ChartQuery {
    /// Window `[now - lookback, now]`, sent as UTC calendar dates.
    /// Lookback is capped at [`MAX_LOOKBACK_HOURS`].
    pub fn new(
        now: DateTime<Utc>,
        lookback_hours: u32,
        interval: IntervalSelection,
        fields: Vec<&'static str>,
    ) -> Self {
        let lookback = Duration::hours(i64::from(lookback_hours.min(MAX_LOOKBACK_HOURS)));
        let from = now.checked_sub_signed(lookback).unwrap_or(now);
        Self {
            from: from.date_naive(),
            to: now.date_naive(),
            interval,
            fields,
        }
    }

    /// Query string pairs in wire order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("from", self.from.format("%Y-%m-%d").to_string()),
            ("to", self.to.format("%Y-%m-%d").to_string()),
            ("interval", self.interval.token().to_string()),
            ("fields", self.fields.join(",")),
        ]
    }
}

/// Time-of-day part of `"YYYY-MM-DD HH:MM"`; labels without a space pass through unchanged.
pub fn display_label(label: &str) -> String {
    match label.split(' ').nth(1) {
        Some(time) => time.to_string(),
        None => label.to_string(),
    }
}

pub fn display_labels(labels: &[String]) -> Vec<String> {
    labels.iter().map(|l| display_label(l)).collect()
}

/// Push a response into every live widget and request an animated redraw.
/// Returns the number of widgets updated.
pub fn apply_response(registry: &mut WidgetRegistry, response: &TimeSeriesResponse) -> usize {
    let updated = assign_response(registry, response);
    redraw_all(registry, RedrawMode::Animated);
    updated
}

/// Replace labels and series of every live widget without drawing.
pub fn assign_response(registry: &mut WidgetRegistry, response: &TimeSeriesResponse) -> usize {
    let labels = display_labels(&response.labels);
    let mut updated = 0;

    for widget in registry.iter_mut() {
        let descriptor = widget.descriptor();
        if !response.datasets.contains_key(descriptor.primary.metric_key) {
            tracing::debug!(
                metric = %descriptor.id,
                key = descriptor.primary.metric_key,
                "dataset missing from response; rendering empty series"
            );
        }
        let primary = response.series(descriptor.primary.metric_key);
        let secondary = descriptor.secondary.map(|s| response.series(s.metric_key));
        widget.set_data(labels.clone(), primary, secondary);
        updated += 1;
    }

    updated
}

pub fn redraw_all(registry: &mut WidgetRegistry, mode: RedrawMode) {
    for widget in registry.iter_mut() {
        widget.redraw(mode);
    }
}
