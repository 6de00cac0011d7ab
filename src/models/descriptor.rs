// Per-metric display configuration (static, one per chart panel)

use std::fmt;

/// Formats one raw sample for display, unit suffix included.
pub type ValueFormatter = fn(f64) -> String;

/// Chart panels, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricId {
    Temperature,
    Humidity,
    Pressure,
    Wind,
    Solar,
    Rain,
}

impl MetricId {
    pub const ALL: [MetricId; 6] = [
        MetricId::Temperature,
        MetricId::Humidity,
        MetricId::Pressure,
        MetricId::Wind,
        MetricId::Solar,
        MetricId::Rain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricId::Temperature => "temp",
            MetricId::Humidity => "humidity",
            MetricId::Pressure => "pressure",
            MetricId::Wind => "wind",
            MetricId::Solar => "solar",
            MetricId::Rain => "rain",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// Optional y-axis bounds; `None` lets the backend auto-scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ScaleBounds {
    pub const AUTO: ScaleBounds = ScaleBounds {
        min: None,
        max: None,
    };

    pub const fn from_zero() -> Self {
        ScaleBounds {
            min: Some(0.0),
            max: None,
        }
    }

    pub const fn between(min: f64, max: f64) -> Self {
        ScaleBounds {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// One plotted series. Brand colors are theme-invariant.
#[derive(Debug, Clone, Copy)]
pub struct SeriesDescriptor {
    /// Dataset key in the chart response and the `fields` query list.
    pub metric_key: &'static str,
    pub display_label: &'static str,
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill: bool,
    pub line_style: LineStyle,
    pub unit: &'static str,
    /// Tooltip value text.
    pub value_formatter: ValueFormatter,
}

impl SeriesDescriptor {
    /// `"<label>: <formatted value>"`, as shown in the hover tooltip.
    pub fn tooltip_text(&self, value: f64) -> String {
        format!("{}: {}", self.display_label, (self.value_formatter)(value))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDescriptor {
    pub id: MetricId,
    /// Host element the widget attaches to. Absent mount = panel not deployed.
    pub mount_point_id: &'static str,
    pub kind: ChartKind,
    pub primary: SeriesDescriptor,
    /// Composite panels only (wind gust alongside speed).
    pub secondary: Option<SeriesDescriptor>,
    pub scale: ScaleBounds,
    pub tick_formatter: ValueFormatter,
    pub show_legend: bool,
    /// Placeholder shown instead of the widget when the series carries no signal.
    pub empty_state_id: Option<&'static str>,
}

impl MetricDescriptor {
    /// Dataset keys this panel consumes, primary first.
    pub fn metric_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.primary.metric_key).chain(self.secondary.iter().map(|s| s.metric_key))
    }

    pub fn is_composite(&self) -> bool {
        self.secondary.is_some()
    }
}
