// Domain models for the chart dashboard

mod descriptor;
mod interval;
mod response;
mod theme;

pub use descriptor::{
    ChartKind, LineStyle, MetricDescriptor, MetricId, ScaleBounds, SeriesDescriptor,
    ValueFormatter,
};
pub use interval::IntervalSelection;
pub use response::{Series, TimeSeriesResponse};
pub use theme::{Theme, ThemePalette};
