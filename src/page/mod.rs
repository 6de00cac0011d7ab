// Host page abstraction: mount points, chart surfaces, element/class toggles.
// The page itself (markup, CSS) is external; this is the interface the dashboard drives.

mod memory;
mod terminal;

pub use memory::{MemoryPage, PageState, RenderRecord, control_element_id};
pub use terminal::{TerminalPage, sparkline, summary_line};

use crate::chart_config::ChartConfig;
use crate::error::AttachError;
use crate::models::{MetricDescriptor, Series, Theme};

/// Class toggled to hide an element (rain chart vs. its placeholder).
pub const HIDDEN_CLASS: &str = "hidden";

/// Style tokens of the active interval control.
pub const SELECTED_CLASSES: [&str; 2] = ["bg-blue-500", "text-white"];

/// Style tokens of every other interval control.
pub const UNSELECTED_CLASSES: [&str; 4] = [
    "bg-gray-200",
    "dark:bg-gray-700",
    "text-gray-700",
    "dark:text-gray-300",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawMode {
    /// Data changed; backend may animate the transition.
    Animated,
    /// Chrome-only change; no transition animation.
    Silent,
}

/// Data currently shown by a widget. Every series has one entry per label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetData {
    pub labels: Vec<String>,
    pub primary: Series,
    pub secondary: Option<Series>,
}

/// A rendering backend instance attached to one mount point.
pub trait ChartSurface: Send {
    fn render(&mut self, config: &ChartConfig, data: &WidgetData, mode: RedrawMode);
}

pub trait Page: Send {
    fn has_mount_point(&self, id: &str) -> bool;

    /// Construct and mount a rendering backend. Fails if the mount cannot host a chart.
    fn attach(
        &mut self,
        descriptor: &'static MetricDescriptor,
        config: &ChartConfig,
    ) -> Result<Box<dyn ChartSurface>, AttachError>;

    /// Add or remove [`HIDDEN_CLASS`] on an element.
    fn set_hidden(&mut self, element_id: &str, hidden: bool);

    /// `data-interval` tokens of the interval selector controls, in page order.
    fn interval_controls(&self) -> Vec<String>;

    fn restyle_control(&mut self, token: &str, add: &[&str], remove: &[&str]);

    /// Current theme flag, read on demand.
    fn theme(&self) -> Theme;

    /// Flip the theme flag (what the page's own toggle does before broadcasting the change).
    fn set_theme(&mut self, theme: Theme);
}
