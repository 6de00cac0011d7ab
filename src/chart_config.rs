// Resolved per-widget rendering configuration.
// Every widget starts from the shared base and applies a small, closed set of named overrides;
// each override kind may appear once, so there is no merge precedence to reason about.

use crate::error::ChartConfigError;
use crate::models::{ChartKind, MetricDescriptor, ScaleBounds, ThemePalette, ValueFormatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// Tooltip shows every series at the hovered x index.
    Index,
    Nearest,
}

/// Settings shared by every panel before per-metric overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseConfig {
    pub tooltip_intersect: bool,
    pub tooltip_mode: InteractionMode,
    pub tooltip_background: &'static str,
    pub tooltip_padding: u8,
    pub legend_display: bool,
    pub x_grid_display: bool,
    pub x_max_ticks: u8,
    pub x_max_rotation: u8,
    pub tick_font_size: u8,
    pub point_radius: f32,
    pub point_hover_radius: f32,
    pub line_tension: f32,
    pub line_width: f32,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            tooltip_intersect: false,
            tooltip_mode: InteractionMode::Index,
            tooltip_background: "rgba(0, 0, 0, 0.8)",
            tooltip_padding: 8,
            legend_display: false,
            x_grid_display: false,
            x_max_ticks: 6,
            x_max_rotation: 0,
            tick_font_size: 10,
            point_radius: 1.0,
            point_hover_radius: 4.0,
            line_tension: 0.3,
            line_width: 2.0,
        }
    }
}

/// The only knobs a metric may change on top of [`BaseConfig`].
#[derive(Debug, Clone, Copy)]
pub enum ConfigOverride {
    AxisBounds(ScaleBounds),
    TickFormatter(ValueFormatter),
    LegendVisible(bool),
}

impl ConfigOverride {
    fn name(&self) -> &'static str {
        match self {
            ConfigOverride::AxisBounds(_) => "axis_bounds",
            ConfigOverride::TickFormatter(_) => "tick_formatter",
            ConfigOverride::LegendVisible(_) => "legend_visible",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AxisConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub grid_display: bool,
    pub grid_color: &'static str,
    pub tick_color: &'static str,
    pub tick_font_size: u8,
    pub max_ticks: Option<u8>,
    pub max_rotation: u8,
    /// `None` renders raw tick values.
    pub tick_formatter: Option<ValueFormatter>,
}

impl AxisConfig {
    pub fn format_tick(&self, value: f64) -> String {
        match self.tick_formatter {
            Some(f) => f(value),
            None => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendConfig {
    pub display: bool,
    pub label_color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipConfig {
    pub intersect: bool,
    pub mode: InteractionMode,
    pub background: &'static str,
    pub padding: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub point_radius: f32,
    pub point_hover_radius: f32,
    pub line_tension: f32,
    pub line_width: f32,
}

/// Fully resolved configuration owned by one widget.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub x: AxisConfig,
    pub y: AxisConfig,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    pub elements: ElementStyle,
}

impl ChartConfig {
    /// Restyle chrome only: y grid, tick text on both axes, legend text when shown.
    pub fn apply_palette(&mut self, palette: ThemePalette) {
        self.y.grid_color = palette.grid_color;
        self.x.tick_color = palette.text_color;
        self.y.tick_color = palette.text_color;
        if self.legend.display {
            self.legend.label_color = palette.text_color;
        }
    }
}

pub struct ChartConfigBuilder<'a> {
    base: &'a BaseConfig,
    palette: ThemePalette,
    kind: ChartKind,
    overrides: Vec<ConfigOverride>,
}

impl<'a> ChartConfigBuilder<'a> {
    pub fn new(base: &'a BaseConfig, palette: ThemePalette) -> Self {
        Self {
            base,
            palette,
            kind: ChartKind::Line,
            overrides: Vec::new(),
        }
    }

    pub fn kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with(mut self, o: ConfigOverride) -> Self {
        self.overrides.push(o);
        self
    }

    pub fn build(self) -> Result<ChartConfig, ChartConfigError> {
        let base = self.base;
        let palette = self.palette;

        let mut config = ChartConfig {
            kind: self.kind,
            x: AxisConfig {
                min: None,
                max: None,
                grid_display: base.x_grid_display,
                grid_color: palette.grid_color,
                tick_color: palette.text_color,
                tick_font_size: base.tick_font_size,
                max_ticks: Some(base.x_max_ticks),
                max_rotation: base.x_max_rotation,
                tick_formatter: None,
            },
            y: AxisConfig {
                min: None,
                max: None,
                grid_display: true,
                grid_color: palette.grid_color,
                tick_color: palette.text_color,
                tick_font_size: base.tick_font_size,
                max_ticks: None,
                max_rotation: 0,
                tick_formatter: None,
            },
            legend: LegendConfig {
                display: base.legend_display,
                label_color: palette.text_color,
            },
            tooltip: TooltipConfig {
                intersect: base.tooltip_intersect,
                mode: base.tooltip_mode,
                background: base.tooltip_background,
                padding: base.tooltip_padding,
            },
            elements: ElementStyle {
                point_radius: base.point_radius,
                point_hover_radius: base.point_hover_radius,
                line_tension: base.line_tension,
                line_width: base.line_width,
            },
        };

        let mut seen: Vec<&'static str> = Vec::with_capacity(self.overrides.len());
        for o in &self.overrides {
            let name = o.name();
            if seen.contains(&name) {
                return Err(ChartConfigError::DuplicateOverride(name));
            }
            seen.push(name);

            match *o {
                ConfigOverride::AxisBounds(bounds) => {
                    validate_bounds(bounds)?;
                    config.y.min = bounds.min;
                    config.y.max = bounds.max;
                }
                ConfigOverride::TickFormatter(f) => config.y.tick_formatter = Some(f),
                ConfigOverride::LegendVisible(show) => config.legend.display = show,
            }
        }

        Ok(config)
    }
}

fn validate_bounds(bounds: ScaleBounds) -> Result<(), ChartConfigError> {
    for v in [bounds.min, bounds.max].into_iter().flatten() {
        if !v.is_finite() {
            return Err(ChartConfigError::NonFiniteBound(v));
        }
    }
    if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
        if min > max {
            return Err(ChartConfigError::InvalidBounds { min, max });
        }
    }
    Ok(())
}

/// Configuration for one descriptor: base settings plus that metric's overrides.
pub fn for_descriptor(
    descriptor: &MetricDescriptor,
    base: &BaseConfig,
    palette: ThemePalette,
) -> Result<ChartConfig, ChartConfigError> {
    let mut builder = ChartConfigBuilder::new(base, palette)
        .kind(descriptor.kind)
        .with(ConfigOverride::TickFormatter(descriptor.tick_formatter));
    if descriptor.scale != ScaleBounds::AUTO {
        builder = builder.with(ConfigOverride::AxisBounds(descriptor.scale));
    }
    if descriptor.show_legend != base.legend_display {
        builder = builder.with(ConfigOverride::LegendVisible(descriptor.show_legend));
    }
    builder.build()
}
