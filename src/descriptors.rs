// The fixed widget descriptor set: one entry per dashboard panel, in page order.

use crate::models::{
    ChartKind, LineStyle, MetricDescriptor, MetricId, ScaleBounds, SeriesDescriptor,
};

/// Placeholder element shown instead of the rain chart when nothing fell in the window.
pub const NO_RAIN_PLACEHOLDER: &str = "noRainMessage";

/// Solar sensor reports W/m²; the panel shows approximate illuminance.
pub const LUX_PER_WATT_M2: f64 = 120.0;

pub static DESCRIPTORS: [MetricDescriptor; 6] = [
    MetricDescriptor {
        id: MetricId::Temperature,
        mount_point_id: "tempChart",
        kind: ChartKind::Line,
        primary: SeriesDescriptor {
            metric_key: "temp_outdoor",
            display_label: "Temperature",
            color: "#f97316",
            fill_color: "rgba(249, 115, 22, 0.1)",
            fill: true,
            line_style: LineStyle::Solid,
            unit: "°C",
            value_formatter: format_temperature,
        },
        secondary: None,
        scale: ScaleBounds::AUTO,
        tick_formatter: tick_temperature,
        show_legend: false,
        empty_state_id: None,
    },
    MetricDescriptor {
        id: MetricId::Humidity,
        mount_point_id: "humidityChart",
        kind: ChartKind::Line,
        primary: SeriesDescriptor {
            metric_key: "humidity_outdoor",
            display_label: "Humidity",
            color: "#3b82f6",
            fill_color: "rgba(59, 130, 246, 0.1)",
            fill: true,
            line_style: LineStyle::Solid,
            unit: "%",
            value_formatter: format_humidity,
        },
        secondary: None,
        scale: ScaleBounds::between(0.0, 100.0),
        tick_formatter: tick_humidity,
        show_legend: false,
        empty_state_id: None,
    },
    MetricDescriptor {
        id: MetricId::Pressure,
        mount_point_id: "pressureChart",
        kind: ChartKind::Line,
        primary: SeriesDescriptor {
            metric_key: "pressure_relative",
            display_label: "Pressure",
            color: "#8b5cf6",
            fill_color: "rgba(139, 92, 246, 0.1)",
            fill: true,
            line_style: LineStyle::Solid,
            unit: "mm",
            value_formatter: format_pressure,
        },
        secondary: None,
        scale: ScaleBounds::AUTO,
        tick_formatter: format_pressure,
        show_legend: false,
        empty_state_id: None,
    },
    MetricDescriptor {
        id: MetricId::Wind,
        mount_point_id: "windChart",
        kind: ChartKind::Line,
        primary: SeriesDescriptor {
            metric_key: "wind_speed",
            display_label: "Speed",
            color: "#14b8a6",
            fill_color: "rgba(20, 184, 166, 0.1)",
            fill: true,
            line_style: LineStyle::Solid,
            unit: "m/s",
            value_formatter: format_wind,
        },
        secondary: Some(SeriesDescriptor {
            metric_key: "wind_gust",
            display_label: "Gusts",
            color: "#f43f5e",
            fill_color: "transparent",
            fill: false,
            line_style: LineStyle::Dashed,
            unit: "m/s",
            value_formatter: format_wind,
        }),
        scale: ScaleBounds::from_zero(),
        tick_formatter: tick_wind,
        show_legend: true,
        empty_state_id: None,
    },
    MetricDescriptor {
        id: MetricId::Solar,
        mount_point_id: "solarChart",
        kind: ChartKind::Line,
        primary: SeriesDescriptor {
            metric_key: "solar_radiation",
            display_label: "Illuminance",
            color: "#eab308",
            fill_color: "rgba(234, 179, 8, 0.1)",
            fill: true,
            line_style: LineStyle::Solid,
            unit: "lux",
            value_formatter: format_illuminance,
        },
        secondary: None,
        scale: ScaleBounds::from_zero(),
        tick_formatter: tick_illuminance,
        show_legend: false,
        empty_state_id: None,
    },
    MetricDescriptor {
        id: MetricId::Rain,
        mount_point_id: "rainChart",
        kind: ChartKind::Bar,
        primary: SeriesDescriptor {
            metric_key: "rain_rate",
            display_label: "Precipitation",
            color: "#06b6d4",
            fill_color: "rgba(6, 182, 212, 0.7)",
            fill: true,
            line_style: LineStyle::Solid,
            unit: "mm/h",
            value_formatter: format_rain_rate,
        },
        secondary: None,
        scale: ScaleBounds::from_zero(),
        tick_formatter: tick_rain,
        show_legend: false,
        empty_state_id: Some(NO_RAIN_PLACEHOLDER),
    },
];

pub fn all() -> &'static [MetricDescriptor] {
    &DESCRIPTORS
}

pub fn get(id: MetricId) -> &'static MetricDescriptor {
    // DESCRIPTORS is declared in MetricId order.
    &DESCRIPTORS[id as usize]
}

pub fn format_temperature(value: f64) -> String {
    format!("{value:.1}°C")
}

pub fn tick_temperature(value: f64) -> String {
    format!("{value:.1}°")
}

pub fn format_humidity(value: f64) -> String {
    format!("{}%", value.round())
}

pub fn tick_humidity(value: f64) -> String {
    format!("{value}%")
}

pub fn format_pressure(value: f64) -> String {
    format!("{value:.1} mm")
}

pub fn format_wind(value: f64) -> String {
    format!("{value:.1} m/s")
}

pub fn tick_wind(value: f64) -> String {
    format!("{value:.0} m/s")
}

pub fn format_illuminance(value: f64) -> String {
    format!("{} lux", (value * LUX_PER_WATT_M2).round())
}

pub fn tick_illuminance(value: f64) -> String {
    format!("{} lx", (value * LUX_PER_WATT_M2).round())
}

pub fn format_rain_rate(value: f64) -> String {
    format!("{value:.2} mm/h")
}

pub fn tick_rain(value: f64) -> String {
    format!("{value:.1} mm")
}
