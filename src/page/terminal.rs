// Terminal host: each widget prints a one-line summary (range, sparkline, latest value).

use super::{ChartSurface, Page, RedrawMode, SELECTED_CLASSES, WidgetData};
use crate::chart_config::ChartConfig;
use crate::error::AttachError;
use crate::models::{MetricDescriptor, SeriesDescriptor, Theme};
use std::collections::BTreeSet;
use std::io::Write;
use std::sync::{Arc, Mutex};

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

const SPARK_WIDTH: usize = 32;
const SPARK_BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub struct TerminalPage {
    mounts: BTreeSet<String>,
    attached: BTreeSet<String>,
    controls: Vec<String>,
    selected: Option<String>,
    theme: Theme,
    hidden: Arc<Mutex<BTreeSet<String>>>,
    out: SharedWriter,
}

impl TerminalPage {
    /// Prints to stdout.
    pub fn new(mounts: Vec<String>, controls: Vec<String>, theme: Theme) -> Self {
        Self::with_writer(mounts, controls, theme, std::io::stdout())
    }

    pub fn with_writer<W>(mounts: Vec<String>, controls: Vec<String>, theme: Theme, out: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            mounts: mounts.into_iter().collect(),
            attached: BTreeSet::new(),
            controls,
            selected: None,
            theme,
            hidden: Arc::new(Mutex::new(BTreeSet::new())),
            out: Arc::new(Mutex::new(Box::new(out))),
        }
    }

    /// Token of the control currently styled as selected.
    pub fn selected_control(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

impl Page for TerminalPage {
    fn has_mount_point(&self, id: &str) -> bool {
        self.mounts.contains(id)
    }

    fn attach(
        &mut self,
        descriptor: &'static MetricDescriptor,
        _config: &ChartConfig,
    ) -> Result<Box<dyn ChartSurface>, AttachError> {
        if !self.mounts.contains(descriptor.mount_point_id) {
            return Err(AttachError::MountNotFound(
                descriptor.mount_point_id.to_string(),
            ));
        }
        self.attached.insert(descriptor.mount_point_id.to_string());
        Ok(Box::new(TerminalSurface {
            descriptor,
            hidden: Arc::clone(&self.hidden),
            out: Arc::clone(&self.out),
        }))
    }

    fn set_hidden(&mut self, element_id: &str, hidden: bool) {
        {
            let mut set = self.hidden.lock().unwrap_or_else(|e| e.into_inner());
            if hidden {
                set.insert(element_id.to_string());
            } else {
                set.remove(element_id);
            }
        }
        // Placeholders have no surface; print them whenever they are shown.
        if !hidden && !self.attached.contains(element_id) {
            write_line(&self.out, &format!("{element_id:<14} no data in window"));
        }
    }

    fn interval_controls(&self) -> Vec<String> {
        self.controls.clone()
    }

    fn restyle_control(&mut self, token: &str, add: &[&str], _remove: &[&str]) {
        if add.contains(&SELECTED_CLASSES[0]) {
            self.selected = Some(token.to_string());
        } else if self.selected.as_deref() == Some(token) {
            self.selected = None;
        }
    }

    fn theme(&self) -> Theme {
        self.theme
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

struct TerminalSurface {
    descriptor: &'static MetricDescriptor,
    hidden: Arc<Mutex<BTreeSet<String>>>,
    out: SharedWriter,
}

impl ChartSurface for TerminalSurface {
    fn render(&mut self, config: &ChartConfig, data: &WidgetData, mode: RedrawMode) {
        let hidden = self
            .hidden
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(self.descriptor.mount_point_id);
        if hidden || (mode == RedrawMode::Silent && data.labels.is_empty()) {
            return;
        }
        write_line(&self.out, &summary_line(self.descriptor, config, data));
    }
}

fn write_line(out: &SharedWriter, line: &str) {
    let mut out = out.lock().unwrap_or_else(|e| e.into_inner());
    let _ = writeln!(out, "{line}");
    let _ = out.flush();
}

/// `Temperature    00:00..23:00 ▁▂▅▇ 12.3°C | Gusts 8.0 m/s`
pub fn summary_line(
    descriptor: &MetricDescriptor,
    config: &ChartConfig,
    data: &WidgetData,
) -> String {
    let range = match (data.labels.first(), data.labels.last()) {
        (Some(first), Some(last)) => format!("{first}..{last}"),
        _ => "-".to_string(),
    };
    let mut line = format!(
        "{:<14} {:<13} {} {}",
        descriptor.primary.display_label,
        range,
        sparkline(&data.primary, SPARK_WIDTH),
        latest_text(&descriptor.primary, &data.primary),
    );
    if let (Some(desc), Some(series)) = (&descriptor.secondary, &data.secondary) {
        line.push_str(&format!(" | {} {}", desc.display_label, latest_text(desc, series)));
    }
    if let Some(max) = config.y.max {
        line.push_str(&format!(" (max {})", config.y.format_tick(max)));
    }
    line
}

fn latest_text(desc: &SeriesDescriptor, series: &[Option<f64>]) -> String {
    series
        .iter()
        .rev()
        .flatten()
        .next()
        .map(|v| (desc.value_formatter)(*v))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Block sparkline over the last `width` samples, scaled to the visible range; gaps stay blank.
pub fn sparkline(series: &[Option<f64>], width: usize) -> String {
    let tail = &series[series.len().saturating_sub(width)..];
    let present = tail.iter().flatten().copied();
    let (lo, hi) = present.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = hi - lo;
    tail.iter()
        .map(|v| match v {
            Some(v) if span > 0.0 => {
                let idx = ((v - lo) / span * (SPARK_BLOCKS.len() - 1) as f64).round() as usize;
                SPARK_BLOCKS[idx.min(SPARK_BLOCKS.len() - 1)]
            }
            Some(_) => SPARK_BLOCKS[0],
            None => ' ',
        })
        .collect()
}
