// Headless page: keeps element/class state in memory and records every render.
// State is shared with the surfaces it hands out so it stays inspectable after widgets own them.

use super::{ChartSurface, HIDDEN_CLASS, Page, RedrawMode, WidgetData};
use crate::chart_config::ChartConfig;
use crate::error::AttachError;
use crate::models::{MetricDescriptor, Theme};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// One `render` call as seen by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRecord {
    pub mount: String,
    pub mode: RedrawMode,
    /// Whether the mount carried the hidden class when drawn.
    pub hidden: bool,
    pub data: WidgetData,
    pub grid_color: &'static str,
    pub x_tick_color: &'static str,
    pub y_tick_color: &'static str,
    pub legend_color: &'static str,
    pub series_colors: Vec<&'static str>,
}

#[derive(Debug, Default)]
pub struct PageState {
    pub mounts: BTreeSet<String>,
    /// Mounts that exist but refuse a chart backend.
    pub unsupported: BTreeSet<String>,
    pub attached: Vec<String>,
    /// Element id -> classes.
    pub classes: BTreeMap<String, BTreeSet<String>>,
    pub controls: Vec<String>,
    pub renders: Vec<RenderRecord>,
    pub theme: Theme,
}

impl PageState {
    pub fn is_hidden(&self, element_id: &str) -> bool {
        self.has_class(element_id, HIDDEN_CLASS)
    }

    pub fn has_class(&self, element_id: &str, class: &str) -> bool {
        self.classes
            .get(element_id)
            .is_some_and(|c| c.contains(class))
    }

    pub fn renders_for(&self, mount: &str) -> Vec<&RenderRecord> {
        self.renders.iter().filter(|r| r.mount == mount).collect()
    }

    pub fn last_render(&self, mount: &str) -> Option<&RenderRecord> {
        self.renders.iter().rev().find(|r| r.mount == mount)
    }
}

#[derive(Clone, Default)]
pub struct MemoryPage {
    state: Arc<Mutex<PageState>>,
}

impl MemoryPage {
    pub fn new<I, S>(mounts: I, controls: &[&str], theme: Theme) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state = PageState {
            mounts: mounts.into_iter().map(Into::into).collect(),
            controls: controls.iter().map(|c| c.to_string()).collect(),
            theme,
            ..PageState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Mark a mount point as present but unable to host a chart.
    pub fn refuse_backend(&self, mount: &str) {
        self.lock().unsupported.insert(mount.to_string());
    }

    /// Snapshot access for assertions.
    pub fn state(&self) -> MutexGuard<'_, PageState> {
        self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        // A poisoned lock only means a panicking test thread; the state is still readable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Page for MemoryPage {
    fn has_mount_point(&self, id: &str) -> bool {
        self.lock().mounts.contains(id)
    }

    fn attach(
        &mut self,
        descriptor: &'static MetricDescriptor,
        _config: &ChartConfig,
    ) -> Result<Box<dyn ChartSurface>, AttachError> {
        let mount = descriptor.mount_point_id;
        let mut state = self.lock();
        if !state.mounts.contains(mount) {
            return Err(AttachError::MountNotFound(mount.to_string()));
        }
        if state.unsupported.contains(mount) {
            return Err(AttachError::Unsupported {
                mount: mount.to_string(),
                reason: "no 2d drawing context".to_string(),
            });
        }
        state.attached.push(mount.to_string());
        Ok(Box::new(MemorySurface {
            mount: mount.to_string(),
            descriptor,
            state: Arc::clone(&self.state),
        }))
    }

    fn set_hidden(&mut self, element_id: &str, hidden: bool) {
        let mut state = self.lock();
        let classes = state.classes.entry(element_id.to_string()).or_default();
        if hidden {
            classes.insert(HIDDEN_CLASS.to_string());
        } else {
            classes.remove(HIDDEN_CLASS);
        }
    }

    fn interval_controls(&self) -> Vec<String> {
        self.lock().controls.clone()
    }

    fn restyle_control(&mut self, token: &str, add: &[&str], remove: &[&str]) {
        let mut state = self.lock();
        let classes = state.classes.entry(control_element_id(token)).or_default();
        for c in remove {
            classes.remove(*c);
        }
        for c in add {
            classes.insert((*c).to_string());
        }
    }

    fn theme(&self) -> Theme {
        self.lock().theme
    }

    fn set_theme(&mut self, theme: Theme) {
        self.lock().theme = theme;
    }
}

/// Element id under which an interval control's classes are tracked.
pub fn control_element_id(token: &str) -> String {
    format!("interval-{token}")
}

struct MemorySurface {
    mount: String,
    descriptor: &'static MetricDescriptor,
    state: Arc<Mutex<PageState>>,
}

impl ChartSurface for MemorySurface {
    fn render(&mut self, config: &ChartConfig, data: &WidgetData, mode: RedrawMode) {
        let series_colors = std::iter::once(self.descriptor.primary.color)
            .chain(self.descriptor.secondary.iter().map(|s| s.color))
            .collect();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let record = RenderRecord {
            mount: self.mount.clone(),
            mode,
            hidden: state.is_hidden(&self.mount),
            data: data.clone(),
            grid_color: config.y.grid_color,
            x_tick_color: config.x.tick_color,
            y_tick_color: config.y.tick_color,
            legend_color: config.legend.label_color,
            series_colors,
        };
        state.renders.push(record);
    }
}
