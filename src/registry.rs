// Widget registry: one live chart per descriptor whose mount point exists on the page.

use crate::chart_config::{self, BaseConfig, ChartConfig};
use crate::models::{MetricDescriptor, MetricId, Series, ThemePalette};
use crate::page::{ChartSurface, Page, RedrawMode, WidgetData};

/// A mounted chart: resolved config, current data, and its backend surface.
pub struct ChartWidget {
    descriptor: &'static MetricDescriptor,
    config: ChartConfig,
    data: WidgetData,
    surface: Box<dyn ChartSurface>,
}

impl ChartWidget {
    pub fn descriptor(&self) -> &'static MetricDescriptor {
        self.descriptor
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn data(&self) -> &WidgetData {
        &self.data
    }

    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    pub fn primary(&self) -> &[Option<f64>] {
        &self.data.primary
    }

    pub fn secondary(&self) -> Option<&[Option<f64>]> {
        self.data.secondary.as_deref()
    }

    /// Replace labels and series in place. The secondary series is kept only for composite panels.
    pub fn set_data(&mut self, labels: Vec<String>, primary: Series, secondary: Option<Series>) {
        self.data = WidgetData {
            labels,
            primary,
            secondary: if self.descriptor.is_composite() {
                Some(secondary.unwrap_or_default())
            } else {
                None
            },
        };
    }

    pub fn apply_palette(&mut self, palette: ThemePalette) {
        self.config.apply_palette(palette);
    }

    pub fn redraw(&mut self, mode: RedrawMode) {
        self.surface.render(&self.config, &self.data, mode);
    }
}

/// Live widgets in descriptor order. At most one per metric.
#[derive(Default)]
pub struct WidgetRegistry {
    widgets: Vec<ChartWidget>,
}

impl WidgetRegistry {
    /// Build widgets for every descriptor with a mount point on `page`.
    /// Missing mounts are skipped; attach or config failures drop only that widget.
    pub fn initialize<P: Page + ?Sized>(
        page: &mut P,
        descriptors: &'static [MetricDescriptor],
        base: &BaseConfig,
        palette: ThemePalette,
    ) -> Self {
        let mut widgets: Vec<ChartWidget> = Vec::new();

        for descriptor in descriptors {
            let mount = descriptor.mount_point_id;
            if widgets.iter().any(|w| w.descriptor.id == descriptor.id) {
                tracing::warn!(metric = %descriptor.id, "duplicate descriptor; widget skipped");
                continue;
            }
            if !page.has_mount_point(mount) {
                tracing::debug!(metric = %descriptor.id, mount, "mount point absent; widget skipped");
                continue;
            }

            let config = match chart_config::for_descriptor(descriptor, base, palette) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        metric = %descriptor.id,
                        operation = "build_chart_config",
                        "invalid chart configuration; widget omitted"
                    );
                    continue;
                }
            };

            let surface = match page.attach(descriptor, &config) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        metric = %descriptor.id,
                        operation = "attach_surface",
                        "chart backend failed to attach; widget omitted"
                    );
                    continue;
                }
            };

            widgets.push(ChartWidget {
                descriptor,
                data: WidgetData {
                    secondary: descriptor.secondary.map(|_| Vec::new()),
                    ..WidgetData::default()
                },
                config,
                surface,
            });
        }

        tracing::info!(widgets = widgets.len(), "chart widgets initialized");
        Self { widgets }
    }

    pub fn get(&self, id: MetricId) -> Option<&ChartWidget> {
        self.widgets.iter().find(|w| w.descriptor.id == id)
    }

    pub fn get_mut(&mut self, id: MetricId) -> Option<&mut ChartWidget> {
        self.widgets.iter_mut().find(|w| w.descriptor.id == id)
    }

    pub fn contains(&self, id: MetricId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = MetricId> + '_ {
        self.widgets.iter().map(|w| w.descriptor.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartWidget> {
        self.widgets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ChartWidget> {
        self.widgets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Dataset keys needed by the live widgets, in descriptor order.
    pub fn field_keys(&self) -> Vec<&'static str> {
        self.widgets
            .iter()
            .flat_map(|w| w.descriptor.metric_keys())
            .collect()
    }
}
