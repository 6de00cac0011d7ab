// Empty-state policy for panels whose phenomenon may be absent (rain).

use crate::page::Page;
use crate::registry::WidgetRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Widget,
    Placeholder,
}

/// True when any present sample is above zero. Nulls never count.
pub fn has_signal(series: &[Option<f64>]) -> bool {
    series.iter().flatten().any(|v| *v > 0.0)
}

pub fn decide(series: &[Option<f64>]) -> Visibility {
    if has_signal(series) {
        Visibility::Widget
    } else {
        Visibility::Placeholder
    }
}

/// Toggle widget vs. placeholder for every widget that declares an empty state.
/// Needs both elements on the page; otherwise the widget is left as is.
pub fn apply<P: Page + ?Sized>(page: &mut P, registry: &WidgetRegistry) {
    for widget in registry.iter() {
        let descriptor = widget.descriptor();
        let Some(placeholder) = descriptor.empty_state_id else {
            continue;
        };
        if !page.has_mount_point(placeholder) {
            continue;
        }

        let visibility = decide(widget.primary());
        tracing::debug!(metric = %descriptor.id, ?visibility, "visibility evaluated");
        let show_widget = visibility == Visibility::Widget;
        page.set_hidden(placeholder, show_widget);
        page.set_hidden(descriptor.mount_point_id, !show_widget);
    }
}
