// Theme synchronizer: restyle chart chrome on theme change, never dataset colors.

use crate::models::ThemePalette;
use crate::page::{Page, RedrawMode};
use crate::registry::WidgetRegistry;

/// Palette for the page's current theme flag.
pub fn current_palette<P: Page + ?Sized>(page: &P) -> ThemePalette {
    page.theme().palette()
}

/// Apply `palette` to every live widget and redraw without animation.
pub fn restyle(registry: &mut WidgetRegistry, palette: ThemePalette) -> usize {
    let mut restyled = 0;
    for widget in registry.iter_mut() {
        widget.apply_palette(palette);
        widget.redraw(RedrawMode::Silent);
        restyled += 1;
    }
    restyled
}
