// Theme synchronizer tests

mod common;

use weather_charts::dashboard::{Dashboard, DashboardSettings};
use weather_charts::models::{MetricId, Theme};
use weather_charts::page::{Page, RedrawMode};

#[test]
fn widgets_start_with_current_theme_chrome() {
    let page = common::full_page(Theme::Dark);
    let dashboard = Dashboard::new(page, DashboardSettings::default());
    let dark = Theme::Dark.palette();
    for widget in dashboard.registry().iter() {
        assert_eq!(widget.config().y.grid_color, dark.grid_color);
        assert_eq!(widget.config().y.tick_color, dark.text_color);
    }
}

#[test]
fn theme_change_restyles_chrome_silently() {
    let page = common::full_page(Theme::Light);
    let handle = page.clone();
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    dashboard.page_mut().set_theme(Theme::Dark);
    let restyled = dashboard.on_theme_changed();
    assert_eq!(restyled, 6);

    let dark = Theme::Dark.palette();
    let state = handle.state();
    assert_eq!(state.renders.len(), 6);
    for r in &state.renders {
        assert_eq!(r.mode, RedrawMode::Silent);
        assert_eq!(r.grid_color, dark.grid_color);
        assert_eq!(r.x_tick_color, dark.text_color);
        assert_eq!(r.y_tick_color, dark.text_color);
    }
}

#[test]
fn theme_change_keeps_brand_colors_and_data() {
    let page = common::full_page(Theme::Light);
    let handle = page.clone();
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    let response = common::sample_response();
    dashboard.apply_outcome(weather_charts::dashboard::RefreshOutcome {
        generation: 0,
        interval: dashboard.active_interval(),
        result: Ok(response),
    });
    let before = handle.state().last_render("windChart").unwrap().clone();

    dashboard.page_mut().set_theme(Theme::Dark);
    dashboard.on_theme_changed();

    let after = handle.state().last_render("windChart").unwrap().clone();
    assert_eq!(after.series_colors, vec!["#14b8a6", "#f43f5e"]);
    assert_eq!(after.series_colors, before.series_colors);
    assert_eq!(after.data, before.data);
    assert_eq!(after.legend_color, Theme::Dark.palette().text_color);
}

#[test]
fn theme_change_is_idempotent() {
    let page = common::full_page(Theme::Light);
    let handle = page.clone();
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    dashboard.page_mut().set_theme(Theme::Dark);
    dashboard.on_theme_changed();
    let first = handle.state().last_render("tempChart").unwrap().clone();
    dashboard.on_theme_changed();
    let second = handle.state().last_render("tempChart").unwrap().clone();

    assert_eq!(first, second);
    let temp = dashboard.registry().get(MetricId::Temperature).unwrap();
    assert_eq!(temp.config().y.grid_color, Theme::Dark.palette().grid_color);
}

#[test]
fn legend_color_untouched_when_legend_hidden() {
    let page = common::full_page(Theme::Light);
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    dashboard.page_mut().set_theme(Theme::Dark);
    dashboard.on_theme_changed();

    let temp = dashboard.registry().get(MetricId::Temperature).unwrap();
    assert!(!temp.config().legend.display);
    assert_eq!(temp.config().legend.label_color, Theme::Light.palette().text_color);
}

#[test]
fn theme_change_with_no_widgets_is_a_no_op() {
    let page = weather_charts::page::MemoryPage::new(Vec::<String>::new(), &[], Theme::Light);
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());
    dashboard.page_mut().set_theme(Theme::Dark);
    assert_eq!(dashboard.on_theme_changed(), 0);
}
