// Dashboard session tests: interval selection, refresh outcomes, stale handling

mod common;

use chrono::{TimeZone, Utc};
use weather_charts::dashboard::{Applied, Dashboard, DashboardSettings, RefreshOutcome};
use weather_charts::descriptors::{self, NO_RAIN_PLACEHOLDER};
use weather_charts::error::FetchError;
use weather_charts::models::{IntervalSelection, MetricId, Theme};
use weather_charts::page::{MemoryPage, SELECTED_CLASSES, UNSELECTED_CLASSES, control_element_id};

fn ok(generation: u64, response: weather_charts::models::TimeSeriesResponse) -> RefreshOutcome {
    RefreshOutcome {
        generation,
        interval: IntervalSelection::OneHour,
        result: Ok(response),
    }
}

#[test]
fn select_interval_highlights_exactly_one_control() {
    let page = common::full_page(Theme::Light);
    let handle = page.clone();
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    dashboard.select_interval(IntervalSelection::OneHour, now);
    dashboard.select_interval(IntervalSelection::OneDay, now);

    let state = handle.state();
    let selected: Vec<&str> = common::CONTROLS
        .iter()
        .copied()
        .filter(|t| state.has_class(&control_element_id(t), SELECTED_CLASSES[0]))
        .collect();
    assert_eq!(selected, vec!["1d"]);

    let id = control_element_id("1d");
    for class in SELECTED_CLASSES {
        assert!(state.has_class(&id, class));
    }
    for class in UNSELECTED_CLASSES {
        assert!(!state.has_class(&id, class));
    }
    let other = control_element_id("1h");
    for class in UNSELECTED_CLASSES {
        assert!(state.has_class(&other, class));
    }
    assert!(!state.has_class(&other, SELECTED_CLASSES[1]));
}

#[test]
fn select_interval_requests_active_fields_for_lookback_window() {
    let page = MemoryPage::new(["tempChart", "windChart"], &common::CONTROLS, Theme::Light);
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    let request = dashboard
        .select_interval(IntervalSelection::FifteenMinutes, now)
        .expect("widgets present");

    assert_eq!(dashboard.active_interval(), IntervalSelection::FifteenMinutes);
    assert_eq!(request.query.interval, IntervalSelection::FifteenMinutes);
    assert_eq!(request.query.fields, vec!["temp_outdoor", "wind_speed", "wind_gust"]);
    assert_eq!(request.query.from.to_string(), "2024-01-14");
    assert_eq!(request.query.to.to_string(), "2024-01-15");
}

#[test]
fn generations_increase_per_request() {
    let page = common::full_page(Theme::Light);
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());
    let now = Utc::now();
    let a = dashboard.begin_refresh(now).unwrap();
    let b = dashboard.select_interval(IntervalSelection::FiveMinutes, now).unwrap();
    let c = dashboard.begin_refresh(now).unwrap();
    assert_eq!((a.generation, b.generation, c.generation), (0, 1, 2));
    assert_eq!(c.query.interval, IntervalSelection::FiveMinutes);
}

#[test]
fn no_widgets_means_no_fetch() {
    let page = MemoryPage::new(Vec::<String>::new(), &common::CONTROLS, Theme::Light);
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());
    assert!(!dashboard.has_widgets());
    assert!(dashboard.select_interval(IntervalSelection::OneDay, Utc::now()).is_none());
    assert!(dashboard.begin_refresh(Utc::now()).is_none());
    assert_eq!(dashboard.active_interval(), IntervalSelection::OneDay);
}

#[test]
fn failed_fetch_leaves_widgets_unchanged() {
    let page = common::full_page(Theme::Light);
    let handle = page.clone();
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    assert_eq!(
        dashboard.apply_outcome(ok(0, common::sample_response())),
        Applied::Rendered { widgets: 6 }
    );
    let renders_before = handle.state().renders.len();
    let before = dashboard.registry().get(MetricId::Temperature).unwrap().data().clone();

    let failed = dashboard.apply_outcome(RefreshOutcome {
        generation: 1,
        interval: IntervalSelection::OneHour,
        result: Err(FetchError::Status {
            status: 503,
            body: "maintenance".to_string(),
        }),
    });
    assert_eq!(failed, Applied::Failed);

    let after = dashboard.registry().get(MetricId::Temperature).unwrap().data();
    assert_eq!(*after, before);
    assert_eq!(handle.state().renders.len(), renders_before);
}

#[test]
fn applied_outcome_runs_rain_visibility() {
    let page = common::full_page(Theme::Light);
    let handle = page.clone();
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    dashboard.apply_outcome(ok(0, common::sample_response()));
    assert!(handle.state().is_hidden("rainChart"));
    assert!(!handle.state().is_hidden(NO_RAIN_PLACEHOLDER));

    dashboard.apply_outcome(ok(1, common::rainy_response()));
    assert!(!handle.state().is_hidden("rainChart"));
    assert!(handle.state().is_hidden(NO_RAIN_PLACEHOLDER));
}

#[test]
fn last_arrival_wins_by_default() {
    let page = common::full_page(Theme::Light);
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    dashboard.apply_outcome(ok(1, common::rainy_response()));
    let older = dashboard.apply_outcome(ok(0, common::sample_response()));
    assert_eq!(older, Applied::Rendered { widgets: 6 });

    let rain = dashboard.registry().get(MetricId::Rain).unwrap();
    assert_eq!(rain.primary(), [Some(0.0), Some(0.0), Some(0.0)]);
}

#[test]
fn stale_responses_discarded_when_enabled() {
    let page = common::full_page(Theme::Light);
    let settings = DashboardSettings {
        discard_stale_responses: true,
        ..DashboardSettings::default()
    };
    let mut dashboard = Dashboard::new(page, settings);

    dashboard.apply_outcome(ok(1, common::rainy_response()));
    assert_eq!(
        dashboard.apply_outcome(ok(0, common::sample_response())),
        Applied::Stale
    );
    let rain = dashboard.registry().get(MetricId::Rain).unwrap();
    assert_eq!(rain.primary(), [Some(0.0), Some(0.0), Some(0.5)]);

    assert_eq!(
        dashboard.apply_outcome(ok(2, common::sample_response())),
        Applied::Rendered { widgets: 6 }
    );
}

#[test]
fn rain_surface_drawn_after_visibility_settles() {
    let page = common::full_page(Theme::Light);
    let handle = page.clone();
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    dashboard.apply_outcome(ok(0, common::sample_response()));
    assert!(handle.state().last_render("rainChart").unwrap().hidden);

    dashboard.apply_outcome(ok(1, common::rainy_response()));
    let rain = handle.state().last_render("rainChart").unwrap().clone();
    assert!(!rain.hidden);
    assert_eq!(rain.data.primary, vec![Some(0.0), Some(0.0), Some(0.5)]);
}

#[test]
fn misaligned_requested_dataset_fails_refresh() {
    let page = common::full_page(Theme::Light);
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());
    dashboard.apply_outcome(ok(0, common::sample_response()));

    let mut bad = common::rainy_response();
    bad.datasets.insert("wind_gust".to_string(), vec![Some(1.0)]);
    assert_eq!(dashboard.apply_outcome(ok(1, bad)), Applied::Failed);

    let rain = dashboard.registry().get(MetricId::Rain).unwrap();
    assert_eq!(rain.primary(), [Some(0.0), Some(0.0), Some(0.0)]);
}

#[test]
fn misaligned_unrequested_dataset_is_ignored() {
    let page = MemoryPage::new(["tempChart"], &common::CONTROLS, Theme::Light);
    let mut dashboard = Dashboard::new(page, DashboardSettings::default());

    let mut response = common::sample_response();
    response.datasets.insert("rain_rate".to_string(), vec![Some(1.0)]);
    assert_eq!(
        dashboard.apply_outcome(ok(0, response)),
        Applied::Rendered { widgets: 1 }
    );
}

#[test]
fn fields_follow_custom_descriptor_order() {
    let custom: &'static [weather_charts::models::MetricDescriptor] = Box::leak(
        vec![
            *descriptors::get(MetricId::Rain),
            *descriptors::get(MetricId::Wind),
            *descriptors::get(MetricId::Temperature),
        ]
        .into_boxed_slice(),
    );
    let page = common::full_page(Theme::Light);
    let mut dashboard = Dashboard::with_descriptors(page, DashboardSettings::default(), custom);

    let ids: Vec<MetricId> = dashboard.registry().ids().collect();
    assert_eq!(ids, vec![MetricId::Rain, MetricId::Wind, MetricId::Temperature]);
    let request = dashboard.begin_refresh(Utc::now()).unwrap();
    assert_eq!(
        request.query.fields,
        vec!["rain_rate", "wind_speed", "wind_gust", "temp_outdoor"]
    );
}

#[test]
fn oversized_lookback_setting_does_not_panic() {
    let page = common::full_page(Theme::Light);
    let settings = DashboardSettings {
        lookback_hours: 4_000_000_000,
        ..DashboardSettings::default()
    };
    let mut dashboard = Dashboard::new(page, settings);
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    let request = dashboard.begin_refresh(now).unwrap();
    assert_eq!(request.query.to.to_string(), "2024-01-15");
    assert_eq!(request.query.from.to_string(), "2023-01-14");
}
