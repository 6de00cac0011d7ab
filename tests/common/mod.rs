// Shared test helpers
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use weather_charts::client::ChartDataSource;
use weather_charts::descriptors::NO_RAIN_PLACEHOLDER;
use weather_charts::error::FetchError;
use weather_charts::models::{Series, Theme, TimeSeriesResponse};
use weather_charts::page::MemoryPage;
use weather_charts::pipeline::ChartQuery;

pub const ALL_MOUNTS: [&str; 7] = [
    "tempChart",
    "humidityChart",
    "pressureChart",
    "windChart",
    "solarChart",
    "rainChart",
    NO_RAIN_PLACEHOLDER,
];

pub const CONTROLS: [&str; 6] = ["5m", "15m", "1h", "1d", "1w", "1M"];

/// Page with every chart mount, the rain placeholder, and all interval controls.
pub fn full_page(theme: Theme) -> MemoryPage {
    MemoryPage::new(ALL_MOUNTS, &CONTROLS, theme)
}

pub fn labels(n: usize) -> Vec<String> {
    (0..n).map(|h| format!("2024-01-15 {h:02}:00")).collect()
}

/// Response with `labels(n)` and the given datasets.
pub fn response(n: usize, datasets: &[(&str, Series)]) -> TimeSeriesResponse {
    TimeSeriesResponse {
        labels: labels(n),
        datasets: datasets
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Three buckets for every dataset the full dashboard asks for. Rain is dry.
pub fn sample_response() -> TimeSeriesResponse {
    response(
        3,
        &[
            ("temp_outdoor", vec![Some(12.0), Some(13.5), Some(14.1)]),
            ("humidity_outdoor", vec![Some(70.0), None, Some(68.0)]),
            ("pressure_relative", vec![Some(755.2), Some(755.0), Some(754.8)]),
            ("wind_speed", vec![Some(3.0), Some(4.2), Some(2.8)]),
            ("wind_gust", vec![Some(6.1), Some(8.0), Some(5.5)]),
            ("solar_radiation", vec![Some(0.0), Some(120.0), Some(340.0)]),
            ("rain_rate", vec![Some(0.0), Some(0.0), Some(0.0)]),
        ],
    )
}

pub fn rainy_response() -> TimeSeriesResponse {
    let mut r = sample_response();
    r.datasets
        .insert("rain_rate".to_string(), vec![Some(0.0), Some(0.0), Some(0.5)]);
    r
}

/// Data source that answers from a script and records every query.
/// An exhausted script keeps repeating the fallback response.
#[derive(Clone)]
pub struct ScriptedSource {
    pub queries: Arc<Mutex<Vec<ChartQuery>>>,
    script: Arc<Mutex<VecDeque<Result<TimeSeriesResponse, FetchError>>>>,
    fallback: TimeSeriesResponse,
}

impl ScriptedSource {
    pub fn new(fallback: TimeSeriesResponse) -> Self {
        Self {
            queries: Arc::new(Mutex::new(Vec::new())),
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback,
        }
    }

    pub fn push(&self, result: Result<TimeSeriesResponse, FetchError>) {
        self.script.lock().unwrap().push_back(result);
    }

    pub fn queries(&self) -> Vec<ChartQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl ChartDataSource for ScriptedSource {
    async fn fetch_chart(&self, query: &ChartQuery) -> Result<TimeSeriesResponse, FetchError> {
        self.queries.lock().unwrap().push(query.clone());
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
