// HTTP client tests against a local chart endpoint

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use weather_charts::client::{CHART_PATH, ChartDataSource, HttpChartClient};
use weather_charts::config::ApiConfig;
use weather_charts::error::FetchError;
use weather_charts::models::IntervalSelection;
use weather_charts::pipeline::ChartQuery;

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: &'static str,
    seen: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn chart(State(stub): State<Stub>, Query(params): Query<HashMap<String, String>>) -> Response {
    stub.seen.lock().unwrap().push(params);
    (
        stub.status,
        [("content-type", "application/json")],
        stub.body,
    )
        .into_response()
}

/// Serve `body` with `status` on an ephemeral port; returns the client and the recorded queries.
async fn serve(
    status: StatusCode,
    body: &'static str,
) -> (HttpChartClient, Arc<Mutex<Vec<HashMap<String, String>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().route(CHART_PATH, get(chart)).with_state(Stub {
        status,
        body,
        seen: seen.clone(),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = HttpChartClient::new(&ApiConfig {
        base_url: format!("http://{}/", addr),
        request_timeout_secs: Some(5),
    })
    .unwrap();
    (client, seen)
}

fn query() -> ChartQuery {
    ChartQuery::new(
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        24,
        IntervalSelection::OneMonth,
        vec!["temp_outdoor", "wind_speed", "wind_gust"],
    )
}

#[tokio::test]
async fn fetch_sends_window_interval_and_fields() {
    let body = r#"{"labels": ["2024-01-15 09:00", "2024-01-15 10:00"],
                   "datasets": {"temp_outdoor": [1.5, null], "wind_speed": [2, 3], "wind_gust": [4, 5]}}"#;
    let (client, seen) = serve(StatusCode::OK, body).await;

    let response = client.fetch_chart(&query()).await.expect("fetch");
    assert_eq!(response.labels.len(), 2);
    assert_eq!(response.series("temp_outdoor"), vec![Some(1.5), None]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let params = &seen[0];
    assert_eq!(params["from"], "2024-01-14");
    assert_eq!(params["to"], "2024-01-15");
    assert_eq!(params["interval"], "1M");
    assert_eq!(params["fields"], "temp_outdoor,wind_speed,wind_gust");
}

#[test]
fn chart_url_trims_trailing_slash() {
    let client = HttpChartClient::new(&ApiConfig {
        base_url: "http://wx.local:8080/".to_string(),
        request_timeout_secs: None,
    })
    .unwrap();
    assert_eq!(client.chart_url(), "http://wx.local:8080/api/weather/chart");
}

#[tokio::test]
async fn non_success_status_is_status_error() {
    let (client, _) = serve(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"db down"}"#).await;
    match client.fetch_chart(&query()).await {
        Err(FetchError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("db down"));
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let (client, _) = serve(StatusCode::OK, "<html>gateway</html>").await;
    let err = client.fetch_chart(&query()).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn misaligned_dataset_is_rejected() {
    let (client, _) = serve(
        StatusCode::OK,
        r#"{"labels": ["a", "b"], "datasets": {"wind_speed": [1]}}"#,
    )
    .await;
    let err = client.fetch_chart(&query()).await.unwrap_err();
    assert!(matches!(err, FetchError::Misaligned { .. }), "got {:?}", err);
}

#[tokio::test]
async fn misaligned_unrequested_dataset_is_ignored() {
    let (client, _) = serve(
        StatusCode::OK,
        r#"{"labels": ["a", "b"],
            "datasets": {"temp_outdoor": [1, 2], "wind_speed": [1, 2], "wind_gust": [3, 4],
                         "indoor_raw": [1, 2, 3]}}"#,
    )
    .await;
    let response = client.fetch_chart(&query()).await.expect("requested keys are aligned");
    assert_eq!(response.series("wind_gust"), vec![Some(3.0), Some(4.0)]);
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpChartClient::new(&ApiConfig {
        base_url: format!("http://{}", addr),
        request_timeout_secs: Some(2),
    })
    .unwrap();
    let err = client.fetch_chart(&query()).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {:?}", err);
}
