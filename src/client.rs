// Metrics API client for the chart endpoint

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::models::TimeSeriesResponse;
use crate::pipeline::ChartQuery;
use crate::version;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const CHART_PATH: &str = "/api/weather/chart";

/// Where chart data comes from. The HTTP client in production, scripted sources in tests.
#[async_trait]
pub trait ChartDataSource: Send + Sync {
    async fn fetch_chart(&self, query: &ChartQuery) -> Result<TimeSeriesResponse, FetchError>;
}

pub struct HttpChartClient {
    http_client: Client,
    base_url: String,
}

impl HttpChartClient {
    /// Without `request_timeout_secs` the transport default applies.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(version::USER_AGENT);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http_client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn chart_url(&self) -> String {
        format!("{}{}", self.base_url, CHART_PATH)
    }
}

#[async_trait]
impl ChartDataSource for HttpChartClient {
    async fn fetch_chart(&self, query: &ChartQuery) -> Result<TimeSeriesResponse, FetchError> {
        let url = self.chart_url();

        let response = self
            .http_client
            .get(&url)
            .query(&query.query_pairs())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let text = response.text().await.map_err(FetchError::Transport)?;
        let data: TimeSeriesResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::debug!(
                error = %e,
                body_preview = %text.chars().take(200).collect::<String>(),
                "failed to parse chart response"
            );
            FetchError::Decode(e.to_string())
        })?;
        data.check_alignment(query.fields.iter().copied())?;

        Ok(data)
    }
}
