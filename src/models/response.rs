// Chart endpoint response: shared label axis plus one series per metric key

use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Samples aligned to the label axis; `None` is a missing bucket (JSON `null`).
pub type Series = Vec<Option<f64>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesResponse {
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: BTreeMap<String, Series>,
}

impl TimeSeriesResponse {
    /// Each of `keys` present in the response must have exactly one sample per label.
    /// Datasets nobody asked for are not inspected.
    pub fn check_alignment<'a, I>(&self, keys: I) -> Result<(), FetchError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let expected = self.labels.len();
        for key in keys {
            if let Some(values) = self.datasets.get(key) {
                if values.len() != expected {
                    return Err(FetchError::Misaligned {
                        key: key.to_string(),
                        expected,
                        actual: values.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Series for `key`; an omitted key is an empty series, not an error.
    pub fn series(&self, key: &str) -> Series {
        self.datasets.get(key).cloned().unwrap_or_default()
    }
}
