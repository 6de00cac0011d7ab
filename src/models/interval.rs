// Chart bucket granularity (the `interval` query token)

use crate::error::UnknownInterval;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket size requested from the metrics API. Does not change the query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IntervalSelection {
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl IntervalSelection {
    pub const ALL: [IntervalSelection; 6] = [
        IntervalSelection::FiveMinutes,
        IntervalSelection::FifteenMinutes,
        IntervalSelection::OneHour,
        IntervalSelection::OneDay,
        IntervalSelection::OneWeek,
        IntervalSelection::OneMonth,
    ];

    /// Wire token, also carried by the selector controls as `data-interval`.
    pub fn token(self) -> &'static str {
        match self {
            IntervalSelection::FiveMinutes => "5m",
            IntervalSelection::FifteenMinutes => "15m",
            IntervalSelection::OneHour => "1h",
            IntervalSelection::OneDay => "1d",
            IntervalSelection::OneWeek => "1w",
            IntervalSelection::OneMonth => "1M",
        }
    }

    /// Case-sensitive: `1M` is a month, `1m` is not a token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.token() == token)
    }
}

impl fmt::Display for IntervalSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for IntervalSelection {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s.trim()).ok_or_else(|| UnknownInterval(s.to_string()))
    }
}
