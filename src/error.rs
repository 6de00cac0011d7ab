// Error types for the chart pipeline and host surfaces

/// A refresh that produced nothing to render. Logged, never surfaced on the page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("metrics API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode chart response: {0}")]
    Decode(String),

    #[error("dataset `{key}` has {actual} values for {expected} labels")]
    Misaligned {
        key: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    #[error("mount point `{0}` not found")]
    MountNotFound(String),

    #[error("rendering backend cannot attach to `{mount}`: {reason}")]
    Unsupported { mount: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartConfigError {
    #[error("axis bounds inverted: min {min} > max {max}")]
    InvalidBounds { min: f64, max: f64 },

    #[error("axis bound must be finite, got {0}")]
    NonFiniteBound(f64),

    #[error("override `{0}` given more than once")]
    DuplicateOverride(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interval token `{0}`")]
pub struct UnknownInterval(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme `{0}` (expected light or dark)")]
pub struct UnknownTheme(pub String);
