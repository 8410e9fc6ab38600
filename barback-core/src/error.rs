use thiserror::Error;

/// Failure talking to the recipe catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Catalog request failed: {0}")]
    Network(String),

    #[error("Catalog returned HTTP {status}")]
    Upstream { status: u16 },

    #[error("Malformed catalog response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Transport and upstream failures may succeed on retry; bad payloads won't.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Network(_) | CatalogError::Upstream { .. })
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => CatalogError::Upstream {
                status: status.as_u16(),
            },
            None if err.is_decode() => CatalogError::Decode(err.to_string()),
            None => CatalogError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

/// Failure of a multi-ingredient search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search for {ingredient:?} could not complete: {source}")]
    Catalog {
        ingredient: String,
        #[source]
        source: CatalogError,
    },

    #[error("Search was cancelled")]
    Cancelled,
}

impl SearchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::Catalog { source, .. } => source.is_retryable(),
            SearchError::Cancelled => true,
        }
    }
}

/// Malformed translation or synonym table data.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Invalid table JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Failed to read table file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
