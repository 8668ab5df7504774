use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Item catalog loading errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Session-level failures surfaced to the operator as run notices.
#[derive(Error, Debug, Clone)]
pub enum SessionError {
    #[error("counterpart '{name}' is not present in the session")]
    TargetNotFound { name: String },

    #[error("counterpart '{name}' is the local player")]
    TargetIsSelf { name: String },

    #[error("inventory snapshot unavailable: {0}")]
    InventoryUnavailable(String),

    #[error("inventory snapshot is empty, nothing to send")]
    EmptyInventory,

    #[error("session bridge unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
