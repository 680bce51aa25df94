use thiserror::Error;

/// Everything that can stop a report from being produced.
///
/// The `Display` strings are what the user sees, so keep them stable.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Error fetching weather data: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Error fetching weather data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Error parsing weather data: Missing key '{0}'")]
    MissingKey(&'static str),

    #[error("Error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
