use thiserror::Error;

#[derive(Error, Debug)]
pub enum CubeError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    LookupStatus { status: u16, url: String },

    #[error("Failed to load card pool: {0}")]
    FailedToLoadPool(String),

    #[error("CubeError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for CubeError {
    fn from(error: std::io::Error) -> Self {
        CubeError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for CubeError {
    fn from(error: reqwest::Error) -> Self {
        CubeError::Reqwest(Box::new(error))
    }
}
