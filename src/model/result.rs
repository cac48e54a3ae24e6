use thiserror::Error;

#[derive(Error, Debug)]
pub enum VelocityError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid repository `{0}`, expected `owner/name`")]
    InvalidRepository(String),

    #[error("Milestone `{title}` not found in {repo}")]
    MilestoneNotFound { repo: String, title: String },

    #[error("Label `{name}` not found in {repo}")]
    LabelNotFound { repo: String, name: String },

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, VelocityError>;
