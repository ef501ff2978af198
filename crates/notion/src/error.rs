use outline_engine::OutlineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NotionError>;

#[derive(Error, Debug)]
pub enum NotionError {
    #[error("{0} is not set; export a Notion integration token")]
    MissingApiKey(&'static str),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notion API returned {status}: {body}")]
    Api { status: u16, body: String },
}

impl From<NotionError> for OutlineError {
    fn from(err: NotionError) -> Self {
        OutlineError::Store(err.to_string())
    }
}
