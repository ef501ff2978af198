use thiserror::Error;

pub type Result<T> = std::result::Result<T, OutlineError>;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("No page found for query '{0}'")]
    PageNotFound(String),

    #[error("Heading block {block_id} has no text payload")]
    MissingText { block_id: String },

    #[error("Container {container_id} reported more children without a cursor")]
    MissingCursor { container_id: String },

    #[error("{0}")]
    Other(String),
}
