use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Combinator requires at least one child condition")]
    EmptyCombinator,

    #[error("Unknown name: {0}")]
    UnknownName(String),
}
