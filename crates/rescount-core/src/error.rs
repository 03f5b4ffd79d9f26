use thiserror::Error;

#[derive(Debug, Error)]
pub enum RescountError {
    #[error("config error: {0}")]
    Config(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("no movie or show section named {0:?}")]
    SectionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
