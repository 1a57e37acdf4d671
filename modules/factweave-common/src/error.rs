use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactweaveError {
    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Entity recognition error: {0}")]
    Recognition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
