use thiserror::Error;

#[derive(Debug, Error)]
pub enum JqPanelError {
    #[error("{0} not found.\n\nInstall jq from: https://jqlang.org/download/")]
    JqNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
