use thiserror::Error;

/// Failures that can still abort a run once state has been read.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to serialize inventory: {0}")]
    Render(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
