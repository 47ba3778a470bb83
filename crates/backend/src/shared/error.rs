use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::InvalidId(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for StatusCode {
    fn from(e: CatalogError) -> Self {
        if let CatalogError::Database(ref inner) = e {
            tracing::error!("Catalog request failed: {}", inner);
        }
        e.status()
    }
}
