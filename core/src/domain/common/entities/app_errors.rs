use thiserror::Error;

use crate::domain::filter::errors::FilterError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(#[from] FilterError),

    #[error("Internal server error")]
    InternalServerError,
}
