use thiserror::Error;

use crate::domain::filter::{schema::DeclaredType, value_objects::FilterOperator};

/// Client-input errors raised while compiling query parameters.
///
/// None of them are retriable; the HTTP layer maps every variant to a 4xx.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown attribute: {attribute} in path: {path}")]
    UnknownAttribute { attribute: String, path: String },

    #[error("Unknown association: {segment} in path: {path}")]
    UnknownAssociation { segment: String, path: String },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("The operator {0} is not supported")]
    UnsupportedOperator(String),

    #[error("Comparison operator {operator} is not supported for {declared_type} type")]
    UnsupportedComparison {
        declared_type: DeclaredType,
        operator: FilterOperator,
    },

    #[error("Cannot convert '{raw}' to {target} for {path}[{operator}]")]
    Coercion {
        path: String,
        operator: FilterOperator,
        raw: String,
        target: DeclaredType,
    },

    #[error("Empty value list for {path}[in]")]
    EmptyList { path: String },

    #[error("Cannot sort by {path}: it goes through a to-many association")]
    UnsupportedSort { path: String },
}
