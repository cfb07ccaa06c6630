use thiserror::Error;

use crate::registry::RegistryError;

/// Crate-level error for construction and plumbing failures. Assignment and
/// release outcomes are returned as values, not through this type.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
