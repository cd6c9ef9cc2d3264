//! Error conditions raised by the combat engine.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("unsupported action: {0}")]
    UnsupportedAction(String),
}

pub type Result<T> = std::result::Result<T, CombatError>;
