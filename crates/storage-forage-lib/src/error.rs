use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForageError>;

/// Errors surfaced by the projection core.
///
/// Pricing functions never fail for validated inputs, so every error here
/// originates at a boundary: parameter validation or a registry lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForageError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

impl ForageError {
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        ForageError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, ForageError::InvalidParameter { .. })
    }

    pub fn is_unknown_provider(&self) -> bool {
        matches!(self, ForageError::UnknownProvider(_))
    }
}
