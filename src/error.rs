use thiserror::Error;

/// Errors raised by the scoring and projection engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl ProjectionError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
