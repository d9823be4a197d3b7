use thiserror::Error;

pub type GasResult<T> = Result<T, GasError>;

/// Broad classification of a [`GasError`], used by callers that only care
/// about which side of the pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Arithmetic fault caused by bad hardware input.
    Domain,
    /// A parameter handed to the core is out of its valid range.
    InvalidArgument,
    /// The voltage source could not produce a reading.
    Transport,
}

#[derive(Debug, Error)]
pub enum GasError {
    #[error("voltage must be positive to derive a resistance, got {voltage}")]
    NonPositiveVoltage { voltage: f64 },

    #[error("resistance ratio must be positive to evaluate a gas curve, got {ratio}")]
    NonPositiveRatio { ratio: f64 },

    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    #[error("voltage source failed")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GasError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GasError::NonPositiveVoltage { .. } | GasError::NonPositiveRatio { .. } => {
                ErrorKind::Domain
            }
            GasError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            GasError::Transport(_) => ErrorKind::Transport,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: &'static str) -> Self {
        GasError::InvalidArgument { name, reason }
    }

    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GasError::Transport(Box::new(err))
    }
}
