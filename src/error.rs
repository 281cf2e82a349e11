use thiserror::Error;

use crate::levels::LevelId;

/// A level or tracker configuration that cannot produce questions.
///
/// These are programmer errors in the level table or config file; nothing in
/// the crate tries to recover from them once a level is running.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Arithmetic levels need at least two operands.
    #[error("expected at least 2 coefficients, got {got}")]
    TooFewCoefficients { got: u32 },

    #[error("operation set is empty")]
    NoOperations,

    /// `*` may only appear on its own.
    #[error("multiplication cannot be combined with other operations")]
    MixedMultiplication,

    #[error("invalid hour range {min}..={max} (must lie within 1..=12)")]
    InvalidHourRange { min: u32, max: u32 },

    #[error("minute step {0} is outside 1..=60")]
    InvalidMinuteStep(u32),

    #[error("{name} must be at least 1")]
    InvalidThreshold { name: &'static str },

    #[error("anti-trivial chance {0} is outside 0.0..=1.0")]
    InvalidChance(f64),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no such level: {0}")]
    UnknownLevel(LevelId),
}
