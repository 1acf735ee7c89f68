use std::fmt;

use thiserror::Error;

/// Text shown in place of a result whenever input is rejected.
pub const INVALID_INPUT: &str = "Invalid input";

pub type Result<T> = std::result::Result<T, EstimateError>;

/// Why a raw value was rejected. Only used for logs; the user always sees [`INVALID_INPUT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Empty,
    NotANumber,
    NonFinite,
    Negative,
    TooLarge,
    UnsupportedQuantBits(u32),
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Empty => f.write_str("empty input"),
            InvalidReason::NotANumber => f.write_str("not a number"),
            InvalidReason::NonFinite => f.write_str("not a finite number"),
            InvalidReason::Negative => f.write_str("negative parameter count"),
            InvalidReason::TooLarge => f.write_str("parameter count too large to estimate"),
            InvalidReason::UnsupportedQuantBits(bits) => {
                write!(f, "unsupported quantization: {bits} bits (expected 32, 16, 8 or 4)")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("Invalid input")]
    InvalidInput { reason: InvalidReason },
}

impl EstimateError {
    pub fn invalid(reason: InvalidReason) -> Self {
        Self::InvalidInput { reason }
    }

    pub fn reason(&self) -> InvalidReason {
        match self {
            EstimateError::InvalidInput { reason } => *reason,
        }
    }
}
