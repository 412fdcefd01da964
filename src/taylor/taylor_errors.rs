// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use std::fmt;

/// Error types for series construction, expansion and configuration
#[derive(Debug, Clone, PartialEq)]
pub enum TaylorError {
    /// truncation order must keep at least one coefficient
    InvalidTruncationOrder(usize),
    EmptyCoefficients,
    NonFiniteCoefficient { index: usize, value: f64 },
    NonFiniteCenter(f64),
    /// multiplicative inverse of a series whose constant term is zero
    DivisionByZero { center: f64 },
    /// special function or coefficient formula evaluated outside its real domain
    Domain {
        function: String,
        argument: f64,
        reason: String,
    },
    /// outer series is not expanded about the value the inner series takes at its center
    CenterMismatch { outer_center: f64, inner_value: f64 },
    /// sample grid for expansion tables
    InvalidSampling(String),
    Config(String),
    Io(String),
}

impl fmt::Display for TaylorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaylorError::InvalidTruncationOrder(order) => {
                write!(f, "Invalid truncation order {}: must be at least 1", order)
            }
            TaylorError::EmptyCoefficients => write!(f, "Series needs at least one coefficient"),
            TaylorError::NonFiniteCoefficient { index, value } => {
                write!(f, "Coefficient {} is not a finite number: {}", index, value)
            }
            TaylorError::NonFiniteCenter(center) => {
                write!(f, "Expansion center is not a finite number: {}", center)
            }
            TaylorError::DivisionByZero { center } => write!(
                f,
                "Division by a series with zero constant term (center {})",
                center
            ),
            TaylorError::Domain {
                function,
                argument,
                reason,
            } => write!(f, "Domain error in {} at {}: {}", function, argument, reason),
            TaylorError::CenterMismatch {
                outer_center,
                inner_value,
            } => write!(
                f,
                "Cannot compose: outer series is centered at {} but the inner series takes the value {} at its center",
                outer_center, inner_value
            ),
            TaylorError::InvalidSampling(msg) => write!(f, "Invalid sampling: {}", msg),
            TaylorError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            TaylorError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for TaylorError {}

impl From<std::io::Error> for TaylorError {
    fn from(err: std::io::Error) -> Self {
        TaylorError::Io(err.to_string())
    }
}

pub type TaylorResult<T> = std::result::Result<T, TaylorError>;

/// helper for the coefficient generators and the special functions
pub(crate) fn domain_error(function: &str, argument: f64, reason: &str) -> TaylorError {
    TaylorError::Domain {
        function: function.to_string(),
        argument,
        reason: reason.to_string(),
    }
}
