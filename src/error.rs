//! Error types for simdavg operations.
//!
//! Kernels and the benchmark harness report malformed input through
//! [`SimdavgError`] instead of panicking or reading out of bounds.

use std::fmt;

/// Errors that can occur during simdavg operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimdavgError {
    /// An argument was rejected before any computation started.
    InvalidArgument {
        /// Human-readable error message.
        message: String,
    },
    /// The worker pool used for parallel fan-out could not be built.
    ThreadPool {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for SimdavgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimdavgError::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
            SimdavgError::ThreadPool { message } => {
                write!(f, "Worker pool error: {}", message)
            }
        }
    }
}

impl std::error::Error for SimdavgError {}

impl From<rayon::ThreadPoolBuildError> for SimdavgError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        thread_pool_error(err.to_string())
    }
}

/// Result type alias for simdavg operations.
pub type Result<T> = std::result::Result<T, SimdavgError>;

/// Creates an invalid argument error.
pub fn invalid_argument(message: impl Into<String>) -> SimdavgError {
    SimdavgError::InvalidArgument {
        message: message.into(),
    }
}

/// Creates a worker pool error.
pub fn thread_pool_error(message: impl Into<String>) -> SimdavgError {
    SimdavgError::ThreadPool {
        message: message.into(),
    }
}

/// Fails with [`SimdavgError::InvalidArgument`] unless every slice has the length of the first.
pub(crate) fn ensure_same_len(slices: &[&[f64]]) -> Result<()> {
    let Some((first, rest)) = slices.split_first() else {
        return Ok(());
    };

    for (idx, other) in rest.iter().enumerate() {
        if other.len() != first.len() {
            return Err(invalid_argument(format!(
                "input slices must have the same length (input 0 has {} elements, input {} has {})",
                first.len(),
                idx + 1,
                other.len()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let error = invalid_argument("input slices must have the same length");
        let display = format!("{}", error);
        assert!(display.contains("Invalid argument"));
        assert!(display.contains("input slices must have the same length"));
    }

    #[test]
    fn test_thread_pool_error_display() {
        let error = thread_pool_error("global pool already initialized");
        let display = format!("{}", error);
        assert!(display.contains("Worker pool error"));
        assert!(display.contains("global pool already initialized"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = invalid_argument("test");
        let error2 = invalid_argument("test");
        let error3 = thread_pool_error("test");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = invalid_argument("test error");

        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }

    #[test]
    fn test_ensure_same_len() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let short = [7.0];

        assert!(ensure_same_len(&[&a, &b]).is_ok());
        assert!(ensure_same_len(&[&a, &b, &b]).is_ok());
        assert!(ensure_same_len(&[]).is_ok());

        match ensure_same_len(&[&a, &b, &short]) {
            Err(SimdavgError::InvalidArgument { message }) => {
                assert!(message.contains("input 2 has 1"), "{message}");
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }
}
