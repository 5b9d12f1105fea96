use std::num::NonZero;

use thiserror::Error;

/// Errors returned by indicator construction and batch computation.
///
/// Both variants are caller bugs surfaced immediately: there is nothing to
/// retry, and no partial result is produced. Numeric degeneracy (for
/// example an RSI window with no losses) is not an error; it is a defined
/// numeric outcome of the indicator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaError {
    /// A window size, period or smoothing factor is outside its valid range,
    /// or a required builder field was never set.
    #[error("invalid {parameter}: {reason}")]
    Configuration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What the parameter must satisfy.
        reason: String,
    },

    /// Parallel input series have different lengths.
    #[error("shape mismatch: {series} has {actual} elements, expected {expected}")]
    Shape {
        /// Name of the series whose length disagrees.
        series: &'static str,
        /// Length of the reference series.
        expected: usize,
        /// Length of the offending series.
        actual: usize,
    },
}

impl TaError {
    #[must_use]
    pub(crate) fn configuration(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            parameter,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub(crate) fn missing(parameter: &'static str) -> Self {
        Self::configuration(parameter, "is required")
    }

    /// Rejects zero for window sizes and periods.
    pub(crate) fn ensure_positive(
        parameter: &'static str,
        value: usize,
    ) -> Result<NonZero<usize>, Self> {
        NonZero::new(value)
            .ok_or_else(|| Self::configuration(parameter, "must be greater than zero"))
    }

    pub(crate) fn ensure_same_len(
        series: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::Shape {
                series,
                expected,
                actual,
            })
        }
    }
}
