use crate::{Price, TaError};

use std::{
    hash::{Hash, Hasher},
    num::NonZero,
};

/// Smoothing factor of an exponential smoother.
///
/// Wraps a finite `f64` in `(0, 1]`. Implements `Eq` and `Hash` via
/// bit-level comparison, which is safe because NaN is rejected at
/// construction.
///
/// # Example
///
/// ```
/// use pulse_ta::Alpha;
///
/// let alpha = Alpha::from_period(3).unwrap();
/// assert_eq!(alpha.value(), 0.5);
///
/// assert!(Alpha::new(0.0).is_err());
/// assert!(Alpha::new(1.5).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Alpha(f64);

impl Alpha {
    /// Creates a smoothing factor.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `value` is NaN, infinite, or outside
    /// `(0, 1]`.
    pub fn new(value: f64) -> Result<Self, TaError> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(TaError::configuration(
                "alpha",
                format!("must be a finite value in (0, 1], got {value}"),
            ))
        }
    }

    /// Standard period-derived factor: `2 / (period + 1)`.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `period` is zero.
    pub fn from_period(period: usize) -> Result<Self, TaError> {
        TaError::ensure_positive("period", period).map(Self::of_period)
    }

    /// Infallible [`from_period`](Self::from_period) for a validated period.
    #[must_use]
    pub(crate) fn of_period(period: NonZero<usize>) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self(2.0 / (period.get() + 1) as f64)
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Alpha {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Alpha {}

impl Hash for Alpha {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Exponential smoother state: one scalar plus an `initialized` flag.
///
/// The first update seeds the state with the observation verbatim; every
/// later update blends `(1 − α) × value + α × x`. The factor is supplied per
/// update so one smoother can change its decay rate between observations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Smoother {
    value: Price,
    initialized: bool,
}

impl Smoother {
    #[inline]
    pub(crate) fn update(&mut self, x: Price, alpha: Alpha) -> Price {
        if self.initialized {
            let a = alpha.value();
            self.value = (1.0 - a) * self.value + a * x;
        } else {
            self.value = x;
            self.initialized = true;
        }

        self.value
    }

    /// `None` until the first update.
    #[inline]
    pub(crate) fn value(&self) -> Option<Price> {
        self.initialized.then_some(self.value)
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
