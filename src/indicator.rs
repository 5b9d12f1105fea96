use crate::TaError;

use std::fmt::{Debug, Display};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (window size, smoothing factor, periods). Configs are value types: cheap
/// to copy, compare, and hash. They are validated when built, so an
/// indicator constructed from a config never fails.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + std::hash::Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Validates the collected parameters and builds the config.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when a required field is missing or a
    /// window size / period is zero.
    fn build(self) -> Result<Config, TaError>;
}

/// A streaming technical indicator.
///
/// Indicators own their state exclusively and update it one observation at
/// a time through [`update`](Indicator::update). Batch computation is the
/// same update folded over a sequence ([`batch`](Indicator::batch)), so the
/// two modes cannot diverge.
///
/// # Example
///
/// ```
/// use pulse_ta::{Indicator, Sma, SmaConfig};
///
/// let mut sma = Sma::new(SmaConfig::new(3).unwrap());
///
/// sma.update(3.0);
/// sma.update(6.0);
/// assert_eq!(sma.update(9.0), 6.0);
///
/// sma.reset();
/// assert_eq!(sma.get(), 0.0);
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// One observation. [`Price`](crate::Price) for single-series
    /// indicators, a tuple for multi-series ones.
    type Input: Copy;

    /// Value exposed after each update. `Option` where the indicator has
    /// nothing meaningful to report before its first observation(s).
    type Output: Copy + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds one observation and returns the updated value.
    fn update(&mut self, input: Self::Input) -> Self::Output;

    /// Returns the current value without advancing state.
    fn get(&self) -> Self::Output;

    /// Returns the indicator to its just-constructed state.
    fn reset(&mut self);

    /// Folds [`update`](Indicator::update) over `inputs`, collecting every
    /// intermediate output. State carries over from previous calls.
    fn batch<I>(&mut self, inputs: I) -> Vec<Self::Output>
    where
        I: IntoIterator<Item = Self::Input>,
    {
        crate::batch::run(self, inputs)
    }
}
