use std::fmt::Display;

use crate::{
    Alpha, Indicator, IndicatorConfig, IndicatorConfigBuilder, Price, TaError, smoother::Smoother,
};

/// Configuration for the Exponential Moving Average ([`Ema`]) indicator.
///
/// Holds the default smoothing factor. [`Ema::forward`] may override it per
/// call.
///
/// # Example
///
/// ```
/// use pulse_ta::EmaConfig;
///
/// let by_alpha = EmaConfig::new(0.5).unwrap();
/// let by_period = EmaConfig::with_period(3).unwrap();
///
/// // α = 2 / (3 + 1)
/// assert_eq!(by_alpha, by_period);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    alpha: Alpha,
}

impl IndicatorConfig for EmaConfig {
    type Builder = EmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        EmaConfigBuilder::new()
    }
}

impl EmaConfig {
    /// EMA with an explicit smoothing factor in `(0, 1]`.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `alpha` is outside `(0, 1]` or not
    /// finite.
    pub fn new(alpha: f64) -> Result<Self, TaError> {
        Self::builder().alpha(alpha).build()
    }

    /// EMA with `α = 2 / (period + 1)`.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `period` is zero.
    pub fn with_period(period: usize) -> Result<Self, TaError> {
        Self::builder().period(period).build()
    }

    #[inline]
    #[must_use]
    pub fn alpha(&self) -> Alpha {
        self.alpha
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({})", self.alpha.value())
    }
}

#[derive(Clone, Copy)]
enum Smoothing {
    Alpha(f64),
    Period(usize),
}

/// Builder for [`EmaConfig`].
///
/// Exactly one of [`alpha`](Self::alpha) or [`period`](Self::period) must be
/// set; the last call wins.
pub struct EmaConfigBuilder {
    smoothing: Option<Smoothing>,
}

impl EmaConfigBuilder {
    fn new() -> Self {
        Self { smoothing: None }
    }

    /// Sets the smoothing factor directly.
    #[inline]
    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.smoothing.replace(Smoothing::Alpha(alpha));
        self
    }

    /// Derives the smoothing factor from a period: `2 / (period + 1)`.
    #[inline]
    #[must_use]
    pub fn period(mut self, period: usize) -> Self {
        self.smoothing.replace(Smoothing::Period(period));
        self
    }
}

impl IndicatorConfigBuilder<EmaConfig> for EmaConfigBuilder {
    fn build(self) -> Result<EmaConfig, TaError> {
        let alpha = match self.smoothing.ok_or_else(|| TaError::missing("alpha"))? {
            Smoothing::Alpha(alpha) => Alpha::new(alpha)?,
            Smoothing::Period(period) => Alpha::from_period(period)?,
        };

        Ok(EmaConfig { alpha })
    }
}

/// Exponential Moving Average (EMA).
///
/// A recursive weighted average that favours recent observations:
///
/// ```text
/// EMA₀ = x₀
/// EMAₙ = (1 − α) × EMAₙ₋₁ + α × xₙ
/// ```
///
/// The first observation seeds the average verbatim, with no blending.
/// [`get`](Ema::get) returns `None` until then. The smoothing factor can be
/// changed between updates with [`forward`](Ema::forward); the new factor
/// stays in effect for later [`update`](Indicator::update) calls.
///
/// # Example
///
/// ```
/// use pulse_ta::{Ema, EmaConfig};
///
/// let mut ema = Ema::new(EmaConfig::new(0.5).unwrap());
///
/// assert_eq!(ema.get(), None);
/// assert_eq!(ema.update(4.0), Some(4.0)); // seed
/// assert_eq!(ema.update(8.0), Some(6.0)); // 0.5 × 4 + 0.5 × 8
///
/// // Switch to α = 0.25 for this and later updates.
/// assert_eq!(ema.forward(10.0, 0.25).unwrap(), 7.0);
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    alpha: Alpha,
    smoother: Smoother,
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Input = Price;
    type Output = Option<Price>;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            alpha: config.alpha,
            smoother: Smoother::default(),
        }
    }

    #[inline]
    fn update(&mut self, value: Price) -> Option<Price> {
        Some(self.smoother.update(value, self.alpha))
    }

    #[inline]
    fn get(&self) -> Option<Price> {
        self.smoother.value()
    }

    /// Clears the seed and restores the configured smoothing factor.
    fn reset(&mut self) {
        self.alpha = self.config.alpha;
        self.smoother.reset();
    }
}

impl Ema {
    /// Smoothing factor used by the next update.
    #[inline]
    #[must_use]
    pub fn alpha(&self) -> Alpha {
        self.alpha
    }

    /// Updates with a per-call smoothing factor, which replaces the current
    /// one for subsequent updates.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `alpha` is outside `(0, 1]` or not
    /// finite; the state is left untouched.
    pub fn forward(&mut self, value: Price, alpha: f64) -> Result<Price, TaError> {
        self.alpha = Alpha::new(alpha)?;
        Ok(self.smoother.update(value, self.alpha))
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({})", self.alpha.value())
    }
}
