use std::{fmt::Display, num::NonZero};

use crate::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Price, RollingWindow, TaError};

/// Configuration for the Simple Moving Average ([`Sma`]) indicator.
///
/// # Example
///
/// ```rust
/// use pulse_ta::SmaConfig;
///
/// let config = SmaConfig::new(20).unwrap();
/// assert_eq!(config.window_size(), 20);
///
/// assert!(SmaConfig::new(0).is_err());
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaConfig {
    window_size: NonZero<usize>,
}

impl IndicatorConfig for SmaConfig {
    type Builder = SmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SmaConfigBuilder::new()
    }
}

impl SmaConfig {
    /// SMA over the last `window_size` observations.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `window_size` is zero.
    pub fn new(window_size: usize) -> Result<Self, TaError> {
        Self::builder().window_size(window_size).build()
    }

    /// Window length (number of observations).
    #[inline]
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size.get()
    }
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({})", self.window_size)
    }
}

/// Builder for [`SmaConfig`].
///
/// Window size must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct SmaConfigBuilder {
    window_size: Option<usize>,
}

impl SmaConfigBuilder {
    fn new() -> Self {
        Self { window_size: None }
    }

    /// Sets the window length.
    #[inline]
    #[must_use]
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size.replace(window_size);
        self
    }
}

impl IndicatorConfigBuilder<SmaConfig> for SmaConfigBuilder {
    fn build(self) -> Result<SmaConfig, TaError> {
        let window_size = self
            .window_size
            .ok_or_else(|| TaError::missing("window_size"))?;

        Ok(SmaConfig {
            window_size: TaError::ensure_positive("window_size", window_size)?,
        })
    }
}

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of the last *n* observations, where *n* is
/// the configured window size. Uses a running sum for O(1) updates.
///
/// # Cold start
///
/// The window starts zero-filled and the mean always divides by the full
/// window size, so before any update [`get`](Sma::get) returns `0.0` and the
/// first *n − 1* values are means over a zero-padded window. Use
/// [`is_ready`](Sma::is_ready) to know when the value is a true windowed mean.
///
/// # Example
///
/// ```rust
/// use pulse_ta::{Sma, SmaConfig};
///
/// let mut sma = Sma::new(SmaConfig::new(3).unwrap());
///
/// assert_eq!(sma.get(), 0.0);
/// sma.update(3.0); // (0 + 0 + 3) / 3
/// sma.update(6.0); // (0 + 3 + 6) / 3
/// assert!(!sma.is_ready());
/// assert_eq!(sma.update(9.0), 6.0);
/// assert!(sma.is_ready());
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
    window: RollingWindow,
}

impl Indicator for Sma {
    type Config = SmaConfig;
    type Input = Price;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            window: RollingWindow::with_capacity(config.window_size),
        }
    }

    #[inline]
    fn update(&mut self, value: Price) -> Price {
        self.window.push(value);
        self.window.mean()
    }

    #[inline]
    fn get(&self) -> Price {
        self.window.mean()
    }

    fn reset(&mut self) {
        self.window.reset();
    }
}

impl Sma {
    /// `true` once `window_size` observations have been seen since
    /// construction, the last reset, or the last reconfiguration.
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.window.is_full()
    }

    /// Current window length.
    #[inline]
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.config.window_size()
    }

    /// Switches to a new window length, dropping all history.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `window_size` is zero; the indicator
    /// is left untouched.
    pub fn reconfigure(&mut self, window_size: usize) -> Result<(), TaError> {
        let config = SmaConfig::new(window_size)?;

        tracing::debug!(
            from = self.config.window_size(),
            to = window_size,
            "sma reconfigured, history dropped"
        );

        *self = <Self as Indicator>::new(config);
        Ok(())
    }

    /// Updates with a per-call window size.
    ///
    /// When `window_size` differs from the current one this is
    /// [`reconfigure`](Self::reconfigure) followed by
    /// [`update`](Indicator::update); otherwise it is a plain update.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `window_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pulse_ta::{Sma, SmaConfig};
    ///
    /// let mut sma = Sma::new(SmaConfig::new(2).unwrap());
    /// sma.update(10.0);
    /// sma.update(20.0);
    ///
    /// // New window of 1: history is gone, only 4.0 counts.
    /// assert_eq!(sma.forward(4.0, 1).unwrap(), 4.0);
    /// ```
    pub fn forward(&mut self, value: Price, window_size: usize) -> Result<Price, TaError> {
        if window_size != self.window_size() {
            self.reconfigure(window_size)?;
        }

        Ok(<Self as Indicator>::update(self, value))
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({})", self.config.window_size)
    }
}
