use std::{fmt::Display, num::NonZero};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Price, RollingWindow, TaError, non_zero,
};

/// Added to the average loss before dividing, so a window without losses
/// yields a huge but finite relative strength.
const EPSILON: f64 = 1e-10;

/// Configuration for the Relative Strength Index ([`Rsi`]) indicator.
///
/// # Example
///
/// ```
/// use pulse_ta::RsiConfig;
///
/// assert_eq!(RsiConfig::default().window_size(), 14);
/// assert_eq!(RsiConfig::new(5).unwrap().window_size(), 5);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    window_size: NonZero<usize>,
}

impl IndicatorConfig for RsiConfig {
    type Builder = RsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RsiConfigBuilder::new()
    }
}

impl RsiConfig {
    /// RSI averaging gains and losses over `window_size` price changes.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `window_size` is zero.
    pub fn new(window_size: usize) -> Result<Self, TaError> {
        Self::builder().window_size(window_size).build()
    }

    #[inline]
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size.get()
    }
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            window_size: RsiConfigBuilder::DEFAULT_WINDOW,
        }
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({})", self.window_size)
    }
}

/// Builder for [`RsiConfig`].
///
/// Defaults: window size = 14.
pub struct RsiConfigBuilder {
    window_size: usize,
}

impl RsiConfigBuilder {
    const DEFAULT_WINDOW: NonZero<usize> = non_zero(14);

    fn new() -> Self {
        Self {
            window_size: Self::DEFAULT_WINDOW.get(),
        }
    }

    #[inline]
    #[must_use]
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }
}

impl IndicatorConfigBuilder<RsiConfig> for RsiConfigBuilder {
    fn build(self) -> Result<RsiConfig, TaError> {
        Ok(RsiConfig {
            window_size: TaError::ensure_positive("window_size", self.window_size)?,
        })
    }
}

/// Relative Strength Index (RSI).
///
/// Momentum oscillator on a 0–100 scale built from first differences of
/// the input:
///
/// ```text
/// gain     = max(pₙ − pₙ₋₁, 0)
/// loss     = max(pₙ₋₁ − pₙ, 0)
/// avg_gain = Σ gain over the last W changes / W
/// avg_loss = Σ loss over the last W changes / W
/// RS       = avg_gain / (avg_loss + 1e-10)
/// RSI      = 100 − 100 / (1 + RS)
/// ```
///
/// The first price only primes the difference and produces no value.
/// Gains and losses live in zero-filled windows, so the first `W − 1`
/// values average over a left zero-padded window.
///
/// A series without losses tends to 100. A series without gains, including
/// a constant one, gives exactly 0.
///
/// # Example
///
/// ```
/// use pulse_ta::{Rsi, RsiConfig};
///
/// let mut rsi = Rsi::new(RsiConfig::new(2).unwrap());
///
/// assert_eq!(rsi.update(10.0), None);
/// assert_eq!(rsi.update(10.0), Some(0.0));
/// assert!(rsi.update(12.0).unwrap() > 99.9);
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
    prev_price: Option<Price>,
    gains: RollingWindow,
    losses: RollingWindow,
    current: Option<Price>,
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Input = Price;
    type Output = Option<Price>;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            prev_price: None,
            gains: RollingWindow::with_capacity(config.window_size),
            losses: RollingWindow::with_capacity(config.window_size),
            current: None,
        }
    }

    fn update(&mut self, price: Price) -> Option<Price> {
        let Some(prev) = self.prev_price.replace(price) else {
            return None;
        };

        let delta = price - prev;
        self.gains.push(delta.max(0.0));
        self.losses.push((-delta).max(0.0));

        // Running sums may leave tiny negative residue after long runs.
        let avg_gain = self.gains.mean().max(0.0);
        let avg_loss = self.losses.mean().max(0.0);

        let rs = avg_gain / (avg_loss + EPSILON);
        let rsi = 100.0 - 100.0 / (1.0 + rs);

        self.current = Some(rsi);
        self.current
    }

    #[inline]
    fn get(&self) -> Option<Price> {
        self.current
    }

    fn reset(&mut self) {
        self.prev_price = None;
        self.gains.reset();
        self.losses.reset();
        self.current = None;
    }
}

impl Rsi {
    /// `true` once `window_size` price changes have been seen.
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.gains.is_full()
    }

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
        let config = RsiConfig::new(window_size)?;

        tracing::debug!(
            from = self.config.window_size(),
            to = window_size,
            "rsi reconfigured, history dropped"
        );

        *self = <Self as Indicator>::new(config);
        Ok(())
    }

    /// RSI of a complete price series.
    ///
    /// Starts from a fresh state (reconfiguring first when `window_size`
    /// differs) and returns one value per price change, i.e.
    /// `prices.len() - 1` values, or none for fewer than two prices. The
    /// indicator is left in the state after the last price, so streaming
    /// can continue from there.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `window_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pulse_ta::{Rsi, RsiConfig};
    ///
    /// let mut rsi = Rsi::new(RsiConfig::default());
    /// let values = rsi.forward(&[1.0, 2.0, 3.0, 2.0], 3).unwrap();
    ///
    /// assert_eq!(values.len(), 3);
    /// assert_eq!(rsi.window_size(), 3);
    /// ```
    pub fn forward(&mut self, prices: &[Price], window_size: usize) -> Result<Vec<Price>, TaError> {
        if window_size == self.window_size() {
            <Self as Indicator>::reset(self);
        } else {
            self.reconfigure(window_size)?;
        }

        tracing::debug!(window_size, len = prices.len(), "rsi forward");

        Ok(prices
            .iter()
            .filter_map(|&price| <Self as Indicator>::update(self, price))
            .collect())
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({})", self.config.window_size)
    }
}
