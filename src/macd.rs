use std::{fmt::Display, num::NonZero};

use crate::{
    Alpha, Indicator, IndicatorConfig, IndicatorConfigBuilder, Price, TaError, non_zero,
    smoother::Smoother,
};

/// Configuration for the MACD ([`Macd`]) indicator.
///
/// # Example
///
/// ```
/// use pulse_ta::{IndicatorConfig, IndicatorConfigBuilder, MacdConfig};
///
/// let config = MacdConfig::default();
/// assert_eq!(
///     (config.short_period(), config.long_period(), config.signal_period()),
///     (12, 26, 9)
/// );
///
/// let fast = MacdConfig::builder().short_period(5).long_period(13).build().unwrap();
/// assert_eq!(fast.signal_period(), 9);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    short_period: NonZero<usize>,
    long_period: NonZero<usize>,
    signal_period: NonZero<usize>,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }
}

impl MacdConfig {
    /// MACD with explicit periods.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] naming the first period that is zero.
    pub fn new(
        short_period: usize,
        long_period: usize,
        signal_period: usize,
    ) -> Result<Self, TaError> {
        Self::builder()
            .short_period(short_period)
            .long_period(long_period)
            .signal_period(signal_period)
            .build()
    }

    /// Period of the fast EMA.
    #[inline]
    #[must_use]
    pub fn short_period(&self) -> usize {
        self.short_period.get()
    }

    /// Period of the slow EMA.
    #[inline]
    #[must_use]
    pub fn long_period(&self) -> usize {
        self.long_period.get()
    }

    /// Period of the EMA applied to the MACD line.
    #[inline]
    #[must_use]
    pub fn signal_period(&self) -> usize {
        self.signal_period.get()
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            short_period: MacdConfigBuilder::DEFAULT_SHORT,
            long_period: MacdConfigBuilder::DEFAULT_LONG,
            signal_period: MacdConfigBuilder::DEFAULT_SIGNAL,
        }
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {})",
            self.short_period, self.long_period, self.signal_period
        )
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: short = 12, long = 26, signal = 9.
pub struct MacdConfigBuilder {
    short_period: usize,
    long_period: usize,
    signal_period: usize,
}

impl MacdConfigBuilder {
    const DEFAULT_SHORT: NonZero<usize> = non_zero(12);
    const DEFAULT_LONG: NonZero<usize> = non_zero(26);
    const DEFAULT_SIGNAL: NonZero<usize> = non_zero(9);

    fn new() -> Self {
        Self {
            short_period: Self::DEFAULT_SHORT.get(),
            long_period: Self::DEFAULT_LONG.get(),
            signal_period: Self::DEFAULT_SIGNAL.get(),
        }
    }

    #[inline]
    #[must_use]
    pub fn short_period(mut self, period: usize) -> Self {
        self.short_period = period;
        self
    }

    #[inline]
    #[must_use]
    pub fn long_period(mut self, period: usize) -> Self {
        self.long_period = period;
        self
    }

    #[inline]
    #[must_use]
    pub fn signal_period(mut self, period: usize) -> Self {
        self.signal_period = period;
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    fn build(self) -> Result<MacdConfig, TaError> {
        Ok(MacdConfig {
            short_period: TaError::ensure_positive("short_period", self.short_period)?,
            long_period: TaError::ensure_positive("long_period", self.long_period)?,
            signal_period: TaError::ensure_positive("signal_period", self.signal_period)?,
        })
    }
}

/// MACD output for one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValue {
    macd: Price,
    signal: Price,
    histogram: Price,
}

impl MacdValue {
    /// MACD line: `short EMA − long EMA`.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Price {
        self.macd
    }

    /// Signal line: EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Price {
        self.signal
    }

    /// `macd − signal`.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Price {
        self.histogram
    }
}

/// The three MACD series of a batch computation, one element per input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub macd_line: Vec<Price>,
    pub signal_line: Vec<Price>,
    pub histogram: Vec<Price>,
}

impl MacdSeries {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            macd_line: Vec::with_capacity(capacity),
            signal_line: Vec::with_capacity(capacity),
            histogram: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd_line.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd_line.is_empty()
    }
}

impl Extend<MacdValue> for MacdSeries {
    fn extend<I: IntoIterator<Item = MacdValue>>(&mut self, iter: I) {
        for value in iter {
            self.macd_line.push(value.macd);
            self.signal_line.push(value.signal);
            self.histogram.push(value.histogram);
        }
    }
}

/// One exponential smoother with its fixed smoothing factor.
#[derive(Clone, Copy, Debug)]
struct Leg {
    alpha: Alpha,
    smoother: Smoother,
}

impl Leg {
    fn new(period: NonZero<usize>) -> Self {
        Self {
            alpha: Alpha::of_period(period),
            smoother: Smoother::default(),
        }
    }

    #[inline]
    fn update(&mut self, value: Price) -> Price {
        self.smoother.update(value, self.alpha)
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// Composes three independent exponential smoothers, each with
/// `α = 2 / (period + 1)` and seeded with its first input:
///
/// ```text
/// macd      = EMA_short(x) − EMA_long(x)
/// signal    = EMA_signal(macd)
/// histogram = macd − signal
/// ```
///
/// Both EMAs seed from the same first observation, so the first MACD value
/// is exactly zero and so are its signal and histogram.
///
/// # Example
///
/// ```
/// use pulse_ta::{Macd, MacdConfig};
///
/// let mut macd = Macd::new(MacdConfig::new(3, 6, 4).unwrap());
///
/// let first = macd.update(1.0).unwrap();
/// assert_eq!(first.macd(), 0.0);
///
/// let second = macd.update(2.0).unwrap();
/// assert!(second.macd() > 0.0);
/// assert_eq!(second.histogram(), second.macd() - second.signal());
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    short: Leg,
    long: Leg,
    signal: Leg,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Input = Price;
    type Output = Option<MacdValue>;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            short: Leg::new(config.short_period),
            long: Leg::new(config.long_period),
            signal: Leg::new(config.signal_period),
            current: None,
        }
    }

    fn update(&mut self, value: Price) -> Option<MacdValue> {
        let macd = self.short.update(value) - self.long.update(value);
        let signal = self.signal.update(macd);

        self.current = Some(MacdValue {
            macd,
            signal,
            histogram: macd - signal,
        });
        self.current
    }

    #[inline]
    fn get(&self) -> Option<MacdValue> {
        self.current
    }

    fn reset(&mut self) {
        *self = <Self as Indicator>::new(self.config);
    }
}

impl Default for Macd {
    fn default() -> Self {
        <Self as Indicator>::new(MacdConfig::default())
    }
}

impl Macd {
    #[inline]
    #[must_use]
    pub fn config(&self) -> MacdConfig {
        self.config
    }

    /// MACD line of `data`: `EMA_short − EMA_long`, both smoothers fresh.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when either period is zero.
    pub fn macd_line(
        data: &[Price],
        short_period: usize,
        long_period: usize,
    ) -> Result<Vec<Price>, TaError> {
        let mut short = Leg::new(TaError::ensure_positive("short_period", short_period)?);
        let mut long = Leg::new(TaError::ensure_positive("long_period", long_period)?);

        Ok(data.iter().map(|&x| short.update(x) - long.update(x)).collect())
    }

    /// Signal line: a fresh EMA over `macd_line`.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `signal_period` is zero.
    pub fn signal_line(macd_line: &[Price], signal_period: usize) -> Result<Vec<Price>, TaError> {
        let mut signal = Leg::new(TaError::ensure_positive("signal_period", signal_period)?);

        Ok(macd_line.iter().map(|&x| signal.update(x)).collect())
    }

    /// Element-wise `macd_line − signal_line`.
    ///
    /// # Errors
    ///
    /// [`TaError::Shape`] when the two series differ in length.
    pub fn histogram(macd_line: &[Price], signal_line: &[Price]) -> Result<Vec<Price>, TaError> {
        TaError::ensure_same_len("signal_line", macd_line.len(), signal_line.len())?;

        Ok(macd_line
            .iter()
            .zip(signal_line)
            .map(|(macd, signal)| macd - signal)
            .collect())
    }

    /// All three MACD series of `data` for the given periods.
    ///
    /// The periods replace the instance configuration and the computation
    /// starts from fresh smoothers. Afterwards the indicator holds the state
    /// after the last element, so streaming can continue from there.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when any period is zero; the indicator is
    /// left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use pulse_ta::Macd;
    ///
    /// let data: Vec<f64> = (1..=10).map(f64::from).collect();
    /// let mut macd = Macd::default();
    /// let series = macd.forward(&data, 3, 6, 4).unwrap();
    ///
    /// assert_eq!(series.len(), 10);
    /// assert_eq!(series.macd_line[0], 0.0);
    /// assert_eq!(macd.config().short_period(), 3);
    /// ```
    pub fn forward(
        &mut self,
        data: &[Price],
        short_period: usize,
        long_period: usize,
        signal_period: usize,
    ) -> Result<MacdSeries, TaError> {
        let config = MacdConfig::new(short_period, long_period, signal_period)?;

        if config != self.config {
            tracing::debug!(from = %self.config, to = %config, "macd periods re-derived");
        }
        *self = <Self as Indicator>::new(config);

        let mut series = MacdSeries::with_capacity(data.len());
        series.extend(data.iter().filter_map(|&x| <Self as Indicator>::update(self, x)));

        Ok(series)
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {})",
            self.config.short_period, self.config.long_period, self.config.signal_period
        )
    }
}
