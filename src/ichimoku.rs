use std::{fmt::Display, num::NonZero};

use crate::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, TaError, non_zero};

/// Configuration for the Ichimoku Cloud ([`Ichimoku`]) indicator.
///
/// # Example
///
/// ```
/// use pulse_ta::{IchimokuConfig, IndicatorConfig, IndicatorConfigBuilder};
///
/// let config = IchimokuConfig::default();
/// assert_eq!(config.base_period(), 26);
///
/// let short = IchimokuConfig::builder().base_period(13).build().unwrap();
/// assert_eq!(short.conversion_period(), 9);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct IchimokuConfig {
    conversion_period: NonZero<usize>,
    base_period: NonZero<usize>,
    span_b_period: NonZero<usize>,
}

impl IndicatorConfig for IchimokuConfig {
    type Builder = IchimokuConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        IchimokuConfigBuilder::new()
    }
}

impl IchimokuConfig {
    /// Ichimoku with explicit periods.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] naming the first period that is zero.
    pub fn new(
        conversion_period: usize,
        base_period: usize,
        span_b_period: usize,
    ) -> Result<Self, TaError> {
        Self::builder()
            .conversion_period(conversion_period)
            .base_period(base_period)
            .span_b_period(span_b_period)
            .build()
    }

    /// Period of the conversion line (tenkan-sen).
    #[inline]
    #[must_use]
    pub fn conversion_period(&self) -> usize {
        self.conversion_period.get()
    }

    /// Period of the base line (kijun-sen), also the chikou shift.
    #[inline]
    #[must_use]
    pub fn base_period(&self) -> usize {
        self.base_period.get()
    }

    /// Period of leading span B.
    #[inline]
    #[must_use]
    pub fn span_b_period(&self) -> usize {
        self.span_b_period.get()
    }
}

impl Default for IchimokuConfig {
    fn default() -> Self {
        Self {
            conversion_period: IchimokuConfigBuilder::DEFAULT_CONVERSION,
            base_period: IchimokuConfigBuilder::DEFAULT_BASE,
            span_b_period: IchimokuConfigBuilder::DEFAULT_SPAN_B,
        }
    }
}

impl Display for IchimokuConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IchimokuConfig({}, {}, {})",
            self.conversion_period, self.base_period, self.span_b_period
        )
    }
}

/// Builder for [`IchimokuConfig`].
///
/// Defaults: conversion = 9, base = 26, span B = 52.
pub struct IchimokuConfigBuilder {
    conversion_period: usize,
    base_period: usize,
    span_b_period: usize,
}

impl IchimokuConfigBuilder {
    const DEFAULT_CONVERSION: NonZero<usize> = non_zero(9);
    const DEFAULT_BASE: NonZero<usize> = non_zero(26);
    const DEFAULT_SPAN_B: NonZero<usize> = non_zero(52);

    fn new() -> Self {
        Self {
            conversion_period: Self::DEFAULT_CONVERSION.get(),
            base_period: Self::DEFAULT_BASE.get(),
            span_b_period: Self::DEFAULT_SPAN_B.get(),
        }
    }

    #[inline]
    #[must_use]
    pub fn conversion_period(mut self, period: usize) -> Self {
        self.conversion_period = period;
        self
    }

    #[inline]
    #[must_use]
    pub fn base_period(mut self, period: usize) -> Self {
        self.base_period = period;
        self
    }

    #[inline]
    #[must_use]
    pub fn span_b_period(mut self, period: usize) -> Self {
        self.span_b_period = period;
        self
    }
}

impl IndicatorConfigBuilder<IchimokuConfig> for IchimokuConfigBuilder {
    fn build(self) -> Result<IchimokuConfig, TaError> {
        Ok(IchimokuConfig {
            conversion_period: TaError::ensure_positive(
                "conversion_period",
                self.conversion_period,
            )?,
            base_period: TaError::ensure_positive("base_period", self.base_period)?,
            span_b_period: TaError::ensure_positive("span_b_period", self.span_b_period)?,
        })
    }
}

/// Blend weight `k = (p − 1) / p` of the lag-1 kernel.
#[derive(Clone, Copy, Debug)]
struct Weight(f64);

impl Weight {
    #[allow(clippy::cast_precision_loss)]
    fn new(period: NonZero<usize>) -> Self {
        let period = period.get() as f64;
        Self((period - 1.0) / period)
    }

    #[inline]
    fn blend(self, prev: Price, current: Price) -> Price {
        self.0 * prev + (1.0 - self.0) * current
    }

    /// Midpoint of the blended high and blended low.
    #[inline]
    fn midpoint(self, prev: (Price, Price), current: (Price, Price)) -> Price {
        (self.blend(prev.0, current.0) + self.blend(prev.1, current.1)) / 2.0
    }
}

/// The four kernel lines of Ichimoku for one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IchimokuValue {
    conversion: Price,
    base: Price,
    span_a: Price,
    span_b: Price,
}

impl IchimokuValue {
    const ZERO: Self = Self {
        conversion: 0.0,
        base: 0.0,
        span_a: 0.0,
        span_b: 0.0,
    };

    /// Conversion line (tenkan-sen).
    #[inline]
    #[must_use]
    pub fn conversion(&self) -> Price {
        self.conversion
    }

    /// Base line (kijun-sen).
    #[inline]
    #[must_use]
    pub fn base(&self) -> Price {
        self.base
    }

    /// Leading span A: `(conversion + base) / 2`.
    #[inline]
    #[must_use]
    pub fn span_a(&self) -> Price {
        self.span_a
    }

    /// Leading span B.
    #[inline]
    #[must_use]
    pub fn span_b(&self) -> Price {
        self.span_b
    }
}

/// The five Ichimoku series of a batch computation, each as long as the
/// input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IchimokuSeries {
    pub conversion_line: Vec<Price>,
    pub base_line: Vec<Price>,
    pub span_a: Vec<Price>,
    pub span_b: Vec<Price>,
    /// `close[i + base_period]`, NaN where that index is past the end.
    pub chikou_span: Vec<Price>,
}

impl IchimokuSeries {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.conversion_line.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversion_line.is_empty()
    }
}

/// Ichimoku Cloud.
///
/// Every line is built from a lag-1 blend of adjacent samples rather than
/// a recursive average. For a period `p`, with `k = (p − 1) / p`:
///
/// ```text
/// kernel(x, p)[0] = 0
/// kernel(x, p)[i] = k × x[i−1] + (1 − k) × x[i]
///
/// conversion = (kernel(high, conv)   + kernel(low, conv))   / 2
/// base       = (kernel(high, base)   + kernel(low, base))   / 2
/// span_a     = (conversion + base) / 2
/// span_b     = (kernel(high, span_b) + kernel(low, span_b)) / 2
/// chikou[i]  = close[i + base_period]
/// ```
///
/// Streaming [`update`](Indicator::update) takes a `(high, low)` pair and
/// produces the four kernel lines; its only state is the previous pair.
/// The chikou span looks ahead and exists only in
/// [`forward`](Ichimoku::forward).
///
/// # Example
///
/// ```
/// use pulse_ta::{Ichimoku, IchimokuConfig};
///
/// let mut cloud = Ichimoku::new(IchimokuConfig::new(2, 2, 4).unwrap());
///
/// // The first bar has no predecessor: every line is zero.
/// assert_eq!(cloud.update((10.0, 8.0)).unwrap().conversion(), 0.0);
///
/// // k = 1/2: (10.5 + 8.5) / 2
/// assert_eq!(cloud.update((11.0, 9.0)).unwrap().conversion(), 9.5);
/// ```
#[derive(Clone, Debug)]
pub struct Ichimoku {
    config: IchimokuConfig,
    conversion: Weight,
    base: Weight,
    span_b: Weight,
    prev: Option<(Price, Price)>,
    current: Option<IchimokuValue>,
}

impl Indicator for Ichimoku {
    type Config = IchimokuConfig;
    type Input = (Price, Price);
    type Output = Option<IchimokuValue>;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            conversion: Weight::new(config.conversion_period),
            base: Weight::new(config.base_period),
            span_b: Weight::new(config.span_b_period),
            prev: None,
            current: None,
        }
    }

    fn update(&mut self, bar: (Price, Price)) -> Option<IchimokuValue> {
        let value = match self.prev.replace(bar) {
            None => IchimokuValue::ZERO,
            Some(prev) => {
                let conversion = self.conversion.midpoint(prev, bar);
                let base = self.base.midpoint(prev, bar);

                IchimokuValue {
                    conversion,
                    base,
                    span_a: (conversion + base) / 2.0,
                    span_b: self.span_b.midpoint(prev, bar),
                }
            }
        };

        self.current = Some(value);
        self.current
    }

    #[inline]
    fn get(&self) -> Option<IchimokuValue> {
        self.current
    }

    fn reset(&mut self) {
        self.prev = None;
        self.current = None;
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        <Self as Indicator>::new(IchimokuConfig::default())
    }
}

impl Ichimoku {
    #[inline]
    #[must_use]
    pub fn config(&self) -> IchimokuConfig {
        self.config
    }

    /// Streaming update from a bar.
    #[inline]
    pub fn update_bar(&mut self, bar: &impl Ohlcv) -> Option<IchimokuValue> {
        <Self as Indicator>::update(self, (bar.high(), bar.low()))
    }

    /// Lag-1 blend kernel of `x` for `period`.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `period` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pulse_ta::Ichimoku;
    ///
    /// // k = 3/4
    /// let out = Ichimoku::kernel(&[4.0, 8.0, 0.0], 4).unwrap();
    /// assert_eq!(out, vec![0.0, 5.0, 6.0]);
    /// ```
    pub fn kernel(x: &[Price], period: usize) -> Result<Vec<Price>, TaError> {
        let weight = Weight::new(TaError::ensure_positive("period", period)?);

        if x.is_empty() {
            return Ok(Vec::new());
        }

        let mut out = Vec::with_capacity(x.len());
        out.push(0.0);
        out.extend(x.windows(2).map(|pair| weight.blend(pair[0], pair[1])));

        Ok(out)
    }

    /// All five Ichimoku series of parallel high/low/close inputs.
    ///
    /// Starts from a fresh state and leaves the indicator in the state after
    /// the last bar. Chikou positions whose source index `i + base_period`
    /// is past the end are `NaN`.
    ///
    /// # Errors
    ///
    /// [`TaError::Shape`] when `low` or `close` differs in length from
    /// `high`. Nothing is computed in that case.
    pub fn forward(
        &mut self,
        high: &[Price],
        low: &[Price],
        close: &[Price],
    ) -> Result<IchimokuSeries, TaError> {
        TaError::ensure_same_len("low", high.len(), low.len())?;
        TaError::ensure_same_len("close", high.len(), close.len())?;

        Ok(self.fold(high.iter().copied().zip(low.iter().copied()), close))
    }

    /// [`forward`](Self::forward) over bar-shaped input.
    pub fn forward_bars<B: Ohlcv>(&mut self, bars: &[B]) -> IchimokuSeries {
        let close: Vec<Price> = bars.iter().map(Ohlcv::close).collect();
        self.fold(bars.iter().map(|bar| (bar.high(), bar.low())), &close)
    }

    fn fold(
        &mut self,
        bars: impl ExactSizeIterator<Item = (Price, Price)>,
        close: &[Price],
    ) -> IchimokuSeries {
        <Self as Indicator>::reset(self);

        let len = bars.len();
        let mut series = IchimokuSeries {
            conversion_line: Vec::with_capacity(len),
            base_line: Vec::with_capacity(len),
            span_a: Vec::with_capacity(len),
            span_b: Vec::with_capacity(len),
            chikou_span: Self::chikou(close, self.config.base_period()),
        };

        for bar in bars {
            if let Some(value) = <Self as Indicator>::update(self, bar) {
                series.conversion_line.push(value.conversion);
                series.base_line.push(value.base);
                series.span_a.push(value.span_a);
                series.span_b.push(value.span_b);
            }
        }

        tracing::debug!(indicator = %self, len, "ichimoku forward");

        series
    }

    fn chikou(close: &[Price], shift: usize) -> Vec<Price> {
        (0..close.len())
            .map(|i| {
                i.checked_add(shift)
                    .and_then(|j| close.get(j))
                    .copied()
                    .unwrap_or(f64::NAN)
            })
            .collect()
    }
}

impl Display for Ichimoku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ichimoku({}, {}, {})",
            self.config.conversion_period, self.config.base_period, self.config.span_b_period
        )
    }
}
