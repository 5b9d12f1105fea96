//! Technical analysis indicators with one streaming update per indicator.
//!
//! Every indicator updates its own state one observation at a time. Batch
//! computation ([`batch::run`], [`Indicator::batch`] and the per-indicator
//! `forward` methods) folds that same update over a whole series, so the
//! streaming and batch results are identical.
//!
//! Each indicator type ([`Sma`], [`Ema`], [`Rsi`], [`Macd`], [`Ichimoku`])
//! exposes [`new`](Sma::new), [`update`](Sma::update), [`get`](Sma::get)
//! and [`reset`](Sma::reset) as inherent methods, so no trait import is
//! needed. Import [`Indicator`] only for generic code.
//!
//! Configs are validated when built and report problems as [`TaError`].
//! The crate logs through [`tracing`] and installs no subscriber.
//!
//! ```
//! use pulse_ta::{Rsi, RsiConfig};
//!
//! let mut rsi = Rsi::new(RsiConfig::new(3).unwrap());
//! for price in [44.0, 44.5, 43.8, 44.9, 45.2] {
//!     if let Some(value) = rsi.update(price) {
//!         assert!((0.0..=100.0).contains(&value));
//!     }
//! }
//! ```

use std::num::NonZero;

pub mod batch;
mod ema;
mod error;
mod ichimoku;
mod indicator;
mod macd;
mod ohlcv;
mod rolling_window;
mod rsi;
mod sma;
mod smoother;

pub use crate::error::TaError;
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::ohlcv::{Ohlcv, Price};
pub use crate::rolling_window::RollingWindow;
pub use crate::smoother::Alpha;

pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::ichimoku::{
    Ichimoku, IchimokuConfig, IchimokuConfigBuilder, IchimokuSeries, IchimokuValue,
};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdSeries, MacdValue};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder};

/// Compile-time `NonZero` for default periods.
pub(crate) const fn non_zero(n: usize) -> NonZero<usize> {
    match NonZero::new(n) {
        Some(n) => n,
        None => panic!("default period must be non-zero"),
    }
}

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $input:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::update`].
            #[inline]
            pub fn update(&mut self, input: $input) -> $output {
                <Self as Indicator>::update(self, input)
            }

            /// See [`Indicator::get`].
            #[must_use]
            #[inline]
            pub fn get(&self) -> $output {
                <Self as Indicator>::get(self)
            }

            /// See [`Indicator::reset`].
            #[inline]
            pub fn reset(&mut self) {
                <Self as Indicator>::reset(self);
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price, Price);
impl_indicator_methods!(Ema, EmaConfig, Price, Option<Price>);
impl_indicator_methods!(Rsi, RsiConfig, Price, Option<Price>);
impl_indicator_methods!(Macd, MacdConfig, Price, Option<MacdValue>);
impl_indicator_methods!(Ichimoku, IchimokuConfig, (Price, Price), Option<IchimokuValue>);

#[cfg(test)]
mod test_util;
