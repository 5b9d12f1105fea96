/// A price, or any value derived from prices.
///
/// Plain `f64` alias: indicators consume and produce slices and scalars of
/// this type, with no wrapper to construct or unwrap.
pub type Price = f64;

/// Bar-shaped input for the multi-series indicators.
///
/// Lets [`Ichimoku::forward_bars`](crate::Ichimoku::forward_bars) and
/// [`Ichimoku::update_bar`](crate::Ichimoku::update_bar) read bars directly
/// instead of parallel `high`/`low`/`close` slices. There is no timestamp:
/// position in the input is the only ordering.
///
/// # Example
///
/// ```
/// use pulse_ta::{Ohlcv, Price};
///
/// struct Candle {
///     high: f64,
///     low: f64,
///     close: f64,
/// }
///
/// impl Ohlcv for Candle {
///     fn high(&self) -> Price {
///         self.high
///     }
///     fn low(&self) -> Price {
///         self.low
///     }
///     fn close(&self) -> Price {
///         self.close
///     }
/// }
/// ```
pub trait Ohlcv {
    fn high(&self) -> Price;

    fn low(&self) -> Price;

    /// Closing price, or the latest trade of a bar still forming.
    fn close(&self) -> Price;
}
