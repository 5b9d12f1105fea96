#![allow(dead_code)]

use pulse_ta::{Ohlcv, Price};
use serde::{Deserialize, de::DeserializeOwned};

/// Synthetic high/low/close bar parsed from CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub index: usize,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlcv for RefBar {
    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }
}

/// Reference value keyed by input index.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub index: usize,
    pub expected: f64,
}

/// Reference MACD triple.
#[derive(Debug, Deserialize)]
pub struct RefMacdValue {
    pub index: usize,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Reference Ichimoku kernel lines.
#[derive(Debug, Deserialize)]
pub struct RefIchimokuValue {
    pub index: usize,
    pub conversion: f64,
    pub base: f64,
    pub span_a: f64,
    pub span_b: f64,
}

const OHLC_PATH: &str = "tests/fixtures/data/ohlc.csv";

/// Load the synthetic reference bars.
pub fn load_reference_bars() -> Vec<RefBar> {
    load_records(OHLC_PATH, "invalid OHLC record")
}

/// Closing prices of the reference bars.
pub fn load_reference_closes() -> Vec<Price> {
    load_reference_bars().iter().map(Ohlcv::close).collect()
}

/// Load single-value reference data (SMA, EMA, RSI).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

pub fn load_macd_ref(path: &str) -> Vec<RefMacdValue> {
    load_records(path, "invalid MACD reference record")
}

pub fn load_ichimoku_ref(path: &str) -> Vec<RefIchimokuValue> {
    load_records(path, "invalid Ichimoku reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Single-value indicator outputs, with or without a warm-up `None`.
pub trait ScalarOutput: Copy {
    fn scalar(self) -> Option<f64>;
}

impl ScalarOutput for f64 {
    fn scalar(self) -> Option<f64> {
        Some(self)
    }
}

impl ScalarOutput for Option<f64> {
    fn scalar(self) -> Option<f64> {
        self
    }
}

/// Generate reference match + streaming/batch tests for a single-value
/// indicator fed with closing prices.
///
/// Usage: `reference_test!(sma_20, Sma, SmaConfig::new(20).unwrap(), REF_PATH, TOLERANCE);`
///
/// Path and tolerance may name constants of the invoking test crate.
#[allow(unused_macros)]
macro_rules! reference_test {
    ($name:ident, $ind:ty, $config:expr, $ref_path:expr, $tolerance:expr) => {
        mod $name {
            use super::fixtures::*;
            use super::*;
            use pulse_ta::*;

            #[test]
            fn matches_reference() {
                let closes = load_reference_closes();
                let reference = load_ref_values($ref_path);
                let mut ind = <$ind>::new($config);

                let mut ref_idx = 0;
                for (i, &close) in closes.iter().enumerate() {
                    let value = ind.update(close).scalar();

                    if ref_idx < reference.len() && i == reference[ref_idx].index {
                        let value = value.unwrap_or_else(|| {
                            panic!("{} returned None at index {i}", stringify!($name))
                        });
                        assert_near(
                            value,
                            reference[ref_idx].expected,
                            $tolerance,
                            &format!("{} at index {i}", stringify!($name)),
                        );
                        ref_idx += 1;
                    }
                }

                assert_eq!(
                    ref_idx,
                    reference.len(),
                    "not all reference values checked: {ref_idx}/{}",
                    reference.len()
                );
            }

            #[test]
            fn batch_matches_streaming() {
                let closes = load_reference_closes();
                let mut streaming = <$ind>::new($config);
                let expected: Vec<_> = closes.iter().map(|&c| streaming.update(c)).collect();

                let mut batched = <$ind>::new($config);
                assert_eq!(batched.batch(closes.iter().copied()), expected);
                assert_eq!(batched.get(), streaming.get());
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use reference_test;

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
