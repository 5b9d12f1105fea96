// src/test_util.rs

use crate::{Ohlcv, Price};

/// Asserts that two `f64` values are approximately equal.
///
/// Two-argument form: relative epsilon of `4 * f64::EPSILON` (exact zero
/// expectations compare exactly). Three-argument form: absolute tolerance.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (f64, f64) = ($actual, $expected);
        assert!(
            a == e || (a - e).abs() < e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (a, e, t): (f64, f64, f64) = ($actual, $expected, $tolerance);
        assert!(
            (a - e).abs() <= t,
            "assert_approx failed: actual={a}, expected={e}, diff={} > tolerance {t}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

pub struct Bar {
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn new(high: f64, low: f64, close: f64) -> Self {
        Self { high, low, close }
    }
}

impl Ohlcv for Bar {
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

/// Deterministic zig-zag price path around 100: mixes rising, falling and
/// flat steps so gains and losses both occur inside any window.
pub fn zigzag(len: usize) -> Vec<Price> {
    const STEPS: [f64; 7] = [1.5, -0.75, 2.25, -3.0, 0.0, 0.5, -1.25];

    let mut price = 100.0;
    (0..len)
        .map(|i| {
            price += STEPS[i % STEPS.len()];
            price
        })
        .collect()
}
