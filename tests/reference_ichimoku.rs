mod fixtures;

use fixtures::{assert_near, load_ichimoku_ref, load_reference_bars};
use pulse_ta::{Ichimoku, IchimokuConfig, Indicator, Ohlcv, Price};

const REF_PATH: &str = "tests/fixtures/data/ichimoku-9-26-52.csv";

/// Reference evaluates the lag-1 kernel directly.
const TOLERANCE: f64 = 1e-9;

fn columns() -> (Vec<Price>, Vec<Price>, Vec<Price>) {
    let bars = load_reference_bars();
    (
        bars.iter().map(Ohlcv::high).collect(),
        bars.iter().map(Ohlcv::low).collect(),
        bars.iter().map(Ohlcv::close).collect(),
    )
}

#[test]
fn ichimoku_forward_matches_reference() {
    let (high, low, close) = columns();
    let reference = load_ichimoku_ref(REF_PATH);

    let series = Ichimoku::default().forward(&high, &low, &close).unwrap();
    assert_eq!(series.len(), reference.len());

    for (i, r) in reference.iter().enumerate() {
        let context = format!("Ichimoku(9, 26, 52) at index {}", r.index);
        assert_near(series.conversion_line[i], r.conversion, TOLERANCE, &context);
        assert_near(series.base_line[i], r.base, TOLERANCE, &context);
        assert_near(series.span_a[i], r.span_a, TOLERANCE, &context);
        assert_near(series.span_b[i], r.span_b, TOLERANCE, &context);
    }
}

#[test]
fn ichimoku_chikou_is_close_shifted_by_base_period() {
    let (high, low, close) = columns();
    let series = Ichimoku::default().forward(&high, &low, &close).unwrap();

    let shift = IchimokuConfig::default().base_period();
    for (i, chikou) in series.chikou_span.iter().enumerate() {
        match close.get(i + shift) {
            Some(&expected) => assert_eq!(*chikou, expected, "chikou at index {i}"),
            None => assert!(chikou.is_nan(), "chikou at index {i} should be NaN"),
        }
    }
}

#[test]
fn ichimoku_forward_bars_matches_forward() {
    let bars = load_reference_bars();
    let (high, low, close) = columns();

    let from_bars = Ichimoku::default().forward_bars(&bars);
    let from_columns = Ichimoku::default().forward(&high, &low, &close).unwrap();

    assert_eq!(from_bars.conversion_line, from_columns.conversion_line);
    assert_eq!(from_bars.base_line, from_columns.base_line);
    assert_eq!(from_bars.span_a, from_columns.span_a);
    assert_eq!(from_bars.span_b, from_columns.span_b);
}

#[test]
fn ichimoku_batch_driver_matches_forward() {
    let (high, low, close) = columns();

    let mut driven = Ichimoku::default();
    let values = driven.batch(high.iter().copied().zip(low.iter().copied()));
    let series = Ichimoku::default().forward(&high, &low, &close).unwrap();

    assert_eq!(values.len(), series.len());
    for (i, value) in values.iter().enumerate() {
        let value = value.expect("Ichimoku has a value after any update");
        assert_eq!(value.span_a(), series.span_a[i]);
        assert_eq!(value.span_b(), series.span_b[i]);
    }
}
