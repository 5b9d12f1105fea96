#[path = "../tests/fixtures/mod.rs"]
mod fixtures;

use crate::fixtures::{load_reference_bars, load_reference_closes};

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use pulse_ta::{
    Ema, EmaConfig, Ichimoku, IchimokuConfig, Macd, MacdConfig, Ohlcv, Price, Rsi, RsiConfig,
    Sma, SmaConfig,
};
use std::{hint::black_box, time::Duration};

fn stream_benchmarks(c: &mut Criterion) {
    let closes = load_reference_closes();
    let pairs: Vec<(Price, Price)> = load_reference_bars()
        .iter()
        .map(|bar| (bar.high(), bar.low()))
        .collect();

    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Elements(closes.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! stream_bench {
        ($name:expr, $ind_type:ty, $config:expr, $inputs:expr) => {
            group.bench_function($name, |b| {
                b.iter_batched(
                    || <$ind_type>::new($config),
                    |mut ind| {
                        for &input in $inputs {
                            black_box(ind.update(input));
                        }
                    },
                    BatchSize::SmallInput,
                );
            });
        };
    }

    stream_bench!("sma20", Sma, SmaConfig::new(20).unwrap(), &closes);
    stream_bench!("sma200", Sma, SmaConfig::new(200).unwrap(), &closes);
    stream_bench!("ema20", Ema, EmaConfig::with_period(20).unwrap(), &closes);
    stream_bench!("rsi14", Rsi, RsiConfig::new(14).unwrap(), &closes);
    stream_bench!("rsi140", Rsi, RsiConfig::new(140).unwrap(), &closes);
    stream_bench!("macd", Macd, MacdConfig::default(), &closes);
    stream_bench!("ichimoku", Ichimoku, IchimokuConfig::default(), &pairs);

    group.finish();
}

fn tick_benchmarks(c: &mut Criterion) {
    let closes = load_reference_closes();
    let mut group = c.benchmark_group("tick");
    group.sample_size(200);
    group.noise_threshold(0.03);
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    // Pre-feed all prices except the last, then benchmark a single update() call.
    let (warmup, last) = closes.split_at(closes.len() - 1);

    macro_rules! tick_bench {
        ($name:expr, $ind_type:ty, $config:expr) => {
            group.bench_function($name, |b| {
                b.iter_batched(
                    || {
                        let mut ind = <$ind_type>::new($config);
                        for &price in warmup {
                            ind.update(price);
                        }
                        ind
                    },
                    |mut ind| {
                        black_box(ind.update(last[0]));
                    },
                    BatchSize::SmallInput,
                );
            });
        };
    }

    tick_bench!("sma200", Sma, SmaConfig::new(200).unwrap());
    tick_bench!("ema20", Ema, EmaConfig::with_period(20).unwrap());
    tick_bench!("rsi14", Rsi, RsiConfig::new(14).unwrap());
    tick_bench!("macd", Macd, MacdConfig::default());

    group.finish();
}

fn forward_benchmarks(c: &mut Criterion) {
    let bars = load_reference_bars();
    let closes = load_reference_closes();
    let high: Vec<Price> = bars.iter().map(Ohlcv::high).collect();
    let low: Vec<Price> = bars.iter().map(Ohlcv::low).collect();

    let mut group = c.benchmark_group("forward");
    group.throughput(Throughput::Elements(closes.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("rsi14", |b| {
        let mut rsi = Rsi::new(RsiConfig::default());
        b.iter(|| black_box(rsi.forward(&closes, 14)));
    });

    group.bench_function("macd", |b| {
        let mut macd = Macd::default();
        b.iter(|| black_box(macd.forward(&closes, 12, 26, 9)));
    });

    group.bench_function("ichimoku", |b| {
        let mut cloud = Ichimoku::default();
        b.iter(|| black_box(cloud.forward(&high, &low, &closes)));
    });

    group.finish();
}

criterion_group!(
    benches,
    stream_benchmarks,
    tick_benchmarks,
    forward_benchmarks
);
criterion_main!(benches);
