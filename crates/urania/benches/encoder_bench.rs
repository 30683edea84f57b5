use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;

use urania::aspects::{AspectCalculator, OrbPolicy};
use urania::bodies::{Body, Sign};
use urania::chart::{BodyState, ChartSettings, ComputedChart, Initials, Instant};
use urania::encoder::{bearing, encode_frame, FrameHeader};
use urania::layout::{ScreenPoint, ScreenPositionProvider, Viewport, WheelLayout};

fn sample_chart() -> ComputedChart {
    let mut longitudes = BTreeMap::new();
    for (i, body) in Body::ALL.into_iter().enumerate() {
        longitudes.insert(body, 12.0 + 36.0 * i as f64);
    }
    let aspects = AspectCalculator::new(OrbPolicy::radix()).compute(&longitudes, None);

    let mut bodies = BTreeMap::new();
    for (body, lon) in longitudes {
        bodies.insert(
            body,
            BodyState {
                longitude: lon,
                altitude: 15.0,
                sign: Some(Sign::from_longitude(lon)),
                house: Some(((lon / 30.0) as u8) % 12),
            },
        );
    }
    ComputedChart {
        bodies,
        aspects,
        cusps: None,
    }
}

fn bench_bearing(c: &mut Criterion) {
    let origin = ScreenPoint { x: 300.0, y: 300.0 };
    let position = ScreenPoint { x: 412.0, y: 187.0 };
    c.bench_function("bearing", |b| {
        b.iter(|| bearing(black_box(position), black_box(origin)))
    });
}

fn bench_encode_frame(c: &mut Criterion) {
    let chart = sample_chart();
    let layout = WheelLayout::new(&chart, &ChartSettings::default(), Viewport::default());
    let instant = Instant::new(1990, 5, 14, 12, 0, 0.0, 0.0).unwrap();
    let header = FrameHeader::new(Initials::default(), &instant);

    c.bench_function("encode_frame", |b| {
        b.iter(|| {
            encode_frame(
                black_box(&chart),
                &layout as &dyn ScreenPositionProvider,
                black_box(&header),
            )
        })
    });
}

criterion_group!(benches, bench_bearing, bench_encode_frame);
criterion_main!(benches);
