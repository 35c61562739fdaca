//! Benchmarks for the discrete-event search over an analytic sky.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use astro_core::{Body, EngineError, Ephemeris, Query, StateVector};
use astro_search::{SearchConfig, find_discrete, search_moon_phases};
use astro_time::{J2000_JD, TimeSpan};

struct BenchSky;

impl Ephemeris for BenchSky {
    fn state(&self, query: Query) -> Result<StateVector, EngineError> {
        let days = query.epoch_tdb_jd - J2000_JD;
        let rate = match query.target {
            Body::Sun => 0.985_647_4,
            Body::Moon => 13.176_396_6,
            _ => 0.5,
        };
        let lon = (rate * days).to_radians();
        Ok(StateVector {
            position_km: [1.5e8 * lon.cos(), 1.5e8 * lon.sin(), 0.0],
            velocity_km_s: [0.0, 0.0, 0.0],
        })
    }

    fn coverage_jd_tdb(&self) -> (f64, f64) {
        (J2000_JD - 36525.0, J2000_JD + 36525.0)
    }
}

fn bench_find_discrete(c: &mut Criterion) {
    let span = TimeSpan::new(J2000_JD, J2000_JD + 365.25).unwrap();
    let config = SearchConfig::default();
    c.bench_function("find_discrete_year", |b| {
        b.iter(|| {
            find_discrete(black_box(&span), &config, |t| {
                Ok(((t - J2000_JD) / 7.382_65) as i32 % 4)
            })
            .unwrap()
        })
    });
}

fn bench_moon_phases(c: &mut Criterion) {
    let span = TimeSpan::new(J2000_JD, J2000_JD + 365.25).unwrap();
    let config = SearchConfig::default();
    c.bench_function("moon_phases_year", |b| {
        b.iter(|| search_moon_phases(black_box(&BenchSky), &span, &config).unwrap())
    });
}

criterion_group!(benches, bench_find_discrete, bench_moon_phases);
criterion_main!(benches);
