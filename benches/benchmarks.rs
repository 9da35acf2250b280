use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::Rng;

use ufd_decoder::{
    codes::{self, Code},
    decoder::Decoder,
    growth::GrowthStrategy,
    random::Seed,
};

fn sample_syndrome(code: &Code, physical_error_rate: f64, rng: &mut impl Rng) -> Vec<bool> {
    let error: Vec<bool> = (0..code.n).map(|_| rng.gen_bool(physical_error_rate)).collect();
    code.h
        .iter()
        .map(|row| row.iter().zip(error.iter()).filter(|(&h, &e)| h && e).count() % 2 == 1)
        .collect()
}

pub fn decoder_benchmarks(c: &mut Criterion) {
    let steane = codes::steane();
    let surface = codes::surface_distance_3();

    c.bench_function("decode/steane/standard", |b| {
        let mut rng = Seed::from_entropy().stream();
        b.iter_batched_ref(
            || {
                let mut decoder = Decoder::new();
                decoder.set_code(steane.clone());
                decoder.set_growth(GrowthStrategy::Standard);
                let syndrome = sample_syndrome(&steane, 0.05, &mut rng);
                (decoder, syndrome)
            },
            |(decoder, syndrome)| black_box(decoder.decode(syndrome)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("decode/surface_distance_3/smallest_first", |b| {
        let mut rng = Seed::from_entropy().stream();
        b.iter_batched_ref(
            || {
                let mut decoder = Decoder::new();
                decoder.set_code(surface.clone());
                decoder.set_growth(GrowthStrategy::SmallestFirst);
                let syndrome = sample_syndrome(&surface, 0.08, &mut rng);
                (decoder, syndrome)
            },
            |(decoder, syndrome)| black_box(decoder.decode(syndrome)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("decode/steane/random_first", |b| {
        let mut rng = Seed::from_entropy().stream();
        b.iter_batched_ref(
            || {
                let mut decoder = Decoder::new();
                decoder.set_code(steane.clone());
                decoder.set_growth(GrowthStrategy::RandomFirst);
                let syndrome = sample_syndrome(&steane, 0.05, &mut rng);
                (decoder, syndrome)
            },
            |(decoder, syndrome)| black_box(decoder.decode(syndrome)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("gf2/solve_steane", |b| {
        let h = steane.h.clone();
        let b_vec = vec![true, false, true];
        b.iter(|| black_box(ufd_decoder::linalg::solve(&h, &b_vec)))
    });
}

criterion_group!(benches, decoder_benchmarks);
criterion_main!(benches);
