use agora_ecmul::encoding::CompressedPoint;
use agora_ecmul::{combine, AltBn128, KnownCurve, Term};
use criterion::{criterion_group, criterion_main, Criterion};
use num_bigint::{BigInt, RandBigInt};

use rand::rngs::OsRng;

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");
    group.sample_size(10);

    let mut rng = OsRng;
    let curve = AltBn128::curve();
    let generator = AltBn128::generator();
    let modulus = BigInt::from((**curve.modulus()).clone());

    let n = 16_usize;
    let terms = (0..n)
        .map(|_| {
            let point = generator
                .scalar_mul(&BigInt::from(rng.gen_biguint(64)), &curve)
                .unwrap();
            let compressed = CompressedPoint::from_point(&point, &curve);
            Term::new(
                BigInt::from(rng.gen_biguint(256)),
                BigInt::from(compressed.x().value().clone()),
                BigInt::from(compressed.sign() as u8),
            )
        })
        .collect::<Vec<Term>>();

    group.bench_function("sixteen_terms", |b| {
        b.iter(|| combine(&modulus, &BigInt::from(0), &BigInt::from(3), &terms).unwrap())
    });

    group.bench_function("decompress", |b| {
        b.iter(|| combine(&modulus, &BigInt::from(0), &BigInt::from(3), &terms[..1]).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_combine);
criterion_main!(benches);
