use agora_ecmul::{AltBn128, KnownCurve, Secp256k1};
use criterion::{criterion_group, criterion_main, Criterion};
use num_bigint::{BigInt, RandBigInt};

use rand::rngs::OsRng;
use rand::Rng;

fn bench_point_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_mul");

    let mut rng = OsRng;
    let n = 50_usize;
    let random_scalars = (0..n)
        .map(|_| BigInt::from(rng.gen_biguint(256)))
        .collect::<Vec<BigInt>>();

    let bn = AltBn128::curve();
    let bn_generator = AltBn128::generator();
    group.bench_function("alt_bn128", |b| {
        let i = rng.gen_range(0..n);
        b.iter(|| bn_generator.scalar_mul(&random_scalars[i], &bn).unwrap())
    });

    let secp = Secp256k1::curve();
    let secp_generator = Secp256k1::generator();
    group.bench_function("secp256k1", |b| {
        let i = rng.gen_range(0..n);
        b.iter(|| secp_generator.scalar_mul(&random_scalars[i], &secp).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_point_mul);
criterion_main!(benches);
