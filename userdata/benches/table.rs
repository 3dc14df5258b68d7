use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rgss_codec::{Decode, Encode, EncodeSize};
use rgss_userdata::{table, Table};

/// Map layers of common sizes (`width x height x 3`).
const MAPS: [(u32, u32); 4] = [(20, 15), (50, 50), (200, 200), (500, 500)];

fn random_map(rng: &mut StdRng, width: u32, height: u32) -> Table {
    let mut table = Table::new_3d(width, height, 3).unwrap();
    rng.fill(table.elements_mut());
    table
}

fn bench_encode(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut group = c.benchmark_group("table_encode");
    for (width, height) in MAPS {
        let table = random_map(&mut rng, width, height);
        group.throughput(Throughput::Bytes(table.encode_size() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &table,
            |b, table| {
                b.iter(|| table.encode());
            },
        );
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let cfg = table::Config::default();
    let mut group = c.benchmark_group("table_decode");
    for (width, height) in MAPS {
        let encoded = random_map(&mut rng, width, height).encode().freeze();
        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &encoded,
            |b, encoded| {
                b.iter(|| Table::decode_cfg(encoded.clone(), &cfg).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
