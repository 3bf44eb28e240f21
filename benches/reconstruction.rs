use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use msn_social_graph::models::SessionId;
use msn_social_graph::{Post, TimelineStore, reconstruct, synthesize};

fn ms(v: i64) -> Post {
    Post::from_millis(v).unwrap()
}

/// Generate a store where each contact is introduced by the previous one:
/// contact i talks alone in session 2, and contact i+1 joins that session
fn generate_chain(num_contacts: usize) -> TimelineStore {
    let mut store = TimelineStore::new();

    for i in 0..num_contacts {
        let id = store.add_contact(&format!("contact{}@example.com", i));
        store.reserve_sessions(id, 2).unwrap();

        let base = i as i64 * 100;
        let first = if i == 0 { [0, 10] } else { [base - 40, base - 30] };
        for p in first {
            store.record_marker(id, SessionId(1), ms(p)).unwrap();
        }
        for p in [base + 50, base + 60, base + 70] {
            store.record_marker(id, SessionId(2), ms(p)).unwrap();
        }
    }

    store
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");

    for size in [100, 1_000, 10_000].iter() {
        let store = generate_chain(*size);
        let anchor = ms((*size as i64 / 2) * 100 + 60);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| reconstruct(black_box(&store), black_box(anchor)).unwrap());
        });
    }

    group.finish();
}

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");

    for size in [100, 1_000, 5_000].iter() {
        let store = generate_chain(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| synthesize(black_box(&store), "me@example.com").unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconstruct, bench_synthesize);
criterion_main!(benches);
