use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kart_league::bracket::seeding::{bracket_size_for, interleave_advancers, round_one_slots};
use kart_league::schedule::circle_pairings;

/// Benchmark round-robin pairing generation across roster sizes
fn bench_circle_pairings(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle_pairings");
    for n in [4usize, 16, 64, 256] {
        let members: Vec<i64> = (1..=n as i64).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &members, |b, members| {
            b.iter(|| circle_pairings(members));
        });
    }
    group.finish();
}

/// Benchmark full bracket seeding for a large field: 16 groups sending
/// their top 8 each
fn bench_round_one_seeding(c: &mut Criterion) {
    let group_tops: Vec<Vec<i64>> = (0..16)
        .map(|g| (0..8).map(|r| g * 8 + r + 1).collect())
        .collect();

    c.bench_function("seed_round_one_128", |b| {
        b.iter(|| {
            let advancers = interleave_advancers(&group_tops);
            let size = bracket_size_for(advancers.len());
            round_one_slots(&advancers, size)
        });
    });
}

criterion_group!(benches, bench_circle_pairings, bench_round_one_seeding);
criterion_main!(benches);
