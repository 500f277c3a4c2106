//! Performance benchmarks for ranking calculations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pitch_rank::leaderboard::{InMemoryStatsStorage, LeaderboardManager};
use pitch_rank::ranking::RankingEngine;
use pitch_rank::types::PlayerStats;
use std::sync::Arc;

fn bench_single_calculation(c: &mut Criterion) {
    let engine = RankingEngine::default();
    let stats = PlayerStats::new(31, 47, 23, 18);

    c.bench_function("rank_single_profile", |b| {
        b.iter(|| engine.calculate(black_box(&stats)))
    });
}

fn bench_varied_profiles(c: &mut Criterion) {
    let engine = RankingEngine::default();

    // A spread of profiles across the tier bands, including the edge cases
    let profiles: Vec<PlayerStats> = vec![
        PlayerStats::new(0, 0, 0, 0),
        PlayerStats::new(31, 47, 23, 18),
        PlayerStats::new(50, 50, 150, 100),
        PlayerStats::new(28, 40, 20, 10),
        PlayerStats::new(1, 1, 0, 0),
        PlayerStats::new(500, 1000, 1200, 900),
    ];

    c.bench_function("rank_varied_profiles", |b| {
        b.iter(|| {
            for stats in &profiles {
                black_box(engine.calculate(black_box(stats)));
            }
        })
    });
}

fn bench_leaderboard_assembly(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let manager = runtime.block_on(async {
        let engine = Arc::new(RankingEngine::default());
        let storage = Arc::new(InMemoryStatsStorage::new(2_000));
        let manager = Arc::new(LeaderboardManager::new(storage, engine));

        for i in 0u64..1_000 {
            manager
                .record_stats(
                    format!("player{:04}", i),
                    PlayerStats::new(i % 50, 50, i % 120, i % 80),
                )
                .await
                .unwrap();
        }

        manager
    });

    c.bench_function("leaderboard_top_100_of_1000", |b| {
        b.iter(|| {
            runtime
                .block_on(manager.leaderboard(black_box(100)))
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_single_calculation,
    bench_varied_profiles,
    bench_leaderboard_assembly
);
criterion_main!(benches);
