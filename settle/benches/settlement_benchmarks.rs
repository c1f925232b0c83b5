use criterion::{Criterion, criterion_group, criterion_main};
use settle::settlement::{PlayerBalance, solve};

/// Helper to create a balanced ledger with N players
fn balanced_ledger(n_players: usize) -> Vec<PlayerBalance> {
    let mut balances: Vec<PlayerBalance> = (0..n_players - 1)
        .map(|i| {
            let amount = ((i as i64 % 7) + 1) * 25;
            let signed = if i % 2 == 0 { amount } else { -amount };
            PlayerBalance::new(format!("player{i}"), signed)
        })
        .collect();

    let sum: i64 = balances.iter().map(|b| b.balance).sum();
    balances.push(PlayerBalance::new("counterweight", -sum));
    balances
}

/// Benchmark a full-table poker night (9 players)
fn bench_solve_full_table(c: &mut Criterion) {
    let balances = balanced_ledger(9);

    c.bench_function("solve_9_players", |b| {
        b.iter(|| solve(&balances, 0));
    });
}

/// Benchmark a large multi-table night (100 players)
fn bench_solve_hundred_players(c: &mut Criterion) {
    let balances = balanced_ledger(100);

    c.bench_function("solve_100_players", |b| {
        b.iter(|| solve(&balances, 0));
    });
}

criterion_group!(benches, bench_solve_full_table, bench_solve_hundred_players);
criterion_main!(benches);
