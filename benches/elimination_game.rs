use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use elim_ev::core::ModeSet;
use elim_ev::monte_carlo::MonteCarloBuilder;
use elim_ev::simulation::EliminationGame;
use rand::{SeedableRng, rngs::StdRng};

fn bench_single_game(c: &mut Criterion) {
    let modes = ModeSet::default();
    let game = EliminationGame::default();
    let mut group = c.benchmark_group("single_game");

    for mode in modes.modes() {
        group.bench_with_input(BenchmarkId::from_parameter(&mode.name), mode, |b, mode| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| game.simulate_random(mode, &mut rng).unwrap())
        });
    }
    group.finish();
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    group.sample_size(10);

    for simulation_count in [100, 1_000] {
        let runner = MonteCarloBuilder::new()
            .simulation_count(simulation_count)
            .skill_levels(vec![])
            .seed(7)
            .build()
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new("ranked", simulation_count),
            &runner,
            |b, runner| b.iter(|| runner.run_monte_carlo("ranked").unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_single_game, bench_monte_carlo);
criterion_main!(benches);
