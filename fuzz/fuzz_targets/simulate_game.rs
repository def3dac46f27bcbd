#![no_main]

extern crate arbitrary;
extern crate elim_ev;
extern crate libfuzzer_sys;
extern crate rand;

use elim_ev::core::ModeSet;
use elim_ev::simulation::EliminationGame;
use rand::{SeedableRng, rngs::StdRng};

use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct Input {
    pub mode_idx: u8,
    pub skills: Vec<u16>,
    pub seed: u64,
}

fuzz_target!(|input: Input| {
    let modes = ModeSet::default();
    let mode = &modes.modes()[input.mode_idx as usize % modes.len()];

    // Map whatever we were given onto a full table of skills in [0, 1].
    let skills: Vec<f64> = (0..mode.player_count)
        .map(|idx| {
            input
                .skills
                .get(idx)
                .map(|&raw| f64::from(raw) / f64::from(u16::MAX))
                .unwrap_or(0.5)
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(input.seed);
    let result = EliminationGame::default()
        .simulate(mode, &skills, &mut rng)
        .unwrap();

    assert!(result.duration_ticks >= 1 && result.duration_ticks <= 3_000);
    let mut ids = result.rankings.clone();
    ids.sort_unstable();
    assert_eq!(ids, (0..mode.player_count).collect::<Vec<_>>());
});
