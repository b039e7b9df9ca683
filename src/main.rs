//! Buddy's Quest headless runner
//!
//! Steps the simulation with a scripted input sequence and prints the JSON
//! snapshot, so the engine can be exercised (and diffed) without a renderer.
//!
//! Usage: `buddys-quest [seed] [ticks]`

use buddys_quest::consts::SIM_DT;
use buddys_quest::sim::{GameState, Mode, TickInput, tick};
use buddys_quest::snapshot::render_game_to_text;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB0DD);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);

    let mut state = GameState::new(seed);
    state.start_run();

    // Scripted demo: hold right, hop periodically
    let mut input = TickInput {
        right: true,
        ..Default::default()
    };
    for t in 0..ticks {
        input.jump = t % 45 < 6;
        tick(&mut state, &input, SIM_DT);
        if state.mode != Mode::Playing {
            break;
        }
    }

    log::info!(
        "demo done: tick {}, mode {:?}, score {}, lives {}",
        state.tick,
        state.mode,
        state.score,
        state.lives
    );
    println!("{}", render_game_to_text(&state));
}
