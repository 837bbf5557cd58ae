use std::{error::Error, path::PathBuf};

use landertree_core::SearchConfig;
use landertree_sim::{EpisodeConfig, LanderConfig, LanderState, LunarWorld, run_episode};
use log::info;

/// Usage: headless_descent [lander.yaml] [search.yaml]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let lander = match args.next() {
        Some(path) => LanderConfig::from_yaml_path(path)?,
        None => LanderConfig::from_default_yaml()?,
    };
    let search = match args.next() {
        Some(path) => SearchConfig::from_yaml_path(path)?,
        None => SearchConfig::from_default_yaml()?,
    };

    let world = LunarWorld::new(lander);
    let start = LanderState::at(390.0, 0.0);
    let episode = EpisodeConfig::default();

    info!(
        "flying from ({}, {}) with {} iterations per decision",
        start.x, start.y, search.iterations
    );
    let report = run_episode(&world, start, &search, &episode)?;

    println!("status: {}", report.status);
    println!("ticks:  {}", report.ticks);
    println!("score:  {}", report.score);
    println!(
        "final:  x={:.2} y={:.2} vx={:.2} vy={:.2} angle={:.2}",
        report.final_state.x,
        report.final_state.y,
        report.final_state.vx,
        report.final_state.vy,
        report.final_state.angle
    );
    Ok(())
}
