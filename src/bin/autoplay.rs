use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use grid_2048::config::Overrides;
use grid_2048::engine::{Direction, EngineConfig, GridEngine, Notification};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "autoplay", about = "Play many random games in parallel and report outcomes")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 1000)]
    games: u64,

    // With a seed, game i uses seed + i.
    #[command(flatten)]
    settings: Overrides,

    /// Stop a game after this many successful moves
    #[arg(long, default_value_t = 100_000)]
    max_moves: u64,

    /// Worker threads (defaults to Rayon's choice)
    #[arg(long)]
    threads: Option<usize>,

    /// Suppress progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy)]
struct GameResult {
    moves: u64,
    highest_tile: u32,
    won: bool,
    lost: bool,
}

fn play_one(config: EngineConfig, seed: u64, max_moves: u64) -> Result<GameResult> {
    let mut engine = GridEngine::with_seed(config, seed);
    let mut picker = StdRng::seed_from_u64(seed.rotate_left(32) ^ 0x9e37_79b9_7f4a_7c15);
    engine.start_new_game()?;
    let mut won = false;

    while engine.moves_made() < max_moves {
        match engine.pending_notification() {
            Some(Notification::Won) => {
                won = true;
                engine.acknowledge()?;
                continue;
            }
            Some(Notification::Lost) => {
                let result = GameResult {
                    moves: engine.moves_made(),
                    highest_tile: engine.highest_tile().unwrap_or(0),
                    won,
                    lost: true,
                };
                debug!("game {seed}: lost after {} moves", result.moves);
                return Ok(result);
            }
            None => {}
        }
        let dir = Direction::ALL[picker.gen_range(0..Direction::ALL.len())];
        engine.request_move(dir)?;
        // The rendering side is absent here; drop the feed so it doesn't grow.
        engine.take_events();
    }
    Ok(GameResult {
        moves: engine.moves_made(),
        highest_tile: engine.highest_tile().unwrap_or(0),
        won: won || engine.is_won(),
        lost: false,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if args.games == 0 {
        bail!("--games must be at least 1");
    }

    let cfg = args.settings.resolve().context("loading configuration")?;
    let engine_config = cfg.engine()?;
    let base_seed = cfg.seed.unwrap_or_else(rand::random);

    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("configuring thread pool")?;
    }

    info!(
        "playing {} game(s) on {}x{} to {} (base seed {})",
        args.games,
        engine_config.rows(),
        engine_config.columns(),
        engine_config.goal(),
        base_seed
    );

    let pb = if args.quiet { ProgressBar::hidden() } else { ProgressBar::new(args.games) };
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise} | eta {eta}")
            .context("progress template")?,
    );

    let results: Vec<GameResult> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let r = play_one(engine_config, base_seed.wrapping_add(i), args.max_moves);
            pb.inc(1);
            r
        })
        .collect::<Result<_>>()?;
    pb.finish_and_clear();

    let games = results.len() as f64;
    let wins = results.iter().filter(|r| r.won).count();
    let losses = results.iter().filter(|r| r.lost).count();
    let mean_moves = results.iter().map(|r| r.moves as f64).sum::<f64>() / games;
    let mut histogram: BTreeMap<u32, usize> = BTreeMap::new();
    for r in &results {
        *histogram.entry(r.highest_tile).or_default() += 1;
    }

    println!(
        "Games: {} | won: {} ({:.1}%) | lost: {} | mean moves: {:.1}",
        results.len(),
        wins,
        100.0 * wins as f64 / games,
        losses,
        mean_moves
    );
    println!("Highest tile reached:");
    for (tile, count) in histogram.iter().rev() {
        println!("{:>8} | {:>6} ({:.1}%)", tile, count, 100.0 * *count as f64 / games);
    }
    Ok(())
}
