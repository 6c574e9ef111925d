use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use grid_2048::config::Overrides;
use grid_2048::engine::{EngineError, GameEvent, GridEngine, Notification};
use log::warn;

#[derive(Debug, Parser)]
#[command(author, version, about = "Play the sliding-tile merge puzzle in the terminal")]
struct Args {
    #[command(flatten)]
    settings: Overrides,

    /// Print every engine event as a JSON line
    #[arg(long)]
    events: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cfg = args.settings.resolve().context("loading configuration")?;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let mut engine = GridEngine::with_seed(cfg.engine()?, seed);
    engine.start_new_game()?;

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    flush_events(&mut engine, &mut out, args.events)?;
    writeln!(out, "{}", engine.grid())?;
    write!(out, "move (w/a/s/d, up/down/left/right, q to quit): ")?;
    out.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        if engine.pending_notification().is_some() {
            // Any line acknowledges the outstanding notification.
            let resolved = engine.acknowledge()?;
            if resolved == Notification::Lost {
                writeln!(out, "new game")?;
            }
        } else if !input.is_empty() {
            match engine.request_move_str(input) {
                Ok(false) => writeln!(out, "nothing moved")?,
                Ok(true) => {}
                Err(e @ EngineError::UnknownDirection(_)) => {
                    warn!("{e}");
                    writeln!(out, "{e}")?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        flush_events(&mut engine, &mut out, args.events)?;
        writeln!(out, "{}", engine.grid())?;
        match engine.pending_notification() {
            Some(Notification::Won) => {
                let goal = engine.config().goal();
                writeln!(out, "You reached {goal}! Press enter to keep playing.")?
            }
            Some(Notification::Lost) => writeln!(out, "No moves left. Press enter to start over.")?,
            None => write!(out, "move: ")?,
        }
        out.flush()?;
    }
    Ok(())
}

fn flush_events<W: Write>(engine: &mut GridEngine, out: &mut W, print: bool) -> Result<()> {
    for event in engine.take_events() {
        if print {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        } else if let GameEvent::GridInitialized { rows, columns } = event {
            writeln!(out, "{rows}x{columns} grid")?;
        }
    }
    Ok(())
}
