//! grid-2048: a sliding-tile merge puzzle engine
//!
//! This crate provides:
//! - A [`GridEngine`](engine::GridEngine) over any `rows x columns` grid that slides and merges
//!   tiles (each tile merges at most once per move), spawns new tiles and detects win/loss
//! - A structured event feed ([`GameEvent`](engine::GameEvent)) for whatever renders the game
//! - TOML configuration (`config` module)
//!
//! Quick start:
//! ```
//! use grid_2048::engine::{Direction, EngineConfig, GridEngine};
//!
//! // Deterministic spawns with a seeded RNG
//! let mut engine = GridEngine::with_seed(EngineConfig::new(4, 4, 2048).unwrap(), 42);
//! engine.start_new_game().unwrap();
//!
//! for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
//!     let _moved = engine.request_move(dir).unwrap();
//! }
//! for event in engine.take_events() {
//!     println!("{event:?}");
//! }
//! assert!(engine.grid().occupied_count() >= 2);
//! ```
//!
//! Win and loss pause the engine; play resumes after
//! [`GridEngine::acknowledge`](engine::GridEngine::acknowledge). Acknowledging a loss starts a
//! new game.
//!
pub mod config;
pub mod engine;
