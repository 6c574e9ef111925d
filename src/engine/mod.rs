//! Engine module: grid state, directional sweeps, spawning and terminal detection.
//!
//! - [`GridEngine`] owns the grid and game state and is the only entry point that mutates them.
//! - [`Grid`] keeps tiles and the free-cell index in lockstep.
//! - Randomness goes through [`SpawnSource`]; [`RandomSpawner`] wraps any `rand::Rng`.
//! - Rendering consumes [`GameEvent`]s drained from the engine.

mod error;
mod events;
mod game;
mod grid;
mod spawn;
mod sweep;
mod tile;

pub use error::EngineError;
pub use events::{GameEvent, Notification};
pub use game::{EngineConfig, GridEngine};
pub use grid::{Coords, Grid};
pub use spawn::{RandomSpawner, SpawnSource};
pub use sweep::Direction;
pub use tile::Tile;
