use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use super::error::EngineError;
use super::events::{GameEvent, Notification};
use super::grid::{Coords, Grid};
use super::spawn::{RandomSpawner, SpawnSource};
use super::sweep::{self, Direction};
use super::tile::Tile;

/// Validated construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    rows: usize,
    columns: usize,
    goal: u32,
}

impl EngineConfig {
    pub const DEFAULT_GOAL: u32 = 2048;

    /// Check dimensions and goal.
    ///
    /// ```
    /// use grid_2048::engine::EngineConfig;
    /// assert!(EngineConfig::new(4, 4, 2048).is_ok());
    /// assert!(EngineConfig::new(4, 4, 100).is_err());
    /// assert!(EngineConfig::new(1, 1, 2048).is_err());
    /// ```
    pub fn new(rows: usize, columns: usize, goal: u32) -> Result<Self, EngineError> {
        if rows == 0 || columns == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "grid must have at least one row and column, got {rows}x{columns}"
            )));
        }
        match rows.checked_mul(columns) {
            Some(cells) if cells >= 2 => {}
            Some(_) => {
                return Err(EngineError::InvalidConfig(
                    "a new game places two tiles; grid needs at least two cells".into(),
                ))
            }
            None => return Err(EngineError::InvalidConfig("grid dimensions overflow".into())),
        }
        if goal <= 2 || !goal.is_power_of_two() {
            return Err(EngineError::InvalidConfig(format!(
                "goal must be a power of two greater than 2, got {goal}"
            )));
        }
        Ok(EngineConfig { rows, columns, goal })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn goal(&self) -> u32 {
        self.goal
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { rows: 4, columns: 4, goal: Self::DEFAULT_GOAL }
    }
}

/// Owns the grid and game state; resolves moves, spawns tiles and detects win/loss.
///
/// Rendering is left to the caller: every state change is recorded as a
/// [`GameEvent`] in an outbox drained with [`GridEngine::take_events`].
/// Win and loss pause the engine until [`GridEngine::acknowledge`] is called.
#[derive(Debug)]
pub struct GridEngine<S = RandomSpawner<StdRng>> {
    config: EngineConfig,
    grid: Grid,
    spawner: S,
    paused: bool,
    won: bool,
    pending: Option<Notification>,
    /// Loss detected while a win notification was still outstanding.
    loss_deferred: bool,
    moves_made: u64,
    events: Vec<GameEvent>,
}

impl GridEngine<RandomSpawner<StdRng>> {
    /// Engine with a seeded `StdRng` spawner.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        GridEngine::new(config, RandomSpawner::new(StdRng::seed_from_u64(seed)))
    }
}

impl<S: SpawnSource> GridEngine<S> {
    /// All-empty grid, paused until [`GridEngine::start_new_game`].
    pub fn new(config: EngineConfig, spawner: S) -> Self {
        GridEngine {
            config,
            grid: Grid::new(config.rows, config.columns),
            spawner,
            paused: true,
            won: false,
            pending: None,
            loss_deferred: false,
            moves_made: 0,
            events: Vec::new(),
        }
    }

    /// Reset the grid and state, then spawn the two opening tiles.
    ///
    /// ```
    /// use grid_2048::engine::{EngineConfig, GameEvent, GridEngine};
    /// let mut engine = GridEngine::with_seed(EngineConfig::default(), 1);
    /// engine.start_new_game().unwrap();
    /// assert_eq!(engine.grid().occupied_count(), 2);
    /// assert!(!engine.is_paused());
    /// let events = engine.take_events();
    /// assert_eq!(events[0], GameEvent::GridInitialized { rows: 4, columns: 4 });
    /// assert_eq!(events.len(), 3);
    /// ```
    pub fn start_new_game(&mut self) -> Result<(), EngineError> {
        self.paused = true;
        self.won = false;
        self.pending = None;
        self.loss_deferred = false;
        self.moves_made = 0;
        self.grid.clear();
        self.events.push(GameEvent::GridInitialized {
            rows: self.config.rows,
            columns: self.config.columns,
        });
        for _ in 0..2 {
            self.spawn_tile()?;
        }
        self.paused = false;
        info!("new {}x{} game, goal {}", self.config.rows, self.config.columns, self.config.goal);
        Ok(())
    }

    /// Place a 2 or 4 in a uniformly chosen free cell.
    pub fn spawn_tile(&mut self) -> Result<Coords, EngineError> {
        let free = self.grid.empty_cells();
        if free.is_empty() {
            return Err(EngineError::OutOfSpace);
        }
        let pos = self.spawner.choose_cell(free);
        let value = if self.spawner.spawn_four() { 4 } else { 2 };
        let coords = self
            .grid
            .fill_free(pos, Tile::new(value))
            .ok_or(EngineError::OutOfSpace)?;
        debug!("spawned {} at {}", value, coords);
        self.events.push(GameEvent::TileSpawned { value, coords });
        Ok(coords)
    }

    /// Resolve one move. Returns whether any tile moved.
    ///
    /// Ignored (returns `Ok(false)`) while paused. A successful move spawns one
    /// tile and then checks for a loss.
    pub fn request_move(&mut self, direction: Direction) -> Result<bool, EngineError> {
        if self.paused {
            debug!("ignoring {} while paused", direction);
            return Ok(false);
        }
        let outcome = sweep::sweep(&mut self.grid, direction, self.config.goal, &mut self.events);
        if !outcome.moved {
            return Ok(false);
        }
        self.moves_made += 1;
        debug!("move {} #{}: {} merge(s)", direction, self.moves_made, outcome.merges);

        if outcome.reached_goal && !self.won {
            self.won = true;
            self.notify(Notification::Won);
        }

        self.spawn_tile()?;

        if !self.has_any_move() {
            self.paused = true;
            if self.pending.is_some() {
                self.loss_deferred = true;
            } else {
                self.notify(Notification::Lost);
            }
        }
        Ok(true)
    }

    /// Parse `input` as a direction and resolve it.
    ///
    /// Unknown input is rejected before any state changes.
    ///
    /// ```
    /// use grid_2048::engine::{EngineConfig, EngineError, GridEngine};
    /// let mut engine = GridEngine::with_seed(EngineConfig::default(), 3);
    /// engine.start_new_game().unwrap();
    /// let before = engine.grid().clone();
    /// let err = engine.request_move_str("sideways");
    /// assert!(matches!(err, Err(EngineError::UnknownDirection(_))));
    /// assert_eq!(engine.grid(), &before);
    /// ```
    pub fn request_move_str(&mut self, input: &str) -> Result<bool, EngineError> {
        let direction: Direction = input.parse()?;
        self.request_move(direction)
    }

    /// True if a free cell exists or two axis-adjacent tiles share a value.
    pub fn has_any_move(&self) -> bool {
        if !self.grid.empty_cells().is_empty() {
            return true;
        }
        let (rows, columns) = (self.config.rows, self.config.columns);
        for row in 0..rows {
            for column in 0..columns {
                let Some(value) = self.grid.value(Coords::new(row, column)) else {
                    continue;
                };
                let right = Coords::new(row, column + 1);
                if column + 1 < columns && self.grid.value(right) == Some(value) {
                    return true;
                }
                let below = Coords::new(row + 1, column);
                if row + 1 < rows && self.grid.value(below) == Some(value) {
                    return true;
                }
            }
        }
        false
    }

    /// Resolve the outstanding notification.
    ///
    /// A win resumes play (or raises a loss detected behind it); a loss starts
    /// a new game. Returns the notification that was resolved.
    pub fn acknowledge(&mut self) -> Result<Notification, EngineError> {
        let resolved = self.pending.take().ok_or(EngineError::NothingToAcknowledge)?;
        match resolved {
            Notification::Won if self.loss_deferred => {
                self.loss_deferred = false;
                self.notify(Notification::Lost);
            }
            Notification::Won => self.paused = false,
            Notification::Lost => self.start_new_game()?,
        }
        Ok(resolved)
    }

    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::Won => {
                info!("goal {} reached after {} moves", self.config.goal, self.moves_made)
            }
            Notification::Lost => info!(
                "no moves left after {} moves, highest tile {}",
                self.moves_made,
                self.grid.highest_tile().unwrap_or(0)
            ),
        }
        self.paused = true;
        self.pending = Some(notification);
        self.events.push(notification.event());
    }

    /// Drain the event outbox in emission order.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn tile_at(&self, at: Coords) -> Option<u32> {
        self.grid.value(at)
    }

    #[inline]
    pub fn empty_cells(&self) -> &[Coords] {
        self.grid.empty_cells()
    }

    #[inline]
    pub fn highest_tile(&self) -> Option<u32> {
        self.grid.highest_tile()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.won
    }

    #[inline]
    pub fn pending_notification(&self) -> Option<Notification> {
        self.pending
    }

    /// Successful moves in the current game.
    #[inline]
    pub fn moves_made(&self) -> u64 {
        self.moves_made
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn load(&mut self, values: &[&[u32]]) {
        self.grid = Grid::from_values(values);
        assert_eq!(self.grid.rows(), self.config.rows);
        assert_eq!(self.grid.columns(), self.config.columns);
        self.paused = false;
    }
}
