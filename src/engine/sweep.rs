//! Directional sweep: one parameterized slide-and-merge pass for all four directions.
//!
//! A sweep holds one axis fixed ("outer") and compacts along the other ("inner").
//! Each line is walked from the edge the tiles travel toward; for every target
//! slot the next occupied cell further along is the candidate. An empty target
//! takes the candidate and keeps scanning; an equal target merges with it and
//! ends the scan for that slot; anything else blocks.

use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::events::GameEvent;
use super::grid::{Coords, Grid};

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    /// Accepts the direction names plus the usual `wasd` / `hjkl` keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "k" => Ok(Direction::Up),
            "down" | "s" | "j" => Ok(Direction::Down),
            "left" | "a" | "h" => Ok(Direction::Left),
            "right" | "d" | "l" => Ok(Direction::Right),
            _ => Err(EngineError::UnknownDirection(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    /// 0=Up, 1=Down, 2=Left, 3=Right.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Down),
            2 => Ok(Direction::Left),
            3 => Ok(Direction::Right),
            other => Err(EngineError::UnknownDirection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Row,
    Column,
}

/// Axis roles for one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SweepPlan {
    /// The axis held fixed per line.
    outer: Axis,
    outer_len: usize,
    inner_len: usize,
    /// Travel toward the high end of the inner axis (right / down).
    reversed: bool,
}

impl SweepPlan {
    fn new(direction: Direction, rows: usize, columns: usize) -> Self {
        let (outer, reversed) = match direction {
            Direction::Left => (Axis::Row, false),
            Direction::Right => (Axis::Row, true),
            Direction::Up => (Axis::Column, false),
            Direction::Down => (Axis::Column, true),
        };
        let (outer_len, inner_len) = match outer {
            Axis::Row => (rows, columns),
            Axis::Column => (columns, rows),
        };
        SweepPlan { outer, outer_len, inner_len, reversed }
    }

    /// Cell `step` positions away from the leading edge of line `line`.
    #[inline]
    fn coords(&self, line: usize, step: usize) -> Coords {
        let inner = if self.reversed { self.inner_len - 1 - step } else { step };
        match self.outer {
            Axis::Row => Coords::new(line, inner),
            Axis::Column => Coords::new(inner, line),
        }
    }
}

/// What a sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SweepOutcome {
    pub moved: bool,
    pub merges: usize,
    /// Some merge produced exactly the goal value.
    pub reached_goal: bool,
}

/// Slide and merge every line of `grid` toward `direction`, appending render events.
pub(crate) fn sweep(
    grid: &mut Grid,
    direction: Direction,
    goal: u32,
    events: &mut Vec<GameEvent>,
) -> SweepOutcome {
    let plan = SweepPlan::new(direction, grid.rows(), grid.columns());
    let mut outcome = SweepOutcome::default();

    for line in 0..plan.outer_len {
        for target_step in 0..plan.inner_len.saturating_sub(1) {
            let target = plan.coords(line, target_step);
            for candidate_step in target_step + 1..plan.inner_len {
                let candidate = plan.coords(line, candidate_step);
                let Some(candidate_value) = grid.value(candidate) else {
                    continue;
                };
                match grid.value(target) {
                    None => {
                        trace!("slide {} -> {}", candidate, target);
                        grid.move_tile(candidate, target);
                        events.push(GameEvent::TileMoved { from: candidate, to: target });
                        outcome.moved = true;
                    }
                    Some(target_value) if target_value == candidate_value => {
                        if let Some(tile) = grid.tile_mut(candidate) {
                            tile.double();
                        }
                        let new_value = candidate_value * 2;
                        trace!("merge {} into {} = {}", candidate, target, new_value);
                        events.push(GameEvent::TileMerged { coords: candidate, new_value });
                        grid.move_tile(candidate, target);
                        events.push(GameEvent::TileMoved { from: candidate, to: target });
                        outcome.moved = true;
                        outcome.merges += 1;
                        if new_value == goal {
                            outcome.reached_goal = true;
                        }
                        break;
                    }
                    Some(_) => break,
                }
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swept(values: &[&[u32]], dir: Direction) -> (Vec<Vec<u32>>, SweepOutcome) {
        let mut grid = Grid::from_values(values);
        let mut events = Vec::new();
        let outcome = sweep(&mut grid, dir, 2048, &mut events);
        assert!(grid.is_consistent());
        (grid.to_values(), outcome)
    }

    #[test]
    fn slide_left_rows() {
        assert_eq!(swept(&[&[0, 0, 0, 0]], Direction::Left).0, vec![vec![0, 0, 0, 0]]);
        assert_eq!(swept(&[&[0, 0, 0, 2]], Direction::Left).0, vec![vec![2, 0, 0, 0]]);
        assert_eq!(swept(&[&[2, 4, 2, 4]], Direction::Left).0, vec![vec![2, 4, 2, 4]]);
        assert_eq!(swept(&[&[2, 2, 4, 4]], Direction::Left).0, vec![vec![4, 8, 0, 0]]);
        assert_eq!(swept(&[&[2, 0, 0, 2]], Direction::Left).0, vec![vec![4, 0, 0, 0]]);
        assert_eq!(swept(&[&[2, 8, 8, 4]], Direction::Left).0, vec![vec![2, 16, 4, 0]]);
    }

    #[test]
    fn slide_right_rows() {
        assert_eq!(swept(&[&[2, 0, 0, 0]], Direction::Right).0, vec![vec![0, 0, 0, 2]]);
        assert_eq!(swept(&[&[2, 2, 4, 4]], Direction::Right).0, vec![vec![0, 0, 4, 8]]);
        assert_eq!(swept(&[&[0, 2, 2, 2]], Direction::Right).0, vec![vec![0, 0, 2, 4]]);
        assert_eq!(swept(&[&[2, 8, 8, 4]], Direction::Right).0, vec![vec![0, 2, 16, 4]]);
    }

    #[test]
    fn whole_board_four_directions() {
        let start: &[&[u32]] = &[&[2, 4, 8, 16], &[2, 8, 8, 4], &[4, 0, 0, 4], &[2, 0, 0, 4]];
        assert_eq!(
            swept(start, Direction::Left).0,
            vec![vec![2, 4, 8, 16], vec![2, 16, 4, 0], vec![8, 0, 0, 0], vec![2, 4, 0, 0]]
        );
        assert_eq!(
            swept(start, Direction::Right).0,
            vec![vec![2, 4, 8, 16], vec![0, 2, 16, 4], vec![0, 0, 0, 8], vec![0, 0, 2, 4]]
        );
        assert_eq!(
            swept(start, Direction::Up).0,
            vec![vec![4, 4, 16, 16], vec![4, 8, 0, 8], vec![2, 0, 0, 4], vec![0, 0, 0, 0]]
        );
        assert_eq!(
            swept(start, Direction::Down).0,
            vec![vec![0, 0, 0, 0], vec![4, 0, 0, 16], vec![4, 4, 0, 4], vec![2, 8, 16, 8]]
        );
    }

    #[test]
    fn non_square_grids() {
        let tall: &[&[u32]] = &[&[2], &[0], &[2], &[4], &[4]];
        assert_eq!(swept(tall, Direction::Up).0, vec![vec![4], vec![8], vec![0], vec![0], vec![0]]);
        assert_eq!(
            swept(tall, Direction::Down).0,
            vec![vec![0], vec![0], vec![0], vec![4], vec![8]]
        );
        let (values, outcome) = swept(tall, Direction::Left);
        assert_eq!(values, vec![vec![2], vec![0], vec![2], vec![4], vec![4]]);
        assert!(!outcome.moved);
    }

    #[test]
    fn merge_once_per_slot() {
        let (values, outcome) = swept(&[&[2, 2, 2, 2]], Direction::Left);
        assert_eq!(values, vec![vec![4, 4, 0, 0]]);
        assert_eq!(outcome.merges, 2);

        let (values, outcome) = swept(&[&[4, 2, 2, 0]], Direction::Left);
        assert_eq!(values, vec![vec![4, 4, 0, 0]]);
        assert_eq!(outcome.merges, 1);

        let (values, _) = swept(&[&[2, 2, 2, 0]], Direction::Right);
        assert_eq!(values, vec![vec![0, 0, 2, 4]]);
    }

    #[test]
    fn blocked_line_reports_no_move() {
        let (values, outcome) = swept(&[&[2, 4, 0, 0]], Direction::Left);
        assert_eq!(values, vec![vec![2, 4, 0, 0]]);
        assert_eq!(outcome, SweepOutcome::default());
    }

    #[test]
    fn merge_events_double_in_place_then_move() {
        let mut grid = Grid::from_values(&[&[0, 2, 0, 2]]);
        let mut events = Vec::new();
        sweep(&mut grid, Direction::Left, 2048, &mut events);
        assert_eq!(
            events,
            vec![
                GameEvent::TileMoved { from: Coords::new(0, 1), to: Coords::new(0, 0) },
                GameEvent::TileMerged { coords: Coords::new(0, 3), new_value: 4 },
                GameEvent::TileMoved { from: Coords::new(0, 3), to: Coords::new(0, 0) },
            ]
        );
    }

    #[test]
    fn goal_flag_requires_exact_value() {
        let mut grid = Grid::from_values(&[&[8, 8, 16, 16]]);
        let mut events = Vec::new();
        let outcome = sweep(&mut grid, Direction::Left, 16, &mut events);
        assert!(outcome.reached_goal);

        let mut grid = Grid::from_values(&[&[16, 16]]);
        let outcome = sweep(&mut grid, Direction::Left, 16, &mut events);
        assert!(!outcome.reached_goal);
    }

    #[test]
    fn single_cell_line_never_moves() {
        let (values, outcome) = swept(&[&[2, 2]], Direction::Up);
        assert_eq!(values, vec![vec![2, 2]]);
        assert!(!outcome.moved);
    }

    #[test]
    fn parse_directions() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" LEFT ".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("d".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!("j".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!(
            "diagonal".parse::<Direction>(),
            Err(EngineError::UnknownDirection("diagonal".into()))
        );
        assert_eq!(Direction::try_from(2u8).unwrap(), Direction::Left);
        assert_eq!(Direction::try_from(4u8), Err(EngineError::UnknownDirection("4".into())));
    }
}
