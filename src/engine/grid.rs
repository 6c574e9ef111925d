use std::fmt;

use serde::{Deserialize, Serialize};

use super::tile::Tile;

/// A cell position. Row 0 is the top edge, column 0 the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coords {
    pub row: usize,
    pub column: usize,
}

impl Coords {
    #[inline]
    pub const fn new(row: usize, column: usize) -> Self {
        Coords { row, column }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The set of free coordinates.
///
/// Entries live in a dense vector so a uniform pick is a single index;
/// `slots` maps each cell to its position in that vector for O(1) removal.
#[derive(Debug, Clone)]
pub(crate) struct EmptyCells {
    cells: Vec<Coords>,
    slots: Vec<Option<usize>>,
    columns: usize,
}

impl EmptyCells {
    fn full(rows: usize, columns: usize) -> Self {
        let cells: Vec<Coords> = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| Coords::new(row, column)))
            .collect();
        let slots = (0..cells.len()).map(Some).collect();
        EmptyCells { cells, slots, columns }
    }

    #[inline]
    fn slot_index(&self, at: Coords) -> usize {
        at.row * self.columns + at.column
    }

    fn contains(&self, at: Coords) -> bool {
        self.slots[self.slot_index(at)].is_some()
    }

    fn insert(&mut self, at: Coords) {
        let idx = self.slot_index(at);
        if self.slots[idx].is_none() {
            self.slots[idx] = Some(self.cells.len());
            self.cells.push(at);
        }
    }

    fn remove(&mut self, at: Coords) {
        let idx = self.slot_index(at);
        if let Some(pos) = self.slots[idx].take() {
            self.cells.swap_remove(pos);
            if let Some(&moved) = self.cells.get(pos) {
                let moved_idx = self.slot_index(moved);
                self.slots[moved_idx] = Some(pos);
            }
        }
    }

    fn take_at(&mut self, pos: usize) -> Option<Coords> {
        let at = *self.cells.get(pos)?;
        self.remove(at);
        Some(at)
    }

    #[inline]
    fn as_slice(&self) -> &[Coords] {
        &self.cells
    }
}

/// Fixed-size grid of optional tiles plus its synchronized free-cell index.
///
/// Every mutating method updates both views before returning, so no caller can
/// observe a tile in a cell that the free-cell index still lists (or the reverse).
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Tile>>,
    empty: EmptyCells,
}

impl Grid {
    /// An all-empty grid. Dimensions never change afterwards.
    pub(crate) fn new(rows: usize, columns: usize) -> Self {
        Grid {
            rows,
            columns,
            cells: vec![None; rows * columns],
            empty: EmptyCells::full(rows, columns),
        }
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
    fn index(&self, at: Coords) -> usize {
        debug_assert!(at.row < self.rows && at.column < self.columns);
        at.row * self.columns + at.column
    }

    /// The tile at `at`, if any.
    #[inline]
    pub fn get(&self, at: Coords) -> Option<&Tile> {
        self.cells[self.index(at)].as_ref()
    }

    /// The value of the tile at `at`, if any.
    #[inline]
    pub fn value(&self, at: Coords) -> Option<u32> {
        self.get(at).map(Tile::value)
    }

    /// Free coordinates in unspecified order.
    #[inline]
    pub fn empty_cells(&self) -> &[Coords] {
        self.empty.as_slice()
    }

    #[inline]
    pub fn is_empty_at(&self, at: Coords) -> bool {
        self.empty.contains(at)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate over `(coords, value)` for every occupied cell in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Coords, u32)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|t| (Coords::new(i / self.columns, i % self.columns), t.value()))
        })
    }

    /// Row-major values with 0 for an empty cell.
    pub fn to_values(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().map(|c| c.as_ref().map_or(0, Tile::value)).collect())
            .collect()
    }

    pub fn highest_tile(&self) -> Option<u32> {
        self.tiles().map(|(_, v)| v).max()
    }

    /// Drop every tile and mark every cell free.
    pub(crate) fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
        self.empty = EmptyCells::full(self.rows, self.columns);
    }

    /// Claim the free cell at position `pos` of [`Grid::empty_cells`] for `tile`.
    pub(crate) fn fill_free(&mut self, pos: usize, tile: Tile) -> Option<Coords> {
        let at = self.empty.take_at(pos)?;
        let idx = self.index(at);
        self.cells[idx] = Some(tile);
        Some(at)
    }

    /// Move the tile at `from` to `to`, discarding whatever `to` held.
    pub(crate) fn move_tile(&mut self, from: Coords, to: Coords) {
        debug_assert!(from != to);
        let (fi, ti) = (self.index(from), self.index(to));
        debug_assert!(self.cells[fi].is_some());
        self.cells[ti] = self.cells[fi].take();
        self.empty.remove(to);
        self.empty.insert(from);
    }

    pub(crate) fn tile_mut(&mut self, at: Coords) -> Option<&mut Tile> {
        let idx = self.index(at);
        self.cells[idx].as_mut()
    }

    #[cfg(test)]
    pub(crate) fn from_values(values: &[&[u32]]) -> Self {
        let rows = values.len();
        let columns = values.first().map_or(0, |r| r.len());
        let mut grid = Grid::new(rows, columns);
        for (row, line) in values.iter().enumerate() {
            assert_eq!(line.len(), columns, "ragged test grid");
            for (column, &v) in line.iter().enumerate() {
                if v != 0 {
                    let at = Coords::new(row, column);
                    grid.empty.remove(at);
                    let idx = grid.index(at);
                    grid.cells[idx] = Some(Tile::new(v));
                }
            }
        }
        grid
    }

    /// True when the free-cell index matches the tiles exactly.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let mut from_cells: Vec<Coords> = (0..self.cells.len())
            .filter(|&i| self.cells[i].is_none())
            .map(|i| Coords::new(i / self.columns, i % self.columns))
            .collect();
        let mut listed = self.empty.as_slice().to_vec();
        from_cells.sort();
        listed.sort();
        from_cells == listed && listed.len() + self.occupied_count() == self.rows * self.columns
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.columns == other.columns && self.cells == other.cells
    }
}

impl Eq for Grid {}

fn format_val(val: u32) -> String {
    match val {
        0 => String::from("       "),
        x => {
            let mut x = x.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(self.columns * 8);
        for (i, row) in self.to_values().iter().enumerate() {
            if i > 0 {
                writeln!(f, "{}", separator)?;
            }
            let line: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
