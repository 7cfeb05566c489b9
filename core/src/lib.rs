#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

use core::ops::Index;
use core::time::Duration;
use hashbrown::HashMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use cell::*;
pub use color::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod color;
mod engine;
mod error;
mod generator;
mod types;

/// Delays for the two timed windows of a turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// How long a mismatched pair stays face-up, input is locked meanwhile.
    pub hide_delay_ms: u32,
    /// How long a freshly found pair keeps its highlight.
    pub flash_delay_ms: u32,
}

impl Timings {
    pub const DEFAULT: Self = Self {
        hide_delay_ms: 850,
        flash_delay_ms: 900,
    };

    pub const fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms as u64)
    }

    pub const fn flash_delay(&self) -> Duration {
        Duration::from_millis(self.flash_delay_ms as u64)
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Board size plus timing, only constructible for sizes that can be fully
/// paired from [`PALETTE`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedGameConfig")]
pub struct GameConfig {
    size: Coord2,
    timings: Timings,
}

/// Wire shape of [`GameConfig`], checked before it becomes one.
#[derive(Deserialize)]
struct UncheckedGameConfig {
    size: Coord2,
    timings: Timings,
}

impl TryFrom<UncheckedGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(unchecked: UncheckedGameConfig) -> Result<Self> {
        Ok(Self::new(unchecked.size)?.with_timings(unchecked.timings))
    }
}

impl GameConfig {
    pub const SMALL: Self = Self::new_unchecked((3, 4));
    pub const MEDIUM: Self = Self::new_unchecked((3, 6));
    pub const LARGE: Self = Self::new_unchecked((4, 6));
    pub const HUGE: Self = Self::new_unchecked((4, 8));

    /// Sizes offered by the size selector, any other valid size works too.
    pub const PRESETS: [Self; 4] = [Self::SMALL, Self::MEDIUM, Self::LARGE, Self::HUGE];

    pub(crate) const fn new_unchecked(size: Coord2) -> Self {
        Self {
            size,
            timings: Timings::DEFAULT,
        }
    }

    /// `size` is `(rows, cols)`.
    pub fn new(size: Coord2) -> Result<Self> {
        check_pairable(size, PALETTE.len())?;
        Ok(Self::new_unchecked(size))
    }

    pub fn with_size(self, size: Coord2) -> Result<Self> {
        Ok(Self::new(size)?.with_timings(self.timings))
    }

    pub const fn with_timings(self, timings: Timings) -> Self {
        Self {
            size: self.size,
            timings,
        }
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn timings(&self) -> Timings {
        self.timings
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::SMALL
    }
}

fn check_pairable((rows, cols): Coord2, palette_len: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(GameError::EmptyBoard);
    }
    let total = mult(rows, cols);
    if total % 2 != 0 {
        return Err(GameError::OddCellCount);
    }
    if usize::from(total / 2) > palette_len {
        return Err(GameError::TooManyPairs);
    }
    Ok(())
}

/// Grid of cards indexed by `(row, col)`.
///
/// Every color on a board sits in exactly two cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Builds a face-down board from a fixed color layout.
    pub fn from_colors(colors: Array2<Color>) -> Result<Self> {
        let (rows, cols) = colors.dim();
        let size: Coord2 = (
            rows.try_into().map_err(|_| GameError::InvalidBoardShape)?,
            cols.try_into().map_err(|_| GameError::InvalidBoardShape)?,
        );
        check_pairable(size, usize::MAX)?;

        let board = Self::from_cells(colors.mapv(Cell::face_down));
        if board.color_counts().values().any(|&count| count != 2) {
            return Err(GameError::UnpairedColor);
        }
        Ok(board)
    }

    pub(crate) fn from_cells(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// All cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn color_counts(&self) -> HashMap<Color, CellCount> {
        let mut counts = HashMap::new();
        for cell in self.cells.iter() {
            *counts.entry(cell.color()).or_insert(0) += 1;
        }
        counts
    }

    /// Cells that are face-up but not yet part of a found pair.
    pub fn unresolved_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_unresolved()).count() as CellCount
    }

    pub fn matched_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_matched()).count() as CellCount
    }

    /// Positions holding `color`, on a valid board exactly two.
    pub fn matching_set(&self, color: Color) -> SmallVec<[Coord2; 2]> {
        self.iter()
            .filter(|(_, cell)| cell.color() == color)
            .map(|(coords, _)| coords)
            .collect()
    }

    pub fn all_matched(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_matched())
    }

    pub fn any_flipped(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_flipped())
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FlipOutcome {
    NoChange,
    /// A single card was turned face-up, nothing to evaluate yet.
    Flipped,
    /// A face-up card was turned back down by the player.
    Unflipped,
    Matched(Deferred),
    Mismatched(Deferred),
    Won,
}

impl FlipOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Continuation the caller has to hand back to
    /// [`PlayEngine::resolve`] once its delay elapsed.
    pub fn deferred(&self) -> Option<&Deferred> {
        match self {
            Self::Matched(deferred) | Self::Mismatched(deferred) => Some(deferred),
            _ => None,
        }
    }

    pub fn into_deferred(self) -> Option<Deferred> {
        match self {
            Self::Matched(deferred) | Self::Mismatched(deferred) => Some(deferred),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResolveOutcome {
    Applied,
    /// The board it was scheduled for has been replaced since.
    Stale,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Applied => true,
            Self::Stale => false,
        }
    }
}
