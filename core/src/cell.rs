use serde::{Deserialize, Serialize};

use crate::Color;

/// Lifecycle of a single card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flipped,
    Matched,
}

/// One card on the board.
///
/// Only the engine mutates cells, everything else observes them through
/// [`Board`](crate::Board).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    color: Color,
    pub(crate) flipped: bool,
    pub(crate) matched: bool,
    pub(crate) new_match: bool,
}

impl Cell {
    pub(crate) const fn face_down(color: Color) -> Self {
        Self {
            color,
            flipped: false,
            matched: false,
            new_match: false,
        }
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub const fn is_matched(&self) -> bool {
        self.matched
    }

    /// Rendering hint for the short highlight right after a pair is found.
    pub const fn is_new_match(&self) -> bool {
        self.new_match
    }

    /// Face-up and not yet part of a found pair.
    pub const fn is_unresolved(&self) -> bool {
        self.flipped && !self.matched
    }

    pub const fn state(&self) -> CellState {
        if self.matched {
            CellState::Matched
        } else if self.flipped {
            CellState::Flipped
        } else {
            CellState::Hidden
        }
    }
}
