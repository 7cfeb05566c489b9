use alloc::vec::Vec;

use super::*;

/// Pairs colors with cells purely at random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    palette: Vec<Color>,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            palette: PALETTE.to_vec(),
        }
    }

    /// Draw colors from `palette` instead of [`PALETTE`], duplicates are dropped.
    pub fn with_palette(mut self, palette: &[Color]) -> Self {
        self.palette.clear();
        for &color in palette {
            if !self.palette.contains(&color) {
                self.palette.push(color);
            }
        }
        self
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let (rows, cols) = config.size();
        let pair_count = config.pair_count();

        let mut pool = if usize::from(pair_count) > self.palette.len() {
            log::warn!(
                "Palette too small, {} pairs requested but only {} colors, fallback to default palette",
                pair_count,
                self.palette.len()
            );
            PALETTE.to_vec()
        } else {
            self.palette
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut slots: Array2<Option<Color>> = Array2::default(config.size().to_nd_index());

        for _ in 0..pair_count {
            let color = pool.swap_remove(rng.random_range(0..pool.len()));

            // Rejection sampling: keep drawing positions until two free cells take the color.
            // There is no bound on the number of draws, but a free cell is hit with
            // probability >= 2 / (rows * cols) so this ends almost surely.
            let mut placed = 0;
            while placed < 2 {
                let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
                let slot = &mut slots[coords.to_nd_index()];
                if slot.is_none() {
                    *slot = Some(color);
                    placed += 1;
                }
            }
        }

        let cells = slots.mapv(|slot| Cell::face_down(slot.expect("every cell gets a color")));
        let board = Board::from_cells(cells);
        log::debug!(
            "generated {}x{} board with {} pairs",
            rows,
            cols,
            pair_count
        );
        board
    }
}
