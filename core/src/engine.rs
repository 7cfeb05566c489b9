use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Identity of one generated board, never reused within an engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardId(u64);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    Won,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Turn every unmatched card face-down and unlock input.
    HideMismatch,
    /// Drop the highlight from exactly these cells.
    ClearFlash(SmallVec<[Coord2; 2]>),
}

/// Second half of a timed transition.
///
/// The engine never waits by itself: whoever drives it sleeps for
/// [`Deferred::delay`] and then hands this back to [`PlayEngine::resolve`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    board: BoardId,
    delay_ms: u32,
    action: DeferredAction,
}

impl Deferred {
    pub fn board(&self) -> BoardId {
        self.board
    }

    pub fn action(&self) -> &DeferredAction {
        &self.action
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.into())
    }
}

/// One board plus the flags that gate play on it. Replaced as a whole on reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Session {
    id: BoardId,
    board: Board,
    input_locked: bool,
    state: EngineState,
}

impl Session {
    fn new(id: BoardId, board: Board) -> Self {
        Self {
            id,
            board,
            input_locked: false,
            state: Default::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    config: GameConfig,
    session: Session,
    next_id: u64,
    seed: u64,
}

impl PlayEngine {
    /// Starts a game on a freshly generated board.
    pub fn new(config: GameConfig, mut seed: u64) -> Self {
        let board = deal(&mut seed, config);
        Self {
            config,
            session: Session::new(BoardId(0), board),
            next_id: 1,
            seed,
        }
    }

    /// Starts a game on a known board, later resets generate from `seed`.
    pub fn with_board(config: GameConfig, board: Board, seed: u64) -> Result<Self> {
        if board.size() != config.size() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self {
            config,
            session: Session::new(BoardId(0), board),
            next_id: 1,
            seed,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn board(&self) -> &Board {
        &self.session.board
    }

    pub fn board_id(&self) -> BoardId {
        self.session.id
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.session.board.cell_at(coords)
    }

    pub fn state(&self) -> EngineState {
        self.session.state
    }

    pub fn is_game_over(&self) -> bool {
        self.session.state.is_finished()
    }

    pub fn is_input_locked(&self) -> bool {
        self.session.input_locked
    }

    /// Whether any card is face-up, callers confirm before throwing this away.
    pub fn is_game_in_progress(&self) -> bool {
        self.session.board.any_flipped()
    }

    pub fn pairs_left(&self) -> CellCount {
        (self.session.board.total_cells() - self.session.board.matched_count()) / 2
    }

    pub fn can_flip_at(&self, coords: Coord2) -> bool {
        if self.session.state.is_finished() || self.session.input_locked {
            return false;
        }
        self.session
            .board
            .get(coords)
            .is_some_and(|cell| !cell.is_matched())
    }

    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        use FlipOutcome::*;

        let coords = self.session.board.validate_coords(coords)?;
        if !self.can_flip_at(coords) {
            log::trace!("flip at {:?} ignored", coords);
            return Ok(NoChange);
        }

        let board = &mut self.session.board;
        let cell = board.cell_mut(coords);
        if cell.flipped {
            cell.flipped = false;
            log::debug!("unflipped {:?}", coords);
            return Ok(Unflipped);
        }
        cell.flipped = true;
        let color = cell.color();

        if board.unresolved_count() < 2 {
            log::debug!("flipped {:?}", coords);
            return Ok(Flipped);
        }

        let matching = board.matching_set(color);
        if matching.iter().all(|&pos| board[pos].is_flipped()) {
            for &pos in &matching {
                let cell = board.cell_mut(pos);
                cell.matched = true;
                cell.flipped = true;
            }

            if board.all_matched() {
                self.session.state = EngineState::Won;
                log::debug!("last pair {:?} matched, game won", matching);
                return Ok(Won);
            }

            for &pos in &matching {
                board.cell_mut(pos).new_match = true;
            }
            log::debug!("matched {:?}", matching);
            let delay_ms = self.config.timings().flash_delay_ms;
            Ok(Matched(self.schedule(delay_ms, DeferredAction::ClearFlash(matching))))
        } else {
            self.session.input_locked = true;
            log::debug!("mismatch at {:?}, input locked", coords);
            let delay_ms = self.config.timings().hide_delay_ms;
            Ok(Mismatched(self.schedule(delay_ms, DeferredAction::HideMismatch)))
        }
    }

    /// Finishes a timed transition, unless its board was replaced meanwhile.
    pub fn resolve(&mut self, deferred: Deferred) -> ResolveOutcome {
        if deferred.board != self.session.id {
            log::debug!(
                "dropping {:?} scheduled for stale board {:?}",
                deferred.action,
                deferred.board
            );
            return ResolveOutcome::Stale;
        }

        let board = &mut self.session.board;
        match deferred.action {
            DeferredAction::HideMismatch => {
                for cell in board.cells_mut().filter(|cell| !cell.matched) {
                    cell.flipped = false;
                }
                self.session.input_locked = false;
                log::debug!("mismatch hidden, input unlocked");
            }
            DeferredAction::ClearFlash(cells) => {
                for pos in cells {
                    board.cell_mut(pos).new_match = false;
                }
            }
        }
        ResolveOutcome::Applied
    }

    /// Throws the current game away and deals a new board, keeping the size
    /// unless a new one is given.
    pub fn reset(&mut self, size: Option<Coord2>) -> Result<()> {
        let config = match size {
            Some(size) => self.config.with_size(size)?,
            None => self.config,
        };
        self.replace_session(config);
        Ok(())
    }

    fn replace_session(&mut self, config: GameConfig) {
        let board = deal(&mut self.seed, config);
        let id = BoardId(self.next_id);
        self.next_id += 1;

        self.config = config;
        self.session = Session::new(id, board);
        log::debug!("new session {:?} with size {:?}", id, config.size());
    }

    fn schedule(&self, delay_ms: u32, action: DeferredAction) -> Deferred {
        Deferred {
            board: self.session.id,
            delay_ms,
            action,
        }
    }
}

/// Generates a board and advances `seed` so the next deal differs.
fn deal(seed: &mut u64, config: GameConfig) -> Board {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(*seed);
    let board_seed: u64 = rng.random();
    *seed = rng.random();
    RandomBoardGenerator::new(board_seed).generate(config)
}
