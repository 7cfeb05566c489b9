use concentration_core::*;
use ndarray::{Array2, array};

const RED: Color = PALETTE[0];
const GREEN: Color = PALETTE[1];
const YELLOW: Color = PALETTE[2];
const BLUE: Color = PALETTE[3];
const ORANGE: Color = PALETTE[4];
const PURPLE: Color = PALETTE[5];

/// 3x4 board with red at (0, 0) and (1, 1), blue at (2, 3) and (0, 3).
fn three_by_four() -> Array2<Color> {
    array![
        [RED, GREEN, YELLOW, BLUE],
        [ORANGE, RED, PURPLE, GREEN],
        [YELLOW, ORANGE, PURPLE, BLUE],
    ]
}

fn engine_with(colors: Array2<Color>) -> PlayEngine {
    let board = Board::from_colors(colors).unwrap();
    let config = GameConfig::new(board.size()).unwrap();
    PlayEngine::with_board(config, board, 42).unwrap()
}

fn face_up(engine: &PlayEngine) -> Vec<Coord2> {
    engine
        .board()
        .iter()
        .filter(|(_, cell)| cell.is_flipped())
        .map(|(coords, _)| coords)
        .collect()
}

#[test]
fn mismatch_shows_both_then_hides_them() {
    let mut engine = engine_with(three_by_four());

    assert_eq!(engine.flip((0, 0)).unwrap(), FlipOutcome::Flipped);
    assert!(!engine.is_input_locked());

    let deferred = engine.flip((2, 3)).unwrap().into_deferred().unwrap();
    assert_eq!(face_up(&engine), [(0, 0), (2, 3)]);
    assert!(engine.is_input_locked());
    assert_eq!(deferred.action(), &DeferredAction::HideMismatch);
    assert_eq!(deferred.delay(), Timings::DEFAULT.hide_delay());

    assert_eq!(engine.resolve(deferred), ResolveOutcome::Applied);
    assert!(face_up(&engine).is_empty());
    assert!(!engine.is_input_locked());
    assert!(!engine.is_game_in_progress());
}

#[test]
fn true_pair_matches_immediately_and_flashes() {
    let mut engine = engine_with(three_by_four());

    engine.flip((0, 0)).unwrap();
    let outcome = engine.flip((1, 1)).unwrap();
    assert!(matches!(outcome, FlipOutcome::Matched(_)));

    for pos in [(0, 0), (1, 1)] {
        let cell = engine.cell_at(pos);
        assert!(cell.is_matched() && cell.is_flipped() && cell.is_new_match());
    }
    assert!(!engine.is_game_over());

    let deferred = outcome.into_deferred().unwrap();
    assert_eq!(deferred.delay(), Timings::DEFAULT.flash_delay());
    engine.resolve(deferred);

    assert!(engine.board().iter().all(|(_, cell)| !cell.is_new_match()));
    assert!(!engine.is_game_over());
}

#[test]
fn two_cell_board_wins_on_first_pair() {
    let mut engine = engine_with(array![[RED, RED]]);

    engine.flip((0, 0)).unwrap();
    assert_eq!(engine.flip((0, 1)).unwrap(), FlipOutcome::Won);
    assert!(engine.is_game_over());
    assert!(!engine.can_flip_at((0, 0)));
    assert_eq!(engine.flip((0, 0)).unwrap(), FlipOutcome::NoChange);
}

#[test]
fn reset_during_hide_leaves_new_board_alone() {
    let mut engine = engine_with(three_by_four());

    engine.flip((0, 0)).unwrap();
    let deferred = engine.flip((2, 3)).unwrap().into_deferred().unwrap();
    let stale_board = deferred.board();

    engine.reset(None).unwrap();
    assert_ne!(engine.board_id(), stale_board);
    assert_eq!(engine.size(), (3, 4));
    assert!(!engine.is_input_locked());

    engine.flip((1, 2)).unwrap();
    let before = engine.board().clone();

    assert_eq!(engine.resolve(deferred), ResolveOutcome::Stale);
    assert_eq!(engine.board(), &before);
    assert_eq!(face_up(&engine), [(1, 2)]);
}

#[test]
fn overlapping_flashes_clear_only_their_own_cells() {
    let mut engine = engine_with(three_by_four());

    engine.flip((0, 0)).unwrap();
    let red_flash = engine.flip((1, 1)).unwrap().into_deferred().unwrap();
    engine.flip((0, 1)).unwrap();
    let green_flash = engine.flip((1, 3)).unwrap().into_deferred().unwrap();

    engine.resolve(red_flash);
    assert!(!engine.cell_at((0, 0)).is_new_match());
    assert!(!engine.cell_at((1, 1)).is_new_match());
    assert!(engine.cell_at((0, 1)).is_new_match());
    assert!(engine.cell_at((1, 3)).is_new_match());

    engine.resolve(green_flash);
    assert!(engine.board().iter().all(|(_, cell)| !cell.is_new_match()));
}

#[test]
fn flash_window_does_not_lock_input() {
    let mut engine = engine_with(three_by_four());

    engine.flip((0, 0)).unwrap();
    let flash = engine.flip((1, 1)).unwrap().into_deferred().unwrap();

    assert!(!engine.is_input_locked());
    assert_eq!(engine.flip((0, 2)).unwrap(), FlipOutcome::Flipped);
    let hide = engine.flip((1, 0)).unwrap().into_deferred().unwrap();

    engine.resolve(flash);
    engine.resolve(hide);
    assert_eq!(face_up(&engine), [(0, 0), (1, 1)]);
}

#[test]
fn win_only_on_last_pair() {
    let mut engine = engine_with(three_by_four());
    let pairs = [
        [(0, 0), (1, 1)],
        [(0, 1), (1, 3)],
        [(0, 2), (2, 0)],
        [(0, 3), (2, 3)],
        [(1, 0), (2, 1)],
        [(1, 2), (2, 2)],
    ];

    // a mismatch before anything is found never ends the game
    engine.flip((0, 0)).unwrap();
    let hide = engine.flip((0, 1)).unwrap().into_deferred().unwrap();
    assert!(!engine.is_game_over());
    engine.resolve(hide);

    for (i, [a, b]) in pairs.into_iter().enumerate() {
        assert!(!engine.is_game_over());
        engine.flip(a).unwrap();
        let outcome = engine.flip(b).unwrap();
        if i + 1 == pairs.len() {
            assert_eq!(outcome, FlipOutcome::Won);
        } else {
            engine.resolve(outcome.into_deferred().unwrap());
        }
    }

    assert!(engine.is_game_over());
    assert!(engine.board().all_matched());
}

#[test]
fn resize_deals_new_board_of_requested_size() {
    let mut engine = PlayEngine::new(GameConfig::SMALL, 9);
    let first = engine.board_id();

    engine.reset(Some((4, 8))).unwrap();
    assert_eq!(engine.size(), (4, 8));
    assert_eq!(engine.board().size(), (4, 8));
    assert_ne!(engine.board_id(), first);
    assert!(engine.board().color_counts().values().all(|&n| n == 2));
}

#[test]
fn reset_without_size_still_replaces_board() {
    let mut engine = PlayEngine::new(GameConfig::SMALL, 1);
    let ids: Vec<_> = (0..4)
        .map(|_| {
            engine.reset(None).unwrap();
            engine.board_id()
        })
        .collect();

    for (i, id) in ids.iter().enumerate() {
        assert!(ids[i + 1..].iter().all(|other| other != id));
    }
}

#[test]
fn custom_timings_flow_into_deferred() {
    let timings = Timings {
        hide_delay_ms: 5,
        flash_delay_ms: 7,
    };
    let board = Board::from_colors(three_by_four()).unwrap();
    let config = GameConfig::new((3, 4)).unwrap().with_timings(timings);
    let mut engine = PlayEngine::with_board(config, board, 0).unwrap();

    engine.flip((0, 0)).unwrap();
    assert_eq!(engine.flip((1, 1)).unwrap().deferred().unwrap().delay_ms(), 7);
    engine.flip((0, 1)).unwrap();
    assert_eq!(engine.flip((0, 2)).unwrap().deferred().unwrap().delay_ms(), 5);
}

#[test]
fn board_must_fit_config() {
    let board = Board::from_colors(three_by_four()).unwrap();
    assert_eq!(
        PlayEngine::with_board(GameConfig::MEDIUM, board, 0),
        Err(GameError::InvalidBoardShape)
    );
}
