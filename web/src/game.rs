use crate::size_select::SizeSelect;
use crate::utils::*;
use concentration_core as game;
use gloo::timers::callback::Timeout;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Hidden,
    FaceUp(game::Color),
    Matched(game::Color),
    NewMatch(game::Color),
}

impl ViewCellState {
    fn from_cell(cell: game::Cell) -> Self {
        use game::CellState::*;
        match cell.state() {
            Hidden => Self::Hidden,
            Flipped => Self::FaceUp(cell.color()),
            Matched if cell.is_new_match() => Self::NewMatch(cell.color()),
            Matched => Self::Matched(cell.color()),
        }
    }

    fn color(self) -> Option<game::Color> {
        match self {
            Self::Hidden => None,
            Self::FaceUp(color) | Self::Matched(color) | Self::NewMatch(color) => Some(color),
        }
    }

    fn classes(self) -> Classes {
        match self {
            Self::Hidden => classes!("card"),
            Self::FaceUp(_) => classes!("card", "flipped"),
            Self::Matched(_) => classes!("card", "flipped", "matched"),
            Self::NewMatch(_) => classes!("card", "flipped", "matched", "new-match"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Msg {
    Flip(game::Coord2),
    Resolve(game::Deferred),
    NewGame,
    Resize(game::Coord2),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    cell_state: ViewCellState,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        cell_state,
        locked,
        callback,
    } = props.clone();

    let mut class = cell_state.classes();
    if locked {
        class.push("locked");
    }
    let style = cell_state
        .color()
        .map(|color| format!("background-color: {color}"));

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}, {}) click", row, col);
        if !locked {
            callback.emit((row, col));
        }
    });

    html! {
        <div {class} {style} {onclick}/>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Seed for the first board, random when missing
    #[prop_or_default]
    pub seed: Option<u64>,
    /// `(rows, cols)` of the first board
    #[prop_or_default]
    pub size: Option<game::Coord2>,
}

impl GameProps {
    fn initial_config(&self) -> game::GameConfig {
        match self.size.map(game::GameConfig::new) {
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                log::error!("ignoring requested size {:?}: {}", self.size, err);
                Default::default()
            }
            None => Default::default(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    engine: game::PlayEngine,
}

impl GameView {
    fn flip_cell(&mut self, ctx: &Context<Self>, coords: game::Coord2) -> bool {
        match self.engine.flip(coords) {
            Ok(outcome) => {
                if let Some(deferred) = outcome.deferred() {
                    Self::schedule(ctx, deferred.clone());
                }
                outcome.has_update()
            }
            Err(err) => {
                log::warn!("flip at {:?} rejected: {}", coords, err);
                false
            }
        }
    }

    /// Fires once after the delay. Never cancelled, a reset makes it stale instead.
    fn schedule(ctx: &Context<Self>, deferred: game::Deferred) {
        let link = ctx.link().clone();
        Timeout::new(deferred.delay_ms(), move || {
            link.send_message(Msg::Resolve(deferred))
        })
        .forget();
    }

    fn restart(&mut self, size: Option<game::Coord2>) -> bool {
        if needs_confirmation(&self.engine) && !confirm_discard() {
            log::debug!("restart cancelled");
            return false;
        }

        match self.engine.reset(size) {
            Ok(()) => true,
            Err(err) => {
                log::error!("cannot start a {:?} game: {}", size, err);
                false
            }
        }
    }

    fn game_state_class(&self) -> Classes {
        if self.engine.is_game_over() {
            classes!("concentration", "game-over")
        } else if self.engine.is_input_locked() {
            classes!("concentration", "locked")
        } else {
            classes!("concentration")
        }
    }
}

/// A finished game is not worth a prompt even though all of its cards are up.
fn needs_confirmation(engine: &game::PlayEngine) -> bool {
    engine.is_game_in_progress() && !engine.is_game_over()
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);
        Self {
            engine: game::PlayEngine::new(props.initial_config(), seed),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(coords) => {
                log::debug!("flip cell: {:?}", coords);
                self.flip_cell(ctx, coords)
            }
            Resolve(deferred) => self.engine.resolve(deferred).has_update(),
            NewGame => self.restart(None),
            Resize(size) if size == self.engine.size() => false,
            Resize(size) => self.restart(Some(size)),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (rows, cols) = self.engine.size();
        let board = self.engine.board();

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_resize = ctx.link().callback(Resize);
        let pairs_left = self.engine.pairs_left().to_string();

        html! {
            <div class={self.game_state_class()}>
                <nav>
                    <SizeSelect current={self.engine.size()} onselect={cb_resize}/>
                    <aside>{pairs_left}</aside>
                    <button class="new-game" onclick={cb_new_game}>{"New game"}</button>
                </nav>
                {
                    for (0..rows).map(|row| html! {
                        <div class="row">
                            {
                                for (0..cols).map(|col| {
                                    let coords = (row, col);
                                    let cell_state = ViewCellState::from_cell(board.cell_at(coords));
                                    let locked = !self.engine.can_flip_at(coords);
                                    let callback = ctx.link().callback(Flip);
                                    html! {
                                        <CellView {row} {col} {cell_state} {locked} {callback}/>
                                    }
                                })
                            }
                        </div>
                    })
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::{Board, Color, GameConfig, PlayEngine};
    use ndarray::array;

    const RED: Color = game::PALETTE[0];
    const BLUE: Color = game::PALETTE[3];

    fn engine() -> PlayEngine {
        let board = Board::from_colors(array![[RED, BLUE], [BLUE, RED]]).unwrap();
        PlayEngine::with_board(GameConfig::new((2, 2)).unwrap(), board, 0).unwrap()
    }

    #[test]
    fn hidden_cells_show_no_color() {
        let engine = engine();
        let state = ViewCellState::from_cell(engine.cell_at((0, 1)));

        assert_eq!(state, ViewCellState::Hidden);
        assert_eq!(state.color(), None);
        assert!(!state.classes().contains("flipped"));
    }

    #[test]
    fn matched_cells_render_flash_then_settle() {
        let mut engine = engine();
        engine.flip((0, 0)).unwrap();
        let deferred = engine.flip((1, 1)).unwrap().into_deferred().unwrap();

        let state = ViewCellState::from_cell(engine.cell_at((0, 0)));
        assert_eq!(state, ViewCellState::NewMatch(RED));
        assert!(state.classes().contains("new-match"));

        engine.resolve(deferred);
        let state = ViewCellState::from_cell(engine.cell_at((0, 0)));
        assert_eq!(state, ViewCellState::Matched(RED));
        assert!(!state.classes().contains("new-match"));
    }

    #[test]
    fn mismatched_cells_show_their_colors() {
        let mut engine = engine();
        engine.flip((0, 0)).unwrap();
        engine.flip((0, 1)).unwrap();

        assert_eq!(
            ViewCellState::from_cell(engine.cell_at((0, 1))),
            ViewCellState::FaceUp(BLUE)
        );
        assert!(engine.is_input_locked());
    }

    #[test]
    fn confirmation_only_for_unfinished_games() {
        let mut engine = engine();
        assert!(!needs_confirmation(&engine));

        engine.flip((0, 0)).unwrap();
        assert!(needs_confirmation(&engine));

        engine.flip((1, 1)).unwrap();
        engine.flip((0, 1)).unwrap();
        assert_eq!(engine.flip((1, 0)).unwrap(), game::FlipOutcome::Won);
        assert!(!needs_confirmation(&engine));
    }

    #[test]
    fn invalid_requested_size_falls_back_to_default() {
        let props = GameProps {
            seed: Some(1),
            size: Some((3, 3)),
        };
        assert_eq!(props.initial_config(), GameConfig::default());

        let props = GameProps {
            seed: None,
            size: Some((4, 6)),
        };
        assert_eq!(props.initial_config().size(), (4, 6));
    }
}
