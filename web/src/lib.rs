use clap::Parser;
use concentration_core::Coord;
use wasm_bindgen::prelude::*;

mod game;
mod size_select;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Rows of the first board
    #[arg(long, requires = "cols")]
    rows: Option<Coord>,

    /// Columns of the first board
    #[arg(long, requires = "rows")]
    cols: Option<Coord>,
}

impl Args {
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    fn game_props(&self) -> game::GameProps {
        game::GameProps {
            seed: self.seed,
            size: self.rows.zip(self.cols),
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::from_location_hash(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game_props()).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_arguments_become_props() {
        let args = Args::from_location_hash("#-v&--seed=42&--rows=4&--cols=6").unwrap();
        let props = args.game_props();

        assert_eq!(props.seed, Some(42));
        assert_eq!(props.size, Some((4, 6)));
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::from_location_hash("").unwrap();
        let props = args.game_props();

        assert_eq!(props.seed, None);
        assert_eq!(props.size, None);
    }

    #[test]
    fn rows_without_cols_is_rejected() {
        assert!(Args::from_location_hash("#--rows=4").is_err());
    }
}
