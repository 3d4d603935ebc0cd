use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod help;
mod settings;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

impl Args {
    /// Options come from the page's location hash, e.g. `#-vv&--seed=42&--width=16`.
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
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
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::from_location_hash("").unwrap();
        assert_eq!(args.game.seed, None);
        assert_eq!(args.game.width, None);
        assert_eq!(args.game.step_interval, None);
    }

    #[test]
    fn hash_options_are_parsed() {
        let args = Args::from_location_hash(
            "#--seed=42&--width=16&--height=12&--mine-probability=0.1&--step-interval=250",
        )
        .unwrap();
        assert_eq!(args.game.seed, Some(42));
        assert_eq!(args.game.width, Some(16));
        assert_eq!(args.game.height, Some(12));
        assert_eq!(args.game.mine_probability, Some(0.1));
        assert_eq!(args.game.step_interval, Some(250));
    }

    #[test]
    fn verbosity_flags_raise_log_level() {
        let args = Args::from_location_hash("#-vv").unwrap();
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn oversized_width_is_rejected() {
        assert!(Args::from_location_hash("#--width=300").is_err());
    }
}
