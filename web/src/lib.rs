use clap::Parser;
use wasm_bindgen::prelude::*;

mod api;
mod game;
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
    /// Reads options from a URL fragment such as `#-vv&--seed=42`, each `&`-separated piece being one argument.
    fn from_fragment(fragment: &str) -> Result<Self, clap::Error> {
        let pieces = fragment.trim_start_matches('#').split('&');
        let pieces = pieces.filter(|piece| !piece.is_empty());
        Self::try_parse_from(std::iter::once("cluegrid").chain(pieces))
    }
}

fn init_logging(level: Option<log::Level>) {
    let Some(level) = level else {
        return;
    };
    if let Err(err) = console_log::init_with_level(level) {
        gloo::dialogs::alert(&format!("Could not initialize logging: {err}"));
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let fragment = gloo::utils::window().location().hash().unwrap_or_default();
    let args = match Args::from_fragment(&fragment) {
        Ok(args) => args,
        Err(err) => {
            gloo::dialogs::alert(&err.to_string());
            return;
        }
    };
    init_logging(args.verbose.log_level());
    log::debug!("options: {:?}", args);

    let Some(root) = gloo::utils::document().get_element_by_id("game") else {
        log::error!("page has no element with id=\"game\"");
        return;
    };
    yew::Renderer::<game::BoardView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_from_location_hash() {
        let args = Args::from_fragment("#-vv&--seed=42&--api=http://localhost:8080/api").unwrap();

        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
        assert_eq!(args.game.seed, Some(42));
        assert_eq!(args.game.api, "http://localhost:8080/api");
    }

    #[test]
    fn empty_hash_uses_defaults() {
        for fragment in ["", "#", "#&"] {
            let args = Args::from_fragment(fragment).unwrap();

            assert_eq!(args.game.seed, None);
            assert_eq!(args.game.api, api::DEFAULT_API_BASE);
        }
    }

    #[test]
    fn malformed_fragment_is_an_error() {
        assert!(Args::from_fragment("#--seed=soon").is_err());
        assert!(Args::from_fragment("#--no-such-flag").is_err());
    }
}
