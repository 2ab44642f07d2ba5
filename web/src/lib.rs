use clap::Parser;
use wasm_bindgen::prelude::*;

mod api;
mod game;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Prefix for the puzzle server endpoints
    #[arg(long, default_value = "")]
    api_base: String,

    /// Force a shuffle seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn parse_args(location_hash: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(location_hash.split(['#', '&']))
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

    let (args, parse_error) = match parse_args(&location_hash) {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("Error initializing logger: {}", err));
        }
    }
    if let Some(err) = parse_error {
        log::warn!("ignoring location hash: {}", err);
    }
    log::debug!("api base: {:?}, seed: {:?}", args.api_base, args.seed);

    let Some(root) = document().get_element_by_id("game") else {
        log::error!("Could not find id=\"game\" element");
        return;
    };

    let props = game::GameProps {
        api_base: args.api_base,
        seed: args.seed,
    };

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_args("").unwrap();

        assert_eq!(args.api_base, "");
        assert_eq!(args.seed, None);
    }

    #[test]
    fn hash_fragments_become_flags() {
        let args = parse_args("#--seed=42&--api-base=/proxy").unwrap();

        assert_eq!(args.seed, Some(42));
        assert_eq!(args.api_base, "/proxy");
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse_args("#--bogus").is_err());
    }
}
