use std::io;

use clap::Parser;
use log::info;

use top_langs::app;
use top_langs::cli::Cli;
use top_langs::config::Settings;
use top_langs::{EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    std::process::exit(match run(&cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_config() {
                EXIT_CONFIG_ERROR
            } else {
                EXIT_FAILURE
            }
        }
    });
}

fn run(cli: &Cli) -> top_langs::Result<()> {
    info!("Reading settings from {}", cli.config.display());
    let mut settings = Settings::load(&cli.config)?;
    cli.apply_overrides(&mut settings);

    let stdout = io::stdout();
    app::run(&settings, &mut stdout.lock())
}
