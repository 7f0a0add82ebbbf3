use std::io;
use std::process;

use clap::Parser;
use log::{error, info};

mod cli;
use crate::cli::Cli;
use crate::cli::Commands;
use crate::cli::Config;

mod command;
mod error;
mod theme;

use crate::error::AppError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse the cli
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    match &cli.command {
        Commands::Pack { output } => {
            let (config, base) = Config::load(cli.config.as_deref())?;
            let path = command::pack(&config, &base, output.as_deref())?;

            info!("theme archive ready for download: {}", path.display());
        }
        Commands::List { archive } => {
            command::list(archive, &mut io::stdout().lock())?;
        }
    }
    Ok(())
}
