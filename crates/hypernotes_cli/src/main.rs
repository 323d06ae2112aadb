//! `hypernotes` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, open the store for the session, run one command.
//! - Close the store explicitly and map failures to exit code 1.

mod args;
mod commands;
mod config;
mod error;
mod render;

use args::Cli;
use clap::Parser;
use commands::App;
use config::RuntimeConfig;
use error::CliError;
use hypernotes_core::Store;
use log::error;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = RuntimeConfig::resolve(&cli.global)?;
    config.prepare()?;

    let store = Store::open(&config.db_path)?;
    let outcome = {
        let app = App::new(&store, config.json)?;
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let result = app.run(cli.command, &mut stdin.lock(), &mut out);
        out.flush()?;
        result
    };
    store.close()?;
    outcome
}
