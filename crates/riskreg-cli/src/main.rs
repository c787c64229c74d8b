//! `riskreg` binary

use anyhow::Context;
use riskreg_cli::{args, configure, logging, run_with, Invocation};
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = args::command().get_matches();
    match run(&matches) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> anyhow::Result<String> {
    let invocation = Invocation::from_matches(matches)?;
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let config = configure(&invocation, &cwd)?;
    logging::init(&config.log_level);
    run_with(config, invocation.action)
}
