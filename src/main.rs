mod commands;
mod data;
mod options;

use std::process;

use env_logger::Env;
use structopt::StructOpt;

use crate::options::{Options, Subcommand};

fn main() {
    let options = Options::from_args();

    let log_filter = match options.global.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_filter)).init();

    match run(options) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    match options.command {
        Subcommand::Pack(pack_options) => commands::pack(pack_options)?,
        Subcommand::Verify(verify_options) => commands::verify(verify_options)?,
    }

    Ok(())
}
