use std::io::{self, Write};

use clap::Parser;
use cli::{Commands, GlobalArgs, LogLevel};
use commands::{generate::generate, values::values};
use env_logger::Target;
use log::LevelFilter;

use crate::cli::Cli;

mod cli;
mod commands;
mod output;
mod overrides;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    configure_logging(&cli.global_args);

    let mut stdout = io::stdout().lock();

    if let Some(command) = cli.command {
        match command {
            Commands::Generate(args) => generate(args, &mut stdout)?,
            Commands::Values(args) => values(args, &mut stdout)?,
        }
    }

    stdout.flush()?;

    Ok(())
}

fn configure_logging(global_args: &GlobalArgs) {
    let log_level = global_args.get_log_level();
    let mut logger = env_logger::builder();

    logger
        .format_timestamp(None)
        .format_module_path(matches!(log_level, LogLevel::Trace))
        .format_target(false)
        .format_level(false)
        .target(Target::Stderr);

    if let LogLevel::Normal = log_level {
        logger.filter(Some("undercloud_wizard"), LevelFilter::Info);
    }

    if let LogLevel::Verbose = log_level {
        logger.filter(Some("undercloud_wizard"), LevelFilter::Debug);
    }

    if let LogLevel::Trace = log_level {
        logger.filter(None, LevelFilter::Debug);
    }

    logger.init();
}
