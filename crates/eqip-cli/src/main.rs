//! Eqip CLI - Command-line interface for the attribution and ownership pipeline.

use clap::Parser;
use eqip_cli::commands;
use eqip_cli::{Cli, Command, Config, Formatter};
use eqip_pipeline::Pipeline;
use tracing::debug;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> eqip_cli::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        eqip_cli::init_tracing();
    }

    let config = Config::load(cli.config.as_deref())?;
    if let Some(path) = &config.source {
        debug!("Loaded configuration from {}", path.display());
    }

    let format = cli.format.map(Into::into).unwrap_or_default();
    let formatter = Formatter::new(format, !cli.no_color);

    if let Command::Config = cli.command {
        println!("{}", formatter.format_config(&config)?);
        return Ok(());
    }

    let pipeline = Pipeline::new(config.pipeline)?;

    match cli.command {
        Command::Attribute(args) => commands::execute_attribute(args, &pipeline, &formatter)?,
        Command::Qualitative(args) => commands::execute_qualitative(args, &pipeline, &formatter)?,
        Command::Finalize(args) => commands::execute_finalize(args, &pipeline, &formatter)?,
        Command::Run(args) => commands::execute_run(args, &pipeline, &formatter)?,
        Command::Config => {}
    }

    Ok(())
}
