//! viewfind CLI: locate views in a captured view tree
//!
//! ## Usage
//!
//! ```bash
//! viewfind find text Save --tree ui.json           # First match
//! viewfind find-all "class name" Button -t ui.yaml # Every match
//! viewfind find-all xpath "//Button[2]" -t ui.json --format json
//! ```

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use viewfind::MatchMode;
use viewfind_cli::{
    render_report, run_lookup, Cli, CliConfig, CliResult, Commands, Fixture, LookupArgs,
    Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);
    console::set_colors_enabled(config.color.should_color());

    match cli.command {
        Commands::Find(args) => run_find(&config, &args, MatchMode::Single),
        Commands::FindAll(args) => run_find(&config, &args, MatchMode::Multi),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(cli.color.into())
        .with_format(cli.format.into())
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_find(config: &CliConfig, args: &LookupArgs, mode: MatchMode) -> CliResult<()> {
    let fixture = Fixture::load(&args.tree)?;
    let report = run_lookup(&fixture, args, mode)?;
    let rendered = render_report(
        &report,
        config.format,
        config.color.should_color(),
        config.verbosity.is_quiet(),
    )?;
    print!("{rendered}");
    Ok(())
}
