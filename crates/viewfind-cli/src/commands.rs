//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ColorChoice;
use crate::output::OutputFormat;

/// viewfind: locate views in a view tree fixture by strategy and selector
#[derive(Parser, Debug)]
#[command(name = "viewfind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (print matches only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Output format (text, json)
    #[arg(long, default_value = "text", global = true)]
    pub format: FormatArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the first view matching a locator
    Find(LookupArgs),

    /// Print every view matching a locator
    FindAll(LookupArgs),
}

/// Arguments shared by the lookup commands
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    /// Strategy tag ("id", "class name", "text", "accessibility id", "xpath")
    pub strategy: String,

    /// Selector interpreted by the strategy
    pub selector: String,

    /// View tree fixture (.json, .yaml or .yml)
    #[arg(short, long)]
    pub tree: PathBuf,

    /// Target package used to resolve ids (overrides the fixture)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Accept matches that exist but are not displayed
    #[arg(long)]
    pub no_displayed: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON document
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}
