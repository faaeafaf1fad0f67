//! viewfind CLI library
//!
//! Command-line interface for running locator lookups against captured view
//! tree fixtures.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
mod fixture;
mod lookup;
mod output;

pub use commands::{Cli, ColorArg, Commands, FormatArg, LookupArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use fixture::Fixture;
pub use lookup::{run_lookup, LookupReport, MatchedView};
pub use output::{render_json, render_report, render_text, OutputFormat};
