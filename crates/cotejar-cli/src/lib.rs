//! Cotejador CLI Library
//!
//! Offline tooling for Cotejar translation catalogs: linting (missing
//! keys, placeholder drift, damaged values), locale-by-key coverage
//! matrices, one-off normalization and the locale model.

#![warn(missing_docs)]

// Lints are configured in workspace Cargo.toml

mod commands;
mod config;
mod coverage;
mod error;
mod lint;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, CoverageArgs, FormatArg, LintArgs, LocalesArgs, NormalizeArgs,
    ShowArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use coverage::{
    build_coverage, render_coverage_json, render_coverage_text, CoverageMatrix, LocaleCoverage,
};
pub use error::{CliError, CliResult};
pub use lint::{
    lint_table, render_lint_json, render_lint_report, LintFinding, LintReport, LintSeverity,
};
pub use output::{OutputFormat, ProgressReporter};
