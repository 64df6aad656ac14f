//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};

/// Cotejador: CLI for Cotejar - offline tooling for translation catalogs
#[derive(Parser, Debug)]
#[command(name = "cotejador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint translation catalogs for missing keys, empty or unnormalized
    /// values and placeholder drift
    Lint(LintArgs),

    /// Render a locale-by-key coverage matrix for a catalog
    Coverage(CoverageArgs),

    /// Print catalog strings, optionally filtered by locale and key
    Show(ShowArgs),

    /// Run text through the comparison normalization pipeline
    Normalize(NormalizeArgs),

    /// List the supported locales and their site markers
    Locales(LocalesArgs),
}

/// Arguments for the lint command
#[derive(Parser, Debug)]
pub struct LintArgs {
    /// Catalogs to lint: built-in deck names or JSON/YAML files
    #[arg(required = true)]
    pub catalogs: Vec<String>,

    /// Reference locale the other locales are checked against
    #[arg(short, long, default_value = "en")]
    pub reference: String,

    /// Treat warnings as failures
    #[arg(long)]
    pub deny_warnings: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the coverage command
#[derive(Parser, Debug)]
pub struct CoverageArgs {
    /// Catalog to inspect: a built-in deck name or a JSON/YAML file
    pub catalog: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Catalog to print: a built-in deck name or a JSON/YAML file
    pub catalog: String,

    /// Only print strings for this locale
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Only print strings for this key
    #[arg(short, long)]
    pub key: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the normalize command
#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Text to normalize; reads stdin line by line when omitted
    pub text: Vec<String>,
}

/// Arguments for the locales command
#[derive(Parser, Debug)]
pub struct LocalesArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color output argument
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

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use crate::output::OutputFormat;

    #[test]
    fn test_lint_defaults() {
        let cli = Cli::try_parse_from(["cotejador", "lint", "signup"]).unwrap();
        match cli.command {
            Commands::Lint(args) => {
                assert_eq!(args.catalogs, vec!["signup".to_string()]);
                assert_eq!(args.reference, "en");
                assert!(!args.deny_warnings);
                assert!(matches!(args.format, FormatArg::Text));
            }
            _ => panic!("expected lint command"),
        }
    }

    #[test]
    fn test_lint_accepts_multiple_catalogs() {
        let cli = Cli::try_parse_from(["cotejador", "lint", "signup", "signin", "decks/extra.json"])
            .unwrap();
        match cli.command {
            Commands::Lint(args) => assert_eq!(args.catalogs.len(), 3),
            _ => panic!("expected lint command"),
        }
    }

    #[test]
    fn test_lint_requires_a_catalog() {
        assert!(Cli::try_parse_from(["cotejador", "lint"]).is_err());
    }

    #[test]
    fn test_show_filters() {
        let cli = Cli::try_parse_from([
            "cotejador", "show", "signin", "--locale", "ru", "--key", "title",
        ])
        .unwrap();
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.catalog, "signin");
                assert_eq!(args.locale.as_deref(), Some("ru"));
                assert_eq!(args.key.as_deref(), Some("title"));
            }
            _ => panic!("expected show command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["cotejador", "-vv", "--color", "never", "locales"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert!(matches!(cli.color, ColorArg::Never));
    }

    #[test]
    fn test_color_arg_conversion() {
        let auto: ColorChoice = ColorArg::Auto.into();
        assert_eq!(auto, ColorChoice::Auto);

        let always: ColorChoice = ColorArg::Always.into();
        assert_eq!(always, ColorChoice::Always);

        let never: ColorChoice = ColorArg::Never.into();
        assert_eq!(never, ColorChoice::Never);
    }

    #[test]
    fn test_format_arg_conversion() {
        let text: OutputFormat = FormatArg::Text.into();
        assert_eq!(text, OutputFormat::Text);

        let json: OutputFormat = FormatArg::Json.into();
        assert_eq!(json, OutputFormat::Json);
    }

    #[test]
    fn test_normalize_takes_free_text() {
        let cli = Cli::try_parse_from(["cotejador", "normalize", "a", "b"]).unwrap();
        match cli.command {
            Commands::Normalize(args) => assert_eq!(args.text.len(), 2),
            _ => panic!("expected normalize command"),
        }
    }
}
