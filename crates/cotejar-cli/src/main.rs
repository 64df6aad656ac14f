//! Cotejador CLI: offline tooling for translation catalogs
//!
//! ## Usage
//!
//! ```bash
//! cotejador lint signup                    # Lint a built-in deck
//! cotejador lint decks/*.json -r en        # Lint catalog files
//! cotejador coverage signup                # Locale-by-key matrix
//! cotejador show signin -l ru              # Print one locale's strings
//! cotejador normalize "Built&nbsp;fast"    # One-off normalization
//! cotejador locales                        # Locale model
//! ```

use clap::Parser;
use cotejador::{
    build_coverage, lint_table, render_coverage_json, render_coverage_text, render_lint_report,
    Cli, CliConfig, CliError, CliResult, Commands, CoverageArgs, LintArgs, LocalesArgs,
    NormalizeArgs, OutputFormat, ProgressReporter, ShowArgs, Verbosity,
};
use cotejar::{catalog, normalize, Locale, TranslationTable};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

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
    init_tracing(&cli);

    let config = build_config(&cli);

    match cli.command {
        Commands::Lint(args) => run_lint(&config, &args),
        Commands::Coverage(args) => run_coverage(&args),
        Commands::Show(args) => run_show(&args),
        Commands::Normalize(args) => run_normalize(&args),
        Commands::Locales(args) => run_locales(&args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.into())
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve a catalog argument: a built-in deck name first, then a file.
fn load_catalog(spec: &str) -> CliResult<(String, TranslationTable)> {
    if let Some(table) = catalog::builtin(spec) {
        tracing::debug!(catalog = %spec, "resolved built-in deck");
        return Ok((spec.to_string(), table.clone()));
    }

    let path = Path::new(spec);
    if path.exists() {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(spec)
            .to_string();
        tracing::debug!(catalog = %path.display(), "loading catalog file");
        return Ok((name, TranslationTable::from_file(path)?));
    }

    Err(CliError::catalog(format!(
        "\"{spec}\" is neither a built-in deck ({}) nor a readable file",
        catalog::DECK_NAMES.join(", ")
    )))
}

fn run_lint(config: &CliConfig, args: &LintArgs) -> CliResult<()> {
    let format: OutputFormat = args.format.into();
    let mut reporter =
        ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let started = Instant::now();

    if args.catalogs.len() > 1 && format == OutputFormat::Text {
        reporter.start_progress(args.catalogs.len() as u64, "Linting catalogs");
    }

    let mut reports = Vec::new();
    for spec in &args.catalogs {
        reporter.set_message(spec);
        let (name, table) = load_catalog(spec)?;
        reports.push(lint_table(&name, &table, &args.reference));
        reporter.increment(1);
    }
    reporter.finish();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for report in &reports {
                print!("{}", render_lint_report(report));
            }
            let passing = reports
                .iter()
                .filter(|r| r.passes(args.deny_warnings))
                .count();
            reporter.summary(passing, reports.len() - passing, started.elapsed());
        }
    }

    let failing: usize = reports
        .iter()
        .map(|r| {
            r.errors
                + if args.deny_warnings {
                    r.warnings
                } else {
                    0
                }
        })
        .sum();
    if failing > 0 {
        return Err(CliError::lint_failed(failing, reports.len()));
    }
    Ok(())
}

fn run_coverage(args: &CoverageArgs) -> CliResult<()> {
    let (name, table) = load_catalog(&args.catalog)?;
    let matrix = build_coverage(&name, &table);

    match args.format.into() {
        OutputFormat::Json => println!("{}", render_coverage_json(&matrix)?),
        OutputFormat::Text => print!("{}", render_coverage_text(&matrix)),
    }
    Ok(())
}

fn run_show(args: &ShowArgs) -> CliResult<()> {
    let (name, table) = load_catalog(&args.catalog)?;

    if let Some(ref locale) = args.locale {
        if !table.has_locale(locale) {
            return Err(CliError::invalid_argument(format!(
                "locale \"{locale}\" is not in catalog \"{name}\""
            )));
        }
    }
    if let Some(ref key) = args.key {
        let known = table
            .keys()
            .iter()
            .any(|k| k.eq_ignore_ascii_case(key.trim()));
        if !known {
            return Err(CliError::invalid_argument(format!(
                "key \"{key}\" is not in catalog \"{name}\""
            )));
        }
    }

    let matches_locale = |candidate: &str| {
        args.locale
            .as_deref()
            .map_or(true, |wanted| candidate.eq_ignore_ascii_case(wanted.trim()))
    };
    let matches_key = |candidate: &str| {
        args.key
            .as_deref()
            .map_or(true, |wanted| candidate.eq_ignore_ascii_case(wanted.trim()))
    };

    let mut view: BTreeMap<&str, BTreeMap<&str, &str>> = BTreeMap::new();
    for locale in table.locales() {
        if !matches_locale(locale) {
            continue;
        }
        for (key, value) in table.strings_for(locale) {
            if matches_key(key) {
                view.entry(locale).or_default().insert(key, value);
            }
        }
    }

    match args.format.into() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => {
            println!("{name}");
            for (locale, strings) in &view {
                println!("  {locale}:");
                for (key, value) in strings {
                    println!("    {key} = {value:?}");
                }
            }
        }
    }
    Ok(())
}

fn run_normalize(args: &NormalizeArgs) -> CliResult<()> {
    if args.text.is_empty() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        for line in input.lines() {
            println!("{}", normalize(line));
        }
    } else {
        for text in &args.text {
            println!("{}", normalize(text));
        }
    }
    Ok(())
}

fn run_locales(args: &LocalesArgs) -> CliResult<()> {
    #[derive(Serialize)]
    struct LocaleRow {
        code: &'static str,
        html_lang_prefix: &'static str,
        wpml_cookie: &'static str,
        url_path: &'static str,
        menu_label: &'static str,
    }

    match args.format.into() {
        OutputFormat::Json => {
            let rows: Vec<LocaleRow> = Locale::ALL
                .iter()
                .map(|locale| LocaleRow {
                    code: locale.code(),
                    html_lang_prefix: locale.html_lang_prefix(),
                    wpml_cookie: locale.wpml_cookie_value(),
                    url_path: locale.url_path(),
                    menu_label: locale.menu_label(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            println!(
                "{:<6} {:<12} {:<12} {:<10} {}",
                "code", "html lang", "wpml cookie", "url path", "menu label"
            );
            for locale in Locale::ALL {
                println!(
                    "{:<6} {:<12} {:<12} {:<10} {}",
                    locale.code(),
                    locale.html_lang_prefix(),
                    locale.wpml_cookie_value(),
                    if locale.url_path().is_empty() {
                        "/"
                    } else {
                        locale.url_path()
                    },
                    locale.menu_label()
                );
            }
        }
    }
    Ok(())
}
