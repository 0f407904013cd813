//! Command-line interface for lilex
//! This binary parses a Life Lexicon text file and prints it as JSON or as a JavaScript module.
//!
//! Usage:
//!   lilex `<path>` [--format `<format>`] [--config `<file>`]   - Parse and render a lexicon
//!   lilex `<path>` --json | --js                               - Shorthands for --format
//!   lilex --list-formats                                       - List all available formats
//!   lilex -v | -V | --version                                  - Print the version
//!
//! Configuration is read from the built-in defaults, then `lilex.toml` in the working
//! directory (if present), then the file given with `--config`.

use std::io::IsTerminal;
use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};
use lilex_babel::{FormatError, FormatRegistry};
use lilex_config::{ConfigError, LilexConfig, Loader};
use lilex_parser::lilex::model::DiagnosticSeverity;
use lilex_parser::{LexiconLoader, LexiconParser, LoaderError, Parsed, RulesError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const LOCAL_CONFIG: &str = "lilex.toml";

#[derive(Debug, Error)]
enum CliError {
    #[error("no input file given")]
    MissingPath,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid format rules: {0}")]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Load(#[from] LoaderError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

fn build_cli() -> Command {
    Command::new("lilex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse a Life Lexicon text file into JSON or a JavaScript module")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .long("version")
                .short('v')
                .visible_short_alias('V')
                .help("Print version")
                .action(ArgAction::Version),
        )
        .arg(
            Arg::new("path")
                .help("Path to the lexicon text file")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from configuration: json)")
                .conflicts_with_all(["json", "js"]),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Shorthand for --format json")
                .action(ArgAction::SetTrue)
                .conflicts_with("js"),
        )
        .arg(
            Arg::new("js")
                .long("js")
                .help("Shorthand for --format js")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults and ./lilex.toml"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Log more (once for info, twice for debug); RUST_LOG takes precedence")
                .action(ArgAction::Count),
        )
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    match handle_parse_command(&matches) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprintln!("Fatal Error: {}", e);
            eprintln!();
            eprintln!("{}", build_cli().render_usage());
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn load_config(explicit: Option<&String>) -> Result<LilexConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = explicit {
        loader = loader.with_file(path);
    }
    loader.build()
}

/// Pick the output format: shorthand flags, then --format, then configuration.
fn output_format(matches: &ArgMatches, config: &LilexConfig) -> String {
    if matches.get_flag("json") {
        "json".to_string()
    } else if matches.get_flag("js") {
        "js".to_string()
    } else if let Some(format) = matches.get_one::<String>("format") {
        format.clone()
    } else {
        config.output.format.clone()
    }
}

fn handle_parse_command(matches: &ArgMatches) -> Result<String, CliError> {
    let path = matches
        .get_one::<String>("path")
        .ok_or(CliError::MissingPath)?;
    let config = load_config(matches.get_one::<String>("config"))?;
    let format = output_format(matches, &config);

    let registry = FormatRegistry::with_defaults();
    // fail on an unknown format before doing any parsing
    registry.get(&format)?;

    let parser = LexiconParser::new(&config.format)?;
    tracing::info!(path = %path, format = %format, "parsing lexicon");
    let parsed = LexiconLoader::from_path(Path::new(path))?.parse_with(&parser)?;

    if config.diagnostics.log {
        log_diagnostics(&parsed);
    }
    tracing::info!(
        entries = parsed.lexicon.len(),
        unresolved = parsed.lexicon.unresolved().len(),
        "parsed lexicon"
    );

    Ok(registry.serialize(&parsed.lexicon, &format)?)
}

fn log_diagnostics(parsed: &Parsed) {
    for diagnostic in &parsed.diagnostics {
        match diagnostic.severity {
            DiagnosticSeverity::Warning => tracing::warn!("{}", diagnostic),
            DiagnosticSeverity::Information => tracing::info!("{}", diagnostic),
        }
    }
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for (name, description) in registry.describe() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
