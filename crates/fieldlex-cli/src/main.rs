use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use fieldlex_core::convert::convert_from_external;
use fieldlex_core::patterns::{parse_date, parse_time};
use fieldlex_core::{splitter, Clock, DeclaredType, FixedClock, InputFormatConfig, OperatingMode, SystemClock};

/// fieldlex — form-input value normalization CLI
///
/// Normalize submitted values to canonical lexical form and inspect
/// dateTime splitting.
#[derive(Parser)]
#[command(name = "fieldlex", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize an external value to its canonical internal form
    Normalize {
        /// Raw external value, as a client would submit it
        value: String,
        /// Declared schema type (boolean, date, time, dateTime, anything else
        /// is opaque); omit for an untyped control
        #[arg(long = "type")]
        type_name: Option<String>,
        /// Operating mode: scripted or noscript
        #[arg(long, default_value = "noscript")]
        mode: String,
        /// Pin the current year (defaults to the system clock)
        #[arg(long)]
        year: Option<i32>,
        /// Path to a JSON format configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split a combined dateTime value and show the normalized recombination
    Split {
        /// Combined external value
        value: String,
        /// Separator between the date and time parts
        #[arg(long, default_value = "\u{b7}")]
        separator: char,
        /// Pin the current year (defaults to the system clock)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Show version information
    Version,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Normalize {
            value,
            type_name,
            mode,
            year,
            config,
            json,
        } => run_normalize(&value, type_name.as_deref(), &mode, year, config.as_deref(), json),
        Commands::Split {
            value,
            separator,
            year,
        } => run_split(&value, separator, year),
        Commands::Version => {
            println!(
                "fieldlex {} (fieldlex-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            0
        }
    };

    process::exit(exit_code);
}

fn run_normalize(
    value: &str,
    type_name: Option<&str>,
    mode: &str,
    year: Option<i32>,
    config_path: Option<&std::path::Path>,
    json: bool,
) -> i32 {
    let Some(mode) = parse_mode(mode) else {
        eprintln!("{} unknown mode {:?} (expected scripted or noscript)", "error:".red(), mode);
        return 2;
    };

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{} {}", "error:".red(), message);
            return 2;
        }
    };

    let declared = type_name.map(DeclaredType::from_name);
    let clock = make_clock(year);
    let internal = convert_from_external(
        declared.as_ref(),
        mode,
        value,
        config.datetime_separator,
        clock.as_ref(),
    );

    if json {
        println!(
            "{}",
            serde_json::json!({
                "external": value,
                "type": declared.as_ref().map(DeclaredType::name),
                "mode": mode,
                "internal": internal,
            })
        );
    } else {
        println!("{}", internal.as_str().green());
    }
    0
}

fn run_split(value: &str, separator: char, year: Option<i32>) -> i32 {
    let date = splitter::date_part(value, separator);
    let time = splitter::time_part(value, separator);
    let clock = make_clock(year);
    // join() collapses two empty parts to the empty string, never a bare "T"
    let joined = splitter::join(&parse_date(date, clock.current_year()), &parse_time(time));

    println!("date: {}", date.cyan());
    println!("time: {}", time.cyan());
    println!("joined: {}", joined.as_str().green());
    0
}

fn parse_mode(mode: &str) -> Option<OperatingMode> {
    match mode {
        "scripted" => Some(OperatingMode::Scripted),
        "noscript" => Some(OperatingMode::Noscript),
        _ => None,
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<InputFormatConfig, String> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            InputFormatConfig::from_json(&text).map_err(|e| e.to_string())
        }
        None => Ok(InputFormatConfig::default()),
    }
}

fn make_clock(year: Option<i32>) -> Box<dyn Clock> {
    match year {
        Some(year) => Box::new(FixedClock(year)),
        None => Box::new(SystemClock),
    }
}
