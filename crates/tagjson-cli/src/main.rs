//! `tagjson` CLI — re-encode JSON with sorted keys and sentinel tags.
//!
//! ## Usage
//!
//! ```sh
//! # Canonical compact JSON (stdin → stdout)
//! echo '{"b":1,"a":2}' | tagjson encode
//!
//! # Pretty-printed, file to file, refusing trees nested deeper than 64
//! tagjson encode --pretty --max-depth 64 -i data.json -o data.sorted.json
//!
//! # Plain JSON numbers instead of i64 tags (lossy for readers using doubles)
//! tagjson encode --plain-numbers -i data.json
//!
//! # Load encoder settings from a JSON file; flags override it
//! tagjson encode --options tagjson.json -i data.json
//!
//! # Exit 1 if a file is not already in canonical form
//! tagjson check --pretty -i data.sorted.json
//!
//! # Show nesting depth, key count and output sizes
//! tagjson stats -i data.json
//! ```
//!
//! Log verbosity comes from the `TAGJSON_LOG` environment variable
//! (`warn` by default); logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::process;
use tagjson_core::{encode, EncodeOptions, Encoder, PlainNumbers, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tagjson",
    version,
    about = "Sorted-key JSON with lossless tags for i64, NaN and Infinity"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-encode JSON with sorted keys and sentinel tags
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent with two spaces, one element per line
        #[arg(long)]
        pretty: bool,
        /// Fail if containers nest deeper than this
        #[arg(long)]
        max_depth: Option<usize>,
        /// Write i64 values as plain numbers and NaN/Infinity as null
        #[arg(long)]
        plain_numbers: bool,
        /// JSON file with encoder settings (`pretty`, `max_depth`)
        #[arg(long)]
        options: Option<String>,
    },
    /// Check that the input is already in canonical form
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Compare against the pretty layout instead of compact
        #[arg(long)]
        pretty: bool,
    },
    /// Show nesting depth, key count and encoded sizes
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            pretty,
            max_depth,
            plain_numbers,
            options,
        } => {
            let json = read_input(input.as_deref())?;
            let options = load_options(options.as_deref(), pretty, max_depth)?;
            let value = Value::parse_json(&json).context("Failed to read input JSON")?;

            let encoder = Encoder::with_options(options);
            let encoded = if plain_numbers {
                encoder.tags(PlainNumbers).encode(&value)
            } else {
                encoder.encode(&value)
            }
            .context("Failed to encode value tree")?;

            write_output(output.as_deref(), &encoded)?;
        }
        Commands::Check { input, pretty } => {
            let json = read_input(input.as_deref())?;
            let value = Value::parse_json(&json).context("Failed to read input JSON")?;
            let canonical = encode(&value, pretty);
            let given = json.strip_suffix('\n').unwrap_or(&json);
            if given != canonical {
                tracing::info!(
                    given_bytes = given.len(),
                    canonical_bytes = canonical.len(),
                    "input differs from canonical encoding"
                );
                eprintln!(
                    "Input is not in canonical {} form. Run `tagjson encode{}` to fix it.",
                    if pretty { "pretty" } else { "compact" },
                    if pretty { " --pretty" } else { "" }
                );
                process::exit(1);
            }
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let value = Value::parse_json(&json).context("Failed to read input JSON")?;
            let compact = encode(&value, false);
            let pretty = encode(&value, true);
            println!("Depth:       {}", value.depth());
            println!("Object keys: {}", count_keys(&value));
            println!("Input size:  {} bytes", json.len());
            println!("Compact:     {} bytes", compact.len());
            println!("Pretty:      {} bytes", pretty.len());
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber filtered by `TAGJSON_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("TAGJSON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Start from the options file (if any), then apply command-line flags.
///
/// `--pretty` can only switch pretty output on; `--max-depth` replaces the
/// file's limit.
fn load_options(
    path: Option<&str>,
    pretty: bool,
    max_depth: Option<usize>,
) -> Result<EncodeOptions> {
    let mut options = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file: {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid options file: {}", path))?
        }
        None => EncodeOptions::default(),
    };
    if pretty {
        options.pretty = true;
    }
    if max_depth.is_some() {
        options.max_depth = max_depth;
    }
    tracing::debug!(?options, "resolved encoder options");
    Ok(options)
}

/// Total number of object entries anywhere in the tree.
fn count_keys(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.len() + map.values().map(count_keys).sum::<usize>(),
        Value::Array(items) => items.iter().map(count_keys).sum(),
        _ => 0,
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
