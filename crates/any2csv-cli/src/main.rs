//! any2csv - Convert an Anytype export archive to a CSV table
//!
//! Usage:
//!   any2csv <export.zip>                   - Convert every object
//!   any2csv <export.zip> -t Task,Note      - Only objects of these types
//!   any2csv <export.zip> -f name,Cost      - Only these columns
//!   any2csv <export.zip> -d                - Also dump raw records and report unresolved values

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use any2csv::{convert_archive, parse_list, ConvertOptions, DateZone, Error};

#[derive(Parser)]
#[command(name = "any2csv")]
#[command(version = "0.1.0")]
#[command(about = "Prototype Any Protobuf to CSV", long_about = None)]
struct Cli {
    /// Path of export file to be converted to CSV
    filepath: PathBuf,

    /// Turn debug on
    #[arg(short, long)]
    debug: bool,

    /// Dump specific types to CSV (comma-separated)
    #[arg(short, long)]
    types: Option<String>,

    /// Dump specific fields to CSV (comma-separated)
    #[arg(short, long)]
    fields: Option<String>,

    /// Convert dates in UTC instead of the local time zone
    #[arg(long)]
    utc: bool,

    /// Work directory (default: archive name without extension, next to the archive)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let options = ConvertOptions {
        types: cli.types.as_deref().map(parse_list),
        fields: cli.fields.as_deref().map(parse_list),
        debug: cli.debug,
        zone: if cli.utc { DateZone::Utc } else { DateZone::Local },
        output_dir: cli.output,
    };

    match convert_archive(&cli.filepath, &options) {
        Ok(_) => Ok(()),
        Err(err) => match err.downcast_ref::<Error>() {
            Some(Error::NotAnArchive(_)) => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
            _ => Err(err),
        },
    }
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
