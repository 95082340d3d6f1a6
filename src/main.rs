use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use inidoc::{Document, ValueKind};
use tracing_subscriber::EnvFilter;

/// Reads an INI file and prints the values stored in it.
///
/// Without any PATH, every section and field is printed.
#[derive(Parser, Debug)]
#[command(name = "inidoc", version)]
struct Cli {
    /// INI file to read
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Values to print, written as `section.field`
    #[arg(value_name = "PATH")]
    paths: Vec<String>,

    /// Type to read each value as
    #[arg(short = 't', long = "type", value_enum, default_value_t = Kind::Text)]
    kind: Kind,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress warnings about skipped lines
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    #[value(name = "string")]
    Text,
    Integer,
    Float,
}

impl From<Kind> for ValueKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Text => ValueKind::String,
            Kind::Integer => ValueKind::Integer,
            Kind::Float => ValueKind::Float,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let doc = Document::load(&cli.file)?;

    if cli.paths.is_empty() {
        print_document(&doc);
        return Ok(());
    }

    for path in &cli.paths {
        let value = doc.get(path, cli.kind.into()).inspect_err(|e| {
            tracing::error!("{path}: {e}");
        })?;
        println!("{value}");
    }

    Ok(())
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("inidoc=debug,warn"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_document(doc: &Document) {
    for section in doc.sections() {
        println!("[{}]", section.name());

        for (key, value) in section.fields() {
            println!("{key} = \"{value}\"");
        }

        println!();
    }
}
