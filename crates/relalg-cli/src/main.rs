//! relalg CLI: relational algebra over CSV files.
//!
//! Every command reads a relation from standard input (or `--in FILE`),
//! applies one operator and writes the result to standard output, so commands
//! compose with pipes:
//!
//! ```text
//! relalg --in people.csv join orders.csv | relalg orderby name | relalg pretty
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use relalg_core::config::{parse_delimiter, RelConfig};
use relalg_core::prelude::*;
use relalg_io::{CsvReader, CsvWriter, JsonWriter, PrettyWriter, XmlWriter};
use relalg_operators as ops;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

type CliResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "relalg")]
#[command(about = "Relational algebra over CSV: reads stdin (or --in) and writes CSV", long_about = None)]
struct Cli {
    /// Read the input relation from a file rather than standard input
    #[arg(long = "in", value_name = "FILE", global = true)]
    input: Option<PathBuf>,

    /// Do NOT remove duplicates from the result
    #[arg(long, global = true)]
    all: bool,

    /// CSV field delimiter (one ASCII character, or `\t`)
    #[arg(long, global = true)]
    delimiter: Option<String>,

    /// Log join columns and build-side sizes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Keep (or with --away, remove) the named columns
    #[command(visible_alias = "select")]
    Project {
        /// Remove the named columns instead of keeping them
        #[arg(long)]
        away: bool,
        #[arg(required = true, value_name = "COLUMN")]
        columns: Vec<String>,
    },

    /// Keep rows where any COLUMN equals VALUE (case-insensitive)
    #[command(visible_alias = "where")]
    Restrict {
        /// Remove matching rows instead of keeping them
        #[arg(long)]
        away: bool,
        /// Test that COLUMN contains VALUE rather than equals it
        #[arg(long)]
        contains: bool,
        #[arg(required = true, value_name = "COLUMN VALUE")]
        pairs: Vec<String>,
    },

    /// Rename columns: OLD NEW [OLD NEW ...]
    Rename {
        #[arg(required = true, value_name = "OLD NEW")]
        pairs: Vec<String>,
    },

    /// Set union of the input and other files
    Union { files: Vec<PathBuf> },

    /// Set intersection of the input and other files
    Intersect { files: Vec<PathBuf> },

    /// Set difference between the input and other files
    #[command(visible_alias = "diff")]
    Difference { files: Vec<PathBuf> },

    /// Natural join of the input and other files on their common columns
    Join { files: Vec<PathBuf> },

    /// Input rows with a matching row in every other file
    #[command(visible_alias = "semijoin")]
    Exists { files: Vec<PathBuf> },

    /// Input rows with no matching row in the other files
    #[command(visible_alias = "anti")]
    Notmatching { files: Vec<PathBuf> },

    /// Sort the input by one or more columns
    Orderby {
        #[arg(required = true, value_name = "COLUMN")]
        columns: Vec<String>,
    },

    /// Output one page of rows
    Page {
        /// Number of rows per page
        #[arg(long = "page-size", visible_alias = "top")]
        page_size: usize,
        /// Which page to return, starting with page 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Print the input as aligned, pipe-separated columns
    Pretty,

    /// Print the input as a JSON array of objects
    Tojson,

    /// Print the input as XML
    Toxml,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => fail(&e),
    };

    let mut config = RelConfig::from_env();
    if let Err(e) = apply_overrides(&mut config, &cli) {
        fail(&e);
    }
    init_tracing(&config);

    if let Err(e) = run(&cli, &config) {
        fail(&e);
    }
}

fn fail(e: &dyn std::fmt::Display) -> ! {
    eprintln!("relalg: {}", e.to_string().trim_end());
    eprintln!("{}", Cli::command().render_usage());
    std::process::exit(1);
}

/// Command-line flags take precedence over `RELALG_*` environment values.
fn apply_overrides(config: &mut RelConfig, cli: &Cli) -> relalg_core::Result<()> {
    if let Some(d) = &cli.delimiter {
        config.delimiter = parse_delimiter(d).ok_or_else(|| {
            Error::InvalidArgument(format!("delimiter must be a single ASCII character, got '{}'", d))
        })?;
    }
    if cli.all {
        config.bag_mode = true;
    }
    if cli.verbose {
        config.log_filter = "debug".into();
    }
    if let Some(path) = &cli.input {
        config.relation_name = path.display().to_string();
    }
    Ok(())
}

fn init_tracing(config: &RelConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(cli: &Cli, config: &RelConfig) -> CliResult<()> {
    let input = read_input(cli, config)?;
    let bag = config.bag_mode;
    tracing::debug!(command = ?cli.command, bag, "running");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match &cli.command {
        Commands::Project { away, columns } => {
            let names: Vec<&str> = columns.iter().map(String::as_str).collect();
            match (*away, bag) {
                (false, false) => ops::project(&input, &names)?,
                (false, true) => ops::project_all(&input, &names)?,
                (true, false) => ops::project_away(&input, &names)?,
                (true, true) => ops::project_away_all(&input, &names)?,
            }
        }
        Commands::Restrict {
            away,
            contains,
            pairs,
        } => restrict(&input, pairs, *away, *contains, bag)?,
        Commands::Rename { pairs } => {
            let changes = pairs_of(pairs, "rename takes OLD NEW pairs")?;
            if bag {
                ops::rename_all(&input, &changes)?
            } else {
                ops::rename(&input, &changes)?
            }
        }
        Commands::Union { files } => fold(input, files, config, |a, b| {
            if bag {
                ops::union_all(a, b)
            } else {
                ops::union(a, b)
            }
        })?,
        Commands::Intersect { files } => fold(input, files, config, |a, b| {
            if bag {
                ops::intersect_all(a, b)
            } else {
                ops::intersect(a, b)
            }
        })?,
        Commands::Difference { files } => fold(input, files, config, |a, b| {
            if bag {
                ops::difference_all(a, b)
            } else {
                ops::difference(a, b)
            }
        })?,
        Commands::Join { files } => fold(input, files, config, ops::natural_join)?,
        Commands::Exists { files } => fold(input, files, config, ops::semi_join)?,
        Commands::Notmatching { files } => fold(input, files, config, ops::not_matching)?,
        Commands::Orderby { columns } => {
            let names: Vec<&str> = columns.iter().map(String::as_str).collect();
            ops::order_by(&with_mode(input, bag), &names)?
        }
        Commands::Page { page_size, page } => {
            let page = page
                .checked_sub(1)
                .ok_or_else(|| Error::InvalidArgument("pages are numbered from 1".into()))?;
            ops::page(&with_mode(input, bag), *page_size, page)?
        }
        Commands::Pretty => {
            PrettyWriter::to_writer(&mut out).write_relation(&*with_mode(input, bag))?;
            return Ok(());
        }
        Commands::Tojson => {
            JsonWriter::to_writer(&mut out).write_relation(&*with_mode(input, bag))?;
            return Ok(());
        }
        Commands::Toxml => {
            XmlWriter::to_writer(&mut out).write_relation(&*with_mode(input, bag))?;
            return Ok(());
        }
    };

    let rows = CsvWriter::to_writer(&mut out, config.delimiter).write_relation(&*result)?;
    tracing::debug!(rows, "done");
    out.flush()?;
    Ok(())
}

fn read_input(cli: &Cli, config: &RelConfig) -> CliResult<RelationRef> {
    let reader = CsvReader::new(config.relation_name.as_str()).delimiter(config.delimiter);
    let rel = match &cli.input {
        Some(path) => reader.from_path(path)?,
        None => reader.from_reader(io::stdin())?,
    };
    Ok(rel)
}

fn read_file(path: &Path, config: &RelConfig) -> CliResult<RelationRef> {
    let reader = CsvReader::new(path.display().to_string()).delimiter(config.delimiter);
    Ok(reader.from_path(path)?)
}

/// Combine the input with each file in turn: `op(op(input, f1), f2)...`.
fn fold<F>(input: RelationRef, files: &[PathBuf], config: &RelConfig, op: F) -> CliResult<RelationRef>
where
    F: Fn(&RelationRef, &RelationRef) -> relalg_core::Result<RelationRef>,
{
    if files.is_empty() {
        return Err(Error::InvalidArgument("at least one other file is required".into()).into());
    }
    files.iter().try_fold(input, |acc, file| -> CliResult<RelationRef> {
        let other = read_file(file, config)?;
        Ok(op(&acc, &other)?)
    })
}

fn with_mode(rel: RelationRef, bag: bool) -> RelationRef {
    if bag {
        ops::bag(&rel)
    } else {
        rel
    }
}

fn pairs_of<'a>(args: &'a [String], usage: &str) -> relalg_core::Result<Vec<(&'a str, &'a str)>> {
    if args.len() % 2 != 0 {
        return Err(Error::InvalidArgument(usage.to_string()));
    }
    Ok(args
        .chunks(2)
        .map(|p| (p[0].as_str(), p[1].as_str()))
        .collect())
}

fn restrict(
    input: &RelationRef,
    pairs: &[String],
    away: bool,
    contains: bool,
    bag: bool,
) -> CliResult<RelationRef> {
    let tests: Vec<(String, String)> = pairs_of(pairs, "restrict takes COLUMN VALUE pairs")?
        .into_iter()
        .map(|(c, v)| (c.to_string(), v.to_lowercase()))
        .collect();
    for (column, _) in &tests {
        input.schema().lookup(column)?;
    }

    // A row matches when any of the tests passes.
    let predicate = move |row: &Row| -> relalg_core::Result<bool> {
        for (column, value) in &tests {
            let cell = row.get(column)?.to_string().to_lowercase();
            let hit = if contains {
                cell.contains(value.as_str())
            } else {
                cell == *value
            };
            if hit {
                return Ok(true);
            }
        }
        Ok(false)
    };

    Ok(match (away, bag) {
        (false, false) => ops::restrict(input, predicate),
        (false, true) => ops::restrict_all(input, predicate),
        (true, false) => ops::restrict_away(input, predicate),
        (true, true) => ops::restrict_away_all(input, predicate),
    })
}
