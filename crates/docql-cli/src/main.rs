//! `docql` CLI — parse document files and run queries from the command line.
//!
//! Input is a JSON-like file (or stdin) holding either an array of objects or
//! an object whose `--root` member (default `businesses`) is that array.
//! Results are written to stdout or `-o` in the same text format, so the
//! output of one command can be piped into another.
//!
//! ## Usage
//!
//! ```sh
//! # Check that a file parses, pretty-print it
//! docql parse -i data/red_sox_restaurants.json
//!
//! # Filter, optionally projecting the survivors
//! docql filter -i data.json --field rating --op '>=' --value 4.0 --select name,rating
//!
//! # Projection
//! docql project -i data.json --fields name,price
//!
//! # Group, optionally aggregating each group
//! docql group -i data.json --by price
//! docql group -i data.json --by price --agg avg --field rating
//!
//! # Filter first, then several aggregates per group, then keep some columns
//! docql group -i data.json --where rating '>=' 3.5 --by price \
//!     --agg count,max,avg --field rating --select price,avg_rating
//!
//! # Equi-join two files
//! docql join --left a.json --left-key name --right b.json --right-key name
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` or `-v`/`-vv`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docql_core::parser::DEFAULT_MAX_DEPTH;
use docql_core::{encoder, Aggregate, Collection, CompareOp, Map, ParseOptions, Value};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docql",
    version,
    about = "Filter, project, group, aggregate and join JSON document collections"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Reject input that continues after the top-level value
    #[arg(long, global = true)]
    strict: bool,

    /// Maximum object/array nesting depth accepted by the parser
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Member of a top-level object that holds the documents
    #[arg(long, global = true, default_value = "businesses")]
    root: String,

    /// Write single-line output instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and print it back in canonical form
    Parse {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Keep documents whose field satisfies a comparison
    Filter {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
        /// Field to compare
        #[arg(long)]
        field: String,
        /// One of ==, !=, <, <=, >, >=
        #[arg(long)]
        op: CompareOp,
        /// Value to compare against; parsed as a literal when possible
        /// (4.0, true, "text"), otherwise taken as a string
        #[arg(long, allow_hyphen_values = true)]
        value: String,
        /// Comma-separated fields to keep in the output
        #[arg(long)]
        select: Option<String>,
    },
    /// Keep only the listed fields of each document
    Project {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
        /// Comma-separated field names, in output order
        #[arg(long)]
        fields: String,
    },
    /// Partition documents by a field, optionally aggregating each group
    Group {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
        /// Keep only documents matching FIELD OP VALUE before grouping
        #[arg(
            long = "where",
            num_args = 3,
            value_names = ["FIELD", "OP", "VALUE"],
            allow_hyphen_values = true
        )]
        condition: Option<Vec<String>>,
        /// Field to group by
        #[arg(long)]
        by: String,
        /// Comma-separated aggregates per group: sum, avg, count, min, max
        #[arg(long, value_delimiter = ',', requires = "field")]
        agg: Vec<Aggregate>,
        /// Field the aggregates read
        #[arg(long, requires = "agg")]
        field: Option<String>,
        /// Comma-separated columns to keep in the output rows
        #[arg(long)]
        select: Option<String>,
    },
    /// Equi-join two collections
    Join {
        /// Left input file
        #[arg(long)]
        left: String,
        /// Join key in the left collection
        #[arg(long)]
        left_key: String,
        /// Right input file
        #[arg(long)]
        right: String,
        /// Join key in the right collection
        #[arg(long)]
        right_key: String,
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ParseOptions {
        max_depth: cli.max_depth,
        require_full_input: cli.strict,
    };
    let loader = Loader {
        options,
        root: cli.root,
    };

    let (result, output) = match cli.command {
        Commands::Parse { input, output } => {
            let text = read_input(input.as_deref())?;
            let value = docql_core::parse_with(&text, &loader.options)
                .with_context(|| format!("Failed to parse {}", source_name(input.as_deref())))?;
            (value, output)
        }
        Commands::Filter {
            input,
            output,
            field,
            op,
            value,
            select,
        } => {
            let data = loader.load(input.as_deref())?;
            let mut results = run_filter(&data, &field, op, &value)?;
            if let Some(select) = select {
                results = docql_core::project(&results, &split_fields(&select));
            }
            (collection_value(results), output)
        }
        Commands::Project {
            input,
            output,
            fields,
        } => {
            let data = loader.load(input.as_deref())?;
            let fields = split_fields(&fields);
            if fields.is_empty() {
                anyhow::bail!("--fields must name at least one field");
            }
            (collection_value(docql_core::project(&data, &fields)), output)
        }
        Commands::Group {
            input,
            output,
            condition,
            by,
            agg,
            field,
            select,
        } => {
            let mut data = loader.load(input.as_deref())?;
            if let Some(condition) = condition {
                data = apply_condition(&data, &condition)?;
            }
            let mut rows = match field {
                Some(field) if !agg.is_empty() => {
                    docql_core::group_summary(&data, &by, &agg, &field)
                }
                _ => group_listing(&data, &by),
            };
            if let Some(select) = select {
                rows = docql_core::project(&rows, &split_fields(&select));
            }
            (collection_value(rows), output)
        }
        Commands::Join {
            left,
            left_key,
            right,
            right_key,
            output,
        } => {
            let left_docs = loader.load(Some(left.as_str()))?;
            let right_docs = loader.load(Some(right.as_str()))?;
            let joined = docql_core::join(&left_docs, &left_key, &right_docs, &right_key);
            (collection_value(joined), output)
        }
    };

    let rendered = if cli.compact {
        encoder::to_string(&result)
    } else {
        encoder::to_string_pretty(&result)
    };
    write_output(output.as_deref(), &rendered)?;

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("docql={level},docql_core={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parser settings plus the root member to unwrap.
struct Loader {
    options: ParseOptions,
    root: String,
}

impl Loader {
    fn load(&self, path: Option<&str>) -> Result<Collection> {
        let name = source_name(path);
        let text = read_input(path)?;
        let value = docql_core::parse_with(&text, &self.options)
            .with_context(|| format!("Failed to parse {}", name))?;
        let data = value
            .into_collection(Some(&self.root))
            .with_context(|| format!("{} does not hold a document collection", name))?;
        tracing::debug!(source = %name, documents = data.len(), "loaded collection");
        Ok(data)
    }
}

fn run_filter(data: &[Map], field: &str, op: CompareOp, raw_value: &str) -> Result<Collection> {
    let bound = parse_literal(raw_value);
    tracing::debug!(%field, %op, bound = %bound, "running filter");
    docql_core::filter(data, field, op, &bound)
        .with_context(|| format!("Filter on '{}' failed", field))
}

/// Apply a `--where FIELD OP VALUE` clause.
fn apply_condition(data: &[Map], condition: &[String]) -> Result<Collection> {
    let [field, op, value] = condition else {
        anyhow::bail!("--where takes exactly FIELD OP VALUE");
    };
    let op: CompareOp = op.parse()?;
    run_filter(data, field, op, value)
}

/// Interpret a command-line comparison value. Anything that is a complete
/// literal in the document format keeps its type; everything else is a
/// plain string, so `--value '$$'` and `--value Boston` need no quoting.
fn parse_literal(raw: &str) -> Value {
    docql_core::parse_with(raw, &ParseOptions::strict()).unwrap_or_else(|_| Value::from(raw))
}

/// Split a comma-separated field list, dropping empty entries.
fn split_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// One row per group: `{"key": ..., "count": n, "documents": [...]}`.
fn group_listing(data: &[Map], field: &str) -> Collection {
    docql_core::group_by(data, field)
        .into_iter()
        .map(|group| {
            let mut row = Map::with_capacity(3);
            row.insert("key", group.key.into_value());
            row.insert("count", Value::from(group.documents.len()));
            row.insert("documents", collection_value(group.documents));
            row
        })
        .collect()
}

fn collection_value(collection: Collection) -> Value {
    Value::Array(collection.into_iter().map(Value::Object).collect())
}

fn source_name(path: Option<&str>) -> String {
    path.unwrap_or("<stdin>").to_string()
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
            println!("{}", content);
        }
    }
    Ok(())
}
