//! `jsonc` CLI: format, minify, validate, and summarize JSON documents.
//!
//! ## Usage
//!
//! ```sh
//! # Pretty-print with two spaces (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | jsonc format
//!
//! # Tab indentation, file to file
//! jsonc format --indent tab -i data.json -o pretty.json
//!
//! # Drop fields before printing
//! jsonc format --omit etag,kind -i event.json
//!
//! # Keep only some object keys
//! jsonc minify --only id,summary -i event.json
//!
//! # Validate; prints `ok` or `line:col: message`
//! jsonc check -i data.json
//!
//! # Node counts and sizes
//! jsonc stats -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use jsonc_core::{replacer, Indent, ParseOptions, StringifyOptions, Value, DEFAULT_MAX_DEPTH};
use std::io::{self, Read};
use std::process;

#[derive(Parser)]
#[command(name = "jsonc", version, about = "Format, minify, and check JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum container nesting accepted when parsing and printing
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pretty-print JSON
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Number of spaces, `tab`, or a literal indent string
        #[arg(long, default_value = "2")]
        indent: String,
        /// Comma-separated keys to drop at any depth
        #[arg(long)]
        omit: Option<String>,
        /// Comma-separated object keys to keep, in output order
        #[arg(long)]
        only: Option<String>,
    },
    /// Print JSON on a single line with no whitespace
    Minify {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Comma-separated keys to drop at any depth
        #[arg(long)]
        omit: Option<String>,
        /// Comma-separated object keys to keep, in output order
        #[arg(long)]
        only: Option<String>,
    },
    /// Validate JSON and report the first syntax error with its location
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show node counts, nesting depth, and compact/pretty sizes
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    let parse_opts = ParseOptions::default().with_max_depth(cli.max_depth);

    match cli.command {
        Commands::Format {
            input,
            output,
            indent,
            omit,
            only,
        } => {
            let text = read_input(input.as_deref())?;
            let opts = StringifyOptions::pretty(Indent::from_arg(&indent));
            let rendered = render(&text, &parse_opts, opts, omit.as_deref(), only.as_deref())?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Minify {
            input,
            output,
            omit,
            only,
        } => {
            let text = read_input(input.as_deref())?;
            let opts = StringifyOptions::compact();
            let rendered = render(&text, &parse_opts, opts, omit.as_deref(), only.as_deref())?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            match jsonc_core::parse_with(&text, None, &parse_opts) {
                Ok(_) => println!("ok"),
                Err(err) => {
                    match err.line_col(&text) {
                        Some((line, col)) => eprintln!("{line}:{col}: {err}"),
                        None => eprintln!("{err}"),
                    }
                    process::exit(1);
                }
            }
        }
        Commands::Stats { input } => {
            let text = read_input(input.as_deref())?;
            let value = jsonc_core::parse_with(&text, None, &parse_opts)
                .context("Failed to parse JSON")?;
            let compact = jsonc_core::stringify(&value)?.unwrap_or_default();
            let pretty =
                jsonc_core::stringify_with(&value, None, &StringifyOptions::pretty(Indent::Spaces(2)))?
                    .unwrap_or_default();

            let mut counts = NodeCounts::default();
            counts.visit(&value, 0);

            println!("Objects:    {}", counts.objects);
            println!("Arrays:     {}", counts.arrays);
            println!("Strings:    {}", counts.strings);
            println!("Numbers:    {}", counts.numbers);
            println!("Booleans:   {}", counts.bools);
            println!("Nulls:      {}", counts.nulls);
            println!("Max depth:  {}", counts.max_depth);
            println!("Input size:   {} bytes", text.len());
            println!("Compact size: {} bytes", compact.len());
            println!("Pretty size:  {} bytes", pretty.len());
        }
    }

    Ok(())
}

/// Parse `text` and print it back with `opts`, applying `--omit` and `--only`.
fn render(
    text: &str,
    parse_opts: &ParseOptions,
    opts: StringifyOptions,
    omit: Option<&str>,
    only: Option<&str>,
) -> Result<String> {
    let value = jsonc_core::parse_with(text, None, parse_opts).context("Failed to parse JSON")?;

    let opts = opts.with_max_depth(parse_opts.max_depth);
    let opts = match only {
        Some(raw) => opts.with_property_list(split_list(raw)),
        None => opts,
    };

    let omitted = omit.map(split_list).unwrap_or_default();
    log::debug!("omitting {} key(s)", omitted.len());

    let result = if omitted.is_empty() {
        jsonc_core::stringify_with(&value, None, &opts)
    } else {
        let refs: Vec<&str> = omitted.iter().map(String::as_str).collect();
        let mut omit_fn = replacer::omit_keys(&refs);
        jsonc_core::stringify_with(&value, Some(&mut omit_fn), &opts)
    };
    let rendered = result.context("Failed to serialize JSON")?;

    // A document always has a representation unless its root was dropped.
    Ok(rendered.unwrap_or_default() + "\n")
}

/// Split a comma-separated argument, trimming entries and skipping empty ones.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Default)]
struct NodeCounts {
    objects: usize,
    arrays: usize,
    strings: usize,
    numbers: usize,
    bools: usize,
    nulls: usize,
    max_depth: usize,
}

impl NodeCounts {
    // Parsed documents are trees, so plain recursion terminates.
    fn visit(&mut self, value: &Value, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        match value {
            Value::Object(obj) => {
                self.objects += 1;
                for (_, child) in obj.entries() {
                    self.visit(&child, depth + 1);
                }
            }
            Value::Array(arr) => {
                self.arrays += 1;
                for child in arr.to_vec() {
                    self.visit(&child, depth + 1);
                }
            }
            Value::String(_) => self.strings += 1,
            Value::Number(_) => self.numbers += 1,
            Value::Bool(_) => self.bools += 1,
            Value::Null => self.nulls += 1,
            Value::Undefined | Value::Function(_) => {}
        }
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
