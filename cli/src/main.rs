//! layoutio CLI - layout file inspection tool

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use layoutio::{load_many, load_path, CsvOptions, Format, Layout, Loaded};

#[derive(Parser)]
#[command(name = "layoutio")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Inspect and validate layout JSON and CSV files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a summary of a layout file
    Info {
        /// Input JSON or CSV file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        csv: CsvArgs,
    },

    /// Check that layout files load, reporting each failure
    Check {
        /// Input JSON or CSV files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        csv: CsvArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct CsvArgs {
    /// Element type for every CSV row (e.g. "rectangle")
    #[arg(long, env = "LAYOUTIO_BLOCK_TYPE")]
    block_type: Option<String>,

    /// CSV field delimiter (defaults to ',' or tab for .tsv)
    #[arg(long, value_parser = parse_delimiter)]
    delimiter: Option<u8>,
}

impl From<CsvArgs> for CsvOptions {
    fn from(args: CsvArgs) -> Self {
        CsvOptions {
            block_type: args.block_type,
            delimiter: args.delimiter,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ if s == "\\t" => Ok(b'\t'),
        _ => Err(format!("delimiter must be a single ASCII character, got {:?}", s)),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { input, csv } => cmd_info(&input, &csv.into()),
        Commands::Check { inputs, csv } => cmd_check(&inputs, &csv.into()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_info(input: &Path, options: &CsvOptions) -> Result<(), Box<dyn std::error::Error>> {
    let format = Format::from_path(input)?;
    let loaded = load_path(input, options)?;

    println!("{}", "Layout Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    match &loaded {
        Loaded::Element(element) => {
            println!("{}: single element", "Content".bold());
            println!("{}: {}", "Block type".bold(), element.block_type());
            if let Some(text) = element.text() {
                println!("{}: {}", "Text".bold(), text);
            }
        }
        Loaded::Layout(layout) => print_layout_summary(layout),
    }

    Ok(())
}

fn print_layout_summary(layout: &Layout) {
    println!("{}: layout", "Content".bold());
    println!("{}: {}", "Elements".bold(), layout.len());

    if let Some(page_data) = layout.page_data() {
        let keys: Vec<&str> = page_data.keys().map(String::as_str).collect();
        println!("{}: {}", "Page data".bold(), keys.join(", "));
    }

    println!();
    println!("{}", "Element Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    for element in layout {
        *by_type.entry(element.block_type().to_string()).or_default() += 1;
    }
    for (block_type, count) in &by_type {
        println!("{}: {}", block_type.bold(), count);
    }

    let text_blocks = layout.iter().filter(|e| e.is_text_block()).count();
    let words: usize = layout
        .iter()
        .filter_map(|e| e.text())
        .map(|t| t.split_whitespace().count())
        .sum();
    println!("{}: {}", "Text blocks".bold(), text_blocks);
    println!("{}: {}", "Words".bold(), words);
}

fn cmd_check(inputs: &[PathBuf], options: &CsvOptions) -> Result<(), Box<dyn std::error::Error>> {
    let results = load_many(inputs, options);

    let mut failures = 0;
    for (path, result) in inputs.iter().zip(results) {
        match result {
            Ok(loaded) => {
                let summary = match loaded {
                    Loaded::Element(element) => format!("1 {} element", element.block_type()),
                    Loaded::Layout(layout) => format!("{} elements", layout.len()),
                };
                println!("{} {} ({})", "ok".green(), path.display(), summary);
            }
            Err(e) => {
                failures += 1;
                log::debug!("{} failed: {:?}", path.display(), e);
                println!("{} {}: {}", "FAIL".red().bold(), path.display(), e);
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} files failed to load", failures, inputs.len()).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("layoutio {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_csv_args_into_options() {
        let options: CsvOptions = CsvArgs {
            block_type: Some("interval".to_string()),
            delimiter: Some(b'|'),
        }
        .into();
        assert_eq!(options.block_type.as_deref(), Some("interval"));
        assert_eq!(options.delimiter, Some(b'|'));
    }

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from(["layoutio", "check", "a.json", "b.csv", "--block-type", "rectangle"])
            .unwrap();
        match cli.command {
            Commands::Check { inputs, csv } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(csv.block_type.as_deref(), Some("rectangle"));
            }
            _ => panic!("expected check command"),
        }
    }
}
