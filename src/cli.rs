use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_INPUT: &str = "employee_salary_dataset.csv";
pub const DEFAULT_TARGET: &str = "Monthly_Salary";
pub const DEFAULT_OUTPUT_DIR: &str = "Graph";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Summarize and chart employee salary datasets",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print overall and per-category statistics of the salary column
    Summary(SummaryArgs),
    /// Render the fixed set of descriptive charts as PNG files
    Charts(ChartsArgs),
}

/// Where the dataset comes from and how to decode it.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Salary CSV file (resolved against the working directory)
    #[arg(short = 'i', long = "input", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,
    /// Field separator: a single ASCII character or one of comma, tab, semicolon, pipe
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Encoding label of the input bytes, utf-8 when omitted
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Numeric column to summarize
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub target: String,
    /// Column to group by (defaults to Category, then Department, then the first text column)
    #[arg(long)]
    pub category: Option<String>,
    /// Emit the report as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ChartsArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Directory receiving the PNG files (created if missing)
    #[arg(short = 'o', long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    let named = match value.to_ascii_lowercase().as_str() {
        "comma" => Some(b','),
        "tab" | "\\t" => Some(b'\t'),
        "semicolon" => Some(b';'),
        "pipe" => Some(b'|'),
        _ => None,
    };
    if let Some(byte) = named {
        return Ok(byte);
    }
    match value.as_bytes() {
        [] => Err("Delimiter cannot be empty".to_string()),
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "Delimiter '{value}' must be one ASCII character or a known name"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_names_and_single_characters() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("Semicolon"), Ok(b';'));
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(":"), Ok(b':'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn defaults_match_the_fixed_file_layout() {
        let cli = Cli::try_parse_from(["salary-insights", "charts"]).unwrap();
        match cli.command {
            Commands::Charts(args) => {
                assert_eq!(args.source.input, PathBuf::from(DEFAULT_INPUT));
                assert_eq!(args.source.delimiter, None);
                assert_eq!(args.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
            }
            other => panic!("expected charts command, got {other:?}"),
        }
    }
}
