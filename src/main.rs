mod converters;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sheet_records::{SheetError, SheetSelector};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Read and write spreadsheet rows as header-keyed records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a sheet and dump its records to CSV
    Read {
        /// Path to input XLSX or XLS file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        sheet: SheetArgs,

        /// Path to output CSV file (defaults to input file with .csv extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the rows of a CSV file to a new XLSX workbook
    Write {
        /// Path to input CSV file; its first row names the record keys
        #[arg(short, long)]
        input: PathBuf,

        /// Path to output XLSX file
        #[arg(short, long)]
        output: PathBuf,

        /// Sheet name (defaults to Sheet1)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Output column as key=label, repeatable; defaults to every CSV column
        #[arg(short, long = "column", value_parser = converters::records::parse_column)]
        columns: Vec<(String, String)>,
    },
}

#[derive(Args)]
#[group(multiple = false)]
struct SheetArgs {
    /// Zero-based sheet index
    #[arg(long)]
    sheet_index: Option<usize>,

    /// Sheet name
    #[arg(long)]
    sheet_name: Option<String>,
}

impl SheetArgs {
    fn selector(self) -> SheetSelector {
        match (self.sheet_index, self.sheet_name) {
            (Some(index), _) => SheetSelector::Index(index),
            (None, Some(name)) => SheetSelector::Name(name),
            (None, None) => SheetSelector::First,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Read { input, sheet, output } => handle_read(input, sheet.selector(), output),
        Commands::Write {
            input,
            output,
            sheet,
            columns,
        } => handle_write(input, output, sheet, columns),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Filter from `RUST_LOG`, falling back to `info` when unset or unparseable
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn handle_read(
    input: PathBuf,
    selector: SheetSelector,
    output: Option<PathBuf>,
) -> Result<(), SheetError> {
    let output = output.unwrap_or_else(|| input.with_extension("csv"));

    let records = sheet_records::read_sheet(&input, &selector)?;
    converters::write_csv(&output, converters::records::to_rows(&records))?;

    info!(
        records = records.len(),
        "converted {} to {}",
        input.display(),
        output.display()
    );
    Ok(())
}

fn handle_write(
    input: PathBuf,
    output: PathBuf,
    sheet: Option<String>,
    columns: Vec<(String, String)>,
) -> Result<(), SheetError> {
    let rows = converters::read_csv(&input)?;
    let (headers, records) = converters::records::from_rows(rows, &columns)?;

    sheet_records::write_excel_to_sheet(&output, sheet.as_deref(), &headers, &records)?;

    info!(
        records = records.len(),
        "converted {} to {}",
        input.display(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honors_debug() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("sheet_records=debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
