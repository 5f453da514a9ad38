use std::path::PathBuf;

use clap::Parser;

use crate::{
    columns::DEFAULT_PERIOD_PATTERN,
    ordering::PeriodOrder,
    pipeline::{DEFAULT_ID_COLUMN, DEFAULT_NAME_COLUMN},
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Find the entities with the largest percentage increase and decrease in a wide time-series CSV",
    long_about = None
)]
pub struct Cli {
    /// Input CSV file with one row per entity and one column per period (`-` for stdin)
    pub input: PathBuf,
    /// Integer column identifying each entity
    #[arg(long = "id-column", default_value = DEFAULT_ID_COLUMN)]
    pub id_column: String,
    /// Column used as the display label of each entity
    #[arg(long = "name-column", default_value = DEFAULT_NAME_COLUMN)]
    pub name_column: String,
    /// Regular expression selecting period columns by name
    #[arg(long = "period-pattern", default_value = DEFAULT_PERIOD_PATTERN)]
    pub period_pattern: String,
    /// How period labels are ordered when finding the oldest and newest value
    #[arg(long = "period-order", value_enum, default_value_t = PeriodOrder::Chronological)]
    pub period_order: PeriodOrder,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Directory receiving largest_increase.csv and smallest_increase.csv
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,
    /// Skip writing the result files
    #[arg(long = "no-write")]
    pub no_write: bool,
    /// Decimal places shown for percentage changes
    #[arg(long, default_value_t = 2)]
    pub scale: u32,
    /// Also write the long-form (entity_id, period, value) relation to this file
    #[arg(long = "long-output")]
    pub long_output: Option<PathBuf>,
    /// Print the summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
