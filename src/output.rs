//! Emitting analysis results: the two single-row CSV result files, the
//! console summary, a JSON summary and the optional long-form dump.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::{
    io_utils,
    model::{ChangeResult, PeriodValue},
    pipeline::Analysis,
    select::Extremes,
    table::{self, Align},
};

pub const LARGEST_INCREASE_FILE: &str = "largest_increase.csv";
pub const SMALLEST_INCREASE_FILE: &str = "smallest_increase.csv";
pub const PERCENTAGE_CHANGE_HEADER: &str = "PercentageChange";

pub fn format_percentage(value: Decimal, scale: u32) -> String {
    let rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.prec$}", prec = scale as usize)
}

/// Writes `largest_increase.csv` and `smallest_increase.csv` into `dir`.
/// Without extremes both files hold only the header.
pub fn write_extremes(
    dir: &Path,
    name_column: &str,
    extremes: Option<&Extremes>,
    scale: u32,
) -> Result<[PathBuf; 2]> {
    std::fs::create_dir_all(dir).with_context(|| format!("Creating output directory {dir:?}"))?;
    let increase_path = dir.join(LARGEST_INCREASE_FILE);
    let decrease_path = dir.join(SMALLEST_INCREASE_FILE);
    write_result_file(
        &increase_path,
        name_column,
        extremes.map(|e| &e.largest_increase),
        scale,
    )?;
    write_result_file(
        &decrease_path,
        name_column,
        extremes.map(|e| &e.largest_decrease),
        scale,
    )?;
    info!(
        "Wrote results to {:?} and {:?}",
        increase_path, decrease_path
    );
    Ok([increase_path, decrease_path])
}

fn write_result_file(
    path: &Path,
    name_column: &str,
    result: Option<&ChangeResult>,
    scale: u32,
) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path, b',')?;
    writer
        .write_record([name_column, PERCENTAGE_CHANGE_HEADER])
        .with_context(|| format!("Writing header to {path:?}"))?;
    if let Some(result) = result {
        writer
            .write_record([
                result.display_name.as_str(),
                format_percentage(result.percentage_change, scale).as_str(),
            ])
            .with_context(|| format!("Writing result to {path:?}"))?;
    }
    writer
        .flush()
        .with_context(|| format!("Flushing {path:?}"))?;
    Ok(())
}

pub fn write_long(path: &Path, rows: &[PeriodValue], delimiter: u8) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path, delimiter)?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Writing long-form row to {path:?}"))?;
    }
    if rows.is_empty() {
        writer.write_record(["entity_id", "period", "value"])?;
    }
    writer
        .flush()
        .with_context(|| format!("Flushing {path:?}"))?;
    info!("Wrote {} long-form row(s) to {:?}", rows.len(), path);
    Ok(())
}

pub fn render_summary(extremes: Option<&Extremes>, name_column: &str, scale: u32) -> String {
    let Some(extremes) = extremes else {
        return "No entity has a complete series; nothing to compare.\n".to_string();
    };
    let headers = vec![
        "extreme".to_string(),
        name_column.to_string(),
        "entity_id".to_string(),
        "percentage_change".to_string(),
    ];
    let row = |label: &str, result: &ChangeResult| {
        vec![
            label.to_string(),
            result.display_name.clone(),
            result.entity_id.to_string(),
            format_percentage(result.percentage_change, scale),
        ]
    };
    let rows = vec![
        row("largest increase", &extremes.largest_increase),
        row("largest decrease", &extremes.largest_decrease),
    ];
    table::render_table(
        &headers,
        &[Align::Left, Align::Left, Align::Right, Align::Right],
        &rows,
    )
}

#[derive(Debug, Serialize)]
struct JsonResult<'a> {
    entity_id: i64,
    display_name: &'a str,
    percentage_change: String,
}

#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    period_columns: usize,
    rows_scanned: usize,
    rows_excluded: usize,
    entities_compared: usize,
    largest_increase: Option<JsonResult<'a>>,
    largest_decrease: Option<JsonResult<'a>>,
}

impl<'a> JsonResult<'a> {
    fn new(result: &'a ChangeResult, scale: u32) -> Self {
        Self {
            entity_id: result.entity_id,
            display_name: result.display_name.as_str(),
            percentage_change: format_percentage(result.percentage_change, scale),
        }
    }
}

pub fn json_summary(analysis: &Analysis, scale: u32) -> Result<String> {
    let extremes = analysis.extremes.as_ref();
    let summary = JsonSummary {
        period_columns: analysis.layout.periods.len(),
        rows_scanned: analysis.filter.scanned,
        rows_excluded: analysis.filter.rejected(),
        entities_compared: analysis.results.len(),
        largest_increase: extremes.map(|e| JsonResult::new(&e.largest_increase, scale)),
        largest_decrease: extremes.map(|e| JsonResult::new(&e.largest_decrease, scale)),
    };
    serde_json::to_string_pretty(&summary).context("Serializing JSON summary")
}
