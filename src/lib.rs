pub mod change;
pub mod cli;
pub mod columns;
pub mod completeness;
pub mod error;
pub mod extremum;
pub mod io_utils;
pub mod model;
pub mod ordering;
pub mod output;
pub mod pipeline;
pub mod reshape;
pub mod select;
pub mod source;
pub mod table;
pub mod window;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::{Parser, error::ErrorKind};
use log::{LevelFilter, info};

use crate::{
    cli::Cli,
    columns::PeriodConvention,
    error::SwingError,
    pipeline::AnalysisOptions,
    source::WideTable,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("period_swing", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            err.exit()
        }
        Err(err) => {
            let rendered = err.render().to_string();
            let message = rendered.trim().trim_start_matches("error: ").to_string();
            return Err(SwingError::Usage(message).into());
        }
    };
    execute(&cli)
}

pub fn execute(cli: &Cli) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&cli.input, cli.delimiter);
    let encoding = io_utils::resolve_encoding(cli.input_encoding.as_deref())?;
    let convention = PeriodConvention::new(&cli.period_pattern)
        .map_err(|err| SwingError::Usage(format!("{err:#}")))?;
    let options = AnalysisOptions {
        convention,
        id_column: cli.id_column.clone(),
        name_column: cli.name_column.clone(),
        order: cli.period_order,
    };

    let table = WideTable::read(&cli.input, delimiter, encoding)?;
    let analysis = pipeline::analyze(&table, &options)?;

    if cli.json {
        println!("{}", output::json_summary(&analysis, cli.scale)?);
    } else {
        print!(
            "{}",
            output::render_summary(analysis.extremes.as_ref(), &cli.name_column, cli.scale)
        );
    }

    if !cli.no_write {
        output::write_extremes(
            &cli.output_dir,
            &cli.name_column,
            analysis.extremes.as_ref(),
            cli.scale,
        )
        .with_context(|| format!("Writing results to {:?}", cli.output_dir))?;
    }
    if let Some(path) = &cli.long_output {
        output::write_long(path, &analysis.long, b',')
            .with_context(|| format!("Writing long-form table to {path:?}"))?;
    }
    info!(
        "Compared {} entity series across {} period(s)",
        analysis.results.len(),
        analysis.layout.periods.len()
    );
    Ok(())
}
