//! The analysis pipeline.
//!
//! Stages run strictly in order: classify the header, drop incomplete rows,
//! melt the survivors into long form, take the oldest and newest value per
//! entity, compute the percentage change and pick the two extremes.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::{
    change::percentage_change,
    columns::{self, ColumnLayout, PeriodConvention},
    completeness::{self, Completeness, FilterStats},
    error::SwingError,
    extremum,
    model::{ChangeResult, EntityRecord, PeriodValue},
    ordering::{PeriodOrder, PeriodOrdering, PeriodRanks},
    reshape,
    select::{self, Extremes},
    source::WideTable,
};

pub const DEFAULT_ID_COLUMN: &str = "RegionID";
pub const DEFAULT_NAME_COLUMN: &str = "RegionName";

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub convention: PeriodConvention,
    pub id_column: String,
    pub name_column: String,
    pub order: PeriodOrder,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            convention: PeriodConvention::default(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            name_column: DEFAULT_NAME_COLUMN.to_string(),
            order: PeriodOrder::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub layout: ColumnLayout,
    pub filter: FilterStats,
    pub long: Vec<PeriodValue>,
    /// Every surviving entity, largest increase first.
    pub results: Vec<ChangeResult>,
    pub extremes: Option<Extremes>,
}

pub fn analyze(table: &WideTable, options: &AnalysisOptions) -> Result<Analysis, SwingError> {
    let ordering = options.order.comparator();
    analyze_with(table, options, ordering.as_ref())
}

/// Runs the pipeline with an explicit period ordering; `options.order` is
/// ignored.
pub fn analyze_with(
    table: &WideTable,
    options: &AnalysisOptions,
    ordering: &dyn PeriodOrdering,
) -> Result<Analysis, SwingError> {
    let layout = columns::classify(
        &table.headers,
        &options.convention,
        &options.id_column,
        &options.name_column,
    )?;
    info!(
        "Found {} period column(s) and {} metadata column(s); entities keyed by '{}', named by '{}'",
        layout.periods.len(),
        layout.metadata.len(),
        layout.id_column(),
        layout.name_column()
    );
    let ranks = PeriodRanks::new(layout.period_labels(), ordering)?;

    let mut filter = FilterStats::default();
    let mut records: Vec<EntityRecord> = Vec::with_capacity(table.rows.len());
    for (row_idx, raw) in table.rows.iter().enumerate() {
        let outcome = completeness::check_row(&layout, row_idx + 1, raw)?;
        filter.record(&outcome);
        if let Completeness::Accepted(record) = outcome {
            records.push(record);
        }
    }
    info!(
        "Kept {} of {} row(s); excluded {} incomplete row(s) ({} missing, {} zero, {} unparseable)",
        filter.accepted,
        filter.scanned,
        filter.rejected(),
        filter.missing,
        filter.zero,
        filter.unparseable
    );

    let long = reshape::melt_all(&records)?;
    debug!("Melted {} entity row(s) into {} period value(s)", records.len(), long.len());

    let extrema = extremum::extract(&long, &ranks)?;

    let names: BTreeMap<i64, &str> = records
        .iter()
        .map(|r| (r.entity_id, r.display_name.as_str()))
        .collect();
    let mut results = extrema
        .iter()
        .map(|extremum| -> Result<ChangeResult, SwingError> {
            Ok(ChangeResult {
                entity_id: extremum.entity_id,
                display_name: names
                    .get(&extremum.entity_id)
                    .copied()
                    .unwrap_or_default()
                    .to_string(),
                percentage_change: percentage_change(extremum)?,
            })
        })
        .collect::<Result<Vec<_>, SwingError>>()?;
    results.sort_by(select::rank_cmp);

    let extremes = select::select_extremes(&results);
    match &extremes {
        Some(extremes) => debug!(
            "Largest increase: entity {}; largest decrease: entity {}",
            extremes.largest_increase.entity_id, extremes.largest_decrease.entity_id
        ),
        None => debug!("No entity survived filtering"),
    }

    Ok(Analysis {
        layout,
        filter,
        long,
        results,
        extremes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use rust_decimal::Decimal;

    fn table(headers: &[&str], rows: &[&[&str]]) -> WideTable {
        WideTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn reports_increase_and_decrease() {
        let input = table(
            &["RegionID", "RegionName", "2010-01-31", "2010-02-28"],
            &[
                &["1", "A", "1000", "1500"],
                &["2", "B", "2000", "1800"],
                &["3", "C", "500", "500"],
            ],
        );
        let analysis = analyze(&input, &AnalysisOptions::default()).unwrap();
        let extremes = analysis.extremes.unwrap();
        assert_eq!(extremes.largest_increase.display_name, "A");
        assert_eq!(extremes.largest_increase.percentage_change, Decimal::from(50));
        assert_eq!(extremes.largest_decrease.display_name, "B");
        assert_eq!(extremes.largest_decrease.percentage_change, Decimal::from(-10));
        assert_eq!(analysis.long.len(), 6);
        assert_eq!(
            analysis.results.iter().map(|r| r.entity_id).collect::<Vec<_>>(),
            vec![1, 3, 2]
        );
    }

    #[test]
    fn incomplete_rows_are_counted_not_fatal() {
        let input = table(
            &["RegionID", "RegionName", "2010-01-31", "2010-02-28"],
            &[
                &["1", "A", "1000", "1100"],
                &["2", "Z", "0", "900000"],
                &["3", "Y", "", "5"],
            ],
        );
        let analysis = analyze(&input, &AnalysisOptions::default()).unwrap();
        assert_eq!(analysis.filter.accepted, 1);
        assert_eq!(analysis.filter.rejected(), 2);
        assert_eq!(analysis.results.len(), 1);
    }

    #[test]
    fn no_survivors_yields_no_extremes() {
        let input = table(
            &["RegionID", "RegionName", "2010-01-31"],
            &[&["1", "A", "0"]],
        );
        let analysis = analyze(&input, &AnalysisOptions::default()).unwrap();
        assert!(analysis.extremes.is_none());
        assert!(analysis.long.is_empty());
    }

    #[test]
    fn duplicate_entity_rows_fail() {
        let input = table(
            &["RegionID", "RegionName", "2010-01-31"],
            &[&["1", "A", "10"], &["1", "A again", "12"]],
        );
        let err = analyze(&input, &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SwingError::Schema(SchemaError::DuplicatePeriod { entity_id: 1, .. })
        ));
    }

    #[test]
    fn injected_ordering_is_used() {
        let input = table(
            &["RegionID", "RegionName", "2010-01-31", "2010-02-28"],
            &[&["1", "A", "100", "200"]],
        );
        let reversed = |a: &str, b: &str| b.cmp(a);
        let analysis = analyze_with(&input, &AnalysisOptions::default(), &reversed).unwrap();
        assert_eq!(
            analysis.results[0].percentage_change,
            Decimal::from(-50)
        );
    }

    #[test]
    fn same_date_labels_in_the_middle_of_the_header_fail() {
        let input = table(
            &[
                "RegionID",
                "RegionName",
                "2010-01-31",
                "2010-02-28",
                "2010-2-28",
                "2010-03-31",
            ],
            &[&["1", "A", "100", "110", "999", "120"]],
        );
        let err = analyze(&input, &AnalysisOptions::default()).unwrap_err();
        let SwingError::Schema(SchemaError::DuplicatePeriodLabel { first, second }) = err else {
            panic!("expected duplicate period label, got {err:?}");
        };
        assert_eq!((first.as_str(), second.as_str()), ("2010-02-28", "2010-2-28"));
    }

    #[test]
    fn same_date_labels_are_distinct_under_lexical_order() {
        let input = table(
            &["RegionID", "RegionName", "2010-02-28", "2010-2-28"],
            &[&["1", "A", "100", "150"]],
        );
        let options = AnalysisOptions {
            order: PeriodOrder::Lexical,
            ..AnalysisOptions::default()
        };
        let analysis = analyze(&input, &options).unwrap();
        assert_eq!(analysis.results[0].percentage_change, Decimal::from(50));
    }
}
