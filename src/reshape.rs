//! Wide to long reshaping.
//!
//! [`melt`] turns one accepted entity row into one [`PeriodValue`] per period
//! column. [`pivot`] is its inverse and rebuilds the wide map from long rows.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;

use crate::{
    error::SchemaError,
    model::{EntityRecord, PeriodValue},
};

pub type WideValues = BTreeMap<i64, BTreeMap<String, Decimal>>;

pub fn melt(record: &EntityRecord) -> impl Iterator<Item = PeriodValue> + '_ {
    record.periods.iter().map(|(label, value)| PeriodValue {
        entity_id: record.entity_id,
        period_label: label.clone(),
        value: *value,
    })
}

/// Melts every record, refusing any `(entity_id, period)` pair that would
/// appear twice.
pub fn melt_all(records: &[EntityRecord]) -> Result<Vec<PeriodValue>, SchemaError> {
    let capacity = records.iter().map(|r| r.periods.len()).sum();
    let mut seen: HashSet<(i64, String)> = HashSet::with_capacity(capacity);
    let mut long = Vec::with_capacity(capacity);
    for record in records {
        for row in melt(record) {
            if !seen.insert((row.entity_id, row.period_label.clone())) {
                return Err(SchemaError::DuplicatePeriod {
                    entity_id: row.entity_id,
                    period: row.period_label,
                });
            }
            long.push(row);
        }
    }
    Ok(long)
}

pub fn pivot<'a, I>(rows: I) -> Result<WideValues, SchemaError>
where
    I: IntoIterator<Item = &'a PeriodValue>,
{
    let mut wide = WideValues::new();
    for row in rows {
        let periods = wide.entry(row.entity_id).or_default();
        if periods.insert(row.period_label.clone(), row.value).is_some() {
            return Err(SchemaError::DuplicatePeriod {
                entity_id: row.entity_id,
                period: row.period_label.clone(),
            });
        }
    }
    Ok(wide)
}
