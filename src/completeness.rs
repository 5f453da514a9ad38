//! Row completeness check.
//!
//! A row survives only when every period value is present, parses as a
//! decimal and is non-zero. Rejected rows are dropped silently; the counts
//! are kept in [`FilterStats`] for reporting.

use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;

use crate::{columns::ColumnLayout, error::SchemaError, model::EntityRecord};

const NULL_PLACEHOLDERS: &[&str] = &["na", "n/a", "null", "nan", "none"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Missing,
    Zero,
    Unparseable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completeness {
    Accepted(EntityRecord),
    Rejected { period: String, reason: Rejection },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub scanned: usize,
    pub accepted: usize,
    pub missing: usize,
    pub zero: usize,
    pub unparseable: usize,
}

impl FilterStats {
    pub fn rejected(&self) -> usize {
        self.missing + self.zero + self.unparseable
    }

    pub fn record(&mut self, outcome: &Completeness) {
        self.scanned += 1;
        match outcome {
            Completeness::Accepted(_) => self.accepted += 1,
            Completeness::Rejected { reason, .. } => match reason {
                Rejection::Missing => self.missing += 1,
                Rejection::Zero => self.zero += 1,
                Rejection::Unparseable => self.unparseable += 1,
            },
        }
    }
}

pub fn parse_period_value(raw: &str) -> Result<Decimal, Rejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || NULL_PLACEHOLDERS
            .iter()
            .any(|p| trimmed.eq_ignore_ascii_case(p))
    {
        return Err(Rejection::Missing);
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| Rejection::Unparseable)?;
    if value.is_zero() {
        return Err(Rejection::Zero);
    }
    Ok(value)
}

/// Checks one raw row. `row` is the 1-based data row number used in errors.
pub fn check_row(
    layout: &ColumnLayout,
    row: usize,
    raw: &[String],
) -> Result<Completeness, SchemaError> {
    let field = |index: usize| raw.get(index).map(|s| s.as_str()).unwrap_or("");

    let raw_id = field(layout.id_index).trim();
    let entity_id = raw_id
        .parse::<i64>()
        .map_err(|_| SchemaError::InvalidEntityId {
            row,
            value: raw_id.to_string(),
        })?;

    let mut periods = Vec::with_capacity(layout.periods.len());
    for column in &layout.periods {
        match parse_period_value(field(column.index)) {
            Ok(value) => periods.push((column.name.clone(), value)),
            Err(reason) => {
                debug!(
                    "Row {row}: dropping entity {entity_id} ({reason:?} value in '{}')",
                    column.name
                );
                return Ok(Completeness::Rejected {
                    period: column.name.clone(),
                    reason,
                });
            }
        }
    }

    Ok(Completeness::Accepted(EntityRecord {
        entity_id,
        display_name: field(layout.name_index).to_string(),
        periods,
        metadata: layout
            .metadata
            .iter()
            .map(|c| field(c.index).to_string())
            .collect(),
    }))
}
