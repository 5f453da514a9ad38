//! Header classification into metadata and period columns.
//!
//! A column is a period column when its name matches the configured
//! [`PeriodConvention`] (by default a leading four-digit year, as in
//! `2010-01-31`). Everything else is metadata carried through for display.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use log::debug;
use regex::Regex;

use crate::error::SchemaError;

pub const DEFAULT_PERIOD_PATTERN: &str = r"^\d{4}";

#[derive(Debug, Clone)]
pub struct PeriodConvention {
    pattern: Regex,
}

impl PeriodConvention {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Compiling period pattern '{pattern}'"))?;
        Ok(Self { pattern })
    }

    pub fn is_period(&self, column: &str) -> bool {
        self.pattern.is_match(column)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for PeriodConvention {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_PERIOD_PATTERN).expect("default period pattern compiles"),
        }
    }
}

/// A header column together with its position in the source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub metadata: Vec<ColumnRef>,
    pub periods: Vec<ColumnRef>,
    pub id_index: usize,
    pub name_index: usize,
}

impl ColumnLayout {
    pub fn period_labels(&self) -> impl Iterator<Item = &str> {
        self.periods.iter().map(|c| c.name.as_str())
    }

    pub fn id_column(&self) -> &str {
        self.column_name(self.id_index)
    }

    pub fn name_column(&self) -> &str {
        self.column_name(self.name_index)
    }

    fn column_name(&self, index: usize) -> &str {
        self.metadata
            .iter()
            .find(|c| c.index == index)
            .map(|c| c.name.as_str())
            .unwrap_or_default()
    }
}

/// Period labels that differ only in `_` versus `-` separators refer to the
/// same period.
pub fn canonical_period_label(label: &str) -> String {
    label.trim().replace('_', "-")
}

pub fn classify(
    headers: &[String],
    convention: &PeriodConvention,
    id_column: &str,
    name_column: &str,
) -> Result<ColumnLayout, SchemaError> {
    let mut seen = HashSet::with_capacity(headers.len());
    for header in headers {
        if !seen.insert(header.as_str()) {
            return Err(SchemaError::DuplicateColumn {
                column: header.clone(),
            });
        }
    }

    let (periods, metadata): (Vec<ColumnRef>, Vec<ColumnRef>) = headers
        .iter()
        .enumerate()
        .map(|(index, name)| ColumnRef {
            index,
            name: name.clone(),
        })
        .partition(|column| convention.is_period(&column.name));

    if periods.is_empty() {
        return Err(SchemaError::NoPeriodColumns {
            pattern: convention.as_str().to_string(),
        });
    }

    let mut canonical: HashMap<String, &str> = HashMap::with_capacity(periods.len());
    for period in &periods {
        if let Some(first) = canonical.insert(canonical_period_label(&period.name), &period.name) {
            return Err(SchemaError::DuplicatePeriodLabel {
                first: first.to_string(),
                second: period.name.clone(),
            });
        }
    }
    for column in &metadata {
        if let Some(period) = canonical.get(&canonical_period_label(&column.name)) {
            return Err(SchemaError::MetadataCollision {
                metadata: column.name.clone(),
                period: period.to_string(),
            });
        }
    }

    let locate = |wanted: &str| {
        metadata
            .iter()
            .find(|c| c.name.trim() == wanted)
            .map(|c| c.index)
            .ok_or_else(|| SchemaError::MissingColumn {
                column: wanted.to_string(),
            })
    };
    let id_index = locate(id_column)?;
    let name_index = locate(name_column)?;

    debug!(
        "Classified {} metadata column(s) and {} period column(s)",
        metadata.len(),
        periods.len()
    );
    Ok(ColumnLayout {
        metadata,
        periods,
        id_index,
        name_index,
    })
}
