//! Orderings over period labels.
//!
//! Lexical and chronological order only agree for zero-padded ISO dates, so
//! the extractor takes the ordering as a parameter instead of sorting the
//! raw strings.

use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
};

use chrono::{
    NaiveDate,
    format::{Parsed, StrftimeItems, parse},
};
use clap::ValueEnum;

use crate::error::SchemaError;

pub trait PeriodOrdering {
    fn compare(&self, left: &str, right: &str) -> Ordering;
}

impl<F> PeriodOrdering for F
where
    F: Fn(&str, &str) -> Ordering,
{
    fn compare(&self, left: &str, right: &str) -> Ordering {
        self(left, right)
    }
}

/// Plain string order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexical;

impl PeriodOrdering for Lexical {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        left.cmp(right)
    }
}

/// Calendar order for labels that parse as dates. Dated labels sort ahead of
/// undated ones; undated labels compare lexically.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chronological;

impl PeriodOrdering for Chronological {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        match (parse_period_date(left), parse_period_date(right)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => left.cmp(right),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum PeriodOrder {
    #[default]
    Chronological,
    Lexical,
}

impl PeriodOrder {
    pub fn comparator(self) -> Box<dyn PeriodOrdering> {
        match self {
            PeriodOrder::Chronological => Box::new(Chronological),
            PeriodOrder::Lexical => Box::new(Lexical),
        }
    }
}

/// A fixed set of period labels sorted once under some ordering.
///
/// Comparing two ranked labels is an integer comparison, so the underlying
/// ordering (and any date parsing it does) runs once per run rather than once
/// per entity. Labels outside the set sort after it, lexically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodRanks {
    ranks: HashMap<String, usize>,
}

impl PeriodRanks {
    /// Fails when two distinct labels compare equal under `ordering`, such as
    /// `2010-02-28` and `2010-2-28` under [`Chronological`], wherever they sit.
    pub fn new<'a, I>(labels: I, ordering: &dyn PeriodOrdering) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sorted: Vec<&str> = labels
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        sorted.sort_by(|a, b| ordering.compare(a, b));
        if let Some(pair) = sorted
            .windows(2)
            .find(|pair| ordering.compare(pair[0], pair[1]) == Ordering::Equal)
        {
            return Err(SchemaError::DuplicatePeriodLabel {
                first: pair[0].to_string(),
                second: pair[1].to_string(),
            });
        }
        Ok(Self {
            ranks: sorted
                .into_iter()
                .enumerate()
                .map(|(rank, label)| (label.to_string(), rank))
                .collect(),
        })
    }

    pub fn rank(&self, label: &str) -> Option<usize> {
        self.ranks.get(label).copied()
    }
}

impl PeriodOrdering for PeriodRanks {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        match (self.rank(left), self.rank(right)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => left.cmp(right),
        }
    }
}

pub fn parse_period_date(label: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y_%m_%d", "%Y%m%d"];
    let trimmed = label.trim();
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(parsed);
        }
    }
    // Year-month labels such as `2010-01` stand for the first of the month.
    let mut parsed = Parsed::new();
    parse(&mut parsed, trimmed, StrftimeItems::new("%Y-%m")).ok()?;
    parsed.set_day(1).ok()?;
    parsed.to_naive_date().ok()
}
