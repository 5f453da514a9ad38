//! Records that flow between pipeline stages.

use rust_decimal::Decimal;
use serde::Serialize;

/// An entity row that passed the completeness check.
///
/// `periods` follows the header order of the period columns; `metadata`
/// holds the remaining fields untouched, in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub entity_id: i64,
    pub display_name: String,
    pub periods: Vec<(String, Decimal)>,
    pub metadata: Vec<String>,
}

/// One long-form row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodValue {
    pub entity_id: i64,
    #[serde(rename = "period")]
    pub period_label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityExtremum {
    pub entity_id: i64,
    pub oldest_value: Decimal,
    pub newest_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeResult {
    pub entity_id: i64,
    pub display_name: String,
    pub percentage_change: Decimal,
}
