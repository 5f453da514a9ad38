//! Error kinds raised by the analysis pipeline.
//!
//! Schema and computation errors abort a run; rows that fail the
//! completeness check are filtered instead and never surface here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("no period columns match pattern '{pattern}'")]
    NoPeriodColumns { pattern: String },
    #[error("column '{column}' appears more than once in the header")]
    DuplicateColumn { column: String },
    #[error("period columns '{first}' and '{second}' name the same period")]
    DuplicatePeriodLabel { first: String, second: String },
    #[error("metadata column '{metadata}' collides with period column '{period}'")]
    MetadataCollision { metadata: String, period: String },
    #[error("required column '{column}' not found in header")]
    MissingColumn { column: String },
    #[error("row {row}: entity id '{value}' is not an integer")]
    InvalidEntityId { row: usize, value: String },
    #[error("entity {entity_id} has more than one value for period '{period}'")]
    DuplicatePeriod { entity_id: i64, period: String },
    #[error(
        "entity {entity_id}: periods '{first}' and '{second}' tie for the {boundary} position"
    )]
    AmbiguousPeriodOrder {
        entity_id: i64,
        boundary: Boundary,
        first: String,
        second: String,
    },
}

/// Which end of an ordered partition an ordering tie was found at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Oldest,
    Newest,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::Oldest => f.write_str("oldest"),
            Boundary::Newest => f.write_str("newest"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputationError {
    #[error("entity {entity_id} has a zero oldest value")]
    ZeroBaseline { entity_id: i64 },
    #[error("entity {entity_id}: percentage change exceeds the decimal range")]
    Overflow { entity_id: i64 },
}

#[derive(Debug, Error)]
pub enum SwingError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("computation error: {0}")]
    Computation(#[from] ComputationError),
    #[error("usage error: {0}")]
    Usage(String),
}

impl SwingError {
    /// Process exit status for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            SwingError::Usage(_) => 2,
            _ => 1,
        }
    }
}
