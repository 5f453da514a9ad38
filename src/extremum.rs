//! Earliest and latest value per entity.

use crate::{
    error::SchemaError,
    model::{EntityExtremum, PeriodValue},
    ordering::PeriodOrdering,
    window::partition_bounds,
};

/// Groups long rows by entity and reads the value at the first and last
/// period under `ordering`. Results come back sorted by entity id.
///
/// The pipeline passes a [`PeriodRanks`](crate::ordering::PeriodRanks) built
/// from the header so labels are not re-parsed per entity.
pub fn extract<'a, I>(
    rows: I,
    ordering: &dyn PeriodOrdering,
) -> Result<Vec<EntityExtremum>, SchemaError>
where
    I: IntoIterator<Item = &'a PeriodValue>,
{
    let bounds = partition_bounds(
        rows,
        |row| row.entity_id,
        |left, right| ordering.compare(&left.period_label, &right.period_label),
    )
    .map_err(|tie| SchemaError::AmbiguousPeriodOrder {
        entity_id: tie.key,
        boundary: tie.boundary,
        first: tie.left.period_label.clone(),
        second: tie.right.period_label.clone(),
    })?;

    Ok(bounds
        .into_iter()
        .map(|(entity_id, bounds)| EntityExtremum {
            entity_id,
            oldest_value: bounds.first.value,
            newest_value: bounds.last.value,
        })
        .collect())
}
