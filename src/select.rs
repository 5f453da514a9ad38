//! Selection of the largest increase and largest decrease.
//!
//! When several entities share the extreme percentage change the one with
//! the lowest entity id is kept, for both ends. The reduction does not depend
//! on the order of its input.

use std::cmp::{Ordering, Reverse};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::ChangeResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extremes {
    pub largest_increase: ChangeResult,
    pub largest_decrease: ChangeResult,
}

impl Extremes {
    fn seed(result: &ChangeResult) -> Self {
        Self {
            largest_increase: result.clone(),
            largest_decrease: result.clone(),
        }
    }

    /// Combines two partial selections.
    pub fn merge(self, other: Extremes) -> Extremes {
        let largest_increase = if increase_rank(&other.largest_increase)
            > increase_rank(&self.largest_increase)
        {
            other.largest_increase
        } else {
            self.largest_increase
        };
        let largest_decrease = if decrease_rank(&other.largest_decrease)
            > decrease_rank(&self.largest_decrease)
        {
            other.largest_decrease
        } else {
            self.largest_decrease
        };
        Extremes {
            largest_increase,
            largest_decrease,
        }
    }
}

fn increase_rank(result: &ChangeResult) -> (Decimal, Reverse<i64>) {
    (result.percentage_change, Reverse(result.entity_id))
}

fn decrease_rank(result: &ChangeResult) -> (Reverse<Decimal>, Reverse<i64>) {
    (Reverse(result.percentage_change), Reverse(result.entity_id))
}

pub fn select_extremes<'a, I>(results: I) -> Option<Extremes>
where
    I: IntoIterator<Item = &'a ChangeResult>,
{
    results
        .into_iter()
        .map(Extremes::seed)
        .reduce(Extremes::merge)
}

/// Orders results from largest increase to largest decrease, using the same
/// tie-break as [`select_extremes`].
pub fn rank_cmp(left: &ChangeResult, right: &ChangeResult) -> Ordering {
    increase_rank(right).cmp(&increase_rank(left))
}
