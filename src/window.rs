//! First/last-per-partition aggregation.
//!
//! [`partition_bounds`] groups items by key, sorts each group with the given
//! comparator and keeps the two ends. A group whose first (or last) position
//! is shared by two items that compare equal is reported as a [`BoundsTie`]
//! rather than resolved arbitrarily.

use std::{cmp::Ordering, collections::BTreeMap};

use crate::error::Boundary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds<T> {
    pub first: T,
    pub last: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsTie<K, T> {
    pub key: K,
    pub boundary: Boundary,
    pub left: T,
    pub right: T,
}

pub fn partition_bounds<K, T, I, P, C>(
    items: I,
    partition: P,
    order: C,
) -> Result<BTreeMap<K, Bounds<T>>, BoundsTie<K, T>>
where
    K: Ord + Clone,
    T: Clone,
    I: IntoIterator<Item = T>,
    P: Fn(&T) -> K,
    C: Fn(&T, &T) -> Ordering,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(partition(&item)).or_default().push(item);
    }

    let mut bounds = BTreeMap::new();
    for (key, mut group) in groups {
        group.sort_by(&order);
        let len = group.len();
        if len > 1 {
            if order(&group[0], &group[1]) == Ordering::Equal {
                return Err(BoundsTie {
                    key,
                    boundary: Boundary::Oldest,
                    left: group[0].clone(),
                    right: group[1].clone(),
                });
            }
            if order(&group[len - 2], &group[len - 1]) == Ordering::Equal {
                return Err(BoundsTie {
                    key,
                    boundary: Boundary::Newest,
                    left: group[len - 2].clone(),
                    right: group[len - 1].clone(),
                });
            }
        }
        let last = group.swap_remove(len - 1);
        let first = if len == 1 {
            last.clone()
        } else {
            group.swap_remove(0)
        };
        bounds.insert(key, Bounds { first, last });
    }
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_ends_of_each_partition() {
        let items = vec![("b", 3), ("a", 2), ("b", 1), ("a", 9), ("b", 2)];
        let bounds = partition_bounds(items, |item| item.0, |l, r| l.1.cmp(&r.1)).unwrap();
        assert_eq!(
            bounds["a"],
            Bounds {
                first: ("a", 2),
                last: ("a", 9),
            }
        );
        assert_eq!(
            bounds["b"],
            Bounds {
                first: ("b", 1),
                last: ("b", 3),
            }
        );
    }

    #[test]
    fn single_item_partition_is_both_ends() {
        let bounds = partition_bounds(vec![(1, 'x')], |item| item.0, |l, r| l.1.cmp(&r.1)).unwrap();
        assert_eq!(bounds[&1].first, (1, 'x'));
        assert_eq!(bounds[&1].last, (1, 'x'));
    }

    #[test]
    fn ties_at_either_end_are_reported() {
        let oldest = partition_bounds(
            vec![(1, 1, 'a'), (1, 1, 'b'), (1, 5, 'c')],
            |item| item.0,
            |l, r| l.1.cmp(&r.1),
        )
        .unwrap_err();
        assert_eq!(oldest.boundary, Boundary::Oldest);

        let newest = partition_bounds(
            vec![(1, 1, 'a'), (1, 5, 'b'), (1, 5, 'c')],
            |item| item.0,
            |l, r| l.1.cmp(&r.1),
        )
        .unwrap_err();
        assert_eq!(newest.boundary, Boundary::Newest);
        assert_eq!(newest.key, 1);
    }

    #[test]
    fn ties_in_the_interior_are_allowed() {
        let bounds = partition_bounds(
            vec![(1, 1), (1, 3), (1, 3), (1, 7)],
            |item| item.0,
            |l, r| l.1.cmp(&r.1),
        )
        .unwrap();
        assert_eq!(bounds[&1].first.1, 1);
        assert_eq!(bounds[&1].last.1, 7);
    }
}
