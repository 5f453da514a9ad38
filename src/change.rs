use rust_decimal::Decimal;

use crate::{error::ComputationError, model::EntityExtremum};

/// `(newest - oldest) / oldest * 100` in decimal arithmetic.
pub fn percentage_change(extremum: &EntityExtremum) -> Result<Decimal, ComputationError> {
    let entity_id = extremum.entity_id;
    if extremum.oldest_value.is_zero() {
        return Err(ComputationError::ZeroBaseline { entity_id });
    }
    extremum
        .newest_value
        .checked_sub(extremum.oldest_value)
        .and_then(|delta| delta.checked_div(extremum.oldest_value))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(ComputationError::Overflow { entity_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn extremum(oldest: &str, newest: &str) -> EntityExtremum {
        EntityExtremum {
            entity_id: 1,
            oldest_value: Decimal::from_str(oldest).unwrap(),
            newest_value: Decimal::from_str(newest).unwrap(),
        }
    }

    #[test]
    fn computes_signed_change() {
        assert_eq!(
            percentage_change(&extremum("1000", "1500")).unwrap(),
            Decimal::from(50)
        );
        assert_eq!(
            percentage_change(&extremum("2000", "1800")).unwrap(),
            Decimal::from(-10)
        );
        assert!(percentage_change(&extremum("500", "500")).unwrap().is_zero());
    }

    #[test]
    fn keeps_precision_across_magnitudes() {
        let change = percentage_change(&extremum("0.03", "0.04")).unwrap();
        assert_eq!(change.round_dp(6), Decimal::from_str("33.333333").unwrap());
        let change = percentage_change(&extremum("123456789.12", "246913578.24")).unwrap();
        assert_eq!(change, Decimal::from(100));
    }

    #[test]
    fn zero_baseline_is_an_error() {
        assert_eq!(
            percentage_change(&extremum("0", "10")).unwrap_err(),
            ComputationError::ZeroBaseline { entity_id: 1 }
        );
    }

    #[test]
    fn overflow_is_an_error() {
        let err = percentage_change(&extremum("0.0000000000000000000000000001", "79228162514264337593543950335"))
            .unwrap_err();
        assert_eq!(err, ComputationError::Overflow { entity_id: 1 });
    }
}
