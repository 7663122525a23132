use crate::data::record::FieldValue;
use std::cmp::Ordering;

/// Natural ordering between two field values
///
/// Numbers compare numerically, strings lexicographically, booleans false < true.
/// Cross-type comparisons use a fixed order: Null < Boolean < Number < String.
pub fn compare_field_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Number(a), FieldValue::Number(b)) => {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        }
        (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
        (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),

        (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
        (FieldValue::Null, _) => Ordering::Less,
        (_, FieldValue::Null) => Ordering::Greater,

        (FieldValue::Boolean(_), _) => Ordering::Less,
        (_, FieldValue::Boolean(_)) => Ordering::Greater,

        (FieldValue::Number(_), FieldValue::String(_)) => Ordering::Less,
        (FieldValue::String(_), FieldValue::Number(_)) => Ordering::Greater,
    }
}

/// Compare optional values with missing values placed last
///
/// `descending` reverses the order of present values only, so gaps stay at
/// the end in both directions.
pub fn compare_nulls_last(a: Option<&FieldValue>, b: Option<&FieldValue>, descending: bool) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let cmp = compare_field_values(a, b);
            if descending {
                cmp.reverse()
            } else {
                cmp
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_comparison() {
        assert_eq!(
            compare_field_values(&FieldValue::Number(1.0), &FieldValue::Number(2.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_field_values(&FieldValue::Number(10.0), &FieldValue::Number(9.5)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_string_comparison() {
        assert_eq!(
            compare_field_values(&"apple".into(), &"banana".into()),
            Ordering::Less
        );
    }

    #[test]
    fn test_cross_type_order() {
        assert_eq!(
            compare_field_values(&FieldValue::Boolean(true), &FieldValue::Number(0.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_field_values(&FieldValue::Number(99.0), &"1".into()),
            Ordering::Less
        );
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let one = FieldValue::Number(1.0);
        assert_eq!(compare_nulls_last(None, Some(&one), false), Ordering::Greater);
        assert_eq!(compare_nulls_last(None, Some(&one), true), Ordering::Greater);
        assert_eq!(
            compare_nulls_last(Some(&FieldValue::Null), Some(&one), true),
            Ordering::Greater
        );
        assert_eq!(compare_nulls_last(None, None, true), Ordering::Equal);
    }
}
