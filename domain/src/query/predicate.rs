//! Filter Predicate Mapper
//!
//! Converts canonical [`Filter`]s into the predicate shape a backend expects.
//!
//! - **Gateway target**: the gateway understands the canonical
//!   `{field, type, value}` shape natively, so the mapping is the identity.
//! - **Direct-store target**: a document-store query object for deployments
//!   that bypass the gateway. Operators become `$`-prefixed comparison keys,
//!   equality is a bare value, and regex matching is case-insensitive.
//!
//! ```text
//! [{a gt 1}, {b eq 2}, {a lt 5}]
//!   → {"b": 2, "$and": [{"a": {"$gt": 1}}, {"a": {"$lt": 5}}]}
//! ```
//!
//! Distinct fields are ANDed implicitly as top-level keys. When a field is
//! constrained more than once, every condition on it moves into one `$and`
//! group so none of them is overwritten.

use super::filter::{Filter, FilterType};
use serde_json::{Map, Value, json};

/// Key of the explicit conjunction group in a store predicate
pub const ALL_OF: &str = "$and";

/// Direct-store query object
pub type StorePredicate = Map<String, Value>;

/// Gateway predicate: the canonical filter list, forwarded as-is
pub fn to_gateway_filters(filters: &[Filter]) -> Value {
    Value::Array(
        filters
            .iter()
            .map(|f| json!({"field": f.field(), "type": f.kind(), "value": f.value()}))
            .collect(),
    )
}

/// Direct-store predicate for a filter list
pub fn to_store_predicate(filters: &[Filter]) -> StorePredicate {
    // (field, conditions) in first-seen field order
    let grouped = filters
        .iter()
        .fold(Vec::<(&str, Vec<Value>)>::new(), |mut seen, filter| {
            let condition = store_condition(filter);
            match seen.iter_mut().find(|(field, _)| *field == filter.field()) {
                Some((_, conditions)) => conditions.push(condition),
                None => seen.push((filter.field(), vec![condition])),
            }
            seen
        });

    let mut predicate = StorePredicate::new();
    let mut all_of = Vec::new();
    for (field, mut conditions) in grouped {
        if conditions.len() == 1 {
            if let Some(condition) = conditions.pop() {
                predicate.insert(field.to_string(), condition);
            }
        } else {
            all_of.extend(conditions.into_iter().map(|c| json!({ field: c })));
        }
    }
    if !all_of.is_empty() {
        predicate.insert(ALL_OF.to_string(), Value::Array(all_of));
    }
    predicate
}

/// Store condition for one filter, without the field key
fn store_condition(filter: &Filter) -> Value {
    let value = filter.value().clone();
    match filter.kind() {
        FilterType::Eq => value,
        FilterType::Ne => json!({ "$ne": value }),
        FilterType::Gt => json!({ "$gt": value }),
        FilterType::Lt => json!({ "$lt": value }),
        FilterType::Gte => json!({ "$gte": value }),
        FilterType::Lte => json!({ "$lte": value }),
        FilterType::In => json!({ "$in": as_sequence(value) }),
        FilterType::Nin => json!({ "$nin": as_sequence(value) }),
        FilterType::Regex => json!({ "$regex": value, "$options": "i" }),
    }
}

fn as_sequence(value: Value) -> Value {
    match value {
        Value::Array(_) => value,
        scalar => Value::Array(vec![scalar]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(field: &str, kind: FilterType, value: Value) -> Filter {
        Filter::new(field, kind, value).unwrap()
    }

    #[test]
    fn test_gateway_mapping_is_identity() {
        let filters = vec![
            filter("amount", FilterType::Gt, json!(1000)),
            filter("status", FilterType::In, json!("active")),
        ];
        assert_eq!(
            to_gateway_filters(&filters),
            json!([
                {"field": "amount", "type": "gt", "value": 1000},
                {"field": "status", "type": "in", "value": ["active"]}
            ])
        );
        assert_eq!(to_gateway_filters(&[]), json!([]));
    }

    #[test]
    fn test_store_empty_filters() {
        assert!(to_store_predicate(&[]).is_empty());
    }

    #[test]
    fn test_store_comparison_operators_preserved() {
        let cases = [
            (FilterType::Ne, "$ne"),
            (FilterType::Gt, "$gt"),
            (FilterType::Lt, "$lt"),
            (FilterType::Gte, "$gte"),
            (FilterType::Lte, "$lte"),
        ];
        for (kind, op) in cases {
            let predicate = to_store_predicate(&[filter("n", kind, json!(3))]);
            assert_eq!(predicate["n"], json!({ op: 3 }), "operator {kind}");
        }
    }

    #[test]
    fn test_store_eq_is_bare_value() {
        let predicate = to_store_predicate(&[filter("status", FilterType::Eq, json!("open"))]);
        assert_eq!(Value::Object(predicate), json!({"status": "open"}));
    }

    #[test]
    fn test_store_membership_scalar_becomes_sequence() {
        let predicate = to_store_predicate(&[
            filter("a", FilterType::In, json!(1)),
            filter("b", FilterType::Nin, json!(["x", "y"])),
        ]);
        assert_eq!(predicate["a"], json!({"$in": [1]}));
        assert_eq!(predicate["b"], json!({"$nin": ["x", "y"]}));
    }

    #[test]
    fn test_store_regex_case_insensitive() {
        let predicate = to_store_predicate(&[filter("name", FilterType::Regex, json!("^jo"))]);
        assert_eq!(predicate["name"], json!({"$regex": "^jo", "$options": "i"}));
    }

    #[test]
    fn test_store_same_field_promotes_to_all_of_group() {
        let predicate = to_store_predicate(&[
            filter("amount", FilterType::Gt, json!(10)),
            filter("amount", FilterType::Lt, json!(100)),
        ]);
        assert!(!predicate.contains_key("amount"));
        assert_eq!(
            predicate[ALL_OF],
            json!([{"amount": {"$gt": 10}}, {"amount": {"$lt": 100}}])
        );
    }

    #[test]
    fn test_store_same_field_equality_not_dropped() {
        let predicate = to_store_predicate(&[
            filter("status", FilterType::Eq, json!("open")),
            filter("status", FilterType::Ne, json!("closed")),
        ]);
        assert_eq!(
            predicate[ALL_OF],
            json!([{"status": "open"}, {"status": {"$ne": "closed"}}])
        );
    }

    #[test]
    fn test_store_mixed_fields_keep_order() {
        let predicate = to_store_predicate(&[
            filter("a", FilterType::Gt, json!(1)),
            filter("b", FilterType::Eq, json!(2)),
            filter("a", FilterType::Lt, json!(5)),
            filter("c", FilterType::Gte, json!(0)),
        ]);
        let keys: Vec<&str> = predicate.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "c", ALL_OF]);
        assert_eq!(
            predicate[ALL_OF],
            json!([{"a": {"$gt": 1}}, {"a": {"$lt": 5}}])
        );
    }
}
