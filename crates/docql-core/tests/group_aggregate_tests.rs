/// Grouping and aggregation tests: stable partitioning, the shared
/// missing-key group, numeric-only aggregates, and the empty-input policy
/// (zero for sum/avg, no value for min/max).
use docql_core::{
    aggregate_avg, aggregate_count, aggregate_max, aggregate_min, aggregate_sum, filter,
    group_aggregate, group_by, group_summary, parse, Aggregate, Collection, CompareOp, GroupKey,
    Number, QueryError, Value,
};

fn docs(text: &str) -> Collection {
    parse(text).unwrap().into_collection(None).unwrap()
}

fn restaurants() -> Collection {
    docs(
        r#"[
        {"name": "A", "price": "$", "rating": 4.5, "reviews": 10},
        {"name": "B", "price": "$$", "rating": 3.0, "reviews": 5},
        {"name": "C", "price": "$", "rating": 4.0, "reviews": 7},
        {"name": "D", "rating": "n/a"},
        {"name": "E", "price": null, "rating": 2},
        {"name": "F", "price": "$", "rating": true}
    ]"#,
    )
}

fn key(text: &str) -> GroupKey {
    GroupKey::from(parse(text).unwrap())
}

// ============================================================================
// group_by
// ============================================================================

#[test]
fn group_by_partitions_in_first_appearance_order() {
    let groups = group_by(&restaurants(), "price");
    let keys: Vec<GroupKey> = groups.keys().cloned().collect();
    assert_eq!(keys, [key(r#""$""#), key(r#""$$""#), GroupKey::Missing]);
}

#[test]
fn group_by_is_stable_within_groups() {
    let groups = group_by(&restaurants(), "price");
    let cheap = groups.get(&key(r#""$""#)).unwrap();
    let names: Vec<&str> = cheap
        .iter()
        .map(|d| d.get("name").and_then(Value::as_str).unwrap())
        .collect();
    assert_eq!(names, ["A", "C", "F"]);
}

#[test]
fn missing_and_null_share_one_group() {
    let groups = group_by(&restaurants(), "price");
    let missing = groups.get(&GroupKey::Missing).unwrap();
    assert_eq!(missing.len(), 2);
    assert_eq!(key("null"), GroupKey::Missing);
}

#[test]
fn group_by_numeric_keys_match_across_kinds() {
    let data = docs(r#"[{"k": 1}, {"k": 1.0}, {"k": 2}]"#);
    let groups = group_by(&data, "k");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups.get(&key("1")).unwrap().len(), 2);
    assert_eq!(groups.get(&key("1.0")).unwrap().len(), 2);
}

#[test]
fn group_by_large_integers_independent_of_arrival_order() {
    let orders = [
        r#"[{"k": 9007199254740993}, {"k": 9007199254740992}, {"k": 9007199254740992.0}]"#,
        r#"[{"k": 9007199254740992.0}, {"k": 9007199254740993}, {"k": 9007199254740992}]"#,
    ];
    for text in orders {
        let groups = group_by(&docs(text), "k");
        assert_eq!(groups.len(), 2, "{text}");
        assert_eq!(groups.get(&key("9007199254740993")).unwrap().len(), 1);
        assert_eq!(groups.get(&key("9007199254740992")).unwrap().len(), 2);
    }
}

#[test]
fn group_by_structured_keys() {
    let data = docs(
        r#"[{"k": {"a": 1, "b": [1, "x"]}}, {"k": {"b": [1.0, "x"], "a": 1}}, {"k": ["x"]}, {"k": "x"}]"#,
    );
    let groups = group_by(&data, "k");
    assert_eq!(groups.len(), 3);
    assert_eq!(groups.get(&key(r#"{"b": [1, "x"], "a": 1.0}"#)).unwrap().len(), 2);
    assert_eq!(groups.get(&key(r#"["x"]"#)).unwrap().len(), 1);
}

#[test]
fn group_by_unique_field_makes_one_group_per_document() {
    let text = format!(
        "[{}]",
        (0..20_000)
            .map(|i| format!(r#"{{"id": {i}}}"#))
            .collect::<Vec<_>>()
            .join(",")
    );
    let groups = group_by(&docs(&text), "id");
    assert_eq!(groups.len(), 20_000);
    assert_eq!(groups.get(&key("19999")).unwrap().len(), 1);
    assert_eq!(groups.get(&key("20000")), None);
}

#[test]
fn group_by_empty_collection() {
    let groups = group_by(&[], "price");
    assert!(groups.is_empty());
}

#[test]
fn group_counts_sum_to_total() {
    let data = restaurants();
    let groups = group_by(&data, "price");
    let total: usize = groups.iter().map(|g| aggregate_count(&g.documents)).sum();
    assert_eq!(total, aggregate_count(&data));
}

#[test]
fn group_key_value_access() {
    assert_eq!(GroupKey::Missing.as_value(), None);
    assert_eq!(GroupKey::Missing.into_value(), Value::Null);
    assert_eq!(key("3").as_value(), Some(&Value::from(3)));
}

// ============================================================================
// Aggregates
// ============================================================================

#[test]
fn count_counts_every_document() {
    assert_eq!(aggregate_count(&restaurants()), 6);
    assert_eq!(aggregate_count(&[]), 0);
}

#[test]
fn sum_skips_missing_and_non_numeric() {
    // 4.5 + 3.0 + 4.0 + 2; "n/a" and true are skipped.
    assert_eq!(aggregate_sum(&restaurants(), "rating"), Number::Float(13.5));
}

#[test]
fn sum_of_integers_stays_integer() {
    assert_eq!(aggregate_sum(&restaurants(), "reviews"), Number::Integer(22));
}

#[test]
fn sum_overflow_falls_back_to_float() {
    let data = docs(&format!(r#"[{{"n": {}}}, {{"n": 1}}]"#, i64::MAX));
    assert!(matches!(aggregate_sum(&data, "n"), Number::Float(_)));
}

#[test]
fn avg_over_numeric_subset() {
    assert_eq!(aggregate_avg(&restaurants(), "rating"), Number::Float(13.5 / 4.0));
    assert_eq!(aggregate_avg(&restaurants(), "reviews"), Number::Float(22.0 / 3.0));
}

#[test]
fn empty_numeric_subset_policy() {
    let data = restaurants();
    assert_eq!(aggregate_sum(&data, "missing"), Number::Integer(0));
    assert_eq!(aggregate_avg(&data, "missing"), Number::Integer(0));
    assert_eq!(aggregate_max(&data, "missing"), None);
    assert_eq!(aggregate_min(&data, "missing"), None);
    assert_eq!(aggregate_min(&data, "name"), None);
}

#[test]
fn max_and_min() {
    let data = restaurants();
    assert_eq!(aggregate_max(&data, "rating"), Some(Number::Float(4.5)));
    assert_eq!(aggregate_min(&data, "rating"), Some(Number::Integer(2)));
    assert_eq!(aggregate_max(&data, "reviews"), Some(Number::Integer(10)));
}

#[test]
fn max_tie_keeps_first_occurrence() {
    let data = docs(r#"[{"v": 2}, {"v": 2.0}]"#);
    assert_eq!(aggregate_max(&data, "v"), Some(Number::Integer(2)));
    assert_eq!(aggregate_min(&data, "v"), Some(Number::Integer(2)));
}

#[test]
fn aggregate_dispatch_by_name() {
    let data = restaurants();
    assert_eq!("avg".parse::<Aggregate>().unwrap(), Aggregate::Avg);
    assert_eq!(" MAX ".parse::<Aggregate>().unwrap(), Aggregate::Max);
    assert_eq!(
        "median".parse::<Aggregate>().unwrap_err(),
        QueryError::UnknownAggregate("median".to_string())
    );
    assert_eq!(Aggregate::Count.apply(&data, "anything"), Value::from(6));
    assert_eq!(Aggregate::Max.apply(&data, "missing"), Value::Null);
    assert_eq!(Aggregate::Sum.apply(&data, "reviews"), Value::from(22));
}

// ============================================================================
// group_aggregate
// ============================================================================

#[test]
fn group_aggregate_builds_one_row_per_group() {
    let rows = group_aggregate(&restaurants(), "price", Aggregate::Max, "rating");
    assert_eq!(
        rows,
        docs(
            r#"[
            {"price": "$", "max_rating": 4.5},
            {"price": "$$", "max_rating": 3.0},
            {"price": null, "max_rating": 2}
        ]"#
        )
    );
}

#[test]
fn group_aggregate_no_value_renders_null() {
    let rows = group_aggregate(&restaurants(), "price", Aggregate::Min, "reviews");
    assert_eq!(rows[2].get("min_reviews"), Some(&Value::Null));
}

#[test]
fn group_aggregate_count() {
    let rows = group_aggregate(&restaurants(), "price", Aggregate::Count, "name");
    let counts: Vec<&Value> = rows.iter().map(|r| r.get("count_name").unwrap()).collect();
    assert_eq!(counts, [&Value::from(3), &Value::from(1), &Value::from(2)]);
}

#[test]
fn group_aggregate_is_a_single_column_summary() {
    let data = restaurants();
    assert_eq!(
        group_aggregate(&data, "price", Aggregate::Avg, "rating"),
        group_summary(&data, "price", &[Aggregate::Avg], "rating")
    );
}

// ============================================================================
// group_summary
// ============================================================================

#[test]
fn group_summary_one_column_per_aggregate() {
    let rows = group_summary(
        &restaurants(),
        "price",
        &[Aggregate::Count, Aggregate::Max, Aggregate::Avg],
        "rating",
    );
    assert_eq!(
        rows,
        docs(
            r#"[
            {"price": "$", "count_rating": 3, "max_rating": 4.5, "avg_rating": 4.25},
            {"price": "$$", "count_rating": 1, "max_rating": 3.0, "avg_rating": 3.0},
            {"price": null, "count_rating": 2, "max_rating": 2, "avg_rating": 2.0}
        ]"#
        )
    );
}

#[test]
fn group_summary_without_aggregates_lists_keys() {
    let rows = group_summary(&restaurants(), "price", &[], "rating");
    assert_eq!(rows, docs(r#"[{"price": "$"}, {"price": "$$"}, {"price": null}]"#));
}

#[test]
fn filter_then_group_summary() {
    let kept = filter(&restaurants(), "reviews", CompareOp::Ge, &Value::from(7)).unwrap();
    let rows = group_summary(&kept, "price", &[Aggregate::Count, Aggregate::Sum], "reviews");
    assert_eq!(
        rows,
        docs(r#"[{"price": "$", "count_reviews": 2, "sum_reviews": 17}]"#)
    );
}
