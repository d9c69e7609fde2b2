// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde_json::json;

use super::*;

fn range(min: Option<Value>, max: Option<Value>) -> RangeQuery {
    RangeQuery {
        order_by: "releaseDate",
        direction: SortDirection::Ascending,
        min,
        max,
        limit: 10,
    }
}

#[test]
fn compare_field_values() {
    assert_eq!(Some(Ordering::Less), cmp_field_values(&json!(1), &json!(2.5)));
    assert_eq!(
        Some(Ordering::Greater),
        cmp_field_values(&json!("2019-02-01"), &json!("2019-01-31"))
    );
    assert_eq!(None, cmp_field_values(&json!(1), &json!("1")));
    assert_eq!(None, cmp_field_values(&json!(null), &json!(null)));
}

#[test]
fn range_bounds_are_inclusive() {
    let query = range(Some(json!("2019-01-01")), Some(json!("2019-01-31")));
    assert!(query.contains(&json!("2019-01-01")));
    assert!(query.contains(&json!("2019-01-15")));
    assert!(query.contains(&json!("2019-01-31")));
    assert!(!query.contains(&json!("2018-12-31")));
    assert!(!query.contains(&json!("2019-02-01")));
}

#[test]
fn unbounded_range() {
    let query = range(None, None);
    assert!(query.contains(&json!("2019-01-01")));
    assert!(query.contains(&json!(42)));
}

#[test]
fn incomparable_values_are_outside_bounded_ranges() {
    let query = range(Some(json!("2019-01-01")), None);
    assert!(!query.contains(&json!(20_190_101)));
}

#[test]
fn optional_not_found() {
    let res: RepoResult<()> = Err(RepoError::NotFound);
    assert!(matches!(res.optional(), Ok(None)));
    let res: RepoResult<()> = Err(RepoError::Aborted);
    assert!(res.optional().is_err());
    let res: RepoResult<u8> = Ok(1);
    assert!(matches!(res.optional(), Ok(Some(1))));
}

#[test]
fn null_fields_are_absent() {
    let mut fields = Fields::new();
    fields.insert("length".to_owned(), Value::Null);
    fields.insert("name".to_owned(), json!("Hello"));
    let document = Document::new("a", fields);
    assert_eq!(None, document.field("length"));
    assert_eq!(Some(&json!("Hello")), document.field("name"));
    assert!(!document.is_empty());
}

#[test]
fn structured_fields_of_collections() {
    assert!(structured_fields(track::COLLECTION).contains(&track::SOURCE_ROW_FIELD));
    assert!(!structured_fields(track::COLLECTION).contains(&track::NAME_FIELD));
    assert!(structured_fields(subgenre::COLLECTION).contains(&subgenre::ORIGINS_FIELD));
    assert!(structured_fields("unknown").is_empty());
}
