// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde_json::json;

use genreguide_repo::memory::InMemoryStore;

use super::*;

fn date(input: &str) -> ReleaseDate {
    input.parse().unwrap()
}

fn new_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    for (key, release_date) in [
        ("1", "2020-03-01"),
        ("2", "2020-02-01"),
        ("3", "2020-02-01"),
        ("4", "2020-02-01"),
        ("5", "2020-01-01"),
    ] {
        let serde_json::Value::Object(fields) = json!({ "releaseDate": release_date }) else {
            unreachable!();
        };
        store.insert(layout::COLLECTION, key, fields);
    }
    store
}

fn query(limit: u32) -> ListQuery {
    ListQuery {
        limit,
        newest_first: true,
        released_after: None,
        released_before: None,
    }
}

fn keys(documents: &[Document]) -> Vec<&str> {
    documents
        .iter()
        .map(|document| document.key.as_str())
        .collect()
}

#[tokio::test]
async fn limit_between_release_dates() {
    let store = new_store();
    let documents = list_latest(&store, &TracksCache::default(), query(4))
        .await
        .unwrap();
    assert_eq!(vec!["1", "2", "3", "4"], keys(&documents));
}

#[tokio::test]
async fn limit_within_release_date_includes_all_ties() {
    let store = new_store();
    let documents = list_latest(&store, &TracksCache::default(), query(2))
        .await
        .unwrap();
    assert_eq!(vec!["1", "2", "3", "4"], keys(&documents));
}

#[tokio::test]
async fn empty_queries_are_not_executed() {
    let store = new_store();
    let cache = TracksCache::default();
    assert!(list_latest(&store, &cache, query(0)).await.unwrap().is_empty());
    let inverted = ListQuery {
        released_after: Some(date("2020-03-01")),
        released_before: Some(date("2020-01-01")),
        ..query(10)
    };
    assert!(list_latest(&store, &cache, inverted).await.unwrap().is_empty());
    assert_eq!(0, cache.entry_count());
}

#[test]
fn narrow_bounds_newest_first() {
    let query = query(10)
        .starting_from(date("2020-02-01"))
        .ending_at(date("2020-01-01"));
    assert_eq!(Some(date("2020-02-01")), query.released_before);
    assert_eq!(Some(date("2020-01-01")), query.released_after);

    // Existing bounds are only ever narrowed
    let query = query
        .starting_from(date("2020-03-01"))
        .ending_at(date("2019-12-01"));
    assert_eq!(Some(date("2020-02-01")), query.released_before);
    assert_eq!(Some(date("2020-01-01")), query.released_after);
}

#[test]
fn narrow_bounds_oldest_first() {
    let query = ListQuery {
        newest_first: false,
        ..query(10)
    }
    .starting_from(date("2020-01-01"))
    .ending_at(date("2020-02-01"));
    assert_eq!(Some(date("2020-01-01")), query.released_after);
    assert_eq!(Some(date("2020-02-01")), query.released_before);
}
