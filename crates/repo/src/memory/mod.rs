// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Volatile document store for tests and for running without a database.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

use anyhow::Context as _;

use crate::{cmp_field_values, prelude::*};

type Collection = BTreeMap<DocumentKey, Fields>;

/// Initial contents, i.e. `{ "<collection>": { "<key>": { <fields> } } }`.
pub type Seed = HashMap<String, Collection>;

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    collections: HashMap<String, Collection>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_seed(seed: Seed) -> Self {
        Self { collections: seed }
    }

    pub fn load_seed_file(path: &Path) -> anyhow::Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        let seed: Seed = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing seed file {}", path.display()))?;
        log::info!(
            "Loaded {num_documents} document(s) in {num_collections} collection(s) from {path}",
            num_documents = seed.values().map(BTreeMap::len).sum::<usize>(),
            num_collections = seed.len(),
            path = path.display(),
        );
        Ok(Self::from_seed(seed))
    }

    pub fn insert(&mut self, collection: &str, key: impl Into<DocumentKey>, fields: Fields) {
        self.collections
            .entry(collection.to_owned())
            .or_default()
            .insert(key.into(), fields);
    }

    fn collection(&self, collection: &str) -> Option<&Collection> {
        self.collections.get(collection)
    }
}

impl DocumentStore for InMemoryStore {
    async fn load_document(&self, collection: &str, key: &str) -> RepoResult<Document> {
        self.collection(collection)
            .and_then(|documents| documents.get(key))
            .map(|fields| Document::new(key, fields.clone()))
            .ok_or(RepoError::NotFound)
    }

    async fn query_range(&self, collection: &str, query: &RangeQuery) -> RepoResult<Vec<Document>> {
        let Some(documents) = self.collection(collection) else {
            return Ok(Vec::new());
        };
        let mut matches: Vec<_> = documents
            .iter()
            .filter_map(|(key, fields)| {
                let value = fields.get(query.order_by).filter(|value| !value.is_null())?;
                query.contains(value).then_some((key, value, fields))
            })
            .collect();
        // Keys are unique and already sorted, so the sort is stable
        // for documents with equal values.
        matches.sort_by(|(_, lhs, _), (_, rhs, _)| {
            let ord = cmp_field_values(lhs, rhs).unwrap_or(Ordering::Equal);
            match query.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(matches
            .into_iter()
            .take(limit)
            .map(|(key, _, fields)| Document::new(key.clone(), fields.clone()))
            .collect())
    }

    async fn load_all_documents(&self, collection: &str) -> RepoResult<Vec<Document>> {
        Ok(self
            .collection(collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(key, fields)| Document::new(key.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
