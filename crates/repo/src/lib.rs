// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{cmp::Ordering, future::Future};

use serde_json::Value;

pub mod memory;
pub mod subgenre;
pub mod track;

use self::prelude::*;

pub type DocumentKey = String;

pub type Fields = serde_json::Map<String, Value>;

/// An opaque record of the document store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub key: DocumentKey,
    pub fields: Fields,
}

impl Document {
    #[must_use]
    pub fn new(key: impl Into<DocumentKey>, fields: Fields) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    /// A document without any fields, i.e. a dangling reference.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordered range query on a single field.
///
/// Both bounds are inclusive. Documents without a value for the
/// ordering field are not part of the result.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeQuery {
    pub order_by: &'static str,
    pub direction: SortDirection,
    pub min: Option<Value>,
    pub max: Option<Value>,
    pub limit: PaginationLimit,
}

impl RangeQuery {
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        let above_min = self.min.as_ref().is_none_or(|min| {
            matches!(
                cmp_field_values(min, value),
                Some(Ordering::Less | Ordering::Equal)
            )
        });
        let below_max = self.max.as_ref().is_none_or(|max| {
            matches!(
                cmp_field_values(value, max),
                Some(Ordering::Less | Ordering::Equal)
            )
        });
        above_min && below_max
    }
}

/// Compare scalar field values.
///
/// Only numbers with numbers and strings with strings are comparable.
#[must_use]
pub fn cmp_field_values(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::Number(lhs), Value::Number(rhs)) => lhs.as_f64()?.partial_cmp(&rhs.as_f64()?),
        (Value::String(lhs), Value::String(rhs)) => Some(lhs.cmp(rhs)),
        _ => None,
    }
}

/// Fields of a collection that stores without native support for
/// structured values keep JSON encoded.
///
/// All other fields are plain strings.
#[must_use]
pub fn structured_fields(collection: &str) -> &'static [&'static str] {
    match collection {
        track::COLLECTION => track::STRUCTURED_FIELDS,
        subgenre::COLLECTION => subgenre::STRUCTURED_FIELDS,
        _ => &[],
    }
}

/// Read access to an external document database.
///
/// Documents are grouped into named collections and addressed by key
/// within a collection.
pub trait DocumentStore: Send + Sync {
    /// Point lookup by collection and key.
    ///
    /// Fails with [`RepoError::NotFound`] if the document does not exist.
    fn load_document(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = RepoResult<Document>> + Send;

    /// Ordered and bounded range query.
    ///
    /// Documents that are referenced by an index but have no data are
    /// returned empty instead of being skipped.
    fn query_range(
        &self,
        collection: &str,
        query: &RangeQuery,
    ) -> impl Future<Output = RepoResult<Vec<Document>>> + Send;

    /// All documents of a collection in unspecified order.
    fn load_all_documents(
        &self,
        collection: &str,
    ) -> impl Future<Output = RepoResult<Vec<Document>>> + Send;
}

pub mod prelude {
    use thiserror::Error;

    pub use super::{Document, DocumentKey, DocumentStore, Fields, RangeQuery, SortDirection};

    pub type PaginationLimit = u64;

    #[derive(Error, Debug)]
    pub enum RepoError {
        #[error("not found")]
        NotFound,

        #[error("aborted")]
        Aborted,

        #[error(transparent)]
        Other(#[from] anyhow::Error),
    }

    pub type RepoResult<T> = Result<T, RepoError>;

    pub trait OptionalRepoResult<T> {
        fn optional(self) -> RepoResult<Option<T>>;
    }

    impl<T> OptionalRepoResult<T> for Result<T, RepoError> {
        fn optional(self) -> RepoResult<Option<T>> {
            self.map_or_else(
                |err| {
                    if matches!(err, RepoError::NotFound) {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                },
                |val| Ok(Some(val)),
            )
        }
    }
}

#[cfg(test)]
mod tests;
