// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Translation of normalized arguments into store queries.

use serde_json::Value;

use genreguide_core::track::{ReleaseDate, TrackId};
use genreguide_repo::{prelude::*, track as layout};

use crate::{Error, Result};

use super::cache::{CachedDocuments, TracksCache};

/// A bounded window over the release date index.
///
/// Serves as the cache key of track listings. All fields affect the
/// result and must be part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListQuery {
    pub limit: u32,
    pub newest_first: bool,
    pub released_after: Option<ReleaseDate>,
    pub released_before: Option<ReleaseDate>,
}

impl ListQuery {
    #[must_use]
    pub fn range_query(&self) -> RangeQuery {
        let Self {
            limit,
            newest_first,
            released_after,
            released_before,
        } = self;
        let direction = if *newest_first {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        RangeQuery {
            order_by: layout::RELEASE_DATE_FIELD,
            direction,
            min: released_after.map(date_value),
            max: released_before.map(date_value),
            limit: (*limit).into(),
        }
    }

    /// Exclude tracks that precede `date` in listing order.
    #[must_use]
    pub fn starting_from(mut self, date: ReleaseDate) -> Self {
        if self.newest_first {
            self.released_before = Some(self.released_before.map_or(date, |max| max.min(date)));
        } else {
            self.released_after = Some(self.released_after.map_or(date, |min| min.max(date)));
        }
        self
    }

    /// Exclude tracks that follow `date` in listing order.
    #[must_use]
    pub fn ending_at(mut self, date: ReleaseDate) -> Self {
        if self.newest_first {
            self.released_after = Some(self.released_after.map_or(date, |min| min.max(date)));
        } else {
            self.released_before = Some(self.released_before.map_or(date, |max| max.min(date)));
        }
        self
    }

    fn is_empty(&self) -> bool {
        if self.limit == 0 {
            return true;
        }
        matches!(
            (self.released_after, self.released_before),
            (Some(after), Some(before)) if before < after
        )
    }
}

fn date_value(date: ReleaseDate) -> Value {
    Value::String(date.to_string())
}

/// Fetch the documents of a listing, either from the cache or the store.
///
/// The documents are returned in index order which is only
/// approximately the final order. All documents that share the release
/// date of the last document within the limit are included, i.e. the
/// result may exceed the limit. Which tracks survive the final cut then
/// does not depend on how the store orders documents with equal dates.
pub async fn list_latest<S>(
    store: &S,
    cache: &TracksCache,
    query: ListQuery,
) -> Result<CachedDocuments>
where
    S: DocumentStore,
{
    if query.is_empty() {
        return Ok(Default::default());
    }
    cache
        .get_or_try_load(query, query_range_with_ties(store, query.range_query()))
        .await
}

async fn query_range_with_ties<S>(
    store: &S,
    mut range_query: RangeQuery,
) -> RepoResult<Vec<Document>>
where
    S: DocumentStore,
{
    let limit = usize::try_from(range_query.limit).unwrap_or(usize::MAX);
    // One more to detect if the limit cuts through documents of the same date
    range_query.limit = range_query.limit.saturating_add(1);
    let mut documents = store.query_range(layout::COLLECTION, &range_query).await?;
    if documents.len() <= limit {
        return Ok(documents);
    }
    let boundary = documents[limit]
        .field(layout::RELEASE_DATE_FIELD)
        .cloned();
    documents.truncate(limit);
    let Some(boundary) = boundary else {
        return Ok(documents);
    };
    let is_boundary =
        |document: &Document| document.field(layout::RELEASE_DATE_FIELD) == Some(&boundary);
    if !documents.last().is_some_and(is_boundary) {
        return Ok(documents);
    }
    documents.retain(|document| !is_boundary(document));
    let ties_query = RangeQuery {
        min: Some(boundary.clone()),
        max: Some(boundary.clone()),
        limit: PaginationLimit::MAX,
        ..range_query
    };
    let ties = store.query_range(layout::COLLECTION, &ties_query).await?;
    log::debug!(
        "Fetched {num_ties} document(s) released on {boundary}",
        num_ties = ties.len(),
    );
    documents.extend(ties);
    Ok(documents)
}

/// Load the document of a single track.
///
/// Identifiers that cannot be decoded are treated like identifiers
/// of tracks that do not exist.
pub async fn get_by_id<S>(store: &S, id: &TrackId) -> Result<Document>
where
    S: DocumentStore,
{
    let not_found = || Error::NotFound(format!("track {id} does not exist"));
    let key = id.decode_key().map_err(|err| {
        log::debug!("Failed to decode track id {id}: {err}");
        not_found()
    })?;
    let document = store
        .load_document(layout::COLLECTION, &key)
        .await
        .optional()?
        .ok_or_else(not_found)?;
    if document.is_empty() {
        return Err(not_found());
    }
    Ok(document)
}

#[cfg(test)]
mod tests;
