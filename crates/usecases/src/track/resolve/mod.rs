// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{cmp::Ordering, sync::Arc, time::Instant};

use genreguide_core::track::{Track, TrackId, sort_release_order};
use genreguide_repo::prelude::*;

use crate::{Error, Result};

use super::{
    cache::TracksCache,
    mapping::map_document_to_track,
    params::{Params, RawParams},
    plan::{self, ListQuery},
};

/// Entry point for all track queries.
///
/// Owns a handle to the store and the cache of listings. Both are
/// shared between clones of the same resolver.
#[derive(Debug)]
pub struct TrackQueryResolver<S> {
    store: Arc<S>,
    cache: TracksCache,
}

impl<S> Clone for TrackQueryResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: self.cache.clone(),
        }
    }
}

impl<S> TrackQueryResolver<S>
where
    S: DocumentStore,
{
    #[must_use]
    pub const fn new(store: Arc<S>, cache: TracksCache) -> Self {
        Self { store, cache }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    #[must_use]
    pub const fn cache(&self) -> &TracksCache {
        &self.cache
    }

    /// Resolve a track listing from raw client arguments.
    #[tracing::instrument(skip(self))]
    pub async fn tracks(&self, params: RawParams) -> Result<Vec<Track>> {
        let params = params.normalize()?;
        self.list_tracks(&params).await
    }

    /// Resolve a track listing from normalized arguments.
    ///
    /// Cursors are looked up in the store and compared by their position
    /// in the listing order, so paging continues beyond the first window.
    /// Unknown cursors are ignored.
    pub async fn list_tracks(&self, params: &Params) -> Result<Vec<Track>> {
        let started = Instant::now();
        let newest_first = params.newest_first;
        let limit = usize::try_from(params.limit).unwrap_or(usize::MAX);
        let after = self.load_cursor(params.after_id.as_ref()).await?;
        let before = self.load_cursor(params.before_id.as_ref()).await?;
        let mut query = params.list_query();
        if let Some(after) = &after {
            query = query.starting_from(after.release_date);
        }
        if let Some(before) = &before {
            query = query.ending_at(before.release_date);
        }
        let mut tracks = self.load_ordered(query).await?;
        if let Some(after) = &after {
            let fetched = tracks.len();
            retain_after(&mut tracks, after, newest_first);
            let skipped = fetched - tracks.len();
            if tracks.len() < limit && fetched >= limit {
                // The skipped tracks occupied part of the window
                let query = ListQuery {
                    limit: query
                        .limit
                        .saturating_add(u32::try_from(skipped).unwrap_or(u32::MAX)),
                    ..query
                };
                tracks = self.load_ordered(query).await?;
                retain_after(&mut tracks, after, newest_first);
            }
        }
        if let Some(before) = &before {
            retain_before(&mut tracks, before, newest_first);
        }
        tracks.truncate(limit);
        log::debug!(
            "Resolved {count} track(s) in {elapsed:?}",
            count = tracks.len(),
            elapsed = started.elapsed(),
        );
        Ok(tracks)
    }

    /// Resolve a single track by its public identifier.
    #[tracing::instrument(skip(self))]
    pub async fn track(&self, id: &TrackId) -> Result<Track> {
        let document = plan::get_by_id(&*self.store, id).await?;
        map_document_to_track(document)
    }

    async fn load_ordered(&self, query: ListQuery) -> Result<Vec<Track>> {
        let documents = plan::list_latest(&*self.store, &self.cache, query).await?;
        let mut tracks = documents
            .iter()
            .cloned()
            .map(map_document_to_track)
            .collect::<Result<Vec<_>>>()?;
        sort_release_order(&mut tracks, query.newest_first);
        Ok(tracks)
    }

    async fn load_cursor(&self, id: Option<&TrackId>) -> Result<Option<Track>> {
        let Some(id) = id else {
            return Ok(None);
        };
        match self.track(id).await {
            Ok(track) => Ok(Some(track)),
            Err(Error::NotFound(_)) => {
                log::debug!("Ignoring unknown cursor {id}");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

/// Keep only the tracks that follow `cursor` in listing order.
pub fn retain_after(tracks: &mut Vec<Track>, cursor: &Track, newest_first: bool) {
    tracks.retain(|track| track.cmp_release_order(cursor, newest_first) == Ordering::Greater);
}

/// Keep only the tracks that precede `cursor` in listing order.
pub fn retain_before(tracks: &mut Vec<Track>, cursor: &Track, newest_first: bool) {
    tracks.retain(|track| track.cmp_release_order(cursor, newest_first) == Ordering::Less);
}
