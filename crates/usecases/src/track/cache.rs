// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future::Future, sync::Arc, time::Duration};

use anyhow::anyhow;
use moka::future::Cache;

use genreguide_repo::prelude::*;

use crate::{Error, Result};

use super::plan::ListQuery;

pub const DEFAULT_MAX_CAPACITY: u64 = 64;

pub const DEFAULT_TIME_TO_LIVE: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracksCacheConfig {
    /// Maximum number of distinct listings
    pub max_capacity: u64,

    /// Entries expire after this period to pick up changes in the store
    pub time_to_live: Duration,
}

impl Default for TracksCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_MAX_CAPACITY,
            time_to_live: DEFAULT_TIME_TO_LIVE,
        }
    }
}

pub type CachedDocuments = Arc<Vec<Document>>;

/// Memoized results of track listings.
///
/// Keyed by the complete [`ListQuery`]. Concurrent requests for the
/// same key are coalesced into a single store query. Failed queries
/// are not cached.
///
/// Cloning is cheap and all clones share the same entries.
#[derive(Debug, Clone)]
pub struct TracksCache {
    entries: Cache<ListQuery, CachedDocuments>,
}

impl TracksCache {
    #[must_use]
    pub fn new(config: TracksCacheConfig) -> Self {
        let TracksCacheConfig {
            max_capacity,
            time_to_live,
        } = config;
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(time_to_live)
            .build();
        Self { entries }
    }

    /// Discard all entries, e.g. after the store has been updated.
    pub fn invalidate_all(&self) {
        log::info!("Invalidating all cached track listings");
        self.entries.invalidate_all();
    }

    /// Approximate number of entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    pub(crate) async fn get_or_try_load<F>(
        &self,
        query: ListQuery,
        load: F,
    ) -> Result<CachedDocuments>
    where
        F: Future<Output = RepoResult<Vec<Document>>>,
    {
        self.entries
            .try_get_with(query, async move {
                log::debug!("Loading track listing {query:?}");
                load.await.map(Arc::new)
            })
            .await
            .map_err(shared_repo_error)
    }
}

impl Default for TracksCache {
    fn default() -> Self {
        Self::new(TracksCacheConfig::default())
    }
}

fn shared_repo_error(err: Arc<RepoError>) -> Error {
    match Arc::try_unwrap(err) {
        Ok(err) => err.into(),
        Err(shared) => match &*shared {
            RepoError::NotFound => RepoError::NotFound.into(),
            RepoError::Aborted => RepoError::Aborted.into(),
            RepoError::Other(err) => RepoError::Other(anyhow!("{err:#}")).into(),
        },
    }
}
