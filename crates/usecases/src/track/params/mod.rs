// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::anyhow;

use genreguide_core::track::{ReleaseDate, TrackId};

use crate::{InputError, InputResult};

use super::plan::ListQuery;

pub const DEFAULT_LIMIT: u32 = 50;

pub const MAX_LIMIT: u32 = 500;

/// Arguments of a track listing as received from the client.
///
/// All arguments are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    /// ISO 8601 date, inclusive upper bound of the release date
    pub before_date: Option<String>,

    /// ISO 8601 date, inclusive lower bound of the release date
    pub after_date: Option<String>,

    /// Only return tracks that precede the track with this id
    pub before_id: Option<String>,

    /// Only return tracks that follow the track with this id
    pub after_id: Option<String>,

    pub newest_first: Option<bool>,

    pub limit: Option<i64>,
}

/// Normalized, validated arguments of a track listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub released_before: Option<ReleaseDate>,
    pub released_after: Option<ReleaseDate>,
    pub before_id: Option<TrackId>,
    pub after_id: Option<TrackId>,
    pub newest_first: bool,
    pub limit: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            released_before: None,
            released_after: None,
            before_id: None,
            after_id: None,
            newest_first: true,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Params {
    /// The part of the arguments that is resolved by the store.
    ///
    /// Cursors are not included. They narrow the date bounds once
    /// the referenced tracks have been loaded.
    #[must_use]
    pub fn list_query(&self) -> ListQuery {
        let Self {
            released_before,
            released_after,
            newest_first,
            limit,
            ..
        } = self;
        ListQuery {
            limit: *limit,
            newest_first: *newest_first,
            released_after: *released_after,
            released_before: *released_before,
        }
    }
}

/// Clamp the requested limit into `[0, MAX_LIMIT]`.
#[must_use]
pub fn clamp_limit(limit: i64) -> u32 {
    u32::try_from(limit.clamp(0, MAX_LIMIT.into())).unwrap_or(MAX_LIMIT)
}

fn parse_date(arg: &str, input: &str) -> InputResult<ReleaseDate> {
    input
        .parse()
        .map_err(|err| InputError(anyhow!("argument {arg}: {err}")))
}

fn non_empty(input: Option<String>) -> Option<String> {
    input.filter(|input| !input.trim().is_empty())
}

impl RawParams {
    pub fn normalize(self) -> InputResult<Params> {
        let Self {
            before_date,
            after_date,
            before_id,
            after_id,
            newest_first,
            limit,
        } = self;
        let released_before = non_empty(before_date)
            .map(|input| parse_date("beforeDate", &input))
            .transpose()?;
        let released_after = non_empty(after_date)
            .map(|input| parse_date("afterDate", &input))
            .transpose()?;
        if let (Some(before), Some(after)) = (released_before, released_after) {
            if before < after {
                log::debug!("Empty release date range: {after} - {before}");
            }
        }
        Ok(Params {
            released_before,
            released_after,
            before_id: non_empty(before_id).map(TrackId::from),
            after_id: non_empty(after_id).map(TrackId::from),
            newest_first: newest_first.unwrap_or(true),
            limit: limit.map_or(DEFAULT_LIMIT, clamp_limit),
        })
    }
}

#[cfg(test)]
mod tests;
