// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::cmp::Ordering;

use crate::subgenre::{self, SubgenreDecodeError, SubgenreGroup, SubgenreToken};

pub mod id;
pub use self::id::{TrackId, TrackIdDecodeError};

pub mod length;
pub use self::length::{LengthParseError, TrackLength, hms_to_seconds};

pub mod release;
pub use self::release::{ReleaseDate, ReleaseDateParseError};

mod source;
pub use self::source::SourcePointer;

/// A single catalogued song entry.
///
/// Tracks are read-only projections of store documents. They are
/// created fresh for every query and never written back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    /// The key of the underlying document in the store
    ///
    /// Not exposed to clients, see [`Track::id()`].
    pub key: String,

    pub name: Option<String>,

    /// The artist(s) of the track
    pub artist: Option<String>,

    /// The record label(s) who released the track
    pub record_label: String,

    pub release_date: ReleaseDate,

    /// Disambiguates tracks with the same label and release date
    pub index_on_label_on_release: i64,

    /// Duration in `[[H:]M:]S` notation, as entered in the spreadsheet
    pub length: Option<String>,

    /// Serialized, arbitrarily nested JSON list of subgenre and operator tokens
    pub subgenres_nested: String,

    pub source: Option<SourcePointer>,
}

impl Track {
    /// The public, stable identifier of this track.
    #[must_use]
    pub fn id(&self) -> TrackId {
        TrackId::from_key(&self.key)
    }

    /// The length in seconds, if available and well-formed.
    #[must_use]
    pub fn length_seconds(&self) -> Option<u32> {
        let length = self.length.as_deref()?;
        length
            .parse::<TrackLength>()
            .ok()
            .map(TrackLength::as_secs)
    }

    pub fn decode_subgenres_nested(&self) -> Result<SubgenreGroup, SubgenreDecodeError> {
        subgenre::decode_nested(&self.subgenres_nested)
    }

    pub fn decode_subgenres_flat(&self) -> Result<Vec<SubgenreToken>, SubgenreDecodeError> {
        subgenre::decode_flat(&self.subgenres_nested)
    }

    /// Deep link into the spreadsheet row this track originates from.
    #[must_use]
    pub fn source_url(&self) -> Option<String> {
        self.source.as_ref().map(SourcePointer::to_url)
    }

    /// Compare two tracks by release date, label, and index on label.
    ///
    /// The direction only applies to the release date. Labels are
    /// compared case-insensitively and always ascending. The document
    /// key is used as a last resort to make the order total.
    #[must_use]
    pub fn cmp_release_order(&self, other: &Self, newest_first: bool) -> Ordering {
        let by_date = self.release_date.cmp(&other.release_date);
        let by_date = if newest_first {
            by_date.reverse()
        } else {
            by_date
        };
        by_date
            .then_with(|| {
                self.record_label
                    .to_lowercase()
                    .cmp(&other.record_label.to_lowercase())
            })
            .then_with(|| {
                self.index_on_label_on_release
                    .cmp(&other.index_on_label_on_release)
            })
            .then_with(|| self.key.cmp(&other.key))
    }
}

pub fn sort_release_order(tracks: &mut [Track], newest_first: bool) {
    tracks.sort_by(|lhs, rhs| lhs.cmp_release_order(rhs, newest_first));
}
