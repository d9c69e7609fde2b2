// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Document layout of tracks.

pub const COLLECTION: &str = "tracks";

pub const NAME_FIELD: &str = "name";
pub const ARTIST_FIELD: &str = "artist";
pub const RECORD_LABEL_FIELD: &str = "recordLabel";

/// ISO 8601 date string, the only field that supports range queries
pub const RELEASE_DATE_FIELD: &str = "releaseDate";

pub const INDEX_ON_LABEL_ON_RELEASE_FIELD: &str = "indexOnLabelOnRelease";
pub const LENGTH_FIELD: &str = "length";
pub const SUBGENRES_NESTED_FIELD: &str = "subgenresNested";
pub const SOURCE_SHEET_ID_FIELD: &str = "sourceSheetID";
pub const SOURCE_TAB_ID_FIELD: &str = "sourceTabID";
pub const SOURCE_ROW_FIELD: &str = "sourceRow";

/// Fields with JSON encoded values in stores that only hold strings
pub const STRUCTURED_FIELDS: &[&str] = &[INDEX_ON_LABEL_ON_RELEASE_FIELD, SOURCE_ROW_FIELD];
