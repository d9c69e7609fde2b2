// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Document layout of subgenres, keyed by name.

pub const COLLECTION: &str = "subgenres";

pub const IS_GENRE_FIELD: &str = "isGenre";
pub const GENRE_FIELD: &str = "genre";
pub const ORIGINS_FIELD: &str = "origins";
pub const SUBGENRES_FIELD: &str = "subgenres";

/// `[background, foreground]` hex codes, only present for genres
pub const COLOR_FIELD: &str = "color";

/// Fields with JSON encoded values in stores that only hold strings
pub const STRUCTURED_FIELDS: &[&str] = &[IS_GENRE_FIELD, ORIGINS_FIELD, SUBGENRES_FIELD, COLOR_FIELD];
