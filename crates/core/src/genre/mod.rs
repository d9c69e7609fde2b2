// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::color::GenreColors;

/// A subgenre of the genre sheet.
///
/// Genres are subgenres with their own category and color. Every
/// subgenre belongs to exactly one genre which may be itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subgenre {
    /// E.g. "Brostep"
    pub name: String,

    pub is_genre: bool,

    /// Name of the category that this subgenre inherits its color from
    pub genre: String,

    /// Subgenres that this subgenre directly originates from
    pub origins: Vec<String>,

    /// Subgenres that directly originate from this subgenre
    pub subgenres: Vec<String>,

    /// Only available for genres
    pub colors: Option<GenreColors>,
}
