// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use thiserror::Error;

/// Calendar date of a release, without time zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseDate(Date);

#[derive(Debug, Error)]
#[error("invalid release date {input:?}: {source}")]
pub struct ReleaseDateParseError {
    input: String,
    source: jiff::Error,
}

impl ReleaseDate {
    pub fn new(year: i16, month: i8, day: i8) -> Result<Self, jiff::Error> {
        Date::new(year, month, day).map(Self)
    }

    #[must_use]
    pub const fn to_inner(self) -> Date {
        let Self(inner) = self;
        inner
    }

    /// Encode the date as a sortable integer `YYYYMMDD`.
    ///
    /// The encoding preserves the chronological order and is used as
    /// the score in range indexes.
    #[must_use]
    pub fn to_yyyymmdd(self) -> i64 {
        let Self(date) = self;
        i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
    }
}

impl From<Date> for ReleaseDate {
    fn from(from: Date) -> Self {
        Self(from)
    }
}

impl FromStr for ReleaseDate {
    type Err = ReleaseDateParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        input
            .trim()
            .parse::<Date>()
            .map(Self)
            .map_err(|source| ReleaseDateParseError {
                input: input.to_owned(),
                source,
            })
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(date) = self;
        // ISO 8601, i.e. YYYY-MM-DD
        write!(f, "{date}")
    }
}
