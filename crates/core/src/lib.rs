// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Domain model of the genre database.
//!
//! Everything in here is pure and free of I/O. Documents fetched from
//! the store are mapped into these types by the use cases.

pub mod color;
pub mod genre;
pub mod subgenre;
pub mod track;

pub use self::{
    genre::Subgenre,
    subgenre::{Operator, SubgenreGroup, SubgenreGroupItem, SubgenreToken},
    track::{ReleaseDate, SourcePointer, Track, TrackId, TrackLength},
};
