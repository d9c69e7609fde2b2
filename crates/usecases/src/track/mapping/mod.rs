// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Mapping of raw store documents onto tracks.

use serde_json::Value;

use genreguide_core::track::{ReleaseDate, SourcePointer, Track};
use genreguide_repo::{prelude::*, track as layout};

use crate::{Error, Result};

/// Used when a track has not been tagged with any subgenres.
const EMPTY_SUBGENRES_NESTED: &str = "[]";

fn inconsistent(document: &Document, field: &str, what: &str) -> Error {
    Error::Inconsistent(format!("track {}: {what} field {field}", document.key))
}

fn string_value(value: &Value) -> Option<String> {
    match value {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}

fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(value) => value.as_i64(),
        Value::String(value) => value.trim().parse().ok(),
        _ => None,
    }
}

fn optional_string(document: &Document, field: &str) -> Result<Option<String>> {
    document
        .field(field)
        .map(|value| string_value(value).ok_or_else(|| inconsistent(document, field, "invalid")))
        .transpose()
}

fn required_string(document: &Document, field: &str) -> Result<String> {
    optional_string(document, field)?.ok_or_else(|| inconsistent(document, field, "missing"))
}

fn optional_integer(document: &Document, field: &str) -> Result<Option<i64>> {
    document
        .field(field)
        .map(|value| integer_value(value).ok_or_else(|| inconsistent(document, field, "invalid")))
        .transpose()
}

fn required_integer(document: &Document, field: &str) -> Result<i64> {
    optional_integer(document, field)?.ok_or_else(|| inconsistent(document, field, "missing"))
}

fn subgenres_nested(document: &Document) -> String {
    match document.field(layout::SUBGENRES_NESTED_FIELD) {
        None => EMPTY_SUBGENRES_NESTED.to_owned(),
        Some(Value::String(json)) => json.clone(),
        Some(value) => value.to_string(),
    }
}

fn source_pointer(document: &Document) -> Result<Option<SourcePointer>> {
    let sheet_id = optional_string(document, layout::SOURCE_SHEET_ID_FIELD)?;
    let tab_id = optional_string(document, layout::SOURCE_TAB_ID_FIELD)?;
    let row = optional_integer(document, layout::SOURCE_ROW_FIELD)?
        .map(|row| {
            u32::try_from(row)
                .map_err(|_| inconsistent(document, layout::SOURCE_ROW_FIELD, "invalid"))
        })
        .transpose()?;
    let (Some(sheet_id), Some(tab_id), Some(row)) = (sheet_id, tab_id, row) else {
        return Ok(None);
    };
    Ok(Some(SourcePointer {
        sheet_id,
        tab_id,
        row,
    }))
}

/// Map a document onto a track.
///
/// Fails if the document is empty or if any of the fields that are
/// needed for ordering is missing or malformed. Documents are never
/// skipped silently.
pub fn map_document_to_track(document: Document) -> Result<Track> {
    if document.is_empty() {
        return Err(Error::Inconsistent(format!(
            "track {} is indexed but has no data",
            document.key
        )));
    }
    let release_date = required_string(&document, layout::RELEASE_DATE_FIELD)?
        .parse::<ReleaseDate>()
        .map_err(|err| {
            log::warn!("{err}");
            inconsistent(&document, layout::RELEASE_DATE_FIELD, "invalid")
        })?;
    let record_label = required_string(&document, layout::RECORD_LABEL_FIELD)?;
    let index_on_label_on_release =
        required_integer(&document, layout::INDEX_ON_LABEL_ON_RELEASE_FIELD)?;
    let name = optional_string(&document, layout::NAME_FIELD)?;
    let artist = optional_string(&document, layout::ARTIST_FIELD)?;
    let length = optional_string(&document, layout::LENGTH_FIELD)?;
    let subgenres_nested = subgenres_nested(&document);
    let source = source_pointer(&document)?;
    let Document { key, .. } = document;
    Ok(Track {
        key,
        name,
        artist,
        record_label,
        release_date,
        index_on_label_on_release,
        length,
        subgenres_nested,
        source,
    })
}
