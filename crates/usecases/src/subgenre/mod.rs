// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde_json::Value;

use genreguide_core::{color::GenreColors, genre::Subgenre};
use genreguide_repo::{prelude::*, subgenre as layout};

use super::*;

fn inconsistent(document: &Document, field: &str) -> Error {
    Error::Inconsistent(format!("subgenre {}: invalid field {field}", document.key))
}

fn names(document: &Document, field: &str) -> Result<Vec<String>> {
    let Some(value) = document.field(field) else {
        return Ok(Vec::new());
    };
    let Value::Array(values) = value else {
        return Err(inconsistent(document, field));
    };
    values
        .iter()
        .map(|value| {
            value
                .as_str()
                .map(ToOwned::to_owned)
                .ok_or_else(|| inconsistent(document, field))
        })
        .collect()
}

fn colors(document: &Document) -> Result<Option<GenreColors>> {
    let Some(value) = document.field(layout::COLOR_FIELD) else {
        return Ok(None);
    };
    match value.as_array().map(Vec::as_slice) {
        Some([Value::String(background), Value::String(foreground)]) => Ok(Some(GenreColors {
            background: background.clone(),
            foreground: foreground.clone(),
        })),
        _ => Err(inconsistent(document, layout::COLOR_FIELD)),
    }
}

pub fn map_document_to_subgenre(document: Document) -> Result<Subgenre> {
    let is_genre = match document.field(layout::IS_GENRE_FIELD) {
        None => false,
        Some(Value::Bool(is_genre)) => *is_genre,
        Some(Value::String(is_genre)) => match is_genre.as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => return Err(inconsistent(&document, layout::IS_GENRE_FIELD)),
        },
        Some(_) => return Err(inconsistent(&document, layout::IS_GENRE_FIELD)),
    };
    let genre = document
        .field(layout::GENRE_FIELD)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| inconsistent(&document, layout::GENRE_FIELD))?;
    let origins = names(&document, layout::ORIGINS_FIELD)?;
    let subgenres = names(&document, layout::SUBGENRES_FIELD)?;
    let colors = colors(&document)?;
    let Document { key: name, .. } = document;
    Ok(Subgenre {
        name,
        is_genre,
        genre,
        origins,
        subgenres,
        colors,
    })
}

/// Load a subgenre by its name.
///
/// Names are matched exactly.
pub async fn load_subgenre<S>(store: &S, name: &str) -> Result<Subgenre>
where
    S: DocumentStore,
{
    let not_found = || Error::NotFound(format!("{name} is not a valid subgenre!"));
    let document = store
        .load_document(layout::COLLECTION, name)
        .await
        .optional()?
        .filter(|document| !document.is_empty())
        .ok_or_else(not_found)?;
    map_document_to_subgenre(document)
}

/// All subgenres ordered by name.
pub async fn load_all_subgenres<S>(store: &S) -> Result<Vec<Subgenre>>
where
    S: DocumentStore,
{
    let mut subgenres = store
        .load_all_documents(layout::COLLECTION)
        .await?
        .into_iter()
        .map(map_document_to_subgenre)
        .collect::<Result<Vec<_>>>()?;
    subgenres.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));
    Ok(subgenres)
}

/// All subgenres that are genres, ordered by name.
pub async fn load_all_genres<S>(store: &S) -> Result<Vec<Subgenre>>
where
    S: DocumentStore,
{
    let mut subgenres = load_all_subgenres(store).await?;
    subgenres.retain(|subgenre| subgenre.is_genre);
    Ok(subgenres)
}

/// The colors of a subgenre, inherited from its genre.
///
/// Returns `None` if the genre has no colors.
pub async fn load_colors<S>(store: &S, subgenre: &Subgenre) -> Result<Option<GenreColors>>
where
    S: DocumentStore,
{
    if subgenre.is_genre || subgenre.colors.is_some() {
        return Ok(subgenre.colors.clone());
    }
    let genre = load_subgenre(store, &subgenre.genre).await.map_err(|err| {
        if matches!(err, Error::NotFound(_)) {
            Error::Inconsistent(format!(
                "subgenre {}: unknown genre {}",
                subgenre.name, subgenre.genre
            ))
        } else {
            err
        }
    })?;
    Ok(genre.colors)
}
