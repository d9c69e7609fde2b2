// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::{
    Value,
    dynamic::{FieldFuture, FieldValue, Scalar, TypeRef},
};

use genreguide_core::{
    subgenre::{SubgenreGroup, SubgenreToken},
    track::Track,
};

use crate::{
    manifest::{FieldManifest, ObjectManifest},
    subgenre::{SUBGENRE_GROUP_TYPE, SUBGENRE_TOKEN_TYPE, token_value},
};

pub(crate) const TRACK_TYPE: &str = "Track";

pub(crate) const DATE_SCALAR: &str = "Date";

pub(crate) fn date_scalar() -> Scalar {
    Scalar::new(DATE_SCALAR)
        .description("A calendar date in ISO 8601 format, e.g. `2021-05-07`")
        .validator(|value| matches!(value, Value::String(_)))
}

/// A field whose value is computed synchronously from the track.
fn derived_field<F>(name: &'static str, type_ref: TypeRef, derive: F) -> FieldManifest
where
    F: Fn(&Track) -> Option<Value> + Send + Sync + 'static,
{
    FieldManifest::new(name, type_ref, move |ctx| {
        let value = ctx.parent_value.try_downcast_ref::<Track>().map(&derive);
        FieldFuture::new(async move { value })
    })
}

fn subgenre_group(track: &Track) -> SubgenreGroup {
    track.decode_subgenres_nested().unwrap_or_else(|err| {
        log::warn!(
            "Failed to decode subgenres of track {key}: {err} in {raw:?}",
            key = track.key,
            raw = track.subgenres_nested,
        );
        SubgenreGroup::default()
    })
}

fn subgenre_tokens(track: &Track) -> Vec<SubgenreToken> {
    track.decode_subgenres_flat().unwrap_or_else(|err| {
        log::warn!(
            "Failed to decode subgenres of track {key}: {err} in {raw:?}",
            key = track.key,
            raw = track.subgenres_nested,
        );
        Vec::new()
    })
}

#[allow(clippy::too_many_lines)]
pub(crate) fn track_manifest() -> ObjectManifest {
    ObjectManifest::new(
        TRACK_TYPE,
        "A single catalogued song entry.",
        vec![
            derived_field("id", TypeRef::named_nn(TypeRef::ID), |track| {
                Some(track.id().into_inner().into())
            })
            .description("Stable, opaque identifier of the track"),
            derived_field("name", TypeRef::named(TypeRef::STRING), |track| {
                track.name.clone().map(Into::into)
            }),
            derived_field("artist", TypeRef::named(TypeRef::STRING), |track| {
                track.artist.clone().map(Into::into)
            })
            .description("The artist(s) of the track"),
            derived_field("releaseDate", TypeRef::named_nn(DATE_SCALAR), |track| {
                Some(track.release_date.to_string().into())
            }),
            derived_field("recordLabel", TypeRef::named_nn(TypeRef::STRING), |track| {
                Some(track.record_label.clone().into())
            })
            .description("The record label(s) who released the track"),
            derived_field(
                "indexOnLabelOnRelease",
                TypeRef::named_nn(TypeRef::INT),
                |track| Some(track.index_on_label_on_release.into()),
            )
            .description("Position among the tracks of the same label and release date"),
            derived_field("length", TypeRef::named(TypeRef::STRING), |track| {
                track.length.clone().map(Into::into)
            })
            .description("Duration in `[[H:]M:]S` notation"),
            derived_field("lengthSeconds", TypeRef::named(TypeRef::INT), |track| {
                track.length_seconds().map(Into::into)
            })
            .description("Duration in seconds, null if the length is unknown or malformed"),
            derived_field(
                "subgenresNested",
                TypeRef::named_nn(TypeRef::STRING),
                |track| Some(track.subgenres_nested.clone().into()),
            )
            .description("Serialized, nested JSON list of subgenres and operators"),
            FieldManifest::new(
                "subgenresNestedAsSubgenres",
                TypeRef::named_nn(SUBGENRE_GROUP_TYPE),
                |ctx| {
                    FieldFuture::new(async move {
                        let track = ctx.parent_value.try_downcast_ref::<Track>()?;
                        Ok(Some(FieldValue::owned_any(subgenre_group(track))))
                    })
                },
            )
            .description(
                "Subgenres and operators with their grouping preserved. Empty if the subgenres \
                 cannot be decoded.",
            ),
            FieldManifest::new(
                "subgenresFlat",
                TypeRef::named_nn_list_nn(SUBGENRE_TOKEN_TYPE),
                |ctx| {
                    FieldFuture::new(async move {
                        let track = ctx.parent_value.try_downcast_ref::<Track>()?;
                        let tokens = subgenre_tokens(track).into_iter().map(token_value);
                        Ok(Some(FieldValue::list(tokens)))
                    })
                },
            )
            .description(
                "Subgenres and operators without any grouping. Empty if the subgenres cannot be \
                 decoded.",
            ),
            derived_field("sourceSheetID", TypeRef::named(TypeRef::STRING), |track| {
                track
                    .source
                    .as_ref()
                    .map(|source| source.sheet_id.clone().into())
            }),
            derived_field("sourceTabID", TypeRef::named(TypeRef::STRING), |track| {
                track
                    .source
                    .as_ref()
                    .map(|source| source.tab_id.clone().into())
            }),
            derived_field("sourceRow", TypeRef::named(TypeRef::INT), |track| {
                track.source.as_ref().map(|source| source.row.into())
            }),
            derived_field("source", TypeRef::named(TypeRef::STRING), |track| {
                track.source_url().map(Into::into)
            })
            .description("Link to the row of the spreadsheet that this track originates from"),
            derived_field("image", TypeRef::named(TypeRef::STRING), |_| None)
                .description("Not available yet, always null"),
        ],
    )
}
