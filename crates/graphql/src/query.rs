// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::dynamic::{FieldFuture, FieldValue, InputValue, ResolverContext, TypeRef};

use genreguide_core::{genre::Subgenre, track::TrackId};
use genreguide_repo::prelude::*;
use genreguide_usecases::{
    subgenre as uc,
    track::{
        RawParams, TrackQueryResolver,
        params::{DEFAULT_LIMIT, MAX_LIMIT},
    },
};

use crate::{
    QUERY_TYPE,
    error::into_graphql_error,
    manifest::{FieldManifest, ObjectManifest},
    subgenre::{SUBGENRE_TYPE, SubgenreNode, subgenre_value},
    track::{DATE_SCALAR, TRACK_TYPE},
};

fn string_arg(ctx: &ResolverContext<'_>, name: &str) -> async_graphql::Result<Option<String>> {
    ctx.args
        .get(name)
        .filter(|value| !value.is_null())
        .map(|value| value.string().map(ToOwned::to_owned))
        .transpose()
}

fn raw_params(ctx: &ResolverContext<'_>) -> async_graphql::Result<RawParams> {
    let newest_first = ctx
        .args
        .get("newestFirst")
        .filter(|value| !value.is_null())
        .map(|value| value.boolean())
        .transpose()?;
    let limit = ctx
        .args
        .get("limit")
        .filter(|value| !value.is_null())
        .map(|value| value.i64())
        .transpose()?;
    Ok(RawParams {
        before_date: string_arg(ctx, "beforeDate")?,
        after_date: string_arg(ctx, "afterDate")?,
        before_id: string_arg(ctx, "beforeID")?,
        after_id: string_arg(ctx, "afterID")?,
        newest_first,
        limit,
    })
}

fn subgenres_value<'a>(subgenres: Vec<Subgenre>) -> FieldValue<'a> {
    FieldValue::list(
        subgenres
            .into_iter()
            .map(SubgenreNode::loaded)
            .map(subgenre_value),
    )
}

pub(crate) fn query_manifest<S>() -> ObjectManifest
where
    S: DocumentStore + 'static,
{
    ObjectManifest::new(
        QUERY_TYPE,
        "Read-only queries of the genre database.",
        vec![
            FieldManifest::new("tracks", TypeRef::named_nn_list_nn(TRACK_TYPE), |ctx| {
                FieldFuture::new(async move {
                    let resolver = ctx.data::<TrackQueryResolver<S>>()?;
                    let params = raw_params(&ctx)?;
                    let tracks = resolver.tracks(params).await.map_err(into_graphql_error)?;
                    Ok(Some(FieldValue::list(
                        tracks.into_iter().map(FieldValue::owned_any),
                    )))
                })
            })
            .description(
                "Tracks ordered by release date, record label, and index on the label. Only \
                 the latest tracks up to the limit are considered before the cursors are \
                 applied.",
            )
            .argument(
                InputValue::new("beforeDate", TypeRef::named(DATE_SCALAR))
                    .description("Only tracks released on or before this date"),
            )
            .argument(
                InputValue::new("afterDate", TypeRef::named(DATE_SCALAR))
                    .description("Only tracks released on or after this date"),
            )
            .argument(
                InputValue::new("beforeID", TypeRef::named(TypeRef::ID))
                    .description("Only tracks that precede the track with this id"),
            )
            .argument(
                InputValue::new("afterID", TypeRef::named(TypeRef::ID))
                    .description("Only tracks that follow the track with this id"),
            )
            .argument(
                InputValue::new("newestFirst", TypeRef::named(TypeRef::BOOLEAN))
                    .default_value(true),
            )
            .argument(
                InputValue::new("limit", TypeRef::named(TypeRef::INT))
                    .description(format!("Clamped into the range from 0 to {MAX_LIMIT}"))
                    .default_value(DEFAULT_LIMIT),
            ),
            FieldManifest::new("track", TypeRef::named(TRACK_TYPE), |ctx| {
                FieldFuture::new(async move {
                    let resolver = ctx.data::<TrackQueryResolver<S>>()?;
                    let id = TrackId::from(ctx.args.try_get("id")?.string()?.to_owned());
                    let track = resolver.track(&id).await.map_err(into_graphql_error)?;
                    Ok(Some(FieldValue::owned_any(track)))
                })
            })
            .description("A single track. Fails with `NOT_FOUND` if there is no track with this id.")
            .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID))),
            FieldManifest::new("allSubgenres", TypeRef::named_nn_list_nn(SUBGENRE_TYPE), |ctx| {
                FieldFuture::new(async move {
                    let resolver = ctx.data::<TrackQueryResolver<S>>()?;
                    let subgenres = uc::load_all_subgenres(resolver.store().as_ref())
                        .await
                        .map_err(into_graphql_error)?;
                    Ok(Some(subgenres_value(subgenres)))
                })
            })
            .description("All subgenres ordered by name"),
            FieldManifest::new("allGenres", TypeRef::named_nn_list_nn(SUBGENRE_TYPE), |ctx| {
                FieldFuture::new(async move {
                    let resolver = ctx.data::<TrackQueryResolver<S>>()?;
                    let genres = uc::load_all_genres(resolver.store().as_ref())
                        .await
                        .map_err(into_graphql_error)?;
                    Ok(Some(subgenres_value(genres)))
                })
            })
            .description("All main categories ordered by name"),
            FieldManifest::new("subgenre", TypeRef::named_nn(SUBGENRE_TYPE), |ctx| {
                FieldFuture::new(async move {
                    let resolver = ctx.data::<TrackQueryResolver<S>>()?;
                    let name = ctx.args.try_get("name")?;
                    let subgenre = uc::load_subgenre(resolver.store().as_ref(), name.string()?)
                        .await
                        .map_err(into_graphql_error)?;
                    Ok(Some(subgenre_value(SubgenreNode::loaded(subgenre))))
                })
            })
            .description("A subgenre by its exact name")
            .argument(InputValue::new("name", TypeRef::named_nn(TypeRef::STRING))),
        ],
    )
}
