// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! GraphQL API of the genre database.
//!
//! The schema is assembled from explicit manifests when the server
//! starts. All resolvers obtain the [`TrackQueryResolver`] from the
//! schema data.

pub use async_graphql::dynamic::{Schema, SchemaError};

use genreguide_repo::prelude::*;
use genreguide_usecases::track::TrackQueryResolver;

mod error;
pub use self::error::ErrorCode;

pub mod manifest;

mod query;
mod subgenre;
mod track;

/// Protects against unbounded recursion through the subgenre graph.
pub const MAX_QUERY_DEPTH: usize = 16;

pub(crate) const QUERY_TYPE: &str = "Query";

/// Build the executable schema for the given store.
pub fn build_schema<S>(resolver: TrackQueryResolver<S>) -> Result<Schema, SchemaError>
where
    S: DocumentStore + 'static,
{
    let builder = Schema::build(QUERY_TYPE, None, None)
        .register(query::query_manifest::<S>().into_object())
        .register(track::date_scalar())
        .register(track::track_manifest().into_object());
    subgenre::register_types::<S>(builder)
        .limit_depth(MAX_QUERY_DEPTH)
        .data(resolver)
        .finish()
}

#[cfg(test)]
mod tests;
