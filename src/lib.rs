// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Content API for a curated music genre database.
//!
//! The domain model is always available. Storage, use cases, and the
//! GraphQL schema are enabled by features.

pub use genreguide_core::*;

#[cfg(feature = "repo")]
pub use genreguide_repo as repo;

#[cfg(feature = "redis")]
pub use genreguide_repo_redis as repo_redis;

#[cfg(feature = "usecases")]
pub use genreguide_usecases as usecases;

#[cfg(feature = "graphql")]
pub use genreguide_graphql as graphql;
