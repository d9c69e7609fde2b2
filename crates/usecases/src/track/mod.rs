// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod cache;
pub mod mapping;
pub mod params;
pub mod plan;
pub mod resolve;

pub use self::{
    cache::{TracksCache, TracksCacheConfig},
    params::{Params, RawParams},
    plan::ListQuery,
    resolve::TrackQueryResolver,
};
