// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, error::Error as _, result::Result as StdResult};

use async_graphql::{Executor, http::GraphiQLSource};
use async_graphql_warp::{GraphQLBadRequest, GraphQLResponse};
use serde::Serialize;
use warp::{
    Filter, Reply,
    body::BodyDeserializeError,
    http::StatusCode,
    reject::{InvalidHeader, InvalidQuery, MethodNotAllowed, Rejection},
};

use genreguide_usecases::track::TracksCache;

pub const GRAPHQL_PATH: &str = "graphql";

/// `POST /graphql` and `GET /graphql`
pub fn graphql_filter<E>(
    executor: E,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    E: Executor,
{
    warp::path(GRAPHQL_PATH)
        .and(warp::path::end())
        .and(async_graphql_warp::graphql(executor))
        .and_then(|(executor, request): (E, async_graphql::Request)| async move {
            Ok::<_, Infallible>(GraphQLResponse::from(executor.execute(request).await))
        })
}

/// `GET /`
///
/// Serves the interactive GraphiQL IDE.
pub fn graphiql_filter() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let html = GraphiQLSource::build()
        .endpoint(&format!("/{GRAPHQL_PATH}"))
        .title("genreguide")
        .finish();
    warp::path::end()
        .and(warp::get())
        .map(move || warp::reply::html(html.clone()))
}

/// `POST /cache/invalidate`
///
/// Discards all memoized track listings, e.g. after the store has
/// been re-imported.
pub fn invalidate_cache_filter(
    cache: TracksCache,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("cache" / "invalidate")
        .and(warp::post())
        .map(move || {
            cache.invalidate_all();
            StatusCode::NO_CONTENT
        })
}

/// Rejects all requests as not found unless `enabled`.
///
/// Mounts routes conditionally without changing the type of the
/// combined filter.
pub fn enabled_or_not_found(enabled: bool) -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::any()
        .and_then(move || async move {
            if enabled {
                Ok(())
            } else {
                Err(warp::reject::not_found())
            }
        })
        .untuple_one()
}

/// An API error serializable to JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponseBody {
    code: u16,
    message: String,
}

fn status_code_to_string(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or_else(|| code.as_str())
        .to_owned()
}

#[allow(clippy::unused_async)] // async needed for warp filter
pub async fn handle_rejection(reject: Rejection) -> StdResult<impl Reply, Infallible> {
    let code;
    let message;

    if reject.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = status_code_to_string(code);
    } else if let Some(GraphQLBadRequest(err)) = reject.find() {
        code = StatusCode::BAD_REQUEST;
        message = err.to_string();
    } else if let Some(err) = reject.find::<InvalidHeader>() {
        code = StatusCode::BAD_REQUEST;
        message = err
            .source()
            .map_or_else(|| err.to_string(), ToString::to_string);
    } else if let Some(err) = reject.find::<InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = err
            .source()
            .map_or_else(|| err.to_string(), ToString::to_string);
    } else if let Some(err) = reject.find::<BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        message = err
            .source()
            .map_or_else(|| err.to_string(), ToString::to_string);
    } else if let Some(err) = reject.find::<MethodNotAllowed>() {
        // Most rejections contain a MethodNotAllowed element
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = err.to_string();
    } else {
        log::error!("Unhandled rejection {reject:?}");
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = format!("{reject:?}");
    }

    let json_reply = warp::reply::json(&ErrorResponseBody {
        code: code.as_u16(),
        message,
    });

    Ok(warp::reply::with_status(json_reply, code))
}
