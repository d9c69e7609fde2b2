// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};

use jiff::Timestamp;
use tokio::{sync::mpsc, time::sleep};
use warp::{Filter, Reply, http::StatusCode};

use genreguide_graphql::{Schema, build_schema};
use genreguide_repo::memory::InMemoryStore;
use genreguide_repo_redis::RedisStore;
use genreguide_usecases::track::{TrackQueryResolver, TracksCache};
use genreguide_websrv_warp::{
    enabled_or_not_found, graphiql_filter, graphql_filter, handle_rejection,
    invalidate_cache_filter,
};

use crate::config::{Config, StoreConfig};

const WEB_SERVER_LISTENING_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub(crate) enum State {
    Launching,
    Starting,
    Listening { socket_addr: SocketAddr },
    Stopping,
    Terminating,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Command {
    Terminate,
}

async fn provision_schema(config: &StoreConfig, cache: TracksCache) -> anyhow::Result<Schema> {
    let schema = if let Some(url) = &config.url {
        log::info!("Connecting to Redis: {url}");
        let pool_max_size = config.pool_max_size.get();
        log::info!("Creating connection pool of max. size {pool_max_size}");
        let store = RedisStore::connect(url.as_str(), pool_max_size).await?;
        build_schema(TrackQueryResolver::new(Arc::new(store), cache))
    } else {
        let store = if let Some(seed_file) = &config.seed_file {
            InMemoryStore::load_seed_file(seed_file)?
        } else {
            log::warn!("Using an empty in-memory store");
            InMemoryStore::new()
        };
        build_schema(TrackQueryResolver::new(Arc::new(store), cache))
    };
    schema.map_err(|err| anyhow::anyhow!("Invalid GraphQL schema: {err}"))
}

/// All routes of the web server.
///
/// The unauthenticated admin routes `POST /shutdown` and
/// `POST /cache/invalidate` are only mounted if `admin_routes` is set.
pub(crate) fn routes(
    schema: Schema,
    cache: TracksCache,
    about_json: serde_json::Value,
    admin_routes: bool,
    server_shutdown_tx: mpsc::UnboundedSender<()>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone + Send + Sync + 'static {
    // POST /shutdown
    let shutdown_filter = warp::path("shutdown")
        .and(warp::path::end())
        .and(warp::post())
        .map(move || {
            server_shutdown_tx
                .send(())
                .map(|()| StatusCode::ACCEPTED)
                .map_err(|_| {
                    log::warn!("Failed to forward shutdown request");
                    StatusCode::BAD_GATEWAY
                })
        });

    // GET /about
    let about_filter = warp::path("about")
        .and(warp::path::end())
        .and(warp::get())
        .map(move || warp::reply::json(&about_json));

    let admin_filters = enabled_or_not_found(admin_routes)
        .and(invalidate_cache_filter(cache).or(shutdown_filter));

    graphql_filter(schema)
        .or(graphiql_filter())
        .or(about_filter)
        .or(admin_filters)
        .with(warp::cors().allow_any_origin())
        .recover(handle_rejection)
}

pub(crate) async fn run(
    config: Config,
    mut command_rx: mpsc::UnboundedReceiver<Command>,
    on_state_changed: impl Fn(State),
) -> anyhow::Result<()> {
    let launched_at = Timestamp::now();

    log::info!("Launching");
    on_state_changed(State::Launching);

    let cache = TracksCache::new(config.cache.into());
    let schema = provision_schema(&config.store, cache.clone()).await?;

    let about_json = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "version": env!("CARGO_PKG_VERSION"),
        "instance": {
            "launched_at": launched_at,
            "config": config,
        },
    });

    log::info!("Creating service routes");
    let (server_shutdown_tx, mut server_shutdown_rx) = mpsc::unbounded_channel::<()>();
    let admin_routes = config.network.admin_routes_enabled();
    if admin_routes {
        log::info!("Serving admin routes");
    } else if config.network.admin_routes {
        log::warn!("Admin routes are only served on loopback endpoints");
    }
    let server = warp::serve(routes(
        schema,
        cache,
        about_json,
        admin_routes,
        server_shutdown_tx,
    ));

    log::info!("Starting");
    on_state_changed(State::Starting);

    let (socket_addr, server_listener) =
        server.try_bind_with_graceful_shutdown(config.network.endpoint.socket_addr(), async move {
            tokio::select! {
                Some(()) = server_shutdown_rx.recv() => (),
                Some(Command::Terminate) = command_rx.recv() => (),
                else => (),
            }
        })?;

    // Warp does not signal when the server has actually started
    // listening. Announcing the endpoint address is delayed to
    // give it some time.
    sleep(WEB_SERVER_LISTENING_DELAY).await;

    log::info!("Listening on {socket_addr}");
    on_state_changed(State::Listening { socket_addr });

    server_listener.await;

    log::info!("Stopping");
    on_state_changed(State::Stopping);

    log::info!("Terminating");
    on_state_changed(State::Terminating);

    Ok(())
}

#[cfg(test)]
mod tests;
