// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn new_routes(
    admin_routes: bool,
) -> (
    impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone + 'static,
    mpsc::UnboundedReceiver<()>,
) {
    let cache = TracksCache::default();
    let resolver = TrackQueryResolver::new(Arc::new(InMemoryStore::new()), cache.clone());
    let schema = build_schema(resolver).unwrap();
    let (shutdown_tx, shutdown_rx) = mpsc::unbounded_channel();
    let about_json = serde_json::json!({ "name": "test" });
    (
        routes(schema, cache, about_json, admin_routes, shutdown_tx),
        shutdown_rx,
    )
}

#[tokio::test]
async fn admin_routes_are_absent_by_default() {
    let (routes, mut shutdown_rx) = new_routes(Config::default().network.admin_routes_enabled());
    for path in ["/shutdown", "/cache/invalidate"] {
        let response = warp::test::request()
            .method("POST")
            .path(path)
            .reply(&routes)
            .await;
        assert_eq!(StatusCode::NOT_FOUND, response.status(), "{path}");
    }
    assert!(shutdown_rx.try_recv().is_err());

    let response = warp::test::request()
        .method("GET")
        .path("/about")
        .reply(&routes)
        .await;
    assert_eq!(StatusCode::OK, response.status());
}

#[tokio::test]
async fn admin_routes_if_enabled() {
    let (routes, mut shutdown_rx) = new_routes(true);
    let response = warp::test::request()
        .method("POST")
        .path("/cache/invalidate")
        .reply(&routes)
        .await;
    assert_eq!(StatusCode::NO_CONTENT, response.status());
    let response = warp::test::request()
        .method("POST")
        .path("/shutdown")
        .reply(&routes)
        .await;
    assert_eq!(StatusCode::ACCEPTED, response.status());
    assert!(shutdown_rx.try_recv().is_ok());
}
