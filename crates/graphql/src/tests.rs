// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use serde_json::{Value, json};

use genreguide_core::track::TrackId;
use genreguide_repo::{
    memory::InMemoryStore, subgenre as subgenre_layout, track as track_layout,
};
use genreguide_usecases::track::TracksCache;

use super::*;

fn insert(store: &mut InMemoryStore, collection: &str, key: &str, value: Value) {
    let Value::Object(fields) = value else {
        panic!("not an object");
    };
    store.insert(collection, key, fields);
}

fn new_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    insert(
        &mut store,
        track_layout::COLLECTION,
        "t1",
        json!({
            "name": "First",
            "artist": "Someone",
            "recordLabel": "Label",
            "releaseDate": "2021-05-07",
            "indexOnLabelOnRelease": 0,
            "length": "1:02:03",
            "subgenresNested": "[\"Brostep\", \"|\", [\"Riddim\", \"+\", \"Trap\"]]",
            "sourceSheetID": "S",
            "sourceTabID": "7",
            "sourceRow": 42,
        }),
    );
    insert(
        &mut store,
        track_layout::COLLECTION,
        "t2",
        json!({
            "name": "Second",
            "recordLabel": "Label",
            "releaseDate": "2021-06-01",
            "indexOnLabelOnRelease": 0,
            "length": "soon",
            "subgenresNested": "[\"Brostep\", ",
        }),
    );
    insert(
        &mut store,
        subgenre_layout::COLLECTION,
        "Dubstep",
        json!({
            "isGenre": true,
            "genre": "Dubstep",
            "subgenres": ["Brostep", "Riddim"],
            "color": ["#8c4ee5", "#ffffff"],
        }),
    );
    insert(
        &mut store,
        subgenre_layout::COLLECTION,
        "Brostep",
        json!({
            "isGenre": false,
            "genre": "Dubstep",
            "origins": ["Dubstep"],
        }),
    );
    insert(
        &mut store,
        subgenre_layout::COLLECTION,
        "Drum & Bass",
        json!({
            "isGenre": true,
            "genre": "Drum & Bass",
            "color": ["#ff0000", "#123456"],
        }),
    );
    store
}

fn new_schema() -> Schema {
    let resolver = TrackQueryResolver::new(Arc::new(new_store()), TracksCache::default());
    build_schema(resolver).unwrap()
}

async fn execute(schema: &Schema, query: &str) -> async_graphql::Response {
    schema.execute(query).await
}

async fn execute_ok(schema: &Schema, query: &str) -> Value {
    let response = execute(schema, query).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().unwrap()
}

fn error_code(response: &async_graphql::Response) -> Option<String> {
    let error = response.errors.first()?;
    let code = error.extensions.as_ref()?.get("code")?;
    match code {
        async_graphql::Value::String(code) => Some(code.clone()),
        _ => None,
    }
}

#[tokio::test]
async fn list_tracks_with_derived_fields() {
    let schema = new_schema();
    let data = execute_ok(
        &schema,
        "{ tracks { id name releaseDate lengthSeconds source image } }",
    )
    .await;
    assert_eq!(
        json!({
            "tracks": [
                {
                    "id": TrackId::from_key("t2").into_inner(),
                    "name": "Second",
                    "releaseDate": "2021-06-01",
                    "lengthSeconds": null,
                    "source": null,
                    "image": null,
                },
                {
                    "id": TrackId::from_key("t1").into_inner(),
                    "name": "First",
                    "releaseDate": "2021-05-07",
                    "lengthSeconds": 3723,
                    "source": "https://docs.google.com/spreadsheets/d/S/edit#gid=7&range=A42",
                    "image": null,
                },
            ]
        }),
        data
    );
}

#[tokio::test]
async fn list_tracks_with_arguments() {
    let schema = new_schema();
    let data = execute_ok(
        &schema,
        r#"{ tracks(newestFirst: false, limit: 1, afterDate: "2021-01-01") { name } }"#,
    )
    .await;
    assert_eq!(json!({ "tracks": [{ "name": "First" }] }), data);
    let data = execute_ok(&schema, "{ tracks(limit: -1) { name } }").await;
    assert_eq!(json!({ "tracks": [] }), data);
}

#[tokio::test]
async fn malformed_date_is_bad_user_input() {
    let schema = new_schema();
    let response = execute(&schema, r#"{ tracks(beforeDate: "tomorrow") { name } }"#).await;
    assert_eq!(Some("BAD_USER_INPUT"), error_code(&response).as_deref());
}

#[tokio::test]
async fn track_by_id() {
    let schema = new_schema();
    let id = TrackId::from_key("t1");
    let data = execute_ok(
        &schema,
        &format!(r#"{{ track(id: "{id}") {{ name artist recordLabel sourceRow }} }}"#),
    )
    .await;
    assert_eq!(
        json!({
            "track": {
                "name": "First",
                "artist": "Someone",
                "recordLabel": "Label",
                "sourceRow": 42,
            }
        }),
        data
    );
}

#[tokio::test]
async fn track_not_found() {
    let schema = new_schema();
    for id in [
        TrackId::from_key("missing").into_inner(),
        "nonexistent-id".to_owned(),
    ] {
        let response = execute(&schema, &format!(r#"{{ track(id: "{id}") {{ name }} }}"#)).await;
        assert_eq!(Some("NOT_FOUND"), error_code(&response).as_deref());
    }
}

#[tokio::test]
async fn nested_and_flat_subgenres() {
    let schema = new_schema();
    let id = TrackId::from_key("t1");
    let data = execute_ok(
        &schema,
        &format!(
            r#"{{ track(id: "{id}") {{
                subgenresNestedAsSubgenres {{
                    items {{
                        __typename
                        ... on Subgenre {{ name }}
                        ... on Operator {{ symbol name }}
                        ... on SubgenreGroup {{
                            items {{
                                ... on Subgenre {{ name }}
                                ... on Operator {{ symbol }}
                            }}
                        }}
                    }}
                }}
                subgenresFlat {{
                    ... on Subgenre {{ name }}
                    ... on Operator {{ name }}
                }}
            }} }}"#
        ),
    )
    .await;
    assert_eq!(
        json!({
            "track": {
                "subgenresNestedAsSubgenres": {
                    "items": [
                        { "__typename": "Subgenre", "name": "Brostep" },
                        { "__typename": "Operator", "symbol": "|", "name": "OR" },
                        {
                            "__typename": "SubgenreGroup",
                            "items": [
                                { "name": "Riddim" },
                                { "symbol": "+" },
                                { "name": "Trap" },
                            ],
                        },
                    ],
                },
                "subgenresFlat": [
                    { "name": "Brostep" },
                    { "name": "OR" },
                    { "name": "Riddim" },
                    { "name": "AND" },
                    { "name": "Trap" },
                ],
            }
        }),
        data
    );
}

#[tokio::test]
async fn malformed_subgenres_degrade_to_empty() {
    let schema = new_schema();
    let id = TrackId::from_key("t2");
    let data = execute_ok(
        &schema,
        &format!(
            r#"{{ track(id: "{id}") {{
                subgenresNested
                subgenresNestedAsSubgenres {{ items {{ __typename }} }}
                subgenresFlat {{ __typename }}
            }} }}"#
        ),
    )
    .await;
    assert_eq!(
        json!({
            "track": {
                "subgenresNested": "[\"Brostep\", ",
                "subgenresNestedAsSubgenres": { "items": [] },
                "subgenresFlat": [],
            }
        }),
        data
    );
}

#[tokio::test]
async fn subgenre_of_track_resolves_lazily() {
    let schema = new_schema();
    let id = TrackId::from_key("t1");
    let data = execute_ok(
        &schema,
        &format!(
            r#"{{ track(id: "{id}") {{
                subgenresFlat {{
                    __typename
                    ... on Operator {{ symbol }}
                    ... on Subgenre {{
                        name isGenre genre {{ name }}
                        color {{ fromGenre background foreground }}
                    }}
                }}
            }} }}"#
        ),
    )
    .await;
    assert_eq!(
        json!({
            "track": {
                "subgenresFlat": [
                    {
                        "__typename": "Subgenre",
                        "name": "Brostep",
                        "isGenre": false,
                        "genre": { "name": "Dubstep" },
                        "color": {
                            "fromGenre": "Dubstep",
                            "background": "#8c4ee5",
                            "foreground": "#ffffff",
                        },
                    },
                    { "__typename": "Operator", "symbol": "|" },
                    {
                        "__typename": "Subgenre",
                        "name": "Riddim",
                        "isGenre": null,
                        "genre": null,
                        "color": {
                            "fromGenre": null,
                            "background": "#000000",
                            "foreground": "#ffffff",
                        },
                    },
                    { "__typename": "Operator", "symbol": "+" },
                    {
                        "__typename": "Subgenre",
                        "name": "Trap",
                        "isGenre": null,
                        "genre": null,
                        "color": {
                            "fromGenre": null,
                            "background": "#000000",
                            "foreground": "#ffffff",
                        },
                    },
                ],
            }
        }),
        data
    );
}

#[tokio::test]
async fn subgenre_taxonomy() {
    let schema = new_schema();
    let data = execute_ok(
        &schema,
        r#"{
            allGenres { name }
            allSubgenres { name }
            subgenre(name: "Dubstep") {
                name
                isGenre
                subgenres { name genre { name } }
                color {
                    fromGenre
                    hex: background
                    tailwind: background(representation: TAILWIND)
                    foreground(representation: TAILWIND)
                }
            }
        }"#,
    )
    .await;
    assert_eq!(
        json!({
            "allGenres": [{ "name": "Drum & Bass" }, { "name": "Dubstep" }],
            "allSubgenres": [
                { "name": "Brostep" },
                { "name": "Drum & Bass" },
                { "name": "Dubstep" },
            ],
            "subgenre": {
                "name": "Dubstep",
                "isGenre": true,
                "subgenres": [
                    { "name": "Brostep", "genre": { "name": "Dubstep" } },
                    { "name": "Riddim", "genre": null },
                ],
                "color": {
                    "fromGenre": "Dubstep",
                    "hex": "#8c4ee5",
                    "tailwind": "genre-dubstep",
                    "foreground": "white",
                },
            },
        }),
        data
    );
}

#[tokio::test]
async fn unknown_subgenre() {
    let schema = new_schema();
    let response = execute(&schema, r#"{ subgenre(name: "Nope") { name } }"#).await;
    assert_eq!(Some("NOT_FOUND"), error_code(&response).as_deref());
    assert_eq!("Nope is not a valid subgenre!", response.errors[0].message);
}

#[tokio::test]
async fn unsupported_tailwind_foreground_is_internal() {
    let schema = new_schema();
    let response = execute(
        &schema,
        r#"{ subgenre(name: "Drum & Bass") {
            color { background(representation: TAILWIND) foreground(representation: TAILWIND) }
        } }"#,
    )
    .await;
    assert_eq!(Some("INTERNAL"), error_code(&response).as_deref());
}

#[tokio::test]
async fn unlisted_subgenre_colors_in_tailwind() {
    let schema = new_schema();
    let id = TrackId::from_key("t1");
    let data = execute_ok(
        &schema,
        &format!(
            r#"{{ track(id: "{id}") {{
                subgenresFlat {{
                    ... on Subgenre {{
                        color {{
                            background(representation: TAILWIND)
                            foreground(representation: TAILWIND)
                        }}
                    }}
                }}
            }} }}"#
        ),
    )
    .await;
    let colors = &data["track"]["subgenresFlat"];
    assert_eq!(
        json!({ "background": "genre-dubstep", "foreground": "white" }),
        colors[0]["color"]
    );
    assert_eq!(
        json!({ "background": "black", "foreground": "white" }),
        colors[2]["color"]
    );
}

#[test]
fn track_manifest_lists_all_fields() {
    let manifest = track::track_manifest();
    assert_eq!(track::TRACK_TYPE, manifest.name());
    let names = manifest.field_names().collect::<Vec<_>>();
    for name in [
        "id",
        "releaseDate",
        "recordLabel",
        "indexOnLabelOnRelease",
        "length",
        "lengthSeconds",
        "subgenresNested",
        "subgenresNestedAsSubgenres",
        "subgenresFlat",
        "sourceSheetID",
        "sourceTabID",
        "sourceRow",
        "source",
        "image",
    ] {
        assert!(names.contains(&name), "{name}");
    }
}
