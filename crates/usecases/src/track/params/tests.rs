// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn defaults() {
    let params = RawParams::default().normalize().unwrap();
    assert_eq!(Params::default(), params);
    assert!(params.newest_first);
    assert_eq!(DEFAULT_LIMIT, params.limit);
}

#[test]
fn clamp_limit_into_bounds() {
    assert_eq!(0, clamp_limit(-1));
    assert_eq!(0, clamp_limit(i64::MIN));
    assert_eq!(0, clamp_limit(0));
    assert_eq!(1, clamp_limit(1));
    assert_eq!(MAX_LIMIT, clamp_limit(i64::from(MAX_LIMIT)));
    assert_eq!(MAX_LIMIT, clamp_limit(i64::from(MAX_LIMIT) + 1));
    assert_eq!(MAX_LIMIT, clamp_limit(i64::MAX));
}

#[test]
fn parse_dates() {
    let params = RawParams {
        before_date: Some("2020-12-31".to_owned()),
        after_date: Some(" 2020-01-01 ".to_owned()),
        ..Default::default()
    }
    .normalize()
    .unwrap();
    assert_eq!(
        Some(ReleaseDate::new(2020, 12, 31).unwrap()),
        params.released_before
    );
    assert_eq!(
        Some(ReleaseDate::new(2020, 1, 1).unwrap()),
        params.released_after
    );
}

#[test]
fn reject_malformed_dates() {
    assert!(
        RawParams {
            before_date: Some("2020-13-01".to_owned()),
            ..Default::default()
        }
        .normalize()
        .is_err()
    );
    assert!(
        RawParams {
            after_date: Some("yesterday".to_owned()),
            ..Default::default()
        }
        .normalize()
        .is_err()
    );
}

#[test]
fn blank_arguments_are_absent() {
    let params = RawParams {
        before_date: Some(String::new()),
        after_id: Some("  ".to_owned()),
        ..Default::default()
    }
    .normalize()
    .unwrap();
    assert_eq!(None, params.released_before);
    assert_eq!(None, params.after_id);
}

#[test]
fn cursors_do_not_affect_list_query() {
    let with_cursor = RawParams {
        before_id: Some(TrackId::from_key("a").into_inner()),
        limit: Some(10),
        newest_first: Some(false),
        ..Default::default()
    }
    .normalize()
    .unwrap();
    let without_cursor = RawParams {
        limit: Some(10),
        newest_first: Some(false),
        ..Default::default()
    }
    .normalize()
    .unwrap();
    assert_ne!(with_cursor, without_cursor);
    assert_eq!(with_cursor.list_query(), without_cursor.list_query());
}
