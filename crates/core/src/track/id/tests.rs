// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn encode_key() {
    assert_eq!("VHJhY2s6YWJj", TrackId::from_key("abc").as_str());
}

#[test]
fn decode_encoded_key() {
    let id = TrackId::from_key("2019-01-01:Monstercat:0");
    assert_eq!(Ok("2019-01-01:Monstercat:0".to_owned()), id.decode_key());
}

#[test]
fn decode_garbage() {
    let id: TrackId = "nonexistent-id".parse().unwrap();
    assert!(matches!(
        id.decode_key(),
        Err(TrackIdDecodeError::Encoding(_))
    ));
}

#[test]
fn decode_foreign_type() {
    // base64("Subgenre:Dubstep")
    let id: TrackId = "U3ViZ2VucmU6RHVic3RlcA==".parse().unwrap();
    assert_eq!(Err(TrackIdDecodeError::UnexpectedType), id.decode_key());
}

#[test]
fn decode_empty_key() {
    let id = TrackId::from_key("");
    assert_eq!(Err(TrackIdDecodeError::EmptyKey), id.decode_key());
}
