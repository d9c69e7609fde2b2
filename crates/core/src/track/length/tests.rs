// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn hours_minutes_seconds() {
    assert_eq!(Ok(3723), hms_to_seconds("1:02:03"));
    assert_eq!(Ok(2 * 3600 + 59 * 60 + 59), hms_to_seconds("2:59:59"));
}

#[test]
fn minutes_seconds() {
    assert_eq!(Ok(300), hms_to_seconds("5:00"));
    assert_eq!(Ok(4 * 60 + 7), hms_to_seconds("04:07"));
}

#[test]
fn seconds_only() {
    assert_eq!(Ok(42), hms_to_seconds("42"));
    assert_eq!(Ok(0), hms_to_seconds("0"));
}

#[test]
fn components_are_not_range_checked() {
    assert_eq!(Ok(90), hms_to_seconds("90"));
    assert_eq!(Ok(90), hms_to_seconds("0:90"));
}

#[test]
fn surrounding_whitespace() {
    assert_eq!(Ok(205), hms_to_seconds(" 3:25\n"));
}

#[test]
fn reject_malformed() {
    assert_eq!(Err(LengthParseError::Empty), hms_to_seconds(""));
    assert_eq!(Err(LengthParseError::Empty), hms_to_seconds("  "));
    assert_eq!(
        Err(LengthParseError::TooManyComponents(4)),
        hms_to_seconds("1:2:3:4")
    );
    assert!(matches!(
        hms_to_seconds("3:"),
        Err(LengthParseError::InvalidComponent(_))
    ));
    assert!(matches!(
        hms_to_seconds("3:2x"),
        Err(LengthParseError::InvalidComponent(_))
    ));
    assert!(matches!(
        hms_to_seconds("-3"),
        Err(LengthParseError::InvalidComponent(_))
    ));
    assert!(matches!(
        hms_to_seconds("1.5"),
        Err(LengthParseError::InvalidComponent(_))
    ));
}

#[test]
fn reject_overflow() {
    assert_eq!(Err(LengthParseError::Overflow), hms_to_seconds("99999999999"));
    assert_eq!(Err(LengthParseError::Overflow), hms_to_seconds("4294967295:0:0"));
}

#[test]
fn display() {
    assert_eq!("3:25", TrackLength::from_secs(205).to_string());
    assert_eq!("1:02:03", TrackLength::from_secs(3723).to_string());
    assert_eq!("0:42", TrackLength::from_secs(42).to_string());
}
