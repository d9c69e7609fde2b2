// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn class_names() {
    assert_eq!("genre-ambient", tailwind_class_name("Ambient"));
    assert_eq!("genre-drum-bass", tailwind_class_name("Drum & Bass"));
    assert_eq!("genre-future-bass", tailwind_class_name("  Future   Bass "));
    assert_eq!("genre-hiphop", tailwind_class_name("Hip-Hop"));
    assert_eq!("genre-ukgarage", tailwind_class_name("UK2Garage"));
}

#[test]
fn class_name_collapses_hyphens_only() {
    // The genre-prefix hyphen is never part of a run
    assert_eq!("genre-", tailwind_class_name(""));
    assert_eq!("genre--", tailwind_class_name("& &"));
}

#[test]
fn foreground() {
    let colors = GenreColors {
        background: "#ec00db".to_owned(),
        foreground: "#FFFFFF".to_owned(),
    };
    assert_eq!(
        Ok("#FFFFFF".to_owned()),
        colors.foreground(ColorRepresentation::Hex)
    );
    assert_eq!(
        Ok("white".to_owned()),
        colors.foreground(ColorRepresentation::Tailwind)
    );
    assert_eq!(Ok("black"), tailwind_foreground("#000000"));
    assert!(tailwind_foreground("#ec00db").is_err());
}

#[test]
fn background() {
    let colors = GenreColors {
        background: "#ec00db".to_owned(),
        foreground: "#ffffff".to_owned(),
    };
    assert_eq!("#ec00db", colors.background("Trap", ColorRepresentation::Hex));
    assert_eq!(
        "genre-trap",
        colors.background("Trap", ColorRepresentation::Tailwind)
    );
}

#[test]
fn representation_names() {
    assert_eq!(Ok(ColorRepresentation::Hex), "HEX".parse());
    assert_eq!(Ok(ColorRepresentation::Tailwind), "TAILWIND".parse());
    assert_eq!("TAILWIND", <&str>::from(ColorRepresentation::Tailwind));
}

#[test]
fn unlisted() {
    let colors = GenreColors::unlisted();
    assert_eq!(
        Ok("white".to_owned()),
        colors.foreground(ColorRepresentation::Tailwind)
    );
    assert_eq!(Ok("#ffffff".to_owned()), colors.foreground(ColorRepresentation::Hex));
    assert_eq!("#000000", unlisted_background(ColorRepresentation::Hex));
    assert_eq!("black", unlisted_background(ColorRepresentation::Tailwind));
}
