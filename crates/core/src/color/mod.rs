// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use strum::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Format in which a color is presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorRepresentation {
    /// A hex code like `"#ec00db"`
    #[default]
    Hex,

    /// A TailwindCSS color name as found in a class name, like `"genre-ambient"`
    Tailwind,
}

/// Colors of a genre as they appear on the genre sheet.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenreColors {
    /// Hex code of the cell background
    pub background: String,

    /// Hex code of the text on top of the background
    pub foreground: String,
}

pub const UNLISTED_BACKGROUND: &str = "#000000";

pub const UNLISTED_FOREGROUND: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("foreground color {0} is neither white nor black")]
pub struct UnsupportedForegroundColor(pub String);

impl GenreColors {
    /// Black text on white background for subgenres that are not
    /// listed on the genre sheet.
    #[must_use]
    pub fn unlisted() -> Self {
        Self {
            background: UNLISTED_BACKGROUND.to_owned(),
            foreground: UNLISTED_FOREGROUND.to_owned(),
        }
    }

    #[must_use]
    pub fn background(&self, genre_name: &str, representation: ColorRepresentation) -> String {
        match representation {
            ColorRepresentation::Hex => self.background.clone(),
            ColorRepresentation::Tailwind => tailwind_class_name(genre_name),
        }
    }

    pub fn foreground(
        &self,
        representation: ColorRepresentation,
    ) -> Result<String, UnsupportedForegroundColor> {
        match representation {
            ColorRepresentation::Hex => Ok(self.foreground.clone()),
            ColorRepresentation::Tailwind => {
                tailwind_foreground(&self.foreground).map(ToOwned::to_owned)
            }
        }
    }
}

/// Background of subgenres that are not listed on the genre sheet.
#[must_use]
pub const fn unlisted_background(representation: ColorRepresentation) -> &'static str {
    match representation {
        ColorRepresentation::Hex => UNLISTED_BACKGROUND,
        ColorRepresentation::Tailwind => "black",
    }
}

/// Only white and black text is used on the genre sheet.
pub fn tailwind_foreground(hex: &str) -> Result<&'static str, UnsupportedForegroundColor> {
    match hex.to_lowercase().as_str() {
        "#ffffff" => Ok("white"),
        "#000000" => Ok("black"),
        _ => Err(UnsupportedForegroundColor(hex.to_owned())),
    }
}

/// Derive the Tailwind class name of a genre, e.g. `"genre-drum-bass"`
/// for `"Drum & Bass"`.
///
/// Words are lowercased and reduced to their alphabetic characters,
/// joined by hyphens, and runs of hyphens are collapsed.
#[must_use]
pub fn tailwind_class_name(genre_name: &str) -> String {
    let hyphenated = genre_name
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.chars().filter(|c| c.is_alphabetic()).collect::<String>())
        .collect::<Vec<_>>()
        .join("-");
    let mut class_name = String::with_capacity(6 + hyphenated.len());
    class_name.push_str("genre-");
    let mut prev_hyphen = false;
    for c in hyphenated.chars() {
        if c == '-' {
            if prev_hyphen {
                continue;
            }
            prev_hyphen = true;
        } else {
            prev_hyphen = false;
        }
        class_name.push(c);
    }
    class_name
}

#[cfg(test)]
mod tests;
