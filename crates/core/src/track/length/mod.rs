// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Duration of a track with whole-second precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackLength {
    secs: u32,
}

impl TrackLength {
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self { secs }
    }

    #[must_use]
    pub const fn as_secs(self) -> u32 {
        self.secs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LengthParseError {
    #[error("empty")]
    Empty,

    #[error("too many components: {0}")]
    TooManyComponents(usize),

    #[error("invalid component {0:?}")]
    InvalidComponent(String),

    #[error("overflow")]
    Overflow,
}

/// Multipliers of the `S`, `M`, and `H` components, right to left.
const COMPONENT_SECS: [u32; 3] = [1, 60, 3600];

/// Parse a duration in `[[H:]M:]S` notation into seconds.
///
/// Components are read right to left: seconds, minutes, hours. Missing
/// leading components count as 0. Components are not range checked,
/// i.e. `"90"` and `"1:30"` are both 90 seconds.
pub fn hms_to_seconds(hms: &str) -> Result<u32, LengthParseError> {
    let hms = hms.trim();
    if hms.is_empty() {
        return Err(LengthParseError::Empty);
    }
    let components: Vec<_> = hms.split(':').collect();
    if components.len() > COMPONENT_SECS.len() {
        return Err(LengthParseError::TooManyComponents(components.len()));
    }
    components
        .iter()
        .rev()
        .zip(COMPONENT_SECS)
        .try_fold(0u32, |total, (component, multiplier)| {
            let component = component.trim();
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(LengthParseError::InvalidComponent(component.to_owned()));
            }
            let value = component
                .parse::<u32>()
                .map_err(|_| LengthParseError::Overflow)?;
            value
                .checked_mul(multiplier)
                .and_then(|secs| total.checked_add(secs))
                .ok_or(LengthParseError::Overflow)
        })
}

impl FromStr for TrackLength {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hms_to_seconds(s).map(Self::from_secs)
    }
}

impl fmt::Display for TrackLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { secs } = *self;
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;
        if hours > 0 {
            write!(f, "{hours}:{minutes:02}:{seconds:02}")
        } else {
            write!(f, "{minutes}:{seconds:02}")
        }
    }
}

#[cfg(test)]
mod tests;
