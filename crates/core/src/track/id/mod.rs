// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, fmt, str::FromStr};

use data_encoding::BASE64;
use thiserror::Error;

/// Public, opaque identifier of a track.
///
/// Encodes the type name together with the store key as
/// `base64("Track:<key>")`. The encoding is a pure function of the
/// document identity and can be reversed for point lookups.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(String);

const TYPE_NAME: &str = "Track";

const TYPE_NAME_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackIdDecodeError {
    #[error("invalid encoding: {0}")]
    Encoding(#[from] data_encoding::DecodeError),

    #[error("invalid UTF-8")]
    Utf8,

    #[error("not a track identifier")]
    UnexpectedType,

    #[error("empty key")]
    EmptyKey,
}

impl TrackId {
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        let plain = format!("{TYPE_NAME}{TYPE_NAME_SEPARATOR}{key}");
        Self(BASE64.encode(plain.as_bytes()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        let Self(inner) = self;
        inner
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        let Self(inner) = self;
        inner
    }

    /// Recover the store key.
    pub fn decode_key(&self) -> Result<String, TrackIdDecodeError> {
        let bytes = BASE64.decode(self.as_str().as_bytes())?;
        let plain = String::from_utf8(bytes).map_err(|_| TrackIdDecodeError::Utf8)?;
        let Some((type_name, key)) = plain.split_once(TYPE_NAME_SEPARATOR) else {
            return Err(TrackIdDecodeError::UnexpectedType);
        };
        if type_name != TYPE_NAME {
            return Err(TrackIdDecodeError::UnexpectedType);
        }
        if key.is_empty() {
            return Err(TrackIdDecodeError::EmptyKey);
        }
        Ok(key.to_owned())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<String> for TrackId {
    fn from(from: String) -> Self {
        Self(from)
    }
}

#[cfg(test)]
mod tests;
