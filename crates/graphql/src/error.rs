// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::ErrorExtensions as _;

use genreguide_usecases::Error;

/// Machine-readable classification in `extensions.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    BadUserInput,
    NotFound,
    Internal,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadUserInput => "BAD_USER_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL",
        }
    }
}

impl From<&Error> for ErrorCode {
    fn from(from: &Error) -> Self {
        match from {
            Error::Input(_) => Self::BadUserInput,
            Error::NotFound(_) => Self::NotFound,
            Error::Inconsistent(_) | Error::Repository(_) | Error::Other(_) => Self::Internal,
        }
    }
}

pub(crate) fn internal_error(message: impl Into<String>) -> async_graphql::Error {
    coded_error(message.into(), ErrorCode::Internal)
}

fn coded_error(message: String, code: ErrorCode) -> async_graphql::Error {
    async_graphql::Error::new(message).extend_with(|_, extensions| {
        extensions.set("code", code.as_str());
    })
}

pub(crate) fn into_graphql_error(err: Error) -> async_graphql::Error {
    let code = ErrorCode::from(&err);
    if code == ErrorCode::Internal {
        log::error!("Failed to resolve query: {err:#}");
    } else {
        log::debug!("Rejected query: {err}");
    }
    coded_error(err.to_string(), code)
}
