// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::result::Result as StdResult;

use thiserror::Error;

use genreguide_repo::prelude::*;

pub mod subgenre;
pub mod track;

#[derive(Error, Debug)]
#[error(transparent)]
pub struct InputError(#[from] pub anyhow::Error);

pub type InputResult<T> = StdResult<T, InputError>;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or contradictory arguments
    #[error(transparent)]
    Input(#[from] InputError),

    /// A requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Data in the store contradicts its own indexes or layout
    #[error("inconsistent data: {0}")]
    Inconsistent(String),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = StdResult<T, Error>;
