// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Provenance of a track inside the origin spreadsheet.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourcePointer {
    pub sheet_id: String,
    pub tab_id: String,
    pub row: u32,
}

impl SourcePointer {
    /// Deep link that opens the spreadsheet with the row selected.
    ///
    /// Reachability of the link is not checked.
    #[must_use]
    pub fn to_url(&self) -> String {
        let Self {
            sheet_id,
            tab_id,
            row,
        } = self;
        format!("https://docs.google.com/spreadsheets/d/{sheet_id}/edit#gid={tab_id}&range=A{row}")
    }
}
