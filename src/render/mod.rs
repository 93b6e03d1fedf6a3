// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plain-text rendering of sheets.
//!
//! The outline honours the collapsed-topic set from [`crate::ui::UiState`] and shows progress
//! counts at every level.

mod outline;
mod text;

pub use outline::render_outline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_notes: bool,
    pub show_urls: bool,
    /// Titles longer than this are cut with an ellipsis. `0` disables truncation.
    pub max_title_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_notes: true,
            show_urls: false,
            max_title_width: 0,
        }
    }
}
