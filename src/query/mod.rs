// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over sheets.
//!
//! Queries derive views (currently the search projection) without touching store state.

pub mod filter;

pub use filter::{filter_sheet, normalize_query};
