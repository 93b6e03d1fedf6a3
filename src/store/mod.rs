// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client-side state for one loaded sheet.
//!
//! `SheetStore` owns the current snapshot and view state, sends every mutation to a
//! [`crate::backend::SheetBackend`], and reconciles the snapshot from what the backend returns.

mod lanes;
mod sheet_store;

pub use sheet_store::{SheetStore, StoreAction, StoreError, StoreState};
