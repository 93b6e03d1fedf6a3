// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tracksheet: a hierarchical question-sheet tracker core.
//!
//! Sheets hold topics, topics hold sub-topics, sub-topics hold questions. The [`store`] keeps one
//! loaded sheet in sync with a [`backend`], [`query`] derives search views and [`render`] prints
//! them.

pub mod backend;
pub mod config;
pub mod logging;
pub mod model;
pub mod ops;
pub mod query;
pub mod render;
pub mod store;
pub mod ui;
