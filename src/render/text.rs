// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Progress;

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 || text.chars().count() <= max_len {
        return text.to_owned();
    }
    if max_len == 1 {
        return "…".to_owned();
    }

    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

/// `3/5` style counter.
pub(crate) fn fraction(progress: Progress) -> String {
    format!("{}/{}", progress.completed, progress.total)
}
