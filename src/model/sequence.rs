// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use super::ids::Id;

/// An element of an ordered sibling sequence whose `order` mirrors its position.
pub(crate) trait Sequenced: Clone {
    type Tag;

    fn id(&self) -> &Id<Self::Tag>;
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}

/// Rewrites `order` so it equals the position of every element.
///
/// Elements whose `order` is already correct are left untouched, so shared `Arc`s stay shared.
pub(crate) fn renumber<T: Sequenced>(items: &mut [Arc<T>]) {
    for (position, item) in items.iter_mut().enumerate() {
        if item.order() != position {
            Arc::make_mut(item).set_order(position);
        }
    }
}

pub(crate) fn position_of<T: Sequenced>(items: &[Arc<T>], id: &Id<T::Tag>) -> Option<usize> {
    items.iter().position(|item| item.id().as_str() == id.as_str())
}
