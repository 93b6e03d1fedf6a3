// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! View state shared between the store and whatever renders it.
//!
//! Holds the raw search text and the set of collapsed topics. `rev` bumps on every observable
//! change so renderers can skip redundant redraws.

use std::collections::BTreeSet;

use crate::model::TopicId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    rev: u64,
    search_query: String,
    collapsed_topics: BTreeSet<TopicId>,
}

impl UiState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// The query exactly as typed; filtering trims and lower-cases it.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn collapsed_topics(&self) -> &BTreeSet<TopicId> {
        &self.collapsed_topics
    }

    pub fn is_collapsed(&self, topic_id: &TopicId) -> bool {
        self.collapsed_topics.contains(topic_id)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.search_query == query {
            return;
        }
        self.search_query = query;
        self.bump();
    }

    /// Flips membership of `topic_id` in the collapsed set.
    pub fn toggle_collapse(&mut self, topic_id: &TopicId) {
        if !self.collapsed_topics.remove(topic_id) {
            self.collapsed_topics.insert(topic_id.clone());
        }
        self.bump();
    }

    /// Collapses every topic unless all of them already are, in which case expands all.
    pub fn toggle_all(&mut self, topic_ids: &[TopicId]) {
        if topic_ids.iter().all(|topic_id| self.is_collapsed(topic_id)) {
            self.collapsed_topics.clear();
        } else {
            self.collapsed_topics = topic_ids.iter().cloned().collect();
        }
        self.bump();
    }

    /// Drops collapsed ids that are not among `topic_ids`.
    pub fn retain_topics(&mut self, topic_ids: &[TopicId]) {
        let before = self.collapsed_topics.len();
        self.collapsed_topics.retain(|topic_id| topic_ids.contains(topic_id));
        if self.collapsed_topics.len() != before {
            self.bump();
        }
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}
