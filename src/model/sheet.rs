// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ids::{QuestionId, SheetId, SubTopicId, TopicId};
use super::question::Question;
use super::sequence::position_of;
use super::stats::{Progress, Stats};
use super::topic::{SubTopic, Topic};

/// The top-level document: an ordered list of topics plus derived stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SheetRepr")]
pub struct Sheet {
    id: SheetId,
    slug: String,
    name: String,
    description: String,
    topics: Vec<Arc<Topic>>,
    stats: Stats,
}

/// Wire shape; stats coming over the wire are ignored and recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetRepr {
    id: SheetId,
    slug: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    topics: Vec<Arc<Topic>>,
}

impl From<SheetRepr> for Sheet {
    fn from(repr: SheetRepr) -> Self {
        let stats = Stats::from_topics(&repr.topics);
        Self {
            id: repr.id,
            slug: repr.slug,
            name: repr.name,
            description: repr.description,
            topics: repr.topics,
            stats,
        }
    }
}

impl Sheet {
    pub fn new(
        id: SheetId,
        slug: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            slug: slug.into(),
            name: name.into(),
            description: description.into(),
            topics: Vec::new(),
            stats: Stats::default(),
        }
    }

    pub fn id(&self) -> &SheetId {
        &self.id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn topics(&self) -> &[Arc<Topic>] {
        &self.topics
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn progress(&self) -> Progress {
        self.stats.progress()
    }

    pub fn topic(&self, topic_id: &TopicId) -> Option<&Arc<Topic>> {
        self.topics.iter().find(|topic| topic.id() == topic_id)
    }

    pub fn topic_ids(&self) -> Vec<TopicId> {
        self.topics.iter().map(|topic| topic.id().clone()).collect()
    }

    pub fn sub_topic(&self, topic_id: &TopicId, sub_topic_id: &SubTopicId) -> Option<&Arc<SubTopic>> {
        self.topic(topic_id)?.sub_topic(sub_topic_id)
    }

    pub fn question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
    ) -> Option<&Arc<Question>> {
        self.sub_topic(topic_id, sub_topic_id)?.question(question_id)
    }

    /// Appends a topic, assigning it the next `order`, and refreshes stats.
    pub fn push_topic(&mut self, mut topic: Topic) {
        super::sequence::Sequenced::set_order(&mut topic, self.topics.len());
        self.topics.push(Arc::new(topic));
        self.refresh_stats();
    }

    pub(crate) fn topics_mut(&mut self) -> &mut Vec<Arc<Topic>> {
        &mut self.topics
    }

    pub(crate) fn topic_position(&self, topic_id: &TopicId) -> Option<usize> {
        position_of(&self.topics, topic_id)
    }

    pub(crate) fn refresh_stats(&mut self) {
        self.stats = Stats::from_topics(&self.topics);
    }

    /// A read-only projection over a subset of topics that keeps this sheet's stats.
    pub(crate) fn projected(&self, topics: Vec<Arc<Topic>>) -> Self {
        Self {
            id: self.id.clone(),
            slug: self.slug.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            topics,
            stats: self.stats,
        }
    }
}
