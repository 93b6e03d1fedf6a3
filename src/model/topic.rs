// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ids::{Id, QuestionId, QuestionIdTag, SubTopicId, SubTopicIdTag, TopicId, TopicIdTag};
use super::question::Question;
use super::sequence::{position_of, Sequenced};
use super::stats::Progress;

/// A top-level section of a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    id: TopicId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    sub_topics: Vec<Arc<SubTopic>>,
    #[serde(default)]
    order: usize,
}

impl Topic {
    pub fn new(id: TopicId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            sub_topics: Vec::new(),
            order: 0,
        }
    }

    pub fn id(&self) -> &TopicId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn sub_topics(&self) -> &[Arc<SubTopic>] {
        &self.sub_topics
    }

    pub fn sub_topic(&self, sub_topic_id: &SubTopicId) -> Option<&Arc<SubTopic>> {
        self.sub_topics.iter().find(|sub_topic| sub_topic.id() == sub_topic_id)
    }

    pub fn sub_topic_ids(&self) -> Vec<SubTopicId> {
        self.sub_topics.iter().map(|sub_topic| sub_topic.id().clone()).collect()
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn question_count(&self) -> usize {
        self.sub_topics.iter().map(|sub_topic| sub_topic.questions().len()).sum()
    }

    pub fn progress(&self) -> Progress {
        self.sub_topics
            .iter()
            .fold(Progress::default(), |acc, sub_topic| acc + sub_topic.progress())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description<T: Into<String>>(&mut self, description: Option<T>) {
        self.description = description.map(Into::into);
    }

    /// Appends a sub-topic, assigning it the next `order`.
    pub fn push_sub_topic(&mut self, mut sub_topic: SubTopic) {
        sub_topic.order = self.sub_topics.len();
        self.sub_topics.push(Arc::new(sub_topic));
    }

    pub(crate) fn sub_topics_mut(&mut self) -> &mut Vec<Arc<SubTopic>> {
        &mut self.sub_topics
    }

    pub(crate) fn sub_topic_position(&self, sub_topic_id: &SubTopicId) -> Option<usize> {
        position_of(&self.sub_topics, sub_topic_id)
    }

    /// A copy of this topic carrying a narrowed set of sub-topics (used by filtered views).
    pub(crate) fn with_sub_topics(&self, sub_topics: Vec<Arc<SubTopic>>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            sub_topics,
            order: self.order,
        }
    }
}

impl Sequenced for Topic {
    type Tag = TopicIdTag;

    fn id(&self) -> &Id<TopicIdTag> {
        &self.id
    }

    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// A group of questions inside a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTopic {
    id: SubTopicId,
    name: String,
    #[serde(default)]
    questions: Vec<Arc<Question>>,
    #[serde(default)]
    order: usize,
}

impl SubTopic {
    pub fn new(id: SubTopicId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            questions: Vec::new(),
            order: 0,
        }
    }

    pub fn id(&self) -> &SubTopicId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    pub fn question(&self, question_id: &QuestionId) -> Option<&Arc<Question>> {
        self.questions.iter().find(|question| question.id() == question_id)
    }

    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.questions.iter().map(|question| question.id().clone()).collect()
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn progress(&self) -> Progress {
        let completed = self.questions.iter().filter(|question| question.completed()).count();
        Progress::new(completed, self.questions.len())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Appends a question, assigning it the next `order`.
    pub fn push_question(&mut self, mut question: Question) {
        question.set_order(self.questions.len());
        self.questions.push(Arc::new(question));
    }

    pub(crate) fn questions_mut(&mut self) -> &mut Vec<Arc<Question>> {
        &mut self.questions
    }

    pub(crate) fn question_position(&self, question_id: &QuestionId) -> Option<usize> {
        position_of(&self.questions, question_id)
    }

    pub(crate) fn with_questions(&self, questions: Vec<Arc<Question>>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            questions,
            order: self.order,
        }
    }
}

impl Sequenced for SubTopic {
    type Tag = SubTopicIdTag;

    fn id(&self) -> &Id<SubTopicIdTag> {
        &self.id
    }

    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

impl Sequenced for Question {
    type Tag = QuestionIdTag;

    fn id(&self) -> &Id<QuestionIdTag> {
        Question::id(self)
    }

    fn order(&self) -> usize {
        Question::order(self)
    }

    fn set_order(&mut self, order: usize) {
        Question::set_order(self, order);
    }
}
