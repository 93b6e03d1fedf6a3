// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for sheets.
//!
//! Both the backend (against its canonical sheet) and the store (against its local snapshot) apply
//! the same ops. Application is atomic: on error the sheet is left exactly as it was.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::sequence::{renumber, Sequenced};
use crate::model::{
    Difficulty, Id, Question, QuestionId, Sheet, SubTopic, SubTopicId, Topic, TopicId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Topic,
    SubTopic,
    Question,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Topic => "topic",
            Self::SubTopic => "sub-topic",
            Self::Question => "question",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Topic(TopicOp),
    SubTopic(SubTopicOp),
    Question(QuestionOp),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicOp {
    Insert { topic: Topic },
    Update { topic_id: TopicId, patch: TopicPatch },
    Replace { topic: Topic },
    Remove { topic_id: TopicId },
    Reorder { ordered_ids: Vec<TopicId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubTopicOp {
    Insert {
        topic_id: TopicId,
        sub_topic: SubTopic,
    },
    Update {
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        patch: SubTopicPatch,
    },
    Replace {
        topic_id: TopicId,
        sub_topic: SubTopic,
    },
    Remove {
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
    },
    Reorder {
        topic_id: TopicId,
        ordered_ids: Vec<SubTopicId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionOp {
    Insert {
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question: Question,
    },
    Update {
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
        patch: QuestionPatch,
    },
    Replace {
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question: Question,
    },
    Remove {
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    },
    Reorder {
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        ordered_ids: Vec<QuestionId>,
    },
}

/// Partial update of a topic. `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubTopicPatch {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPatch {
    pub title: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub url: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TopicPatch {
    pub fn normalized(self) -> Result<Self, OpError> {
        Ok(Self {
            name: self.name.map(|name| required_text("name", &name)).transpose()?,
            description: self.description.map(|value| optional_text(value.as_deref())),
        })
    }
}

impl SubTopicPatch {
    pub fn normalized(self) -> Result<Self, OpError> {
        Ok(Self {
            name: self.name.map(|name| required_text("name", &name)).transpose()?,
        })
    }
}

impl QuestionPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn normalized(self) -> Result<Self, OpError> {
        Ok(Self {
            title: self.title.map(|title| required_text("title", &title)).transpose()?,
            difficulty: self.difficulty,
            url: self.url.map(|value| optional_text(value.as_deref())),
            notes: self.notes.map(|value| optional_text(value.as_deref())),
            completed: self.completed,
        })
    }

    /// Whether applying this patch can change the sheet stats.
    pub fn affects_stats(&self) -> bool {
        self.completed.is_some() || self.difficulty.is_some()
    }
}

/// Validated payload for creating a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    name: String,
    description: Option<String>,
}

impl NewTopic {
    pub fn new(name: &str, description: Option<&str>) -> Result<Self, OpError> {
        Ok(Self {
            name: required_text("name", name)?,
            description: optional_text(description),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn into_topic(self, topic_id: TopicId) -> Topic {
        let mut topic = Topic::new(topic_id, self.name);
        topic.set_description(self.description);
        topic
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubTopic {
    name: String,
}

impl NewSubTopic {
    pub fn new(name: &str) -> Result<Self, OpError> {
        Ok(Self {
            name: required_text("name", name)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_sub_topic(self, sub_topic_id: SubTopicId) -> SubTopic {
        SubTopic::new(sub_topic_id, self.name)
    }
}

/// Validated payload for creating a question; everything except identity and order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    title: String,
    difficulty: Difficulty,
    url: Option<String>,
    notes: Option<String>,
    completed: bool,
}

impl NewQuestion {
    pub fn new(title: &str, difficulty: Difficulty) -> Result<Self, OpError> {
        Ok(Self {
            title: required_text("title", title)?,
            difficulty,
            url: None,
            notes: None,
            completed: false,
        })
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = optional_text(Some(url));
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = optional_text(Some(notes));
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn into_question(self, question_id: QuestionId) -> Question {
        let mut question = Question::new(question_id, self.title, self.difficulty);
        question.set_url(self.url);
        question.set_notes(self.notes);
        question.set_completed(self.completed);
        question
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String, OpError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OpError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(ToOwned::to_owned)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyResult {
    pub stats_recomputed: bool,
}

/// Applies one op to `sheet`, recomputing stats when the question set may have changed.
pub fn apply_op(sheet: &mut Sheet, op: &Op) -> Result<ApplyResult, OpError> {
    let mut working = sheet.clone();

    let stats_recomputed = match op {
        Op::Topic(topic_op) => apply_topic_op(&mut working, topic_op)?,
        Op::SubTopic(sub_topic_op) => apply_sub_topic_op(&mut working, sub_topic_op)?,
        Op::Question(question_op) => apply_question_op(&mut working, question_op)?,
    };
    if stats_recomputed {
        working.refresh_stats();
    }

    *sheet = working;
    Ok(ApplyResult { stats_recomputed })
}

/// Translates a drag gesture (`from` index dropped at `to`) into the full new sequence.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, OpError> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(OpError::MoveOutOfRange { from, to, len });
    }

    let mut moved = items.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Ok(moved)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    #[error("expected {expected} ids, got {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("unknown id {id}")]
    UnknownId { id: String },
    #[error("duplicate id {id}")]
    DuplicateId { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("{kind} not found (id={id})")]
    NotFound { kind: EntityKind, id: String },
    #[error("{kind} already exists (id={id})")]
    AlreadyExists { kind: EntityKind, id: String },
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("invalid {kind} reorder: {source}")]
    InvalidReorder {
        kind: EntityKind,
        #[source]
        source: ReorderError,
    },
    #[error("move out of range (from={from}, to={to}, len={len})")]
    MoveOutOfRange { from: usize, to: usize, len: usize },
}

impl OpError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Extracted op-application implementation for topic/sub-topic/question mutations.
include!("ops_impl.rs");
