// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Data access boundary.
//!
//! `SheetBackend` is what a remote service would implement. Every call is async and returns the
//! entity as the backend now holds it, so the store can reconcile its snapshot structurally.

mod mock;

pub use mock::{MockBackend, MockBackendConfig};

use async_trait::async_trait;

use crate::model::{Question, QuestionId, Sheet, SubTopic, SubTopicId, Topic, TopicId};
use crate::ops::{
    NewQuestion, NewSubTopic, NewTopic, OpError, QuestionPatch, SubTopicPatch, TopicPatch,
};

#[async_trait]
pub trait SheetBackend: Send + Sync {
    /// Returns a deep copy of the sheet; the caller may mutate it freely.
    async fn fetch_sheet(&self, slug: &str) -> Result<Sheet, BackendError>;

    async fn create_topic(&self, topic: NewTopic) -> Result<Topic, BackendError>;
    async fn update_topic(
        &self,
        topic_id: &TopicId,
        patch: TopicPatch,
    ) -> Result<Topic, BackendError>;
    async fn delete_topic(&self, topic_id: &TopicId) -> Result<(), BackendError>;
    async fn reorder_topics(&self, ordered_ids: &[TopicId]) -> Result<(), BackendError>;

    async fn create_sub_topic(
        &self,
        topic_id: &TopicId,
        sub_topic: NewSubTopic,
    ) -> Result<SubTopic, BackendError>;
    async fn update_sub_topic(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        patch: SubTopicPatch,
    ) -> Result<SubTopic, BackendError>;
    async fn delete_sub_topic(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
    ) -> Result<(), BackendError>;
    async fn reorder_sub_topics(
        &self,
        topic_id: &TopicId,
        ordered_ids: &[SubTopicId],
    ) -> Result<(), BackendError>;

    async fn create_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question: NewQuestion,
    ) -> Result<Question, BackendError>;
    async fn update_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
        patch: QuestionPatch,
    ) -> Result<Question, BackendError>;
    async fn delete_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
    ) -> Result<(), BackendError>;
    async fn reorder_questions(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        ordered_ids: &[QuestionId],
    ) -> Result<(), BackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Op(#[from] OpError),
    #[error("sheet codec error: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("backend unavailable: {reason}")]
    Unavailable { reason: String },
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Op(err) if err.is_not_found())
    }
}
