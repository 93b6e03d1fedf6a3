// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{BackendError, SheetBackend};
use crate::model::fixtures::demo_sheet;
use crate::model::{Id, Question, QuestionId, Sheet, SubTopic, SubTopicId, Topic, TopicId};
use crate::ops::{
    apply_op, EntityKind, NewQuestion, NewSubTopic, NewTopic, Op, OpError, QuestionOp,
    QuestionPatch, SubTopicOp, SubTopicPatch, TopicOp, TopicPatch,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBackendConfig {
    pub fetch_latency: Duration,
    pub mutation_latency: Duration,
}

impl Default for MockBackendConfig {
    fn default() -> Self {
        Self {
            fetch_latency: Duration::from_millis(500),
            mutation_latency: Duration::from_millis(300),
        }
    }
}

impl MockBackendConfig {
    /// No simulated latency.
    pub fn instant() -> Self {
        Self {
            fetch_latency: Duration::ZERO,
            mutation_latency: Duration::ZERO,
        }
    }
}

#[derive(Debug)]
struct MockState {
    sheet: Sheet,
    pending_failure: Option<String>,
}

/// In-memory backend holding one canonical sheet.
///
/// Serves that sheet for every slug. Latency is simulated with `tokio::time::sleep`.
#[derive(Debug)]
pub struct MockBackend {
    state: Mutex<MockState>,
    config: MockBackendConfig,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(demo_sheet(), MockBackendConfig::default())
    }
}

impl MockBackend {
    pub fn new(sheet: Sheet, config: MockBackendConfig) -> Self {
        Self {
            state: Mutex::new(MockState {
                sheet,
                pending_failure: None,
            }),
            config,
        }
    }

    /// The demo sheet without latency; what most tests want.
    pub fn instant() -> Self {
        Self::new(demo_sheet(), MockBackendConfig::instant())
    }

    pub fn config(&self) -> MockBackendConfig {
        self.config
    }

    /// Makes the next call fail with `BackendError::Unavailable`.
    pub async fn inject_failure(&self, reason: impl Into<String>) {
        self.state.lock().await.pending_failure = Some(reason.into());
    }

    /// Current canonical sheet.
    pub async fn canonical(&self) -> Sheet {
        self.state.lock().await.sheet.clone()
    }

    async fn mutate<R>(
        &self,
        op: Op,
        read_back: impl FnOnce(&Sheet) -> Result<R, BackendError>,
    ) -> Result<R, BackendError> {
        tokio::time::sleep(self.config.mutation_latency).await;

        let mut state = self.state.lock().await;
        if let Some(reason) = state.pending_failure.take() {
            return Err(BackendError::Unavailable { reason });
        }
        let result = apply_op(&mut state.sheet, &op)?;
        tracing::debug!(
            stats_recomputed = result.stats_recomputed,
            total_questions = state.sheet.stats().total_questions,
            "mock backend applied op"
        );
        read_back(&state.sheet)
    }
}

fn detached<T: Clone, Tag>(
    entry: Option<&Arc<T>>,
    kind: EntityKind,
    id: &Id<Tag>,
) -> Result<T, BackendError> {
    entry.map(|arc| T::clone(arc)).ok_or_else(|| {
        BackendError::Op(OpError::NotFound {
            kind,
            id: id.to_string(),
        })
    })
}

#[async_trait]
impl SheetBackend for MockBackend {
    async fn fetch_sheet(&self, slug: &str) -> Result<Sheet, BackendError> {
        tokio::time::sleep(self.config.fetch_latency).await;

        let mut state = self.state.lock().await;
        if let Some(reason) = state.pending_failure.take() {
            return Err(BackendError::Unavailable { reason });
        }
        tracing::debug!(requested = slug, served = state.sheet.slug(), "mock backend fetch");
        // Round-trip through JSON so the caller never shares storage with canonical state.
        let bytes = serde_json::to_vec(&state.sheet)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn create_topic(&self, topic: NewTopic) -> Result<Topic, BackendError> {
        let topic_id = TopicId::generate("topic");
        let topic = topic.into_topic(topic_id.clone());
        self.mutate(Op::Topic(TopicOp::Insert { topic }), |sheet| {
            detached(sheet.topic(&topic_id), EntityKind::Topic, &topic_id)
        })
        .await
    }

    async fn update_topic(
        &self,
        topic_id: &TopicId,
        patch: TopicPatch,
    ) -> Result<Topic, BackendError> {
        let op = Op::Topic(TopicOp::Update {
            topic_id: topic_id.clone(),
            patch,
        });
        self.mutate(op, |sheet| {
            detached(sheet.topic(topic_id), EntityKind::Topic, topic_id)
        })
        .await
    }

    async fn delete_topic(&self, topic_id: &TopicId) -> Result<(), BackendError> {
        let op = Op::Topic(TopicOp::Remove {
            topic_id: topic_id.clone(),
        });
        self.mutate(op, |_| Ok(())).await
    }

    async fn reorder_topics(&self, ordered_ids: &[TopicId]) -> Result<(), BackendError> {
        let op = Op::Topic(TopicOp::Reorder {
            ordered_ids: ordered_ids.to_vec(),
        });
        self.mutate(op, |_| Ok(())).await
    }

    async fn create_sub_topic(
        &self,
        topic_id: &TopicId,
        sub_topic: NewSubTopic,
    ) -> Result<SubTopic, BackendError> {
        let sub_topic_id = SubTopicId::generate("subtopic");
        let op = Op::SubTopic(SubTopicOp::Insert {
            topic_id: topic_id.clone(),
            sub_topic: sub_topic.into_sub_topic(sub_topic_id.clone()),
        });
        self.mutate(op, |sheet| {
            detached(
                sheet.sub_topic(topic_id, &sub_topic_id),
                EntityKind::SubTopic,
                &sub_topic_id,
            )
        })
        .await
    }

    async fn update_sub_topic(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        patch: SubTopicPatch,
    ) -> Result<SubTopic, BackendError> {
        let op = Op::SubTopic(SubTopicOp::Update {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
            patch,
        });
        self.mutate(op, |sheet| {
            detached(
                sheet.sub_topic(topic_id, sub_topic_id),
                EntityKind::SubTopic,
                sub_topic_id,
            )
        })
        .await
    }

    async fn delete_sub_topic(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
    ) -> Result<(), BackendError> {
        let op = Op::SubTopic(SubTopicOp::Remove {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
        });
        self.mutate(op, |_| Ok(())).await
    }

    async fn reorder_sub_topics(
        &self,
        topic_id: &TopicId,
        ordered_ids: &[SubTopicId],
    ) -> Result<(), BackendError> {
        let op = Op::SubTopic(SubTopicOp::Reorder {
            topic_id: topic_id.clone(),
            ordered_ids: ordered_ids.to_vec(),
        });
        self.mutate(op, |_| Ok(())).await
    }

    async fn create_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question: NewQuestion,
    ) -> Result<Question, BackendError> {
        let question_id = QuestionId::generate("q");
        let op = Op::Question(QuestionOp::Insert {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
            question: question.into_question(question_id.clone()),
        });
        self.mutate(op, |sheet| {
            detached(
                sheet.question(topic_id, sub_topic_id, &question_id),
                EntityKind::Question,
                &question_id,
            )
        })
        .await
    }

    async fn update_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
        patch: QuestionPatch,
    ) -> Result<Question, BackendError> {
        let op = Op::Question(QuestionOp::Update {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
            question_id: question_id.clone(),
            patch,
        });
        self.mutate(op, |sheet| {
            detached(
                sheet.question(topic_id, sub_topic_id, question_id),
                EntityKind::Question,
                question_id,
            )
        })
        .await
    }

    async fn delete_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
    ) -> Result<(), BackendError> {
        let op = Op::Question(QuestionOp::Remove {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
            question_id: question_id.clone(),
        });
        self.mutate(op, |_| Ok(())).await
    }

    async fn reorder_questions(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        ordered_ids: &[QuestionId],
    ) -> Result<(), BackendError> {
        let op = Op::Question(QuestionOp::Reorder {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
            ordered_ids: ordered_ids.to_vec(),
        });
        self.mutate(op, |_| Ok(())).await
    }
}
