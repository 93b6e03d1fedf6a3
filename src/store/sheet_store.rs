// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::lanes::{LaneGuard, LaneKey, Lanes};
use crate::backend::{BackendError, SheetBackend};
use crate::model::{Question, QuestionId, Sheet, SubTopicId, TopicId};
use crate::ops::{
    apply_op, move_item, EntityKind, NewQuestion, NewSubTopic, NewTopic, Op, OpError,
    QuestionOp, QuestionPatch, SubTopicOp, SubTopicPatch, TopicOp, TopicPatch,
};
use crate::query::filter_sheet;
use crate::ui::UiState;

/// A cheap, cloneable view of the store.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub sheet: Option<Arc<Sheet>>,
    pub loading: bool,
    /// User-facing message of the last failed operation; cleared by the next success.
    pub error: Option<String>,
    pub ui: UiState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    LoadSheet,
    CreateTopic,
    UpdateTopic,
    DeleteTopic,
    ReorderTopics,
    CreateSubTopic,
    UpdateSubTopic,
    DeleteSubTopic,
    ReorderSubTopics,
    CreateQuestion,
    UpdateQuestion,
    DeleteQuestion,
    ReorderQuestions,
    ToggleQuestion,
}

impl StoreAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadSheet => "load sheet",
            Self::CreateTopic => "create topic",
            Self::UpdateTopic => "update topic",
            Self::DeleteTopic => "delete topic",
            Self::ReorderTopics => "reorder topics",
            Self::CreateSubTopic => "create sub-topic",
            Self::UpdateSubTopic => "update sub-topic",
            Self::DeleteSubTopic => "delete sub-topic",
            Self::ReorderSubTopics => "reorder sub-topics",
            Self::CreateQuestion => "create question",
            Self::UpdateQuestion => "update question",
            Self::DeleteQuestion => "delete question",
            Self::ReorderQuestions => "reorder questions",
            Self::ToggleQuestion => "toggle question",
        }
    }

    pub fn failure_message(self) -> String {
        match self {
            Self::LoadSheet => "Unable to load sheet".to_owned(),
            other => format!("Failed to {other}"),
        }
    }
}

impl fmt::Display for StoreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no sheet loaded")]
    NotLoaded,
    #[error(transparent)]
    Invalid(#[from] OpError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StoreError {
    /// The short message shown to users; details go to the log.
    pub fn user_message(&self, action: StoreAction) -> String {
        match self {
            Self::NotLoaded => "No sheet loaded".to_owned(),
            _ => action.failure_message(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotLoaded => false,
            Self::Invalid(err) => err.is_not_found(),
            Self::Backend(err) => err.is_not_found(),
        }
    }
}

/// State container for one sheet, backed by an injected [`SheetBackend`].
///
/// Every mutation goes to the backend first; the local snapshot is only patched from a successful
/// response, never optimistically. Patching copies the path to the changed entity and shares every
/// other subtree with the previous snapshot.
pub struct SheetStore {
    backend: Arc<dyn SheetBackend>,
    state: Mutex<StoreState>,
    lanes: Lanes,
}

impl fmt::Debug for SheetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetStore").finish_non_exhaustive()
    }
}

impl SheetStore {
    pub fn new(backend: Arc<dyn SheetBackend>) -> Self {
        Self {
            backend,
            state: Mutex::new(StoreState::default()),
            lanes: Lanes::default(),
        }
    }

    pub async fn state(&self) -> StoreState {
        self.state.lock().await.clone()
    }

    pub async fn sheet(&self) -> Option<Arc<Sheet>> {
        self.state.lock().await.sheet.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    /// The snapshot narrowed by the current search query.
    pub async fn filtered_sheet(&self) -> Option<Arc<Sheet>> {
        let state = self.state.lock().await;
        let sheet = state.sheet.as_ref()?;
        Some(filter_sheet(sheet, state.ui.search_query()))
    }

    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.state.lock().await.ui.set_search_query(query);
    }

    /// Ignored unless `topic_id` is a topic of the loaded sheet.
    pub async fn toggle_collapse(&self, topic_id: &TopicId) {
        let mut state = self.state.lock().await;
        let known = state
            .sheet
            .as_ref()
            .is_some_and(|sheet| sheet.topic(topic_id).is_some());
        if known {
            state.ui.toggle_collapse(topic_id);
        }
    }

    /// Collapses all topics, or expands all when every topic is already collapsed.
    pub async fn toggle_all(&self) {
        let mut state = self.state.lock().await;
        let Some(sheet) = state.sheet.clone() else {
            return;
        };
        state.ui.toggle_all(&sheet.topic_ids());
    }

    pub async fn load_sheet(&self, slug: &str) -> Result<(), StoreError> {
        let _lane = self.lanes.acquire(&[LaneKey::Sheet]).await;
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }

        let fetched = self.backend.fetch_sheet(slug).await;
        let result = {
            let mut state = self.state.lock().await;
            state.loading = false;
            match fetched {
                Ok(sheet) => {
                    tracing::info!(
                        slug = sheet.slug(),
                        topics = sheet.topics().len(),
                        total_questions = sheet.stats().total_questions,
                        "sheet loaded"
                    );
                    install_snapshot(&mut state, sheet);
                    Ok(())
                }
                Err(err) => Err(StoreError::from(err)),
            }
        };
        self.settle(StoreAction::LoadSheet, result).await
    }

    pub async fn create_topic(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<TopicId, StoreError> {
        let _lane = self.lanes.acquire(&[LaneKey::Sheet]).await;
        let result = self.do_create_topic(name, description).await;
        self.settle(StoreAction::CreateTopic, result).await
    }

    pub async fn update_topic(
        &self,
        topic_id: &TopicId,
        patch: TopicPatch,
    ) -> Result<(), StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self.do_update_topic(topic_id, patch).await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::UpdateTopic, result).await
    }

    /// Deletes a topic with its subtree and drops it from the collapsed set.
    pub async fn delete_topic(&self, topic_id: &TopicId) -> Result<(), StoreError> {
        let lane = self
            .lanes
            .acquire(&[LaneKey::Sheet, topic_lane(topic_id)])
            .await;
        let result = self.do_delete_topic(topic_id).await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::DeleteTopic, result).await
    }

    pub async fn reorder_topics(&self, ordered_ids: &[TopicId]) -> Result<(), StoreError> {
        let _lane = self.lanes.acquire(&[LaneKey::Sheet]).await;
        let result = self.do_reorder_topics(ordered_ids).await;
        self.settle(StoreAction::ReorderTopics, result).await
    }

    /// Drag gesture: moves the topic at `from` to `to`.
    pub async fn move_topic(&self, from: usize, to: usize) -> Result<(), StoreError> {
        let _lane = self.lanes.acquire(&[LaneKey::Sheet]).await;
        let result = self.do_move_topic(from, to).await;
        self.settle(StoreAction::ReorderTopics, result).await
    }

    pub async fn create_sub_topic(
        &self,
        topic_id: &TopicId,
        name: &str,
    ) -> Result<SubTopicId, StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self.do_create_sub_topic(topic_id, name).await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::CreateSubTopic, result).await
    }

    pub async fn update_sub_topic(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        patch: SubTopicPatch,
    ) -> Result<(), StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self
            .do_update_sub_topic(topic_id, sub_topic_id, patch)
            .await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::UpdateSubTopic, result).await
    }

    pub async fn delete_sub_topic(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
    ) -> Result<(), StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self.do_delete_sub_topic(topic_id, sub_topic_id).await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::DeleteSubTopic, result).await
    }

    pub async fn reorder_sub_topics(
        &self,
        topic_id: &TopicId,
        ordered_ids: &[SubTopicId],
    ) -> Result<(), StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self.do_reorder_sub_topics(topic_id, ordered_ids).await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::ReorderSubTopics, result).await
    }

    pub async fn move_sub_topic(
        &self,
        topic_id: &TopicId,
        from: usize,
        to: usize,
    ) -> Result<(), StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self.do_move_sub_topic(topic_id, from, to).await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::ReorderSubTopics, result).await
    }

    pub async fn create_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question: NewQuestion,
    ) -> Result<QuestionId, StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self
            .do_create_question(topic_id, sub_topic_id, question)
            .await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::CreateQuestion, result).await
    }

    pub async fn update_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
        patch: QuestionPatch,
    ) -> Result<(), StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self
            .do_update_question(topic_id, sub_topic_id, question_id, patch)
            .await
            .map(|_| ());
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::UpdateQuestion, result).await
    }

    pub async fn delete_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
    ) -> Result<(), StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self
            .do_delete_question(topic_id, sub_topic_id, question_id)
            .await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::DeleteQuestion, result).await
    }

    pub async fn reorder_questions(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        ordered_ids: &[QuestionId],
    ) -> Result<(), StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self
            .do_reorder_questions(topic_id, sub_topic_id, ordered_ids)
            .await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::ReorderQuestions, result).await
    }

    pub async fn move_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        from: usize,
        to: usize,
    ) -> Result<(), StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self
            .do_move_question(topic_id, sub_topic_id, from, to)
            .await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::ReorderQuestions, result).await
    }

    /// Flips the completion flag as currently shown; returns the new flag.
    pub async fn toggle_question_complete(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
    ) -> Result<bool, StoreError> {
        let lane = self.lanes.acquire(&[topic_lane(topic_id)]).await;
        let result = self
            .do_toggle_question(topic_id, sub_topic_id, question_id)
            .await;
        self.release_topic_lane(topic_id, lane).await;
        self.settle(StoreAction::ToggleQuestion, result).await
    }

    async fn do_create_topic(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<TopicId, StoreError> {
        let payload = NewTopic::new(name, description)?;
        self.loaded_sheet().await?;

        let topic = self.backend.create_topic(payload).await?;
        let topic_id = topic.id().clone();
        self.reconcile(Op::Topic(TopicOp::Insert { topic })).await?;
        Ok(topic_id)
    }

    async fn do_update_topic(
        &self,
        topic_id: &TopicId,
        patch: TopicPatch,
    ) -> Result<(), StoreError> {
        let patch = patch.normalized()?;
        self.loaded_sheet().await?;

        let topic = self.backend.update_topic(topic_id, patch).await?;
        self.reconcile(Op::Topic(TopicOp::Replace { topic })).await
    }

    async fn do_delete_topic(&self, topic_id: &TopicId) -> Result<(), StoreError> {
        self.loaded_sheet().await?;

        self.backend.delete_topic(topic_id).await?;
        self.reconcile(Op::Topic(TopicOp::Remove {
            topic_id: topic_id.clone(),
        }))
        .await
    }

    async fn do_reorder_topics(&self, ordered_ids: &[TopicId]) -> Result<(), StoreError> {
        self.loaded_sheet().await?;

        self.backend.reorder_topics(ordered_ids).await?;
        self.reconcile(Op::Topic(TopicOp::Reorder {
            ordered_ids: ordered_ids.to_vec(),
        }))
        .await
    }

    async fn do_move_topic(&self, from: usize, to: usize) -> Result<(), StoreError> {
        let sheet = self.loaded_sheet().await?;
        let ordered_ids = move_item(&sheet.topic_ids(), from, to)?;
        if from == to {
            return Ok(());
        }
        self.do_reorder_topics(&ordered_ids).await
    }

    async fn do_create_sub_topic(
        &self,
        topic_id: &TopicId,
        name: &str,
    ) -> Result<SubTopicId, StoreError> {
        let payload = NewSubTopic::new(name)?;
        self.loaded_sheet().await?;

        let sub_topic = self.backend.create_sub_topic(topic_id, payload).await?;
        let sub_topic_id = sub_topic.id().clone();
        self.reconcile(Op::SubTopic(SubTopicOp::Insert {
            topic_id: topic_id.clone(),
            sub_topic,
        }))
        .await?;
        Ok(sub_topic_id)
    }

    async fn do_update_sub_topic(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        patch: SubTopicPatch,
    ) -> Result<(), StoreError> {
        let patch = patch.normalized()?;
        self.loaded_sheet().await?;

        let sub_topic = self
            .backend
            .update_sub_topic(topic_id, sub_topic_id, patch)
            .await?;
        self.reconcile(Op::SubTopic(SubTopicOp::Replace {
            topic_id: topic_id.clone(),
            sub_topic,
        }))
        .await
    }

    async fn do_delete_sub_topic(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
    ) -> Result<(), StoreError> {
        self.loaded_sheet().await?;

        self.backend.delete_sub_topic(topic_id, sub_topic_id).await?;
        self.reconcile(Op::SubTopic(SubTopicOp::Remove {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
        }))
        .await
    }

    async fn do_reorder_sub_topics(
        &self,
        topic_id: &TopicId,
        ordered_ids: &[SubTopicId],
    ) -> Result<(), StoreError> {
        self.loaded_sheet().await?;

        self.backend
            .reorder_sub_topics(topic_id, ordered_ids)
            .await?;
        self.reconcile(Op::SubTopic(SubTopicOp::Reorder {
            topic_id: topic_id.clone(),
            ordered_ids: ordered_ids.to_vec(),
        }))
        .await
    }

    async fn do_move_sub_topic(
        &self,
        topic_id: &TopicId,
        from: usize,
        to: usize,
    ) -> Result<(), StoreError> {
        let sheet = self.loaded_sheet().await?;
        let topic = sheet
            .topic(topic_id)
            .ok_or_else(|| not_found(EntityKind::Topic, topic_id))?;
        let ordered_ids = move_item(&topic.sub_topic_ids(), from, to)?;
        if from == to {
            return Ok(());
        }
        self.do_reorder_sub_topics(topic_id, &ordered_ids).await
    }

    async fn do_create_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question: NewQuestion,
    ) -> Result<QuestionId, StoreError> {
        self.loaded_sheet().await?;

        let question = self
            .backend
            .create_question(topic_id, sub_topic_id, question)
            .await?;
        let question_id = question.id().clone();
        self.reconcile(Op::Question(QuestionOp::Insert {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
            question,
        }))
        .await?;
        Ok(question_id)
    }

    async fn do_update_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
        patch: QuestionPatch,
    ) -> Result<Question, StoreError> {
        let patch = patch.normalized()?;
        self.loaded_sheet().await?;

        let question = self
            .backend
            .update_question(topic_id, sub_topic_id, question_id, patch)
            .await?;
        self.reconcile(Op::Question(QuestionOp::Replace {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
            question: question.clone(),
        }))
        .await?;
        Ok(question)
    }

    async fn do_delete_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
    ) -> Result<(), StoreError> {
        self.loaded_sheet().await?;

        self.backend
            .delete_question(topic_id, sub_topic_id, question_id)
            .await?;
        self.reconcile(Op::Question(QuestionOp::Remove {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
            question_id: question_id.clone(),
        }))
        .await
    }

    async fn do_reorder_questions(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        ordered_ids: &[QuestionId],
    ) -> Result<(), StoreError> {
        self.loaded_sheet().await?;

        self.backend
            .reorder_questions(topic_id, sub_topic_id, ordered_ids)
            .await?;
        self.reconcile(Op::Question(QuestionOp::Reorder {
            topic_id: topic_id.clone(),
            sub_topic_id: sub_topic_id.clone(),
            ordered_ids: ordered_ids.to_vec(),
        }))
        .await
    }

    async fn do_move_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        from: usize,
        to: usize,
    ) -> Result<(), StoreError> {
        let sheet = self.loaded_sheet().await?;
        let sub_topic = sheet
            .topic(topic_id)
            .ok_or_else(|| not_found(EntityKind::Topic, topic_id))?
            .sub_topic(sub_topic_id)
            .ok_or_else(|| not_found(EntityKind::SubTopic, sub_topic_id))?;
        let ordered_ids = move_item(&sub_topic.question_ids(), from, to)?;
        if from == to {
            return Ok(());
        }
        self.do_reorder_questions(topic_id, sub_topic_id, &ordered_ids)
            .await
    }

    async fn do_toggle_question(
        &self,
        topic_id: &TopicId,
        sub_topic_id: &SubTopicId,
        question_id: &QuestionId,
    ) -> Result<bool, StoreError> {
        let sheet = self.loaded_sheet().await?;
        let current = sheet
            .question(topic_id, sub_topic_id, question_id)
            .ok_or_else(|| not_found(EntityKind::Question, question_id))?
            .completed();

        let question = self
            .do_update_question(
                topic_id,
                sub_topic_id,
                question_id,
                QuestionPatch::completed(!current),
            )
            .await?;
        Ok(question.completed())
    }

    async fn loaded_sheet(&self) -> Result<Arc<Sheet>, StoreError> {
        self.state
            .lock()
            .await
            .sheet
            .clone()
            .ok_or(StoreError::NotLoaded)
    }

    /// Applies the backend-confirmed `op` to the latest snapshot.
    ///
    /// If the snapshot no longer accepts the op it has drifted from the backend, and the sheet is
    /// refetched instead.
    async fn reconcile(&self, op: Op) -> Result<(), StoreError> {
        let (slug, err) = {
            let mut state = self.state.lock().await;
            let current = state.sheet.as_ref().ok_or(StoreError::NotLoaded)?;
            let mut next = Sheet::clone(current);
            match apply_op(&mut next, &op) {
                Ok(applied) => {
                    tracing::debug!(
                        stats_recomputed = applied.stats_recomputed,
                        completed_questions = next.stats().completed_questions,
                        total_questions = next.stats().total_questions,
                        "snapshot reconciled"
                    );
                    install_snapshot(&mut state, next);
                    return Ok(());
                }
                Err(err) => (current.slug().to_owned(), err),
            }
        };

        tracing::warn!(error = %err, slug = %slug, "snapshot diverged from backend; refetching");
        let sheet = self.backend.fetch_sheet(&slug).await?;
        install_snapshot(&mut *self.state.lock().await, sheet);
        Ok(())
    }

    /// Releases a topic lane, dropping it when the topic is not in the snapshot.
    async fn release_topic_lane(&self, topic_id: &TopicId, lane: LaneGuard) {
        drop(lane);
        let known = self
            .state
            .lock()
            .await
            .sheet
            .as_ref()
            .is_some_and(|sheet| sheet.topic(topic_id).is_some());
        if !known {
            self.lanes.forget(&topic_lane(topic_id)).await;
        }
    }

    #[cfg(test)]
    pub(crate) async fn lane_count(&self) -> usize {
        self.lanes.len().await
    }

    async fn settle<T>(
        &self,
        action: StoreAction,
        result: Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.state.lock().await;
        match &result {
            Ok(_) => state.error = None,
            Err(err) => {
                tracing::warn!(action = %action, error = %err, "store operation failed");
                state.error = Some(err.user_message(action));
            }
        }
        result
    }
}

/// Swaps in a new snapshot and prunes collapsed ids of topics it no longer has.
fn install_snapshot(state: &mut StoreState, sheet: Sheet) {
    state.ui.retain_topics(&sheet.topic_ids());
    state.sheet = Some(Arc::new(sheet));
}

fn topic_lane(topic_id: &TopicId) -> LaneKey {
    LaneKey::Topic(topic_id.clone())
}

fn not_found<T>(kind: EntityKind, id: &crate::model::Id<T>) -> StoreError {
    StoreError::Invalid(OpError::NotFound {
        kind,
        id: id.to_string(),
    })
}
