// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Topic/sub-topic/question mutation helpers used by `apply_op`.
/// Each returns whether the sheet stats must be recomputed.
fn apply_topic_op(sheet: &mut Sheet, op: &TopicOp) -> Result<bool, OpError> {
    match op {
        TopicOp::Insert { topic } => {
            if sheet.topic_position(topic.id()).is_some() {
                return Err(already_exists(EntityKind::Topic, topic.id()));
            }
            let mut topic = topic.clone();
            topic.set_order(sheet.topics().len());
            let has_questions = topic.question_count() > 0;
            sheet.topics_mut().push(Arc::new(topic));
            Ok(has_questions)
        }
        TopicOp::Update { topic_id, patch } => {
            let topic = topic_mut(sheet, topic_id)?;
            if let Some(name) = &patch.name {
                topic.set_name(name.clone());
            }
            if let Some(description) = &patch.description {
                topic.set_description(description.clone());
            }
            Ok(false)
        }
        TopicOp::Replace { topic } => {
            let position = sheet
                .topic_position(topic.id())
                .ok_or_else(|| not_found(EntityKind::Topic, topic.id()))?;
            let mut replacement = topic.clone();
            replacement.set_order(position);
            sheet.topics_mut()[position] = Arc::new(replacement);
            Ok(true)
        }
        TopicOp::Remove { topic_id } => {
            let position = sheet
                .topic_position(topic_id)
                .ok_or_else(|| not_found(EntityKind::Topic, topic_id))?;
            let removed = sheet.topics_mut().remove(position);
            renumber(sheet.topics_mut());
            Ok(removed.question_count() > 0)
        }
        TopicOp::Reorder { ordered_ids } => {
            reorder_sequence(sheet.topics_mut(), ordered_ids).map_err(|source| {
                OpError::InvalidReorder {
                    kind: EntityKind::Topic,
                    source,
                }
            })?;
            Ok(false)
        }
    }
}

fn apply_sub_topic_op(sheet: &mut Sheet, op: &SubTopicOp) -> Result<bool, OpError> {
    match op {
        SubTopicOp::Insert {
            topic_id,
            sub_topic,
        } => {
            let topic = topic_mut(sheet, topic_id)?;
            if topic.sub_topic_position(sub_topic.id()).is_some() {
                return Err(already_exists(EntityKind::SubTopic, sub_topic.id()));
            }
            let mut sub_topic = sub_topic.clone();
            sub_topic.set_order(topic.sub_topics().len());
            let has_questions = !sub_topic.questions().is_empty();
            topic.sub_topics_mut().push(Arc::new(sub_topic));
            Ok(has_questions)
        }
        SubTopicOp::Update {
            topic_id,
            sub_topic_id,
            patch,
        } => {
            let sub_topic = sub_topic_mut(sheet, topic_id, sub_topic_id)?;
            if let Some(name) = &patch.name {
                sub_topic.set_name(name.clone());
            }
            Ok(false)
        }
        SubTopicOp::Replace {
            topic_id,
            sub_topic,
        } => {
            let topic = topic_mut(sheet, topic_id)?;
            let position = topic
                .sub_topic_position(sub_topic.id())
                .ok_or_else(|| not_found(EntityKind::SubTopic, sub_topic.id()))?;
            let mut replacement = sub_topic.clone();
            replacement.set_order(position);
            topic.sub_topics_mut()[position] = Arc::new(replacement);
            Ok(true)
        }
        SubTopicOp::Remove {
            topic_id,
            sub_topic_id,
        } => {
            let topic = topic_mut(sheet, topic_id)?;
            let position = topic
                .sub_topic_position(sub_topic_id)
                .ok_or_else(|| not_found(EntityKind::SubTopic, sub_topic_id))?;
            let removed = topic.sub_topics_mut().remove(position);
            renumber(topic.sub_topics_mut());
            Ok(!removed.questions().is_empty())
        }
        SubTopicOp::Reorder {
            topic_id,
            ordered_ids,
        } => {
            let topic = topic_mut(sheet, topic_id)?;
            reorder_sequence(topic.sub_topics_mut(), ordered_ids).map_err(|source| {
                OpError::InvalidReorder {
                    kind: EntityKind::SubTopic,
                    source,
                }
            })?;
            Ok(false)
        }
    }
}

fn apply_question_op(sheet: &mut Sheet, op: &QuestionOp) -> Result<bool, OpError> {
    match op {
        QuestionOp::Insert {
            topic_id,
            sub_topic_id,
            question,
        } => {
            let sub_topic = sub_topic_mut(sheet, topic_id, sub_topic_id)?;
            if sub_topic.question_position(question.id()).is_some() {
                return Err(already_exists(EntityKind::Question, question.id()));
            }
            let mut question = question.clone();
            question.set_order(sub_topic.questions().len());
            sub_topic.questions_mut().push(Arc::new(question));
            Ok(true)
        }
        QuestionOp::Update {
            topic_id,
            sub_topic_id,
            question_id,
            patch,
        } => {
            let sub_topic = sub_topic_mut(sheet, topic_id, sub_topic_id)?;
            let position = sub_topic
                .question_position(question_id)
                .ok_or_else(|| not_found(EntityKind::Question, question_id))?;
            let question = Arc::make_mut(&mut sub_topic.questions_mut()[position]);
            if let Some(title) = &patch.title {
                question.set_title(title.clone());
            }
            if let Some(difficulty) = patch.difficulty {
                question.set_difficulty(difficulty);
            }
            if let Some(url) = &patch.url {
                question.set_url(url.clone());
            }
            if let Some(notes) = &patch.notes {
                question.set_notes(notes.clone());
            }
            if let Some(completed) = patch.completed {
                question.set_completed(completed);
            }
            Ok(patch.affects_stats())
        }
        QuestionOp::Replace {
            topic_id,
            sub_topic_id,
            question,
        } => {
            let sub_topic = sub_topic_mut(sheet, topic_id, sub_topic_id)?;
            let position = sub_topic
                .question_position(question.id())
                .ok_or_else(|| not_found(EntityKind::Question, question.id()))?;
            let mut replacement = question.clone();
            replacement.set_order(position);
            sub_topic.questions_mut()[position] = Arc::new(replacement);
            Ok(true)
        }
        QuestionOp::Remove {
            topic_id,
            sub_topic_id,
            question_id,
        } => {
            let sub_topic = sub_topic_mut(sheet, topic_id, sub_topic_id)?;
            let position = sub_topic
                .question_position(question_id)
                .ok_or_else(|| not_found(EntityKind::Question, question_id))?;
            sub_topic.questions_mut().remove(position);
            renumber(sub_topic.questions_mut());
            Ok(true)
        }
        QuestionOp::Reorder {
            topic_id,
            sub_topic_id,
            ordered_ids,
        } => {
            let sub_topic = sub_topic_mut(sheet, topic_id, sub_topic_id)?;
            reorder_sequence(sub_topic.questions_mut(), ordered_ids).map_err(|source| {
                OpError::InvalidReorder {
                    kind: EntityKind::Question,
                    source,
                }
            })?;
            Ok(false)
        }
    }
}

/// Copy-on-write access to one topic; siblings keep sharing their `Arc`s.
fn topic_mut<'a>(sheet: &'a mut Sheet, topic_id: &TopicId) -> Result<&'a mut Topic, OpError> {
    let position = sheet
        .topic_position(topic_id)
        .ok_or_else(|| not_found(EntityKind::Topic, topic_id))?;
    Ok(Arc::make_mut(&mut sheet.topics_mut()[position]))
}

fn sub_topic_mut<'a>(
    sheet: &'a mut Sheet,
    topic_id: &TopicId,
    sub_topic_id: &SubTopicId,
) -> Result<&'a mut SubTopic, OpError> {
    // Look up before taking the copy-on-write path so a miss never clones the topic.
    let position = sheet
        .topic(topic_id)
        .ok_or_else(|| not_found(EntityKind::Topic, topic_id))?
        .sub_topic_position(sub_topic_id)
        .ok_or_else(|| not_found(EntityKind::SubTopic, sub_topic_id))?;
    let topic = topic_mut(sheet, topic_id)?;
    Ok(Arc::make_mut(&mut topic.sub_topics_mut()[position]))
}

/// Replaces `items` with the permutation named by `ordered_ids` and renumbers `order`.
///
/// `ordered_ids` must name every current element exactly once.
fn reorder_sequence<T: Sequenced>(
    items: &mut Vec<Arc<T>>,
    ordered_ids: &[Id<T::Tag>],
) -> Result<(), ReorderError> {
    if ordered_ids.len() != items.len() {
        return Err(ReorderError::LengthMismatch {
            expected: items.len(),
            found: ordered_ids.len(),
        });
    }

    let positions: HashMap<&str, usize> = items
        .iter()
        .enumerate()
        .map(|(position, item)| (item.id().as_str(), position))
        .collect();
    let mut taken = vec![false; items.len()];
    let mut permutation = Vec::with_capacity(items.len());
    for id in ordered_ids {
        let Some(&position) = positions.get(id.as_str()) else {
            return Err(ReorderError::UnknownId { id: id.to_string() });
        };
        if std::mem::replace(&mut taken[position], true) {
            return Err(ReorderError::DuplicateId { id: id.to_string() });
        }
        permutation.push(position);
    }

    let mut slots: Vec<Option<Arc<T>>> = std::mem::take(items).into_iter().map(Some).collect();
    *items = permutation
        .into_iter()
        .filter_map(|position| slots[position].take())
        .collect();
    renumber(items);
    Ok(())
}

fn not_found<T>(kind: EntityKind, id: &Id<T>) -> OpError {
    OpError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn already_exists<T>(kind: EntityKind, id: &Id<T>) -> OpError {
    OpError::AlreadyExists {
        kind,
        id: id.to_string(),
    }
}
