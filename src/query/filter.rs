// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use crate::model::{Question, Sheet, SubTopic, Topic};

/// Trimmed, lower-cased search text. Empty means "no filter".
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Projects `sheet` onto the entries matching `query`.
///
/// A topic whose name or description matches is kept whole. Otherwise questions are matched on
/// title or notes, and a sub-topic survives when its name matches or any question survives.
/// Containers left empty without a match of their own are dropped. Stats and `order` values are
/// those of the source sheet.
///
/// Returns `sheet` itself (same `Arc`) when the query is empty or filters nothing out.
pub fn filter_sheet(sheet: &Arc<Sheet>, query: &str) -> Arc<Sheet> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return Arc::clone(sheet);
    }

    let mut narrowed = false;
    let mut topics = Vec::with_capacity(sheet.topics().len());
    for topic in sheet.topics() {
        match filter_topic(topic, &needle) {
            Some(kept) => {
                narrowed |= !Arc::ptr_eq(&kept, topic);
                topics.push(kept);
            }
            None => narrowed = true,
        }
    }

    if !narrowed {
        return Arc::clone(sheet);
    }
    Arc::new(sheet.projected(topics))
}

fn filter_topic(topic: &Arc<Topic>, needle: &str) -> Option<Arc<Topic>> {
    let topic_matches = contains(topic.name(), needle)
        || topic.description().is_some_and(|text| contains(text, needle));
    if topic_matches {
        return Some(Arc::clone(topic));
    }

    let mut narrowed = false;
    let mut sub_topics = Vec::new();
    for sub_topic in topic.sub_topics() {
        match filter_sub_topic(sub_topic, needle) {
            Some(kept) => {
                narrowed |= !Arc::ptr_eq(&kept, sub_topic);
                sub_topics.push(kept);
            }
            None => narrowed = true,
        }
    }

    if sub_topics.is_empty() {
        return None;
    }
    if !narrowed {
        return Some(Arc::clone(topic));
    }
    Some(Arc::new(topic.with_sub_topics(sub_topics)))
}

fn filter_sub_topic(sub_topic: &Arc<SubTopic>, needle: &str) -> Option<Arc<SubTopic>> {
    let questions: Vec<Arc<Question>> = sub_topic
        .questions()
        .iter()
        .filter(|question| question_matches(question, needle))
        .cloned()
        .collect();

    if questions.is_empty() && !contains(sub_topic.name(), needle) {
        return None;
    }
    if questions.len() == sub_topic.questions().len() {
        return Some(Arc::clone(sub_topic));
    }
    Some(Arc::new(sub_topic.with_questions(questions)))
}

fn question_matches(question: &Question, needle: &str) -> bool {
    contains(question.title(), needle)
        || question.notes().is_some_and(|notes| contains(notes, needle))
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use super::{filter_sheet, normalize_query};
    use crate::model::fixtures::demo_sheet;
    use crate::model::{QuestionId, Sheet, SubTopicId, TopicId};
    use crate::ops::{apply_op, Op, QuestionOp, QuestionPatch};

    #[fixture]
    fn sheet() -> Arc<Sheet> {
        Arc::new(demo_sheet())
    }

    fn titles(sheet: &Sheet) -> Vec<&str> {
        sheet
            .topics()
            .iter()
            .flat_map(|topic| topic.sub_topics())
            .flat_map(|sub_topic| sub_topic.questions())
            .map(|question| question.title())
            .collect()
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_query_passes_the_sheet_through(sheet: Arc<Sheet>, #[case] query: &str) {
        assert!(Arc::ptr_eq(&filter_sheet(&sheet, query), &sheet));
    }

    #[rstest]
    fn question_title_match_keeps_only_its_chain(sheet: Arc<Sheet>) {
        let filtered = filter_sheet(&sheet, "  Two SUM ");

        assert_eq!(filtered.topics().len(), 1);
        let topic = &filtered.topics()[0];
        assert_eq!(topic.name(), "Arrays");
        assert_eq!(topic.sub_topics().len(), 1);
        assert_eq!(topic.sub_topics()[0].name(), "Easy Problems");
        assert_eq!(titles(&filtered), vec!["Two Sum"]);
        assert_eq!(filtered.stats(), sheet.stats());
    }

    #[rstest]
    fn topic_name_match_keeps_the_whole_topic(sheet: Arc<Sheet>) {
        let filtered = filter_sheet(&sheet, "arrays");

        assert_eq!(filtered.topics().len(), 1);
        assert!(Arc::ptr_eq(&filtered.topics()[0], &sheet.topics()[0]));
        assert_eq!(filtered.topics()[0].question_count(), 5);
    }

    #[rstest]
    fn topic_description_match_keeps_the_whole_topic(sheet: Arc<Sheet>) {
        let filtered = filter_sheet(&sheet, "memoization");

        assert_eq!(filtered.topics().len(), 1);
        assert_eq!(filtered.topics()[0].name(), "Dynamic Programming");
        assert_eq!(filtered.topics()[0].question_count(), 5);
    }

    #[rstest]
    fn sub_topic_name_match_survives_without_questions(sheet: Arc<Sheet>) {
        let filtered = filter_sheet(&sheet, "easy");

        assert_eq!(filtered.topics().len(), 1);
        let sub_topics = filtered.topics()[0].sub_topics();
        assert_eq!(sub_topics.len(), 1);
        assert_eq!(sub_topics[0].name(), "Easy Problems");
        assert!(sub_topics[0].questions().is_empty());
    }

    #[rstest]
    fn notes_are_searched(sheet: Arc<Sheet>) {
        let mut edited = Sheet::clone(&sheet);
        apply_op(
            &mut edited,
            &Op::Question(QuestionOp::Update {
                topic_id: TopicId::new("topic-3").expect("id"),
                sub_topic_id: SubTopicId::new("subtopic-3-1").expect("id"),
                question_id: QuestionId::new("q-3-1-2").expect("id"),
                patch: QuestionPatch {
                    notes: Some(Some("use a queue".to_owned())),
                    ..QuestionPatch::default()
                },
            }),
        )
        .expect("add notes");

        let filtered = filter_sheet(&Arc::new(edited), "QUEUE");
        assert_eq!(titles(&filtered), vec!["Level Order Traversal"]);
    }

    #[rstest]
    fn no_match_yields_an_empty_projection(sheet: Arc<Sheet>) {
        let filtered = filter_sheet(&sheet, "segment tree");
        assert!(filtered.topics().is_empty());
        assert_eq!(filtered.stats().total_questions, 16);
    }

    #[rstest]
    fn filtered_entries_keep_their_source_order(sheet: Arc<Sheet>) {
        let filtered = filter_sheet(&sheet, "list");

        let orders: Vec<usize> = filtered.topics().iter().map(|topic| topic.order()).collect();
        assert_eq!(orders, vec![1]);
        let question_orders: Vec<usize> = filtered.topics()[0]
            .sub_topics()
            .iter()
            .flat_map(|sub_topic| sub_topic.questions())
            .map(|question| question.order())
            .collect();
        assert_eq!(question_orders, vec![0, 1, 0, 1]);
    }

    #[test]
    fn normalize_query_trims_and_lowercases() {
        assert_eq!(normalize_query("  Two Sum\t"), "two sum");
    }
}
