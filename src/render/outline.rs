// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::text::{fraction, truncate_with_ellipsis};
use super::RenderOptions;
use crate::model::{Question, Sheet, SubTopic, Topic};
use crate::ui::UiState;

/// Renders `sheet` as an indented outline.
///
/// Collapsed topics show only their header line.
pub fn render_outline(sheet: &Sheet, ui: &UiState, options: RenderOptions) -> String {
    let mut out = String::new();
    let stats = sheet.stats();
    let progress = sheet.progress();

    out.push_str(&format!(
        "{}  {} ({}%)\n",
        sheet.name(),
        fraction(progress),
        progress.percent()
    ));
    out.push_str(&format!(
        "Easy {} · Medium {} · Hard {}\n",
        stats.easy_questions, stats.medium_questions, stats.hard_questions
    ));

    if sheet.topics().is_empty() {
        out.push_str("(no topics)\n");
        return out;
    }

    for topic in sheet.topics() {
        push_topic(&mut out, topic, ui.is_collapsed(topic.id()), options);
    }
    out
}

fn push_topic(out: &mut String, topic: &Topic, collapsed: bool, options: RenderOptions) {
    let marker = if collapsed { '▸' } else { '▾' };
    out.push_str(&format!(
        "{marker} {}  {}\n",
        topic.name(),
        fraction(topic.progress())
    ));
    if collapsed {
        return;
    }

    for sub_topic in topic.sub_topics() {
        push_sub_topic(out, sub_topic, options);
    }
}

fn push_sub_topic(out: &mut String, sub_topic: &SubTopic, options: RenderOptions) {
    out.push_str(&format!(
        "    {}  {}\n",
        sub_topic.name(),
        fraction(sub_topic.progress())
    ));
    for question in sub_topic.questions() {
        push_question(out, question, options);
    }
}

fn push_question(out: &mut String, question: &Question, options: RenderOptions) {
    let check = if question.completed() { 'x' } else { ' ' };
    let title = truncate_with_ellipsis(question.title(), options.max_title_width);
    out.push_str(&format!(
        "      [{check}] {title} ({})\n",
        question.difficulty()
    ));

    if options.show_urls {
        if let Some(url) = question.url() {
            out.push_str(&format!("          {url}\n"));
        }
    }
    if options.show_notes {
        if let Some(notes) = question.notes() {
            out.push_str(&format!("          note: {notes}\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::render_outline;
    use crate::model::fixtures::demo_sheet;
    use crate::model::{
        Difficulty, Question, QuestionId, Sheet, SheetId, SubTopic, SubTopicId, Topic, TopicId,
    };
    use crate::query::filter_sheet;
    use crate::render::RenderOptions;
    use crate::ui::UiState;

    #[test]
    fn outline_shows_progress_at_every_level() {
        let out = render_outline(&demo_sheet(), &UiState::default(), RenderOptions::default());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "DSA Mastery Sheet  4/16 (25%)");
        assert_eq!(lines[1], "Easy 7 · Medium 8 · Hard 1");
        assert_eq!(lines[2], "▾ Arrays  3/5");
        assert_eq!(lines[3], "    Easy Problems  2/3");
        assert_eq!(lines[4], "      [x] Two Sum (Easy)");
        assert!(out.contains("      [ ] Edit Distance (Hard)\n"));
    }

    #[test]
    fn collapsed_topics_hide_their_children() {
        let mut ui = UiState::default();
        ui.toggle_collapse(&TopicId::new("topic-1").expect("topic id"));

        let out = render_outline(&demo_sheet(), &ui, RenderOptions::default());
        assert!(out.contains("▸ Arrays  3/5\n▾ Linked Lists  0/4\n"));
        assert!(!out.contains("Two Sum"));
    }

    #[test]
    fn long_titles_are_truncated_and_urls_optional() {
        let options = RenderOptions {
            show_urls: true,
            max_title_width: 8,
            ..RenderOptions::default()
        };
        let sheet = filter_sheet(&Arc::new(demo_sheet()), "container");

        let out = render_outline(&sheet, &UiState::default(), options);
        assert!(out.contains("[ ] Contain… (Medium)"));
        assert!(out.contains("https://leetcode.com/problems/container-with-most-water/"));
    }

    #[test]
    fn question_detail_lines_follow_their_question() {
        let mut question = Question::new(
            QuestionId::new("q-1").expect("id"),
            "Flood Fill",
            Difficulty::Easy,
        );
        question.set_url(Some("https://leetcode.com/problems/flood-fill/"));
        question.set_notes(Some("bfs from the seed"));
        let mut sub_topic = SubTopic::new(SubTopicId::new("st-1").expect("id"), "Basics");
        sub_topic.push_question(question);
        let mut topic = Topic::new(TopicId::new("t-1").expect("id"), "Graphs");
        topic.push_sub_topic(sub_topic);
        let mut sheet = Sheet::new(SheetId::new("s").expect("id"), "s", "Graphs Sheet", "");
        sheet.push_topic(topic);
        let options = RenderOptions {
            show_urls: true,
            ..RenderOptions::default()
        };

        let out = render_outline(&sheet, &UiState::default(), options);
        assert_eq!(
            out,
            "Graphs Sheet  0/1 (0%)\n\
             Easy 1 · Medium 0 · Hard 0\n\
             ▾ Graphs  0/1\n    \
             Basics  0/1\n      \
             [ ] Flood Fill (Easy)\n          \
             https://leetcode.com/problems/flood-fill/\n          \
             note: bfs from the seed\n"
        );
    }

    #[test]
    fn empty_sheet_says_so() {
        let sheet = Sheet::new(SheetId::new("s").expect("id"), "s", "Empty", "");
        let out = render_outline(&sheet, &UiState::default(), RenderOptions::default());
        assert_eq!(out, "Empty  0/0 (0%)\nEasy 0 · Medium 0 · Hard 0\n(no topics)\n");
    }
}
