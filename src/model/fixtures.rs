// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in demo content: a small data-structures practice sheet.

use super::ids::{Id, SheetId};
use super::question::{Difficulty, Question};
use super::sheet::Sheet;
use super::topic::{SubTopic, Topic};

pub const DEMO_SHEET_SLUG: &str = "dsa-mastery-sheet";

type QuestionSeed = (&'static str, &'static str, Difficulty, &'static str, bool);

fn id<T>(value: &str) -> Id<T> {
    Id::new(value).expect("seed id")
}

fn sub_topic(sub_topic_id: &str, name: &str, questions: &[QuestionSeed]) -> SubTopic {
    let mut sub_topic = SubTopic::new(id(sub_topic_id), name);
    for &(question_id, title, difficulty, slug, completed) in questions {
        let mut question = Question::new(id(question_id), title, difficulty);
        question.set_url(Some(format!("https://leetcode.com/problems/{slug}/")));
        question.set_completed(completed);
        sub_topic.push_question(question);
    }
    sub_topic
}

fn topic(topic_id: &str, name: &str, description: &str, sub_topics: Vec<SubTopic>) -> Topic {
    let mut topic = Topic::new(id(topic_id), name);
    topic.set_description(Some(description));
    for sub_topic in sub_topics {
        topic.push_sub_topic(sub_topic);
    }
    topic
}

/// The demo sheet served by the mock backend: 4 topics, 16 questions, 4 completed.
pub fn demo_sheet() -> Sheet {
    use Difficulty::{Easy, Hard, Medium};

    let sheet_id: SheetId = id("1");
    let mut sheet = Sheet::new(
        sheet_id,
        DEMO_SHEET_SLUG,
        "DSA Mastery Sheet",
        "A comprehensive collection of Data Structures and Algorithms problems to master coding interviews",
    );

    sheet.push_topic(topic(
        "topic-1",
        "Arrays",
        "Master array manipulation and traversal techniques",
        vec![
            sub_topic(
                "subtopic-1-1",
                "Easy Problems",
                &[
                    ("q-1-1-1", "Two Sum", Easy, "two-sum", true),
                    (
                        "q-1-1-2",
                        "Best Time to Buy and Sell Stock",
                        Easy,
                        "best-time-to-buy-and-sell-stock",
                        true,
                    ),
                    (
                        "q-1-1-3",
                        "Remove Duplicates from Sorted Array",
                        Easy,
                        "remove-duplicates-from-sorted-array",
                        false,
                    ),
                ],
            ),
            sub_topic(
                "subtopic-1-2",
                "Medium Problems",
                &[
                    (
                        "q-1-2-1",
                        "Container With Most Water",
                        Medium,
                        "container-with-most-water",
                        false,
                    ),
                    (
                        "q-1-2-2",
                        "Product of Array Except Self",
                        Medium,
                        "product-of-array-except-self",
                        true,
                    ),
                ],
            ),
        ],
    ));

    sheet.push_topic(topic(
        "topic-2",
        "Linked Lists",
        "Learn to manipulate linked list nodes and pointers",
        vec![
            sub_topic(
                "subtopic-2-1",
                "Basic Operations",
                &[
                    ("q-2-1-1", "Reverse Linked List", Easy, "reverse-linked-list", false),
                    ("q-2-1-2", "Merge Two Sorted Lists", Easy, "merge-two-sorted-lists", false),
                ],
            ),
            sub_topic(
                "subtopic-2-2",
                "Advanced Problems",
                &[
                    ("q-2-2-1", "Linked List Cycle II", Medium, "linked-list-cycle-ii", false),
                    (
                        "q-2-2-2",
                        "Copy List with Random Pointer",
                        Medium,
                        "copy-list-with-random-pointer",
                        false,
                    ),
                ],
            ),
        ],
    ));

    sheet.push_topic(topic(
        "topic-3",
        "Trees",
        "Binary trees, BST, and tree traversal algorithms",
        vec![sub_topic(
            "subtopic-3-1",
            "Tree Traversal",
            &[
                (
                    "q-3-1-1",
                    "Binary Tree Inorder Traversal",
                    Easy,
                    "binary-tree-inorder-traversal",
                    true,
                ),
                (
                    "q-3-1-2",
                    "Level Order Traversal",
                    Medium,
                    "binary-tree-level-order-traversal",
                    false,
                ),
            ],
        )],
    ));

    sheet.push_topic(topic(
        "topic-4",
        "Dynamic Programming",
        "Optimization problems using memoization and tabulation",
        vec![
            sub_topic(
                "subtopic-4-1",
                "1D DP",
                &[
                    ("q-4-1-1", "Climbing Stairs", Easy, "climbing-stairs", false),
                    ("q-4-1-2", "House Robber", Medium, "house-robber", false),
                ],
            ),
            sub_topic(
                "subtopic-4-2",
                "2D DP",
                &[
                    ("q-4-2-1", "Unique Paths", Medium, "unique-paths", false),
                    (
                        "q-4-2-2",
                        "Longest Common Subsequence",
                        Medium,
                        "longest-common-subsequence",
                        false,
                    ),
                    ("q-4-2-3", "Edit Distance", Hard, "edit-distance", false),
                ],
            ),
        ],
    ));

    sheet
}
