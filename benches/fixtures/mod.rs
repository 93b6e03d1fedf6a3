// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use tracksheet::model::{Difficulty, Question, Sheet, SheetId, SubTopic, Topic};

const WORDS: [&str; 12] = [
    "array", "graph", "tree", "heap", "stack", "queue", "window", "pointer", "interval", "matrix",
    "string", "bitmask",
];

#[derive(Debug, Clone, Copy)]
pub struct SheetShape {
    pub topics: usize,
    pub sub_topics: usize,
    pub questions: usize,
}

impl SheetShape {
    pub const SMALL: Self = Self {
        topics: 4,
        sub_topics: 2,
        questions: 3,
    };
    pub const MEDIUM: Self = Self {
        topics: 20,
        sub_topics: 5,
        questions: 10,
    };
    pub const LARGE: Self = Self {
        topics: 60,
        sub_topics: 8,
        questions: 25,
    };

    pub fn question_count(self) -> usize {
        self.topics * self.sub_topics * self.questions
    }
}

fn word(index: usize) -> &'static str {
    WORDS[index % WORDS.len()]
}

pub fn sheet(shape: SheetShape) -> Sheet {
    let mut sheet = Sheet::new(
        SheetId::new("bench").expect("sheet id"),
        "bench-sheet",
        "Bench Sheet",
        "Synthetic sheet for benchmarks",
    );

    for t in 0..shape.topics {
        let mut topic = Topic::new(
            format!("topic-{t:03}").parse().expect("topic id"),
            format!("Topic {t} {}", word(t)),
        );
        topic.set_description(Some(format!("Practice {} problems", word(t + 3))));

        for s in 0..shape.sub_topics {
            let mut sub_topic = SubTopic::new(
                format!("subtopic-{t:03}-{s:02}").parse().expect("sub-topic id"),
                format!("Set {s} {}", word(t + s)),
            );
            for q in 0..shape.questions {
                let index = t * 31 + s * 7 + q;
                let mut question = Question::new(
                    format!("q-{t:03}-{s:02}-{q:03}").parse().expect("question id"),
                    format!("{} {} #{index}", word(index), word(index / 5)),
                    Difficulty::ALL[index % 3],
                );
                question.set_completed(index % 4 == 0);
                if index % 9 == 0 {
                    question.set_notes(Some(format!("revisit {}", word(index + 1))));
                }
                sub_topic.push_question(question);
            }
            topic.push_sub_topic(sub_topic);
        }
        sheet.push_topic(topic);
    }

    sheet
}
