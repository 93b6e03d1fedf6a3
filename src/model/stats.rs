// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::Add;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::question::{Difficulty, Question};
use super::topic::Topic;

/// Aggregate question counts over a whole sheet.
///
/// Always derived from the question set; see [`Stats::from_topics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_questions: usize,
    pub completed_questions: usize,
    pub easy_questions: usize,
    pub medium_questions: usize,
    pub hard_questions: usize,
}

impl Stats {
    pub fn from_topics(topics: &[Arc<Topic>]) -> Self {
        let mut stats = Self::default();
        for topic in topics {
            for sub_topic in topic.sub_topics() {
                for question in sub_topic.questions() {
                    stats.record(question);
                }
            }
        }
        stats
    }

    fn record(&mut self, question: &Question) {
        self.total_questions += 1;
        if question.completed() {
            self.completed_questions += 1;
        }
        match question.difficulty() {
            Difficulty::Easy => self.easy_questions += 1,
            Difficulty::Medium => self.medium_questions += 1,
            Difficulty::Hard => self.hard_questions += 1,
        }
    }

    pub fn count_for(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy_questions,
            Difficulty::Medium => self.medium_questions,
            Difficulty::Hard => self.hard_questions,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.completed_questions, self.total_questions)
    }
}

/// Completed-over-total counts for any container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Rounded completion percentage; `0` for empty containers.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let scaled = (self.completed.min(self.total) * 200 + self.total) / (self.total * 2);
        u8::try_from(scaled).unwrap_or(100)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}

impl Add for Progress {
    type Output = Progress;

    fn add(self, rhs: Progress) -> Progress {
        Progress::new(self.completed + rhs.completed, self.total + rhs.total)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Progress, Stats};
    use crate::model::fixtures::demo_sheet;
    use crate::model::Difficulty;

    #[test]
    fn demo_sheet_stats_are_derived_from_questions() {
        let sheet = demo_sheet();
        let stats = Stats::from_topics(sheet.topics());

        assert_eq!(stats, *sheet.stats());
        assert_eq!(stats.total_questions, 16);
        assert_eq!(stats.completed_questions, 4);
        assert_eq!(stats.count_for(Difficulty::Easy), 7);
        assert_eq!(stats.count_for(Difficulty::Medium), 8);
        assert_eq!(stats.count_for(Difficulty::Hard), 1);
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(4, 16, 25)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(3, 3, 100)]
    fn progress_percent_rounds_half_up(
        #[case] completed: usize,
        #[case] total: usize,
        #[case] expected: u8,
    ) {
        assert_eq!(Progress::new(completed, total).percent(), expected);
    }

    #[test]
    fn empty_progress_is_never_complete() {
        assert!(!Progress::default().is_complete());
        assert!(Progress::new(2, 2).is_complete());
    }
}
