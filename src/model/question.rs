// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::QuestionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty {value:?} (expected Easy, Medium or Hard)")]
pub struct ParseDifficultyError {
    value: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError { value: s.to_owned() })
    }
}

/// A single trackable item of a sub-topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    title: String,
    difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default)]
    completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default)]
    order: usize,
}

impl Question {
    pub fn new(id: QuestionId, title: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id,
            title: title.into(),
            difficulty,
            url: None,
            completed: false,
            notes: None,
            order: 0,
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_url<T: Into<String>>(&mut self, url: Option<T>) {
        self.url = url.map(Into::into);
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn set_notes<T: Into<String>>(&mut self, notes: Option<T>) {
        self.notes = notes.map(Into::into);
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}
