// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A sheet contains topics, topics contain sub-topics, sub-topics contain questions. Children are
//! held behind `Arc` so snapshots can share untouched subtrees.

pub mod fixtures;
pub mod ids;
pub mod question;
pub(crate) mod sequence;
pub mod sheet;
pub mod stats;
pub mod topic;

pub use ids::{
    Id, IdError, QuestionId, QuestionIdTag, SheetId, SheetIdTag, SubTopicId, SubTopicIdTag,
    TopicId, TopicIdTag,
};
pub use question::{Difficulty, ParseDifficultyError, Question};
pub use sheet::Sheet;
pub use stats::{Progress, Stats};
pub use topic::{SubTopic, Topic};
