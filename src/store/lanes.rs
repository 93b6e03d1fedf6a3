// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-subtree mutation lanes.
//!
//! A lane is an async mutex keyed by the subtree an operation touches. Waiters are served in FIFO
//! order, so two edits to one topic complete in the order they were dispatched while edits to
//! different topics overlap freely.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::model::TopicId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum LaneKey {
    /// Sheet-level ops: load, topic creation and topic reordering.
    Sheet,
    Topic(TopicId),
}

#[derive(Debug, Default)]
pub(crate) struct Lanes {
    lanes: Mutex<HashMap<LaneKey, Arc<Mutex<()>>>>,
}

/// Held for the duration of one store operation.
#[derive(Debug)]
pub(crate) struct LaneGuard {
    _guards: Vec<OwnedMutexGuard<()>>,
}

impl Lanes {
    /// Acquires every lane in `keys`, in the given order.
    ///
    /// Callers always list `Sheet` before any `Topic` key.
    pub(crate) async fn acquire(&self, keys: &[LaneKey]) -> LaneGuard {
        let mut guards = Vec::with_capacity(keys.len());
        for key in keys {
            let lane = {
                let mut lanes = self.lanes.lock().await;
                Arc::clone(lanes.entry(key.clone()).or_default())
            };
            guards.push(lane.lock_owned().await);
        }
        LaneGuard { _guards: guards }
    }

    /// Drops the lane of a subtree the snapshot no longer has. Tasks already waiting on it keep
    /// their own handle.
    pub(crate) async fn forget(&self, key: &LaneKey) {
        self.lanes.lock().await.remove(key);
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.lanes.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::Mutex;

    use super::{LaneKey, Lanes};
    use crate::model::TopicId;

    fn topic(value: &str) -> LaneKey {
        LaneKey::Topic(TopicId::new(value).expect("topic id"))
    }

    #[tokio::test(start_paused = true)]
    async fn same_lane_runs_in_dispatch_order() {
        let lanes = Arc::new(Lanes::default());
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for (label, delay) in [("first", 30), ("second", 10), ("third", 0)] {
            let lanes = Arc::clone(&lanes);
            let log = Arc::clone(&log);
            handles.push(tokio::spawn(async move {
                let _lane = lanes.acquire(&[topic("topic-1")]).await;
                tokio::time::sleep(Duration::from_millis(delay)).await;
                log.lock().await.push(label);
            }));
        }
        for handle in handles {
            handle.await.expect("task");
        }

        assert_eq!(*log.lock().await, vec!["first", "second", "third"]);
    }

    #[tokio::test(start_paused = true)]
    async fn different_lanes_overlap() {
        let lanes = Arc::new(Lanes::default());
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for (key, label, delay) in [
            (topic("topic-1"), "slow", 30),
            (topic("topic-2"), "fast", 10),
        ] {
            let lanes = Arc::clone(&lanes);
            let log = Arc::clone(&log);
            handles.push(tokio::spawn(async move {
                let _lane = lanes.acquire(&[key]).await;
                tokio::time::sleep(Duration::from_millis(delay)).await;
                log.lock().await.push(label);
            }));
        }
        for handle in handles {
            handle.await.expect("task");
        }

        assert_eq!(*log.lock().await, vec!["fast", "slow"]);
    }

    #[tokio::test]
    async fn forget_removes_the_lane() {
        let lanes = Lanes::default();
        drop(lanes.acquire(&[LaneKey::Sheet, topic("topic-1")]).await);
        assert_eq!(lanes.len().await, 2);

        lanes.forget(&topic("topic-1")).await;
        assert_eq!(lanes.len().await, 1);
    }
}
