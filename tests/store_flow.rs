// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use tracksheet::backend::{MockBackend, SheetBackend};
use tracksheet::model::fixtures::DEMO_SHEET_SLUG;
use tracksheet::model::{Difficulty, TopicId};
use tracksheet::ops::{NewQuestion, TopicPatch};
use tracksheet::render::{render_outline, RenderOptions};
use tracksheet::store::SheetStore;

#[tokio::test]
async fn curate_a_topic_end_to_end() {
    let backend = Arc::new(MockBackend::instant());
    let store = SheetStore::new(Arc::clone(&backend) as Arc<dyn SheetBackend>);
    store.load_sheet(DEMO_SHEET_SLUG).await.expect("load");

    let graphs = store
        .create_topic("  Graphs ", Some("Traversals and shortest paths"))
        .await
        .expect("create topic");
    let basics = store
        .create_sub_topic(&graphs, "Basics")
        .await
        .expect("create sub-topic");
    let mut questions = Vec::new();
    for (title, difficulty) in [
        ("Number of Islands", Difficulty::Medium),
        ("Flood Fill", Difficulty::Easy),
        ("Network Delay Time", Difficulty::Medium),
    ] {
        let payload = NewQuestion::new(title, difficulty).expect("payload");
        questions.push(
            store
                .create_question(&graphs, &basics, payload)
                .await
                .expect("create question"),
        );
    }

    store
        .move_question(&graphs, &basics, 1, 0)
        .await
        .expect("move question");
    store
        .toggle_question_complete(&graphs, &basics, &questions[1])
        .await
        .expect("toggle");
    store.move_topic(4, 0).await.expect("move topic");
    store
        .update_topic(
            &graphs,
            TopicPatch {
                description: Some(None),
                ..TopicPatch::default()
            },
        )
        .await
        .expect("clear description");

    let sheet = store.sheet().await.expect("sheet");
    assert_eq!(sheet.topics()[0].id(), &graphs);
    assert_eq!(sheet.topics()[0].description(), None);
    assert_eq!(sheet.stats().total_questions, 19);
    assert_eq!(sheet.stats().completed_questions, 5);
    assert_eq!(*sheet, backend.canonical().await);

    store.set_search_query("flood").await;
    store.toggle_collapse(&TopicId::new("topic-1").expect("id")).await;
    let state = store.state().await;
    let view = store.filtered_sheet().await.expect("view");
    let outline = render_outline(&view, &state.ui, RenderOptions::default());
    assert_eq!(
        outline,
        "DSA Mastery Sheet  5/19 (26%)\n\
         Easy 8 · Medium 10 · Hard 1\n\
         ▾ Graphs  1/1\n    Basics  1/1\n      [x] Flood Fill (Easy)\n"
    );

    store.delete_topic(&graphs).await.expect("delete");
    let sheet = store.sheet().await.expect("sheet");
    assert_eq!(sheet.stats().total_questions, 16);
    let orders: Vec<usize> = sheet.topics().iter().map(|topic| topic.order()).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
    assert_eq!(store.error().await, None);
}
