// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use tracksheet::model::{Sheet, TopicId};
use tracksheet::ops::{apply_op, move_item, Op, QuestionOp, QuestionPatch, TopicOp};

mod fixtures;
mod profiler;

use fixtures::SheetShape;

// Group `ops.reorder`; case ids stay stable so results compare across refactors.
fn reversed_topics(sheet: &Sheet) -> Vec<TopicId> {
    let mut ids = sheet.topic_ids();
    ids.reverse();
    ids
}

fn benches_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops.reorder");

    for (case, shape) in [("medium", SheetShape::MEDIUM), ("large", SheetShape::LARGE)] {
        let template = fixtures::sheet(shape);
        group.throughput(Throughput::Elements(shape.topics as u64));

        let reverse = Op::Topic(TopicOp::Reorder {
            ordered_ids: reversed_topics(&template),
        });
        group.bench_function(format!("{case}_topics_reverse"), |b| {
            b.iter_batched(
                || template.clone(),
                |mut sheet| {
                    apply_op(&mut sheet, black_box(&reverse)).expect("reorder");
                    black_box(sheet.topics().len())
                },
                BatchSize::SmallInput,
            )
        });

        let drag = Op::Topic(TopicOp::Reorder {
            ordered_ids: move_item(&template.topic_ids(), 0, shape.topics - 1).expect("move"),
        });
        group.bench_function(format!("{case}_topics_drag_first_to_last"), |b| {
            b.iter_batched(
                || template.clone(),
                |mut sheet| {
                    apply_op(&mut sheet, black_box(&drag)).expect("reorder");
                    black_box(sheet.topics().len())
                },
                BatchSize::SmallInput,
            )
        });

        let topic = &template.topics()[shape.topics / 2];
        let sub_topic = &topic.sub_topics()[0];
        let toggle = Op::Question(QuestionOp::Update {
            topic_id: topic.id().clone(),
            sub_topic_id: sub_topic.id().clone(),
            question_id: sub_topic.questions()[0].id().clone(),
            patch: QuestionPatch::completed(true),
        });
        group.bench_function(format!("{case}_toggle_with_stats"), |b| {
            b.iter_batched(
                || template.clone(),
                |mut sheet| {
                    let result = apply_op(&mut sheet, black_box(&toggle)).expect("toggle");
                    black_box(result.stats_recomputed)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_reorder
}
criterion_main!(benches);
