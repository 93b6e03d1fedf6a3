// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use tracksheet::model::Sheet;
use tracksheet::query::filter_sheet;

mod fixtures;
mod profiler;

use fixtures::SheetShape;

// Group `query.filter`; case ids stay stable so results compare across refactors.
fn checksum(sheet: &Sheet) -> u64 {
    sheet.topics().iter().fold(0u64, |acc, topic| {
        let questions: usize = topic
            .sub_topics()
            .iter()
            .map(|sub_topic| sub_topic.questions().len())
            .sum();
        acc.wrapping_mul(131).wrapping_add(questions as u64)
    })
}

fn benches_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("query.filter");

    for (case, shape) in [
        ("small", SheetShape::SMALL),
        ("medium", SheetShape::MEDIUM),
        ("large", SheetShape::LARGE),
    ] {
        let sheet = Arc::new(fixtures::sheet(shape));
        group.throughput(Throughput::Elements(shape.question_count() as u64));

        for (query_case, query) in [
            ("question_title", "heap #"),
            ("topic_name", "topic 7 "),
            ("notes", "revisit"),
            ("no_match", "segment tree"),
        ] {
            group.bench_function(format!("{case}_{query_case}"), |b| {
                b.iter(|| {
                    let view = filter_sheet(black_box(&sheet), black_box(query));
                    black_box(checksum(&view))
                })
            });
        }
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_filter
}
criterion_main!(benches);
