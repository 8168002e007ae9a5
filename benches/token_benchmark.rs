// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::hint::black_box;
use wearable_export::models::{FetchResult, UserId, UserRecord};
use wearable_export::services::TokenMinter;

fn benchmark_per_user_work(c: &mut Criterion) {
    let minter = TokenMinter::new(b"wearable-hub");
    let user = UserRecord::new(123_456, Some("Benchmark User"), Some("bench@example.com"));

    // Roughly the size of a day of heart-rate samples
    let samples: Vec<_> = (0..1440)
        .map(|minute| json!({"minute": minute, "bpm": 60 + minute % 40}))
        .collect();
    let response = json!({
        "statusCode": 200,
        "data": samples,
        "pagination": {"page": 1, "total": 1},
        "message": "Success",
    });

    let mut group = c.benchmark_group("per_user");

    group.bench_function("mint_token", |b| {
        b.iter(|| minter.mint(black_box(&user)))
    });

    group.bench_function("project_response", |b| {
        b.iter(|| FetchResult::from_response(UserId::Int(123_456), black_box(&response)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_per_user_work);
criterion_main!(benches);
