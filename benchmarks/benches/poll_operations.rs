use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use poll::{CreatePollRequest, PollService, PollStore, config::StoreConfig};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn options(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("option_{i}")).collect()
}

/// Poll creation with generated and supplied ids
fn bench_create_poll(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_poll");
    group.warm_up_time(Duration::from_millis(100));

    let service = PollService::for_testing();

    group.bench_function("generated_id", |b| {
        b.iter(|| {
            let poll = service
                .create_poll(black_box(CreatePollRequest::new("Benchmark?", options(4))))
                .unwrap();
            black_box(poll);
        })
    });

    group.bench_function("supplied_id", |b| {
        b.iter_batched(
            || CreatePollRequest::with_id(Uuid::new_v4().to_string(), "Benchmark?", options(4)),
            |request| service.create_poll(black_box(request)).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

/// Vote cost as the option list grows
fn bench_vote(c: &mut Criterion) {
    let mut group = c.benchmark_group("vote");
    group.warm_up_time(Duration::from_millis(100));

    for option_count in [2usize, 8, 32] {
        let service = PollService::new(Arc::new(PollStore::new(StoreConfig::default())));
        let poll = service
            .create_poll(CreatePollRequest::new("Benchmark?", options(option_count)))
            .unwrap();
        let last = format!("option_{}", option_count - 1);

        group.bench_with_input(
            BenchmarkId::new("last_option", option_count),
            &option_count,
            |b, _| {
                b.iter(|| service.vote(black_box(&poll.id), black_box(&last)).unwrap());
            },
        );
    }

    group.finish();
}

/// Result aggregation after many votes
fn bench_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("results");

    let service = PollService::for_testing();
    let poll = service
        .create_poll(CreatePollRequest::new("Benchmark?", options(8)))
        .unwrap();
    for i in 0..10_000 {
        service.vote(&poll.id, &format!("option_{}", i % 8)).unwrap();
    }

    group.bench_function("get_poll_results", |b| {
        b.iter(|| black_box(service.get_poll_results(black_box(&poll.id)).unwrap()))
    });

    group.bench_function("handle_json", |b| {
        let request = format!(
            r#"{{"method":"get_poll_results","params":{{"poll_id":"{}"}}}}"#,
            poll.id
        );
        b.iter(|| black_box(service.handle_json(black_box(&request))))
    });

    group.finish();
}

/// Contended voting from concurrent tasks
fn bench_concurrent_voting(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("concurrent_voting");
    group.sample_size(20);

    let service = Arc::new(PollService::for_testing());
    let poll = service
        .create_poll(CreatePollRequest::new("Benchmark?", options(2)))
        .unwrap();

    for tasks in [4usize, 16] {
        group.bench_with_input(BenchmarkId::new("tasks", tasks), &tasks, |b, &tasks| {
            b.to_async(&rt).iter(|| {
                let service = service.clone();
                let poll_id = poll.id.clone();
                async move {
                    let handles: Vec<_> = (0..tasks)
                        .map(|i| {
                            let service = service.clone();
                            let poll_id = poll_id.clone();
                            tokio::spawn(async move {
                                let option = format!("option_{}", i % 2);
                                for _ in 0..10 {
                                    service.vote(&poll_id, &option).unwrap();
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.await.unwrap();
                    }
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_create_poll,
    bench_vote,
    bench_results,
    bench_concurrent_voting
);
criterion_main!(benches);
