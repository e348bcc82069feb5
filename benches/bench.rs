use {
    criterion::{black_box, criterion_group, criterion_main, Criterion},
    snowflake::{BitLayout, Snowflake},
    std::{
        thread,
        time::{Duration, SystemTime},
    },
};

fn bench_layout(c: &mut Criterion) {
    c.bench_function("bench_layout", |b| {
        b.iter(|| {
            let _ = black_box(BitLayout::new(black_box(39), black_box(8), Duration::from_millis(10)).unwrap());
        });
    });
}

fn bench_builder(c: &mut Criterion) {
    c.bench_function("bench_builder", |b| {
        b.iter(|| {
            let _ = black_box(
                Snowflake::builder()
                    .with_time_bits(41)
                    .with_machine_id_bits(10)
                    .with_time_unit(Duration::from_millis(1))
                    .with_machine_id(1)
                    .build()
                    .unwrap(),
            );
        });
    });
}

fn bench_next_id(c: &mut Criterion) {
    let start = SystemTime::now() - Duration::from_secs(3600);
    let snowflake = Snowflake::new(BitLayout::default(), start, 1).unwrap();
    c.bench_function("bench_next_id", |b| {
        b.iter(|| {
            let _ = black_box(snowflake.next_id().unwrap());
        });
    });
}

fn bench_next_id_contended(c: &mut Criterion) {
    let snowflake = Snowflake::builder().with_machine_id(1).build().unwrap();
    c.bench_function("bench_next_id_contended_4_threads", |b| {
        b.iter(|| {
            thread::scope(|s| {
                for _ in 0 .. 4 {
                    let snowflake = snowflake.clone();
                    s.spawn(move || {
                        for _ in 0 .. 1_000 {
                            let _ = black_box(snowflake.next_id().unwrap());
                        }
                    });
                }
            });
        });
    });
}

fn bench_decompose(c: &mut Criterion) {
    let layout = BitLayout::default();
    let id = layout.compose(123_456_789, 12, 42);
    c.bench_function("bench_decompose", |b| {
        b.iter(|| {
            let _ = black_box(layout.decompose(black_box(id)));
        });
    });
}

criterion_group!(
    benches,
    bench_layout,
    bench_builder,
    bench_next_id,
    bench_next_id_contended,
    bench_decompose
);
criterion_main!(benches);
