//! Benchmarks for the line pipeline hot path
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pressure_rig::{classify, LineFramer, TelemetryHistory, TelemetrySample};

fn telemetry_stream(lines: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(lines * 40);
    for i in 0..lines {
        let v = (i % 100) as f64 / 10.0;
        out.extend_from_slice(
            format!(
                "{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\n",
                v,
                v + 0.1,
                v + 0.2,
                v + 0.3,
                v + 0.4,
                v + 0.5
            )
            .as_bytes(),
        );
    }
    out
}

fn bench_framing(c: &mut Criterion) {
    let stream = telemetry_stream(1000);
    let mut group = c.benchmark_group("framing");
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("push_bytes_1000_lines", |b| {
        b.iter(|| {
            let mut framer = LineFramer::new();
            black_box(framer.push_bytes(black_box(&stream)))
        })
    });
    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let telemetry = "1.25\t2.30\t0.00\t-0.05\t3.33\t12.00";
    let event = "DONE: motor 3 homed after 250 steps";
    let noise = "unrelated chatter from the bootloader";

    let mut group = c.benchmark_group("classify");
    group.bench_function("telemetry_line", |b| {
        b.iter(|| black_box(classify(black_box(telemetry))))
    });
    group.bench_function("event_line", |b| {
        b.iter(|| black_box(classify(black_box(event))))
    });
    group.bench_function("ignored_line", |b| {
        b.iter(|| black_box(classify(black_box(noise))))
    });
    group.finish();
}

fn bench_history_admit(c: &mut Criterion) {
    let sample = TelemetrySample::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    c.bench_function("history_admit", |b| {
        let mut history = TelemetryHistory::new(600, 60.0);
        b.iter(|| history.admit(black_box(&sample)))
    });
}

criterion_group!(
    benches,
    bench_framing,
    bench_classification,
    bench_history_admit
);
criterion_main!(benches);
