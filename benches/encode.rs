use std::collections::BTreeMap;
use std::io;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use msgp::protocol::append;
use msgp::{Timestamp, Writer, to_bytes};

fn bench_typed(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed");

    // Mixed integers across every width
    let ints: Vec<i64> = (0..1024).map(|i| (i * 7919) - 4_000_000).collect();
    group.throughput(Throughput::Elements(ints.len() as u64));
    group.bench_function("int64_1k", |b| {
        b.iter(|| {
            let mut sink = io::sink();
            let mut writer = Writer::new(&mut sink);
            for i in &ints {
                writer.write_int64(*i).unwrap();
            }
            writer.flush().unwrap();
        });
    });

    // Short strings (fixstr)
    group.throughput(Throughput::Elements(1024));
    group.bench_function("fixstr_1k", |b| {
        b.iter(|| {
            let mut sink = io::sink();
            let mut writer = Writer::new(&mut sink);
            for _ in 0..1024 {
                writer.write_string(black_box("sensor.temperature")).unwrap();
            }
            writer.flush().unwrap();
        });
    });

    // Large binary (bypasses the buffer)
    let blob = vec![0u8; 64 * 1024];
    group.throughput(Throughput::Bytes(blob.len() as u64));
    group.bench_function("bytes_64kb", |b| {
        b.iter(|| {
            let mut sink = io::sink();
            let mut writer = Writer::new(&mut sink);
            writer.write_bytes(black_box(&blob)).unwrap();
            writer.flush().unwrap();
        });
    });

    group.bench_function("timestamp", |b| {
        let ts = Timestamp::new(1_700_000_000, 123_456_789);
        b.iter(|| {
            let mut sink = io::sink();
            let mut writer = Writer::new(&mut sink);
            writer.write_timestamp(black_box(ts)).unwrap();
            writer.flush().unwrap();
        });
    });

    group.finish();
}

fn bench_dynamic(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamic");

    let mut record = BTreeMap::new();
    for i in 0..32 {
        record.insert(format!("field_{i}"), vec![i; 8]);
    }

    group.bench_function("nested_map", |b| {
        b.iter(|| {
            black_box(to_bytes(black_box(&record)).unwrap());
        });
    });

    group.bench_function("nested_map_writer", |b| {
        b.iter(|| {
            let mut sink = io::sink();
            let mut writer = Writer::new(&mut sink);
            writer.write_intf(black_box(&record)).unwrap();
            writer.flush().unwrap();
        });
    });

    group.finish();
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    group.throughput(Throughput::Elements(1024));
    group.bench_function("uint_1k", |b| {
        let mut buf = Vec::with_capacity(16 * 1024);
        b.iter(|| {
            buf.clear();
            for u in 0..1024_u64 {
                append::append_uint(&mut buf, u * 1_000_003);
            }
            black_box(buf.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_typed, bench_dynamic, bench_append);
criterion_main!(benches);
