use brc_processor::models::Segment;
use brc_processor::processors::{AggregateMerger, ParallelProcessor};
use brc_processor::readers::{ChunkScanner, Segmenter};
use brc_processor::utils::fixed_point::parse_temperature;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// Create test data for benchmarking
fn create_measurements(lines: usize, stations: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(lines * 16);
    let mut state: u64 = 42;
    for _ in 0..lines {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let station = (state >> 40) as usize % stations;
        let tenths = ((state >> 20) % 1999) as i64 - 999;
        let sign = if tenths < 0 { "-" } else { "" };
        out.extend_from_slice(
            format!("Station {};{}{}.{}\n", station, sign, tenths.abs() / 10, tenths.abs() % 10)
                .as_bytes(),
        );
    }
    out
}

fn benchmark_parse_temperature(c: &mut Criterion) {
    let fields: [&[u8]; 6] = [b"-99.9", b"0.0", b"12.3", b"-3.4", b"99.9", b"7.1"];

    c.bench_function("parse_temperature", |b| {
        b.iter(|| {
            let mut total = 0i64;
            for field in &fields {
                total += i64::from(parse_temperature(black_box(field)).unwrap_or(0));
            }
            black_box(total)
        })
    });
}

fn benchmark_chunk_scanner(c: &mut Criterion) {
    let data = create_measurements(200_000, 400);
    let segment = Segment::new(0, data.len() as u64);

    let mut group = c.benchmark_group("chunk_scanner");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("scan_segment", |b| {
        let scanner = ChunkScanner::new(300);
        b.iter(|| {
            let aggregates = scanner.scan_segment(black_box(&data), &segment).unwrap();
            black_box(aggregates.len())
        })
    });
    group.finish();
}

fn benchmark_merger(c: &mut Criterion) {
    let data = create_measurements(200_000, 400);
    let segments = Segmenter::new(16 * 1024, 300).segment(&data).unwrap();
    let scanner = ChunkScanner::new(300);

    c.bench_function("aggregate_merger", |b| {
        b.iter(|| {
            let chunks = segments
                .iter()
                .map(|segment| scanner.scan_segment(&data, segment).unwrap());
            let merged = AggregateMerger::new().merge(chunks).unwrap();
            black_box(merged.len())
        })
    });
}

fn benchmark_varying_chunk_sizes(c: &mut Criterion) {
    let data = create_measurements(500_000, 1_000);
    let mut group = c.benchmark_group("pipeline_by_chunk_size");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for &chunk_size in &[16 * 1024u64, 256 * 1024, 1024 * 1024] {
        group.bench_with_input(
            BenchmarkId::new("chunk_size", chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                let processor = ParallelProcessor::default().with_chunk_size(chunk_size);
                b.iter(|| {
                    let merged = processor.process_bytes(black_box(&data), None).unwrap();
                    black_box(merged.len())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_temperature,
    benchmark_chunk_scanner,
    benchmark_merger,
    benchmark_varying_chunk_sizes
);
criterion_main!(benches);
