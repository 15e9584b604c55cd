//! Benchmarks for layoutio loading performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks load synthetic layouts of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a JSON page layout with the given number of text blocks.
fn create_test_json(block_count: usize) -> String {
    let blocks: Vec<String> = (0..block_count)
        .map(|i| {
            let y = (i * 12) as f64;
            format!(
                r#"{{"block_type": "rectangle", "x_1": 10.0, "y_1": {}, "x_2": 500.0, "y_2": {}, "text": "Line {} of benchmark content", "id": {}, "type": "text", "score": 0.9}}"#,
                y,
                y + 10.0,
                i,
                i
            )
        })
        .collect();

    format!(
        r#"{{"page_data": {{"width": 612, "height": 792}}, "blocks": [{}]}}"#,
        blocks.join(",")
    )
}

/// Creates a CSV table of quadrilaterals with textual points.
fn create_test_csv(row_count: usize) -> String {
    let mut content = String::from("block_type,points,text\n");
    for i in 0..row_count {
        let y = i * 12;
        content.push_str(&format!(
            "quadrilateral,\"[[0, {y}], [100, {y}], [100, {}], [0, {}]]\",word{i}\n",
            y + 10,
            y + 10
        ));
    }
    content
}

/// Benchmark JSON loading at various sizes.
fn bench_json_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_loading");

    for block_count in [10, 100, 1000].iter() {
        let data = create_test_json(*block_count);

        group.bench_function(format!("{}_blocks", block_count), |b| {
            b.iter(|| layoutio::load_json_str(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark CSV loading at various sizes.
fn bench_csv_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_loading");
    let options = layoutio::CsvOptions::default();

    for row_count in [10, 100, 1000].iter() {
        let data = create_test_csv(*row_count);

        group.bench_function(format!("{}_rows", row_count), |b| {
            b.iter(|| layoutio::load_csv_reader(black_box(data.as_bytes()), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the points text parser alone.
fn bench_points_parsing(c: &mut Criterion) {
    let text = "[[12.5, 40.25], [118.0, 40.25], [118.0, 52.75], [12.5, 52.75]]";

    c.bench_function("parse_points", |b| {
        b.iter(|| layoutio::points::parse_points(black_box(text)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_json_loading,
    bench_csv_loading,
    bench_points_parsing,
);
criterion_main!(benches);
