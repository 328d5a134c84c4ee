//! Performance benchmarks for the Compa-Ratio Band Engine.
//!
//! Targets:
//! - Roster of 100 employees through `/compute`: < 5ms mean
//! - Roster of 1000 employees through `/compute`: < 50ms mean
//! - Import of 1000 employees without HTTP: < 20ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use compa_engine::api::{AppState, create_router};
use compa_engine::calculation::{ImportInput, run_import};
use compa_engine::config::ConfigLoader;

use axum::{body::Body, http::Request};
use serde_json::{Map, Value, json};
use tower::ServiceExt;

const GROUPS: [&str; 4] = ["Retail", "Operations", "Finance", "Marketing"];
const LEVELS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn as_row(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("row is an object")
}

/// Creates a roster with salaries spread around each level's midpoint.
fn create_roster(size: usize) -> Vec<Map<String, Value>> {
    (0..size)
        .map(|i| {
            let level = i % LEVELS.len();
            let midpoint = 4000 + level * 2000;
            let salary = midpoint * (70 + (i * 7) % 60) / 100;
            as_row(json!({
                "Employee ID": format!("emp_{:04}", i),
                "Employee Name": format!("Employee {}", i),
                "Job Family": if i % 5 == 0 { "Hearing Instrument Specialist" } else { "General" },
                "Pay Band": GROUPS[i % GROUPS.len()],
                "Level": format!("Level {}", LEVELS[level]),
                "Currency": if i % 10 == 0 { "USD" } else { "BRL" },
                "Base Salary": format!("{}.{:03},00", salary / 1000, salary % 1000),
                "Cost Center": format!("CC{}", i % 12),
            }))
        })
        .collect()
}

/// Creates a positioning table covering every group except the last.
fn create_positioning() -> Vec<Map<String, Value>> {
    let mut rows = Vec::new();
    for group in &GROUPS[..GROUPS.len() - 1] {
        for positioning in [80, 100, 120] {
            let mut row = as_row(json!({
                "Job Family": group,
                "Currency": "BRL",
                "Pay Positioning": positioning,
            }));
            for (level, letter) in LEVELS.iter().enumerate() {
                let midpoint = 4000 + level * 2000;
                row.insert(
                    letter.to_string(),
                    json!(midpoint * positioning / 100),
                );
            }
            rows.push(row);
        }
    }
    rows
}

fn create_body(size: usize, with_table: bool) -> String {
    let mut request = json!({
        "employees": create_roster(size),
        "source_name": "bench.xlsx",
    });
    if with_table {
        request["positioning"] = json!(create_positioning());
    }
    request.to_string()
}

fn compute_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/compute")
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Benchmark: Roster of 100 employees through the router.
///
/// Target: < 5ms mean
fn bench_roster_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_body(100, true);

    let mut group = c.benchmark_group("compute");
    group.throughput(Throughput::Elements(100));

    group.bench_function("roster_100", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(compute_request(body.clone()))
                .await
                .unwrap();
            black_box(response)
        })
    });

    group.finish();
}

/// Benchmark: Roster of 1000 employees through the router.
///
/// Target: < 50ms mean
fn bench_roster_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_body(1000, true);

    let mut group = c.benchmark_group("large_compute");
    group.throughput(Throughput::Elements(1000));
    // Reduce sample size for large rosters to keep benchmark time reasonable
    group.sample_size(20);

    group.bench_function("roster_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(compute_request(body.clone()))
                .await
                .unwrap();
            black_box(response)
        })
    });

    group.finish();
}

/// Benchmark: Import without HTTP, with and without a positioning table.
fn bench_import_scaling(c: &mut Criterion) {
    let config = create_test_state().config().config().clone();

    let mut group = c.benchmark_group("import_scaling");

    for size in [10usize, 100, 1000] {
        for with_table in [false, true] {
            let input = ImportInput {
                employees: create_roster(size),
                positioning: with_table.then(create_positioning),
                source_name: None,
            };
            let label = if with_table { "table" } else { "estimated" };

            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(label, size), &input, |b, input| {
                b.iter(|| black_box(run_import(input, &config)))
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_roster_100,
    bench_roster_1000,
    bench_import_scaling,
);
criterion_main!(benches);
