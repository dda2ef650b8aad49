//! Performance benchmarks for the settlement engine.
//!
//! Covers a direct engine call, a request through the HTTP router, and
//! batch ingestion of tab-separated rows at increasing sizes.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use finiquito_engine::api::{AppState, create_router};
use finiquito_engine::calculation::SettlementEngine;
use finiquito_engine::config::{ConfigLoader, EconomicConfig};
use finiquito_engine::ingest::parse_employee_rows;
use finiquito_engine::models::{CalculationType, EmployeeRecord, SettlementOptions};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const HEADER: &str =
    "No\tAlta\tBaja\tA\tB\tC\tNombre\tSalario\tRFC\tPuesto\tUbicacion\tD\tE\tHoras\tF\tG\tH\tI\tVacAnt";

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/mx2026").expect("Failed to load config");
    AppState::new(config)
}

fn create_employee() -> EmployeeRecord {
    EmployeeRecord {
        id: "bench_001".to_string(),
        full_name: "ANA LOPEZ".to_string(),
        tax_id: "LOAA900101XXX".to_string(),
        position: "CAJERA".to_string(),
        location: "MONTERREY".to_string(),
        hire_date: NaiveDate::from_ymd_opt(2018, 3, 1).unwrap(),
        termination_date: NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
        daily_salary: Decimal::new(65000, 2),
        pending_vacation_days: Decimal::from(3),
        accrued_overtime: Decimal::from(800),
    }
}

/// Builds `count` tab-separated rows with varied salaries and dates.
fn create_rows(count: usize) -> String {
    let rows: Vec<String> = (0..count)
        .map(|i| {
            format!(
                "{}\t{}/{}/{}\t{}/9/2025\t\t\t\tEMPLEADO {}\t{}.00\tRFC{:06}\tPUESTO\tCDMX\t\t\t{}\t\t\t\t\t{}",
                1000 + i,
                1 + i % 28,
                1 + i % 12,
                2005 + i % 19,
                1 + i % 30,
                i,
                300 + (i % 50) * 25,
                i,
                (i % 4) * 250,
                i % 6
            )
        })
        .collect();
    format!("{}\n{}", HEADER, rows.join("\n"))
}

/// Benchmark: one liquidación computed directly on the engine.
fn bench_single_engine(c: &mut Criterion) {
    let engine = SettlementEngine::default();
    let employee = create_employee();
    let options = SettlementOptions::default();

    c.bench_function("single_liquidacion", |b| {
        b.iter(|| {
            black_box(engine.compute(
                black_box(&employee),
                EconomicConfig::default(),
                CalculationType::Liquidacion,
                &options,
            ))
        })
    });
}

/// Benchmark: one settlement through the HTTP router.
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "employee": {
            "id": "bench_001",
            "hire_date": "2018-03-01",
            "termination_date": "2025-09-22",
            "daily_salary": "650.00",
            "accrued_overtime": "800"
        },
        "calculation_type": "liquidacion",
        "adjustments": { "prior_period_income": "9750", "prior_period_tax": "850" }
    })
    .to_string();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/settlements")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: ingestion plus computation at increasing batch sizes.
fn bench_batch_scaling(c: &mut Criterion) {
    let engine = SettlementEngine::default();
    let mut group = c.benchmark_group("batch");

    for size in [10usize, 100, 1000] {
        let text = create_rows(size);
        group.throughput(Throughput::Elements(size as u64));
        if size >= 1000 {
            group.sample_size(10);
        }
        group.bench_with_input(BenchmarkId::new("rows", size), &text, |b, text| {
            b.iter(|| {
                let employees = parse_employee_rows(black_box(text));
                black_box(engine.compute_batch(
                    &employees,
                    EconomicConfig::default(),
                    CalculationType::Finiquito,
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_engine,
    bench_single_request,
    bench_batch_scaling,
);
criterion_main!(benches);
