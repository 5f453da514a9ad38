use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use encoding_rs::UTF_8;
use period_swing::ordering::PeriodOrder;
use period_swing::pipeline::{AnalysisOptions, analyze};
use period_swing::source::WideTable;
use tempfile::TempDir;

fn generate_home_values(regions: usize, months: usize) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let csv_path = temp_dir.path().join("home_values.csv");
    let mut file = File::create(&csv_path).expect("create csv");
    let labels = (0..months)
        .map(|m| format!("{}-{:02}-28", 2000 + m / 12, m % 12 + 1))
        .collect::<Vec<_>>();
    writeln!(file, "RegionID,RegionName,{}", labels.join(",")).expect("header");
    for region in 0..regions {
        let values = (0..months)
            .map(|m| {
                if region % 17 == 0 && m == months / 2 {
                    String::new()
                } else {
                    format!("{}.{:02}", 100_000 + region * 13 + m * (region % 7 + 1), m % 100)
                }
            })
            .collect::<Vec<_>>();
        writeln!(file, "{region},Region {region},{}", values.join(",")).expect("row");
    }
    (temp_dir, csv_path)
}

fn bench_pipeline(c: &mut Criterion) {
    let (temp_dir, csv_path) = generate_home_values(5_000, 120);
    let table = WideTable::read(&csv_path, b',', UTF_8).expect("read table");

    let mut group = c.benchmark_group("analyze");
    for order in [PeriodOrder::Chronological, PeriodOrder::Lexical] {
        let options = AnalysisOptions {
            order,
            ..AnalysisOptions::default()
        };
        group.bench_function(format!("{order:?}").to_lowercase(), |b| {
            b.iter_batched(
                || (),
                |_| {
                    analyze(&table, &options).expect("analyze");
                },
                BatchSize::SmallInput,
            );
        });
    }

    drop(temp_dir);
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
