use criterion::{black_box, criterion_group, criterion_main, Criterion};
use table_kit::data::table_controller::{derive_view, ViewState};
use table_kit::{record, DataExporter, ExportOptions, Record, SortDirection};

fn create_test_data(rows: usize) -> Vec<Record> {
    let regions = vec![
        "Sierra Norte",
        "Costa Sur",
        "Valle Central",
        "Altiplano",
        "Selva Baja",
    ];

    (0..rows)
        .map(|i| {
            record! {
                "id" => i,
                "nombre" => format!("Sitio {}", i),
                "region" => regions[i % regions.len()],
                "visitas" => (i * 37) % 1000,
                "abierto" => i % 3 != 0,
            }
        })
        .collect()
}

fn benchmark_search(c: &mut Criterion) {
    let records_10k = create_test_data(10_000);
    let records_50k = create_test_data(50_000);

    let mut group = c.benchmark_group("derive_view_search");

    let state = ViewState {
        search_term: "costa".to_string(),
        ..ViewState::new(25)
    };

    group.bench_function("10k_rows", |b| {
        b.iter(|| {
            let view = derive_view(black_box(&records_10k), &state, None);
            assert_eq!(view.total_items, 2_000);
        });
    });

    group.bench_function("50k_rows", |b| {
        b.iter(|| {
            let view = derive_view(black_box(&records_50k), &state, None);
            assert_eq!(view.total_items, 10_000);
        });
    });

    group.finish();
}

fn benchmark_sort(c: &mut Criterion) {
    let records_50k = create_test_data(50_000);

    let mut group = c.benchmark_group("derive_view_sort");

    // Numeric sort
    group.bench_function("numeric_desc", |b| {
        let state = ViewState {
            sort_key: Some("visitas".to_string()),
            sort_direction: SortDirection::Descending,
            ..ViewState::new(25)
        };
        b.iter(|| derive_view(black_box(&records_50k), &state, None));
    });

    // String sort after filtering
    group.bench_function("filtered_string_asc", |b| {
        let state = ViewState {
            search_term: "sierra".to_string(),
            sort_key: Some("nombre".to_string()),
            sort_direction: SortDirection::Ascending,
            ..ViewState::new(25)
        };
        b.iter(|| derive_view(black_box(&records_50k), &state, None));
    });

    group.finish();
}

fn benchmark_csv(c: &mut Criterion) {
    let records_10k = create_test_data(10_000);

    c.bench_function("csv_text_10k_rows", |b| {
        b.iter(|| DataExporter::generate_csv_text(black_box(&records_10k), &ExportOptions::new(), true));
    });
}

criterion_group!(benches, benchmark_search, benchmark_sort, benchmark_csv);
criterion_main!(benches);
