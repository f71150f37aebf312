//! Ranking throughput: partition sort vs. stable merge sort, plus the full query path.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use car_ranking::ingestion::LoadOptions;
use car_ranking::processing::{RankingMethod, SortAlgorithm, SortDirection, rank_with};
use car_ranking::session::{Query, Session, SessionOptions};
use car_ranking::types::{RawRow, Record};

fn listings(n: usize) -> Vec<Record> {
    // Cheap deterministic spread with plenty of duplicate keys.
    (0..n as u64)
        .map(|i| Record {
            price: (i * 7_919) % 40_000,
            brand: "ford".to_string(),
            model: format!("model-{}", i % 97),
            year: 1995 + ((i * 7) % 31) as i32,
            title_status: "clean vehicle".to_string(),
            mileage: (i * 104_729) % 250_000,
            color: "black".to_string(),
        })
        .collect()
}

fn raw_rows(n: usize) -> Vec<RawRow> {
    listings(n)
        .into_iter()
        .enumerate()
        .map(|(i, r)| -> RawRow {
            let brand = ["ford", "toyota", "bmw", "kia"][i % 4];
            [
                ("price", r.price.to_string()),
                ("brand", brand.to_string()),
                ("model", r.model),
                ("year", r.year.to_string()),
                ("title_status", r.title_status),
                ("mileage", r.mileage.to_string()),
                ("color", r.color),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
        })
        .collect()
}

fn bench_sort_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    for n in [1_000usize, 50_000] {
        let records = listings(n);
        let refs: Vec<&Record> = records.iter().collect();
        for algorithm in [SortAlgorithm::Partition, SortAlgorithm::Merge] {
            group.bench_with_input(
                BenchmarkId::new(format!("{algorithm:?}"), n),
                &refs,
                |b, refs| {
                    b.iter(|| {
                        rank_with(
                            black_box(refs),
                            RankingMethod::ValueScore,
                            SortDirection::Ascending,
                            algorithm,
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_presorted_input(c: &mut Criterion) {
    let records = listings(50_000);
    let refs: Vec<&Record> = records.iter().collect();
    let sorted = rank_with(
        &refs,
        RankingMethod::Price,
        SortDirection::Ascending,
        SortAlgorithm::Merge,
    );
    c.bench_function("rank/presorted_partition_50000", |b| {
        b.iter(|| {
            rank_with(
                black_box(&sorted),
                RankingMethod::Price,
                SortDirection::Ascending,
                SortAlgorithm::Partition,
            )
        })
    });
}

fn bench_query(c: &mut Criterion) {
    let session = match Session::from_rows(
        raw_rows(20_000),
        &LoadOptions::default(),
        SessionOptions::default(),
    ) {
        Ok(s) => s,
        Err(e) => panic!("bench fixture failed to load: {e}"),
    };
    let query = Query::new("toyota", RankingMethod::Year)
        .max_price("30000")
        .min_year("2005");
    c.bench_function("session/run_query_20000", |b| {
        b.iter(|| session.run_query(black_box(&query)))
    });
}

criterion_group!(benches, bench_sort_algorithms, bench_presorted_input, bench_query);
criterion_main!(benches);
