use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use spe::{enforce_surprise_contract, CrewPolicy};

fn mainstream_plan(stops: usize) -> Value {
    let stops: Vec<Value> = (0..stops)
        .map(|i| {
            json!({
                "name": format!("Bistro {i}"),
                "category": "food",
                "placeId": format!("p-{i}"),
                "travelMinutes": 8 + i,
            })
        })
        .collect();
    json!({ "stops": stops })
}

fn enforce_bench(c: &mut Criterion) {
    let crew = CrewPolicy::default();
    let small = mainstream_plan(3);
    let large = mainstream_plan(24);

    c.bench_function("enforce_contract_3_stops", |b| {
        b.iter(|| {
            let outcome =
                enforce_surprise_contract(black_box(&small), &crew).expect("bench enforce");
            black_box(outcome);
        });
    });

    c.bench_function("enforce_contract_24_stops", |b| {
        b.iter(|| {
            let outcome =
                enforce_surprise_contract(black_box(&large), &crew).expect("bench enforce");
            black_box(outcome);
        });
    });
}

fn metadata_pool_bench(c: &mut Criterion) {
    let crew = CrewPolicy::default();
    let candidates: Vec<Value> = (0..200)
        .map(|i| {
            json!({
                "name": format!("Candidate {i}"),
                "types": ["gallery"],
                "energy": 0.3 + (i as f64 % 5.0) / 10.0,
            })
        })
        .collect();
    let plan = json!({
        "stops": [ { "name": "Oak Row Bistro", "category": "food" } ],
        "meta": { "surprise": { "magicRefinement": "more_energy", "seedCandidates": candidates } },
    });

    c.bench_function("enforce_contract_200_metadata_candidates", |b| {
        b.iter(|| {
            let outcome =
                enforce_surprise_contract(black_box(&plan), &crew).expect("bench enforce");
            black_box(outcome);
        });
    });
}

criterion_group!(benches, enforce_bench, metadata_pool_bench);
criterion_main!(benches);
