use breeding_assistant::{BreedingData, CompatibilityScorer, ReportGenerator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_scorer(c: &mut Criterion) {
    let data = BreedingData::builtin().expect("built-in table");
    let scorer = CompatibilityScorer::new();
    let wheat = data.plant(1).expect("wheat").profile();
    let barley = data.plant(2).expect("barley").profile();

    c.bench_function("score_pair", |b| {
        b.iter(|| scorer.score(black_box(&wheat), black_box(&barley)))
    });

    c.bench_function("rank_pairs", |b| b.iter(|| scorer.rank_pairs(black_box(&data))));

    let (a, bb) = (data.plant(1).expect("wheat"), data.plant(2).expect("barley"));
    let score = scorer.score(&a.profile(), &bb.profile());
    c.bench_function("generate_report", |b| {
        b.iter(|| ReportGenerator::generate(black_box(a), black_box(bb), &score))
    });
}

criterion_group!(benches, bench_scorer);
criterion_main!(benches);
