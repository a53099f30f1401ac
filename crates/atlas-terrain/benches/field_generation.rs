use atlas_terrain::{
    ClassificationRule, ClassificationTable, NoiseConfig, NoiseFieldGenerator, OverlayRule,
    TerrainClassifier,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn config(size: u32) -> NoiseConfig {
    NoiseConfig {
        width: size,
        height: size,
        seed: 1234,
        scale: 40.0,
        octaves: 6,
        ..Default::default()
    }
}

fn bench_generate_256(c: &mut Criterion) {
    let config = config(256);
    c.bench_function("generate_256x256_6oct", |bencher| {
        bencher.iter(|| black_box(NoiseFieldGenerator::generate(black_box(&config))))
    });
}

fn bench_generate_1024(c: &mut Criterion) {
    let config = config(1024);
    c.bench_function("generate_1024x1024_6oct", |bencher| {
        bencher.iter(|| black_box(NoiseFieldGenerator::generate(black_box(&config))))
    });
}

fn bench_classify_512(c: &mut Criterion) {
    let primary = NoiseFieldGenerator::generate(&config(512)).unwrap();
    let secondary = NoiseFieldGenerator::generate(&NoiseConfig {
        seed: 99,
        ..config(512)
    })
    .unwrap();
    let table = ClassificationTable::new(vec![
        ClassificationRule::new(0.85, 5u8),
        ClassificationRule::new(0.7, 4),
        ClassificationRule::new(0.5, 3),
        ClassificationRule::new(0.4, 2),
        ClassificationRule::new(0.35, 1),
        ClassificationRule::new(0.0, 0),
    ])
    .unwrap();
    let classifier =
        TerrainClassifier::new(table).with_overlay(OverlayRule::new(0.4, 0.7, 0.8, 6).unwrap());

    c.bench_function("classify_512x512_overlay", |bencher| {
        bencher.iter(|| black_box(classifier.classify(&primary, Some(&secondary))))
    });
}

criterion_group!(
    benches,
    bench_generate_256,
    bench_generate_1024,
    bench_classify_512
);
criterion_main!(benches);
