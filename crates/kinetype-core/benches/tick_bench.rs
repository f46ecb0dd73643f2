use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kinetype_core::{AnimatedText, EffectSettings, MainMotion, StaggerKind, TextOptions};
use std::sync::Arc;

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("AnimatedText::tick");

    let mut settings = EffectSettings::default();
    settings.appearance.kind = StaggerKind::Sequentially;
    settings.appearance.delay_between_elements = 0.01;
    settings.main.motion = MainMotion::wave();
    settings.delay_before_disappearance = 3600.0;
    let settings = Arc::new(settings);

    for &len in &[100usize, 1_000, 5_000] {
        let source: String = "lorem ipsum dolor sit amet ".chars().cycle().take(len).collect();
        let mut text = AnimatedText::new(TextOptions::default(), Some(settings.clone())).with_seed(1);
        text.set_text(&source, 0.0);
        let mut now = 0.0;

        group.bench_with_input(BenchmarkId::new("units", len), &len, |b, _| {
            b.iter(|| {
                now += 1.0 / 60.0;
                text.tick(now);
            })
        });
    }

    group.finish();
}

fn bench_frames(c: &mut Criterion) {
    let mut text = AnimatedText::new(TextOptions::default(), Some(Arc::new(EffectSettings::default())))
        .with_seed(1);
    let source: String = "the quick brown fox ".chars().cycle().take(1_000).collect();
    text.set_text(&source, 0.0);
    text.tick(0.5);

    c.bench_function("AnimatedText::frames/1000", |b| b.iter(|| text.frames()));
}

criterion_group!(benches, bench_tick, bench_frames);
criterion_main!(benches);
