use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serialbook_core::{ChapterExtractor, ExtractConfig, SiteProfile, collect_links, natural_key, sort_natural};

fn bench_extract_chapter(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/chapter.html").unwrap();
    let extractor = ChapterExtractor::new(ExtractConfig::default()).unwrap();

    c.bench_function("extract_chapter", |b| b.iter(|| extractor.extract(black_box(&html))));
}

fn bench_collect_links(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/listing.html").unwrap();
    let scope = SiteProfile::default().link_scope().unwrap();

    c.bench_function("collect_links", |b| b.iter(|| collect_links(black_box(&html), &scope)));
}

fn bench_natural_sort(c: &mut Criterion) {
    let links: Vec<String> = (1..=2000)
        .rev()
        .map(|n| format!("https://www.readthedrama.com/novels/shine-on-me/chapter-{n}"))
        .collect();

    let mut group = c.benchmark_group("natural");
    group.bench_function("key", |b| b.iter(|| natural_key(black_box(&links[0]))));
    group.bench_function("sort_2000", |b| {
        b.iter(|| {
            let mut links = links.clone();
            sort_natural(black_box(&mut links));
            links
        })
    });
    group.finish();
}

criterion_group!(benches, bench_extract_chapter, bench_collect_links, bench_natural_sort);
criterion_main!(benches);
