use asset_resolver::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Answers 404 everywhere except the `hit` host
struct MissFetcher;

impl Fetch for MissFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<FetchResponse, TransportError> {
        let status = if url.starts_with("https://hit/") { 200 } else { 404 };
        Ok(FetchResponse::new(status, b"payload".to_vec()))
    }
}

fn large_registry() -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    for i in 0..1000 {
        let types = if i % 10 == 0 {
            vec!["Sound", "ImageBitmap"]
        } else {
            vec!["Project"]
        };
        registry.register(types, move |asset: &Asset| format!("https://miss{}/{}", i, asset.asset_id()));
    }
    registry.register(["Sound"], |asset: &Asset| format!("https://hit/{}", asset.asset_id()));
    registry
}

fn benchmark_find_next(c: &mut Criterion) {
    let registry = large_registry();

    c.bench_function("find_next_full_walk_1000", |b| {
        b.iter(|| {
            let mut cursor = 0;
            let mut found = 0;
            while let Some((_, next)) = registry.find_next(cursor, black_box("Sound")) {
                cursor = next;
                found += 1;
            }
            black_box(found)
        });
    });
}

fn benchmark_template(c: &mut Criterion) {
    let template =
        UrlTemplate::parse("https://assets.example.com/internalapi/asset/{asset_id}.{data_format}/get/")
            .unwrap();
    let asset = Asset::new(AssetType::IMAGE_BITMAP, "b7853f557e4426412e64bb3da6531a99");

    c.bench_function("url_template_render", |b| {
        b.iter(|| black_box(template.render(black_box(&asset))));
    });
}

fn benchmark_load(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let resolver = AssetResolver::with_registry(large_registry(), MissFetcher);

    c.bench_function("load_after_100_misses", |b| {
        b.iter(|| {
            let asset = runtime
                .block_on(resolver.load(&AssetType::SOUND, black_box("abc")))
                .unwrap();
            black_box(asset)
        });
    });
}

criterion_group!(benches, benchmark_find_next, benchmark_template, benchmark_load);
criterion_main!(benches);
