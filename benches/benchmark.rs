//! Extraction benchmarks.
//!
//! Run with: `cargo bench`
//!
//! - A small synthetic article for the per-call overhead
//! - A long generated article for traversal and filter cost
//! - A page with no article container, which walks the whole fallback ladder

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_article_heuristics::{extract, extract_with_options, Options};

const SAMPLE_HTML: &str = r##"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Storm closes bridge | Daily Post</title>
    <meta name="author" content="Jane Porter">
    <meta property="article:published_time" content="2024-03-05T09:30:00Z">
    <meta property="og:image" content="https://example.com/img/bridge.jpg">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/news">News</a>
    </nav>
    <article>
        <h1>Storm closes bridge</h1>
        <p class="standfirst">Council says repairs to the old crossing will take months.</p>
        <p class="byline">By Jane Porter</p>
        <p>The river rose overnight, and the council closed the old bridge to traffic
        until engineers could inspect the damaged piers.</p>
        <figure>
            <img src="/img/piers.jpg" width="800" height="600" alt="Damaged piers">
            <figcaption>Engineers inspect the piers on Tuesday.</figcaption>
        </figure>
        <h2>What happens next</h2>
        <p>Buses will be diverted through the north estate, adding around twenty
        minutes to most journeys into the town centre.</p>
        <div class="share-buttons"><a href="#">Share</a><a href="#">Tweet</a></div>
    </article>
    <aside>
        <h3>Related Articles</h3>
        <ul><li><a href="/a">Flood warnings issued</a></li><li><a href="/b">Roads closed</a></li></ul>
    </aside>
    <footer><p>Copyright 2024 Daily Post</p></footer>
</body>
</html>
"##;

fn long_article(paragraphs: usize) -> String {
    let mut html = String::from("<html><head><title>Long read</title></head><body><article><h1>Long read</h1>");
    for i in 0..paragraphs {
        if i % 10 == 0 {
            html.push_str(&format!("<h2>Section {i}</h2>"));
        }
        html.push_str(&format!(
            "<p>Paragraph {i} explains, in some detail, how the river authority measured \
             flow rates at <a href=\"/gauge/{i}\">gauge {i}</a> and why the readings matter.</p>"
        ));
    }
    html.push_str("</article></body></html>");
    html
}

fn bench_extract_default(c: &mut Criterion) {
    c.bench_function("extract_default", |b| {
        b.iter(|| extract(black_box(SAMPLE_HTML)));
    });
}

fn bench_extract_debug(c: &mut Criterion) {
    let options = Options {
        debug: true,
        ..Options::with_base_url("https://example.com/news/storm")
    };
    c.bench_function("extract_debug", |b| {
        b.iter(|| extract_with_options(black_box(SAMPLE_HTML), black_box(&options)));
    });
}

fn bench_long_articles(c: &mut Criterion) {
    let mut group = c.benchmark_group("long_article");
    for size in [50usize, 200, 800] {
        let html = long_article(size);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &html, |b, html| {
            b.iter(|| extract(black_box(html)));
        });
    }
    group.finish();
}

fn bench_fallback_ladder(c: &mut Criterion) {
    let mut html = String::from("<html><body>");
    for i in 0..40 {
        html.push_str(&format!("<div class=\"row\"><div><p>Row {i} with a short line.</p></div></div>"));
    }
    html.push_str("</body></html>");
    c.bench_function("fallback_ladder", |b| {
        b.iter(|| extract(black_box(&html)));
    });
}

criterion_group!(
    benches,
    bench_extract_default,
    bench_extract_debug,
    bench_long_articles,
    bench_fallback_ladder
);
criterion_main!(benches);
