//! Performance benchmarks for dokutree
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Sample wiki pages of various sizes
mod samples {
    pub const TINY: &str = "Hello, **world**!";

    pub const SMALL: &str = r#"====== Heading ======

This is a paragraph with //emphasis// and **strong** text.

  * Item 1
  * Item 2
    * Nested item

``inline`` and [[wiki:syntax|a link]] and https://example.com.
"#;

    /// Generate a large page by repeating sections
    pub fn large() -> String {
        let section = r#"
===== Section Title =====

This paragraph contains various inline elements like //emphasis//, **strong**,
``monospace``, __underline__ and [[https://example.com|links]].

  - First ordered point with **bold** text
  - Second point with //italic// text
    * Nested bullet with {{ wiki:logo.png?64|Logo}}

<code rust>
fn example() {
    let x = 42;
    println!("{}", x);
}
</code>

Another paragraph with a bare URL http://example.org/page and <nowiki>**raw**</nowiki>
text to exercise the fixup pass.

"#;
        section.repeat(50)
    }

    /// Many unmatched delimiter candidates
    pub fn pathological_delimiters() -> String {
        "** [[ {{ // ".repeat(1000)
    }

    /// Deeply nested list
    pub fn pathological_nested() -> String {
        (1..=100)
            .map(|level| format!("{}* item\n", "  ".repeat(level)))
            .collect()
    }
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    group.throughput(Throughput::Bytes(samples::TINY.len() as u64));
    group.bench_function("tiny", |b| {
        b.iter(|| dokutree::parse(black_box(samples::TINY.as_bytes()), "tiny"))
    });

    group.throughput(Throughput::Bytes(samples::SMALL.len() as u64));
    group.bench_function("small", |b| {
        b.iter(|| dokutree::parse(black_box(samples::SMALL.as_bytes()), "small"))
    });

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| {
        b.iter(|| dokutree::parse(black_box(large.as_bytes()), "large"))
    });

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    let large = samples::large();
    let doc = match dokutree::parse(large.as_bytes(), "large") {
        Ok(doc) => doc,
        Err(err) => panic!("sample failed to parse: {err}"),
    };
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large_to_html", |b| {
        b.iter(|| dokutree::to_html(black_box(&doc)))
    });

    group.finish();
}

fn bench_escaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("escaping");

    let plain = "Hello, this is plain text without any special characters. ".repeat(100);
    group.throughput(Throughput::Bytes(plain.len() as u64));
    group.bench_function("plain_text", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(plain.len());
            dokutree::escape::escape_text_into(&mut out, black_box(plain.as_bytes()));
            out
        })
    });

    let html_heavy = "<script>alert('xss')</script> & more <tags> here! ".repeat(100);
    group.throughput(Throughput::Bytes(html_heavy.len() as u64));
    group.bench_function("html_heavy", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(html_heavy.len() * 2);
            dokutree::escape::escape_text_into(&mut out, black_box(html_heavy.as_bytes()));
            out
        })
    });

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20); // Fewer samples for slow cases

    let delimiters = samples::pathological_delimiters();
    group.throughput(Throughput::Bytes(delimiters.len() as u64));
    group.bench_function("unmatched_delimiters", |b| {
        b.iter(|| dokutree::parse(black_box(delimiters.as_bytes()), "p"))
    });

    let nested = samples::pathological_nested();
    group.throughput(Throughput::Bytes(nested.len() as u64));
    group.bench_function("deep_list", |b| {
        b.iter(|| dokutree::parse(black_box(nested.as_bytes()), "p"))
    });

    let cases = [
        ("unclosed_brackets", "[[{{".repeat(100_000)),
        ("lone_gt", ">".repeat(200_000)),
        ("lt_then_gt", format!("<{}", "a>".repeat(100_000))),
    ];
    for (name, input) in &cases {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_function(*name, |b| b.iter(|| dokutree::parse(black_box(input.as_bytes()), "p")));
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_rendering,
    bench_escaping,
    bench_pathological
);
criterion_main!(benches);
