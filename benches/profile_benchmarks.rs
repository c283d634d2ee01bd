use basis_lexprofile::basis::{self, BASIS};
use basis_lexprofile::codec;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Generate a CMake listing that exercises every keyword group
fn generate_listing(lines: usize) -> String {
    let mut content = String::new();
    for i in 0..lines {
        content.push_str(&format!(
            "basis_add_library(lib_{i} SHARED src/{i}.cxx)\n\
             # target {i}\n\
             if (${{WITH_{i}}} AND EXISTS \"$ENV{{HOME}}/{i}\")\n\
             \x20 install (TARGETS lib_{i} DESTINATION [HKEY_LOCAL_MACHINE\\Software\\{i}])\n\
             endif ()\n"
        ));
    }
    content
}

fn words(listing: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut rest = listing;
    while let Some(start) = rest.find(|c: char| c.is_ascii_alphabetic() || c == '_') {
        let tail = &rest[start..];
        let end = tail
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(tail.len());
        out.push((&tail[..end], &tail[end..]));
        rest = &tail[end..];
    }
    out
}

fn bench_keyword_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyword_lookup");

    for lines in [10, 100, 1000] {
        let listing = generate_listing(lines);
        let words = words(&listing);
        group.throughput(Throughput::Elements(words.len() as u64));
        group.bench_with_input(BenchmarkId::new("classify", lines), &words, |b, words| {
            b.iter(|| {
                words
                    .iter()
                    .filter(|(word, following)| {
                        BASIS
                            .classify_keyword(black_box(word), black_box(following))
                            .is_some()
                    })
                    .count()
            });
        });
    }

    group.finish();
}

fn bench_escape_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape_matching");
    let rules = BASIS.quote_and_escape_rules();

    for input in ["${CMAKE_SOURCE_DIR}", "$ENV{HOME}", "[HKEY_LOCAL_MACHINE\\Software]", "plain text"] {
        group.bench_with_input(BenchmarkId::new("match_escape", input), input, |b, input| {
            b.iter(|| rules.match_escape(black_box(input)).map(|(p, len)| (p.id(), len)));
        });
    }

    let listing = generate_listing(100);
    group.throughput(Throughput::Bytes(listing.len() as u64));
    group.bench_function("free_regex_scan", |b| {
        b.iter(|| {
            let mut rest = black_box(listing.as_str());
            let mut hits = 0;
            while let Some((_, range)) = BASIS.match_free_regex(rest) {
                hits += 1;
                rest = &rest[range.end..];
            }
            hits
        });
    });

    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    group.bench_function("build_basis", |b| b.iter(|| basis::profile().unwrap()));

    let json = codec::to_json_string(&BASIS).unwrap();
    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_function("load_json", |b| {
        b.iter(|| codec::from_json_str(black_box(&json)).unwrap())
    });
    group.bench_function("save_json", |b| b.iter(|| codec::to_json_string(&BASIS).unwrap()));

    group.finish();
}

criterion_group!(
    benches,
    bench_keyword_lookup,
    bench_escape_matching,
    bench_construction
);
criterion_main!(benches);
