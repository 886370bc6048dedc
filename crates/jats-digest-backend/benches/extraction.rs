use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jats_digest_backend::{extract, normalize, JatsDigester};

// Helper function to generate a JATS article with the given number of body sections
fn generate_article(sections: usize) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<article>\n<front><article-meta>\n");
    xml.push_str("<title-group><article-title>Benchmark article</article-title></title-group>\n");
    xml.push_str("<contrib-group>\n");
    for i in 0..20 {
        xml.push_str(&format!(
            "<contrib contrib-type=\"author\"><name><surname>Surname{i}</surname><given-names>Given{i}</given-names></name></contrib>\n"
        ));
    }
    xml.push_str("</contrib-group>\n");
    xml.push_str("<abstract><p>An abstract with <italic>markup</italic> and [noise] &amp; symbols.</p></abstract>\n");
    xml.push_str("</article-meta></front>\n<body>\n");

    for s in 0..sections {
        xml.push_str(&format!("<sec id=\"s{s}\"><title>Section {s}</title>\n"));
        for p in 0..8 {
            xml.push_str(&format!(
                "<p>Paragraph {p} of section {s}   with  irregular\n whitespace, <xref>[{p}]</xref> and text.</p>\n"
            ));
        }
        xml.push_str("</sec>\n");
    }

    xml.push_str("</body>\n<back><sec sec-type=\"conclusions\"><p>Done.</p></sec></back>\n</article>\n");
    xml
}

// Benchmark the string boundary with varying document sizes
fn benchmark_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_size");

    for size in [10, 100, 1_000, 5_000].iter() {
        let xml = generate_article(*size);
        group.throughput(Throughput::Bytes(xml.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_sections", size)),
            &xml,
            |b, xml| {
                b.iter(|| black_box(extract(black_box(xml.as_bytes()))));
            },
        );
    }

    group.finish();
}

// Parsing plus extraction versus extraction over an already parsed tree
fn benchmark_parse_vs_extract(c: &mut Criterion) {
    let xml = generate_article(1_000);
    let digester = JatsDigester::new();
    let mut group = c.benchmark_group("pipeline_stage");

    group.bench_function("parse_only", |b| {
        b.iter(|| black_box(jats_digest_backend::parse_document(black_box(&xml)).is_ok()));
    });

    group.bench_function("digest_str", |b| {
        b.iter(|| black_box(digester.digest_str(black_box(&xml))));
    });

    group.finish();
}

fn benchmark_normalize(c: &mut Criterion) {
    let text = "Noisy [text] with   runs of\twhitespace & symbols * everywhere. ".repeat(200);

    c.bench_function("normalize_12kb", |b| {
        b.iter(|| black_box(normalize(black_box(&text))));
    });
}

criterion_group!(
    benches,
    benchmark_varying_sizes,
    benchmark_parse_vs_extract,
    benchmark_normalize
);
criterion_main!(benches);
