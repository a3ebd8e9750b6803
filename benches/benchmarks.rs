//! Performance benchmarks for ferro-pgx
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ferro_pgx::analysis::{AnalysisOptions, Analyzer};
use ferro_pgx::diplotype::call_from_stars;
use ferro_pgx::phenotype::classify_str;
use ferro_pgx::risk::assess;
use ferro_pgx::vcf::parse_vcf_default;
use ferro_pgx::{Drug, Gene, Phenotype};

const GENES: [(&str, &str); 6] = [
    ("CYP2D6", "4"),
    ("CYP2C19", "2,17"),
    ("CYP2C9", "3"),
    ("SLCO1B1", "5"),
    ("TPMT", "3A,3C"),
    ("DPYD", "2A"),
];

/// Build a VCF with `n` data lines cycling over the supported genes
fn synthetic_vcf(n: usize) -> String {
    let mut out =
        String::from("##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n");
    for i in 0..n {
        let (gene, stars) = GENES[i % GENES.len()];
        out.push_str(&format!(
            "chr1\t{}\trs{}\tA\tG\t.\tPASS\tGENE={};STAR={};RS=rs{}\n",
            i + 1,
            i + 1,
            gene,
            stars,
            i + 1
        ));
    }
    out
}

// =============================================================================
// Parsing benchmarks
// =============================================================================

/// Benchmark VCF parsing throughput by file size
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for n in [10, 1_000, 50_000] {
        let vcf = synthetic_vcf(n);
        group.throughput(Throughput::Bytes(vcf.len() as u64));
        group.bench_with_input(BenchmarkId::new("lines", n), &vcf, |b, v| {
            b.iter(|| parse_vcf_default(black_box(v)))
        });
    }

    group.finish();
}

// =============================================================================
// Calling benchmarks
// =============================================================================

/// Benchmark diplotype calling and phenotype classification
fn bench_calling(c: &mut Criterion) {
    let mut group = c.benchmark_group("calling");

    let star_sets: Vec<(&str, Vec<&str>)> = vec![
        ("single", vec!["*4"]),
        ("homozygous", vec!["*4", "*4"]),
        ("duplication", vec!["*4", "*10", "*1xN"]),
        ("many", vec!["*2", "*3", "*4", "*17", "*41", "*2", "*3"]),
    ];
    for (name, stars) in &star_sets {
        group.bench_with_input(BenchmarkId::new("diplotype", name), stars, |b, s| {
            b.iter(|| call_from_stars(black_box(s)))
        });
    }

    let diplotypes = vec![
        ("CYP2D6", "*4/*4"),
        ("CYP2C19", "*2/*17"),
        ("TPMT", "*3A/*1"),
        ("DPYD", "*2A/*13"),
    ];
    for (gene, diplotype) in &diplotypes {
        group.bench_with_input(BenchmarkId::new("phenotype", gene), diplotype, |b, d| {
            b.iter(|| classify_str(black_box(gene), black_box(d)))
        });
    }

    group.bench_function("risk", |b| {
        b.iter(|| {
            for drug in Drug::all() {
                for phenotype in Phenotype::all() {
                    black_box(assess(*drug, drug.primary_gene(), *phenotype));
                }
            }
            black_box(assess(Drug::Codeine, Gene::Slco1b1, Phenotype::Pm))
        })
    });

    group.finish();
}

// =============================================================================
// Pipeline benchmarks
// =============================================================================

/// Benchmark the full pipeline, sequential against parallel drug evaluation
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let vcf = synthetic_vcf(5_000);
    group.throughput(Throughput::Elements(Drug::all().len() as u64));

    for parallel in [false, true] {
        let analyzer = Analyzer::with_options(AnalysisOptions::new().with_parallel(parallel));
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(BenchmarkId::new("all_drugs", name), |b| {
            b.iter(|| analyzer.analyze(black_box(&vcf), Drug::all()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_calling, bench_pipeline);
criterion_main!(benches);
