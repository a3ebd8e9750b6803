//! Property-based tests for the pharmacogenomic pipeline
//!
//! Generates VCF lines, star-allele lists and arbitrary text with proptest
//! and checks the pipeline invariants: supported genes only, no panics on
//! any input, pure classification and a total risk function.

use ferro_pgx::diplotype::{call_from_stars, Diplotype};
use ferro_pgx::phenotype::{classify, classify_str};
use ferro_pgx::risk::assess;
use ferro_pgx::vcf::{parse_info, parse_vcf, parse_vcf_line, LineOutcome};
use ferro_pgx::{analyze, Drug, Gene, Phenotype};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Strategies
// =============================================================================

/// Supported gene symbols in mixed case, plus a few unsupported ones
fn gene_symbol() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "CYP2D6", "CYP2C19", "CYP2C9", "SLCO1B1", "TPMT", "DPYD"
        ])
        .prop_map(str::to_string),
        prop::sample::select(vec!["cyp2d6", "Tpmt", "dpyd"]).prop_map(str::to_string),
        prop::sample::select(vec!["CFTR", "BRCA1", "CYP3A5", ""]).prop_map(str::to_string),
    ]
}

/// Star-allele tokens, with and without the `*` prefix
fn star_token() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "1", "2", "3", "4", "5", "6", "17", "41", "2A", "13", "3A", "3C", "1xN", "2XN"
        ])
        .prop_map(str::to_string),
        "[0-9]{1,2}[A-C]?".prop_map(|s| format!("*{}", s)),
    ]
}

fn star_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(star_token(), 0..5)
}

fn rsid() -> impl Strategy<Value = Option<String>> {
    prop::option::of("rs[0-9]{3,9}")
}

/// A well-formed eight-column VCF data line
fn vcf_line() -> impl Strategy<Value = String> {
    (gene_symbol(), star_list(), rsid(), 1..250_000_000u64).prop_map(|(gene, stars, rs, pos)| {
        let mut info = vec![format!("GENE={}", gene)];
        if !stars.is_empty() {
            info.push(format!("STAR={}", stars.join(",")));
        }
        if let Some(rs) = rs {
            info.push(format!("RS={}", rs));
        }
        format!("chr1\t{}\t.\tA\tG\t.\tPASS\t{}", pos, info.join(";"))
    })
}

fn phenotype() -> impl Strategy<Value = Phenotype> {
    prop::sample::select(Phenotype::all().to_vec())
}

fn drug() -> impl Strategy<Value = Drug> {
    prop::sample::select(Drug::all().to_vec())
}

fn gene() -> impl Strategy<Value = Gene> {
    prop::sample::select(Gene::all().to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // -------------------------------------------------------------------------
    // Parser
    // -------------------------------------------------------------------------

    /// Every emitted record carries a supported gene
    #[test]
    fn test_records_have_supported_genes(lines in prop::collection::vec(vcf_line(), 0..20)) {
        let content = lines.join("\n");
        let records = parse_vcf(&content, 5_000_000).unwrap();
        for record in &records {
            prop_assert!(Gene::all().contains(&record.gene));
        }
        prop_assert!(records.len() <= lines.len());
    }

    /// Star tokens come back prefixed, in listed order
    #[test]
    fn test_stars_are_prefixed(line in vcf_line()) {
        if let LineOutcome::Record(record) = parse_vcf_line(&line) {
            for star in &record.stars {
                prop_assert!(star.starts_with('*'));
            }
        }
    }

    /// Lines with fewer than eight fields never produce a record
    #[test]
    fn test_short_lines_are_skipped(fields in prop::collection::vec("[A-Za-z0-9=;]{0,10}", 0..8)) {
        let line = fields.join("\t");
        if !line.trim().is_empty() {
            prop_assert!(!matches!(parse_vcf_line(&line), LineOutcome::Record(_)));
        }
    }

    /// Arbitrary text never panics the parser or the pipeline
    #[test]
    fn test_arbitrary_text_does_not_panic(content in "\\PC{0,400}") {
        let _ = parse_info(&content);
        let analysis = analyze(&content, Drug::all()).unwrap();
        prop_assert_eq!(analysis.drugs.len(), Drug::all().len());
    }

    /// Content above the ceiling always fails
    #[test]
    fn test_size_limit_enforced(limit in 1..200usize, extra in 1..50usize) {
        let content = "#".repeat(limit + extra);
        prop_assert!(parse_vcf(&content, limit).is_err());
        prop_assert!(parse_vcf(&content, limit + extra).is_ok());
    }

    // -------------------------------------------------------------------------
    // Diplotype caller
    // -------------------------------------------------------------------------

    /// Repeating the input tokens does not change the call beyond homozygosity
    #[test]
    fn test_duplicate_tokens_do_not_reorder(stars in star_list()) {
        let doubled: Vec<String> = stars.iter().chain(stars.iter()).cloned().collect();
        let once = call_from_stars(&stars);
        let twice = call_from_stars(&doubled);
        match (&once, &twice) {
            (Diplotype::Unknown, Diplotype::Unknown) => {}
            (Diplotype::Called { first: a, second: b }, Diplotype::Called { first: c, second: d }) => {
                prop_assert_eq!(a, c);
                // A single allele seen once pairs with *1; seen twice it is homozygous
                if b != d {
                    prop_assert_eq!(b.as_str(), "*1");
                    prop_assert_eq!(d, c);
                }
            }
            _ => prop_assert!(false, "calls disagree on unknown: {:?} vs {:?}", once, twice),
        }
    }

    /// No stars means no call; any star means a call
    #[test]
    fn test_unknown_iff_no_stars(stars in star_list()) {
        prop_assert_eq!(call_from_stars(&stars).is_unknown(), stars.is_empty());
    }

    /// A duplication allele, when present, is placed first
    #[test]
    fn test_duplication_first(stars in star_list()) {
        let call = call_from_stars(&stars);
        if stars.iter().any(|s| s.to_uppercase().contains("XN")) {
            let (first, _) = call.alleles().unwrap();
            prop_assert!(first.contains("XN"));
        }
    }

    // -------------------------------------------------------------------------
    // Classifier and risk engine
    // -------------------------------------------------------------------------

    /// Classification is a pure function of its inputs
    #[test]
    fn test_classification_is_pure(gene in gene(), stars in star_list()) {
        let call = call_from_stars(&stars);
        let first = classify(gene, &call);
        let second = classify(gene, &call);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, classify_str(gene.as_str(), &call.to_string()));
        prop_assert_eq!(first == Phenotype::Unknown, call.is_unknown());
    }

    /// The risk function is total and only the primary gene gets a rule
    #[test]
    fn test_risk_is_total(drug in drug(), gene in gene(), phenotype in phenotype()) {
        let risk = assess(drug, gene, phenotype);
        prop_assert!((0.0..=1.0).contains(&risk.confidence_score));
        let known = gene == drug.primary_gene();
        prop_assert_eq!(risk.is_known(), known);
        prop_assert_eq!(risk.cpic_reference.is_empty(), !known);
    }
}
