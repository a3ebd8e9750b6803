//! Per-drug analysis pipeline
//!
//! Runs parser, diplotype caller, phenotype classifier and risk engine once
//! for every requested drug. Drug evaluations share the parsed records and
//! are independent of each other.
//!
//! # Example
//!
//! ```
//! use ferro_pgx::analysis::analyze;
//! use ferro_pgx::risk::RiskLabel;
//! use ferro_pgx::Drug;
//!
//! let vcf = "chr22\t42126611\trs3892097\tC\tT\t.\tPASS\tGENE=CYP2D6;STAR=4,4;RS=rs3892097\n";
//! let analysis = analyze(vcf, &[Drug::Codeine]).unwrap();
//!
//! let codeine = &analysis.drugs[0];
//! assert_eq!(codeine.diplotype.to_string(), "*4/*4");
//! assert_eq!(codeine.assessment.risk_label, RiskLabel::Ineffective);
//! ```

use serde::{Deserialize, Serialize};

use crate::diplotype::{call_diplotype, Diplotype};
use crate::drug::Drug;
use crate::error::FerroError;
use crate::gene::Gene;
use crate::phenotype::{classify, Phenotype};
use crate::risk::{assess, RiskAssessment};
use crate::vcf::{parse_vcf, VariantRecord, DEFAULT_MAX_VCF_BYTES};

/// Options controlling an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Byte ceiling for VCF content
    pub max_bytes: usize,
    /// Evaluate drugs on the rayon pool (ignored without the `parallel` feature)
    pub parallel: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_VCF_BYTES,
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Result for one requested drug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugAnalysis {
    pub drug: Drug,
    /// The drug's primary gene
    pub gene: Gene,
    pub diplotype: Diplotype,
    pub phenotype: Phenotype,
    pub assessment: RiskAssessment,
    /// Parsed records belonging to `gene`, in input order
    pub variants: Vec<VariantRecord>,
    /// True when the gene has no records, no star alleles or no rsIDs
    pub missing_annotations: bool,
}

impl DrugAnalysis {
    /// rsIDs of the gene's variants, in record order
    pub fn rsids(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().filter_map(|v| v.rsid.as_deref())
    }
}

/// Totals over every parsed record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_variants: usize,
    /// Genes with at least one record, in first-seen order
    pub genes_covered: Vec<Gene>,
    /// rsIDs in record order
    pub rsids_detected: Vec<String>,
}

impl AnalysisSummary {
    pub fn from_records(records: &[VariantRecord]) -> Self {
        let mut genes_covered = Vec::new();
        for record in records {
            if !genes_covered.contains(&record.gene) {
                genes_covered.push(record.gene);
            }
        }
        Self {
            total_variants: records.len(),
            genes_covered,
            rsids_detected: records.iter().filter_map(|r| r.rsid.clone()).collect(),
        }
    }
}

/// Output of a full analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// One entry per requested drug, in request order
    pub drugs: Vec<DrugAnalysis>,
    pub summary: AnalysisSummary,
}

/// Runs the pipeline with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalysisOptions,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Parse `vcf_text` and evaluate every drug in `drugs`.
    ///
    /// Fails only when the content exceeds the byte ceiling.
    pub fn analyze(&self, vcf_text: &str, drugs: &[Drug]) -> Result<Analysis, FerroError> {
        let records = parse_vcf(vcf_text, self.options.max_bytes)?;
        log::info!(
            "Analyzing {} drug(s) against {} variant record(s)",
            drugs.len(),
            records.len()
        );
        Ok(self.analyze_records(&records, drugs))
    }

    /// Evaluate every drug in `drugs` against already-parsed records.
    pub fn analyze_records(&self, records: &[VariantRecord], drugs: &[Drug]) -> Analysis {
        let results = self.evaluate(records, drugs);
        for result in results.iter().filter(|r| r.missing_annotations) {
            log::warn!(
                "{}: missing annotations for {} (diplotype {})",
                result.drug,
                result.gene,
                result.diplotype
            );
        }
        Analysis {
            drugs: results,
            summary: AnalysisSummary::from_records(records),
        }
    }

    #[cfg(feature = "parallel")]
    fn evaluate(&self, records: &[VariantRecord], drugs: &[Drug]) -> Vec<DrugAnalysis> {
        if self.options.parallel {
            crate::parallel::analyze_drugs_parallel(records, drugs)
        } else {
            drugs.iter().map(|d| analyze_drug(records, *d)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, records: &[VariantRecord], drugs: &[Drug]) -> Vec<DrugAnalysis> {
        drugs.iter().map(|d| analyze_drug(records, *d)).collect()
    }
}

/// Analyze `vcf_text` for `drugs` with default options.
pub fn analyze(vcf_text: &str, drugs: &[Drug]) -> Result<Analysis, FerroError> {
    Analyzer::new().analyze(vcf_text, drugs)
}

/// Evaluate one drug against parsed records.
pub fn analyze_drug(records: &[VariantRecord], drug: Drug) -> DrugAnalysis {
    let gene = drug.primary_gene();
    let variants: Vec<VariantRecord> = records
        .iter()
        .filter(|r| r.gene == gene)
        .cloned()
        .collect();

    let diplotype = call_diplotype(&variants);
    let phenotype = classify(gene, &diplotype);
    let assessment = assess(drug, gene, phenotype);
    let missing_annotations = variants.is_empty()
        || !variants.iter().any(|v| v.has_stars())
        || !variants.iter().any(|v| v.rsid.is_some());

    log::debug!(
        "{}: {} {} -> {} -> {}",
        drug,
        gene,
        diplotype,
        phenotype,
        assessment.risk_label
    );

    DrugAnalysis {
        drug,
        gene,
        diplotype,
        phenotype,
        assessment,
        variants,
        missing_annotations,
    }
}
