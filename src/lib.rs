// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-pgx: pharmacogenomic risk inference
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Parses star-allele annotated VCF text, calls a diplotype per gene,
//! classifies the metabolizer phenotype and maps each requested drug to a
//! CPIC-style risk assessment.
//!
//! # Example
//!
//! ```
//! use ferro_pgx::{analyze, parse_drug_list, Phenotype, RiskLabel};
//!
//! let vcf = "chr22\t42126611\trs3892097\tC\tT\t.\tPASS\tGENE=CYP2D6;STAR=4,4;RS=rs3892097\n";
//!
//! let drugs = parse_drug_list("codeine").unwrap();
//! let analysis = analyze(vcf, &drugs).unwrap();
//!
//! let codeine = &analysis.drugs[0];
//! assert_eq!(codeine.diplotype.to_string(), "*4/*4");
//! assert_eq!(codeine.phenotype, Phenotype::Pm);
//! assert_eq!(codeine.assessment.risk_label, RiskLabel::Ineffective);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod diplotype;
pub mod drug;
pub mod error;
pub mod explain;
pub mod gene;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod phenotype;
pub mod report;
pub mod risk;
pub mod vcf;

// Re-export commonly used types
pub use analysis::{analyze, Analysis, AnalysisOptions, AnalysisSummary, Analyzer, DrugAnalysis};
pub use diplotype::{call_diplotype, Diplotype};
pub use drug::{parse_drug_list, Drug};
pub use error::FerroError;
pub use gene::Gene;
pub use phenotype::{classify, Phenotype};
pub use report::{AnalysisResponse, PharmacogenomicReport, ReportBuilder};
pub use risk::{assess, RiskAssessment, RiskLabel, Severity};
pub use vcf::{parse_vcf, VariantRecord};

/// Result type alias for ferro-pgx operations
pub type Result<T> = std::result::Result<T, FerroError>;
