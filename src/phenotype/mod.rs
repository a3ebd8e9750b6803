//! Metabolizer phenotype classification
//!
//! Maps a gene and a called diplotype to a [`Phenotype`] with per-gene
//! rules over the allele-function tables in [`tables`]. Matching is by
//! substring on the upper-cased diplotype string; rules that ask for "both
//! alleles" test each side of the `/` separately.
//!
//! # Example
//!
//! ```
//! use ferro_pgx::phenotype::{classify_str, Phenotype};
//!
//! assert_eq!(classify_str("CYP2D6", "*4/*4"), Phenotype::Pm);
//! assert_eq!(classify_str("CYP2C19", "*17/*1"), Phenotype::Rm);
//! assert_eq!(classify_str("BRCA1", "*1/*1"), Phenotype::Unknown);
//! ```

pub mod tables;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::diplotype::{Diplotype, DUPLICATION_MARKER, REFERENCE_ALLELE};
use crate::gene::Gene;

use tables::contains_any;

/// Metabolizer status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phenotype {
    /// Poor metabolizer
    #[serde(rename = "PM")]
    Pm,
    /// Intermediate metabolizer
    #[serde(rename = "IM")]
    Im,
    /// Normal metabolizer
    #[serde(rename = "NM")]
    Nm,
    /// Rapid metabolizer
    #[serde(rename = "RM")]
    Rm,
    /// Ultra-rapid metabolizer
    #[serde(rename = "URM")]
    Urm,
    /// No call possible
    Unknown,
}

impl Phenotype {
    /// Get the abbreviation (e.g., "PM")
    pub fn as_str(&self) -> &'static str {
        match self {
            Phenotype::Pm => "PM",
            Phenotype::Im => "IM",
            Phenotype::Nm => "NM",
            Phenotype::Rm => "RM",
            Phenotype::Urm => "URM",
            Phenotype::Unknown => "Unknown",
        }
    }

    /// Get the long-form name (e.g., "Poor Metabolizer")
    pub fn description(&self) -> &'static str {
        match self {
            Phenotype::Pm => "Poor Metabolizer",
            Phenotype::Im => "Intermediate Metabolizer",
            Phenotype::Nm => "Normal Metabolizer",
            Phenotype::Rm => "Rapid Metabolizer",
            Phenotype::Urm => "Ultrarapid Metabolizer",
            Phenotype::Unknown => "Unknown",
        }
    }

    /// Get all phenotypes, `Unknown` last
    pub fn all() -> &'static [Phenotype] {
        &[
            Phenotype::Pm,
            Phenotype::Im,
            Phenotype::Nm,
            Phenotype::Rm,
            Phenotype::Urm,
            Phenotype::Unknown,
        ]
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phenotype {
    type Err = std::convert::Infallible;

    /// Parse an abbreviation or long-form name; anything else is `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s_lower = s.trim().to_lowercase().replace(['-', '_'], " ");
        Ok(match s_lower.as_str() {
            "pm" | "poor metabolizer" => Phenotype::Pm,
            "im" | "intermediate metabolizer" => Phenotype::Im,
            "nm" | "em" | "normal metabolizer" | "extensive metabolizer" => Phenotype::Nm,
            "rm" | "rapid metabolizer" => Phenotype::Rm,
            "urm" | "um" | "ultrarapid metabolizer" | "ultra rapid metabolizer" => Phenotype::Urm,
            _ => Phenotype::Unknown,
        })
    }
}

/// Classify a called diplotype for a gene.
pub fn classify(gene: Gene, diplotype: &Diplotype) -> Phenotype {
    if diplotype.is_unknown() {
        return Phenotype::Unknown;
    }
    classify_called(gene, &diplotype.to_string().to_uppercase())
}

/// Classify from a gene symbol and diplotype string.
///
/// Unsupported genes and the `Unknown` diplotype yield [`Phenotype::Unknown`].
pub fn classify_str(gene: &str, diplotype: &str) -> Phenotype {
    match Gene::parse(gene) {
        Some(gene) => classify(gene, &Diplotype::parse(diplotype)),
        None => Phenotype::Unknown,
    }
}

fn classify_called(gene: Gene, d: &str) -> Phenotype {
    use tables::*;

    match gene {
        Gene::Cyp2d6 => {
            if both_alleles(d, CYP2D6_LOSS) {
                Phenotype::Pm
            } else if with_reference(d, CYP2D6_LOSS) || contains_any(d, CYP2D6_DECREASED) {
                Phenotype::Im
            } else if d.contains(DUPLICATION_MARKER) {
                Phenotype::Urm
            } else {
                Phenotype::Nm
            }
        }
        Gene::Cyp2c19 => {
            if both_alleles(d, CYP2C19_LOSS) {
                Phenotype::Pm
            } else if with_reference(d, CYP2C19_LOSS) {
                Phenotype::Im
            } else if with_reference(d, CYP2C19_INCREASED) {
                Phenotype::Rm
            } else {
                Phenotype::Nm
            }
        }
        Gene::Cyp2c9 => loss_only(d, CYP2C9_LOSS),
        Gene::Tpmt => loss_only(d, TPMT_LOSS),
        Gene::Slco1b1 => {
            if contains_any(d, SLCO1B1_DECREASED) {
                Phenotype::Im
            } else {
                Phenotype::Nm
            }
        }
        Gene::Dpyd => {
            let hits = count_matches(d, DPYD_REDUCED) + count_matches(d, DPYD_CRITICAL_RSIDS);
            match hits {
                0 => Phenotype::Nm,
                1 => Phenotype::Im,
                _ => Phenotype::Pm,
            }
        }
    }
}

/// Genes whose only rule is loss-of-function zygosity
fn loss_only(d: &str, loss: &[&str]) -> Phenotype {
    if both_alleles(d, loss) {
        Phenotype::Pm
    } else if with_reference(d, loss) {
        Phenotype::Im
    } else {
        Phenotype::Nm
    }
}

/// Each side of the diplotype contains a token from `table`
fn both_alleles(d: &str, table: &[&str]) -> bool {
    match d.split_once('/') {
        Some((first, second)) => contains_any(first, table) && contains_any(second, table),
        None => false,
    }
}

/// A token from `table` occurs alongside the reference allele `*1`
fn with_reference(d: &str, table: &[&str]) -> bool {
    contains_any(d, table) && d.contains(REFERENCE_ALLELE)
}
