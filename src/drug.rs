//! Supported drugs and their primary pharmacogene.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FerroError;
use crate::gene::Gene;

/// A drug with a CPIC-style gene association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Drug {
    Codeine,
    Warfarin,
    Clopidogrel,
    Simvastatin,
    Azathioprine,
    Fluorouracil,
}

impl Drug {
    /// Get the normalized upper-case name (e.g., "CODEINE")
    pub fn as_str(&self) -> &'static str {
        match self {
            Drug::Codeine => "CODEINE",
            Drug::Warfarin => "WARFARIN",
            Drug::Clopidogrel => "CLOPIDOGREL",
            Drug::Simvastatin => "SIMVASTATIN",
            Drug::Azathioprine => "AZATHIOPRINE",
            Drug::Fluorouracil => "FLUOROURACIL",
        }
    }

    /// Get the name in title case (e.g., "Codeine"), as used in prose
    pub fn title(&self) -> &'static str {
        match self {
            Drug::Codeine => "Codeine",
            Drug::Warfarin => "Warfarin",
            Drug::Clopidogrel => "Clopidogrel",
            Drug::Simvastatin => "Simvastatin",
            Drug::Azathioprine => "Azathioprine",
            Drug::Fluorouracil => "Fluorouracil",
        }
    }

    /// Parse a drug name (case-insensitive, surrounding whitespace ignored)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "CODEINE" => Some(Drug::Codeine),
            "WARFARIN" => Some(Drug::Warfarin),
            "CLOPIDOGREL" => Some(Drug::Clopidogrel),
            "SIMVASTATIN" => Some(Drug::Simvastatin),
            "AZATHIOPRINE" => Some(Drug::Azathioprine),
            "FLUOROURACIL" => Some(Drug::Fluorouracil),
            _ => None,
        }
    }

    /// The gene whose phenotype drives the recommendation for this drug
    pub fn primary_gene(&self) -> Gene {
        match self {
            Drug::Codeine => Gene::Cyp2d6,
            Drug::Warfarin => Gene::Cyp2c9,
            Drug::Clopidogrel => Gene::Cyp2c19,
            Drug::Simvastatin => Gene::Slco1b1,
            Drug::Azathioprine => Gene::Tpmt,
            Drug::Fluorouracil => Gene::Dpyd,
        }
    }

    /// Get all supported drugs
    pub fn all() -> &'static [Drug] {
        &[
            Drug::Codeine,
            Drug::Warfarin,
            Drug::Clopidogrel,
            Drug::Simvastatin,
            Drug::Azathioprine,
            Drug::Fluorouracil,
        ]
    }
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a drug name is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedDrug(pub String);

impl fmt::Display for UnsupportedDrug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported drug: {}", self.0)
    }
}

impl std::error::Error for UnsupportedDrug {}

impl FromStr for Drug {
    type Err = UnsupportedDrug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Drug::parse(s).ok_or_else(|| UnsupportedDrug(s.to_string()))
    }
}

/// Normalize a set of requested drug names, keeping only supported drugs.
///
/// Unknown names and repeats are dropped; first-seen order is kept.
/// Returns [`FerroError::NoSupportedDrugs`] when nothing survives.
///
/// # Examples
///
/// ```
/// use ferro_pgx::drug::{normalize_drugs, Drug};
///
/// let drugs = normalize_drugs(["warfarin", "aspirin", "WARFARIN", "Codeine"]).unwrap();
/// assert_eq!(drugs, vec![Drug::Warfarin, Drug::Codeine]);
/// ```
pub fn normalize_drugs<I, S>(names: I) -> Result<Vec<Drug>, FerroError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    let mut drugs = Vec::new();
    for name in names {
        let name = name.as_ref();
        seen.push(name.trim().to_string());
        match Drug::parse(name) {
            Some(drug) if !drugs.contains(&drug) => drugs.push(drug),
            Some(_) => {}
            None => {
                if !name.trim().is_empty() {
                    log::debug!("Ignoring unsupported drug '{}'", name.trim());
                }
            }
        }
    }

    if drugs.is_empty() {
        return Err(FerroError::NoSupportedDrugs {
            input: seen.join(","),
        });
    }
    Ok(drugs)
}

/// Parse a comma-separated drug list such as `"codeine, Warfarin"`.
pub fn parse_drug_list(list: &str) -> Result<Vec<Drug>, FerroError> {
    normalize_drugs(list.split(','))
}
