//! Supported pharmacogenes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six genes the pipeline knows how to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gene {
    #[serde(rename = "CYP2D6")]
    Cyp2d6,
    #[serde(rename = "CYP2C19")]
    Cyp2c19,
    #[serde(rename = "CYP2C9")]
    Cyp2c9,
    #[serde(rename = "SLCO1B1")]
    Slco1b1,
    #[serde(rename = "TPMT")]
    Tpmt,
    #[serde(rename = "DPYD")]
    Dpyd,
}

impl Gene {
    /// Get the HGNC symbol (e.g., "CYP2D6")
    pub fn as_str(&self) -> &'static str {
        match self {
            Gene::Cyp2d6 => "CYP2D6",
            Gene::Cyp2c19 => "CYP2C19",
            Gene::Cyp2c9 => "CYP2C9",
            Gene::Slco1b1 => "SLCO1B1",
            Gene::Tpmt => "TPMT",
            Gene::Dpyd => "DPYD",
        }
    }

    /// Parse a gene symbol (case-insensitive, surrounding whitespace ignored)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "CYP2D6" => Some(Gene::Cyp2d6),
            "CYP2C19" => Some(Gene::Cyp2c19),
            "CYP2C9" => Some(Gene::Cyp2c9),
            "SLCO1B1" => Some(Gene::Slco1b1),
            "TPMT" => Some(Gene::Tpmt),
            "DPYD" => Some(Gene::Dpyd),
            _ => None,
        }
    }

    /// Get all supported genes
    pub fn all() -> &'static [Gene] {
        &[
            Gene::Cyp2d6,
            Gene::Cyp2c19,
            Gene::Cyp2c9,
            Gene::Slco1b1,
            Gene::Tpmt,
            Gene::Dpyd,
        ]
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a gene symbol is not one of the supported genes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedGene(pub String);

impl fmt::Display for UnsupportedGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported gene: {}", self.0)
    }
}

impl std::error::Error for UnsupportedGene {}

impl FromStr for Gene {
    type Err = UnsupportedGene;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gene::parse(s).ok_or_else(|| UnsupportedGene(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Gene::parse("CYP2D6"), Some(Gene::Cyp2d6));
        assert_eq!(Gene::parse("cyp2c19"), Some(Gene::Cyp2c19));
        assert_eq!(Gene::parse(" tpmt "), Some(Gene::Tpmt));
        assert_eq!(Gene::parse("BRCA1"), None);
        assert_eq!(Gene::parse(""), None);
    }

    #[test]
    fn test_round_trip_symbols() {
        for gene in Gene::all() {
            assert_eq!(Gene::parse(gene.as_str()), Some(*gene));
            assert_eq!(gene.to_string(), gene.as_str());
        }
    }

    #[test]
    fn test_from_str_error() {
        let err = "CYP3A4".parse::<Gene>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported gene: CYP3A4");
    }

    #[test]
    fn test_serde_uses_symbol() {
        let json = serde_json::to_string(&Gene::Slco1b1).unwrap();
        assert_eq!(json, "\"SLCO1B1\"");
        let gene: Gene = serde_json::from_str("\"DPYD\"").unwrap();
        assert_eq!(gene, Gene::Dpyd);
    }
}
