//! Drug risk assessment
//!
//! Maps a (drug, gene, phenotype) triple to a [`RiskAssessment`]. Each
//! supported drug is paired with exactly one primary gene; any other gene
//! falls through to the insufficient-evidence assessment. On the primary
//! gene an `Unknown` phenotype takes the drug's standard-dosing rule.
//!
//! # Example
//!
//! ```
//! use ferro_pgx::risk::{assess, RiskLabel, Severity};
//! use ferro_pgx::{Drug, Gene, Phenotype};
//!
//! let risk = assess(Drug::Warfarin, Gene::Cyp2c9, Phenotype::Nm);
//! assert_eq!(risk.risk_label, RiskLabel::Safe);
//! assert_eq!(risk.severity, Severity::None);
//! assert_eq!(risk.confidence_score, 0.76);
//! ```

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::drug::Drug;
use crate::gene::Gene;
use crate::phenotype::Phenotype;

/// Action given when no rule covers the request
pub const INSUFFICIENT_EVIDENCE: &str = "Insufficient evidence for gene-drug pair";

/// Confidence given when no rule covers the request
pub const BASELINE_CONFIDENCE: f64 = 0.6;

/// Risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Safe,
    #[serde(rename = "Adjust Dosage")]
    AdjustDosage,
    Toxic,
    Ineffective,
    Unknown,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Safe => "Safe",
            RiskLabel::AdjustDosage => "Adjust Dosage",
            RiskLabel::Toxic => "Toxic",
            RiskLabel::Ineffective => "Ineffective",
            RiskLabel::Unknown => "Unknown",
        }
    }

    /// Check if the label calls for a change from standard therapy
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            RiskLabel::AdjustDosage | RiskLabel::Toxic | RiskLabel::Ineffective
        )
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a risk, ordered from `None` to `Critical`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Severity::None),
            "low" => Ok(Severity::Low),
            "moderate" => Ok(Severity::Moderate),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Result of a risk lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_label: RiskLabel,
    /// In `[0, 1]`, rounded to two decimals
    pub confidence_score: f64,
    pub severity: Severity,
    /// Guideline citation, empty when no rule applied
    pub cpic_reference: String,
    pub recommended_action: String,
    /// Empty when no adjustment is recommended
    pub dose_adjustment: String,
}

impl RiskAssessment {
    /// The assessment returned when no rule covers the request
    pub fn insufficient_evidence() -> Self {
        Self {
            risk_label: RiskLabel::Unknown,
            confidence_score: BASELINE_CONFIDENCE,
            severity: Severity::None,
            cpic_reference: String::new(),
            recommended_action: INSUFFICIENT_EVIDENCE.to_string(),
            dose_adjustment: String::new(),
        }
    }

    fn from_rule(drug: Drug, rule: rules::Rule) -> Self {
        Self {
            risk_label: rule.label,
            confidence_score: round2(rule.confidence),
            severity: rule.severity,
            cpic_reference: rules::guideline(drug).to_string(),
            recommended_action: rule.action.to_string(),
            dose_adjustment: rule.dose.to_string(),
        }
    }

    /// Check whether a rule applied
    pub fn is_known(&self) -> bool {
        self.risk_label != RiskLabel::Unknown
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Assess the risk of `drug` for a patient with `phenotype` in `gene`.
pub fn assess(drug: Drug, gene: Gene, phenotype: Phenotype) -> RiskAssessment {
    if gene != drug.primary_gene() {
        return RiskAssessment::insufficient_evidence();
    }
    RiskAssessment::from_rule(drug, rules::lookup(drug, phenotype))
}

/// Assess from strings.
///
/// Names are matched case-insensitively. An unsupported drug or gene yields
/// the insufficient-evidence assessment.
pub fn assess_str(drug: &str, gene: &str, phenotype: &str) -> RiskAssessment {
    let phenotype = phenotype.parse::<Phenotype>().unwrap_or(Phenotype::Unknown);
    match (Drug::parse(drug), Gene::parse(gene)) {
        (Some(drug), Some(gene)) => assess(drug, gene, phenotype),
        _ => RiskAssessment::insufficient_evidence(),
    }
}
