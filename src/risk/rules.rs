//! Static drug-phenotype rule table
//!
//! One arm per (drug, phenotype). Confidence values are fixed guideline
//! strength ratings, not computed statistics.

use crate::drug::Drug;
use crate::phenotype::Phenotype;

use super::{RiskLabel, Severity};

/// Outcome of one rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    /// Risk classification
    pub label: RiskLabel,
    /// Severity of the risk
    pub severity: Severity,
    /// Recommended clinical action
    pub action: &'static str,
    /// Dose adjustment, empty if none
    pub dose: &'static str,
    /// Fixed confidence score
    pub confidence: f64,
}

const fn rule(
    label: RiskLabel,
    severity: Severity,
    action: &'static str,
    dose: &'static str,
    confidence: f64,
) -> Rule {
    Rule {
        label,
        severity,
        action,
        dose,
        confidence,
    }
}

const STANDARD_DOSING: &str = "Standard dosing";

/// Guideline citation for a drug's primary gene pairing
pub fn guideline(drug: Drug) -> &'static str {
    match drug {
        Drug::Codeine => "CPIC Guideline for Codeine and CYP2D6",
        Drug::Warfarin => "CPIC Guideline for Warfarin and CYP2C9",
        Drug::Clopidogrel => "CPIC Guideline for Clopidogrel and CYP2C19",
        Drug::Simvastatin => "CPIC Guideline for Simvastatin and SLCO1B1",
        Drug::Azathioprine => "CPIC Guideline for Thiopurines and TPMT",
        Drug::Fluorouracil => "CPIC Guideline for Fluoropyrimidines and DPYD",
    }
}

/// Look up the rule for a drug and phenotype.
///
/// Total over both enums. Phenotypes without a dedicated arm, including
/// [`Phenotype::Unknown`], take the drug's standard-dosing rule.
pub fn lookup(drug: Drug, phenotype: Phenotype) -> Rule {
    use Phenotype::{Im, Pm, Rm, Urm};
    use RiskLabel::{AdjustDosage, Ineffective, Safe, Toxic};

    match (drug, phenotype) {
        (Drug::Codeine, Pm) => rule(
            Ineffective,
            Severity::Moderate,
            "Avoid codeine; use alternative analgesic",
            "",
            0.92,
        ),
        (Drug::Codeine, Rm | Urm) => rule(
            Toxic,
            Severity::High,
            "Avoid codeine due to risk of toxicity",
            "",
            0.92,
        ),
        (Drug::Codeine, Im) => rule(
            AdjustDosage,
            Severity::Low,
            "Consider alternative or monitor closely",
            "Consider lower dose",
            0.82,
        ),
        (Drug::Codeine, _) => rule(Safe, Severity::None, STANDARD_DOSING, "", 0.72),

        (Drug::Warfarin, Pm) => rule(
            Toxic,
            Severity::High,
            "Reduce initial dose and monitor INR closely",
            "Lower dose",
            0.86,
        ),
        (Drug::Warfarin, Im) => rule(
            AdjustDosage,
            Severity::Moderate,
            "Use lower initial dose; frequent INR monitoring",
            "Lower dose",
            0.82,
        ),
        (Drug::Warfarin, _) => rule(
            Safe,
            Severity::None,
            "Standard dosing with INR monitoring",
            "",
            0.76,
        ),

        (Drug::Clopidogrel, Pm) => rule(
            Ineffective,
            Severity::High,
            "Use alternative antiplatelet (e.g., prasugrel, ticagrelor)",
            "",
            0.91,
        ),
        (Drug::Clopidogrel, Im) => rule(
            AdjustDosage,
            Severity::Moderate,
            "Consider alternative therapy or enhanced platelet inhibition",
            "",
            0.86,
        ),
        (Drug::Clopidogrel, _) => rule(Safe, Severity::None, STANDARD_DOSING, "", 0.76),

        (Drug::Simvastatin, Pm | Im) => rule(
            Toxic,
            Severity::Moderate,
            "Consider lower dose or alternative statin due to myopathy risk",
            "Lower dose or switch",
            0.82,
        ),
        (Drug::Simvastatin, _) => rule(Safe, Severity::None, STANDARD_DOSING, "", 0.76),

        (Drug::Azathioprine, Pm) => rule(
            Toxic,
            Severity::Critical,
            "Use drastically reduced dose or alternative; monitor for myelosuppression",
            "Reduce dose by 90% or avoid",
            0.92,
        ),
        (Drug::Azathioprine, Im) => rule(
            AdjustDosage,
            Severity::High,
            "Use reduced dose and monitor",
            "Reduce dose 30-70%",
            0.87,
        ),
        (Drug::Azathioprine, _) => rule(Safe, Severity::None, STANDARD_DOSING, "", 0.76),

        (Drug::Fluorouracil, Pm) => rule(
            Toxic,
            Severity::Critical,
            "Avoid or use greatly reduced dose; consider alternative",
            "Avoid or reduce >50%",
            0.92,
        ),
        (Drug::Fluorouracil, Im) => rule(
            AdjustDosage,
            Severity::High,
            "Use reduced dose with close monitoring",
            "Reduce 25-50%",
            0.87,
        ),
        (Drug::Fluorouracil, _) => rule(Safe, Severity::None, STANDARD_DOSING, "", 0.76),
    }
}
