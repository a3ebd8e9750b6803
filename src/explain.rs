//! Plain-language explanations of a drug analysis
//!
//! [`TemplateExplainer`] fills fixed sentences from the analysis fields.
//! Free-text generation by a hosted language model stays outside this crate;
//! it plugs in through [`TextGenerator`], and [`GeneratedExplainer`] falls
//! back to the template whenever the generator has nothing to say.

use serde::{Deserialize, Serialize};

use crate::analysis::DrugAnalysis;

/// Three-part explanation attached to each report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub mechanism: String,
    pub clinical_significance: String,
}

/// Produces an [`Explanation`] for one drug analysis
pub trait Explainer {
    fn explain(&self, analysis: &DrugAnalysis) -> Explanation;
}

/// Fixed-sentence explainer
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExplainer;

impl TemplateExplainer {
    pub fn new() -> Self {
        Self
    }
}

/// Lower-cased, comma-joined rsIDs, or `N/A`
fn rsid_text(analysis: &DrugAnalysis) -> String {
    let rsids: Vec<String> = analysis.rsids().map(|r| r.to_lowercase()).collect();
    if rsids.is_empty() {
        "N/A".to_string()
    } else {
        rsids.join(", ")
    }
}

impl Explainer for TemplateExplainer {
    fn explain(&self, analysis: &DrugAnalysis) -> Explanation {
        let drug = analysis.drug.title();
        let gene = analysis.gene;
        let rs_text = rsid_text(analysis);
        let risk = &analysis.assessment;
        let dose = if risk.dose_adjustment.is_empty() {
            "None"
        } else {
            risk.dose_adjustment.as_str()
        };

        Explanation {
            summary: format!(
                "For {}, the patient's {} phenotype is {}. \
                 Based on detected variants ({}), the assessed risk is '{}'.",
                drug, gene, analysis.phenotype, rs_text, risk.risk_label
            ),
            mechanism: format!(
                "{} influences {} pharmacokinetics/pharmacodynamics. \
                 Variants like {} can alter enzyme or transporter activity, \
                 leading to changes in drug metabolism or exposure.",
                gene, drug, rs_text
            ),
            clinical_significance: format!(
                "Following CPIC guidance ({}), the recommended action is: {}. \
                 Dose adjustment: {}.",
                risk.cpic_reference, risk.recommended_action, dose
            ),
        }
    }
}

/// A free-text generator such as a hosted language model.
///
/// Implementations return an empty string on any failure.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> String;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> String,
{
    fn generate(&self, prompt: &str) -> String {
        self(prompt)
    }
}

/// Uses a [`TextGenerator`] for the summary, keeping the template for the rest
pub struct GeneratedExplainer<G> {
    generator: G,
    fallback: TemplateExplainer,
}

impl<G: TextGenerator> GeneratedExplainer<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            fallback: TemplateExplainer,
        }
    }

    /// Prompt sent to the generator
    pub fn prompt(analysis: &DrugAnalysis) -> String {
        format!(
            "Drug: {} | Risk: {} | Phenotype: {} | Gene: {} | Diplotype: {} | Variants: {}",
            analysis.drug,
            analysis.assessment.risk_label,
            analysis.phenotype,
            analysis.gene,
            analysis.diplotype,
            rsid_text(analysis)
        )
    }
}

impl<G: TextGenerator> Explainer for GeneratedExplainer<G> {
    fn explain(&self, analysis: &DrugAnalysis) -> Explanation {
        let mut explanation = self.fallback.explain(analysis);
        let generated = self.generator.generate(&Self::prompt(analysis));
        let generated = generated.trim();
        if generated.is_empty() {
            log::debug!("Text generator returned nothing for {}", analysis.drug);
        } else {
            explanation.summary = generated.to_string();
        }
        explanation
    }
}
