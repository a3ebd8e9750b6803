//! Report documents for downstream consumers
//!
//! One [`PharmacogenomicReport`] per requested drug, wrapped in an
//! [`AnalysisResponse`] together with a run summary. All reports from one
//! run share the patient id and timestamp.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::{Analysis, AnalysisSummary, DrugAnalysis};
use crate::diplotype::Diplotype;
use crate::drug::Drug;
use crate::explain::{Explainer, Explanation, TemplateExplainer};
use crate::gene::Gene;
use crate::phenotype::Phenotype;
use crate::risk::{RiskLabel, Severity};

/// Prefix of generated patient ids
pub const DEFAULT_PATIENT_ID_PREFIX: &str = "PATIENT_";

/// Generate a patient id: `prefix` followed by 8 upper-case hex characters.
pub fn generate_patient_id<R: Rng + ?Sized>(rng: &mut R, prefix: &str) -> String {
    format!("{}{:08X}", prefix, rng.gen::<u32>())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRisk {
    pub risk_label: RiskLabel,
    pub confidence_score: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedVariant {
    /// Empty when the record has no rsID
    pub rsid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacogenomicProfile {
    pub primary_gene: Gene,
    pub diplotype: Diplotype,
    pub phenotype: Phenotype,
    /// One entry per gene record; a single empty entry when there are none
    pub detected_variants: Vec<DetectedVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalRecommendation {
    pub cpic_guideline_reference: String,
    pub recommended_action: String,
    pub dose_adjustment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    pub missing_annotations: bool,
    pub analysis_timestamp: String,
}

/// Report for one drug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacogenomicReport {
    pub patient_id: String,
    pub drug: Drug,
    /// RFC 3339, UTC
    pub timestamp: String,
    pub risk_assessment: ReportRisk,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    pub clinical_recommendation: ClinicalRecommendation,
    pub llm_generated_explanation: Explanation,
    pub quality_metrics: QualityMetrics,
}

/// Run summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub patient_id: String,
    #[serde(flatten)]
    pub totals: AnalysisSummary,
}

/// Reports for every requested drug plus the run summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub reports: Vec<PharmacogenomicReport>,
    pub summary: ReportSummary,
}

/// Builds an [`AnalysisResponse`] from an [`Analysis`]
#[derive(Debug, Clone)]
pub struct ReportBuilder<E = TemplateExplainer> {
    patient_id: Option<String>,
    patient_id_prefix: String,
    timestamp: Option<DateTime<Utc>>,
    explainer: E,
}

impl Default for ReportBuilder<TemplateExplainer> {
    fn default() -> Self {
        Self {
            patient_id: None,
            patient_id_prefix: DEFAULT_PATIENT_ID_PREFIX.to_string(),
            timestamp: None,
            explainer: TemplateExplainer,
        }
    }
}

impl ReportBuilder<TemplateExplainer> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Explainer> ReportBuilder<E> {
    /// Use a fixed patient id instead of generating one
    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        let patient_id = patient_id.into();
        self.patient_id = (!patient_id.trim().is_empty()).then_some(patient_id);
        self
    }

    /// Prefix for generated patient ids
    pub fn with_patient_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.patient_id_prefix = prefix.into();
        self
    }

    /// Use a fixed timestamp instead of the current time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_explainer<F: Explainer>(self, explainer: F) -> ReportBuilder<F> {
        ReportBuilder {
            patient_id: self.patient_id,
            patient_id_prefix: self.patient_id_prefix,
            timestamp: self.timestamp,
            explainer,
        }
    }

    /// Assemble the response
    pub fn build(&self, analysis: &Analysis) -> AnalysisResponse {
        let patient_id = match &self.patient_id {
            Some(id) => id.clone(),
            None => generate_patient_id(&mut rand::thread_rng(), &self.patient_id_prefix),
        };
        let timestamp = self
            .timestamp
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Micros, false);

        let reports = analysis
            .drugs
            .iter()
            .map(|d| self.build_report(d, &patient_id, &timestamp))
            .collect();

        AnalysisResponse {
            reports,
            summary: ReportSummary {
                patient_id,
                totals: analysis.summary.clone(),
            },
        }
    }

    fn build_report(
        &self,
        analysis: &DrugAnalysis,
        patient_id: &str,
        timestamp: &str,
    ) -> PharmacogenomicReport {
        let risk = &analysis.assessment;

        let mut detected_variants: Vec<DetectedVariant> = analysis
            .variants
            .iter()
            .map(|v| DetectedVariant {
                rsid: v.rsid.clone().unwrap_or_default(),
            })
            .collect();
        if detected_variants.is_empty() {
            detected_variants.push(DetectedVariant::default());
        }

        PharmacogenomicReport {
            patient_id: patient_id.to_string(),
            drug: analysis.drug,
            timestamp: timestamp.to_string(),
            risk_assessment: ReportRisk {
                risk_label: risk.risk_label,
                confidence_score: risk.confidence_score,
                severity: risk.severity,
            },
            pharmacogenomic_profile: PharmacogenomicProfile {
                primary_gene: analysis.gene,
                diplotype: analysis.diplotype.clone(),
                phenotype: analysis.phenotype,
                detected_variants,
            },
            clinical_recommendation: ClinicalRecommendation {
                cpic_guideline_reference: risk.cpic_reference.clone(),
                recommended_action: risk.recommended_action.clone(),
                dose_adjustment: risk.dose_adjustment.clone(),
            },
            llm_generated_explanation: self.explainer.explain(analysis),
            quality_metrics: QualityMetrics {
                vcf_parsing_success: true,
                missing_annotations: analysis.missing_annotations,
                analysis_timestamp: timestamp.to_string(),
            },
        }
    }
}
