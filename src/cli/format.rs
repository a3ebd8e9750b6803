//! Output formatting utilities for CLI operations

use serde::Serialize;
use std::io::{self, Write};
use std::str::FromStr;

use crate::drug::Drug;
use crate::error::FerroError;
use crate::gene::Gene;
use crate::phenotype::Phenotype;
use crate::report::AnalysisResponse;
use crate::risk::{rules, RiskAssessment};

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_pgx::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert!(matches!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json));
    /// assert!(matches!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

/// Write an analysis response
///
/// Text output is one block per drug followed by the run summary.
pub fn output_response<W: Write>(
    writer: &mut W,
    response: &AnalysisResponse,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(writer, response);
    }

    writeln!(writer, "Patient: {}", response.summary.patient_id)?;
    for report in &response.reports {
        let profile = &report.pharmacogenomic_profile;
        let risk = &report.risk_assessment;
        let rec = &report.clinical_recommendation;
        writeln!(writer)?;
        writeln!(
            writer,
            "{} ({} {}, {})",
            report.drug, profile.primary_gene, profile.diplotype, profile.phenotype
        )?;
        writeln!(
            writer,
            "  Risk:       {} (severity {}, confidence {:.2})",
            risk.risk_label, risk.severity, risk.confidence_score
        )?;
        writeln!(writer, "  Action:     {}", rec.recommended_action)?;
        writeln!(writer, "  Dose:       {}", or_dash(&rec.dose_adjustment))?;
        writeln!(writer, "  Guideline:  {}", or_dash(&rec.cpic_guideline_reference))?;
        if report.quality_metrics.missing_annotations {
            writeln!(writer, "  WARNING: missing star-allele or rsID annotations")?;
        }
    }

    let totals = &response.summary.totals;
    let genes: Vec<&str> = totals.genes_covered.iter().map(|g| g.as_str()).collect();
    writeln!(writer)?;
    writeln!(writer, "Variants:   {}", totals.total_variants)?;
    writeln!(writer, "Genes:      {}", or_dash(&genes.join(", ")))?;
    writeln!(writer, "rsIDs:      {}", or_dash(&totals.rsids_detected.join(", ")))
}

#[derive(Serialize)]
struct Classification<'a> {
    gene: &'a str,
    diplotype: &'a str,
    phenotype: Phenotype,
}

/// Write a phenotype classification
///
/// # Examples
///
/// ```
/// use ferro_pgx::cli::{output_classification, OutputFormat};
/// use ferro_pgx::Phenotype;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// output_classification(&mut buffer, "CYP2D6", "*4/*4", Phenotype::Pm, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert_eq!(result, "CYP2D6 *4/*4 -> PM (Poor Metabolizer)\n");
/// ```
pub fn output_classification<W: Write>(
    writer: &mut W,
    gene: &str,
    diplotype: &str,
    phenotype: Phenotype,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(
            writer,
            &Classification {
                gene,
                diplotype,
                phenotype,
            },
        ),
        OutputFormat::Text => writeln!(
            writer,
            "{} {} -> {} ({})",
            gene,
            diplotype,
            phenotype,
            phenotype.description()
        ),
    }
}

/// Write a risk assessment
pub fn output_risk<W: Write>(
    writer: &mut W,
    assessment: &RiskAssessment,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(writer, assessment),
        OutputFormat::Text => {
            writeln!(
                writer,
                "{} (severity {}, confidence {:.2})",
                assessment.risk_label, assessment.severity, assessment.confidence_score
            )?;
            writeln!(writer, "Action:     {}", assessment.recommended_action)?;
            writeln!(writer, "Dose:       {}", or_dash(&assessment.dose_adjustment))?;
            writeln!(writer, "Guideline:  {}", or_dash(&assessment.cpic_reference))
        }
    }
}

#[derive(Serialize)]
struct CatalogEntry {
    drug: Drug,
    gene: Gene,
    guideline: &'static str,
}

/// Write the supported drug-gene pairings
pub fn output_catalog<W: Write>(writer: &mut W, format: OutputFormat) -> io::Result<()> {
    let entries: Vec<CatalogEntry> = Drug::all()
        .iter()
        .map(|drug| CatalogEntry {
            drug: *drug,
            gene: drug.primary_gene(),
            guideline: rules::guideline(*drug),
        })
        .collect();

    match format {
        OutputFormat::Json => write_json(writer, &entries),
        OutputFormat::Text => {
            for entry in &entries {
                writeln!(
                    writer,
                    "{:<14}{:<10}{}",
                    entry.drug.as_str(),
                    entry.gene.as_str(),
                    entry.guideline
                )?;
            }
            Ok(())
        }
    }
}

/// Write an error to the output
///
/// # Examples
///
/// ```
/// use ferro_pgx::cli::{output_error, OutputFormat};
/// use ferro_pgx::FerroError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let error = FerroError::NoSupportedDrugs { input: "aspirin".to_string() };
/// output_error(&mut buffer, "input.vcf", &error, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.contains("ERROR: input.vcf"));
/// assert!(result.contains("[E2001]"));
/// ```
pub fn output_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &FerroError,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "input": input,
                "error": error.to_string(),
                "code": error.code().as_str(),
                "status": "error",
            });
            serde_json::to_writer(&mut *writer, &value)?;
            writeln!(writer)
        }
        OutputFormat::Text => writeln!(writer, "ERROR: {} - {}", input, error.detailed_message()),
    }
}
