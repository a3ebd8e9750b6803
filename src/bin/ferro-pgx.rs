// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-pgx CLI
//!
//! Command-line interface for pharmacogenomic risk reports from
//! star-allele annotated VCF files.

use clap::{Parser, Subcommand};
use ferro_pgx::analysis::Analyzer;
use ferro_pgx::cli::{
    output_catalog, output_classification, output_error, output_response, output_risk,
    read_input, OutputFormat,
};
use ferro_pgx::config::PgxConfig;
use ferro_pgx::drug::parse_drug_list;
use ferro_pgx::phenotype::classify_str;
use ferro_pgx::report::ReportBuilder;
use ferro_pgx::risk::assess_str;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "ferro-pgx")]
#[command(author, version, about = "Pharmacogenomic risk reports from annotated VCF files")]
#[command(
    long_about = "Call diplotypes and phenotypes from star-allele annotated VCF files and
report drug risk for CODEINE, WARFARIN, CLOPIDOGREL, SIMVASTATIN, AZATHIOPRINE
and FLUOROURACIL.

Examples:
  ferro-pgx analyze -i patient.vcf --drugs codeine,warfarin
  ferro-pgx analyze -i patient.vcf.gz --drugs clopidogrel -f json -o report.json
  ferro-pgx classify --gene CYP2D6 --diplotype '*4/*1'
  ferro-pgx risk --drug codeine --gene CYP2D6 --phenotype PM
  ferro-pgx list"
)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug); RUST_LOG also applies
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a VCF file for one or more drugs
    Analyze {
        /// Input VCF file, plain or gzip (use - for stdin)
        #[arg(short, long)]
        input: String,

        /// Comma-separated drug names
        #[arg(short, long)]
        drugs: String,

        /// Patient identifier (generated when omitted)
        #[arg(long)]
        patient_id: Option<String>,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum VCF size in bytes
        #[arg(long)]
        max_bytes: Option<usize>,

        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Evaluate drugs sequentially
        #[arg(long)]
        no_parallel: bool,
    },

    /// Classify a diplotype into a metabolizer phenotype
    Classify {
        /// Gene symbol (e.g., CYP2D6)
        #[arg(long)]
        gene: String,

        /// Diplotype (e.g., *1/*4)
        #[arg(long)]
        diplotype: String,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Look up the risk for a drug, gene and phenotype
    Risk {
        /// Drug name
        #[arg(long)]
        drug: String,

        /// Gene symbol
        #[arg(long)]
        gene: String,

        /// Phenotype (PM, IM, NM, RM, URM)
        #[arg(long)]
        phenotype: String,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List supported drugs, genes and guidelines
    List {
        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            input,
            drugs,
            patient_id,
            format,
            output,
            max_bytes,
            config,
            no_parallel,
        } => run_analyze(
            &input,
            &drugs,
            patient_id.as_deref(),
            &format,
            output.as_ref(),
            max_bytes,
            config.as_ref(),
            no_parallel,
        ),
        Commands::Classify {
            gene,
            diplotype,
            format,
        } => run_classify(&gene, &diplotype, &format),
        Commands::Risk {
            drug,
            gene,
            phenotype,
            format,
        } => run_risk(&drug, &gene, &phenotype, &format),
        Commands::List { format } => run_list(&format),
    }
}

fn parse_format(format: &str) -> OutputFormat {
    // Infallible
    OutputFormat::from_str(format).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    input: &str,
    drugs: &str,
    patient_id: Option<&str>,
    format: &str,
    output: Option<&PathBuf>,
    max_bytes: Option<usize>,
    config: Option<&PathBuf>,
    no_parallel: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = parse_format(format);
    let config = PgxConfig::resolve(config.map(|p| p.as_path()))?;
    let options = config.merge_with_cli(max_bytes, no_parallel);

    let result = parse_drug_list(drugs).and_then(|drugs| {
        let text = read_input(input, io::stdin().lock(), options.max_bytes)?;
        Analyzer::with_options(options).analyze(&text, &drugs)
    });
    let analysis = match result {
        Ok(analysis) => analysis,
        Err(e) => {
            output_error(&mut io::stderr(), input, &e, format)?;
            std::process::exit(1);
        }
    };

    let mut builder =
        ReportBuilder::new().with_patient_id_prefix(config.report.patient_id_prefix.as_str());
    if let Some(id) = patient_id {
        builder = builder.with_patient_id(id);
    }
    let response = builder.build(&analysis);

    let mut writer: Box<dyn Write> = match output {
        Some(path) if path.to_string_lossy() != "-" => {
            Box::new(BufWriter::new(std::fs::File::create(path)?))
        }
        _ => Box::new(BufWriter::new(io::stdout())),
    };
    output_response(&mut writer, &response, format)?;
    writer.flush()?;
    Ok(())
}

fn run_classify(
    gene: &str,
    diplotype: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let phenotype = classify_str(gene, diplotype);
    output_classification(
        &mut io::stdout(),
        gene,
        diplotype,
        phenotype,
        parse_format(format),
    )?;
    Ok(())
}

fn run_risk(
    drug: &str,
    gene: &str,
    phenotype: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let assessment = assess_str(drug, gene, phenotype);
    output_risk(&mut io::stdout(), &assessment, parse_format(format))?;
    Ok(())
}

fn run_list(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    output_catalog(&mut io::stdout(), parse_format(format))?;
    Ok(())
}
