//! VCF (Variant Call Format) support
//!
//! This module turns star-allele annotated VCF text into gene-tagged
//! [`VariantRecord`]s for the supported pharmacogenes.

mod parser;
mod record;

pub use parser::{
    open_vcf, parse_info, parse_star_list, parse_vcf, parse_vcf_default, parse_vcf_line,
    read_vcf_text, LineOutcome, DEFAULT_MAX_VCF_BYTES,
};
pub use record::{InfoValue, VariantRecord};
