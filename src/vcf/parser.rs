//! Tolerant VCF text parsing
//!
//! The parser reads only the eight fixed VCF columns and the `GENE`,
//! `STAR` and `RS` INFO tags. It never rejects a file for a bad line:
//! headers, blank lines and truncated data lines are skipped, and records
//! for genes outside the supported panel are dropped. The one hard failure
//! is the byte-size ceiling, checked before any line is looked at.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::FerroError;
use crate::gene::Gene;

use super::record::{normalize_star, InfoValue, VariantRecord};

/// Default ceiling on VCF content size, in bytes of UTF-8.
pub const DEFAULT_MAX_VCF_BYTES: usize = 5_000_000;

/// Number of fixed columns a data line must have (CHROM through INFO).
const FIXED_COLUMNS: usize = 8;

/// Parse VCF content into gene-tagged records.
///
/// Fails only when `content` is longer than `max_bytes`.
///
/// # Examples
///
/// ```
/// use ferro_pgx::vcf::parse_vcf;
/// use ferro_pgx::Gene;
///
/// let vcf = "chr22\t42130692\trs3892097\tG\tA\t.\tPASS\tGENE=CYP2D6;STAR=4\n";
/// let records = parse_vcf(vcf, 5_000_000).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].gene, Gene::Cyp2d6);
/// assert_eq!(records[0].stars, vec!["*4"]);
/// ```
pub fn parse_vcf(content: &str, max_bytes: usize) -> Result<Vec<VariantRecord>, FerroError> {
    check_size(content.len(), max_bytes)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for line in content.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_vcf_line(line) {
            LineOutcome::Record(record) => records.push(*record),
            LineOutcome::Malformed => skipped += 1,
            LineOutcome::Unsupported => {}
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {} malformed VCF line(s)", skipped);
    }
    log::debug!("Parsed {} pharmacogene record(s)", records.len());
    Ok(records)
}

/// Parse VCF content with the default 5 MB ceiling.
pub fn parse_vcf_default(content: &str) -> Result<Vec<VariantRecord>, FerroError> {
    parse_vcf(content, DEFAULT_MAX_VCF_BYTES)
}

/// Result of looking at a single data line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// A record for a supported gene
    Record(Box<VariantRecord>),
    /// Fewer than eight tab-separated fields
    Malformed,
    /// Well-formed, but no supported `GENE` annotation
    Unsupported,
}

impl LineOutcome {
    /// Take the record, if any
    pub fn into_record(self) -> Option<VariantRecord> {
        match self {
            LineOutcome::Record(record) => Some(*record),
            _ => None,
        }
    }
}

/// Parse one VCF data line.
///
/// The caller is responsible for skipping header and blank lines.
pub fn parse_vcf_line(line: &str) -> LineOutcome {
    let fields: Vec<&str> = line.trim().split('\t').collect();
    if fields.len() < FIXED_COLUMNS {
        return LineOutcome::Malformed;
    }

    let info = parse_info(fields[7]);

    let gene = match info.get("GENE").and_then(InfoValue::as_str).and_then(Gene::parse) {
        Some(gene) => gene,
        None => return LineOutcome::Unsupported,
    };

    let stars = info
        .get("STAR")
        .and_then(InfoValue::as_str)
        .map(parse_star_list)
        .unwrap_or_default();

    let id = fields[2];
    let rsid = info
        .get("RS")
        .and_then(InfoValue::as_str)
        .filter(|rs| !rs.is_empty())
        .map(str::to_string)
        .or_else(|| is_rsid(id).then(|| id.to_string()));

    LineOutcome::Record(Box::new(VariantRecord {
        chromosome: fields[0].to_string(),
        position: fields[1].to_string(),
        id: id.to_string(),
        reference: fields[3].to_string(),
        alternate: fields[4].to_string(),
        info,
        gene,
        stars,
        rsid,
    }))
}

/// Split an INFO column into upper-cased keys and values.
///
/// Each `;`-separated segment is split on its first `=`; a segment with no
/// `=` is a flag. Later duplicates replace earlier ones.
pub fn parse_info(info: &str) -> HashMap<String, InfoValue> {
    info.split(';')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (key.to_uppercase(), InfoValue::String(value.to_string())),
            None => (segment.to_uppercase(), InfoValue::Flag),
        })
        .collect()
}

/// Split a `STAR` tag value into `*`-prefixed tokens, dropping empty pieces.
pub fn parse_star_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(normalize_star)
        .collect()
}

fn is_rsid(id: &str) -> bool {
    id.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("rs"))
}

fn check_size(size: usize, limit: usize) -> Result<(), FerroError> {
    if size > limit {
        return Err(FerroError::SizeLimit { size, limit });
    }
    Ok(())
}

/// Read VCF text from a reader, enforcing the size ceiling.
///
/// At most `max_bytes + 1` bytes are pulled from the reader, so an
/// oversized stream is rejected without being read to the end.
pub fn read_vcf_text<R: Read>(reader: R, max_bytes: usize) -> Result<String, FerroError> {
    let mut buf = Vec::new();
    reader
        .take((max_bytes as u64).saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| FerroError::Io {
            msg: format!("Failed to read VCF: {}", e),
        })?;
    check_size(buf.len(), max_bytes)?;
    Ok(String::from_utf8(buf)?)
}

/// Read a VCF file (plain or gzip/BGZF compressed) into text.
///
/// The ceiling applies to the decompressed content.
pub fn open_vcf<P: AsRef<Path>>(path: P, max_bytes: usize) -> Result<String, FerroError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FerroError::Io {
        msg: format!("Failed to open VCF file {}: {}", path.display(), e),
    })?;

    let is_gzip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("bgz"));
    if is_gzip {
        read_vcf_text(MultiGzDecoder::new(BufReader::new(file)), max_bytes)
    } else {
        read_vcf_text(BufReader::new(file), max_bytes)
    }
}
