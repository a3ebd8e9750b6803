//! Diplotype calling from star-allele annotations
//!
//! The caller does not phase anything. It pools the star alleles seen on
//! all of a gene's records and picks two of them:
//!
//! - no alleles: `Unknown`
//! - a duplication allele (`XN`) is always placed first
//! - two or more distinct alleles: the first two, in first-seen order
//! - one distinct allele seen once: paired with the reference `*1`
//! - one distinct allele seen more than once: homozygous

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vcf::VariantRecord;

/// The reference (wild-type) star allele
pub const REFERENCE_ALLELE: &str = "*1";

/// Marker carried by copy-number duplication alleles (e.g. `*2xN`)
pub const DUPLICATION_MARKER: &str = "XN";

/// A called diplotype
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Diplotype {
    /// No star alleles were observed for the gene
    Unknown,
    /// Two alleles, one per chromosome copy
    Called {
        /// First allele (the duplication allele when one is present)
        first: String,
        /// Second allele
        second: String,
    },
}

impl Diplotype {
    /// Create a called diplotype
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Diplotype::Called {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Check if no call could be made
    pub fn is_unknown(&self) -> bool {
        matches!(self, Diplotype::Unknown)
    }

    /// Get the two alleles, or None when unknown
    pub fn alleles(&self) -> Option<(&str, &str)> {
        match self {
            Diplotype::Unknown => None,
            Diplotype::Called { first, second } => Some((first, second)),
        }
    }

    /// Check if either allele carries the duplication marker
    pub fn has_duplication(&self) -> bool {
        self.alleles().is_some_and(|(a, b)| {
            a.to_uppercase().contains(DUPLICATION_MARKER)
                || b.to_uppercase().contains(DUPLICATION_MARKER)
        })
    }

    /// Parse a diplotype string such as `*1/*4` or `Unknown`.
    ///
    /// A string without `/` is read as a single allele paired with `*1`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("unknown") {
            return Diplotype::Unknown;
        }
        match s.split_once('/') {
            Some((first, second)) => Diplotype::new(first.trim(), second.trim()),
            None => Diplotype::new(s, REFERENCE_ALLELE),
        }
    }
}

impl fmt::Display for Diplotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diplotype::Unknown => write!(f, "Unknown"),
            Diplotype::Called { first, second } => write!(f, "{}/{}", first, second),
        }
    }
}

impl From<Diplotype> for String {
    fn from(d: Diplotype) -> Self {
        d.to_string()
    }
}

impl From<String> for Diplotype {
    fn from(s: String) -> Self {
        Diplotype::parse(&s)
    }
}

/// Call a diplotype from the records of a single gene.
///
/// # Examples
///
/// ```
/// use ferro_pgx::diplotype::call_diplotype;
/// use ferro_pgx::vcf::VariantRecord;
/// use ferro_pgx::Gene;
///
/// let records = vec![
///     VariantRecord::new("chr10", "1", "G", "A", Gene::Cyp2c19).with_stars(&["2"]),
///     VariantRecord::new("chr10", "2", "C", "T", Gene::Cyp2c19).with_stars(&["17"]),
/// ];
/// assert_eq!(call_diplotype(&records).to_string(), "*2/*17");
/// ```
pub fn call_diplotype(records: &[VariantRecord]) -> Diplotype {
    call_from_stars(records.iter().flat_map(|r| r.stars.iter()))
}

/// Call a diplotype from a sequence of star-allele tokens.
pub fn call_from_stars<I, S>(stars: I) -> Diplotype
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut unique: Vec<String> = Vec::new();
    let mut repeated: Vec<bool> = Vec::new();
    for star in stars {
        let star = star.as_ref().to_uppercase();
        match unique.iter().position(|u| *u == star) {
            Some(idx) => repeated[idx] = true,
            None => {
                unique.push(star);
                repeated.push(false);
            }
        }
    }

    if unique.is_empty() {
        return Diplotype::Unknown;
    }

    if let Some(dup) = unique.iter().position(|u| u.contains(DUPLICATION_MARKER)) {
        let token = unique.remove(dup);
        unique.insert(0, token);
        let flag = repeated.remove(dup);
        repeated.insert(0, flag);
    }

    match unique.len() {
        1 if repeated[0] => Diplotype::new(unique[0].clone(), unique[0].clone()),
        1 => Diplotype::new(unique[0].clone(), REFERENCE_ALLELE),
        _ => Diplotype::new(unique[0].clone(), unique[1].clone()),
    }
}
