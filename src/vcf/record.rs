//! Pharmacogenomic VCF record representation
//!
//! A [`VariantRecord`] is one VCF data line that carries a supported
//! `GENE` annotation. Columns are kept as opaque strings; only the INFO
//! tags needed for star-allele calling are interpreted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::gene::Gene;

/// A single gene-tagged VCF record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Chromosome name, as written in the file
    pub chromosome: String,

    /// Position column, as written in the file
    pub position: String,

    /// ID column, as written in the file (may be ".")
    pub id: String,

    /// Reference allele column
    pub reference: String,

    /// Alternate allele column
    pub alternate: String,

    /// INFO field key-value pairs, keys upper-cased
    #[serde(default)]
    pub info: HashMap<String, InfoValue>,

    /// Gene the record is annotated against
    pub gene: Gene,

    /// Star-allele tokens from the STAR tag, each prefixed with `*`
    #[serde(default)]
    pub stars: Vec<String>,

    /// Reference SNP identifier, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsid: Option<String>,
}

/// INFO field value
///
/// Serialized as the string value, or as `true` for a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawInfoValue", into = "RawInfoValue")]
pub enum InfoValue {
    /// Flag (key present without a value)
    Flag,
    /// String value
    String(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawInfoValue {
    Flag(bool),
    String(String),
}

impl From<RawInfoValue> for InfoValue {
    fn from(raw: RawInfoValue) -> Self {
        match raw {
            RawInfoValue::Flag(_) => InfoValue::Flag,
            RawInfoValue::String(s) => InfoValue::String(s),
        }
    }
}

impl From<InfoValue> for RawInfoValue {
    fn from(value: InfoValue) -> Self {
        match value {
            InfoValue::Flag => RawInfoValue::Flag(true),
            InfoValue::String(s) => RawInfoValue::String(s),
        }
    }
}

impl InfoValue {
    /// Get the string value, or None for a flag
    pub fn as_str(&self) -> Option<&str> {
        match self {
            InfoValue::Flag => None,
            InfoValue::String(s) => Some(s),
        }
    }

    /// Check if this is a flag
    pub fn is_flag(&self) -> bool {
        matches!(self, InfoValue::Flag)
    }
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoValue::Flag => Ok(()),
            InfoValue::String(v) => write!(f, "{}", v),
        }
    }
}

impl VariantRecord {
    /// Create a new record for a gene with minimal required fields
    pub fn new(
        chromosome: &str,
        position: &str,
        reference: &str,
        alternate: &str,
        gene: Gene,
    ) -> Self {
        Self {
            chromosome: chromosome.to_string(),
            position: position.to_string(),
            id: ".".to_string(),
            reference: reference.to_string(),
            alternate: alternate.to_string(),
            info: HashMap::new(),
            gene,
            stars: Vec::new(),
            rsid: None,
        }
    }

    /// Set the ID column
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Add an INFO field (key is upper-cased)
    pub fn with_info(mut self, key: &str, value: InfoValue) -> Self {
        self.info.insert(key.to_uppercase(), value);
        self
    }

    /// Set the star-allele tokens
    pub fn with_stars<S: AsRef<str>>(mut self, stars: &[S]) -> Self {
        self.stars = stars.iter().map(|s| normalize_star(s.as_ref())).collect();
        self
    }

    /// Set the rsID
    pub fn with_rsid(mut self, rsid: &str) -> Self {
        self.rsid = Some(rsid.to_string());
        self
    }

    /// Get an INFO field value as a string (None for absent keys and flags)
    pub fn get_info_str(&self, key: &str) -> Option<&str> {
        self.info.get(&key.to_uppercase()).and_then(|v| v.as_str())
    }

    /// Check whether the record carries any star-allele annotation
    pub fn has_stars(&self) -> bool {
        !self.stars.is_empty()
    }
}

/// Prefix a star-allele token with `*` unless it already has one.
pub(crate) fn normalize_star(token: &str) -> String {
    if token.starts_with('*') {
        token.to_string()
    } else {
        format!("*{}", token)
    }
}

impl fmt::Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.chromosome, self.position, self.id, self.reference, self.alternate,
        )?;

        if self.info.is_empty() {
            return write!(f, "\t.");
        }

        let mut keys: Vec<&String> = self.info.keys().collect();
        keys.sort();
        let info_str: Vec<String> = keys
            .into_iter()
            .map(|k| match &self.info[k] {
                InfoValue::Flag => k.clone(),
                v => format!("{}={}", k, v),
            })
            .collect();
        write!(f, "\t{}", info_str.join(";"))
    }
}
