//! CLI utilities for ferro-pgx
//!
//! This module provides testable functions used by the CLI binary.
//! By extracting pure functions and I/O-abstracted functions to the library,
//! we enable comprehensive unit testing without requiring end-to-end CLI tests.

pub mod format;

pub use format::{
    output_catalog, output_classification, output_error, output_response, output_risk,
    OutputFormat,
};

use std::io::Read;

use crate::error::FerroError;
use crate::vcf::{open_vcf, read_vcf_text};

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Input path meaning standard input
pub const STDIN_PATH: &str = "-";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// This is common when files are exported from Windows applications or Excel.
///
/// # Examples
///
/// ```
/// use ferro_pgx::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}##fileformat=VCFv4.2"), "##fileformat=VCFv4.2");
/// assert_eq!(strip_bom("##fileformat=VCFv4.2"), "##fileformat=VCFv4.2");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Read VCF text from a path, or from `reader` when the path is `-`.
///
/// Gzip input is decoded; a leading BOM is removed.
pub fn read_input<R: Read>(
    path: &str,
    reader: R,
    max_bytes: usize,
) -> Result<String, FerroError> {
    let text = if path == STDIN_PATH {
        read_vcf_text(reader, max_bytes)?
    } else {
        open_vcf(path, max_bytes)?
    };
    match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}test"), "test");
        assert_eq!(strip_bom("test"), "test");
        assert_eq!(strip_bom("\u{feff}"), "");
        assert_eq!(strip_bom(""), "");
    }

    #[test]
    fn test_read_input_stdin() {
        let reader = Cursor::new("\u{feff}#header\n".as_bytes().to_vec());
        let text = read_input(STDIN_PATH, reader, 1000).unwrap();
        assert_eq!(text, "#header\n");
    }

    #[test]
    fn test_read_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "chr22\t1\t.\tA\tG\t.\tPASS\tGENE=CYP2D6").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let text = read_input(&path, std::io::empty(), 1000).unwrap();
        assert!(text.starts_with("chr22"));
    }

    #[test]
    fn test_read_input_too_large() {
        let reader = Cursor::new(vec![b'#'; 64]);
        let err = read_input(STDIN_PATH, reader, 32).unwrap_err();
        assert!(matches!(err, FerroError::SizeLimit { .. }));
    }
}
