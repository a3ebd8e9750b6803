//! Fuzz target for the VCF parser and the full pipeline
//!
//! This target feeds arbitrary byte strings to the parser to find crashes,
//! panics, or memory issues.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Neither stage may panic on any input
        let _ = ferro_pgx::vcf::parse_vcf(input, 64 * 1024);
        let _ = ferro_pgx::analyze(input, ferro_pgx::Drug::all());
    }
});
