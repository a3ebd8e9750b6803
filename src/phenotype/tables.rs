//! Allele-function tables
//!
//! Simplified, CPIC-inspired function assignments. Tokens are matched by
//! substring against an upper-cased diplotype, so a short token also hits
//! longer allele names that start with it (`*3` would match `*3A`).

use crate::gene::Gene;

/// CYP2D6 no-function alleles
pub const CYP2D6_LOSS: &[&str] = &["*3", "*4", "*5", "*6"];
/// CYP2D6 decreased-function alleles
pub const CYP2D6_DECREASED: &[&str] = &["*17", "*41"];

/// CYP2C19 no-function alleles
pub const CYP2C19_LOSS: &[&str] = &["*2", "*3", "*4"];
/// CYP2C19 increased-function alleles
pub const CYP2C19_INCREASED: &[&str] = &["*17"];

/// CYP2C9 no-function alleles
pub const CYP2C9_LOSS: &[&str] = &["*2", "*3"];

/// TPMT no-function alleles
pub const TPMT_LOSS: &[&str] = &["*2", "*3A", "*3B", "*3C"];

/// DPYD reduced-function alleles
pub const DPYD_REDUCED: &[&str] = &["*2A", "*13"];
/// DPYD critical variants, by upper-cased rsID
pub const DPYD_CRITICAL_RSIDS: &[&str] = &["RS3918290", "RS55886062"];

/// SLCO1B1 decreased-function markers (star allele or rsID)
pub const SLCO1B1_DECREASED: &[&str] = &["*5", "RS4149056"];

/// Functional class of an allele token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlleleFunction {
    /// No function
    Loss,
    /// Decreased function
    Decreased,
    /// Increased function
    Increased,
}

/// Get the tokens of a given function class for a gene.
///
/// DPYD reduced-function alleles and critical rsIDs are both reported as
/// [`AlleleFunction::Decreased`].
pub fn alleles_for(gene: Gene, function: AlleleFunction) -> Vec<&'static str> {
    match (gene, function) {
        (Gene::Cyp2d6, AlleleFunction::Loss) => CYP2D6_LOSS.to_vec(),
        (Gene::Cyp2d6, AlleleFunction::Decreased) => CYP2D6_DECREASED.to_vec(),
        (Gene::Cyp2c19, AlleleFunction::Loss) => CYP2C19_LOSS.to_vec(),
        (Gene::Cyp2c19, AlleleFunction::Increased) => CYP2C19_INCREASED.to_vec(),
        (Gene::Cyp2c9, AlleleFunction::Loss) => CYP2C9_LOSS.to_vec(),
        (Gene::Tpmt, AlleleFunction::Loss) => TPMT_LOSS.to_vec(),
        (Gene::Dpyd, AlleleFunction::Decreased) => [DPYD_REDUCED, DPYD_CRITICAL_RSIDS].concat(),
        (Gene::Slco1b1, AlleleFunction::Decreased) => SLCO1B1_DECREASED.to_vec(),
        _ => Vec::new(),
    }
}

/// Check whether `haystack` contains any token of `table`.
pub(crate) fn contains_any(haystack: &str, table: &[&str]) -> bool {
    table.iter().any(|token| haystack.contains(token))
}

/// Count how many distinct tokens of `table` occur in `haystack`.
pub(crate) fn count_matches(haystack: &str, table: &[&str]) -> usize {
    table.iter().filter(|token| haystack.contains(*token)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_uppercase() {
        for gene in Gene::all() {
            for function in [
                AlleleFunction::Loss,
                AlleleFunction::Decreased,
                AlleleFunction::Increased,
            ] {
                for token in alleles_for(*gene, function) {
                    assert_eq!(token, token.to_uppercase());
                }
            }
        }
    }

    #[test]
    fn test_alleles_for() {
        assert_eq!(
            alleles_for(Gene::Cyp2d6, AlleleFunction::Loss),
            vec!["*3", "*4", "*5", "*6"]
        );
        assert_eq!(
            alleles_for(Gene::Dpyd, AlleleFunction::Decreased),
            vec!["*2A", "*13", "RS3918290", "RS55886062"]
        );
        assert!(alleles_for(Gene::Tpmt, AlleleFunction::Increased).is_empty());
    }

    #[test]
    fn test_substring_collision_is_kept() {
        // "*3" is a prefix of "*3A", so it matches
        assert!(contains_any("*3A/*1", &["*3"]));
        assert_eq!(count_matches("*2A/*13", DPYD_REDUCED), 2);
    }
}
