//! Parallel processing support for ferro-pgx
//!
//! Per-drug evaluation and batch analysis of many VCFs on the rayon pool.
//! Results keep input order and equal their sequential counterparts.
//! Enable with the `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_pgx::analysis::Analyzer;
//! use ferro_pgx::parallel::analyze_batch_parallel;
//! use ferro_pgx::Drug;
//!
//! let vcfs = vec![
//!     "chr22\t1\trs1\tC\tT\t.\tPASS\tGENE=CYP2D6;STAR=4\n",
//!     "chr10\t1\trs2\tG\tA\t.\tPASS\tGENE=CYP2C19;STAR=17\n",
//! ];
//!
//! let analyzer = Analyzer::new();
//! let results = analyze_batch_parallel(&analyzer, &vcfs, &[Drug::Codeine, Drug::Clopidogrel]);
//! assert_eq!(results.len(), 2);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::analysis::{analyze_drug, Analysis, Analyzer, DrugAnalysis};
use crate::drug::Drug;
use crate::error::FerroError;
use crate::vcf::VariantRecord;

/// Evaluate every drug against the same records in parallel
///
/// Order follows `drugs`.
pub fn analyze_drugs_parallel(records: &[VariantRecord], drugs: &[Drug]) -> Vec<DrugAnalysis> {
    drugs
        .par_iter()
        .map(|drug| analyze_drug(records, *drug))
        .collect()
}

/// Analyze multiple VCF texts in parallel
///
/// Returns a vector of results, one for each input.
/// Order is preserved.
pub fn analyze_batch_parallel<S: AsRef<str> + Sync>(
    analyzer: &Analyzer,
    vcfs: &[S],
    drugs: &[Drug],
) -> Vec<Result<Analysis, FerroError>> {
    vcfs.par_iter()
        .map(|text| analyzer.analyze(text.as_ref(), drugs))
        .collect()
}

/// Analyze multiple VCF texts in parallel, filtering errors
///
/// Returns only the inputs that passed the size check.
pub fn analyze_batch_parallel_ok<S: AsRef<str> + Sync>(
    analyzer: &Analyzer,
    vcfs: &[S],
    drugs: &[Drug],
) -> Vec<Analysis> {
    vcfs.par_iter()
        .filter_map(|text| analyzer.analyze(text.as_ref(), drugs).ok())
        .collect()
}

/// Configuration for parallel batch processing
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
    /// Number of threads (0 = use rayon default)
    pub num_threads: usize,
}

impl ParallelConfig {
    /// Create a new parallel configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of threads
    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }

    /// Run a batch on a dedicated pool sized by this configuration
    pub fn run_batch<S: AsRef<str> + Sync>(
        &self,
        analyzer: &Analyzer,
        vcfs: &[S],
        drugs: &[Drug],
    ) -> Result<(Vec<Result<Analysis, FerroError>>, ParallelStats), FerroError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_threads)
            .build()
            .map_err(|e| FerroError::Config {
                msg: format!("failed to build thread pool: {}", e),
            })?;
        let results = pool.install(|| analyze_batch_parallel(analyzer, vcfs, drugs));
        let stats = ParallelStats::from_results(&results);
        Ok((results, stats))
    }
}

/// Statistics from parallel processing
#[derive(Debug, Clone, Default)]
pub struct ParallelStats {
    /// Total items processed
    pub total: usize,
    /// Successfully processed
    pub success: usize,
    /// Failed to process
    pub errors: usize,
}

impl ParallelStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a batch of results
    pub fn from_results<T>(results: &[Result<T, FerroError>]) -> Self {
        let success = results.iter().filter(|r| r.is_ok()).count();
        Self {
            total: results.len(),
            success,
            errors: results.len() - success,
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisOptions;
    use crate::vcf::parse_vcf_default;

    fn panel(i: usize) -> String {
        format!(
            "chr22\t{}\trs{}\tC\tT\t.\tPASS\tGENE=CYP2D6;STAR=4\n\
             chr10\t{}\trs{}\tG\tA\t.\tPASS\tGENE=CYP2C19;STAR=17\n",
            i,
            i,
            i + 1,
            i + 1
        )
    }

    #[test]
    fn test_drugs_parallel_matches_sequential() {
        let records = parse_vcf_default(&panel(1)).unwrap();
        let parallel = analyze_drugs_parallel(&records, Drug::all());
        let sequential: Vec<DrugAnalysis> = Drug::all()
            .iter()
            .map(|d| analyze_drug(&records, *d))
            .collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_batch_parallel() {
        let vcfs: Vec<String> = (1..=100).map(panel).collect();
        let analyzer = Analyzer::new();
        let results = analyze_batch_parallel(&analyzer, &vcfs, &[Drug::Codeine]);
        assert_eq!(results.len(), 100);
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_batch_order_preserved() {
        let vcfs: Vec<String> = (1..=50).map(|i| panel(i * 10)).collect();
        let analyzer = Analyzer::new();
        let results = analyze_batch_parallel(&analyzer, &vcfs, &[Drug::Codeine]);

        for (i, result) in results.iter().enumerate() {
            let analysis = result.as_ref().unwrap();
            let rsid = format!("rs{}", (i + 1) * 10);
            assert_eq!(analysis.summary.rsids_detected[0], rsid);
        }
    }

    #[test]
    fn test_batch_with_oversized_inputs() {
        let small = panel(1);
        let large = "#".repeat(200);
        let vcfs = vec![small.as_str(), large.as_str(), small.as_str()];
        let analyzer = Analyzer::with_options(AnalysisOptions::new().with_max_bytes(150));

        let results = analyze_batch_parallel(&analyzer, &vcfs, &[Drug::Clopidogrel]);
        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());

        let ok = analyze_batch_parallel_ok(&analyzer, &vcfs, &[Drug::Clopidogrel]);
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn test_run_batch_with_config() {
        let vcfs: Vec<String> = (1..=10).map(panel).collect();
        let config = ParallelConfig::new().with_num_threads(2);
        let (results, stats) = config
            .run_batch(&Analyzer::new(), &vcfs, &[Drug::Codeine])
            .unwrap();
        assert_eq!(results.len(), 10);
        assert_eq!(stats.total, 10);
        assert_eq!(stats.errors, 0);
        assert!((stats.success_rate() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_batch() {
        let vcfs: Vec<&str> = vec![];
        let results = analyze_batch_parallel(&Analyzer::new(), &vcfs, &[Drug::Codeine]);
        assert!(results.is_empty());
        assert_eq!(ParallelStats::from_results(&results).success_rate(), 0.0);
    }

    #[test]
    fn test_parallel_stats() {
        let stats = ParallelStats {
            total: 100,
            success: 95,
            errors: 5,
        };
        assert!((stats.success_rate() - 95.0).abs() < 0.01);
        assert_eq!(ParallelStats::new().total, 0);
    }
}
