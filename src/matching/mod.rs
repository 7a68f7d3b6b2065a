//! Classification and scoring of calls against baseline sites.
//!
//! - [`Comparer`]: drives one forward pass over the baseline and all calls sources
//! - [`classify`]: buckets the best call(s) of a source at one site
//! - [`ScoringTable`]: maps a bucket to a score under the chosen modes
//! - [`CompareMetrics`]: per-source and per-site accuracy counters
//!
//! ## Classification
//!
//! At each baseline site, each source contributes the call(s) in the window
//! with the highest read count:
//!
//! 1. **No call**: nothing overlaps the site
//! 2. **Exact**: the called name equals the element name (case-insensitive)
//! 3. **Family**: the called name contains, or is contained in, the element
//!    name or one of the family names
//! 4. **Fail**: anything else
//!
//! Ties are resolved exact first, then family.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use retro_compare::core::chromosome::ChromosomeOrder;
//! use retro_compare::matching::{CompareConfig, Comparer};
//!
//! let comparer = Comparer::new(CompareConfig::default(), ChromosomeOrder::lexicographic());
//! let mut out = Vec::new();
//! let metrics = comparer
//!     .compare_paths(
//!         Path::new("baseline.tsv"),
//!         &[PathBuf::from("sample.vcf")],
//!         &mut out,
//!     )
//!     .unwrap();
//!
//! println!("{} sites, {} exact", metrics.total_sites, metrics.sources[0].perfect);
//! ```
//!
//! [`classify`]: classify::classify

pub mod classify;
pub mod engine;
pub mod metrics;
pub mod scoring;

pub use engine::{CompareConfig, CompareError, Comparer};
pub use metrics::{CompareMetrics, SourceMetrics};
pub use scoring::ScoringTable;
