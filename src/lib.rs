//! # retro-compare
//!
//! A library for scoring RetroSeq transposable element calls against a
//! baseline of known insertions.
//!
//! Each baseline site is a genomic interval with the expected element name and
//! up to two family names. Each calls file is scanned once, in step with the
//! baseline, and the strongest call overlapping each site is graded as an
//! exact, family or failed match. Grades become scores through a fixed table
//! selected by classification mode, value mode and tie policy.
//!
//! ## Features
//!
//! - **Single pass**: baseline and calls files are streamed, never loaded whole
//! - **Many sources**: any number of calls files are scored side by side
//! - **Configurable scoring**: 4 classification modes, 3 value modes, 3 tie policies
//! - **Chromosome order**: from a `.fai`, a `.dict` or a plain list of names
//! - **Compressed input**: gzip and bgzip files are read transparently
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use std::sync::Arc;
//!
//! use retro_compare::{ChromosomeOrder, CompareConfig, Comparer, OrderedCallsReader};
//!
//! let comparer = Comparer::new(CompareConfig::default(), ChromosomeOrder::new(["chr1", "chr2"]));
//!
//! let baseline = "chr1\t100\t200\tTE1\tfamA\tfamB\n";
//! let calls = "chr1\t150\t.\tN\t<INS:ME>\t5\tPASS\tMEINFO=TE1,1,2,+\tGT\t1/1\n";
//! let source = OrderedCallsReader::new("sample", Cursor::new(calls), comparer.order());
//!
//! let mut out = Vec::new();
//! let metrics = comparer.compare(Cursor::new(baseline), vec![source], &mut out).unwrap();
//! assert_eq!(metrics.sources[0].perfect, 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Baseline and call records, chromosome order, scoring options
//! - [`parsing`]: Readers for baseline, calls and chromosome list files
//! - [`matching`]: Classification, scoring tables and the comparison driver
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Input validation helpers

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::chromosome::ChromosomeOrder;
pub use core::record::{BaselineRecord, CallRecord};
pub use core::types::*;
pub use matching::engine::{CompareConfig, CompareError, Comparer};
pub use matching::metrics::CompareMetrics;
pub use matching::scoring::ScoringTable;
pub use parsing::calls::OrderedCallsReader;
