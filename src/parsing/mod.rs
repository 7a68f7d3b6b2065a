//! Readers for the comparison inputs.
//!
//! This module provides parsers for:
//!
//! - **Baseline files**: tab-separated known TE insertions
//! - **RetroSeq calls files**: VCF lines streamed through a forward-only window
//! - **Chromosome order lists**: `.fai`, `.dict` or a plain list of names
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use retro_compare::parsing::calls::OrderedCallsReader;
//! use retro_compare::parsing::chromosomes::load_chromosome_order;
//!
//! let order = Arc::new(load_chromosome_order(Path::new("genome.fa.fai")).unwrap());
//! let mut calls = OrderedCallsReader::from_path(Path::new("sample.vcf"), order).unwrap();
//!
//! calls.advance_to_window("chr1", 10_000, 10_350).unwrap();
//! for call in calls.best_calls() {
//!     println!("{} ({} reads)", call.called_name, call.support_count);
//! }
//! ```

pub mod baseline;
pub mod calls;
pub mod chromosomes;
pub mod input;
