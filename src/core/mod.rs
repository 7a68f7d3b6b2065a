//! Core data types for comparing TE calls against a baseline.
//!
//! - [`BaselineRecord`]: a known TE insertion, columns kept verbatim
//! - [`CallRecord`]: one call from a RetroSeq calls file
//! - [`WindowBuffer`]: calls overlapping the active query window
//! - [`ChromosomeOrder`]: the order in which inputs are sorted
//! - [`ClassificationMode`], [`ValueMode`], [`TiePolicy`]: scoring options
//! - [`MatchClass`]: outcome of comparing one site against one calls source
//!
//! ## Sort Order
//!
//! Both the baseline and every calls file must be sorted by chromosome, then
//! position. Chromosomes compare by their position in a supplied list; those
//! not in the list follow, in lexicographic order.
//!
//! [`BaselineRecord`]: record::BaselineRecord
//! [`CallRecord`]: record::CallRecord
//! [`WindowBuffer`]: window::WindowBuffer
//! [`ChromosomeOrder`]: chromosome::ChromosomeOrder
//! [`ClassificationMode`]: types::ClassificationMode
//! [`ValueMode`]: types::ValueMode
//! [`TiePolicy`]: types::TiePolicy
//! [`MatchClass`]: types::MatchClass

pub mod chromosome;
pub mod record;
pub mod types;
pub mod window;
