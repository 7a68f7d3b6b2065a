//! Command-line interface for retro-compare.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **compare**: Score one or more RetroSeq calls files against a baseline
//! - **scores**: Show the scoring table for the chosen modes
//!
//! ## Usage
//!
//! ```text
//! # Score two samples against a baseline, using the reference index for order
//! retro-compare compare baseline.tsv N2_rep1.vcf N2_rep2.vcf.gz -o scored.tsv --chromosomes ce11.fa.fai
//!
//! # Score every VCF in a directory, weighting by read support
//! retro-compare compare baseline.tsv runs/ -o scored.tsv -c ce11.dict --value counts
//!
//! # Metrics as JSON for scripting
//! retro-compare compare baseline.tsv runs/ -o scored.tsv -c chromosomes.txt --format json
//!
//! # Which scores does pass/fail use?
//! retro-compare scores --classification pass-fail
//! ```

use clap::{Parser, Subcommand};

pub mod compare;
pub mod scores;

#[derive(Parser)]
#[command(name = "retro-compare")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Score RetroSeq TE calls against a baseline of known insertions")]
#[command(
    long_about = "retro-compare checks RetroSeq transposable element calls against a sorted baseline of known insertions.\n\nFor every baseline site it finds the best-supported call in each calls file and grades it:\n- Exact when the called element matches the baseline element\n- Family when the called name matches the element or one of its families\n- Fail or no call otherwise\n\nGrades are turned into scores under a selectable scoring scheme and written as one column per calls file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score calls files against a baseline
    Compare(compare::CompareArgs),

    /// Show the scoring table
    Scores(scores::ScoresArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
