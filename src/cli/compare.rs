use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use tempfile::NamedTempFile;

use crate::cli::OutputFormat;
use crate::core::types::{ClassificationMode, TiePolicy, ValueMode};
use crate::matching::engine::{CompareConfig, Comparer};
use crate::matching::metrics::CompareMetrics;
use crate::parsing::chromosomes::load_chromosome_order;
use crate::utils::validation::{discover_calls_files, validate_input_file};

#[derive(Args)]
pub struct CompareArgs {
    /// Sorted baseline of known TE insertions (tab-separated, optionally gzipped)
    #[arg(required = true)]
    pub baseline: PathBuf,

    /// RetroSeq calls files, or directories of .vcf/.vcf.gz/.vcf.bgz files
    #[arg(required = true, num_args = 1..)]
    pub calls: Vec<PathBuf>,

    /// Scored output table
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Chromosome order the inputs are sorted in (.fai, .dict, or one name per line)
    #[arg(short, long, required = true)]
    pub chromosomes: PathBuf,

    /// Which outcomes are rewarded or penalised
    #[arg(long, value_enum, default_value = "pass-family-skip-fail")]
    pub classification: ClassificationMode,

    /// Score values: signed flags, read counts, or non-negative flags
    #[arg(long, value_enum, default_value = "flags")]
    pub value: ValueMode,

    /// How calls tied on read support are scored
    #[arg(long, value_enum, default_value = "full")]
    pub tiebreaker: TiePolicy,

    /// First non-comment line of the baseline holds column names
    #[arg(long)]
    pub baseline_header: bool,
}

impl CompareArgs {
    fn config(&self) -> CompareConfig {
        CompareConfig {
            classification: self.classification,
            value_mode: self.value,
            tie_policy: self.tiebreaker,
            baseline_has_header: self.baseline_header,
        }
    }
}

pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    validate_input_file(&args.baseline)?;
    let calls = discover_calls_files(&args.calls)?;

    let order = load_chromosome_order(&args.chromosomes).map_err(|e| {
        anyhow::anyhow!(
            "Unable to load chromosome order {}: {e}",
            args.chromosomes.display()
        )
    })?;

    if verbose {
        eprintln!("Baseline: {}", args.baseline.display());
        eprintln!("Calls files: {}", calls.len());
        eprintln!("Chromosome order: {} names", order.len());
    }

    let comparer = Comparer::new(args.config(), order);

    // Write beside the destination so a failed run leaves nothing behind
    let mut temp = NamedTempFile::new_in(output_dir(&args.output)).map_err(|e| {
        anyhow::anyhow!(
            "Unable to create output in {}: {e}",
            output_dir(&args.output).display()
        )
    })?;

    let metrics = {
        let mut writer = BufWriter::new(&mut temp);
        let metrics = comparer.compare_paths(&args.baseline, &calls, &mut writer)?;
        writer.flush()?;
        metrics
    };

    temp.persist(&args.output)?;

    match format {
        OutputFormat::Text => print_text_metrics(&args, &comparer, &metrics),
        OutputFormat::Json => print_json_metrics(&args, &comparer, &metrics)?,
        OutputFormat::Tsv => print_tsv_metrics(&metrics),
    }

    Ok(())
}

fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn print_text_metrics(args: &CompareArgs, comparer: &Comparer, metrics: &CompareMetrics) {
    let config = comparer.config();

    println!("Comparison Results");
    println!("{}", "=".repeat(60));

    println!("\nOutput: {}", args.output.display());
    println!("  Classification: {}", config.classification);
    println!("  Value mode: {}", config.value_mode);
    println!("  Tiebreaker: {}", config.tie_policy);

    println!("\nMetrics:");
    println!("  Total TE sites: {}", metrics.total_sites);
    if metrics.skipped_rows > 0 {
        println!("  Skipped baseline rows: {}", metrics.skipped_rows);
    }
    println!("  Total calls files: {}", metrics.total_files());
    println!(
        "  Highest perfect matches per file: {}",
        metrics.highest_perfect_per_file()
    );
    println!(
        "  Average perfect matches per file: {:.2}",
        metrics.average_perfect_per_file()
    );
    println!(
        "  Highest partial+ matches per file: {}",
        metrics.highest_partial_per_file()
    );
    println!(
        "  Average partial+ matches per file: {:.2}",
        metrics.average_partial_per_file()
    );
    println!(
        "  Highest perfect matches per site: {}",
        metrics.site_max_perfect
    );
    println!(
        "  Average perfect matches per site: {:.2}",
        metrics.average_perfect_per_site()
    );
    println!(
        "  Highest partial+ matches per site: {}",
        metrics.site_max_partial
    );
    println!(
        "  Average partial+ matches per site: {:.2}",
        metrics.average_partial_per_site()
    );

    println!("\nCalls files:");
    for source in &metrics.sources {
        print!(
            "  {}: {} perfect, {} partial+ ({} calls read",
            source.name, source.perfect, source.partial_or_better, source.calls_read
        );
        if source.malformed_lines > 0 {
            print!(", {} malformed lines skipped", source.malformed_lines);
        }
        println!(")");
    }
}

fn print_json_metrics(
    args: &CompareArgs,
    comparer: &Comparer,
    metrics: &CompareMetrics,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "output": args.output.display().to_string(),
        "scoring": comparer.table(),
        "total_sites": metrics.total_sites,
        "skipped_rows": metrics.skipped_rows,
        "total_files": metrics.total_files(),
        "per_file": {
            "highest_perfect": metrics.highest_perfect_per_file(),
            "average_perfect": metrics.average_perfect_per_file(),
            "highest_partial": metrics.highest_partial_per_file(),
            "average_partial": metrics.average_partial_per_file(),
        },
        "per_site": {
            "highest_perfect": metrics.site_max_perfect,
            "average_perfect": metrics.average_perfect_per_site(),
            "highest_partial": metrics.site_max_partial,
            "average_partial": metrics.average_partial_per_site(),
        },
        "sources": metrics.sources,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_metrics(metrics: &CompareMetrics) {
    println!("source\tsites\tperfect\tpartial_or_better\tcalls_read\tmalformed_lines");
    for source in &metrics.sources {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            source.name,
            metrics.total_sites,
            source.perfect,
            source.partial_or_better,
            source.calls_read,
            source.malformed_lines,
        );
    }
}
