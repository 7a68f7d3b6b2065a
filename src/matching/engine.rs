use std::cmp::Ordering;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::chromosome::ChromosomeOrder;
use crate::core::record::{BaselineRecord, BASELINE_COLUMN_NAMES, BASELINE_REQUIRED_COLUMNS};
use crate::core::types::{ClassificationMode, MatchClass, TiePolicy, ValueMode};
use crate::matching::classify::classify;
use crate::matching::metrics::CompareMetrics;
use crate::matching::scoring::ScoringTable;
use crate::parsing::baseline::{BaselineReader, BaselineRow};
use crate::parsing::calls::OrderedCallsReader;
use crate::parsing::input::{open_input, ParseError};

/// Sites between progress messages
const PROGRESS_INTERVAL: usize = 100_000;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for a comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareConfig {
    pub classification: ClassificationMode,
    pub value_mode: ValueMode,
    pub tie_policy: TiePolicy,
    /// First non-comment baseline line holds column names
    pub baseline_has_header: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            classification: ClassificationMode::PassFamilySkipFail,
            value_mode: ValueMode::Flags,
            tie_policy: TiePolicy::Full,
            baseline_has_header: false,
        }
    }
}

/// Scores calls sources against a baseline in a single forward pass
pub struct Comparer {
    config: CompareConfig,
    table: ScoringTable,
    order: Arc<ChromosomeOrder>,
}

impl Comparer {
    #[must_use]
    pub fn new(config: CompareConfig, order: ChromosomeOrder) -> Self {
        let table = ScoringTable::new(config.classification, config.value_mode, config.tie_policy);
        Self {
            config,
            table,
            order: Arc::new(order),
        }
    }

    #[must_use]
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Shared chromosome order, for building calls readers
    #[must_use]
    pub fn order(&self) -> Arc<ChromosomeOrder> {
        Arc::clone(&self.order)
    }

    /// Open the baseline and calls files and run the comparison.
    ///
    /// All inputs are opened before anything is written to `out`.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::Config` if no calls files are given or any input
    /// cannot be opened, plus any error from [`Comparer::compare`].
    pub fn compare_paths<W: Write>(
        &self,
        baseline: &Path,
        calls: &[PathBuf],
        out: &mut W,
    ) -> Result<CompareMetrics, CompareError> {
        if calls.is_empty() {
            return Err(CompareError::Config("No calls files given".to_string()));
        }

        let baseline_source = open_input(baseline).map_err(|e| {
            CompareError::Config(format!(
                "Unable to open baseline {}: {e}",
                baseline.display()
            ))
        })?;

        let sources = calls
            .iter()
            .map(|path| {
                OrderedCallsReader::from_path(path, self.order()).map_err(|e| {
                    CompareError::Config(format!(
                        "Unable to open calls file {}: {e}",
                        path.display()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.compare(baseline_source, sources, out)
    }

    /// Score every baseline site against every calls source.
    ///
    /// Writes a header row and then one row per baseline site: the baseline
    /// columns followed by one score per source, in source order.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::Config` if there are no sources or the first
    /// baseline row is unusable (nothing is written in that case), and
    /// `CompareError::Io`/`CompareError::Parse` if reading or writing fails.
    pub fn compare<B, C, W>(
        &self,
        baseline: B,
        mut sources: Vec<OrderedCallsReader<C>>,
        out: &mut W,
    ) -> Result<CompareMetrics, CompareError>
    where
        B: BufRead,
        C: BufRead,
        W: Write,
    {
        if sources.is_empty() {
            return Err(CompareError::Config("No calls sources to compare".to_string()));
        }

        let mut baseline = BaselineReader::new(baseline, self.config.baseline_has_header)?;
        let first = first_record(&mut baseline)?;

        let names: Vec<String> = sources.iter().map(|s| s.name().to_string()).collect();
        info!(
            sources = names.len(),
            classification = %self.config.classification,
            value_mode = %self.config.value_mode,
            tie_policy = %self.config.tie_policy,
            "Comparing calls against baseline"
        );

        let width = first.as_ref().map_or(BASELINE_REQUIRED_COLUMNS, |r| r.fields().len());
        write_header(out, baseline.header(), width, &names)?;

        let mut metrics = CompareMetrics::new(names);
        let mut previous: Option<(String, u64)> = None;

        if let Some(record) = first {
            self.process_site(&record, &mut sources, &mut metrics, out)?;
            previous = Some((record.chromosome().to_string(), record.start()));
        }

        while let Some(row) = baseline.next_row()? {
            let record = match row {
                BaselineRow::Record(record) => record,
                BaselineRow::Malformed {
                    line_number,
                    columns,
                } => {
                    warn!(
                        line = line_number,
                        columns, "Skipping malformed baseline row"
                    );
                    metrics.skipped_rows += 1;
                    continue;
                }
                BaselineRow::Undecodable { line_number } => {
                    warn!(line = line_number, "Skipping baseline row that is not valid UTF-8");
                    metrics.skipped_rows += 1;
                    continue;
                }
            };

            if let Some((chromosome, start)) = &previous {
                let ordering = self.order.compare_positions(
                    (record.chromosome(), record.start()),
                    (chromosome.as_str(), *start),
                );
                if ordering == Ordering::Less {
                    warn!(
                        line = baseline.line_number(),
                        chromosome = record.chromosome(),
                        start = record.start(),
                        "Baseline is not sorted; results for this site are unreliable"
                    );
                }
            }

            self.process_site(&record, &mut sources, &mut metrics, out)?;
            previous = Some((record.chromosome().to_string(), record.start()));

            if metrics.total_sites % PROGRESS_INTERVAL == 0 {
                debug!(sites = metrics.total_sites, "Progress");
            }
        }

        out.flush()?;

        for (source_metrics, source) in metrics.sources.iter_mut().zip(&sources) {
            source_metrics.calls_read = source.records_read();
            source_metrics.malformed_lines = source.malformed_lines();
        }

        info!(
            sites = metrics.total_sites,
            skipped = metrics.skipped_rows,
            "Comparison complete"
        );

        Ok(metrics)
    }

    fn process_site<C: BufRead, W: Write>(
        &self,
        site: &BaselineRecord,
        sources: &mut [OrderedCallsReader<C>],
        metrics: &mut CompareMetrics,
        out: &mut W,
    ) -> Result<(), CompareError> {
        let mut classes: Vec<MatchClass> = Vec::with_capacity(sources.len());
        let mut line = site.fields().join("\t");

        for source in sources.iter_mut() {
            source.advance_to_window(site.chromosome(), site.start(), site.end())?;
            let classification = classify(site, &source.best_calls());
            let score = self.table.score(&classification);

            classes.push(classification.class);
            line.push('\t');
            line.push_str(&score.to_string());
        }

        metrics.record_site(&classes);
        line.push('\n');
        out.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Read the first data row, which must be a usable record
fn first_record<R: BufRead>(
    baseline: &mut BaselineReader<R>,
) -> Result<Option<BaselineRecord>, CompareError> {
    match baseline.next_row()? {
        None => Ok(None),
        Some(BaselineRow::Record(record)) => Ok(Some(record)),
        Some(BaselineRow::Malformed {
            line_number,
            columns,
        }) if columns < BASELINE_REQUIRED_COLUMNS => Err(CompareError::Config(format!(
            "Baseline needs at least {BASELINE_REQUIRED_COLUMNS} columns, line {line_number} has {columns}"
        ))),
        Some(BaselineRow::Malformed { line_number, .. }) => Err(CompareError::Config(format!(
            "Baseline line {line_number} has non-numeric coordinates; if it is a header, pass --baseline-header"
        ))),
        Some(BaselineRow::Undecodable { line_number }) => Err(CompareError::Config(format!(
            "Baseline line {line_number} is not valid UTF-8"
        ))),
    }
}

fn write_header<W: Write>(
    out: &mut W,
    header: Option<&[String]>,
    width: usize,
    source_names: &[String],
) -> std::io::Result<()> {
    let mut columns: Vec<String> = match header {
        Some(names) => names.to_vec(),
        None => BASELINE_COLUMN_NAMES
            .iter()
            .map(ToString::to_string)
            .chain((1..=width.saturating_sub(BASELINE_REQUIRED_COLUMNS)).map(|i| format!("extra_{i}")))
            .collect(),
    };
    columns.extend(source_names.iter().cloned());
    writeln!(out, "{}", columns.join("\t"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn vcf_line(chromosome: &str, position: u64, count: u64, name: &str) -> String {
        format!(
            "{chromosome}\t{position}\t.\tN\t<INS:ME>\t{count}\tPASS\tMEINFO={name},1,2,+\tGT\t1/1\n"
        )
    }

    fn source(name: &str, lines: &[String]) -> OrderedCallsReader<Cursor<String>> {
        OrderedCallsReader::new(
            name,
            Cursor::new(lines.concat()),
            Arc::new(ChromosomeOrder::new(["chr1", "chr2"])),
        )
    }

    fn run(
        config: CompareConfig,
        baseline: &str,
        sources: Vec<OrderedCallsReader<Cursor<String>>>,
    ) -> (String, CompareMetrics) {
        let comparer = Comparer::new(config, ChromosomeOrder::new(["chr1", "chr2"]));
        let mut out = Vec::new();
        let metrics = comparer
            .compare(Cursor::new(baseline.to_string()), sources, &mut out)
            .unwrap();
        (String::from_utf8(out).unwrap(), metrics)
    }

    fn config(
        classification: ClassificationMode,
        value_mode: ValueMode,
        tie_policy: TiePolicy,
    ) -> CompareConfig {
        CompareConfig {
            classification,
            value_mode,
            tie_policy,
            baseline_has_header: false,
        }
    }

    fn scores(output: &str) -> Vec<String> {
        output
            .lines()
            .skip(1)
            .map(|line| line.rsplit('\t').next().unwrap().to_string())
            .collect()
    }

    const SITE: &str = "chr1\t100\t200\tTE1\tfamA\tfamB\n";

    #[test]
    fn test_exact_single_scores_four() {
        let calls = source("s1", &[vcf_line("chr1", 150, 5, "TE1")]);
        let (output, metrics) = run(
            config(ClassificationMode::PassFail, ValueMode::Flags, TiePolicy::Full),
            SITE,
            vec![calls],
        );
        assert_eq!(scores(&output), vec!["4"]);
        assert_eq!(metrics.sources[0].perfect, 1);
    }

    #[test]
    fn test_family_single_scores_three() {
        let calls = source("s1", &[vcf_line("chr1", 150, 5, "famA_other")]);
        let (output, metrics) = run(
            config(
                ClassificationMode::PassFamilySkipFail,
                ValueMode::Flags,
                TiePolicy::Partial,
            ),
            SITE,
            vec![calls],
        );
        assert_eq!(scores(&output), vec!["3"]);
        assert_eq!(metrics.sources[0].perfect, 0);
        assert_eq!(metrics.sources[0].partial_or_better, 1);
    }

    #[test]
    fn test_no_call_is_skipped() {
        let calls = source("s1", &[vcf_line("chr1", 500, 5, "TE1")]);
        let (output, _) = run(
            config(ClassificationMode::PassSkipFail, ValueMode::Flags, TiePolicy::Full),
            SITE,
            vec![calls],
        );
        assert_eq!(scores(&output), vec!["0"]);
    }

    #[test]
    fn test_tied_exact_depends_on_tie_policy() {
        let lines = [vcf_line("chr1", 150, 5, "TE1"), vcf_line("chr1", 160, 5, "XYZ")];

        let (full, _) = run(
            config(ClassificationMode::PassFail, ValueMode::Flags, TiePolicy::Full),
            SITE,
            vec![source("s1", &lines)],
        );
        let (none, _) = run(
            config(ClassificationMode::PassFail, ValueMode::Flags, TiePolicy::None),
            SITE,
            vec![source("s1", &lines)],
        );
        assert_eq!(scores(&full), vec!["4"]);
        assert_eq!(scores(&none), vec!["-4"]);
    }

    #[test]
    fn test_counts_mode_multiplies_support() {
        let calls = source("s1", &[vcf_line("chr1", 150, 7, "TE1")]);
        let cfg = config(ClassificationMode::PassFail, ValueMode::Counts, TiePolicy::Full);
        let unit = ScoringTable::new(cfg.classification, cfg.value_mode, cfg.tie_policy)
            .unit_score(MatchClass::ExactSingle);
        let (output, _) = run(cfg, SITE, vec![calls]);
        assert_eq!(scores(&output), vec![(7 * unit).to_string()]);
    }

    #[test]
    fn test_rows_keep_passthrough_and_source_order() {
        let baseline = "chr1\t100\t200\tTE1\tfamA\tfamB\tnote\n";
        let a = source("alpha", &[vcf_line("chr1", 150, 5, "TE1")]);
        let b = source("beta", &[vcf_line("chr1", 150, 5, "XYZ")]);
        let (output, metrics) = run(
            config(ClassificationMode::PassFail, ValueMode::Flags, TiePolicy::Full),
            baseline,
            vec![a, b],
        );

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "chromosome\tstart\tend\telement_name\tfamily_primary\tfamily_secondary\textra_1\talpha\tbeta"
        );
        assert_eq!(lines[1], "chr1\t100\t200\tTE1\tfamA\tfamB\tnote\t4\t-4");
        assert_eq!(metrics.site_max_perfect, 1);
    }

    #[test]
    fn test_baseline_header_is_reused() {
        let baseline = "chrom\tfrom\tto\tte\tf1\tf2\nchr1\t100\t200\tTE1\tfamA\tfamB\n";
        let comparer = Comparer::new(
            CompareConfig {
                baseline_has_header: true,
                ..CompareConfig::default()
            },
            ChromosomeOrder::lexicographic(),
        );
        let mut out = Vec::new();
        comparer
            .compare(Cursor::new(baseline), vec![source("s1", &[])], &mut out)
            .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("chrom\tfrom\tto\tte\tf1\tf2\ts1\n"));
    }

    #[test]
    fn test_short_baseline_is_config_error() {
        let comparer = Comparer::new(CompareConfig::default(), ChromosomeOrder::lexicographic());
        let mut out = Vec::new();
        let result = comparer.compare(
            Cursor::new("chr1\t100\t200\tTE1\n"),
            vec![source("s1", &[])],
            &mut out,
        );
        assert!(matches!(result, Err(CompareError::Config(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_no_sources_is_config_error() {
        let comparer = Comparer::new(CompareConfig::default(), ChromosomeOrder::lexicographic());
        let mut out = Vec::new();
        let result = comparer.compare(
            Cursor::new(SITE),
            Vec::<OrderedCallsReader<Cursor<String>>>::new(),
            &mut out,
        );
        assert!(matches!(result, Err(CompareError::Config(_))));
    }

    #[test]
    fn test_malformed_rows_after_start_are_skipped() {
        let baseline = "chr1\t100\t200\tTE1\tfamA\tfamB\nchr1\t300\nchr2\t100\t200\tTE2\tfamA\tfamB\n";
        let calls = source(
            "s1",
            &[vcf_line("chr1", 150, 5, "TE1"), vcf_line("chr2", 150, 5, "TE2")],
        );
        let (output, metrics) = run(CompareConfig::default(), baseline, vec![calls]);

        assert_eq!(output.lines().count(), 3);
        assert_eq!(metrics.total_sites, 2);
        assert_eq!(metrics.skipped_rows, 1);
        assert_eq!(metrics.sources[0].perfect, 2);
        assert_eq!(metrics.sources[0].calls_read, 2);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let baseline = "chr1\t100\t200\tTE1\tfamA\tfamB\nchr1\t150\t400\tTE2\tfamC\tfamD\nchr2\t10\t20\tTE3\tfamA\tfamB\n";
        let lines = [
            vcf_line("chr1", 120, 3, "TE1"),
            vcf_line("chr1", 180, 3, "famC"),
            vcf_line("chr1", 390, 9, "TE2"),
            vcf_line("chr2", 15, 2, "zzz"),
        ];

        let (first_output, first_metrics) =
            run(CompareConfig::default(), baseline, vec![source("s1", &lines)]);
        let (second_output, second_metrics) =
            run(CompareConfig::default(), baseline, vec![source("s1", &lines)]);

        assert_eq!(first_output, second_output);
        assert_eq!(first_metrics, second_metrics);
    }

    #[test]
    fn test_undecodable_lines_do_not_stop_the_scan() {
        let mut calls = vcf_line("chr1", 120, 1, "XYZ").into_bytes();
        calls.extend_from_slice(
            b"chr1\t130\t.\tN\t<INS:ME>\t9\tPASS\tMEINFO=Caf\xe9,1,2,+\tGT\t1/1\n",
        );
        calls.extend(vcf_line("chr1", 150, 5, "TE1").into_bytes());
        calls.extend(vcf_line("chr2", 150, 5, "TE2").into_bytes());

        let mut baseline = SITE.as_bytes().to_vec();
        baseline.extend_from_slice(b"chr1\t300\t400\tCaf\xe9\tfamA\tfamB\n");
        baseline.extend_from_slice(b"chr2\t100\t200\tTE2\tfamA\tfamB\n");

        let comparer = Comparer::new(CompareConfig::default(), ChromosomeOrder::new(["chr1", "chr2"]));
        let source = OrderedCallsReader::new("s1", Cursor::new(calls), comparer.order());
        let mut out = Vec::new();
        let metrics = comparer
            .compare(Cursor::new(baseline), vec![source], &mut out)
            .unwrap();

        assert_eq!(scores(&String::from_utf8(out).unwrap()), vec!["4", "4"]);
        assert_eq!(metrics.skipped_rows, 1);
        assert_eq!(metrics.sources[0].malformed_lines, 1);
        assert_eq!(metrics.sources[0].perfect, 2);
    }

    #[test]
    fn test_undecodable_first_row_is_config_error() {
        let comparer = Comparer::new(CompareConfig::default(), ChromosomeOrder::lexicographic());
        let mut out = Vec::new();
        let result = comparer.compare(
            Cursor::new(b"chr1\t100\t200\tCaf\xe9\tfamA\tfamB\n".to_vec()),
            vec![source("s1", &[])],
            &mut out,
        );
        assert!(matches!(result, Err(CompareError::Config(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unsorted_baseline_still_completes() {
        let baseline = "chr2\t100\t200\tTE2\tfamA\tfamB\nchr1\t100\t200\tTE1\tfamA\tfamB\nchr2\t500\t600\tTE3\tfamA\tfamB\n";
        let calls = source(
            "s1",
            &[
                vcf_line("chr1", 150, 5, "TE1"),
                vcf_line("chr2", 150, 5, "TE2"),
                vcf_line("chr2", 550, 5, "TE3"),
            ],
        );
        let (output, metrics) = run(CompareConfig::default(), baseline, vec![calls]);

        // chr1 call was passed over before the out-of-order site was queried
        assert_eq!(scores(&output), vec!["4", "0", "4"]);
        assert_eq!(metrics.total_sites, 3);
        assert_eq!(metrics.sources[0].calls_read, 3);
    }

    #[test]
    fn test_listed_order_spans_numeric_chromosome_names() {
        let baseline = "chr9\t100\t200\tTE1\tfamA\tfamB\nchr10\t100\t200\tTE2\tfamA\tfamB\n";
        let order = ChromosomeOrder::new(["chr9", "chr10"]);
        let comparer = Comparer::new(CompareConfig::default(), order);
        let calls = [vcf_line("chr9", 150, 5, "TE1"), vcf_line("chr10", 150, 5, "TE2")].concat();
        let source = OrderedCallsReader::new("s1", Cursor::new(calls), comparer.order());

        let mut out = Vec::new();
        let metrics = comparer
            .compare(Cursor::new(baseline), vec![source], &mut out)
            .unwrap();

        assert_eq!(metrics.sources[0].perfect, 2);
        assert_eq!(metrics.sources[0].calls_read, 2);
    }
}
