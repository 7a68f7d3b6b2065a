use serde::Serialize;

use crate::core::types::MatchClass;

/// Safely convert usize to f64 for averages
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

fn average(total: usize, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        count_to_f64(total) / count_to_f64(n)
    }
}

/// Counters for one calls source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceMetrics {
    pub name: String,
    /// Sites where this source made an exact call (single or tied)
    pub perfect: usize,
    /// Sites where this source made an exact or family call (single or tied)
    pub partial_or_better: usize,
    pub calls_read: usize,
    pub malformed_lines: usize,
}

impl SourceMetrics {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Aggregate accuracy metrics for a comparison run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompareMetrics {
    /// Baseline sites scored
    pub total_sites: usize,
    /// Malformed baseline rows that were skipped
    pub skipped_rows: usize,
    pub sources: Vec<SourceMetrics>,
    /// Most sources agreeing exactly at any one site
    pub site_max_perfect: usize,
    /// Most sources making an exact or family call at any one site
    pub site_max_partial: usize,
    site_perfect_total: usize,
    site_partial_total: usize,
}

impl CompareMetrics {
    pub fn new<I, S>(source_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: source_names.into_iter().map(SourceMetrics::new).collect(),
            ..Self::default()
        }
    }

    /// Record the classes of one site, one per source in source order
    pub fn record_site(&mut self, classes: &[MatchClass]) {
        self.total_sites += 1;

        let mut perfect = 0;
        let mut partial = 0;
        for (source, class) in self.sources.iter_mut().zip(classes) {
            if class.is_perfect() {
                source.perfect += 1;
                perfect += 1;
            }
            if class.is_partial_or_better() {
                source.partial_or_better += 1;
                partial += 1;
            }
        }

        self.site_max_perfect = self.site_max_perfect.max(perfect);
        self.site_max_partial = self.site_max_partial.max(partial);
        self.site_perfect_total += perfect;
        self.site_partial_total += partial;
    }

    #[must_use]
    pub fn total_files(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn highest_perfect_per_file(&self) -> usize {
        self.sources.iter().map(|s| s.perfect).max().unwrap_or(0)
    }

    #[must_use]
    pub fn average_perfect_per_file(&self) -> f64 {
        let total = self.sources.iter().map(|s| s.perfect).sum();
        average(total, self.sources.len())
    }

    #[must_use]
    pub fn highest_partial_per_file(&self) -> usize {
        self.sources
            .iter()
            .map(|s| s.partial_or_better)
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn average_partial_per_file(&self) -> f64 {
        let total = self.sources.iter().map(|s| s.partial_or_better).sum();
        average(total, self.sources.len())
    }

    #[must_use]
    pub fn average_perfect_per_site(&self) -> f64 {
        average(self.site_perfect_total, self.total_sites)
    }

    #[must_use]
    pub fn average_partial_per_site(&self) -> f64 {
        average(self.site_partial_total, self.total_sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_site() {
        let mut metrics = CompareMetrics::new(["a", "b"]);
        metrics.record_site(&[MatchClass::ExactSingle, MatchClass::FamilyTied]);
        metrics.record_site(&[MatchClass::NoCall, MatchClass::ExactTied]);
        metrics.record_site(&[MatchClass::FailSingle, MatchClass::FailSingle]);

        assert_eq!(metrics.total_sites, 3);
        assert_eq!(metrics.sources[0].perfect, 1);
        assert_eq!(metrics.sources[0].partial_or_better, 1);
        assert_eq!(metrics.sources[1].perfect, 1);
        assert_eq!(metrics.sources[1].partial_or_better, 2);
        assert_eq!(metrics.site_max_perfect, 1);
        assert_eq!(metrics.site_max_partial, 2);

        assert_eq!(metrics.highest_perfect_per_file(), 1);
        assert_eq!(metrics.highest_partial_per_file(), 2);
        assert!((metrics.average_partial_per_file() - 1.5).abs() < 1e-9);
        assert!((metrics.average_perfect_per_site() - 2.0 / 3.0).abs() < 1e-9);
        assert!((metrics.average_partial_per_site() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = CompareMetrics::new(Vec::<String>::new());
        assert_eq!(metrics.total_files(), 0);
        assert_eq!(metrics.highest_perfect_per_file(), 0);
        assert!(metrics.average_perfect_per_file().abs() < 1e-9);
        assert!(metrics.average_perfect_per_site().abs() < 1e-9);
    }
}
