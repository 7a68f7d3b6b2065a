use serde::Serialize;

/// Number of leading baseline columns the comparison requires
pub const BASELINE_REQUIRED_COLUMNS: usize = 6;

/// Default names for the required baseline columns
pub const BASELINE_COLUMN_NAMES: [&str; BASELINE_REQUIRED_COLUMNS] = [
    "chromosome",
    "start",
    "end",
    "element_name",
    "family_primary",
    "family_secondary",
];

/// A known TE insertion from the baseline file.
///
/// Columns are kept exactly as read so that output rows reproduce them verbatim;
/// only the coordinates are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineRecord {
    fields: Vec<String>,
    start: u64,
    end: u64,
}

impl BaselineRecord {
    /// Build a record from its tab-separated columns.
    ///
    /// Returns `None` if fewer than [`BASELINE_REQUIRED_COLUMNS`] columns are
    /// present or the coordinates are not unsigned integers.
    #[must_use]
    pub fn from_fields(fields: Vec<String>) -> Option<Self> {
        if fields.len() < BASELINE_REQUIRED_COLUMNS {
            return None;
        }
        let start = fields[1].trim().parse().ok()?;
        let end = fields[2].trim().parse().ok()?;
        Some(Self { fields, start, end })
    }

    #[must_use]
    pub fn chromosome(&self) -> &str {
        &self.fields[0]
    }

    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    #[must_use]
    pub fn element_name(&self) -> &str {
        &self.fields[3]
    }

    #[must_use]
    pub fn family_primary(&self) -> &str {
        &self.fields[4]
    }

    #[must_use]
    pub fn family_secondary(&self) -> &str {
        &self.fields[5]
    }

    /// Passthrough columns beyond the required six
    #[must_use]
    pub fn extra_fields(&self) -> &[String] {
        &self.fields[BASELINE_REQUIRED_COLUMNS..]
    }

    /// All columns as read, required and passthrough
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// A single TE call from a RetroSeq calls file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub chromosome: String,
    pub position: u64,
    /// Number of reads supporting the call
    pub support_count: u64,
    /// Name of the TE reported by the caller
    pub called_name: String,
}

impl CallRecord {
    pub fn new(
        chromosome: impl Into<String>,
        position: u64,
        support_count: u64,
        called_name: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            support_count,
            called_name: called_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(line: &str) -> Vec<String> {
        line.split('\t').map(str::to_string).collect()
    }

    #[test]
    fn test_baseline_record_accessors() {
        let record =
            BaselineRecord::from_fields(fields("chr1\t100\t200\tTE1\tfamA\tfamB\tx\ty")).unwrap();
        assert_eq!(record.chromosome(), "chr1");
        assert_eq!(record.start(), 100);
        assert_eq!(record.end(), 200);
        assert_eq!(record.element_name(), "TE1");
        assert_eq!(record.family_primary(), "famA");
        assert_eq!(record.family_secondary(), "famB");
        assert_eq!(record.extra_fields(), &["x".to_string(), "y".to_string()]);
        assert_eq!(record.fields().len(), 8);
    }

    #[test]
    fn test_baseline_record_rejects_short_or_bad_rows() {
        assert!(BaselineRecord::from_fields(fields("chr1\t100\t200\tTE1\tfamA")).is_none());
        assert!(BaselineRecord::from_fields(fields("chr1\tabc\t200\tTE1\tfamA\tfamB")).is_none());
        assert!(BaselineRecord::from_fields(fields("chr1\t100\t-5\tTE1\tfamA\tfamB")).is_none());
    }
}
