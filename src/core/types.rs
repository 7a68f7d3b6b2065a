use serde::{Deserialize, Serialize};

/// How match outcomes are grouped into pass, skip and fail buckets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    /// Exact matches pass, everything else fails
    PassFail,
    /// Exact matches pass, missing calls are skipped, everything else fails
    PassSkipFail,
    /// Exact and family matches pass, everything else fails
    PassFamilyFail,
    /// Exact and family matches pass, missing calls are skipped, the rest fail
    PassFamilySkipFail,
}

impl ClassificationMode {
    pub const ALL: [Self; 4] = [
        Self::PassFail,
        Self::PassSkipFail,
        Self::PassFamilyFail,
        Self::PassFamilySkipFail,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PassFail => write!(f, "pass-fail"),
            Self::PassSkipFail => write!(f, "pass-skip-fail"),
            Self::PassFamilyFail => write!(f, "pass-family-fail"),
            Self::PassFamilySkipFail => write!(f, "pass-family-skip-fail"),
        }
    }
}

/// Kind of value written to each score column
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ValueMode {
    /// Signed flag values (positive for pass, negative for fail)
    Flags,
    /// Supporting read count of the winning call, zero when it does not pass
    Counts,
    /// Flag values shifted so that every outcome is non-negative
    PositiveFlags,
}

impl ValueMode {
    pub const ALL: [Self; 3] = [Self::Flags, Self::Counts, Self::PositiveFlags];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ValueMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flags => write!(f, "flags"),
            Self::Counts => write!(f, "counts"),
            Self::PositiveFlags => write!(f, "positive-flags"),
        }
    }
}

/// How tied best calls are credited
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// A tie containing a match scores the same as a single match
    Full,
    /// A tie containing a match scores lower than a single match, but positive
    Partial,
    /// Any tie scores as a failure
    None,
}

impl TiePolicy {
    pub const ALL: [Self; 3] = [Self::Full, Self::Partial, Self::None];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for TiePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Partial => write!(f, "partial"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Outcome of comparing one baseline site against the best call(s) of one calls source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchClass {
    /// A single best call naming the baseline element
    ExactSingle,
    /// No call overlaps the site
    NoCall,
    /// A single best call unrelated to the baseline element, or a tie of unrelated calls
    FailSingle,
    /// A single best call related to the element's name or families
    FamilySingle,
    /// Several tied best calls, at least one naming the baseline element
    ExactTied,
    /// Several tied best calls, none exact but at least one family-related
    FamilyTied,
}

impl MatchClass {
    pub const ALL: [Self; 6] = [
        Self::ExactSingle,
        Self::NoCall,
        Self::FailSingle,
        Self::FamilySingle,
        Self::ExactTied,
        Self::FamilyTied,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Exact match, tied or not
    #[must_use]
    pub fn is_perfect(self) -> bool {
        matches!(self, Self::ExactSingle | Self::ExactTied)
    }

    /// Exact or family match, tied or not
    #[must_use]
    pub fn is_partial_or_better(self) -> bool {
        matches!(
            self,
            Self::ExactSingle | Self::ExactTied | Self::FamilySingle | Self::FamilyTied
        )
    }
}

impl std::fmt::Display for MatchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactSingle => write!(f, "exact_single"),
            Self::NoCall => write!(f, "no_call"),
            Self::FailSingle => write!(f, "fail_single"),
            Self::FamilySingle => write!(f, "family_single"),
            Self::ExactTied => write!(f, "exact_tied"),
            Self::FamilyTied => write!(f, "family_tied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense() {
        for (i, mode) in ClassificationMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
        for (i, mode) in ValueMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
        for (i, policy) in TiePolicy::ALL.iter().enumerate() {
            assert_eq!(policy.index(), i);
        }
        for (i, class) in MatchClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
    }

    #[test]
    fn test_match_class_buckets() {
        assert!(MatchClass::ExactTied.is_perfect());
        assert!(!MatchClass::FamilySingle.is_perfect());
        assert!(MatchClass::FamilyTied.is_partial_or_better());
        assert!(!MatchClass::FailSingle.is_partial_or_better());
        assert!(!MatchClass::NoCall.is_partial_or_better());
    }

    #[test]
    fn test_display_matches_cli_names() {
        use clap::ValueEnum;

        for mode in ClassificationMode::ALL {
            let name = mode.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, mode.to_string());
        }
        for mode in ValueMode::ALL {
            let name = mode.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, mode.to_string());
        }
        for policy in TiePolicy::ALL {
            let name = policy.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, policy.to_string());
        }
    }
}
