use serde::Serialize;

use crate::core::types::{ClassificationMode, MatchClass, TiePolicy, ValueMode};
use crate::matching::classify::Classification;

/// Scores for one (classification, value, tie) combination, indexed by [`MatchClass`]:
/// exact, no call, fail, family, tied exact, tied family
type ScoreRow = [i64; 6];

/// Unit scores indexed by classification mode, value mode and tie policy
const SCORES: [[[ScoreRow; 3]; 3]; 4] = [
    // Pass / fail
    [
        [[4, -4, -4, -4, 4, -4], [4, -4, -4, -4, 3, -4], [4, -4, -4, -4, -4, -4]],
        [[1, 0, 0, 0, 1, 0], [1, 0, 0, 0, 1, 0], [1, 0, 0, 0, 0, 0]],
        [[8, 0, 0, 0, 8, 0], [8, 0, 0, 0, 6, 0], [8, 0, 0, 0, 0, 0]],
    ],
    // Pass / skip / fail
    [
        [[4, 0, -4, -4, 4, -4], [4, 0, -4, -4, 3, -4], [4, 0, -4, -4, -4, -4]],
        [[1, 0, 0, 0, 1, 0], [1, 0, 0, 0, 1, 0], [1, 0, 0, 0, 0, 0]],
        [[8, 4, 0, 0, 8, 0], [8, 4, 0, 0, 6, 0], [8, 4, 0, 0, 0, 0]],
    ],
    // Pass / family / fail
    [
        [[4, -4, -4, 3, 4, 3], [4, -4, -4, 3, 2, 1], [4, -4, -4, 3, -4, -4]],
        [[1, 0, 0, 1, 1, 1], [1, 0, 0, 1, 1, 1], [1, 0, 0, 1, 0, 0]],
        [[8, 0, 0, 7, 8, 7], [8, 0, 0, 7, 6, 5], [8, 0, 0, 7, 0, 0]],
    ],
    // Pass / family / skip / fail
    [
        [[4, 0, -4, 3, 4, 3], [4, 0, -4, 3, 2, 1], [4, 0, -4, 3, -4, -4]],
        [[1, 0, 0, 1, 1, 1], [1, 0, 0, 1, 1, 1], [1, 0, 0, 1, 0, 0]],
        [[8, 4, 0, 7, 8, 7], [8, 4, 0, 7, 6, 5], [8, 4, 0, 7, 0, 0]],
    ],
];

/// Score lookup for a fixed choice of classification mode, value mode and tie policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoringTable {
    pub classification: ClassificationMode,
    pub value_mode: ValueMode,
    pub tie_policy: TiePolicy,
    #[serde(skip)]
    row: ScoreRow,
}

impl ScoringTable {
    #[must_use]
    pub fn new(
        classification: ClassificationMode,
        value_mode: ValueMode,
        tie_policy: TiePolicy,
    ) -> Self {
        Self {
            classification,
            value_mode,
            tie_policy,
            row: SCORES[classification.index()][value_mode.index()][tie_policy.index()],
        }
    }

    /// Unit score for any combination
    #[must_use]
    pub fn lookup(
        classification: ClassificationMode,
        value_mode: ValueMode,
        tie_policy: TiePolicy,
        class: MatchClass,
    ) -> i64 {
        SCORES[classification.index()][value_mode.index()][tie_policy.index()][class.index()]
    }

    /// Unit score for `class` under this table's modes
    #[must_use]
    pub fn unit_score(&self, class: MatchClass) -> i64 {
        self.row[class.index()]
    }

    /// Final score for a classification. In counts mode the unit score is
    /// multiplied by the winning call's read count.
    #[must_use]
    pub fn score(&self, classification: &Classification) -> i64 {
        let unit = self.unit_score(classification.class);
        match self.value_mode {
            ValueMode::Counts => {
                let count = i64::try_from(classification.support_count).unwrap_or(i64::MAX);
                unit.saturating_mul(count)
            }
            ValueMode::Flags | ValueMode::PositiveFlags => unit,
        }
    }
}
