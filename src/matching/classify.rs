use crate::core::record::{BaselineRecord, CallRecord};
use crate::core::types::MatchClass;

/// Result of classifying the best call(s) of one source at one baseline site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub class: MatchClass,
    /// Read count of the winning call; 0 when there is no call
    pub support_count: u64,
}

impl Classification {
    #[must_use]
    pub fn no_call() -> Self {
        Self {
            class: MatchClass::NoCall,
            support_count: 0,
        }
    }
}

/// Case-insensitive name equality
#[must_use]
pub fn is_exact_match(called_name: &str, element_name: &str) -> bool {
    called_name.to_lowercase() == element_name.to_lowercase()
}

/// True if the called name contains, or is contained in, the element name or
/// either family name (case-insensitive).
///
/// Empty strings never match: they would otherwise be contained in everything.
#[must_use]
pub fn is_family_match(
    called_name: &str,
    element_name: &str,
    family_primary: &str,
    family_secondary: &str,
) -> bool {
    let called = called_name.to_lowercase();
    if called.is_empty() {
        return false;
    }
    [element_name, family_primary, family_secondary]
        .iter()
        .filter(|other| !other.is_empty())
        .map(|other| other.to_lowercase())
        .any(|other| other.contains(&called) || called.contains(&other))
}

/// Classify the best call(s) of one calls source against a baseline site.
///
/// With several tied calls an exact match takes priority over a family match;
/// a tie with neither is a failure.
#[must_use]
pub fn classify(site: &BaselineRecord, best: &[&CallRecord]) -> Classification {
    let exact = |call: &CallRecord| is_exact_match(&call.called_name, site.element_name());
    let family = |call: &CallRecord| {
        is_family_match(
            &call.called_name,
            site.element_name(),
            site.family_primary(),
            site.family_secondary(),
        )
    };

    match best {
        [] => Classification::no_call(),
        [call] => {
            let call: &CallRecord = call;
            let class = if exact(call) {
                MatchClass::ExactSingle
            } else if family(call) {
                MatchClass::FamilySingle
            } else {
                MatchClass::FailSingle
            };
            Classification {
                class,
                support_count: call.support_count,
            }
        }
        [first, ..] => {
            let tied = || best.iter().copied();
            let (class, winner) = if let Some(call) = tied().find(|call| exact(*call)) {
                (MatchClass::ExactTied, call)
            } else if let Some(call) = tied().find(|call| family(*call)) {
                (MatchClass::FamilyTied, call)
            } else {
                (MatchClass::FailSingle, *first)
            };
            Classification {
                class,
                support_count: winner.support_count,
            }
        }
    }
}
