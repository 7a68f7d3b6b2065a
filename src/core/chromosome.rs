use std::cmp::Ordering;
use std::collections::HashMap;

/// Total order over chromosome names used to interpret "sorted" inputs.
///
/// Listed chromosomes rank by their position in the list. Unlisted chromosomes
/// rank after every listed one and compare lexicographically among themselves,
/// so an empty order is plain lexicographic ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromosomeOrder {
    names: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl ChromosomeOrder {
    /// Build an order from names in sorted order. Repeated names keep their first rank.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut order = Self::default();
        for name in names {
            let name = name.into();
            if !order.ranks.contains_key(&name) {
                order.ranks.insert(name.clone(), order.names.len());
                order.names.push(name);
            }
        }
        order
    }

    /// Order with no listed chromosomes: plain string comparison, so `chr10`
    /// sorts before `chr9`. Only suits inputs sorted that way.
    #[must_use]
    pub fn lexicographic() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of `name` in the list, if listed
    #[must_use]
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    /// Compare two chromosome names
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        match (self.rank(a), self.rank(b)) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }

    /// Compare two `(chromosome, position)` coordinates
    #[must_use]
    pub fn compare_positions(&self, a: (&str, u64), b: (&str, u64)) -> Ordering {
        self.compare(a.0, b.0).then(a.1.cmp(&b.1))
    }

    /// Listed names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
