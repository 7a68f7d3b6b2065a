use std::collections::VecDeque;

use crate::core::record::CallRecord;

/// Calls overlapping the active query window, in source order.
///
/// Records enter at the back and leave from the front (purged) or, when a
/// narrower window follows a wider one, from the back (returned to the
/// reader's lookahead queue).
#[derive(Debug, Clone, Default)]
pub struct WindowBuffer {
    records: VecDeque<CallRecord>,
}

impl WindowBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push_back(&mut self, record: CallRecord) {
        self.records.push_back(record);
    }

    /// Drop records from the front that are on another chromosome or before `start`.
    ///
    /// Returns the number of records dropped.
    pub fn purge_front(&mut self, chromosome: &str, start: u64) -> usize {
        let mut purged = 0;
        while let Some(front) = self.records.front() {
            if front.chromosome != chromosome || front.position < start {
                self.records.pop_front();
                purged += 1;
            } else {
                break;
            }
        }
        purged
    }

    /// Move records positioned after `end` from the back onto the front of `queue`,
    /// preserving source order.
    pub fn return_beyond(&mut self, end: u64, queue: &mut VecDeque<CallRecord>) {
        while self.records.back().is_some_and(|back| back.position > end) {
            if let Some(record) = self.records.pop_back() {
                queue.push_front(record);
            }
        }
    }

    /// Every record sharing the maximum support count, in buffer order
    #[must_use]
    pub fn best(&self) -> Vec<&CallRecord> {
        let Some(max) = self.records.iter().map(|r| r.support_count).max() else {
            return Vec::new();
        };
        self.records
            .iter()
            .filter(|r| r.support_count == max)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(chromosome: &str, position: u64, count: u64, name: &str) -> CallRecord {
        CallRecord::new(chromosome, position, count, name)
    }

    #[test]
    fn test_best_returns_all_ties() {
        let mut buffer = WindowBuffer::new();
        buffer.push_back(call("chr1", 10, 3, "A"));
        buffer.push_back(call("chr1", 20, 7, "B"));
        buffer.push_back(call("chr1", 30, 7, "C"));
        buffer.push_back(call("chr1", 40, 1, "D"));

        let best: Vec<&str> = buffer.best().iter().map(|r| r.called_name.as_str()).collect();
        assert_eq!(best, vec!["B", "C"]);
    }

    #[test]
    fn test_best_on_empty_buffer() {
        assert!(WindowBuffer::new().best().is_empty());
    }

    #[test]
    fn test_purge_front_by_position_and_chromosome() {
        let mut buffer = WindowBuffer::new();
        buffer.push_back(call("chr1", 10, 1, "A"));
        buffer.push_back(call("chr1", 20, 1, "B"));
        buffer.push_back(call("chr1", 30, 1, "C"));

        assert_eq!(buffer.purge_front("chr1", 20), 1);
        assert_eq!(buffer.len(), 2);

        assert_eq!(buffer.purge_front("chr2", 0), 2);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_return_beyond_keeps_order() {
        let mut buffer = WindowBuffer::new();
        buffer.push_back(call("chr1", 10, 1, "A"));
        buffer.push_back(call("chr1", 20, 1, "B"));
        buffer.push_back(call("chr1", 30, 1, "C"));

        let mut queue = VecDeque::from(vec![call("chr1", 40, 1, "D")]);
        buffer.return_beyond(15, &mut queue);

        assert_eq!(buffer.len(), 1);
        let names: Vec<&str> = queue.iter().map(|r| r.called_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "D"]);
    }
}
