use std::fmt;

use ahash::HashSetExt;
use fxhash::FxHashSet;

/// A terminal combination: how many bars of each length are used, the resulting total and the waste.
/// Equality and hashing are structural and order-sensitive over all three parts.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SolutionRecord {
    pub counts: Vec<u64>,
    pub total: u64,
    pub waste: u64,
}

impl SolutionRecord {
    /// Create a record from a combination vector, its total and the limit it was cut against.
    /// `total` MUST NOT exceed `limit`.
    pub fn new(counts: Vec<u64>, total: u64, limit: u64) -> Self {
        debug_assert!(total <= limit, "A terminal total never exceeds the limit");
        Self {
            counts,
            total,
            waste: limit - total,
        }
    }

    /// Flat form: the counts followed by total and waste.
    pub fn as_tuple(&self) -> Vec<u64> {
        let mut t = Vec::with_capacity(self.counts.len() + 2);
        t.extend_from_slice(&self.counts);
        t.push(self.total);
        t.push(self.waste);
        t
    }
}

impl fmt::Display for SolutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} total={} waste={}", self.counts, self.total, self.waste)
    }
}

/// The solution set. Membership is decided by a hash set, iteration follows first-discovery order.
#[derive(Debug, Clone, Default)]
pub struct Solutions {
    records: Vec<SolutionRecord>,
    seen: FxHashSet<SolutionRecord>,
}

impl Solutions {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            seen: FxHashSet::new(),
        }
    }

    /// Returns true if the exact record is already present.
    #[inline(always)]
    pub fn contains(&self, record: &SolutionRecord) -> bool {
        self.seen.contains(record)
    }

    /// Adds a record. Returns false, leaving the set untouched, if it was already present.
    pub fn insert(&mut self, record: SolutionRecord) -> bool {
        if !self.seen.insert(record.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records in the order they were first discovered.
    pub fn iter(&self) -> std::slice::Iter<'_, SolutionRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<SolutionRecord> {
        self.records
    }
}

/// Two solution sets are equal when they hold the same records, whatever the discovery order.
impl PartialEq for Solutions {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl Eq for Solutions {}

impl<'a> IntoIterator for &'a Solutions {
    type Item = &'a SolutionRecord;
    type IntoIter = std::slice::Iter<'a, SolutionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Solutions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}
