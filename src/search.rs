use crossbeam_channel::Sender;
use tracing::{debug, trace};

use crate::combinations::CanonicalCombinations;
use crate::record::{SolutionRecord, Solutions};
use crate::stock::BarStock;

/// How the search walks the space of combination vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SearchMode {
    /// Tries every bar length at every step. The same vector is revisited once per addition order.
    #[default]
    Exhaustive,
    /// Only adds bars at or after the last added index, so every vector is visited once.
    Canonical,
}

/// Counters collected while walking the search tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls of the recursive step.
    pub nodes: u64,
    /// Paths abandoned because their total exceeded the limit.
    pub dead_branches: u64,
    /// Terminal vectors reached, counting re-derivations.
    pub terminals: u64,
    /// Terminal vectors reached again after their first discovery.
    pub duplicates: u64,
}

/// Mutable state passed down the recursion, kept apart from the immutable searcher so that
/// `&self` and `&mut state` can coexist.
pub(crate) struct SearchState {
    pub(crate) counts: Vec<u64>,
    pub(crate) solutions: Solutions,
    pub(crate) stats: SearchStats,
}

impl SearchState {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            counts: vec![0; width],
            solutions: Solutions::new(),
            stats: SearchStats::default(),
        }
    }

    /// Records the current vector as terminal. A record seen for the first time is sent to the
    /// notifier before being stored, a re-derived one is only counted.
    pub(crate) fn record_terminal(
        &mut self,
        total: u64,
        limit: u64,
        sender: Option<&Sender<SolutionRecord>>,
    ) {
        self.stats.terminals += 1;

        let record = SolutionRecord::new(self.counts.clone(), total, limit);
        if self.solutions.contains(&record) {
            self.stats.duplicates += 1;
            return;
        }

        trace!(%record, "new terminal combination");
        if let Some(sender) = sender {
            let _ = sender.send(record.clone());
        }
        self.solutions.insert(record);
    }

    pub(crate) fn finish(self) -> (Solutions, SearchStats) {
        (self.solutions, self.stats)
    }
}

/// Exhaustive backtracking enumerator of maximal combinations.
pub struct Enumerator<'a> {
    stock: &'a BarStock,
    sender: Option<Sender<SolutionRecord>>,
}

impl<'a> Enumerator<'a> {
    pub fn new(stock: &'a BarStock) -> Self {
        Self {
            stock,
            sender: None,
        }
    }

    /// Every newly discovered record will be sent on `sender` at the moment it is found.
    pub fn with_notifier(mut self, sender: Sender<SolutionRecord>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Launches the search from the zero vector.
    pub fn run(&self) -> (Solutions, SearchStats) {
        let mut state = SearchState::new(self.stock.len());
        self.search(0, &mut state);

        let (solutions, stats) = state.finish();
        debug!(
            solutions = solutions.len(),
            nodes = stats.nodes,
            dead = stats.dead_branches,
            duplicates = stats.duplicates,
            "exhaustive search finished"
        );
        (solutions, stats)
    }

    /// Recursive search function.
    fn search(&self, total: u64, state: &mut SearchState) {
        state.stats.nodes += 1;

        // Prune
        if total > self.stock.limit() {
            state.stats.dead_branches += 1;
            return;
        }

        // Terminal case
        if !self.stock.can_extend(total) && total > 0 {
            state.record_terminal(total, self.stock.limit(), self.sender.as_ref());
            return;
        }

        // Recursive part, one branch per bar length in index order
        for (i, &length) in self.stock.lengths().iter().enumerate() {
            state.counts[i] += 1;
            self.search(total.saturating_add(length), state);
            state.counts[i] -= 1; // Backtracking
        }
    }
}

/// Runs the search selected by `mode`, notifying `sender` of every first discovery.
pub fn enumerate(
    stock: &BarStock,
    mode: SearchMode,
    sender: Option<Sender<SolutionRecord>>,
) -> (Solutions, SearchStats) {
    match mode {
        SearchMode::Exhaustive => {
            let mut e = Enumerator::new(stock);
            if let Some(s) = sender {
                e = e.with_notifier(s);
            }
            e.run()
        }
        SearchMode::Canonical => {
            let mut c = CanonicalCombinations::new(stock);
            if let Some(s) = sender {
                c = c.with_notifier(s);
            }
            c.run()
        }
    }
}

/// Returns every maximal combination of `stock`, without notifications.
pub fn find_combinations(stock: &BarStock, mode: SearchMode) -> Solutions {
    enumerate(stock, mode, None).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn stock(lengths: &[u64], limit: u64) -> BarStock {
        BarStock::new(lengths.to_vec(), limit).unwrap()
    }

    fn counts_of(solutions: &Solutions) -> Vec<Vec<u64>> {
        solutions.iter().map(|r| r.counts.clone()).collect()
    }

    // Every record fits the limit, accounts for the whole limit and cannot take another bar.
    fn assert_invariants(stock: &BarStock, solutions: &Solutions) {
        for r in solutions {
            let total: u64 = r
                .counts
                .iter()
                .zip(stock.lengths())
                .map(|(c, l)| c * l)
                .sum();
            assert_eq!(r.total, total, "{} has a wrong total", r);
            assert!(r.total <= stock.limit());
            assert!(r.total > 0);
            assert_eq!(r.total + r.waste, stock.limit());
            for &l in stock.lengths() {
                assert!(r.total + l > stock.limit(), "{} could still take {}", r, l);
            }
        }
    }

    #[test]
    fn test_reference_stock() {
        let s = stock(&[50, 60, 80], 150);
        let solutions = find_combinations(&s, SearchMode::Exhaustive);

        assert_eq!(
            counts_of(&solutions),
            vec![
                vec![3, 0, 0],
                vec![1, 1, 0],
                vec![1, 0, 1],
                vec![0, 2, 0],
                vec![0, 1, 1],
            ]
        );
        let tuples: Vec<(u64, u64)> = solutions.iter().map(|r| (r.total, r.waste)).collect();
        assert_eq!(tuples, vec![(150, 0), (110, 40), (130, 20), (120, 30), (140, 10)]);
        assert_invariants(&s, &solutions);
    }

    #[test]
    fn test_each_record_notified_once() {
        let s = stock(&[50, 60, 80], 150);
        let (sender, receiver) = unbounded();

        let (solutions, stats) = Enumerator::new(&s).with_notifier(sender).run();
        let notified: Vec<SolutionRecord> = receiver.try_iter().collect();

        // Three terminals are re-derived through another addition order
        assert_eq!(stats.terminals, 8);
        assert_eq!(stats.duplicates, 3);
        assert_eq!(notified.len(), solutions.len());
        assert_eq!(notified, solutions.into_records());
    }

    #[test]
    fn test_invariants_hold_on_several_stocks() {
        let stocks = [
            stock(&[50, 60, 80], 150),
            stock(&[3, 5, 7], 20),
            stock(&[40, 25], 100),
            stock(&[50, 50], 150),
            stock(&[7], 100),
        ];
        for s in &stocks {
            let solutions = find_combinations(s, SearchMode::Exhaustive);
            assert!(!solutions.is_empty(), "{} found nothing", s);
            assert_invariants(s, &solutions);
        }
    }

    #[test]
    fn test_single_length() {
        let s = stock(&[10], 35);
        let solutions = find_combinations(&s, SearchMode::Exhaustive);
        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions.iter().next(),
            Some(&SolutionRecord::new(vec![3], 30, 35))
        );
    }

    #[test]
    fn test_duplicate_lengths_are_distinct_positions() {
        let s = stock(&[50, 50], 150);
        let solutions = find_combinations(&s, SearchMode::Exhaustive);
        assert_eq!(
            counts_of(&solutions),
            vec![vec![3, 0], vec![2, 1], vec![1, 2], vec![0, 3]]
        );
    }

    #[test]
    fn test_degenerate_inputs_yield_nothing() {
        for s in [stock(&[50, 60, 80], 0), stock(&[], 150), stock(&[50, 60], 40)] {
            for mode in [SearchMode::Exhaustive, SearchMode::Canonical] {
                let (solutions, _) = enumerate(&s, mode, None);
                assert!(solutions.is_empty(), "{} in {:?} mode", s, mode);
            }
        }
    }

    #[test]
    fn test_modes_find_the_same_set() {
        let stocks = [
            stock(&[50, 60, 80], 150),
            stock(&[3, 5, 7], 20),
            stock(&[80, 60, 50], 150),
            stock(&[4, 6, 9, 11], 30),
        ];
        for s in &stocks {
            let exhaustive = find_combinations(s, SearchMode::Exhaustive);
            let canonical = find_combinations(s, SearchMode::Canonical);
            assert_eq!(exhaustive, canonical, "modes disagree on {}", s);
            assert_eq!(exhaustive.len(), canonical.len());
        }
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let s = stock(&[3, 5, 7], 20);
        let first = find_combinations(&s, SearchMode::Exhaustive);
        let second = find_combinations(&s, SearchMode::Exhaustive);
        assert_eq!(first, second);
        assert_eq!(counts_of(&first), counts_of(&second));
    }
}
