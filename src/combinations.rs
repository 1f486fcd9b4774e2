use crossbeam_channel::Sender;
use tracing::debug;

use crate::record::{SolutionRecord, Solutions};
use crate::search::{SearchState, SearchStats};
use crate::stock::BarStock;

/// Generate the maximal repeated combinations of the bar lengths.
/// Bars are only added at or after the index of the last added bar, so each multiset of bars is
/// built in exactly one order. The solution set is the same as the exhaustive search's.
pub struct CanonicalCombinations<'a> {
    stock: &'a BarStock,
    sender: Option<Sender<SolutionRecord>>,
}

impl<'a> CanonicalCombinations<'a> {
    /// Constructor
    pub fn new(stock: &'a BarStock) -> Self {
        Self {
            stock,
            sender: None,
        }
    }

    pub fn with_notifier(mut self, sender: Sender<SolutionRecord>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Generate all maximal combinations
    pub fn run(&self) -> (Solutions, SearchStats) {
        let mut state = SearchState::new(self.stock.len());
        self.combine(0, 0, &mut state);

        let (solutions, stats) = state.finish();
        debug!(
            solutions = solutions.len(),
            nodes = stats.nodes,
            dead = stats.dead_branches,
            "canonical search finished"
        );
        (solutions, stats)
    }

    /// Recursive combination generation
    fn combine(&self, start: usize, total: u64, state: &mut SearchState) {
        state.stats.nodes += 1;

        // Prune
        if total > self.stock.limit() {
            state.stats.dead_branches += 1;
            return;
        }

        // Terminal case. Maximality is checked against every length, not only those from `start`.
        if !self.stock.can_extend(total) {
            if total > 0 {
                state.record_terminal(total, self.stock.limit(), self.sender.as_ref());
            }
            return;
        }

        // Recursive part
        let lengths = self.stock.lengths();
        for i in start..lengths.len() {
            state.counts[i] += 1;
            self.combine(i, total.saturating_add(lengths[i]), state);
            state.counts[i] -= 1;
        }
    }
}
