use std::io::{self, Write};

use crate::record::{SolutionRecord, Solutions};
use crate::stock::BarStock;

/// Describes a solution in words, one phrase per bar length, zero counts included.
pub fn describe(record: &SolutionRecord, stock: &BarStock) -> String {
    debug_assert_eq!(record.counts.len(), stock.len());

    let parts: Vec<String> = record
        .counts
        .iter()
        .zip(stock.lengths())
        .map(|(count, length)| format!("{} bars of {} meters", count, length))
        .collect();

    format!(
        "{} | total = {} meters | waste = {} meters",
        parts.join(" + "),
        record.total,
        record.waste
    )
}

/// Writes the description of every solution, each preceded by an empty line.
pub fn report<W: Write>(solutions: &Solutions, stock: &BarStock, mut out: W) -> io::Result<()> {
    for record in solutions {
        writeln!(out)?;
        writeln!(out, "{}", describe(record, stock))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchMode, find_combinations};

    #[test]
    fn test_describe() {
        let stock = BarStock::new(vec![50, 60, 80], 150).unwrap();
        let record = SolutionRecord::new(vec![1, 0, 1], 130, 150);
        assert_eq!(
            describe(&record, &stock),
            "1 bars of 50 meters + 0 bars of 60 meters + 1 bars of 80 meters | total = 130 meters | waste = 20 meters"
        );
    }

    #[test]
    fn test_report() {
        let stock = BarStock::new(vec![10], 35).unwrap();
        let solutions = find_combinations(&stock, SearchMode::Exhaustive);

        let mut buf = Vec::new();
        report(&solutions, &stock, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "\n3 bars of 10 meters | total = 30 meters | waste = 5 meters\n");
    }

    #[test]
    fn test_report_empty() {
        let stock = BarStock::new(vec![], 35).unwrap();
        let solutions = find_combinations(&stock, SearchMode::Exhaustive);

        let mut buf = Vec::new();
        report(&solutions, &stock, &mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
