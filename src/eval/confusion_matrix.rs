use std::fmt;

use serde::{Serialize, Deserialize};

/// Counts of actual (row) versus predicted (column) classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    pub fn new(labels: Vec<String>) -> ConfusionMatrix {
        let n = labels.len();
        ConfusionMatrix { labels, counts: vec![vec![0; n]; n] }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn class_count(&self) -> usize {
        self.labels.len()
    }

    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual][predicted]
    }

    pub fn increment(&mut self, actual: usize, predicted: usize) {
        self.counts[actual][predicted] += 1;
    }

    pub fn clear(&mut self) {
        for row in self.counts.iter_mut() {
            row.iter_mut().for_each(|c| *c = 0);
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn true_positive(&self, class: usize) -> usize {
        self.counts[class][class]
    }

    /// Rows of other classes predicted as `class`.
    pub fn false_positive(&self, class: usize) -> usize {
        self.counts.iter().map(|row| row[class]).sum::<usize>() - self.true_positive(class)
    }

    /// Rows of `class` predicted as something else.
    pub fn false_negative(&self, class: usize) -> usize {
        self.counts[class].iter().sum::<usize>() - self.true_positive(class)
    }

    pub fn true_negative(&self, class: usize) -> usize {
        self.total() - self.true_positive(class) - self.false_positive(class) - self.false_negative(class)
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.labels.iter().map(String::len)
            .chain(self.counts.iter().flatten().map(|c| c.to_string().len()))
            .max()
            .unwrap_or(1)
            + 1;

        write!(f, "{:>width$}", "", width = width)?;
        for label in &self.labels {
            write!(f, "{:>width$}", label, width = width)?;
        }
        writeln!(f)?;
        for (label, row) in self.labels.iter().zip(&self.counts) {
            write!(f, "{:>width$}", label, width = width)?;
            for count in row {
                write!(f, "{:>width$}", count, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_class() -> ConfusionMatrix {
        let mut cm = ConfusionMatrix::new(vec!["a".into(), "b".into(), "c".into()]);
        // actual a: 3 right, 1 as b; actual b: 2 right, 1 as c; actual c: 1 right, 2 as a
        for _ in 0..3 { cm.increment(0, 0); }
        cm.increment(0, 1);
        for _ in 0..2 { cm.increment(1, 1); }
        cm.increment(1, 2);
        cm.increment(2, 2);
        for _ in 0..2 { cm.increment(2, 0); }
        cm
    }

    #[test]
    fn per_class_counts() {
        let cm = three_class();
        assert_eq!(cm.total(), 10);
        assert_eq!(cm.true_positive(0), 3);
        assert_eq!(cm.false_positive(0), 2);
        assert_eq!(cm.false_negative(0), 1);
        assert_eq!(cm.true_negative(0), 4);
        assert_eq!(cm.false_positive(2), 1);
    }

    #[test]
    fn display_has_header_and_one_line_per_class() {
        let text = three_class().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(lines[3].split_whitespace().collect::<Vec<_>>(), vec!["c", "2", "0", "1"]);
    }
}
