//! Delimited text loading for data sets.
//!
//! Supported format:
//! - UTF-8, one row per line, any single delimiter string ("," or "\t" ...)
//! - a single-space delimiter matches runs of spaces and tabs
//! - optional header row holding column names
//! - blank lines are skipped; every other line must hold exactly
//!   `input_size + output_size` numeric cells, inputs first

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::data::dataset::{DataSet, DataSetRow};
use crate::error::{NnError, Result};

impl DataSet {
    /// Reads a delimited file; see [`DataSet::from_reader`].
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        input_size: usize,
        output_size: usize,
        delimiter: &str,
        has_header: bool,
    ) -> Result<DataSet> {
        let file = File::open(path.as_ref())?;
        let set = DataSet::from_reader(BufReader::new(file), input_size, output_size, delimiter, has_header)?;
        info!(
            path = %path.as_ref().display(),
            rows = set.len(),
            inputs = input_size,
            outputs = output_size,
            "data set loaded"
        );
        Ok(set)
    }

    /// Parses delimited rows from any buffered reader.
    ///
    /// Errors carry the 1-based line number of the offending line.
    pub fn from_reader<R: BufRead>(
        reader: R,
        input_size: usize,
        output_size: usize,
        delimiter: &str,
        has_header: bool,
    ) -> Result<DataSet> {
        let width = input_size + output_size;
        let mut set = DataSet::new(input_size, output_size);
        let mut header_pending = has_header;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let cells = split_cells(&line, delimiter);

            if header_pending {
                header_pending = false;
                set.set_column_names(cells.into_iter().map(str::to_string).collect());
                continue;
            }

            if cells.len() != width {
                return Err(NnError::RowWidth { line: line_no, expected: width, found: cells.len() });
            }

            let values = parse_floats(&cells, line_no)?;
            let (input, output) = values.split_at(input_size);
            set.add_row(DataSetRow::new(input.to_vec(), output.to_vec()))?;
        }

        if set.is_empty() {
            return Err(NnError::EmptyDataSet);
        }
        Ok(set)
    }
}

fn split_cells<'a>(line: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter == " " {
        line.split_whitespace().collect()
    } else {
        line.split(delimiter).map(str::trim).collect()
    }
}

fn parse_floats(cells: &[&str], line_no: usize) -> Result<Vec<f64>> {
    cells.iter()
        .map(|c| {
            c.parse::<f64>().map_err(|_| NnError::Parse { line: line_no, value: c.to_string() })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str, inputs: usize, outputs: usize, delimiter: &str, header: bool) -> Result<DataSet> {
        DataSet::from_reader(text.as_bytes(), inputs, outputs, delimiter, header)
    }

    #[test]
    fn comma_rows_without_header() {
        let set = load("108,392.5\n19,46.2\n\n13,15.7\n", 1, 1, ",", false).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.rows()[0], DataSetRow::new(vec![108.0], vec![392.5]));
        assert!(set.column_names().is_none());
    }

    #[test]
    fn tab_rows_with_header() {
        let text = "a\tb\tc1\tc2\n1.5\t2\t0\t1\n3\t4\t1\t0\n";
        let set = load(text, 2, 2, "\t", true).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.column_names().unwrap(), &["a", "b", "c1", "c2"]);
        assert_eq!(set.rows()[1].desired_output, vec![1.0, 0.0]);
    }

    #[test]
    fn space_delimiter_collapses_runs() {
        let set = load("1   2  3\n", 2, 1, " ", false).unwrap();
        assert_eq!(set.rows()[0].input, vec![1.0, 2.0]);
    }

    #[test]
    fn reports_line_of_bad_cell() {
        match load("1,2\n3,x\n", 1, 1, ",", false) {
            Err(NnError::Parse { line: 2, value }) => assert_eq!(value, "x"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reports_short_row() {
        match load("h1,h2,h3\n1,2,3\n4,5\n", 2, 1, ",", true) {
            Err(NnError::RowWidth { line: 3, expected: 3, found: 2 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn header_only_is_empty() {
        assert!(matches!(load("x,y\n", 1, 1, ",", true), Err(NnError::EmptyDataSet)));
    }
}
