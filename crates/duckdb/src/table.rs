//! Plain-text table rendering for query output.

use std::fmt;

/// Column-aligned text table. All-numeric columns are right-aligned.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let w = cell.chars().count();
                match widths.get_mut(i) {
                    Some(cur) if *cur < w => *cur = w,
                    Some(_) => {}
                    None => widths.push(w),
                }
            }
        }
        widths
    }
}

fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.parse::<f64>().is_ok()
}

/// A column is right-aligned when it has rows and every cell is numeric.
fn numeric_columns(rows: &[Vec<String>], columns: usize) -> Vec<bool> {
    (0..columns)
        .map(|i| {
            !rows.is_empty()
                && rows
                    .iter()
                    .all(|row| row.get(i).map(|c| is_numeric(c)).unwrap_or(false))
        })
        .collect()
}

fn write_line(
    f: &mut fmt::Formatter<'_>,
    cells: &[String],
    widths: &[usize],
    right: &[bool],
) -> fmt::Result {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        if i > 0 {
            line.push_str("  ");
        }
        if right[i] {
            line.push_str(&format!("{:>width$}", cell, width = width));
        } else {
            line.push_str(&format!("{:<width$}", cell, width = width));
        }
    }
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for TextTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let right = numeric_columns(&self.rows, widths.len());
        write_line(f, &self.headers, &widths, &right)?;
        for row in &self.rows {
            write_line(f, row, &widths, &right)?;
        }
        Ok(())
    }
}
