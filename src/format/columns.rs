//! Column alignment state.
//!
//! Consecutive lines share width cells: growing a cell from any line widens the column for every
//! line in the run. Cells live in an arena and rows refer to them by index, so a run of rows can
//! share a cell without shared mutable references.

use std::collections::HashMap;

/// Widths of aligned columns, keyed by source line.
#[derive(Debug, Default)]
pub struct ColumnWidths {
    cells: Vec<usize>,
    rows: HashMap<usize, Vec<usize>>,
}

impl ColumnWidths {
    /// Measure the columns of `nodes`.
    ///
    /// `columns` yields the column texts of a node on `line`, or `None` for nodes that take no
    /// part in alignment. Every column but the last of the neighbouring row is shared; the
    /// neighbour is a row already on the same line, otherwise the row on the line above.
    pub fn measure<'n, T: 'n>(
        nodes: impl IntoIterator<Item = &'n T>,
        columns: impl Fn(&'n T) -> Option<(usize, Vec<String>)>,
    ) -> Self {
        let mut widths = Self::default();

        for node in nodes {
            let Some((line, values)) = columns(node) else {
                continue;
            };
            if values.is_empty() {
                continue;
            }

            let neighbour = widths
                .rows
                .get(&line)
                .or_else(|| line.checked_sub(1).and_then(|above| widths.rows.get(&above)))
                .cloned()
                .unwrap_or_default();

            let mut row = Vec::with_capacity(values.len());
            for (i, value) in values.iter().enumerate() {
                let width = value.chars().count() + 1;
                if i + 1 < neighbour.len() {
                    let cell = neighbour[i];
                    widths.cells[cell] = widths.cells[cell].max(width);
                    row.push(cell);
                } else {
                    widths.cells.push(width);
                    row.push(widths.cells.len() - 1);
                }
            }
            widths.rows.insert(line, row);
        }

        widths
    }

    /// Column widths of the row on `line`.
    pub fn row(&self, line: usize) -> Vec<usize> {
        self.rows
            .get(&line)
            .map(|row| row.iter().map(|&cell| self.cells[cell]).collect())
            .unwrap_or_default()
    }
}

/// Columns at which trailing comments start, keyed by source line.
#[derive(Debug, Default)]
pub struct CommentColumns {
    cells: Vec<usize>,
    lines: HashMap<usize, usize>,
}

impl CommentColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column already recorded for `line`.
    pub fn get(&self, line: usize) -> Option<usize> {
        self.lines.get(&line).map(|&cell| self.cells[cell])
    }

    /// Record the column of a comment on `line` that starts at `line_len`, returning the column
    /// it should be padded to.
    ///
    /// A comment continues the run of the line above unless that line's column is within the
    /// indentation (`<= level`), in which case it starts a new run. A comment alone on its line
    /// is never padded and also starts a new run.
    pub fn place(&mut self, line: usize, level: usize, line_len: usize) -> usize {
        if let Some(column) = self.get(line) {
            return column;
        }

        if line_len <= level {
            self.cells.push(line_len);
            self.lines.insert(line, self.cells.len() - 1);
            return line_len;
        }

        let above = line
            .checked_sub(1)
            .and_then(|above| self.lines.get(&above).copied());

        let cell = match above {
            Some(cell) if self.cells[cell] > level => {
                self.cells[cell] = self.cells[cell].max(line_len);
                cell
            }
            _ => {
                self.cells.push(line_len);
                self.cells.len() - 1
            }
        };

        self.lines.insert(line, cell);
        self.cells[cell]
    }

    /// Start a fresh run at `line`, used after a statement that spans lines.
    pub fn reset(&mut self, line: usize) {
        self.cells.push(0);
        self.lines.insert(line, self.cells.len() - 1);
    }
}
