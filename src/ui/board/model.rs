//! Pure selection and navigation logic for the board view.
//!
//! Nothing here touches the terminal or the filesystem, which keeps the
//! column-edge and clamping rules unit-testable.

use crate::board::Board;
use crate::task::Task;

/// Cursor position on the column grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub column: usize,
    pub row: usize,
}

impl Selection {
    /// Keep the cursor inside the grid after any change to the task lists.
    pub fn clamp(&mut self, counts: &[usize]) {
        if counts.is_empty() {
            *self = Selection::default();
            return;
        }
        self.column = self.column.min(counts.len() - 1);
        let rows = counts[self.column];
        self.row = if rows == 0 { 0 } else { self.row.min(rows - 1) };
    }

    /// Switch columns, clamping at the edges.
    pub fn move_column(&mut self, delta: isize, counts: &[usize]) {
        if counts.is_empty() {
            return;
        }
        let last = counts.len() as isize - 1;
        self.column = (self.column as isize + delta).clamp(0, last) as usize;
        self.clamp(counts);
    }

    /// Move within the current column, clamping at the ends.
    pub fn move_row(&mut self, delta: isize, counts: &[usize]) {
        if counts.is_empty() {
            return;
        }
        self.clamp(counts);
        let rows = counts[self.column] as isize;
        if rows == 0 {
            self.row = 0;
            return;
        }
        self.row = (self.row as isize + delta).clamp(0, rows - 1) as usize;
    }
}

/// Column index a move request lands on, or `None` when no column exists in
/// that direction (moving right from the last column is a no-op, likewise
/// left from the first).
pub fn target_column(current: usize, delta: isize, column_count: usize) -> Option<usize> {
    let target = current as isize + delta;
    if target < 0 || target >= column_count as isize {
        return None;
    }
    Some(target as usize)
}

/// Re-query every configured column from the board, in display order.
///
/// The board pushes no change notifications; the view calls this after every
/// mutation it issues.
pub fn snapshot(board: &Board) -> Vec<Vec<Task>> {
    board
        .columns()
        .iter()
        .map(|column| {
            board
                .tasks_in_column(column)
                .into_iter()
                .cloned()
                .collect()
        })
        .collect()
}

/// Task under the cursor, if any.
pub fn selected_task<'a>(columns: &'a [Vec<Task>], selection: Selection) -> Option<&'a Task> {
    columns.get(selection.column)?.get(selection.row)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTS: [usize; 4] = [3, 0, 2, 1];

    #[test]
    fn clamp_pulls_cursor_back_inside() {
        let mut selection = Selection { column: 9, row: 9 };
        selection.clamp(&COUNTS);
        assert_eq!(selection, Selection { column: 3, row: 0 });
    }

    #[test]
    fn clamp_handles_empty_column() {
        let mut selection = Selection { column: 1, row: 5 };
        selection.clamp(&COUNTS);
        assert_eq!(selection.row, 0);
    }

    #[test]
    fn column_moves_stop_at_the_edges() {
        let mut selection = Selection::default();
        selection.move_column(-1, &COUNTS);
        assert_eq!(selection.column, 0);

        selection.move_column(10, &COUNTS);
        assert_eq!(selection.column, 3);
        selection.move_column(1, &COUNTS);
        assert_eq!(selection.column, 3);
    }

    #[test]
    fn row_moves_stop_at_the_ends() {
        let mut selection = Selection::default();
        selection.move_row(-1, &COUNTS);
        assert_eq!(selection.row, 0);
        selection.move_row(10, &COUNTS);
        assert_eq!(selection.row, 2);
    }

    #[test]
    fn switching_to_a_shorter_column_clamps_the_row() {
        let mut selection = Selection { column: 0, row: 2 };
        selection.move_column(2, &COUNTS);
        assert_eq!(selection, Selection { column: 2, row: 1 });
    }

    #[test]
    fn no_column_exists_past_the_last() {
        assert_eq!(target_column(3, 1, 4), None);
        assert_eq!(target_column(0, -1, 4), None);
        assert_eq!(target_column(1, 1, 4), Some(2));
        assert_eq!(target_column(1, -1, 4), Some(0));
    }
}
