/// Which (row, day-column) slots are already covered by a merged cell above.
///
/// Owned by a single grid walk; never shared between parses.
#[derive(Debug)]
pub struct Occupancy {
    columns: usize,
    slots: Vec<bool>,
}

impl Occupancy {
    pub fn new(rows: usize, columns: usize) -> Self {
        Occupancy {
            columns,
            slots: vec![false; rows * columns],
        }
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if column >= self.columns {
            return None;
        }
        let index = row * self.columns + column;
        (index < self.slots.len()).then_some(index)
    }

    /// Out-of-range slots are ignored.
    pub fn mark(&mut self, row: usize, column: usize) {
        if let Some(i) = self.index(row, column) {
            self.slots[i] = true;
        }
    }

    pub fn is_occupied(&self, row: usize, column: usize) -> bool {
        self.index(row, column).is_some_and(|i| self.slots[i])
    }

    /// Rows marked occupied in `column`, top to bottom.
    pub fn occupied_rows(&self, column: usize) -> Vec<usize> {
        let rows = if self.columns == 0 {
            0
        } else {
            self.slots.len() / self.columns
        };
        (0..rows).filter(|&r| self.is_occupied(r, column)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_query() {
        let mut occupancy = Occupancy::new(4, 7);
        occupancy.mark(2, 3);

        assert!(occupancy.is_occupied(2, 3));
        assert!(!occupancy.is_occupied(2, 4));
        assert!(!occupancy.is_occupied(3, 3));
        assert_eq!(occupancy.occupied_rows(3), vec![2]);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut occupancy = Occupancy::new(2, 7);
        occupancy.mark(5, 0);
        occupancy.mark(0, 9);

        assert!(!occupancy.is_occupied(5, 0));
        assert!(!occupancy.is_occupied(0, 9));
        assert!(occupancy.occupied_rows(0).is_empty());
    }
}
