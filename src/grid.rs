use bitvec::prelude::*;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

/**
The state of all communities: an N×N matrix of binary feature values,
stored row by row as a bit vector. A set bit is a community *with* the
feature, a cleared bit one without it.

Indexing is direct, without any wrapping. An index outside [0, N) is a bug
in the caller and panics.
 */
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: BitVec,
}

impl Grid {
    /// A grid of the given size with the feature absent everywhere.
    pub fn new(size: usize) -> Grid {
        Grid {
            size,
            cells: bitvec![0; size * size],
        }
    }

    /// A grid with independent, uniformly distributed feature values: each
    /// cell draws a number from [0, 1) and has the feature if it is above ½.
    pub fn initialize<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Grid {
        let mut grid = Grid::new(size);
        for i in 0..size * size {
            grid.cells.set(i, rng.gen::<f64>() > 0.5);
        }
        grid
    }

    /// Build a grid from explicit rows of 0/1 values.
    ///
    /// Panics if the rows do not form a square or contain other values.
    pub fn from_rows(rows: &[Vec<u8>]) -> Grid {
        let size = rows.len();
        let mut grid = Grid::new(size);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "row {} has the wrong length", y);
            for (x, value) in row.iter().enumerate() {
                assert!(*value <= 1, "cell values are 0 or 1, found {}", value);
                grid.set(x, y, *value == 1);
            }
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.size && y < self.size,
            "cell ({}, {}) is outside a grid of size {}",
            x,
            y,
            self.size
        );
        y * self.size + x
    }

    /// The feature value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        let i = self.index(x, y);
        self.cells.set(i, value);
    }

    /// Number of communities with the feature.
    pub fn count_present(&self) -> usize {
        self.cells.count_ones()
    }

    /// Number of communities without the feature.
    pub fn count_absent(&self) -> usize {
        self.cells.count_zeros()
    }

    /// Iterate over rows, each as a bit slice of length N.
    pub fn rows(&self) -> impl Iterator<Item = &BitSlice> {
        self.cells.chunks(self.size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn initialization_is_fair() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut present = 0;
        let mut total = 0;
        for size in 1..12 {
            for _ in 0..200 {
                let g = Grid::initialize(size, &mut rng);
                assert_eq!(g.count_present() + g.count_absent(), size * size);
                present += g.count_present();
                total += size * size;
            }
        }
        let fraction = present as f64 / total as f64;
        assert!((fraction - 0.5).abs() < 0.01, "fraction {}", fraction);
    }

    #[test]
    fn get_and_set_address_column_then_row() {
        let mut g = Grid::new(3);
        g.set(2, 0, true);
        assert!(g.get(2, 0));
        assert!(!g.get(0, 2));
        assert_eq!(g.count_present(), 1);
        let rows: Vec<_> = g.rows().collect();
        assert!(rows[0][2]);
    }

    #[test]
    fn from_rows_matches_layout() {
        let g = Grid::from_rows(&[vec![0, 1], vec![1, 1]]);
        assert!(!g.get(0, 0));
        assert!(g.get(1, 0));
        assert!(g.get(0, 1));
        assert_eq!(g.count_absent(), 1);
    }

    #[test]
    #[should_panic]
    fn out_of_range_access_panics() {
        let g = Grid::new(4);
        g.get(4, 0);
    }
}
