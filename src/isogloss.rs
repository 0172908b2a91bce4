/*!
Isoglosses: boundaries between neighboring communities that differ in the
feature.

The reference scan compares every cell with its right and its lower
neighbor and does not wrap around the edges, even though the diffusion
process lives on a torus. The wrap-around pairs can be added with
[`IsoglossScan::Periodic`]; the default keeps the open scan.
*/
use crate::grid::Grid;
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum IsoglossScan {
    /// Only pairs that are adjacent without wrapping: 2·N·(N−1) slots.
    Open,
    /// Also the pairs across the edges of the torus: 2·N² slots.
    Periodic,
}

impl Default for IsoglossScan {
    fn default() -> Self {
        IsoglossScan::Open
    }
}

impl IsoglossScan {
    /// The number of neighbor pairs that could carry an isogloss.
    pub fn slots(self, size: usize) -> usize {
        match self {
            IsoglossScan::Open => 2 * size * size.saturating_sub(1),
            IsoglossScan::Periodic => 2 * size * size,
        }
    }
}

/// The isoglosses found in one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Isoglosses {
    pub count: usize,
    /// Where each boundary sits, as (column, row) in cell units, for
    /// drawing on top of the grid.
    pub midpoints: Vec<(f64, f64)>,
}

/**
Find all isoglosses of a grid.

Cells are visited row by row. For each cell the boundary to the right is
reported before the boundary below it. Cells in the last column only look
down, cells in the last row only look right, unless the periodic scan
makes them look across the edge.

```rust
use model::grid::Grid;
use model::isogloss::{boundaries, IsoglossScan};
let g = Grid::from_rows(&[vec![0, 1], vec![1, 0]]);
assert_eq!(boundaries(&g, IsoglossScan::Open).count, 4);
```
 */
pub fn boundaries(grid: &Grid, scan: IsoglossScan) -> Isoglosses {
    let n = grid.size();
    let mut count = 0;
    let mut midpoints = vec![];
    for row in 0..n {
        for column in 0..n {
            let here = grid.get(column, row);
            if column + 1 < n {
                if here != grid.get(column + 1, row) {
                    count += 1;
                    midpoints.push((column as f64 + 0.5, row as f64));
                }
            } else if scan == IsoglossScan::Periodic && here != grid.get(0, row) {
                count += 1;
                midpoints.push((n as f64 - 0.5, row as f64));
            }
            if row + 1 < n {
                if here != grid.get(column, row + 1) {
                    count += 1;
                    midpoints.push((column as f64, row as f64 + 0.5));
                }
            } else if scan == IsoglossScan::Periodic && here != grid.get(column, 0) {
                count += 1;
                midpoints.push((column as f64, n as f64 - 0.5));
            }
        }
    }
    Isoglosses { count, midpoints }
}

/// The fraction of neighbor pairs that are isoglosses. A grid without any
/// neighbor pairs (N = 1 with the open scan) has density 0.
pub fn density(grid: &Grid, scan: IsoglossScan) -> f64 {
    let slots = scan.slots(grid.size());
    if slots == 0 {
        return 0.;
    }
    boundaries(grid, scan).count as f64 / slots as f64
}
