//! Uniform bucket grid for neighbor queries.
//!
//! The grid is a disposable per-tick index: it is cleared and refilled from
//! current positions, then answers "what is near this point" with a 3x3
//! block of buckets. Results are a superset of true neighbors; callers do
//! their own distance test.

use glam::Vec2;

/// Offsets of the 3x3 bucket block around a query bucket.
const NEIGHBOR_OFFSETS: [(isize, isize); 9] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0), (0,  0), (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Fixed-size square buckets laid over `[0, width] x [0, height]`.
pub struct SpatialGrid<T> {
    /// Bucket side length.
    cell_size: f32,
    inv_cell_size: f32,
    cols: usize,
    rows: usize,
    /// Row-major bucket storage.
    buckets: Vec<Vec<T>>,
    len: usize,
}

impl<T: Copy> SpatialGrid<T> {
    /// Create an empty grid covering a world of the given size.
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cols,
            rows,
            buckets: (0..cols * rows).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    /// Bucket column/row for a position. Positions outside the world land in edge buckets.
    #[inline]
    fn bucket_coords(&self, position: Vec2) -> (usize, usize) {
        let gx = (position.x * self.inv_cell_size).floor() as i64;
        let gy = (position.y * self.inv_cell_size).floor() as i64;
        (
            gx.clamp(0, self.cols as i64 - 1) as usize,
            gy.clamp(0, self.rows as i64 - 1) as usize,
        )
    }

    /// Remove every item, keeping bucket allocations.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Insert an item at a position.
    #[inline]
    pub fn insert(&mut self, position: Vec2, item: T) {
        let (gx, gy) = self.bucket_coords(position);
        self.buckets[gy * self.cols + gx].push(item);
        self.len += 1;
    }

    /// Clear the grid and re-bucket all items.
    pub fn rebuild<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (Vec2, T)>,
    {
        self.clear();
        for (position, item) in items {
            self.insert(position, item);
        }
    }

    /// Every item in the 3x3 bucket block centered on `point`'s bucket.
    pub fn query_neighbors(&self, point: Vec2) -> Vec<T> {
        let (cx, cy) = self.bucket_coords(point);
        let mut result = Vec::with_capacity(16);
        for &(dx, dy) in &NEIGHBOR_OFFSETS {
            let (Some(gx), Some(gy)) = (cx.checked_add_signed(dx), cy.checked_add_signed(dy)) else {
                continue;
            };
            if gx >= self.cols || gy >= self.rows {
                continue;
            }
            result.extend_from_slice(&self.buckets[gy * self.cols + gx]);
        }
        result
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> std::fmt::Debug for SpatialGrid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialGrid")
            .field("items", &self.len)
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("cell_size", &self.cell_size)
            .finish()
    }
}
