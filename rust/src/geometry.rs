//! Pixel geometry: client-to-grid translation and row/column inversion.

/// A point in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Client-area origin of the grid, supplied by the pointer/geometry collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GridOrigin {
    pub left: f64,
    pub top: f64,
}

impl GridOrigin {
    /// Translate raw client coordinates into grid-local coordinates.
    pub fn to_local(&self, client: Point) -> Point {
        Point {
            x: client.x - self.left,
            y: client.y - self.top,
        }
    }
}

/// Column under `x`, or `None` when outside `[0, columns * col_width)`.
pub fn column_at(x: f64, col_width: f64, columns: usize) -> Option<usize> {
    if !x.is_finite() || x < 0.0 || !(col_width > 0.0) {
        return None;
    }
    let col = (x / col_width).floor() as usize;
    (col < columns).then_some(col)
}

/// Vertical layout of resources with variable sub-row counts.
///
/// Keeps cumulative sub-row counts so a y coordinate maps back to
/// (resource, sub-row) with a binary search.
#[derive(Clone, Debug, PartialEq)]
pub struct RowLayout {
    row_height: f64,
    /// cumulative[i] = sub-rows above resource i; last entry is the total
    cumulative: Vec<usize>,
}

impl RowLayout {
    pub fn new(row_counts: &[usize], row_height: f64) -> Self {
        let mut cumulative = Vec::with_capacity(row_counts.len() + 1);
        let mut total = 0;
        cumulative.push(0);
        for &rows in row_counts {
            total += rows;
            cumulative.push(total);
        }
        Self {
            row_height,
            cumulative,
        }
    }

    pub fn resource_count(&self) -> usize {
        self.cumulative.len() - 1
    }

    pub fn total_rows(&self) -> usize {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn total_height(&self) -> f64 {
        self.total_rows() as f64 * self.row_height
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Top edge of a resource's band in pixels.
    pub fn resource_top(&self, resource_index: usize) -> Option<f64> {
        if resource_index >= self.resource_count() {
            return None;
        }
        Some(self.cumulative[resource_index] as f64 * self.row_height)
    }

    /// Resource index and sub-row under `y`, or `None` outside the grid.
    pub fn locate(&self, y: f64) -> Option<(usize, usize)> {
        if !y.is_finite() || y < 0.0 || !(self.row_height > 0.0) {
            return None;
        }
        let row = (y / self.row_height).floor() as usize;
        if row >= self.total_rows() {
            return None;
        }
        let resource_index = self.cumulative.partition_point(|&c| c <= row) - 1;
        Some((resource_index, row - self.cumulative[resource_index]))
    }
}
