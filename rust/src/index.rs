//! (resource, day) lookup of active assignments.
//!
//! Built once per snapshot and read-only afterwards. Cells are stored sparsely
//! since most (resource, day) pairs in a typical grid are empty.

use rustc_hash::FxHashMap;

use crate::date_window::DateWindow;
use crate::log_debug;
use crate::packer::PackedResource;

/// One assignment active in a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellEntry {
    /// Position in the resource's assignment list
    pub assignment_index: usize,
    pub sub_row: usize,
    pub hours: f64,
}

/// Lookup of active assignments per (resource index, day index).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellIndex {
    cells: FxHashMap<(usize, usize), Vec<CellEntry>>,
    resource_count: usize,
    day_count: usize,
}

impl CellIndex {
    pub fn resource_count(&self) -> usize {
        self.resource_count
    }

    pub fn day_count(&self) -> usize {
        self.day_count
    }

    /// Assignments active in a cell, in assignment order. Empty when out of range.
    pub fn cell(&self, resource_index: usize, day_index: usize) -> &[CellEntry] {
        self.cells
            .get(&(resource_index, day_index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of hours of all assignments active in a cell.
    pub fn taken_hours(&self, resource_index: usize, day_index: usize) -> f64 {
        self.cell(resource_index, day_index)
            .iter()
            .map(|entry| entry.hours)
            .sum()
    }

    pub fn is_free(&self, resource_index: usize, day_index: usize) -> bool {
        self.cell(resource_index, day_index).is_empty()
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

/// Bucket every assignment into each visible day it covers.
pub fn build_index(window: &DateWindow, resources: &[PackedResource]) -> CellIndex {
    build_index_with_verbosity(window, resources, 0)
}

pub fn build_index_with_verbosity(
    window: &DateWindow,
    resources: &[PackedResource],
    verbosity: u8,
) -> CellIndex {
    let mut index = CellIndex {
        cells: FxHashMap::default(),
        resource_count: resources.len(),
        day_count: window.len(),
    };
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return index;
    };

    for (resource_index, packed) in resources.iter().enumerate() {
        for (assignment_index, (assignment, sub_row)) in packed.placed().enumerate() {
            if !assignment.overlaps(first, last) {
                continue;
            }
            // Clip to the window; both ends are inside it after the overlap check
            let from = window.index_of(assignment.start().max(first)).unwrap_or(0);
            let to = window
                .index_of(assignment.end().min(last))
                .unwrap_or(window.len() - 1);
            for day_index in from..=to {
                index
                    .cells
                    .entry((resource_index, day_index))
                    .or_default()
                    .push(CellEntry {
                        assignment_index,
                        sub_row,
                        hours: assignment.hours_per_day,
                    });
            }
        }
    }

    log_debug!(
        verbosity,
        "index: {} resources x {} days, {} occupied cells",
        index.resource_count,
        index.day_count,
        index.cells.len()
    );
    index
}
