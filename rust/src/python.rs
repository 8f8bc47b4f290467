//! Python bindings for the grid engine (feature `python`).

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::WindowConfig;
use crate::date_window;
use crate::error::GridError;
use crate::models::{Assignment, DispositionSummary, ZoomLevel};
use crate::packer;
use crate::paginator::page_spans;

fn to_py_err(err: GridError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Compute the visible days for an anchor date and zoom level.
///
/// # Arguments
/// * `anchor` - Anchor date
/// * `zoom` - "day", "week" or "month"
/// * `day_view_days` - Window length in day view
/// * `week_view_weeks` - Window length in week view, in weeks
///
/// # Raises
/// * ValueError on an unknown zoom level or out-of-range date
#[pyfunction]
#[pyo3(signature = (anchor, zoom, day_view_days=28, week_view_weeks=6))]
fn compute_window(
    anchor: NaiveDate,
    zoom: &str,
    day_view_days: u32,
    week_view_weeks: u32,
) -> PyResult<Vec<NaiveDate>> {
    let zoom: ZoomLevel = zoom.parse().map_err(to_py_err)?;
    let config = WindowConfig {
        day_view_days,
        week_view_weeks,
        ..Default::default()
    };
    let window = date_window::compute_window(anchor, zoom, &config).map_err(to_py_err)?;
    Ok(window.days().to_vec())
}

/// Pack inclusive (start, end) ranges onto sub-rows.
///
/// # Returns
/// * (sub_row per range, row_count)
///
/// # Raises
/// * ValueError if any range ends before it starts
#[pyfunction]
fn pack_assignments(ranges: Vec<(NaiveDate, NaiveDate)>) -> PyResult<(Vec<usize>, usize)> {
    let assignments = ranges
        .into_iter()
        .enumerate()
        .map(|(i, (start, end))| Assignment::new(i.to_string(), String::new(), start, end, 0.0))
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_py_err)?;
    let packing = packer::pack(&assignments);
    Ok((packing.sub_rows, packing.row_count))
}

/// Split per-resource row counts into pages of at most `row_budget` rows.
///
/// # Returns
/// * List of (start, end, rows) with `end` exclusive
#[pyfunction]
fn paginate_rows(row_counts: Vec<usize>, row_budget: usize) -> Vec<(usize, usize, usize)> {
    page_spans(row_counts, row_budget)
        .into_iter()
        .map(|span| (span.start, span.end, span.rows))
        .collect()
}

/// Taken/free/overtime hours for a cell.
#[pyfunction]
fn disposition(taken: f64, daily_capacity: f64) -> (f64, f64, f64) {
    let summary = DispositionSummary::from_taken(taken, daily_capacity);
    (summary.taken, summary.free, summary.overtime)
}

/// The resource_grid.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_window, m)?)?;
    m.add_function(wrap_pyfunction!(pack_assignments, m)?)?;
    m.add_function(wrap_pyfunction!(paginate_rows, m)?)?;
    m.add_function(wrap_pyfunction!(disposition, m)?)?;
    Ok(())
}
