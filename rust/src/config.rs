//! Configuration types for the scheduling grid.
//!
//! All configuration is passed explicitly into the engine; nothing is read from
//! ambient state.

use chrono::Weekday;
use std::time::Duration;

use crate::error::{GridError, GridResult};
use crate::models::ZoomLevel;

/// Controls the length and alignment of the visible date window.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    /// Number of consecutive days shown in day view, starting at the anchor
    pub day_view_days: u32,
    /// Number of whole weeks shown in week view
    pub week_view_weeks: u32,
    /// First day of the week for week-view alignment
    pub week_start: Weekday,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            day_view_days: 28,
            week_view_weeks: 6,
            week_start: Weekday::Mon,
        }
    }
}

/// Fixed-size tooltip box kept inside the grid's client rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipBox {
    pub width: f64,
    pub height: f64,
}

/// Pixel geometry of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridGeometry {
    /// Height of one sub-row in pixels
    pub row_height_px: f64,
    /// Width of one day column in day view
    pub day_col_width_px: f64,
    /// Width of one day column in week view
    pub week_col_width_px: f64,
    /// Width of one day column in month view
    pub month_col_width_px: f64,
    /// Tooltip size used for nudging; `None` passes coordinates through unchanged
    pub tooltip: Option<TooltipBox>,
}

impl GridGeometry {
    /// Per-day column width for a zoom level.
    pub fn col_width(&self, zoom: ZoomLevel) -> f64 {
        match zoom {
            ZoomLevel::Day => self.day_col_width_px,
            ZoomLevel::Week => self.week_col_width_px,
            ZoomLevel::Month => self.month_col_width_px,
        }
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            row_height_px: 56.0,
            day_col_width_px: 50.0,
            week_col_width_px: 12.0,
            month_col_width_px: 30.0,
            tooltip: Some(TooltipBox {
                width: 200.0,
                height: 120.0,
            }),
        }
    }
}

/// Complete configuration bundle for the grid engine.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Capacity of a resource per day, in hours
    pub daily_capacity_hours: f64,
    /// Count taken hours on Saturday/Sunday in day view
    pub include_taken_hours_on_weekends_in_day_view: bool,
    /// Apply the weekend rule above to click/focus queries as well
    pub apply_weekend_policy_on_focus: bool,
    /// Produce hover results at all
    pub show_tooltip: bool,
    /// Maximum total sub-rows on one page
    pub rows_per_page: usize,
    /// Pack only assignments that intersect the visible window
    pub clip_to_window: bool,
    pub window: WindowConfig,
    pub geometry: GridGeometry,
    /// Quiet period before a buffered pointer move is hit-tested
    pub hover_quiescence: Duration,
    /// Quiet period before a search phrase is applied
    pub search_quiescence: Duration,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            daily_capacity_hours: 8.0,
            include_taken_hours_on_weekends_in_day_view: false,
            apply_weekend_policy_on_focus: false,
            show_tooltip: true,
            rows_per_page: 10,
            clip_to_window: true,
            window: WindowConfig::default(),
            geometry: GridGeometry::default(),
            hover_quiescence: Duration::from_millis(300),
            search_quiescence: Duration::from_millis(500),
            verbosity: 0,
        }
    }
}

impl GridConfig {
    /// Reject values the engine cannot lay out.
    pub fn validate(&self) -> GridResult<()> {
        if !(self.daily_capacity_hours >= 0.0) {
            return Err(GridError::InvalidConfig(format!(
                "daily_capacity_hours must be >= 0, got {}",
                self.daily_capacity_hours
            )));
        }
        if self.window.day_view_days == 0 {
            return Err(GridError::InvalidConfig(
                "day_view_days must be > 0".to_string(),
            ));
        }
        if self.window.week_view_weeks == 0 {
            return Err(GridError::InvalidConfig(
                "week_view_weeks must be > 0".to_string(),
            ));
        }
        let geometry = &self.geometry;
        if !(geometry.row_height_px > 0.0) {
            return Err(GridError::InvalidConfig(format!(
                "row_height_px must be > 0, got {}",
                geometry.row_height_px
            )));
        }
        for zoom in ZoomLevel::ALL {
            let width = geometry.col_width(zoom);
            if !(width > 0.0) {
                return Err(GridError::InvalidConfig(format!(
                    "{} column width must be > 0, got {}",
                    zoom, width
                )));
            }
        }
        if let Some(tooltip) = geometry.tooltip {
            if !(tooltip.width >= 0.0 && tooltip.height >= 0.0) {
                return Err(GridError::InvalidConfig(
                    "tooltip dimensions must be >= 0".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// True if weekend cells in this zoom have their taken hours forced to zero.
    pub fn zeroes_weekends(&self, zoom: ZoomLevel) -> bool {
        zoom == ZoomLevel::Day && !self.include_taken_hours_on_weekends_in_day_view
    }
}
