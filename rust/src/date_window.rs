//! Visible date window generation.
//!
//! A window is an ordered, contiguous run of days whose length and alignment
//! depend on the zoom level:
//! - day: `day_view_days` consecutive days starting at the anchor
//! - week: `week_view_weeks` whole weeks starting on the week containing the anchor
//! - month: the calendar month containing the anchor, unpadded

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::config::WindowConfig;
use crate::error::{GridError, GridResult};
use crate::models::{Day, ZoomLevel};

/// First and last day of a window, reported to range-change listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatesRange {
    pub start: Day,
    pub end: Day,
}

/// Ordered, contiguous sequence of visible days.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateWindow {
    zoom: ZoomLevel,
    days: Vec<Day>,
}

impl DateWindow {
    /// A zero-length window; every lookup against it misses.
    pub fn empty(zoom: ZoomLevel) -> Self {
        Self {
            zoom,
            days: Vec::new(),
        }
    }

    fn contiguous(zoom: ZoomLevel, first: Day, len: usize) -> Self {
        Self {
            zoom,
            days: first.iter_days().take(len).collect(),
        }
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first(&self) -> Option<Day> {
        self.days.first().copied()
    }

    pub fn last(&self) -> Option<Day> {
        self.days.last().copied()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Day> {
        self.days.get(index).copied()
    }

    /// Column index of a day. O(1) since the window is contiguous.
    pub fn index_of(&self, day: Day) -> Option<usize> {
        let first = self.first()?;
        let offset = (day - first).num_days();
        if offset < 0 || offset as usize >= self.days.len() {
            return None;
        }
        Some(offset as usize)
    }

    pub fn contains(&self, day: Day) -> bool {
        self.index_of(day).is_some()
    }

    pub fn range(&self) -> Option<DatesRange> {
        Some(DatesRange {
            start: self.first()?,
            end: self.last()?,
        })
    }
}

pub fn is_weekend(day: Day) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

fn add_days(day: Day, n: u64) -> GridResult<Day> {
    day.checked_add_days(Days::new(n))
        .ok_or(GridError::DateOutOfRange(day))
}

fn sub_days(day: Day, n: u64) -> GridResult<Day> {
    day.checked_sub_days(Days::new(n))
        .ok_or(GridError::DateOutOfRange(day))
}

/// Start of the week containing `day`.
pub fn week_start_of(day: Day, week_start: Weekday) -> GridResult<Day> {
    let offset = (day.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;
    sub_days(day, offset as u64)
}

/// First and last day of the calendar month containing `day`.
pub fn month_bounds(day: Day) -> GridResult<(Day, Day)> {
    let first = NaiveDate::from_ymd_opt(day.year(), day.month(), 1)
        .ok_or(GridError::DateOutOfRange(day))?;
    let next_first = first
        .checked_add_months(Months::new(1))
        .ok_or(GridError::DateOutOfRange(day))?;
    Ok((first, sub_days(next_first, 1)?))
}

/// Compute the visible window for an anchor date and zoom level.
///
/// Pure: the same inputs always produce the same sequence.
pub fn compute_window(
    anchor: Day,
    zoom: ZoomLevel,
    config: &WindowConfig,
) -> GridResult<DateWindow> {
    match zoom {
        ZoomLevel::Day => {
            let len = config.day_view_days as usize;
            if len > 0 {
                add_days(anchor, len as u64 - 1)?;
            }
            Ok(DateWindow::contiguous(zoom, anchor, len))
        }
        ZoomLevel::Week => {
            let first = week_start_of(anchor, config.week_start)?;
            let len = config.week_view_weeks as usize * 7;
            if len > 0 {
                add_days(first, len as u64 - 1)?;
            }
            Ok(DateWindow::contiguous(zoom, first, len))
        }
        ZoomLevel::Month => {
            let (first, last) = month_bounds(anchor)?;
            let len = (last - first).num_days() as usize + 1;
            Ok(DateWindow::contiguous(zoom, first, len))
        }
    }
}

/// Move an anchor one whole window forward or back.
///
/// Month view steps one calendar month, clamping the day of month
/// (e.g. Jan 31 -> Feb 28).
pub fn shift_anchor(
    anchor: Day,
    zoom: ZoomLevel,
    config: &WindowConfig,
    forward: bool,
) -> GridResult<Day> {
    match zoom {
        ZoomLevel::Day => {
            let step = config.day_view_days as u64;
            if forward {
                add_days(anchor, step)
            } else {
                sub_days(anchor, step)
            }
        }
        ZoomLevel::Week => {
            let step = config.week_view_weeks as u64 * 7;
            if forward {
                add_days(anchor, step)
            } else {
                sub_days(anchor, step)
            }
        }
        ZoomLevel::Month => {
            let shifted = if forward {
                anchor.checked_add_months(Months::new(1))
            } else {
                anchor.checked_sub_months(Months::new(1))
            };
            shifted.ok_or(GridError::DateOutOfRange(anchor))
        }
    }
}
