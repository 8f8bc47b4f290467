//! Core data types for the scheduling grid.

use chrono::NaiveDate;
use std::fmt;

use crate::error::{GridError, GridResult};

/// A calendar date with no time-of-day component.
pub type Day = NaiveDate;

/// Granularity of the visible calendar window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ZoomLevel {
    #[default]
    Day,
    Week,
    Month,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 3] = [ZoomLevel::Day, ZoomLevel::Week, ZoomLevel::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ZoomLevel {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(Self::Day),
            "week" | "weeks" => Ok(Self::Week),
            "month" | "months" => Ok(Self::Month),
            other => Err(GridError::InvalidConfig(format!(
                "Unknown zoom level: {}",
                other
            ))),
        }
    }
}

/// A project assigned to a resource over an inclusive date range.
///
/// Construction rejects `start > end`, so every `Assignment` in the engine
/// covers at least one day. Hours must be finite and non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    /// Opaque id passed through to callers
    pub id: String,
    /// Display title passed through to callers
    pub title: String,
    start: Day,
    end: Day,
    /// Hours of capacity consumed on each covered day
    pub hours_per_day: f64,
}

impl Assignment {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: Day,
        end: Day,
        hours_per_day: f64,
    ) -> GridResult<Self> {
        let id = id.into();
        if start > end {
            return Err(GridError::InvertedRange { id, start, end });
        }
        if !hours_per_day.is_finite() || hours_per_day < 0.0 {
            return Err(GridError::InvalidHours {
                id,
                hours: hours_per_day,
            });
        }
        Ok(Self {
            id,
            title: title.into(),
            start,
            end,
            hours_per_day,
        })
    }

    pub fn start(&self) -> Day {
        self.start
    }

    pub fn end(&self) -> Day {
        self.end
    }

    #[inline]
    pub fn covers(&self, day: Day) -> bool {
        self.start <= day && day <= self.end
    }

    /// True if the inclusive ranges share at least one day.
    #[inline]
    pub fn overlaps(&self, start: Day, end: Day) -> bool {
        self.start <= end && start <= self.end
    }
}

/// Display label of a resource (e.g. a person).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ResourceLabel {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
}

/// A resource and its assignments in insertion order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Resource {
    pub label: ResourceLabel,
    pub assignments: Vec<Assignment>,
}

impl Resource {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            label: ResourceLabel {
                id: id.into(),
                title: title.into(),
                subtitle: None,
            },
            assignments: Vec::new(),
        }
    }

    pub fn with_assignments(mut self, assignments: Vec<Assignment>) -> Self {
        self.assignments = assignments;
        self
    }
}

/// Whole hours plus remaining minutes, as shown in the tooltip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct HoursMinutes {
    pub hours: u32,
    pub minutes: u32,
}

impl HoursMinutes {
    /// Split fractional hours; minutes round to nearest and carry into hours at 60.
    pub fn from_hours(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self::default();
        }
        let total_minutes = (value * 60.0).round() as u64;
        Self {
            hours: (total_minutes / 60) as u32,
            minutes: (total_minutes % 60) as u32,
        }
    }
}

/// Taken/free/overtime hours of a single (resource, day) cell.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DispositionSummary {
    pub taken: f64,
    pub free: f64,
    pub overtime: f64,
}

impl DispositionSummary {
    pub fn from_taken(taken: f64, daily_capacity: f64) -> Self {
        Self {
            taken,
            free: (daily_capacity - taken).max(0.0),
            overtime: (taken - daily_capacity).max(0.0),
        }
    }

    pub fn taken_hm(&self) -> HoursMinutes {
        HoursMinutes::from_hours(self.taken)
    }

    pub fn free_hm(&self) -> HoursMinutes {
        HoursMinutes::from_hours(self.free)
    }

    pub fn overtime_hm(&self) -> HoursMinutes {
        HoursMinutes::from_hours(self.overtime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_assignment_rejects_inverted_range() {
        let err = Assignment::new("p1", "Project", d(2025, 3, 5), d(2025, 3, 1), 4.0).unwrap_err();
        assert_eq!(
            err,
            GridError::InvertedRange {
                id: "p1".to_string(),
                start: d(2025, 3, 5),
                end: d(2025, 3, 1),
            }
        );
    }

    #[test]
    fn test_assignment_rejects_bad_hours() {
        let err = Assignment::new("p1", "Project", d(2025, 3, 1), d(2025, 3, 5), -4.0).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidHours {
                id: "p1".to_string(),
                hours: -4.0,
            }
        );
        for hours in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Assignment::new("p2", "Project", d(2025, 3, 1), d(2025, 3, 1), hours)
                .unwrap_err();
            assert!(matches!(err, GridError::InvalidHours { ref id, .. } if id == "p2"));
        }
        // Zero hours is a valid placeholder booking
        assert!(Assignment::new("p3", "Project", d(2025, 3, 1), d(2025, 3, 1), 0.0).is_ok());
    }

    #[test]
    fn test_single_day_assignment_covers_its_day() {
        let a = Assignment::new("p1", "Project", d(2025, 3, 5), d(2025, 3, 5), 4.0).unwrap();
        assert!(a.covers(d(2025, 3, 5)));
        assert!(!a.covers(d(2025, 3, 4)));
        assert!(!a.covers(d(2025, 3, 6)));
    }

    #[test]
    fn test_overlaps_is_inclusive() {
        let a = Assignment::new("p1", "Project", d(2025, 3, 1), d(2025, 3, 3), 4.0).unwrap();
        assert!(a.overlaps(d(2025, 3, 3), d(2025, 3, 9)));
        assert!(!a.overlaps(d(2025, 3, 4), d(2025, 3, 9)));
        assert!(a.overlaps(d(2025, 2, 1), d(2025, 3, 1)));
    }

    #[test]
    fn test_disposition_under_capacity() {
        let s = DispositionSummary::from_taken(6.0, 8.0);
        assert_eq!(s.free, 2.0);
        assert_eq!(s.overtime, 0.0);
    }

    #[test]
    fn test_disposition_over_capacity() {
        let s = DispositionSummary::from_taken(10.5, 8.0);
        assert_eq!(s.free, 0.0);
        assert_eq!(s.overtime, 2.5);
    }

    #[test]
    fn test_disposition_zero_taken() {
        let s = DispositionSummary::from_taken(0.0, 8.0);
        assert_eq!(s.free, 8.0);
        assert_eq!(s.overtime, 0.0);
    }

    #[test]
    fn test_hours_minutes_split() {
        assert_eq!(
            HoursMinutes::from_hours(2.5),
            HoursMinutes {
                hours: 2,
                minutes: 30
            }
        );
        // 59.7 minutes rounds up into the next hour
        assert_eq!(
            HoursMinutes::from_hours(1.995),
            HoursMinutes {
                hours: 2,
                minutes: 0
            }
        );
        assert_eq!(HoursMinutes::from_hours(-1.0), HoursMinutes::default());
    }

    #[test]
    fn test_zoom_parse() {
        assert_eq!("Week".parse::<ZoomLevel>().unwrap(), ZoomLevel::Week);
        assert_eq!("months".parse::<ZoomLevel>().unwrap(), ZoomLevel::Month);
        assert!("year".parse::<ZoomLevel>().is_err());
    }
}
