//! Sub-row packing of overlapping assignments.
//!
//! Greedy interval-graph coloring: assignments are visited in (start, end,
//! insertion) order and placed on the lowest sub-row whose last occupant ended
//! strictly before the assignment starts. For interval graphs this uses exactly
//! as many sub-rows as the largest set of mutually overlapping assignments.

use crate::date_window::DateWindow;
use crate::models::{Assignment, Day, Resource};

/// Result of packing one resource's assignments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packing {
    /// Sub-row of each assignment, parallel to the input order
    pub sub_rows: Vec<usize>,
    /// Number of sub-rows opened (at least 1)
    pub row_count: usize,
}

/// A resource with its assignments laid out on sub-rows.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedResource {
    pub resource: Resource,
    /// Sub-row of each entry in `resource.assignments`
    pub sub_rows: Vec<usize>,
    pub row_count: usize,
}

impl PackedResource {
    /// Assignments paired with their sub-row.
    pub fn placed(&self) -> impl Iterator<Item = (&Assignment, usize)> {
        self.resource
            .assignments
            .iter()
            .zip(self.sub_rows.iter().copied())
    }
}

/// Assign sub-rows so that no two date-overlapping assignments share one.
pub fn pack(assignments: &[Assignment]) -> Packing {
    let mut order: Vec<usize> = (0..assignments.len()).collect();
    // Stable sort keeps insertion order as the final tie-break
    order.sort_by_key(|&i| (assignments[i].start(), assignments[i].end()));

    let mut row_ends: Vec<Day> = Vec::new();
    let mut sub_rows = vec![0; assignments.len()];

    for i in order {
        let assignment = &assignments[i];
        let row = match row_ends.iter().position(|end| *end < assignment.start()) {
            Some(row) => {
                row_ends[row] = assignment.end();
                row
            }
            None => {
                row_ends.push(assignment.end());
                row_ends.len() - 1
            }
        };
        sub_rows[i] = row;
    }

    Packing {
        sub_rows,
        row_count: row_ends.len().max(1),
    }
}

pub fn pack_resource(resource: Resource) -> PackedResource {
    let Packing {
        sub_rows,
        row_count,
    } = pack(&resource.assignments);
    PackedResource {
        resource,
        sub_rows,
        row_count,
    }
}

/// Pack a resource using only the assignments visible in `window`.
///
/// Assignments entirely outside the window are dropped first so that past or
/// future work does not inflate the visible row count.
pub fn pack_visible(resource: &Resource, window: &DateWindow) -> PackedResource {
    let visible = match (window.first(), window.last()) {
        (Some(first), Some(last)) => resource
            .assignments
            .iter()
            .filter(|a| a.overlaps(first, last))
            .cloned()
            .collect(),
        _ => Vec::new(),
    };
    pack_resource(Resource {
        label: resource.label.clone(),
        assignments: visible,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn a(id: &str, start: NaiveDate, end: NaiveDate) -> Assignment {
        Assignment::new(id, id, start, end, 4.0).unwrap()
    }

    /// Largest number of assignments covering a single day.
    fn max_overlap(assignments: &[Assignment]) -> usize {
        assignments
            .iter()
            .map(|x| assignments.iter().filter(|y| y.covers(x.start())).count())
            .max()
            .unwrap_or(0)
    }

    fn assert_no_shared_overlap(assignments: &[Assignment], packing: &Packing) {
        for i in 0..assignments.len() {
            for j in (i + 1)..assignments.len() {
                if packing.sub_rows[i] == packing.sub_rows[j] {
                    assert!(
                        !assignments[i].overlaps(assignments[j].start(), assignments[j].end()),
                        "{} and {} overlap on row {}",
                        assignments[i].id,
                        assignments[j].id,
                        packing.sub_rows[i]
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_has_one_row() {
        let packing = pack(&[]);
        assert_eq!(packing.row_count, 1);
        assert!(packing.sub_rows.is_empty());
    }

    #[test]
    fn test_two_overlapping_use_two_rows() {
        let assignments = vec![
            a("p1", d(2025, 1, 1), d(2025, 1, 3)),
            a("p2", d(2025, 1, 2), d(2025, 1, 5)),
        ];
        let packing = pack(&assignments);
        assert_eq!(packing.row_count, 2);
        assert_ne!(packing.sub_rows[0], packing.sub_rows[1]);
    }

    #[test]
    fn test_touching_ranges_need_separate_rows() {
        // Inclusive ranges: both cover Jan 3
        let assignments = vec![
            a("p1", d(2025, 1, 1), d(2025, 1, 3)),
            a("p2", d(2025, 1, 3), d(2025, 1, 5)),
        ];
        assert_eq!(pack(&assignments).row_count, 2);
    }

    #[test]
    fn test_adjacent_ranges_share_row() {
        let assignments = vec![
            a("p1", d(2025, 1, 1), d(2025, 1, 3)),
            a("p2", d(2025, 1, 4), d(2025, 1, 5)),
        ];
        let packing = pack(&assignments);
        assert_eq!(packing.row_count, 1);
        assert_eq!(packing.sub_rows, vec![0, 0]);
    }

    #[test]
    fn test_reuses_lowest_free_row() {
        let assignments = vec![
            a("long", d(2025, 1, 1), d(2025, 1, 20)),
            a("short", d(2025, 1, 2), d(2025, 1, 3)),
            a("third", d(2025, 1, 4), d(2025, 1, 6)),
        ];
        let packing = pack(&assignments);
        assert_eq!(packing.sub_rows, vec![0, 1, 1]);
        assert_eq!(packing.row_count, 2);
    }

    #[test]
    fn test_input_order_does_not_matter_for_rows() {
        let assignments = vec![
            a("late", d(2025, 1, 10), d(2025, 1, 12)),
            a("early", d(2025, 1, 1), d(2025, 1, 11)),
        ];
        let packing = pack(&assignments);
        // "early" sorts first and takes row 0
        assert_eq!(packing.sub_rows, vec![1, 0]);
    }

    #[test]
    fn test_identical_ranges_tie_break_on_insertion() {
        let assignments = vec![
            a("first", d(2025, 1, 1), d(2025, 1, 2)),
            a("second", d(2025, 1, 1), d(2025, 1, 2)),
            a("third", d(2025, 1, 1), d(2025, 1, 2)),
        ];
        assert_eq!(pack(&assignments).sub_rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_row_count_is_max_overlap() {
        let assignments = vec![
            a("a", d(2025, 1, 1), d(2025, 1, 10)),
            a("b", d(2025, 1, 5), d(2025, 1, 7)),
            a("c", d(2025, 1, 6), d(2025, 1, 15)),
            a("d", d(2025, 1, 8), d(2025, 1, 9)),
            a("e", d(2025, 1, 11), d(2025, 1, 12)),
            a("f", d(2025, 1, 16), d(2025, 1, 18)),
            a("g", d(2025, 1, 2), d(2025, 1, 3)),
        ];
        let packing = pack(&assignments);
        assert_no_shared_overlap(&assignments, &packing);
        assert_eq!(packing.row_count, max_overlap(&assignments));
        assert_eq!(packing.row_count, 3);
    }

    /// Minimal linear congruential generator so generated sets are reproducible.
    struct Lcg(u64);

    impl Lcg {
        fn below(&mut self, n: u64) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.0 >> 33) % n
        }
    }

    #[test]
    fn test_generated_sets_pack_minimally() {
        let mut rng = Lcg(0x5eed);
        for round in 0..500 {
            let count = rng.below(13) as usize;
            let assignments: Vec<Assignment> = (0..count)
                .map(|i| {
                    let start = 1 + rng.below(28) as u32;
                    let end = (start + rng.below(10) as u32).min(28);
                    a(&format!("{}-{}", round, i), d(2025, 2, start), d(2025, 2, end))
                })
                .collect();
            let packing = pack(&assignments);
            assert_eq!(packing.sub_rows.len(), count);
            assert_no_shared_overlap(&assignments, &packing);
            assert_eq!(
                packing.row_count,
                max_overlap(&assignments).max(1),
                "round {}",
                round
            );
        }
    }

    #[test]
    fn test_pack_is_deterministic() {
        let assignments = vec![
            a("a", d(2025, 1, 1), d(2025, 1, 10)),
            a("b", d(2025, 1, 1), d(2025, 1, 4)),
            a("c", d(2025, 1, 5), d(2025, 1, 9)),
        ];
        assert_eq!(pack(&assignments), pack(&assignments));
    }

    #[test]
    fn test_pack_visible_drops_outside_assignments() {
        let window = crate::date_window::compute_window(
            d(2025, 3, 1),
            crate::models::ZoomLevel::Month,
            &Default::default(),
        )
        .unwrap();
        let resource = Resource::new("r1", "Alice").with_assignments(vec![
            a("past", d(2025, 1, 1), d(2025, 2, 28)),
            a("visible", d(2025, 2, 20), d(2025, 3, 2)),
            a("past2", d(2025, 2, 1), d(2025, 2, 27)),
        ]);
        let packed = pack_visible(&resource, &window);
        assert_eq!(packed.resource.assignments.len(), 1);
        assert_eq!(packed.resource.assignments[0].id, "visible");
        assert_eq!(packed.row_count, 1);

        let full = pack_resource(resource);
        assert_eq!(full.row_count, 3);
    }
}
