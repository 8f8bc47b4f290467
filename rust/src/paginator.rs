//! Row-budget pagination of packed resources.
//!
//! Pages are filled greedily in resource order while the running sub-row total
//! stays within the budget. A resource is never split across pages; one whose
//! own row count exceeds the budget sits alone on its page.

use crate::log_changes;
use crate::packer::PackedResource;

/// Boundaries of one page within the resource list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSpan {
    /// Index of the first resource on the page
    pub start: usize,
    /// One past the last resource on the page
    pub end: usize,
    /// Total sub-rows on the page
    pub rows: usize,
}

/// A contiguous slice of packed resources shown together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Page<'a> {
    pub resources: &'a [PackedResource],
    /// Summed sub-row count of `resources`
    pub rows: usize,
    /// Zero-based page index
    pub page_num: usize,
    pub pages_amount: usize,
}

impl<'a> Page<'a> {
    fn empty() -> Self {
        Self {
            resources: &[],
            rows: 0,
            page_num: 0,
            pages_amount: 0,
        }
    }

    /// One-based page number for display; 0 when there are no pages.
    pub fn display_page_num(&self) -> usize {
        if self.pages_amount == 0 {
            0
        } else {
            self.page_num + 1
        }
    }

    /// Sub-row count of each resource on the page.
    pub fn row_counts(&self) -> Vec<usize> {
        self.resources.iter().map(|r| r.row_count).collect()
    }
}

/// Split a sequence of row counts into page spans under `row_budget`.
pub fn page_spans<I>(row_counts: I, row_budget: usize) -> Vec<PageSpan>
where
    I: IntoIterator<Item = usize>,
{
    let mut spans = Vec::new();
    let mut current = PageSpan {
        start: 0,
        end: 0,
        rows: 0,
    };

    for (i, rows) in row_counts.into_iter().enumerate() {
        if current.end > current.start && current.rows + rows > row_budget {
            spans.push(current);
            current = PageSpan {
                start: i,
                end: i,
                rows: 0,
            };
        }
        current.end = i + 1;
        current.rows += rows;
    }

    if current.end > current.start {
        spans.push(current);
    }
    spans
}

/// Slice resources into pages whose summed row counts fit `row_budget`.
pub fn paginate(resources: &[PackedResource], row_budget: usize) -> Vec<Page<'_>> {
    let spans = page_spans(resources.iter().map(|r| r.row_count), row_budget);
    let pages_amount = spans.len();
    spans
        .into_iter()
        .enumerate()
        .map(|(page_num, span)| Page {
            resources: &resources[span.start..span.end],
            rows: span.rows,
            page_num,
            pages_amount,
        })
        .collect()
}

/// Page navigation state over an owned set of packed resources.
///
/// Navigation saturates at the first and last page.
#[derive(Clone, Debug)]
pub struct Paginator {
    resources: Vec<PackedResource>,
    spans: Vec<PageSpan>,
    row_budget: usize,
    current: usize,
    verbosity: u8,
}

impl Paginator {
    pub fn new(resources: Vec<PackedResource>, row_budget: usize) -> Self {
        let spans = page_spans(resources.iter().map(|r| r.row_count), row_budget);
        Self {
            resources,
            spans,
            row_budget,
            current: 0,
            verbosity: 0,
        }
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn row_budget(&self) -> usize {
        self.row_budget
    }

    pub fn pages_amount(&self) -> usize {
        self.spans.len()
    }

    pub fn current_page_num(&self) -> usize {
        self.current
    }

    pub fn resources(&self) -> &[PackedResource] {
        &self.resources
    }

    /// The active page.
    pub fn page(&self) -> Page<'_> {
        match self.spans.get(self.current) {
            Some(span) => Page {
                resources: &self.resources[span.start..span.end],
                rows: span.rows,
                page_num: self.current,
                pages_amount: self.spans.len(),
            },
            None => Page::empty(),
        }
    }

    pub fn next(&mut self) -> Page<'_> {
        if self.current + 1 < self.spans.len() {
            self.current += 1;
            log_changes!(self.verbosity, "page -> {}/{}", self.current + 1, self.spans.len());
        }
        self.page()
    }

    pub fn previous(&mut self) -> Page<'_> {
        if self.current > 0 {
            self.current -= 1;
            log_changes!(self.verbosity, "page -> {}/{}", self.current + 1, self.spans.len());
        }
        self.page()
    }

    pub fn reset(&mut self) -> Page<'_> {
        self.current = 0;
        self.page()
    }

    /// Replace the resource set, re-running pagination from scratch.
    ///
    /// The current page index is kept but clamped to the new page count.
    pub fn recompute(&mut self, resources: Vec<PackedResource>) -> Page<'_> {
        self.spans = page_spans(resources.iter().map(|r| r.row_count), self.row_budget);
        self.resources = resources;
        self.current = self.current.min(self.spans.len().saturating_sub(1));
        log_changes!(
            self.verbosity,
            "repaginated {} resources into {} pages (budget {})",
            self.resources.len(),
            self.spans.len(),
            self.row_budget
        );
        self.page()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Resource;

    fn packed(name: &str, row_count: usize) -> PackedResource {
        PackedResource {
            resource: Resource::new(name, name),
            sub_rows: Vec::new(),
            row_count,
        }
    }

    fn names(page: &Page<'_>) -> Vec<String> {
        page.resources
            .iter()
            .map(|r| r.resource.label.id.clone())
            .collect()
    }

    #[test]
    fn test_spans_fill_greedily() {
        let spans = page_spans(vec![2, 3, 4, 1, 5], 6);
        assert_eq!(
            spans,
            vec![
                PageSpan {
                    start: 0,
                    end: 2,
                    rows: 5
                },
                PageSpan {
                    start: 2,
                    end: 4,
                    rows: 5
                },
                PageSpan {
                    start: 4,
                    end: 5,
                    rows: 5
                },
            ]
        );
    }

    #[test]
    fn test_exact_budget_fits() {
        let spans = page_spans(vec![3, 3, 3], 6);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].rows, 6);
    }

    #[test]
    fn test_oversized_resource_alone() {
        let spans = page_spans(vec![1, 9, 1], 4);
        assert_eq!(spans.len(), 3);
        assert_eq!((spans[1].start, spans[1].end, spans[1].rows), (1, 2, 9));
    }

    #[test]
    fn test_zero_budget_one_per_page() {
        assert_eq!(page_spans(vec![1, 1, 1], 0).len(), 3);
    }

    #[test]
    fn test_empty_input_has_no_pages() {
        assert!(page_spans(Vec::new(), 5).is_empty());
        let paginator = Paginator::new(Vec::new(), 5);
        let page = paginator.page();
        assert_eq!(page.pages_amount, 0);
        assert!(page.resources.is_empty());
        assert_eq!(page.display_page_num(), 0);
    }

    #[test]
    fn test_pages_cover_input_in_order() {
        let resources: Vec<PackedResource> = (0..7)
            .map(|i| packed(&format!("r{}", i), 1 + i % 3))
            .collect();
        let pages = paginate(&resources, 4);
        let flattened: Vec<String> = pages.iter().flat_map(names).collect();
        let expected: Vec<String> = (0..7).map(|i| format!("r{}", i)).collect();
        assert_eq!(flattened, expected);
        for page in &pages {
            assert!(page.rows <= 4 || page.resources.len() == 1);
            assert_eq!(page.pages_amount, pages.len());
        }
    }

    #[test]
    fn test_navigation_saturates() {
        let mut paginator = Paginator::new(vec![packed("a", 2), packed("b", 2), packed("c", 2)], 2);
        assert_eq!(paginator.pages_amount(), 3);
        assert_eq!(paginator.previous().page_num, 0);
        assert_eq!(paginator.next().page_num, 1);
        assert_eq!(paginator.next().page_num, 2);
        let last = paginator.next();
        assert_eq!(last.page_num, 2);
        assert_eq!(last.display_page_num(), 3);
        assert_eq!(names(&last), vec!["c"]);
    }

    #[test]
    fn test_next_then_previous_round_trips() {
        let mut paginator = Paginator::new(vec![packed("a", 1), packed("b", 1)], 1);
        let before = paginator.current_page_num();
        paginator.next();
        paginator.previous();
        assert_eq!(paginator.current_page_num(), before);
    }

    #[test]
    fn test_reset_goes_to_first_page() {
        let mut paginator = Paginator::new(vec![packed("a", 1), packed("b", 1), packed("c", 1)], 1);
        paginator.next();
        paginator.next();
        assert_eq!(paginator.reset().page_num, 0);
    }

    #[test]
    fn test_recompute_clamps_current_page() {
        let mut paginator = Paginator::new(
            vec![packed("a", 1), packed("b", 1), packed("c", 1), packed("d", 1)],
            1,
        );
        paginator.next();
        paginator.next();
        paginator.next();
        assert_eq!(paginator.current_page_num(), 3);

        let page = paginator.recompute(vec![packed("a", 1), packed("b", 1)]);
        assert_eq!(page.page_num, 1);
        assert_eq!(page.pages_amount, 2);

        let page = paginator.recompute(Vec::new());
        assert_eq!(page.pages_amount, 0);
        assert_eq!(paginator.current_page_num(), 0);
    }
}
