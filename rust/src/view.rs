//! Scheduler view: the engine facade driven by discrete UI events.
//!
//! The view owns the raw resources and the caller-visible state (anchor, zoom,
//! search phrase, current page). Every change rebuilds an immutable
//! [`GridSnapshot`] from scratch; queries read only the current snapshot.
//!
//! Pointer moves and search input are coalesced with [`Coalescer`]s driven by
//! the caller's clock through [`SchedulerView::tick`]. A pointer leave cancels
//! the pending hover and clears the tooltip immediately. The raw search phrase
//! is recorded on input; only filtering waits for the quiet period.

use std::time::Instant;

use crate::coalesce::Coalescer;
use crate::config::GridConfig;
use crate::date_window::{compute_window, shift_anchor, DateWindow, DatesRange};
use crate::error::GridResult;
use crate::geometry::{GridOrigin, Point, RowLayout};
use crate::hit_test::{focus, hit_test, tile_at, FocusResult, HitContext, HitResult};
use crate::index::{build_index_with_verbosity, CellIndex};
use crate::log_changes;
use crate::models::{Assignment, Day, Resource, ResourceLabel, ZoomLevel};
use crate::packer::{pack_resource, pack_visible, PackedResource};
use crate::paginator::{Page, Paginator};

/// Case-insensitive substring match on resource titles, preserving order.
pub fn filter_resources(resources: &[Resource], phrase: &str) -> Vec<Resource> {
    let needle = phrase.to_lowercase();
    resources
        .iter()
        .filter(|r| r.label.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Immutable layout of the current page, replaced wholesale on recomputation.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSnapshot {
    pub window: DateWindow,
    /// Packed resources of the current page
    pub resources: Vec<PackedResource>,
    pub layout: RowLayout,
    pub index: CellIndex,
    /// Zero-based
    pub page_num: usize,
    pub pages_amount: usize,
}

impl GridSnapshot {
    pub fn build(window: DateWindow, page: &Page<'_>, config: &GridConfig) -> Self {
        let resources = page.resources.to_vec();
        let layout = RowLayout::new(&page.row_counts(), config.geometry.row_height_px);
        let index = build_index_with_verbosity(&window, &resources, config.verbosity);
        Self {
            window,
            resources,
            layout,
            index,
            page_num: page.page_num,
            pages_amount: page.pages_amount,
        }
    }

    pub fn context(&self) -> HitContext<'_> {
        HitContext {
            window: &self.window,
            layout: &self.layout,
            index: &self.index,
            resources: &self.resources,
        }
    }

    /// Total sub-rows on the page.
    pub fn total_rows(&self) -> usize {
        self.layout.total_rows()
    }
}

/// A click on a free day, ready for the day-click callback.
#[derive(Clone, Debug, PartialEq)]
pub struct DayClick {
    pub focus: FocusResult,
    /// One-based page number at the time of the click
    pub page_num: usize,
}

/// A click on an assignment tile, ready for the tile-click callback.
#[derive(Clone, Debug, PartialEq)]
pub struct TileClick {
    pub resource: ResourceLabel,
    pub assignment: Assignment,
    /// One-based page number at the time of the click
    pub page_num: usize,
}

/// Output of [`SchedulerView::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// Tooltip produced by a due hover, if any
    pub tooltip: Option<HitResult>,
    /// Search phrase applied by a due search input
    pub applied_search: Option<String>,
}

pub struct SchedulerView {
    config: GridConfig,
    data: Vec<Resource>,
    anchor: Day,
    zoom: ZoomLevel,
    /// Latest input, shown back to the search box
    search_phrase: String,
    /// Phrase the current snapshot is filtered by
    applied_search: String,
    origin: GridOrigin,
    paginator: Paginator,
    snapshot: GridSnapshot,
    tooltip: Option<HitResult>,
    hover: Coalescer<Point>,
    search: Coalescer<String>,
}

impl SchedulerView {
    pub fn new(
        data: Vec<Resource>,
        anchor: Day,
        zoom: ZoomLevel,
        config: GridConfig,
    ) -> GridResult<Self> {
        config.validate()?;
        let window = compute_window(anchor, zoom, &config.window)?;
        let paginator =
            Paginator::new(Vec::new(), config.rows_per_page).with_verbosity(config.verbosity);
        let snapshot = GridSnapshot::build(window, &paginator.page(), &config);
        let mut view = Self {
            hover: Coalescer::new(config.hover_quiescence),
            search: Coalescer::new(config.search_quiescence),
            config,
            data,
            anchor,
            zoom,
            search_phrase: String::new(),
            applied_search: String::new(),
            origin: GridOrigin::default(),
            paginator,
            snapshot,
            tooltip: None,
        };
        view.recompute()?;
        Ok(view)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn anchor(&self) -> Day {
        self.anchor
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn search_phrase(&self) -> &str {
        &self.search_phrase
    }

    /// Phrase the visible resources are currently filtered by.
    pub fn applied_search(&self) -> &str {
        &self.applied_search
    }

    pub fn snapshot(&self) -> &GridSnapshot {
        &self.snapshot
    }

    pub fn window(&self) -> &DateWindow {
        &self.snapshot.window
    }

    pub fn range(&self) -> Option<DatesRange> {
        self.snapshot.window.range()
    }

    pub fn page(&self) -> Page<'_> {
        self.paginator.page()
    }

    /// Zero-based.
    pub fn current_page_num(&self) -> usize {
        self.paginator.current_page_num()
    }

    pub fn pages_amount(&self) -> usize {
        self.paginator.pages_amount()
    }

    /// Visible tooltip, if any.
    pub fn tooltip(&self) -> Option<&HitResult> {
        self.tooltip.as_ref()
    }

    /// Grid origin in client coordinates, used to translate pointer events.
    pub fn set_origin(&mut self, origin: GridOrigin) {
        self.origin = origin;
    }

    /// Rebuild the window, packing, pagination and index from the current inputs.
    fn recompute(&mut self) -> GridResult<()> {
        self.recompute_at(self.anchor, self.zoom)
    }

    /// Recompute for a new anchor and zoom, committing them only once the
    /// window is known to exist. On error the view is left untouched.
    fn recompute_at(&mut self, anchor: Day, zoom: ZoomLevel) -> GridResult<()> {
        let window = compute_window(anchor, zoom, &self.config.window)?;
        self.anchor = anchor;
        self.zoom = zoom;
        let visible: Vec<Resource> = if self.applied_search.is_empty() {
            self.data.clone()
        } else {
            filter_resources(&self.data, &self.applied_search)
        };
        let packed: Vec<PackedResource> = if self.config.clip_to_window {
            visible.iter().map(|r| pack_visible(r, &window)).collect()
        } else {
            visible.into_iter().map(pack_resource).collect()
        };
        self.paginator.recompute(packed);
        self.rebuild_snapshot(window);
        log_changes!(
            self.config.verbosity,
            "recomputed {} {} window from {}: page {}/{}",
            self.snapshot.window.len(),
            self.zoom,
            self.anchor,
            self.paginator.current_page_num() + 1,
            self.paginator.pages_amount()
        );
        Ok(())
    }

    fn rebuild_snapshot(&mut self, window: DateWindow) {
        self.snapshot = GridSnapshot::build(window, &self.paginator.page(), &self.config);
        // Cell coordinates in a visible tooltip no longer refer to the new layout
        self.tooltip = None;
    }

    pub fn set_data(&mut self, data: Vec<Resource>) -> GridResult<()> {
        self.data = data;
        self.recompute()
    }

    pub fn set_anchor(&mut self, anchor: Day) -> GridResult<()> {
        self.recompute_at(anchor, self.zoom)
    }

    pub fn set_zoom(&mut self, zoom: ZoomLevel) -> GridResult<()> {
        self.recompute_at(self.anchor, zoom)
    }

    /// Move one window forward and report the new range.
    pub fn next_range(&mut self) -> GridResult<Option<DatesRange>> {
        let anchor = shift_anchor(self.anchor, self.zoom, &self.config.window, true)?;
        self.recompute_at(anchor, self.zoom)?;
        Ok(self.range())
    }

    /// Move one window back and report the new range.
    pub fn previous_range(&mut self) -> GridResult<Option<DatesRange>> {
        let anchor = shift_anchor(self.anchor, self.zoom, &self.config.window, false)?;
        self.recompute_at(anchor, self.zoom)?;
        Ok(self.range())
    }

    /// Apply a search phrase now, returning to the first page.
    pub fn apply_search(&mut self, phrase: &str) -> GridResult<()> {
        self.search_phrase = phrase.to_string();
        self.applied_search = phrase.to_string();
        self.paginator.reset();
        log_changes!(self.config.verbosity, "search {:?}: reset to first page", phrase);
        self.recompute()
    }

    pub fn next_page(&mut self) -> Page<'_> {
        self.paginator.next();
        self.rebuild_snapshot(self.snapshot.window.clone());
        self.paginator.page()
    }

    pub fn previous_page(&mut self) -> Page<'_> {
        self.paginator.previous();
        self.rebuild_snapshot(self.snapshot.window.clone());
        self.paginator.page()
    }

    pub fn reset_page(&mut self) -> Page<'_> {
        self.paginator.reset();
        self.rebuild_snapshot(self.snapshot.window.clone());
        self.paginator.page()
    }

    /// Tooltip query against the current snapshot, in client coordinates.
    pub fn hit_at(&self, client: Point) -> HitResult {
        hit_test(self.origin.to_local(client), &self.snapshot.context(), &self.config)
    }

    /// Click query against the current snapshot, in client coordinates.
    pub fn focus_at(&self, client: Point) -> FocusResult {
        focus(self.origin.to_local(client), &self.snapshot.context(), &self.config)
    }

    /// Assignment tile under a client point, if any.
    pub fn tile_at(&self, client: Point) -> Option<&Assignment> {
        tile_at(self.origin.to_local(client), &self.snapshot.context(), &self.config)
    }

    /// Handle a click on a tile. Yields a [`TileClick`] only when an assignment
    /// is drawn under the pointer.
    pub fn tile_click(&self, client: Point) -> Option<TileClick> {
        let local = self.origin.to_local(client);
        let ctx = self.snapshot.context();
        let assignment = tile_at(local, &ctx, &self.config)?;
        let resource_index = ctx.layout.locate(local.y)?.0;
        Some(TileClick {
            resource: self.snapshot.resources.get(resource_index)?.resource.label.clone(),
            assignment: assignment.clone(),
            page_num: self.paginator.current_page_num() + 1,
        })
    }

    /// Hover immediately, updating tooltip state.
    ///
    /// Returns the tooltip only when tooltips are enabled and a resource was hit.
    pub fn hover(&mut self, client: Point) -> Option<HitResult> {
        let hit = self.hit_at(client);
        self.tooltip = (self.config.show_tooltip && hit.is_hit()).then_some(hit);
        self.tooltip
    }

    /// Buffer a pointer move; it is hit-tested by [`tick`](Self::tick) once quiet.
    pub fn pointer_move(&mut self, client: Point, now: Instant) {
        self.hover.push(client, now);
    }

    /// Cancel any pending hover and clear the tooltip.
    pub fn pointer_leave(&mut self) {
        self.hover.cancel();
        self.tooltip = None;
    }

    /// Record a search phrase; filtering is applied by [`tick`](Self::tick) once quiet.
    pub fn search_input(&mut self, phrase: &str, now: Instant) {
        self.search_phrase = phrase.to_string();
        self.search.push(phrase.to_string(), now);
    }

    /// Dispatch whichever buffered events have become due.
    pub fn tick(&mut self, now: Instant) -> GridResult<TickOutcome> {
        let mut outcome = TickOutcome::default();
        if let Some(phrase) = self.search.poll(now) {
            self.apply_search(&phrase)?;
            outcome.applied_search = Some(phrase);
        }
        if let Some(point) = self.hover.poll(now) {
            outcome.tooltip = self.hover(point);
        }
        Ok(outcome)
    }

    /// Handle a click. Yields a [`DayClick`] only for a free day under a resource.
    pub fn click(&self, client: Point) -> Option<DayClick> {
        let focus = self.focus_at(client);
        if focus.cell.is_none() || !focus.is_day_free {
            return None;
        }
        Some(DayClick {
            focus,
            page_num: self.paginator.current_page_num() + 1,
        })
    }
}
