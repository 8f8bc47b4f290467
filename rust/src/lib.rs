//! Layout and hit-testing engine for a paginated resource-scheduling grid.
//!
//! Given resources (e.g. people) with dated project assignments, the engine:
//! 1. Generates the visible date window for an anchor date and zoom level
//! 2. Packs overlapping assignments into non-colliding sub-rows per resource
//! 3. Paginates resources under a sub-row budget
//! 4. Indexes active assignments per (resource, day)
//! 5. Maps pointer pixels back to cells for tooltip and day-click queries
//!
//! All computations are pure and synchronous. [`SchedulerView`] wraps them for
//! event-driven hosts.

pub mod coalesce;
pub mod config;
pub mod date_window;
pub mod error;
pub mod geometry;
pub mod index;
pub mod logging;
pub mod models;
pub mod packer;
pub mod paginator;
#[cfg(feature = "python")]
mod python;
pub mod view;

pub use coalesce::{CancelToken, CoalescedDispatcher, Coalescer};
pub use config::{GridConfig, GridGeometry, TooltipBox, WindowConfig};
pub use date_window::{compute_window, shift_anchor, DateWindow, DatesRange};
pub use error::{GridError, GridResult};
pub use geometry::{GridOrigin, Point, RowLayout};
pub use hit_test::{focus, hit_test, tile_at, CellRef, FocusResult, HitContext, HitResult};
pub use index::{build_index, CellEntry, CellIndex};
pub use models::{
    Assignment, Day, DispositionSummary, HoursMinutes, Resource, ResourceLabel, ZoomLevel,
};
pub use packer::{pack, pack_resource, pack_visible, PackedResource, Packing};
pub use paginator::{page_spans, paginate, Page, PageSpan, Paginator};
pub use view::{
    filter_resources, DayClick, GridSnapshot, SchedulerView, TickOutcome, TileClick,
};
