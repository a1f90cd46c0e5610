//! List pagination and filter synchronization for hotel back-office
//! clients, sitting between `hotelops-api` and a presentation layer.
//!
//! - **[`Paginator`]** — Coordinates one list: `load_first_page`,
//!   `load_next_page` (guarded so only one page load runs at a time), and
//!   `refresh`. Requests carry sequence numbers; a response older than the
//!   newest applied one is dropped instead of regressing the list.
//!
//! - **[`ListStore`] / [`ListState`]** — Ordered, id-deduplicated records.
//!   Page 1 replaces, later pages append, first occurrence wins. Screens
//!   render from immutable `ListState` snapshots published on a `watch`
//!   channel and consumed through [`ListStream`].
//!
//! - **[`FilterCriteria`] / [`FilterState`]** — What the user picked,
//!   normalized into flat query parameters. Inverted date ranges are
//!   rejected when the criteria are built.
//!
//! - **[`ListSession`]** — The UI-event surface of one list screen
//!   (`on_filters_applied`, `on_end_reached`, `on_pull_to_refresh`, ...).
//!
//! - **[`Backoffice`]** — Facade owning the API client and the shared
//!   hotel [`ReferenceCache`]; vends sessions and wraps record CRUD.
//!
//! - **[`HtmlReport`]** — Renders a loaded list and its totals into an
//!   HTML table for printing.

pub mod backoffice;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod page;
pub mod paginator;
pub mod report;
pub mod session;
pub mod source;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backoffice::Backoffice;
pub use cache::ReferenceCache;
pub use config::ClientConfig;
pub use error::CoreError;
pub use filter::{FilterCriteria, FilterError, FilterState, QueryParams, parse_date};
pub use page::{DEFAULT_PER_PAGE, PageRequest, PageResult, page_size};
pub use paginator::{LoadOutcome, Paginator};
pub use report::{Column, HtmlReport};
pub use session::ListSession;
pub use source::{ApiPageSource, PageSource};
pub use store::{ListState, ListStore, LoadPhase};
pub use stream::ListStream;

pub use model::{EntityId, Hotel, Identified, Record, Resource, display_value};

pub use hotelops_api::TlsMode;
