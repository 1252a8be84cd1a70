//! Presentation state for the team attribute settings pages
//!
//! Nothing here renders. The list and detail views are state machines that
//! drive an [`AttributeService`](teamattr_core::AttributeService) through a
//! shared [`TeamQueryCache`], and report back through notices and
//! navigation requests.

pub mod cache;
pub mod detail;
pub mod list;
pub mod notice;

pub use cache::TeamQueryCache;
pub use detail::{AttributeDetailView, AttributeForm, DetailState};
pub use list::{AttributeListView, CreateDialog, ListState};
pub use notice::{Navigation, Notice, NoticeKind};
