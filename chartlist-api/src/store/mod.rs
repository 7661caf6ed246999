//! In-memory stores backing the service
//!
//! Both stores are owned values handed to the service at construction, so
//! each test can build fresh instances.

mod chart;
mod playlist;

pub use chart::ChartStore;
pub use playlist::{DuplicateEntry, PlaylistStore};
