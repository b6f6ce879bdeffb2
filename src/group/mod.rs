//! Group Module
//!
//! Named cache groups, their data-source loaders and the group registry.

mod cache_group;
mod loader;
mod registry;
mod stats;

pub use cache_group::{CacheGroup, GroupBuilder};
pub use loader::{loader_fn, Loader, LoaderFn};
pub use registry::Registry;
pub use stats::{GroupStats, GroupStatsSnapshot};
