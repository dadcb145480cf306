//! In-memory caching of upstream results.
//!
//! Only the category listing is cached; every other upstream call is a
//! straight pass-through.

pub mod categories;
pub mod clock;

pub use categories::{CacheEntry, CategoryCache};
pub use clock::{Clock, ManualClock, SystemClock};
