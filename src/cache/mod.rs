//! Search-result cache.

pub mod search;


pub use search::{SearchCache, SearchCacheHandle};
