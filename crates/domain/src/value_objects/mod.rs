//! Value objects for the moderation domain

mod device_id;
mod search_query;
mod verdict;

pub use device_id::DeviceId;
pub use search_query::SearchQuery;
pub use verdict::Verdict;
