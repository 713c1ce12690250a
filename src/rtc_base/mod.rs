mod rate_statistics;
mod rate_tracker;
mod time_utils;

pub use rate_statistics::*;
pub use rate_tracker::*;
pub use time_utils::*;
