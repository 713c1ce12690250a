//! Bandwidth estimation building blocks from the WebRTC congestion controller.
//!
//! - [ProbeBitrateEstimator](goog_cc::ProbeBitrateEstimator) turns feedback
//!   about probe clusters into a bitrate estimate.
//! - [RateStatistics](rtc_base::RateStatistics) measures a rate over a sliding
//!   window of 1 ms buckets with caller supplied timestamps.
//! - [RateTracker](rtc_base::RateTracker) measures a rate over a ring of fixed
//!   size buckets driven by a [Clock](rtc_base::Clock).
//!
//! None of the components depend on each other, and none of them are
//! thread-safe; each instance is expected to be owned by a single caller.

pub mod api;
pub mod goog_cc;
pub mod rtc_base;
