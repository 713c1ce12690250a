/// The diagnostics sink for probe results: [RtcEventLog](rtc_event_log::RtcEventLog).
pub mod rtc_event_log;

/// Packet feedback types fed into the estimators.
pub mod transport;

/// Unit types, such as [DataSize](units::DataSize) and [DataRate](units::DataRate).
pub mod units;
