mod probe_bitrate_estimator;

pub use probe_bitrate_estimator::*;
