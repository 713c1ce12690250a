/*
 *  Copyright (c) 2013 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use std::collections::VecDeque;

#[derive(Debug, Clone)]
struct Bucket {
    sum: i64,
    num_samples: i64,
    timestamp: i64,
}

impl Bucket {
    fn new(timestamp: i64) -> Self {
        Self {
            sum: 0,
            num_samples: 0,
            timestamp,
        }
    }
}

// Class to estimate rates based on counts in a sequence of 1-millisecond
// intervals.
//
// This class uses int64 for all its numbers because some rates can be very
// high; for instance, a 20 Mbit/sec video stream can wrap a 32-bit byte
// counter in 14 minutes.
//
// Note that timestamps used in update(), rate() and set_window_size() must
// never decrease for two consecutive calls.
// TODO(bugs.webrtc.org/11600): Migrate from int64_t to Timestamp.
#[derive(Debug, Clone)]
pub struct RateStatistics {
    // Data points, one bucket per millisecond with at least one sample.
    buckets: VecDeque<Bucket>,

    // Total count recorded in all buckets.
    accumulated_count: i64,

    // Timestamp of the first data point, None if no data points.
    first_timestamp: Option<i64>,

    // True if accumulated_count has ever grown too large to be
    // contained in its integer type.
    overflow: bool,

    // The total number of samples in the buckets.
    num_samples: i64,

    // To convert counts/ms to desired units
    scale: f32,

    // The window sizes, in ms, over which the rate is calculated.
    max_window_size_ms: i64,
    current_window_size_ms: i64,
}

impl RateStatistics {
    /// Converts bytes per millisecond into bits per second.
    pub const BPS_SCALE: f32 = 8000.0;

    /// max_window_size_ms = Maximum window size in ms for the rates.
    /// scale = coefficient to convert counts/ms to desired unit
    ///         ex: BPS_SCALE (8000) for bytes/s if count represents bytes.
    pub fn new(max_window_size_ms: i64, scale: f32) -> Self {
        assert!(max_window_size_ms > 0);
        Self {
            buckets: VecDeque::new(),
            accumulated_count: 0,
            first_timestamp: None,
            overflow: false,
            num_samples: 0,
            scale,
            max_window_size_ms,
            current_window_size_ms: max_window_size_ms,
        }
    }

    pub fn reset(&mut self) {
        self.accumulated_count = 0;
        self.overflow = false;
        self.num_samples = 0;
        self.first_timestamp = None;
        self.current_window_size_ms = self.max_window_size_ms;
        self.buckets.clear();
    }

    /// Update rate with a new data point, moving averaging window as needed.
    pub fn update(&mut self, count: i64, now_ms: i64) {
        debug_assert!(count >= 0);

        self.erase_old(now_ms);
        if self.first_timestamp.is_none() {
            self.first_timestamp = Some(now_ms);
        }

        match self.buckets.back().map(|bucket| bucket.timestamp) {
            Some(last_timestamp) if last_timestamp == now_ms => {}
            Some(last_timestamp) if now_ms < last_timestamp => {
                // Counted in the latest bucket instead.
                tracing::warn!(
                    "Timestamp {} is before the last added timestamp in the rate window: {}, aligning to that.",
                    now_ms,
                    last_timestamp
                );
            }
            _ => self.buckets.push_back(Bucket::new(now_ms)),
        }

        if let Some(last_bucket) = self.buckets.back_mut() {
            last_bucket.sum = last_bucket.sum.saturating_add(count);
            last_bucket.num_samples += 1;
        }

        match self.accumulated_count.checked_add(count) {
            Some(accumulated_count) => self.accumulated_count = accumulated_count,
            None => self.overflow = true,
        }
        self.num_samples += 1;
    }

    /// Note that despite this being a query, buckets that have fallen out of
    /// the window are removed, hence the `&mut self`.
    pub fn rate(&mut self, now_ms: i64) -> Option<i64> {
        self.erase_old(now_ms);

        let active_window_size: i64 = match self.first_timestamp {
            // Count window as full even if no data points currently in view, if the
            // data stream started before the window.
            Some(first_timestamp) if first_timestamp <= now_ms - self.current_window_size_ms => {
                self.current_window_size_ms
            }
            // Size of a single bucket is 1ms, so even if now_ms == first_timestamp
            // the window size should be 1.
            Some(first_timestamp) => now_ms - first_timestamp + 1,
            None => 0,
        };

        // If window is a single bucket or there is only one sample in a data set that
        // has not grown to the full window size, or if the accumulator has
        // overflowed, treat this as rate unavailable.
        if self.num_samples == 0
            || active_window_size <= 1
            || (self.num_samples <= 1 && active_window_size < self.current_window_size_ms)
            || self.overflow
        {
            return None;
        }

        let scale: f32 = self.scale / active_window_size as f32;
        let result: f32 = self.accumulated_count as f32 * scale + 0.5;

        // Better return unavailable rate than garbage value.
        if result > i64::MAX as f32 {
            return None;
        }
        Some(result as i64)
    }

    /// Update the size of the averaging window. The maximum allowed value for
    /// window_size_ms is max_window_size_ms as supplied in the constructor.
    pub fn set_window_size(&mut self, window_size_ms: i64, now_ms: i64) -> bool {
        if window_size_ms <= 0 || window_size_ms > self.max_window_size_ms {
            return false;
        }
        if let Some(first_timestamp) = self.first_timestamp.as_mut() {
            // If the window changes (e.g. decreases - removing data point, then
            // increases again) we need to update the first timestamp mark as
            // otherwise it indicates the window coveres a region of zeros, suddenly
            // under-estimating the rate.
            *first_timestamp = (*first_timestamp).max(now_ms - window_size_ms + 1);
        }
        self.current_window_size_ms = window_size_ms;
        self.erase_old(now_ms);
        true
    }

    fn erase_old(&mut self, now_ms: i64) {
        // New oldest time that is included in data set.
        let new_oldest_time: i64 = now_ms - self.current_window_size_ms + 1;

        while let Some(oldest_bucket) = self
            .buckets
            .front()
            .filter(|bucket| bucket.timestamp < new_oldest_time)
        {
            debug_assert!(self.overflow || self.accumulated_count >= oldest_bucket.sum);
            debug_assert!(self.num_samples >= oldest_bucket.num_samples);
            // An overflowed accumulator is already out of sync with the buckets.
            self.accumulated_count = (self.accumulated_count - oldest_bucket.sum).max(0);
            self.num_samples -= oldest_bucket.num_samples;
            self.buckets.pop_front();
            // This does not clear overflow even when counter is empty.
            // TODO(https://bugs.webrtc.org/11247): Consider if overflow can be reset.
        }
    }
}
