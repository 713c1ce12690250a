/*
 *  Copyright 2015 The WebRTC Project Authors. All rights reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use super::{Clock, SystemClock};

/// Computes units per second over a given interval by tracking the units over
/// each bucket of a given size and calculating the instantaneous rate assuming
/// that over each bucket the rate was constant.
pub struct RateTracker<C: Clock = SystemClock> {
    clock: C,
    bucket_milliseconds: i64,
    bucket_count: usize,
    // One more slot than `bucket_count` so a full ring can be told apart from
    // an empty one.
    sample_buckets: Vec<i64>,
    total_sample_count: i64,
    current_bucket: usize,
    // None until the first sample arrives.
    bucket_start_time_milliseconds: Option<i64>,
    initialization_time_milliseconds: i64,
}

impl RateTracker<SystemClock> {
    pub fn new(bucket_milliseconds: i64, bucket_count: usize) -> Self {
        Self::with_clock(bucket_milliseconds, bucket_count, SystemClock::default())
    }
}

impl<C: Clock> RateTracker<C> {
    pub fn with_clock(bucket_milliseconds: i64, bucket_count: usize, clock: C) -> Self {
        assert!(bucket_milliseconds > 0);
        assert!(bucket_count > 0);
        Self {
            clock,
            bucket_milliseconds,
            bucket_count,
            sample_buckets: vec![0; bucket_count + 1],
            total_sample_count: 0,
            current_bucket: 0,
            bucket_start_time_milliseconds: None,
            initialization_time_milliseconds: 0,
        }
    }

    /// Computes the average rate over the most recent interval_milliseconds,
    /// or if the first sample was added within this period, computes the rate
    /// since the first sample was added.
    pub fn compute_rate_for_interval(&self, interval_milliseconds: i64) -> f64 {
        let Some(bucket_start_time_milliseconds) = self.bucket_start_time_milliseconds else {
            return 0.0;
        };
        let current_time: i64 = self.time();
        // Calculate which buckets to sum up given the current time.  If the time
        // has passed to a new bucket then we have to skip some of the oldest buckets.
        let mut available_interval_milliseconds: i64 = interval_milliseconds
            .min(self.bucket_milliseconds * self.bucket_count as i64);
        // number of old buckets (i.e. after the current bucket in the ring buffer)
        // that are expired given our current time interval.
        let buckets_to_skip: usize;
        // Number of milliseconds of the first bucket that are not a portion of the
        // current interval.
        let milliseconds_to_skip: i64;
        if current_time > self.initialization_time_milliseconds + available_interval_milliseconds {
            let time_to_skip: i64 = current_time - bucket_start_time_milliseconds
                + self.bucket_count as i64 * self.bucket_milliseconds
                - available_interval_milliseconds;
            let Ok(skipped_buckets) = usize::try_from(time_to_skip / self.bucket_milliseconds)
            else {
                return 0.0;
            };
            buckets_to_skip = skipped_buckets;
            milliseconds_to_skip = time_to_skip % self.bucket_milliseconds;
        } else {
            buckets_to_skip = self.bucket_count - self.current_bucket;
            milliseconds_to_skip = 0;
            available_interval_milliseconds =
                current_time - self.initialization_time_milliseconds;
            // Let one bucket interval pass after initialization before reporting.
            if available_interval_milliseconds < self.bucket_milliseconds {
                return 0.0;
            }
        }
        // If we're skipping all buckets that means that there have been no samples
        // within the sampling interval so report 0.
        if buckets_to_skip > self.bucket_count || available_interval_milliseconds == 0 {
            return 0.0;
        }
        let start_bucket: usize = self.next_bucket_index(self.current_bucket + buckets_to_skip);
        // Only count a portion of the first bucket according to how much of the
        // first bucket is within the current interval.
        let mut total_samples: i64 = (self.sample_buckets[start_bucket]
            * (self.bucket_milliseconds - milliseconds_to_skip)
            + (self.bucket_milliseconds >> 1))
            / self.bucket_milliseconds;
        // All other buckets in the interval are counted in their entirety.
        let end_bucket = self.next_bucket_index(self.current_bucket);
        let mut i = self.next_bucket_index(start_bucket);
        while i != end_bucket {
            total_samples += self.sample_buckets[i];
            i = self.next_bucket_index(i);
        }
        // Convert to samples per second.
        (total_samples * 1000) as f64 / available_interval_milliseconds as f64
    }

    /// Computes the average rate over the rate tracker's recording interval
    /// of bucket_milliseconds * bucket_count.
    pub fn compute_rate(&self) -> f64 {
        self.compute_rate_for_interval(self.bucket_milliseconds * self.bucket_count as i64)
    }

    /// Computes the average rate since the first sample was added to the
    /// rate tracker.
    pub fn compute_total_rate(&self) -> f64 {
        if self.bucket_start_time_milliseconds.is_none() {
            return 0.0;
        }
        let current_time: i64 = self.time();
        if current_time <= self.initialization_time_milliseconds {
            return 0.0;
        }
        (self.total_sample_count * 1000) as f64
            / (current_time - self.initialization_time_milliseconds) as f64
    }

    /// The total number of samples added.
    pub fn total_sample_count(&self) -> i64 {
        self.total_sample_count
    }

    /// Reads the current time in order to determine the appropriate bucket for
    /// these samples, and increments the count for that bucket by sample_count.
    pub fn add_samples(&mut self, sample_count: i64) {
        debug_assert!(sample_count >= 0);
        let mut bucket_start_time_milliseconds = self.ensure_initialized();
        let current_time: i64 = self.time();
        // Advance the current bucket as needed for the current time, and reset
        // bucket counts as we advance.
        let mut i = 0;
        while i <= self.bucket_count
            && current_time >= bucket_start_time_milliseconds + self.bucket_milliseconds
        {
            bucket_start_time_milliseconds += self.bucket_milliseconds;
            self.current_bucket = self.next_bucket_index(self.current_bucket);
            self.sample_buckets[self.current_bucket] = 0;
            i += 1;
        }
        // Ensure that bucket_start_time_milliseconds is updated appropriately if
        // the entire buffer of samples has been expired.
        bucket_start_time_milliseconds += self.bucket_milliseconds
            * ((current_time - bucket_start_time_milliseconds) / self.bucket_milliseconds);
        self.bucket_start_time_milliseconds = Some(bucket_start_time_milliseconds);
        // Add all samples in the bucket that includes the current time.
        self.sample_buckets[self.current_bucket] += sample_count;
        self.total_sample_count += sample_count;
    }

    fn time(&self) -> i64 {
        self.clock.time_in_milliseconds()
    }

    // Returns the start time of the current bucket.
    fn ensure_initialized(&mut self) -> i64 {
        if let Some(bucket_start_time_milliseconds) = self.bucket_start_time_milliseconds {
            return bucket_start_time_milliseconds;
        }
        self.initialization_time_milliseconds = self.time();
        self.bucket_start_time_milliseconds = Some(self.initialization_time_milliseconds);
        self.current_bucket = 0;
        // We only need to initialize the first bucket because we reset buckets when
        // current_bucket increments.
        self.sample_buckets[self.current_bucket] = 0;
        self.initialization_time_milliseconds
    }

    fn next_bucket_index(&self, bucket_index: usize) -> usize {
        (bucket_index + 1) % (self.bucket_count + 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rtc_base::SimulatedClock;
    use approx::assert_relative_eq;
    use test_trace::test;

    const BUCKET_MS: i64 = 100;
    const BUCKET_COUNT: usize = 10;

    fn new_tracker(clock: &SimulatedClock) -> RateTracker<&SimulatedClock> {
        RateTracker::with_clock(BUCKET_MS, BUCKET_COUNT, clock)
    }

    #[test]
    fn uninitialized_tracker_reports_zero() {
        let clock = SimulatedClock::new(0);
        let tracker = new_tracker(&clock);
        clock.advance_time_ms(1000);
        assert_eq!(tracker.compute_rate_for_interval(1000), 0.0);
        assert_eq!(tracker.compute_rate(), 0.0);
        assert_eq!(tracker.compute_total_rate(), 0.0);
        assert_eq!(tracker.total_sample_count(), 0);
    }

    #[test]
    fn waits_for_one_bucket_before_reporting() {
        let clock = SimulatedClock::new(5000);
        let mut tracker = new_tracker(&clock);
        tracker.add_samples(5);
        clock.advance_time_ms(BUCKET_MS / 2);
        assert_eq!(tracker.compute_rate_for_interval(1000), 0.0);
        // The lifetime average is available right away.
        assert_relative_eq!(tracker.compute_total_rate(), 100.0);
        assert_eq!(tracker.total_sample_count(), 5);
    }

    #[test]
    fn rate_after_one_bucket() {
        let clock = SimulatedClock::new(0);
        let mut tracker = new_tracker(&clock);
        tracker.add_samples(10);
        clock.advance_time_ms(BUCKET_MS);
        assert_relative_eq!(
            tracker.compute_rate_for_interval(BUCKET_MS),
            10000.0 / BUCKET_MS as f64
        );
        assert_relative_eq!(tracker.compute_total_rate(), 100.0);
    }

    #[test]
    fn steady_rate_over_full_window() {
        let clock = SimulatedClock::new(0);
        let mut tracker = new_tracker(&clock);
        // One sample every 10 ms for two seconds, 100 samples per second.
        for _ in 0..200 {
            tracker.add_samples(1);
            clock.advance_time_ms(10);
        }
        tracker.add_samples(0);

        assert_relative_eq!(tracker.compute_rate_for_interval(1000), 100.0);
        assert_relative_eq!(tracker.compute_rate(), 100.0);
        assert_relative_eq!(tracker.compute_total_rate(), 100.0);
        assert_eq!(tracker.total_sample_count(), 200);
    }

    #[test]
    fn interval_is_clamped_to_retained_history() {
        let clock = SimulatedClock::new(0);
        let mut tracker = new_tracker(&clock);
        for _ in 0..200 {
            tracker.add_samples(1);
            clock.advance_time_ms(10);
        }
        tracker.add_samples(0);

        assert_relative_eq!(
            tracker.compute_rate_for_interval(50_000),
            tracker.compute_rate_for_interval(BUCKET_MS * BUCKET_COUNT as i64)
        );
    }

    #[test]
    fn counts_part_of_the_oldest_bucket() {
        let clock = SimulatedClock::new(0);
        let mut tracker = new_tracker(&clock);
        tracker.add_samples(0);
        clock.set_time_ms(1000);
        tracker.add_samples(100);
        clock.set_time_ms(1150);
        tracker.add_samples(0);

        // Half of the bucket starting at 1000 lies inside (1050, 1150].
        assert_relative_eq!(tracker.compute_rate_for_interval(100), 500.0);
    }

    #[test]
    fn partial_history_before_wraparound() {
        let clock = SimulatedClock::new(0);
        let mut tracker = new_tracker(&clock);
        tracker.add_samples(30);
        clock.advance_time_ms(250);
        tracker.add_samples(20);
        clock.advance_time_ms(50);

        // Only 300 ms of history exist, all 50 samples are inside them.
        assert_relative_eq!(tracker.compute_rate_for_interval(1000), 50.0 * 1000.0 / 300.0);
    }

    #[test]
    fn long_pause_expires_every_bucket() {
        let clock = SimulatedClock::new(0);
        let mut tracker = new_tracker(&clock);
        tracker.add_samples(10);
        clock.advance_time_ms(5000);
        tracker.add_samples(0);

        assert_eq!(tracker.bucket_start_time_milliseconds, Some(5000));
        assert_eq!(tracker.compute_rate_for_interval(1000), 0.0);
        assert_relative_eq!(tracker.compute_total_rate(), 2.0);
        assert_eq!(tracker.total_sample_count(), 10);
    }

    #[test]
    fn ring_keeps_one_spare_bucket() {
        let clock = SimulatedClock::new(0);
        let tracker = new_tracker(&clock);
        assert_eq!(tracker.sample_buckets.len(), BUCKET_COUNT + 1);
        assert_eq!(tracker.next_bucket_index(BUCKET_COUNT), 0);
    }

    #[test]
    fn system_clock_tracker_starts_empty() {
        let mut tracker = RateTracker::new(BUCKET_MS, BUCKET_COUNT);
        assert_eq!(tracker.compute_total_rate(), 0.0);
        tracker.add_samples(3);
        assert_eq!(tracker.total_sample_count(), 3);
    }

    #[test]
    #[should_panic]
    fn rejects_zero_bucket_count() {
        RateTracker::new(BUCKET_MS, 0);
    }
}
