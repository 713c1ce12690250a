/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

//! Timestamp represents the time that has passed since some unspecified epoch.
//! The epoch is assumed to be before any represented timestamps, this means that
//! negative values are not valid. The most notable feature is that the
//! difference of two Timestamps results in a TimeDelta.
super::unit_base!(Timestamp);

use std::fmt;
use std::ops::*;

use super::TimeDelta;

impl Timestamp {
    const ONE_SIDED: bool = true;

    pub const fn from_seconds(value: i64) -> Self {
        Self::from_fraction(1_000_000, value)
    }

    pub const fn from_millis(value: i64) -> Self {
        Self::from_fraction(1_000, value)
    }

    pub const fn from_micros(value: i64) -> Self {
        Self::from_value(value)
    }

    pub const fn seconds(&self) -> i64 {
        self.to_fraction(1_000_000)
    }

    pub const fn ms(&self) -> i64 {
        self.to_fraction(1_000)
    }

    pub const fn us(&self) -> i64 {
        self.to_value()
    }

    pub const fn ms_or(&self, fallback_value: i64) -> i64 {
        self.to_fraction_or(1_000, fallback_value)
    }
}

impl Add<TimeDelta> for Timestamp {
    type Output = Self;

    fn add(self, delta: TimeDelta) -> Self {
        if self.is_plus_infinity() || delta.is_plus_infinity() {
            assert!(!self.is_minus_infinity());
            assert!(!delta.is_minus_infinity());
            return Self::plus_infinity();
        } else if self.is_minus_infinity() || delta.is_minus_infinity() {
            assert!(!self.is_plus_infinity());
            assert!(!delta.is_plus_infinity());
            return Self::minus_infinity();
        }
        Timestamp::from_micros(self.us() + delta.us())
    }
}

impl Sub<TimeDelta> for Timestamp {
    type Output = Self;

    fn sub(self, delta: TimeDelta) -> Self {
        if self.is_plus_infinity() || delta.is_minus_infinity() {
            assert!(!self.is_minus_infinity());
            assert!(!delta.is_plus_infinity());
            return Self::plus_infinity();
        } else if self.is_minus_infinity() || delta.is_plus_infinity() {
            assert!(!self.is_plus_infinity());
            assert!(!delta.is_minus_infinity());
            return Self::minus_infinity();
        }
        Timestamp::from_micros(self.us() - delta.us())
    }
}

impl Sub for Timestamp {
    type Output = TimeDelta;

    fn sub(self, other: Self) -> TimeDelta {
        if self.is_plus_infinity() || other.is_minus_infinity() {
            assert!(!self.is_minus_infinity());
            assert!(!other.is_plus_infinity());
            return TimeDelta::plus_infinity();
        } else if self.is_minus_infinity() || other.is_plus_infinity() {
            assert!(!self.is_plus_infinity());
            assert!(!other.is_minus_infinity());
            return TimeDelta::minus_infinity();
        }
        TimeDelta::from_micros(self.us() - other.us())
    }
}

impl AddAssign<TimeDelta> for Timestamp {
    fn add_assign(&mut self, delta: TimeDelta) {
        *self = *self + delta;
    }
}

impl SubAssign<TimeDelta> for Timestamp {
    fn sub_assign(&mut self, delta: TimeDelta) {
        *self = *self - delta;
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_plus_infinity() {
            write!(f, "+inf ms")
        } else if self.is_minus_infinity() {
            write!(f, "-inf ms")
        } else if self.us() == 0 || (self.us() % 1000) != 0 {
            write!(f, "{} us", self.us())
        } else if self.ms() % 1000 != 0 {
            write!(f, "{} ms", self.ms())
        } else {
            write!(f, "{} s", self.seconds())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_trace::test;

    #[test]
    fn timestamp_and_time_delta_math() {
        const TIME_A: Timestamp = Timestamp::from_millis(267);
        const TIME_B: Timestamp = Timestamp::from_millis(450);
        const DELTA_A: TimeDelta = TimeDelta::from_millis(267);

        assert_eq!(TIME_A - TIME_B, TimeDelta::from_millis(267 - 450));
        assert_eq!(TIME_B - DELTA_A, Timestamp::from_millis(450 - 267));
        assert_eq!(TIME_B + DELTA_A, Timestamp::from_millis(450 + 267));

        let mut time = TIME_A;
        time += DELTA_A;
        assert_eq!(time, Timestamp::from_millis(534));
        time -= DELTA_A;
        assert_eq!(time, TIME_A);
    }

    #[test]
    fn infinity_bounds_finite_timestamps() {
        // The probe estimator seeds cluster bounds with the infinities so the
        // first packet always replaces them.
        const FINITE: Timestamp = Timestamp::from_seconds(1000);
        assert!(Timestamp::plus_infinity() > FINITE);
        assert!(Timestamp::minus_infinity() < FINITE);
        assert!((Timestamp::minus_infinity() + TimeDelta::from_seconds(1)).is_minus_infinity());
        assert!((Timestamp::plus_infinity() - FINITE).is_plus_infinity());
        assert_eq!(Timestamp::plus_infinity().ms_or(-1), -1);
    }

    #[test]
    fn get_different_prefix() {
        assert_eq!(Timestamp::from_seconds(3).ms(), 3000);
        assert_eq!(Timestamp::from_millis(3000).seconds(), 3);
        assert_eq!(Timestamp::from_micros(3000).ms(), 3);
        assert_eq!(Timestamp::from_millis(3).us(), 3000);
    }

    #[test]
    #[should_panic]
    fn crashes_on_negative_timestamp() {
        let _ = Timestamp::from_millis(100) - TimeDelta::from_millis(200);
    }
}
