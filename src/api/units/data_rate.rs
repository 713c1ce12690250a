/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

// DataRate is a class that represents a given data rate. This can be used to
// represent bandwidth, encoding bitrate, etc. The internal storage is bits per
// second (bps).

use std::fmt;
use std::ops::*;

use super::{DataSize, TimeDelta};

super::relative_unit!(DataRate);

impl DataRate {
    const ONE_SIDED: bool = true;

    pub const fn from_bits_per_sec(value: i64) -> Self {
        Self::from_value(value)
    }

    pub fn from_bits_per_sec_float(value: f64) -> Self {
        Self::from_value_float(value)
    }

    pub const fn from_bytes_per_sec(value: i64) -> Self {
        Self::from_fraction(8, value)
    }

    pub const fn from_kilobits_per_sec(value: i64) -> Self {
        Self::from_fraction(1000, value)
    }

    pub const fn infinity() -> Self {
        Self::plus_infinity()
    }

    pub const fn bps(&self) -> i64 {
        self.to_value()
    }

    pub const fn bps_float(&self) -> f64 {
        self.to_value_float()
    }

    pub const fn bytes_per_sec(&self) -> i64 {
        self.to_fraction(8)
    }

    pub fn bytes_per_sec_float(&self) -> f64 {
        self.to_fraction_float(8.0)
    }

    pub const fn kbps(&self) -> i64 {
        self.to_fraction(1000)
    }

    pub fn kbps_float(&self) -> f64 {
        self.to_fraction_float(1000.0)
    }

    pub const fn bps_or(&self, fallback_value: i64) -> i64 {
        self.to_value_or(fallback_value)
    }
}

impl Div<TimeDelta> for DataSize {
    type Output = DataRate;

    fn div(self, duration: TimeDelta) -> Self::Output {
        DataRate::from_bits_per_sec(self.microbits() / duration.us())
    }
}

impl Mul<TimeDelta> for DataRate {
    type Output = DataSize;

    fn mul(self, duration: TimeDelta) -> Self::Output {
        let microbits: i64 = self.bps() * duration.us();
        DataSize::from_bytes((microbits + 4_000_000) / 8_000_000)
    }
}

impl fmt::Debug for DataRate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_plus_infinity() {
            write!(f, "+inf bps")
        } else if self.is_minus_infinity() {
            write!(f, "-inf bps")
        } else if self.bps() == 0 || self.bps() % 1000 != 0 {
            write!(f, "{} bps", self.bps())
        } else {
            write!(f, "{} kbps", self.kbps())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_trace::test;

    #[test]
    fn get_different_prefix() {
        const VALUE: i64 = 123 * 8000;
        assert_eq!(DataRate::from_bits_per_sec(VALUE).kbps(), VALUE / 1000);
        assert_eq!(DataRate::from_bits_per_sec(VALUE).bytes_per_sec(), VALUE / 8);
        assert_eq!(DataRate::from_bytes_per_sec(1000).bps(), 8000);
        assert_eq!(DataRate::from_kilobits_per_sec(300).bps(), 300_000);
        assert_eq!(DataRate::from_bits_per_sec(128).kbps_float(), 0.128);
        assert_eq!(DataRate::from_bits_per_sec(8000).bytes_per_sec_float(), 1000.0);
    }

    #[test]
    fn identity_checks() {
        assert!(DataRate::zero().is_zero());
        assert!(DataRate::infinity().is_infinite());
        assert!(DataRate::from_bits_per_sec(3000).is_finite());
        assert_eq!(DataRate::infinity().bps_or(-1), -1);
        assert_eq!(DataRate::infinity().bps_float(), f64::INFINITY);
        assert!(DataRate::from_bits_per_sec_float(f64::INFINITY).is_infinite());
    }

    #[test]
    fn ratio_and_scaling() {
        let send_rate = DataRate::from_bits_per_sec(800_000);
        let receive_rate = DataRate::from_bits_per_sec(320_000);
        assert_eq!(receive_rate / send_rate, 0.4);
        assert_eq!(std::cmp::min(send_rate, receive_rate), receive_rate);
        assert_eq!((0.95f32 * receive_rate).bps(), 304_000);
        assert!(receive_rate < 0.9f32 * send_rate);
    }

    #[test]
    fn data_rate_and_data_size_and_time_delta() {
        const SECONDS: i64 = 5;
        const BITS_PER_SECOND: i64 = 440;
        const BYTES: i64 = 44000;
        let delta = TimeDelta::from_seconds(SECONDS);
        let rate = DataRate::from_bits_per_sec(BITS_PER_SECOND);
        let size = DataSize::from_bytes(BYTES);
        assert_eq!((rate * delta).bytes(), SECONDS * BITS_PER_SECOND / 8);
        assert_eq!((size / delta).bps(), BYTES * 8 / SECONDS);
        // 1300 bytes over 100 ms.
        assert_eq!(
            (DataSize::from_bytes(1300) / TimeDelta::from_millis(100)).bytes_per_sec(),
            13000
        );
    }

    #[test]
    #[should_panic]
    fn division_fails_on_large_size() {
        const TOO_LARGE_FOR_DIVISION: i64 = i64::MAX / 8_000_000 + 1;
        let _ = DataSize::from_bytes(TOO_LARGE_FOR_DIVISION) / TimeDelta::from_millis(100);
    }

    #[test]
    fn formats_with_largest_exact_unit() {
        assert_eq!(format!("{:?}", DataRate::from_kilobits_per_sec(300)), "300 kbps");
        assert_eq!(format!("{:?}", DataRate::from_bits_per_sec(93_333)), "93333 bps");
    }
}
