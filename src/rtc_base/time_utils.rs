/*
 *  Copyright 2005 The WebRTC Project Authors. All rights reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use std::cell::Cell;
use std::time::Instant;

/// Millisecond time source.
pub trait Clock {
    fn time_in_milliseconds(&self) -> i64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn time_in_milliseconds(&self) -> i64 {
        (**self).time_in_milliseconds()
    }
}

/// Monotonic clock counting from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn time_in_milliseconds(&self) -> i64 {
        self.start.elapsed().as_millis() as i64
    }
}

/// Manually driven clock for tests and simulations.
#[derive(Debug, Default)]
pub struct SimulatedClock {
    time_ms: Cell<i64>,
}

impl SimulatedClock {
    pub fn new(initial_time_ms: i64) -> Self {
        Self {
            time_ms: Cell::new(initial_time_ms),
        }
    }

    pub fn advance_time_ms(&self, delta_ms: i64) {
        debug_assert!(delta_ms >= 0);
        self.time_ms.set(self.time_ms.get() + delta_ms);
    }

    pub fn set_time_ms(&self, time_ms: i64) {
        self.time_ms.set(time_ms);
    }
}

impl Clock for SimulatedClock {
    fn time_in_milliseconds(&self) -> i64 {
        self.time_ms.get()
    }
}
