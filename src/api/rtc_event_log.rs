/*
 *  Copyright (c) 2017 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFailureReason {
    InvalidSendReceiveInterval,
    InvalidSendReceiveRatio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcEventProbeResultSuccess {
    pub id: i32,
    pub bitrate_bps: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcEventProbeResultFailure {
    pub id: i32,
    pub failure_reason: ProbeFailureReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcEvent {
    ProbeResultSuccess(RtcEventProbeResultSuccess),
    ProbeResultFailure(RtcEventProbeResultFailure),
}

impl From<RtcEventProbeResultSuccess> for RtcEvent {
    fn from(event: RtcEventProbeResultSuccess) -> Self {
        RtcEvent::ProbeResultSuccess(event)
    }
}

impl From<RtcEventProbeResultFailure> for RtcEvent {
    fn from(event: RtcEventProbeResultFailure) -> Self {
        RtcEvent::ProbeResultFailure(event)
    }
}

/// Structured diagnostics sink.
///
/// Estimators only borrow the log, so implementations that record events
/// need interior mutability.
pub trait RtcEventLog {
    fn log(&self, event: RtcEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct RtcEventLogNull;

impl RtcEventLog for RtcEventLogNull {
    fn log(&self, _event: RtcEvent) {}
}
