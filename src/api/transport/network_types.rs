/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use crate::api::units::{DataSize, Timestamp};

/// Pacer metadata attached to every sent packet. Packets sent as part of a
/// probe cluster carry the cluster id and the thresholds the cluster was
/// configured with; everything else carries [PacedPacketInfo::NOT_A_PROBE].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacedPacketInfo {
    pub probe_cluster_id: i32,
    pub probe_cluster_min_probes: i32,
    pub probe_cluster_min_bytes: i32,
}

impl PacedPacketInfo {
    pub const NOT_A_PROBE: i32 = -1;

    pub const fn new(
        probe_cluster_id: i32,
        probe_cluster_min_probes: i32,
        probe_cluster_min_bytes: i32,
    ) -> Self {
        Self {
            probe_cluster_id,
            probe_cluster_min_probes,
            probe_cluster_min_bytes,
        }
    }

    pub const fn is_probe(&self) -> bool {
        self.probe_cluster_id != Self::NOT_A_PROBE
    }
}

impl Default for PacedPacketInfo {
    fn default() -> Self {
        Self {
            probe_cluster_id: Self::NOT_A_PROBE,
            probe_cluster_min_probes: -1,
            probe_cluster_min_bytes: -1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SentPacket {
    pub send_time: Timestamp,
    /// Size of packet with overhead up to IP layer.
    pub size: DataSize,
    /// Probe cluster id and parameters including number of packets and
    /// number of bytes.
    pub pacing_info: PacedPacketInfo,
}

impl Default for SentPacket {
    fn default() -> Self {
        Self {
            send_time: Timestamp::plus_infinity(),
            size: DataSize::zero(),
            pacing_info: PacedPacketInfo::default(),
        }
    }
}

/// Feedback about a single sent packet, as reported back by the receiver.
#[derive(Debug, Clone, Copy)]
pub struct PacketResult {
    pub sent_packet: SentPacket,
    /// `plus_infinity` until the packet is known to have arrived.
    pub receive_time: Timestamp,
}

impl PacketResult {
    pub const fn is_received(&self) -> bool {
        !self.receive_time.is_plus_infinity()
    }
}

impl Default for PacketResult {
    fn default() -> Self {
        Self {
            sent_packet: SentPacket::default(),
            receive_time: Timestamp::plus_infinity(),
        }
    }
}
