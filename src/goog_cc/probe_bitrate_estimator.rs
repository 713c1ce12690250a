/*
 *  Copyright (c) 2016 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use std::collections::HashMap;

use crate::api::{
    rtc_event_log::{
        ProbeFailureReason, RtcEventLog, RtcEventProbeResultFailure, RtcEventProbeResultSuccess,
    },
    transport::{PacedPacketInfo, PacketResult},
    units::{DataRate, DataSize, TimeDelta, Timestamp},
};

struct AggregatedCluster {
    num_probes: i32,
    first_send: Timestamp,
    last_send: Timestamp,
    first_receive: Timestamp,
    last_receive: Timestamp,
    size_last_send: DataSize,
    size_first_receive: DataSize,
    size_total: DataSize,
}

impl Default for AggregatedCluster {
    fn default() -> Self {
        Self {
            num_probes: 0,
            first_send: Timestamp::plus_infinity(),
            last_send: Timestamp::minus_infinity(),
            first_receive: Timestamp::plus_infinity(),
            last_receive: Timestamp::minus_infinity(),
            size_last_send: DataSize::zero(),
            size_first_receive: DataSize::zero(),
            size_total: DataSize::zero(),
        }
    }
}

impl AggregatedCluster {
    fn add(&mut self, packet_feedback: &PacketResult) {
        let send_time = packet_feedback.sent_packet.send_time;
        let size = packet_feedback.sent_packet.size;

        if send_time < self.first_send {
            self.first_send = send_time;
        }
        if send_time > self.last_send {
            self.last_send = send_time;
            self.size_last_send = size;
        }
        if packet_feedback.receive_time < self.first_receive {
            self.first_receive = packet_feedback.receive_time;
            self.size_first_receive = size;
        }
        if packet_feedback.receive_time > self.last_receive {
            self.last_receive = packet_feedback.receive_time;
        }
        self.size_total += size;
        self.num_probes += 1;
    }
}

/// Turns feedback about probe packets into a bitrate estimate, one probe
/// cluster at a time.
///
/// The optional event log receives a success or failure event for every
/// cluster that had enough feedback to be evaluated.
pub struct ProbeBitrateEstimator<'a> {
    event_log: Option<&'a dyn RtcEventLog>,
    clusters: HashMap<i32, AggregatedCluster>,
    estimated_data_rate: Option<DataRate>,
}

impl Default for ProbeBitrateEstimator<'_> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<'a> ProbeBitrateEstimator<'a> {
    // The minumum number of probes we need to receive feedback about in percent
    // in order to have a valid estimate.
    const MIN_RECEIVED_PROBES_RATIO: f64 = 0.80;

    // The minumum number of bytes we need to receive feedback about in percent
    // in order to have a valid estimate.
    const MIN_RECEIVED_BYTES_RATIO: f64 = 0.80;

    // The maximum |receive rate| / |send rate| ratio for a valid estimate.
    const MAX_VALID_RATIO: f64 = 2.0;

    // The minimum |receive rate| / |send rate| ratio assuming that the link is
    // not saturated, i.e. we assume that we will receive at least
    // MIN_RATIO_FOR_UNSATURATED_LINK * |send rate| if |send rate| is less than
    // the link capacity.
    const MIN_RATIO_FOR_UNSATURATED_LINK: f32 = 0.9;

    // The target utilization of the link. If we know true link capacity
    // we'd like to send at 95% of that rate.
    const TARGET_UTILIZATION_FRACTION: f32 = 0.95;

    // The maximum time period over which the cluster history is retained.
    // This is also the maximum time period beyond which a probing burst is not
    // expected to last.
    const MAX_CLUSTER_HISTORY: TimeDelta = TimeDelta::from_seconds(1);

    // The maximum time interval between first and the last probe on a cluster
    // on the sender side as well as the receive side.
    const MAX_PROBE_INTERVAL: TimeDelta = TimeDelta::from_seconds(1);

    pub fn new(event_log: Option<&'a dyn RtcEventLog>) -> Self {
        Self {
            event_log,
            clusters: HashMap::new(),
            estimated_data_rate: None,
        }
    }

    /// Should be called for every probe packet we receive feedback about.
    /// Returns the estimated bitrate if the probe completes a valid cluster.
    pub fn handle_probe_and_estimate_bitrate(
        &mut self,
        packet_feedback: &PacketResult,
    ) -> Option<DataRate> {
        let pacing_info = &packet_feedback.sent_packet.pacing_info;
        let cluster_id: i32 = pacing_info.probe_cluster_id;
        assert!(pacing_info.is_probe());
        debug_assert!(packet_feedback.is_received());
        assert!(pacing_info.probe_cluster_min_probes > 0);
        assert!(pacing_info.probe_cluster_min_bytes > 0);

        self.erase_old_clusters(packet_feedback.receive_time);

        let cluster: &mut AggregatedCluster = self.clusters.entry(cluster_id).or_default();
        cluster.add(packet_feedback);

        let min_probes: i32 =
            (pacing_info.probe_cluster_min_probes as f64 * Self::MIN_RECEIVED_PROBES_RATIO) as i32;
        let min_size: DataSize = DataSize::from_bytes(pacing_info.probe_cluster_min_bytes as i64)
            * Self::MIN_RECEIVED_BYTES_RATIO;
        if cluster.num_probes < min_probes || cluster.size_total < min_size {
            return None;
        }

        let send_interval: TimeDelta = cluster.last_send - cluster.first_send;
        let receive_interval: TimeDelta = cluster.last_receive - cluster.first_receive;

        if send_interval <= TimeDelta::zero()
            || send_interval > Self::MAX_PROBE_INTERVAL
            || receive_interval <= TimeDelta::zero()
            || receive_interval > Self::MAX_PROBE_INTERVAL
        {
            tracing::info!(
                "Probing unsuccessful, invalid send/receive interval [cluster id: {}] [send interval: {:?}] [receive interval: {:?}]",
                cluster_id,
                send_interval,
                receive_interval
            );
            self.log_failure(cluster_id, ProbeFailureReason::InvalidSendReceiveInterval);
            return None;
        }

        // Since the `send_interval` does not include the time it takes to actually
        // send the last packet the size of the last sent packet should not be
        // included when calculating the send bitrate.
        // Zero-sized probe packets are a caller bug and trip these checks.
        debug_assert!(cluster.size_total > cluster.size_last_send);
        let send_size: DataSize = cluster.size_total - cluster.size_last_send;
        let send_rate: DataRate = send_size / send_interval;

        // Since the `receive_interval` does not include the time it takes to
        // actually receive the first packet the size of the first received packet
        // should not be included when calculating the receive bitrate.
        debug_assert!(cluster.size_total > cluster.size_first_receive);
        let receive_size: DataSize = cluster.size_total - cluster.size_first_receive;
        let receive_rate: DataRate = receive_size / receive_interval;

        let ratio: f64 = receive_rate / send_rate;
        if ratio > Self::MAX_VALID_RATIO {
            tracing::info!(
                "Probing unsuccessful, receive/send ratio too high [cluster id: {}] [send: {:?} / {:?} = {:?}] [receive: {:?} / {:?} = {:?}] [ratio: {:?} / {:?} = {} > {}]",
                cluster_id,
                send_size,
                send_interval,
                send_rate,
                receive_size,
                receive_interval,
                receive_rate,
                receive_rate,
                send_rate,
                ratio,
                Self::MAX_VALID_RATIO
            );
            self.log_failure(cluster_id, ProbeFailureReason::InvalidSendReceiveRatio);
            return None;
        }

        tracing::info!(
            "Probing successful [cluster id: {}] [send: {:?} / {:?} = {:?}] [receive: {:?} / {:?} = {:?}]",
            cluster_id,
            send_size,
            send_interval,
            send_rate,
            receive_size,
            receive_interval,
            receive_rate
        );

        let mut res: DataRate = std::cmp::min(send_rate, receive_rate);
        // If we're receiving at significantly lower bitrate than we were sending at,
        // it suggests that we've found the true capacity of the link. In this case,
        // set the target bitrate slightly lower to not immediately overuse.
        if receive_rate < Self::MIN_RATIO_FOR_UNSATURATED_LINK * send_rate {
            debug_assert!(send_rate > receive_rate);
            res = Self::TARGET_UTILIZATION_FRACTION * receive_rate;
        }
        if let Some(event_log) = self.event_log {
            event_log.log(
                RtcEventProbeResultSuccess {
                    id: cluster_id,
                    bitrate_bps: res.bps(),
                }
                .into(),
            );
        }
        self.estimated_data_rate = Some(res);
        self.estimated_data_rate
    }

    /// Returns the last estimate, if any, and forgets it.
    pub fn fetch_and_reset_last_estimated_bitrate(&mut self) -> Option<DataRate> {
        self.estimated_data_rate.take()
    }

    fn log_failure(&self, cluster_id: i32, failure_reason: ProbeFailureReason) {
        if let Some(event_log) = self.event_log {
            event_log.log(
                RtcEventProbeResultFailure {
                    id: cluster_id,
                    failure_reason,
                }
                .into(),
            );
        }
    }

    // Erases old cluster data that was seen before `timestamp`.
    fn erase_old_clusters(&mut self, timestamp: Timestamp) {
        self.clusters
            .retain(|_, cluster| cluster.last_receive + Self::MAX_CLUSTER_HISTORY >= timestamp);
    }
}
