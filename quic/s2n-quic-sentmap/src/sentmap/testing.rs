// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{Event, PacketInfo};
use crate::{frame, packet::number::PacketNumber};
use alloc::vec::Vec;

/// A single notification received by a [`Context`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Call {
    pub packet_number: PacketNumber,
    pub frame: frame::Frame,
    pub event: Event,
}

/// The error returned by a [`Context`] configured to fail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Error {
    /// The index of the call that failed
    pub call: usize,
}

/// A [`super::Context`] that records every notification it receives
///
/// Limits that are reported as lost or expired have their in-flight flag cleared, the same
/// way a flow controller would.
#[derive(Debug, Default)]
pub struct Context {
    pub calls: Vec<Call>,
    /// Fails the notification with the given index
    pub fail_on: Option<usize>,
}

impl Context {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Default::default()
        }
    }

    /// Returns the packet numbers that received `event`, in notification order
    pub fn packets_with(&self, event: Event) -> Vec<PacketNumber> {
        let mut packets: Vec<PacketNumber> = Vec::new();
        for call in self.calls.iter().filter(|call| call.event == event) {
            if packets.last() != Some(&call.packet_number) {
                packets.push(call.packet_number);
            }
        }
        packets
    }

    fn record<F: Into<frame::Frame> + Copy>(
        &mut self,
        packet: &PacketInfo,
        frame: &F,
        event: Event,
    ) -> Result<(), Error> {
        let call = self.calls.len();
        self.calls.push(Call {
            packet_number: packet.packet_number,
            frame: (*frame).into(),
            event,
        });

        if self.fail_on == Some(call) {
            return Err(Error { call });
        }

        Ok(())
    }
}

fn on_limit(limit: &mut frame::Limit, event: Event) {
    if !event.is_acked() {
        limit.clear_inflight();
    }
}

impl super::Context for Context {
    type Error = Error;

    fn on_ack_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::Ack,
        event: Event,
    ) -> Result<(), Self::Error> {
        self.record(packet, &*frame, event)
    }

    fn on_stream_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::Stream,
        event: Event,
    ) -> Result<(), Self::Error> {
        self.record(packet, &*frame, event)
    }

    fn on_max_stream_data_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::MaxStreamData,
        event: Event,
    ) -> Result<(), Self::Error> {
        self.record(packet, &*frame, event)?;
        on_limit(&mut frame.sent, event);
        Ok(())
    }

    fn on_max_data_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::MaxData,
        event: Event,
    ) -> Result<(), Self::Error> {
        self.record(packet, &*frame, event)?;
        on_limit(&mut frame.sent, event);
        Ok(())
    }

    fn on_max_streams_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::MaxStreams,
        event: Event,
    ) -> Result<(), Self::Error> {
        self.record(packet, &*frame, event)?;
        on_limit(&mut frame.sent, event);
        Ok(())
    }

    fn on_streams_blocked_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::StreamsBlocked,
        event: Event,
    ) -> Result<(), Self::Error> {
        self.record(packet, &*frame, event)?;
        on_limit(&mut frame.sent, event);
        Ok(())
    }

    fn on_stream_state_sender_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::StreamStateSender,
        event: Event,
    ) -> Result<(), Self::Error> {
        self.record(packet, &*frame, event)
    }

    fn on_new_token_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::NewToken,
        event: Event,
    ) -> Result<(), Self::Error> {
        self.record(packet, &*frame, event)?;
        if !event.is_acked() {
            frame.is_inflight = false;
        }
        Ok(())
    }
}
