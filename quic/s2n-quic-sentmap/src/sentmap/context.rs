// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{Event, PacketInfo};
use crate::frame;

/// Receives the resolution of every frame record carried by a sent packet
///
/// When a packet is resolved, the method matching each of its frame records is called once
/// in the order the frames were allocated. Returning an error stops the notification of the
/// remaining frames of that packet; the packet itself is still resolved.
///
/// An [`Event::Expired`] packet that was still in flight is reported as [`Event::Lost`]
/// first, immediately followed by [`Event::Expired`], for each frame.
pub trait Context {
    type Error;

    fn on_ack_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::Ack,
        event: Event,
    ) -> Result<(), Self::Error>;

    fn on_stream_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::Stream,
        event: Event,
    ) -> Result<(), Self::Error>;

    fn on_max_stream_data_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::MaxStreamData,
        event: Event,
    ) -> Result<(), Self::Error>;

    fn on_max_data_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::MaxData,
        event: Event,
    ) -> Result<(), Self::Error>;

    fn on_max_streams_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::MaxStreams,
        event: Event,
    ) -> Result<(), Self::Error>;

    fn on_streams_blocked_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::StreamsBlocked,
        event: Event,
    ) -> Result<(), Self::Error>;

    fn on_stream_state_sender_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::StreamStateSender,
        event: Event,
    ) -> Result<(), Self::Error>;

    fn on_new_token_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::NewToken,
        event: Event,
    ) -> Result<(), Self::Error>;
}
