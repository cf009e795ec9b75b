// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::FRAME_CAPACITY;
use crate::{
    error::Error,
    frame::{AckElicitable, AckElicitation, Frame},
    packet::{number::PacketNumber, Epoch},
    time::Timestamp,
};
use alloc::vec::Vec;

/// Packet-level metadata of a sent packet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct PacketInfo {
    /// The packet number the packet was sent with
    pub packet_number: PacketNumber,
    /// The time the packet was sent
    pub time_sent: Timestamp,
    /// The epoch whose ACK frames acknowledge the packet
    pub ack_epoch: Epoch,
    /// Set when the packet was committed with a non-zero in-flight size
    pub ack_elicitation: AckElicitation,
    /// Bytes the packet contributes to the in-flight total
    ///
    /// Zero once the packet has been resolved or if it never counted as in flight.
    pub bytes_in_flight: u16,
}

impl PacketInfo {
    /// The record reported by a cursor that walked past the newest packet
    ///
    /// Its packet number and send time compare greater than any real packet.
    pub const END: Self = Self {
        packet_number: PacketNumber::END,
        time_sent: Timestamp::MAX,
        ack_epoch: Epoch::Initial,
        ack_elicitation: AckElicitation::NonEliciting,
        bytes_in_flight: 0,
    };

    #[inline]
    pub(crate) fn new(packet_number: PacketNumber, time_sent: Timestamp, ack_epoch: Epoch) -> Self {
        Self {
            packet_number,
            time_sent,
            ack_epoch,
            ack_elicitation: AckElicitation::NonEliciting,
            bytes_in_flight: 0,
        }
    }

    /// Returns `true` if the packet counts towards bytes in flight
    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.bytes_in_flight != 0
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.packet_number.is_end()
    }
}

/// A tracked packet along with the frame records it carries
#[derive(Clone, Debug)]
pub struct SentPacket {
    pub(super) info: PacketInfo,
    pub(super) frames: Vec<Frame>,
}

impl SentPacket {
    /// Allocates a packet record with room for [`FRAME_CAPACITY`] frames
    pub(super) fn try_new(
        packet_number: PacketNumber,
        time_sent: Timestamp,
        ack_epoch: Epoch,
    ) -> Result<Self, Error> {
        let mut frames = Vec::new();
        frames.try_reserve_exact(FRAME_CAPACITY)?;

        Ok(Self {
            info: PacketInfo::new(packet_number, time_sent, ack_epoch),
            frames,
        })
    }

    #[inline]
    pub fn info(&self) -> &PacketInfo {
        &self.info
    }

    /// Returns the frame records in the order they were allocated
    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Appends a frame record and returns a handle to it
    ///
    /// # Panics
    ///
    /// Panics if the packet already holds [`FRAME_CAPACITY`] frames.
    #[inline]
    pub(super) fn push_frame(&mut self, frame: Frame) -> &mut Frame {
        let index = self.frames.len();
        assert!(
            index < FRAME_CAPACITY,
            "a sent packet can't hold more than {FRAME_CAPACITY} frames"
        );
        self.frames.push(frame);
        &mut self.frames[index]
    }
}

impl AckElicitable for SentPacket {
    /// Returns the ack elicitation implied by the frames the packet carries
    #[inline]
    fn ack_elicitation(&self) -> AckElicitation {
        self.frames.ack_elicitation()
    }
}
