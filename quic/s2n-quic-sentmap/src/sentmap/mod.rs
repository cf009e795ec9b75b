// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Tracks packets from the moment they are sent until they are acknowledged, declared lost
//! or expired.
//!
//! Packets are recorded in a transaction:
//!
//! ```
//! use s2n_quic_sentmap::{
//!     frame,
//!     packet::{number::PacketNumber, Epoch},
//!     sentmap::SentMap,
//!     stream::StreamId,
//!     time::{Clock, NoopClock},
//! };
//!
//! let mut sentmap = SentMap::new();
//!
//! sentmap
//!     .prepare(PacketNumber::from_u8(0), NoopClock.get_time(), Epoch::OneRtt)
//!     .unwrap();
//! sentmap.allocate_frame(frame::Stream {
//!     stream_id: StreamId::from_u32(0),
//!     start: 0,
//!     end: 1000,
//!     is_fin: false,
//! });
//! sentmap.commit(1200);
//!
//! assert_eq!(sentmap.bytes_in_flight(), 1200);
//! ```
//!
//! and later resolved through a [`Cursor`], which hands every frame record of a resolved
//! packet to a [`Context`].

use crate::{
    error::Error,
    frame::{AckElicitation, Frame},
    packet::{
        number::{Map, PacketNumber, PacketNumberRange},
        Epoch,
    },
    time::Timestamp,
    trace,
};

#[cfg(any(test, feature = "generator"))]
use bolero_generator::prelude::*;

mod context;
mod cursor;
mod packet;
mod queue;
mod storage;

#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use context::Context;
pub use cursor::Cursor;
pub use packet::{PacketInfo, SentPacket};
pub use queue::Queue;
pub use storage::Storage;

/// The maximum number of frame records a single packet can carry
pub const FRAME_CAPACITY: usize = 64;

/// The way a tracked packet was resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "generator"), derive(TypeGenerator))]
pub enum Event {
    /// The packet was acknowledged by the peer
    Acked,
    /// The packet was declared lost
    ///
    /// The packet stays in the map so a late acknowledgement can still be processed.
    Lost,
    /// The packet is no longer tracked
    ///
    /// Packets still in flight are reported as [`Event::Lost`] before being expired.
    Expired,
}

impl Event {
    #[inline]
    pub fn is_acked(self) -> bool {
        matches!(self, Self::Acked)
    }

    #[inline]
    pub fn is_lost(self) -> bool {
        matches!(self, Self::Lost)
    }

    #[inline]
    pub fn is_expired(self) -> bool {
        matches!(self, Self::Expired)
    }
}

/// Packets sent on a connection that have not been resolved yet
///
/// `S` selects the storage engine. The default packet number [`Map`] is a ring with
/// constant time lookups. [`Queue`] trades lookups for memory proportional to the number of
/// tracked packets.
#[derive(Debug)]
pub struct SentMap<S = Map<SentPacket>> {
    packets: S,
    bytes_in_flight: usize,
    /// The packet number of the packet being built, if any
    open: Option<PacketNumber>,
    largest_sent: Option<PacketNumber>,
}

impl<S: Storage<SentPacket>> Default for SentMap<S> {
    #[inline]
    fn default() -> Self {
        Self::with_storage(S::default())
    }
}

impl SentMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map whose packet ring starts out with room for `capacity` packet numbers
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Ok(Self::with_storage(Map::with_capacity(capacity)?))
    }
}

impl<S: Storage<SentPacket>> SentMap<S> {
    /// Creates a map on top of an empty storage engine
    #[inline]
    pub fn with_storage(packets: S) -> Self {
        debug_assert!(packets.is_empty(), "storage must start out empty");
        Self {
            packets,
            bytes_in_flight: 0,
            open: None,
            largest_sent: None,
        }
    }

    /// Returns `true` while a packet is being built
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Returns the sum of the in-flight sizes of every unresolved packet
    #[inline]
    pub fn bytes_in_flight(&self) -> usize {
        self.bytes_in_flight
    }

    /// Returns the number of tracked packets, including the one being built
    #[inline]
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Returns the largest packet number that was ever prepared
    #[inline]
    pub fn largest_sent(&self) -> Option<PacketNumber> {
        self.largest_sent
    }

    #[inline]
    pub fn get(&self, packet_number: PacketNumber) -> Option<&SentPacket> {
        self.packets.get(packet_number)
    }

    /// Iterates over the tracked packets from oldest to newest
    #[inline]
    pub fn iter(&self) -> Iter<'_, S> {
        Iter {
            packets: &self.packets,
            next: self.packets.first(),
        }
    }

    /// Starts tracking a packet that is about to be built
    ///
    /// The packet stays open until [`Self::commit`] is called. Frames are attached to it with
    /// [`Self::allocate_frame`].
    ///
    /// Returns [`Error::OutOfMemory`] if the packet record could not be allocated, in which
    /// case the map is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if a packet is already open or if `packet_number` isn't larger than every packet
    /// number prepared before.
    pub fn prepare(
        &mut self,
        packet_number: PacketNumber,
        now: Timestamp,
        ack_epoch: Epoch,
    ) -> Result<(), Error> {
        assert!(
            !self.is_open(),
            "the previous packet must be committed before preparing {packet_number:?}"
        );
        assert!(!packet_number.is_end(), "the end marker can't be sent");
        if let Some(largest) = self.largest_sent {
            assert!(
                packet_number > largest,
                "packet numbers should be monotonic: {packet_number:?} > {largest:?}"
            );
        }

        let packet = SentPacket::try_new(packet_number, now, ack_epoch)?;
        if let Err(error) = self.packets.insert(packet_number, packet) {
            trace::_debug!(
                packet_number = packet_number.as_u64(),
                "could not allocate the sent packet"
            );
            return Err(error);
        }

        self.open = Some(packet_number);
        self.largest_sent = Some(packet_number);

        trace::_trace!(
            packet_number = packet_number.as_u64(),
            ?ack_epoch,
            "prepared sent packet"
        );

        Ok(())
    }

    /// Attaches a frame record to the open packet and returns it for in-place completion
    ///
    /// # Panics
    ///
    /// Panics if no packet is open or if the packet already carries
    /// [`FRAME_CAPACITY`] frames.
    pub fn allocate_frame<F: Into<Frame>>(&mut self, frame: F) -> &mut Frame {
        let packet_number = self
            .open
            .expect("a packet must be prepared before allocating frames");
        let packet = self
            .packets
            .get_mut(packet_number)
            .expect("the open packet is tracked until it is committed");
        packet.push_frame(frame.into())
    }

    /// Finishes the open packet
    ///
    /// A non-zero `bytes_in_flight` marks the packet as ack-eliciting and adds it to the
    /// in-flight total.
    ///
    /// # Panics
    ///
    /// Panics if no packet is open.
    pub fn commit(&mut self, bytes_in_flight: u16) {
        let packet_number = self
            .open
            .take()
            .expect("a packet must be prepared before it is committed");

        if bytes_in_flight == 0 {
            trace::_trace!(packet_number = packet_number.as_u64(), "committed sent packet");
            return;
        }

        if let Some(packet) = self.packets.get_mut(packet_number) {
            packet.info.ack_elicitation = AckElicitation::Eliciting;
            packet.info.bytes_in_flight = bytes_in_flight;
            self.bytes_in_flight += bytes_in_flight as usize;
        } else {
            debug_assert!(false, "the open packet is tracked until it is committed");
        }

        trace::_trace!(
            packet_number = packet_number.as_u64(),
            bytes_in_flight,
            total = self.bytes_in_flight,
            "committed sent packet"
        );
    }

    /// Returns a cursor positioned at the oldest packet
    #[inline]
    pub fn cursor(&mut self) -> Cursor<'_, S> {
        let current = self.packets.first();
        Cursor::new(self, current)
    }

    /// Returns a cursor positioned at the oldest packet numbered `packet_number` or later
    #[inline]
    pub fn cursor_at(&mut self, packet_number: PacketNumber) -> Cursor<'_, S> {
        let current = if self.packets.get(packet_number).is_some() {
            Some(packet_number)
        } else {
            self.packets.next_after(packet_number)
        };
        Cursor::new(self, current)
    }

    /// Acknowledges every tracked packet in `range`
    pub fn on_packet_ack<C: Context>(
        &mut self,
        range: PacketNumberRange,
        context: &mut C,
    ) -> Result<(), C::Error> {
        let mut cursor = self.cursor_at(range.start());

        // the end record compares greater than any range
        while cursor.get().packet_number <= range.end() {
            cursor.update(Event::Acked, context)?;
        }

        Ok(())
    }

    //= https://www.rfc-editor.org/rfc/rfc9002#section-6.4
    //# When Initial or Handshake keys are discarded, the Initial or
    //# Handshake packets can no longer be acknowledged, so they are removed
    //# from bytes in flight.

    /// Expires every packet whose ack epoch matches `epochs`
    ///
    /// Packets that were still in flight are reported as lost first.
    pub fn discard_epochs<F: Fn(Epoch) -> bool, C: Context>(
        &mut self,
        epochs: F,
        context: &mut C,
    ) -> Result<(), C::Error> {
        let mut cursor = self.cursor();

        while !cursor.is_end() {
            if epochs(cursor.get().ack_epoch) {
                cursor.update(Event::Expired, context)?;
            } else {
                cursor.skip();
            }
        }

        Ok(())
    }

    /// Expires packets sent before `threshold` that no longer count as in flight
    ///
    /// Those are packets declared lost earlier and kept around to absorb a late
    /// acknowledgement, as well as packets that never counted as in flight. The walk stops at
    /// the first packet sent at or after `threshold`.
    pub fn expire_before<C: Context>(
        &mut self,
        threshold: Timestamp,
        context: &mut C,
    ) -> Result<(), C::Error> {
        let mut cursor = self.cursor();

        // the end record is sent at `Timestamp::MAX`, which is never before `threshold`
        while cursor.get().time_sent < threshold {
            if cursor.get().is_in_flight() {
                cursor.skip();
            } else {
                cursor.update(Event::Expired, context)?;
            }
        }

        Ok(())
    }

    /// Drops every tracked packet without notifying any frame owner
    ///
    /// The map is empty and closed afterwards and can be reused.
    pub fn dispose(&mut self) {
        trace::_debug!(len = self.packets.len(), "disposing sent packets");

        self.packets.clear();
        self.bytes_in_flight = 0;
        self.open = None;
    }
}

/// Iterates over tracked packets from oldest to newest
pub struct Iter<'a, S> {
    packets: &'a S,
    next: Option<PacketNumber>,
}

impl<'a, S: Storage<SentPacket>> Iterator for Iter<'a, S> {
    type Item = &'a SentPacket;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let packet_number = self.next?;
        self.next = self.packets.next_after(packet_number);
        self.packets.get(packet_number)
    }
}
