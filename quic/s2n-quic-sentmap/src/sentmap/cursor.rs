// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{Context, Event, PacketInfo, SentMap, SentPacket, Storage};
use crate::{packet::number::PacketNumber, trace};

/// A position in a [`SentMap`] used to walk and resolve tracked packets
///
/// The cursor holds the map mutably so no packet can be prepared while it is alive.
#[derive(Debug)]
pub struct Cursor<'a, S> {
    map: &'a mut SentMap<S>,
    current: Option<PacketNumber>,
}

impl<'a, S: Storage<SentPacket>> Cursor<'a, S> {
    #[inline]
    pub(super) fn new(map: &'a mut SentMap<S>, current: Option<PacketNumber>) -> Self {
        Self { map, current }
    }

    /// Returns the packet under the cursor
    ///
    /// Once the cursor walked past the newest packet [`PacketInfo::END`] is returned.
    #[inline]
    pub fn get(&self) -> &PacketInfo {
        self.packet().map_or(&PacketInfo::END, SentPacket::info)
    }

    /// Returns the packet under the cursor along with its frame records
    #[inline]
    pub fn packet(&self) -> Option<&SentPacket> {
        let packet = self.map.packets.get(self.current?);
        debug_assert!(packet.is_some(), "the cursor points at a tracked packet");
        packet
    }

    /// Returns `true` if the cursor walked past the newest packet
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next packet without resolving the current one
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[inline]
    pub fn skip(&mut self) {
        let packet_number = self.current.expect("can't skip past the end of the sent map");
        self.current = self.map.packets.next_after(packet_number);
    }

    /// Resolves the packet under the cursor with `event` and moves to the next packet
    ///
    /// The packet is removed from the in-flight total. If it was still in flight and `event`
    /// is [`Event::Expired`], its frames are reported as [`Event::Lost`] before
    /// [`Event::Expired`]. Unless `event` is [`Event::Lost`] the packet is then discarded.
    ///
    /// The first error returned by `context` stops the notification of the remaining frames
    /// and is returned once the packet has been resolved. The cursor has already moved on
    /// when that happens.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    pub fn update<C: Context>(&mut self, event: Event, context: &mut C) -> Result<(), C::Error> {
        let packet_number = self
            .current
            .expect("can't update past the end of the sent map");

        debug_assert_ne!(
            self.map.open,
            Some(packet_number),
            "a packet can't be resolved before it is committed"
        );

        let map = &mut *self.map;

        let notify_lost = if let Some(packet) = map.packets.get_mut(packet_number) {
            let bytes_in_flight = core::mem::take(&mut packet.info.bytes_in_flight) as usize;
            debug_assert!(map.bytes_in_flight >= bytes_in_flight);
            map.bytes_in_flight -= bytes_in_flight;

            // in-flight packets that are expired were never declared lost
            bytes_in_flight != 0 && event.is_expired()
        } else {
            debug_assert!(false, "the cursor points at a tracked packet");
            false
        };

        // move on before notifying so the frame owners observe the resolved state
        self.current = map.packets.next_after(packet_number);

        let result = if let Some(packet) = map.packets.get_mut(packet_number) {
            let SentPacket { info, frames } = packet;
            let info = &*info;

            frames.iter_mut().try_for_each(|frame| {
                if notify_lost {
                    frame.on_event(context, info, Event::Lost)?;
                }
                frame.on_event(context, info, event)
            })
        } else {
            Ok(())
        };

        if !event.is_lost() {
            map.packets.remove(packet_number);
        }

        if result.is_err() {
            trace::_debug!(
                packet_number = packet_number.as_u64(),
                ?event,
                "frame notification failed"
            );
        }

        trace::_trace!(
            packet_number = packet_number.as_u64(),
            ?event,
            notify_lost,
            is_err = result.is_err(),
            bytes_in_flight = map.bytes_in_flight,
            "resolved sent packet"
        );

        result
    }
}
