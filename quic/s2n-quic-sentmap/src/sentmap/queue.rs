// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::Storage;
use crate::{error::Error, packet::number::PacketNumber};
use alloc::collections::VecDeque;

/// Packet records kept in a double-ended queue ordered by packet number
///
/// Unlike the packet number [`Map`](crate::packet::number::Map), memory use is proportional
/// to the number of tracked packets rather than the span of packet numbers, at the cost of
/// logarithmic lookups and linear removal from the middle.
#[derive(Clone, Debug)]
pub struct Queue<V> {
    entries: VecDeque<(PacketNumber, V)>,
}

impl<V> Default for Queue<V> {
    #[inline]
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<V> Queue<V> {
    #[inline]
    fn position(&self, packet_number: PacketNumber) -> Option<usize> {
        self.entries
            .binary_search_by_key(&packet_number, |(packet_number, _)| *packet_number)
            .ok()
    }
}

impl<V> Storage<V> for Queue<V> {
    fn insert(&mut self, packet_number: PacketNumber, value: V) -> Result<(), Error> {
        debug_assert!(
            self.entries
                .back()
                .map_or(true, |(last, _)| packet_number > *last),
            "packet numbers should be monotonic: {packet_number:?}"
        );

        self.entries.try_reserve(1)?;
        self.entries.push_back((packet_number, value));
        Ok(())
    }

    #[inline]
    fn get(&self, packet_number: PacketNumber) -> Option<&V> {
        let index = self.position(packet_number)?;
        self.entries.get(index).map(|(_, value)| value)
    }

    #[inline]
    fn get_mut(&mut self, packet_number: PacketNumber) -> Option<&mut V> {
        let index = self.position(packet_number)?;
        self.entries.get_mut(index).map(|(_, value)| value)
    }

    #[inline]
    fn remove(&mut self, packet_number: PacketNumber) -> Option<V> {
        let index = self.position(packet_number)?;
        self.entries.remove(index).map(|(_, value)| value)
    }

    #[inline]
    fn pop_front(&mut self) -> Option<(PacketNumber, V)> {
        self.entries.pop_front()
    }

    #[inline]
    fn first(&self) -> Option<PacketNumber> {
        self.entries.front().map(|(packet_number, _)| *packet_number)
    }

    #[inline]
    fn next_after(&self, packet_number: PacketNumber) -> Option<PacketNumber> {
        let index = self
            .entries
            .partition_point(|(entry, _)| *entry <= packet_number);
        self.entries.get(index).map(|(packet_number, _)| *packet_number)
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn clear(&mut self) {
        self.entries.clear()
    }
}
