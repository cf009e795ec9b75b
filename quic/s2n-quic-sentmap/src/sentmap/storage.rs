// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::Error,
    packet::number::{Map, PacketNumber},
};

/// Ordered storage of packet records keyed by strictly increasing packet numbers
///
/// Implementations only need to support appending at the back; records can be removed
/// from anywhere.
pub trait Storage<V>: Default {
    /// Appends `value` under `packet_number`
    ///
    /// `packet_number` must be larger than any number inserted before. On failure the
    /// storage is left unchanged.
    fn insert(&mut self, packet_number: PacketNumber, value: V) -> Result<(), Error>;

    fn get(&self, packet_number: PacketNumber) -> Option<&V>;

    fn get_mut(&mut self, packet_number: PacketNumber) -> Option<&mut V>;

    fn remove(&mut self, packet_number: PacketNumber) -> Option<V>;

    /// Removes and returns the oldest record
    fn pop_front(&mut self) -> Option<(PacketNumber, V)>;

    /// Returns the packet number of the oldest record
    fn first(&self) -> Option<PacketNumber>;

    /// Returns the packet number of the oldest record newer than `packet_number`
    fn next_after(&self, packet_number: PacketNumber) -> Option<PacketNumber>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every record, oldest first
    #[inline]
    fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<V> Storage<V> for Map<V> {
    #[inline]
    fn insert(&mut self, packet_number: PacketNumber, value: V) -> Result<(), Error> {
        Map::insert(self, packet_number, value)
    }

    #[inline]
    fn get(&self, packet_number: PacketNumber) -> Option<&V> {
        Map::get(self, packet_number)
    }

    #[inline]
    fn get_mut(&mut self, packet_number: PacketNumber) -> Option<&mut V> {
        Map::get_mut(self, packet_number)
    }

    #[inline]
    fn remove(&mut self, packet_number: PacketNumber) -> Option<V> {
        Map::remove(self, packet_number)
    }

    #[inline]
    fn pop_front(&mut self) -> Option<(PacketNumber, V)> {
        Map::pop_front(self)
    }

    #[inline]
    fn first(&self) -> Option<PacketNumber> {
        Map::first(self)
    }

    #[inline]
    fn next_after(&self, packet_number: PacketNumber) -> Option<PacketNumber> {
        Map::next_after(self, packet_number)
    }

    #[inline]
    fn len(&self) -> usize {
        Map::len(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Map::is_empty(self)
    }

    #[inline]
    fn clear(&mut self) {
        Map::clear(self)
    }
}
