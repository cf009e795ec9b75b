// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::Error,
    packet::number::{PacketNumber, PacketNumberRange},
    trace,
};
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

/// A data structure for tracking packets that are pending acknowledgement
///
/// The following assumptions are made and exploited
///
/// * Packet numbers are monotonically generated and inserted
/// * Packet numbers will mostly be removed from the front
/// * Packet numbers that are deemed lost stay in the map until they are expired
///
/// This is implemented as a buffer ring with a moving range for the lower and upper bound of
/// contained packet numbers. The following example illustrates how each field tracks state:
///
/// ```ignore
/// packets = [ PN(2), None, PN(0), PN(1) ]
///                           ^ index = 2
/// start = PN(0)
/// end = PN(2)
/// ```
///
/// Upon inserting `PN(3)` the state is now:
///
/// ```ignore
/// packets = [ PN(2), PN(3), PN(0), PN(1) ]
///                           ^ index = 2
/// start = PN(0)
/// end = PN(3)
/// ```
///
/// Upon removing `PN(0)` the state is now:
///
/// ```ignore
/// packets = [ PN(2), PN(3), None, PN(1) ]
///                                 ^ index = 3
/// start = PN(1)
/// end = PN(3)
/// ```
///
/// Inserting a packet number that is `capacity` or more packets ahead of `start` doubles the
/// capacity. The occupied part of the ring is copied to the front of the new buffer, unwrapping
/// it in the process, so each slot keeps its association with its packet number.
pub struct Map<V> {
    /// The stored values for each packet number
    values: Box<[Option<V>]>,
    /// The smallest contained inclusive packet number in the map
    start: PacketNumber,
    /// The largest contained inclusive packet number in the map
    end: PacketNumber,
    /// The starting index of the first occupied packet
    ///
    /// This field will be set to the `packets.len()` if the map is empty
    index: usize,
    /// The number of occupied slots
    len: usize,
}

impl<V: fmt::Debug> fmt::Debug for Map<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Start with 8 sent packets at a time
///
/// Capacity will grow exponentially as more packet number entries are added
pub const DEFAULT_CAPACITY: usize = 8;

impl<V> Default for Map<V> {
    fn default() -> Self {
        let mut values = Vec::with_capacity(DEFAULT_CAPACITY);
        values.resize_with(DEFAULT_CAPACITY, || None);
        Self::from_values(values.into_boxed_slice())
    }
}

impl<V> Map<V> {
    /// Creates a map with room for `capacity` consecutive packet numbers
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Ok(Self::from_values(new_values(capacity.max(1))?))
    }

    #[inline]
    fn from_values(values: Box<[Option<V>]>) -> Self {
        // Set the index to the len (OOB) to indicate that it's empty
        let index = values.len();

        Self {
            values,
            start: PacketNumber::default(),
            end: PacketNumber::default(),
            index,
            len: 0,
        }
    }

    /// Inserts the given `value`
    ///
    /// Returns [`Error::OutOfMemory`] if the ring needed to grow and the allocation failed. In
    /// that case the map is left untouched.
    pub fn insert(&mut self, packet_number: PacketNumber, value: V) -> Result<(), Error> {
        if self.is_empty() {
            self.start = packet_number;
            self.end = packet_number;
            self.values[0] = Some(value);
            self.index = 0;
            self.len = 1;
            return Ok(());
        }

        // The implementation assumes monotonicity of insertion
        debug_assert!(
            packet_number > self.start && packet_number > self.end,
            "packet numbers should be monotonic: {:?} > {:?} && {:?}",
            packet_number,
            self.start,
            self.end
        );

        // check if we need to increase capacity
        let distance = packet_number
            .checked_distance(self.start)
            .and_then(|distance| usize::try_from(distance).ok())
            .ok_or(Error::OutOfMemory)?;

        let index = if distance >= self.values.len() {
            self.resize(distance)?;

            // use the distance as the index since we've already resized beyond it
            distance
        } else {
            (self.index + distance) % self.values.len()
        };

        self.values[index] = Some(value);
        self.end = packet_number;
        self.len += 1;

        Ok(())
    }

    /// Returns a reference to the `V` associated with the given `packet_number`
    #[inline]
    pub fn get(&self, packet_number: PacketNumber) -> Option<&V> {
        let index = self.pn_index(packet_number)?;
        self.values[index].as_ref()
    }

    /// Returns a mutable reference to the `V` associated with the given `packet_number`
    #[inline]
    pub fn get_mut(&mut self, packet_number: PacketNumber) -> Option<&mut V> {
        let index = self.pn_index(packet_number)?;
        self.values[index].as_mut()
    }

    /// Removes the value associated with the given `packet_number`
    /// and returns the value if it was present
    pub fn remove(&mut self, packet_number: PacketNumber) -> Option<V> {
        let index = self.pn_index(packet_number)?;
        let info = self.values[index].take()?;
        self.len -= 1;

        // update the bounds
        match (self.start == packet_number, self.end == packet_number) {
            // the bounds are inclusive so the map is now empty, reset it
            //              [_, _, _, 3]
            // remove(3) => [_, _, _, _]
            (true, true) => {
                self.reset();
            }
            // the packet was removed from the front
            //              [0, 1, _, 3, 4]
            // remove(0) => [_, 1, _, 3, 4]
            // remove(1) => [_, _, _, 3, 4]
            // remove(3) => [_, _, _, _, 4]
            (true, false) => {
                self.set_start(packet_number.next().unwrap());
            }
            // the packet was removed from the back
            //              [0, 1, _, 3, 4]
            // remove(4) => [0, 1, _, 3, _]
            // remove(3) => [0, 1, _, _, _]
            // remove(1) => [0, _, _, _, _]
            (false, true) => {
                self.set_end(packet_number.prev().unwrap());
            }
            // the packet was removed from the middle
            //              [0, 1, 2]
            // remove(2) => [0, _, 2]
            (false, false) => {
                // nothing to do
            }
        }

        Some(info)
    }

    /// Removes the oldest packet from the map
    #[inline]
    pub fn pop_front(&mut self) -> Option<(PacketNumber, V)> {
        let packet_number = self.first()?;
        let value = self.remove(packet_number)?;
        Some((packet_number, value))
    }

    /// Removes a range of packets from the map and returns their value
    #[inline]
    pub fn remove_range(&mut self, range: PacketNumberRange) -> RemoveIter<V> {
        RemoveIter::new(self, range)
    }

    /// Returns the smallest contained packet number
    #[inline]
    pub fn first(&self) -> Option<PacketNumber> {
        if self.is_empty() {
            None
        } else {
            Some(self.start)
        }
    }

    /// Returns the largest contained packet number
    #[inline]
    pub fn last(&self) -> Option<PacketNumber> {
        if self.is_empty() {
            None
        } else {
            Some(self.end)
        }
    }

    /// Returns the smallest contained packet number that is greater than `packet_number`
    ///
    /// Empty slots are skipped over, which is linear in the size of the gap.
    pub fn next_after(&self, packet_number: PacketNumber) -> Option<PacketNumber> {
        if self.is_empty() || packet_number >= self.end {
            return None;
        }

        let from = if packet_number < self.start {
            self.start
        } else {
            packet_number.next()?
        };

        PacketNumberRange::new(from, self.end)
            .find(|packet_number| self.get(*packet_number).is_some())
    }

    /// Get the inclusive PacketNumberRange
    #[inline]
    pub fn get_range(&self) -> PacketNumberRange {
        PacketNumberRange::new(self.start, self.end)
    }

    /// Gets an iterator over the sent packet entries, sorted by PacketNumber
    #[inline]
    pub fn iter(&self) -> Iter<V> {
        Iter::new(self)
    }

    /// Returns true if there are no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index == self.values.len()
    }

    /// Returns the number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of packet number slots in the ring
    #[inline]
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Removes and drops all of the entries
    #[inline]
    pub fn clear(&mut self) {
        if !self.is_empty() {
            let range = self.get_range();
            self.remove_range(range).for_each(drop);
        }
    }

    /// Marks the map as empty without touching the slots
    ///
    /// Callers must ensure every slot is already `None`.
    #[inline]
    fn reset(&mut self) {
        self.index = self.values.len();
    }

    #[inline]
    fn pn_index(&self, packet_number: PacketNumber) -> Option<usize> {
        // the map is empty so there are no valid entries
        if self.is_empty() {
            return None;
        }

        // make sure it's within the inserted packet numbers
        if packet_number > self.end {
            return None;
        }

        let offset = packet_number.checked_distance(self.start)?;
        let index = self.index.checked_add(offset as usize)?;
        let index = index % self.values.len();
        Some(index)
    }

    #[inline]
    fn set_start(&mut self, packet_number: PacketNumber) {
        // this function assumes we have at least one element
        debug_assert!(!self.is_empty());
        debug_assert!(packet_number >= self.start);
        debug_assert!(packet_number <= self.end);

        // find the next occupied slot
        for packet_number in PacketNumberRange::new(packet_number, self.end) {
            if self.get(packet_number).is_some() {
                let index = self
                    .pn_index(packet_number)
                    .expect("packet should be in bounds");

                self.index = index;
                self.start = packet_number;
                debug_assert!(self.start <= self.end);
                debug_assert_eq!(self.pn_index(packet_number), Some(index));
                return;
            }
        }

        unreachable!("could not find an occupied entry; map should be empty");
    }

    #[inline]
    fn set_end(&mut self, packet_number: PacketNumber) {
        // this function assumes we have at least one element
        debug_assert!(!self.is_empty());
        debug_assert!(packet_number >= self.start);
        debug_assert!(packet_number <= self.end);

        // find the next occupied slot
        for packet_number in PacketNumberRange::new(self.start, packet_number).rev() {
            if self.get(packet_number).is_some() {
                self.end = packet_number;
                debug_assert!(self.start <= self.end);
                return;
            }
        }

        unreachable!("could not find an occupied entry; map should be empty");
    }

    fn resize(&mut self, len: usize) -> Result<(), Error> {
        let prev_len = self.values.len();
        let mut new_len = prev_len;

        // grow capacity until we can fit the inserted PN
        loop {
            new_len = new_len.checked_mul(2).ok_or(Error::OutOfMemory)?;
            if len < new_len {
                break;
            }
        }

        // allocate before moving anything so a failure leaves the ring intact
        let mut values = Vec::new();
        if let Err(err) = values.try_reserve_exact(new_len) {
            trace::_debug!(prev_len, new_len, "sent packet ring allocation failed");
            return Err(err.into());
        }

        // The packets are stored in a ring so we copy from the index
        // to the end, then from the start to the index
        values.extend(self.values[self.index..].iter_mut().map(|v| v.take()));
        values.extend(self.values[..self.index].iter_mut().map(|v| v.take()));
        values.resize_with(new_len, || None);

        trace::_debug!(prev_len, new_len, "sent packet ring grew");

        // reset the index to the beginning of the buffer
        self.index = 0;
        self.values = values.into_boxed_slice();

        Ok(())
    }
}

fn new_values<V>(len: usize) -> Result<Box<[Option<V>]>, Error> {
    let mut values = Vec::new();
    values.try_reserve_exact(len)?;
    values.resize_with(len, || None);
    Ok(values.into_boxed_slice())
}

/// An iterator over all of the contained packet numbers
///
/// This iterator is optimized to reduce the amount of bounds checks being performed
#[derive(Debug)]
pub struct Iter<'a, V> {
    packets: &'a Map<V>,
    packet_number: Option<PacketNumber>,
    index: usize,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    #[inline]
    fn new(packets: &'a Map<V>) -> Self {
        let start = packets.start;
        let end = packets.end;
        let index = packets.index;

        let mut iter = Self {
            packets,
            packet_number: Some(start),
            index,
            // start with an empty iterator
            remaining: 0,
        };

        // make sure we have at least one packet
        if iter.packets.is_empty() {
            return iter;
        }

        // set the number of remaining entries based on the bounded range
        iter.remaining = (end.as_u64() - start.as_u64()) as usize;
        // we always have at least 1 items since the range is inclusive
        iter.remaining += 1;

        debug_assert!(iter.remaining <= iter.packets.values.len());

        iter
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (PacketNumber, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            self.remaining -= 1;

            let packet_number = self.packet_number?;
            self.packet_number = packet_number.next();

            let index = self.index;
            self.index = (index + 1) % self.packets.values.len();

            if let Some(info) = self.packets.values[index].as_ref() {
                return Some((packet_number, info));
            }
        }

        None
    }
}

/// An iterator which removes a set of packet numbers in a range
///
/// This iterator is optimized to reduce the amount of bounds checks being performed
#[derive(Debug)]
pub struct RemoveIter<'a, V> {
    packets: &'a mut Map<V>,
    packet_number: Option<PacketNumber>,
    index: usize,
    remaining: usize,
}

impl<'a, V> RemoveIter<'a, V> {
    #[inline]
    fn new(packets: &'a mut Map<V>, range: PacketNumberRange) -> Self {
        let mut start = packets.start;
        let mut end = packets.end;

        let index = packets.index;

        let mut iter = Self {
            packets,
            packet_number: None,
            index,
            // start with an empty iterator
            remaining: 0,
        };

        // make sure we have at least one packet
        if iter.packets.is_empty() {
            return iter;
        }

        // ensure the range overlaps with the contained items
        if range.end() < start || range.start() > end {
            return iter;
        }

        use core::cmp::Ordering::*;

        match (range.start().cmp(&start), range.end().cmp(&end)) {
            (Less, Equal) | (Less, Greater) | (Equal, Greater) | (Equal, Equal) => {
                // deleting all entries
                //
                // NOTE: this doesn't actually delete anything in the buffer; the
                // iterator takes every slot as it's drained
                iter.packets.reset();

                // no need to update index as it's already set to the lower bound
            }
            (Less, Less) | (Equal, Less) => {
                // deleting start
                end = range.end();

                iter.packets.set_start(end.next().unwrap());
            }
            (Greater, Greater) | (Greater, Equal) => {
                // deleting end
                start = range.start();

                iter.index = iter
                    .packets
                    .pn_index(start)
                    .expect("packet number bounds have already been checked");

                iter.packets.set_end(start.prev().unwrap());
            }
            (Greater, Less) => {
                // deleting middle part
                start = range.start();
                end = range.end();

                iter.index = iter
                    .packets
                    .pn_index(start)
                    .expect("packet number bounds have already been checked");
            }
        }

        // Update the starting packet number
        iter.packet_number = Some(start);
        // set the number of remaining entries based on the bounded range
        iter.remaining = (end.as_u64() - start.as_u64()) as usize;
        // we always have at least 1 items since the range is inclusive
        iter.remaining += 1;

        debug_assert!(iter.remaining <= iter.packets.values.len());

        iter
    }
}

impl<V> Iterator for RemoveIter<'_, V> {
    type Item = (PacketNumber, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            self.remaining -= 1;

            let packet_number = self.packet_number?;
            self.packet_number = packet_number.next();

            let index = self.index;
            self.index = (index + 1) % self.packets.values.len();

            if let Some(info) = self.packets.values[index].take() {
                self.packets.len -= 1;
                return Some((packet_number, info));
            }
        }

        None
    }
}

impl<V> Drop for RemoveIter<'_, V> {
    fn drop(&mut self) {
        // make sure the iterator is drained, otherwise the entries might dangle
        while self.next().is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use bolero::{check, generator::*};

    type TestMap = Map<u64>;

    fn pn(value: u64) -> PacketNumber {
        PacketNumber::new(value).unwrap()
    }

    #[test]
    fn insert_get_range() {
        let mut sent_packets = TestMap::default();

        let packet_number_1 = pn(1);
        let packet_number_2 = packet_number_1.next().unwrap();
        let packet_number_3 = packet_number_2.next().unwrap();

        sent_packets.insert(packet_number_1, 1).unwrap();
        sent_packets.insert(packet_number_2, 2).unwrap();

        assert!(sent_packets.get(packet_number_1).is_some());
        assert!(sent_packets.get(packet_number_2).is_some());
        assert!(sent_packets.get(packet_number_3).is_none());

        assert_eq!(sent_packets.get(packet_number_1).unwrap(), &1);
        assert_eq!(sent_packets.get(packet_number_2).unwrap(), &2);

        sent_packets.insert(packet_number_3, 3).unwrap();

        assert!(sent_packets.get(packet_number_3).is_some());
        assert_eq!(sent_packets.get(packet_number_3).unwrap(), &3);
        assert_eq!(sent_packets.len(), 3);

        for (packet_number, sent_packet_info) in sent_packets.iter() {
            assert_eq!(sent_packets.get(packet_number).unwrap(), sent_packet_info);
        }
    }

    #[test]
    fn remove() {
        let mut sent_packets = TestMap::default();
        let packet_number = pn(1);
        sent_packets.insert(packet_number, 1).unwrap();

        assert!(sent_packets.get(packet_number).is_some());
        assert_eq!(sent_packets.get(packet_number).unwrap(), &1);

        assert_eq!(Some(1), sent_packets.remove(packet_number));

        assert!(sent_packets.get(packet_number).is_none());
        assert!(sent_packets.is_empty());
        assert_eq!(sent_packets.len(), 0);

        // Removing a packet that was already removed doesn't panic
        assert_eq!(None, sent_packets.remove(packet_number));
    }

    #[test]
    fn empty() {
        let mut sent_packets = TestMap::default();
        assert!(sent_packets.is_empty());
        assert_eq!(sent_packets.first(), None);
        assert_eq!(sent_packets.last(), None);
        assert_eq!(sent_packets.next_after(pn(0)), None);

        sent_packets.insert(pn(1), 1).unwrap();
        assert!(!sent_packets.is_empty());
    }

    #[test]
    fn get_mut_test() {
        let mut sent_packets = TestMap::default();
        sent_packets.insert(pn(4), 4).unwrap();

        *sent_packets.get_mut(pn(4)).unwrap() += 1;

        assert_eq!(sent_packets.get(pn(4)), Some(&5));
        assert_eq!(sent_packets.get_mut(pn(3)), None);
        assert_eq!(sent_packets.get_mut(pn(5)), None);
    }

    #[test]
    fn next_after_skips_holes() {
        let mut sent_packets = TestMap::default();
        for value in [2, 3, 7, 9] {
            sent_packets.insert(pn(value), value).unwrap();
        }
        sent_packets.remove(pn(3));

        assert_eq!(sent_packets.next_after(pn(0)), Some(pn(2)));
        assert_eq!(sent_packets.next_after(pn(2)), Some(pn(7)));
        assert_eq!(sent_packets.next_after(pn(7)), Some(pn(9)));
        assert_eq!(sent_packets.next_after(pn(9)), None);
        assert_eq!(sent_packets.next_after(pn(100)), None);
    }

    #[test]
    fn pop_front_test() {
        let mut sent_packets = TestMap::default();
        for value in [5, 6, 8] {
            sent_packets.insert(pn(value), value).unwrap();
        }

        assert_eq!(sent_packets.pop_front(), Some((pn(5), 5)));
        assert_eq!(sent_packets.pop_front(), Some((pn(6), 6)));
        assert_eq!(sent_packets.first(), Some(pn(8)));
        assert_eq!(sent_packets.pop_front(), Some((pn(8), 8)));
        assert_eq!(sent_packets.pop_front(), None);
        assert!(sent_packets.is_empty());
    }

    #[test]
    fn clear_test() {
        let mut sent_packets = TestMap::default();
        for value in 0..5 {
            sent_packets.insert(pn(value), value).unwrap();
        }
        sent_packets.clear();

        assert!(sent_packets.is_empty());
        assert_eq!(sent_packets.len(), 0);

        // stale slots must not leak into the next generation of packets
        sent_packets.insert(pn(10), 10).unwrap();
        sent_packets.insert(pn(13), 13).unwrap();
        assert_eq!(sent_packets.get(pn(11)), None);
        assert_eq!(sent_packets.get(pn(12)), None);
        assert_eq!(sent_packets.iter().count(), 2);
    }

    #[test]
    fn growth_with_wraparound() {
        let mut sent_packets = TestMap::default();
        assert_eq!(sent_packets.capacity(), DEFAULT_CAPACITY);

        for value in 0..8 {
            sent_packets.insert(pn(value), value * 100).unwrap();
        }

        // free the front so the next inserts wrap around the end of the ring
        for value in 0..5 {
            assert_eq!(sent_packets.remove(pn(value)), Some(value * 100));
        }
        for value in 8..13 {
            sent_packets.insert(pn(value), value * 100).unwrap();
        }
        assert_eq!(sent_packets.capacity(), DEFAULT_CAPACITY);

        // packet 13 is 8 ahead of the oldest packet, which forces a resize of a wrapped ring
        sent_packets.insert(pn(13), 1300).unwrap();
        assert_eq!(sent_packets.capacity(), DEFAULT_CAPACITY * 2);

        let entries: Vec<_> = sent_packets.iter().map(|(pn, v)| (pn.as_u64(), *v)).collect();
        let expected: Vec<_> = (5..14).map(|value| (value, value * 100)).collect();
        assert_eq!(entries, expected);

        for value in 5..14 {
            assert_eq!(sent_packets.get(pn(value)), Some(&(value * 100)));
        }
    }

    #[test]
    fn growth_to_fit_large_gap() {
        let mut sent_packets = TestMap::default();
        sent_packets.insert(pn(3), 3).unwrap();
        sent_packets.insert(pn(3 + 100), 103).unwrap();

        assert!(sent_packets.capacity() > 100);
        assert_eq!(sent_packets.get(pn(3)), Some(&3));
        assert_eq!(sent_packets.get(pn(103)), Some(&103));
        assert_eq!(sent_packets.next_after(pn(3)), Some(pn(103)));
    }

    #[test]
    fn with_capacity_test() {
        let mut sent_packets = TestMap::with_capacity(0).unwrap();
        assert_eq!(sent_packets.capacity(), 1);

        sent_packets.insert(pn(0), 0).unwrap();
        sent_packets.insert(pn(1), 1).unwrap();
        assert_eq!(sent_packets.capacity(), 2);
        assert_eq!(sent_packets.len(), 2);
    }

    /// An operation to be performed against a model
    #[derive(Clone, Copy, Debug, TypeGenerator)]
    enum Operation {
        // Inserts the current packet number
        Insert,
        // Skips the packet number
        Skip,
        // Removes a packet number
        Remove(u16),
        // Removes the oldest packet number
        PopFront,
        // Removes a range of packet numbers
        RemoveRange(u16, u16),
        // Looks up the packet that follows the given packet number
        NextAfter(u16),
    }

    fn model(ops: &[Operation]) {
        let mut current = pn(0);

        /// Tracks the subject against an oracle to ensure differential equivalency
        #[derive(Debug, Default)]
        struct Model {
            subject: TestMap,
            oracle: BTreeMap<PacketNumber, u64>,
        }

        impl Model {
            pub fn insert(&mut self, packet_number: PacketNumber) {
                let value = packet_number.as_u64();

                self.subject.insert(packet_number, value).unwrap();
                self.oracle.insert(packet_number, value);
                self.check_consistency();
            }

            pub fn remove(&mut self, packet_number: PacketNumber) {
                assert_eq!(
                    self.subject.remove(packet_number),
                    self.oracle.remove(&packet_number)
                );
                self.check_consistency();
            }

            pub fn pop_front(&mut self) {
                let expected = self.oracle.pop_first();
                assert_eq!(self.subject.pop_front(), expected);
                self.check_consistency();
            }

            pub fn next_after(&self, packet_number: PacketNumber) {
                let expected = self
                    .oracle
                    .range(packet_number..)
                    .map(|(pn, _)| *pn)
                    .find(|pn| *pn > packet_number);
                assert_eq!(self.subject.next_after(packet_number), expected);
            }

            pub fn remove_range(&mut self, range: PacketNumberRange) {
                // trim range so we're not slamming the BTreeMap
                let range = if self.subject.is_empty() {
                    PacketNumberRange::new(range.start(), range.start())
                } else {
                    let start = range.start().max(self.subject.start);
                    let end = range.end().min(self.subject.end);
                    if start > end {
                        PacketNumberRange::new(start, start)
                    } else {
                        PacketNumberRange::new(start, end)
                    }
                };

                let actual: Vec<_> = self.subject.remove_range(range).collect();
                let mut expected = vec![];

                for pn in range {
                    if let Some(value) = self.oracle.remove(&pn) {
                        expected.push((pn, value));
                    }
                }

                assert_eq!(expected, actual);

                self.check_consistency();
            }

            fn check_consistency(&self) {
                assert_eq!(self.subject.len(), self.oracle.len());
                assert_eq!(self.subject.is_empty(), self.oracle.is_empty());
                assert_eq!(
                    self.subject.first(),
                    self.oracle.keys().next().copied()
                );
                assert_eq!(
                    self.subject.last(),
                    self.oracle.keys().next_back().copied()
                );

                let mut subject = self.subject.iter();
                let mut oracle = self.oracle.iter();
                loop {
                    match (subject.next(), oracle.next()) {
                        (Some(actual), Some((expected_pn, expected_info))) => {
                            assert_eq!((*expected_pn, expected_info), actual);
                        }
                        (None, None) => break,
                        (actual, expected) => {
                            panic!("expected: {expected:?}, actual: {actual:?}");
                        }
                    }
                }
            }
        }

        let mut model = Model::default();

        for op in ops.iter().copied() {
            match op {
                Operation::Insert => {
                    model.insert(current);
                    current = current.next().unwrap();
                }
                Operation::Skip => {
                    current = current.next().unwrap();
                }
                Operation::Remove(value) => {
                    model.remove(pn(value as u64));
                }
                Operation::PopFront => {
                    model.pop_front();
                }
                Operation::RemoveRange(start, end) => {
                    let (start, end) = if start > end {
                        (end, start)
                    } else {
                        (start, end)
                    };
                    let range = PacketNumberRange::new(pn(start as u64), pn(end as u64));

                    model.remove_range(range);
                }
                Operation::NextAfter(value) => {
                    model.next_after(pn(value as u64));
                }
            }
        }
    }

    #[test]
    fn differential_test() {
        check!()
            .with_type::<Vec<Operation>>()
            .for_each(|ops| model(ops))
    }

    #[test]
    #[cfg_attr(kani, kani::proof, kani::unwind(9), kani::solver(kissat))]
    fn insert_value() {
        // Confirm that a value is inserted
        check!().with_type().cloned().for_each(|pn: PacketNumber| {
            let mut map = Map::default();
            assert!(map.is_empty());

            map.insert(pn, ()).unwrap();

            assert!(map.get(pn).is_some());
            assert!(!map.is_empty());
        });
    }
}
