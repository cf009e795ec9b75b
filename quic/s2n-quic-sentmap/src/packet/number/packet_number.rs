// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

#[cfg(any(test, feature = "generator"))]
use bolero_generator::prelude::*;

//= https://www.rfc-editor.org/rfc/rfc9000#section-12.3
//# The packet number is an integer in the range 0 to 2^62-1.

/// The largest value a packet number can take
pub const MAX_PACKET_NUMBER: u64 = (1 << 62) - 1;

/// A fully-decoded packet number
///
/// Packet numbers handed to the sent map are strictly increasing, which makes
/// the packet number the primary key of every tracked packet.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PacketNumber(u64);

#[cfg(any(test, feature = "generator"))]
impl TypeGenerator for PacketNumber {
    fn generate<D: bolero_generator::Driver>(driver: &mut D) -> Option<Self> {
        let value = (0..=MAX_PACKET_NUMBER).generate(driver)?;
        Some(Self(value))
    }
}

impl Default for PacketNumber {
    #[inline]
    fn default() -> Self {
        Self(0)
    }
}

impl fmt::Debug for PacketNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_end() {
            return f.write_str("PacketNumber(END)");
        }
        f.debug_tuple("PacketNumber").field(&self.0).finish()
    }
}

impl fmt::Display for PacketNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PacketNumber {
    /// The largest valid packet number
    pub const MAX: Self = Self(MAX_PACKET_NUMBER);

    /// A marker that compares greater than every valid packet number
    ///
    /// Cursors that walked past the newest packet report this value so ordering
    /// comparisons against it don't need a separate end check.
    pub const END: Self = Self(u64::MAX);

    /// Creates a `PacketNumber`, returning `None` if the value is out of range
    #[inline]
    pub const fn new(value: u64) -> Option<Self> {
        if value > MAX_PACKET_NUMBER {
            None
        } else {
            Some(Self(value))
        }
    }

    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        Self(value as u64)
    }

    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        Self(value as u64)
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns `true` if the packet number is the end marker
    #[inline]
    pub const fn is_end(self) -> bool {
        self.0 == u64::MAX
    }

    /// Compute the next packet number. If the packet number has
    /// exceeded the maximum value allowed `None` will be returned.
    #[inline]
    pub fn next(self) -> Option<Self> {
        Self::new(self.0.checked_add(1)?)
    }

    /// Compute the previous packet number. If the packet number has
    /// underflowed `None` will be returned.
    #[inline]
    pub fn prev(self) -> Option<Self> {
        Some(Self(self.0.checked_sub(1)?))
    }

    /// Computes the distance between this packet number and the given packet number,
    /// returning None if overflow occurred.
    #[inline]
    pub fn checked_distance(self, rhs: PacketNumber) -> Option<u64> {
        self.0.checked_sub(rhs.0)
    }
}
