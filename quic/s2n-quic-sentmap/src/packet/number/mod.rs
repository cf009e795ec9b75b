// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//= https://www.rfc-editor.org/rfc/rfc9000#section-12.3
//# Packet numbers are divided into three spaces in QUIC:
//#
//# Initial space:  All Initial packets (Section 17.2.2) are in this
//#    space.
//#
//# Handshake space:  All Handshake packets (Section 17.2.4) are in this
//#    space.
//#
//# Application data space:  All 0-RTT (Section 17.2.3) and 1-RTT
//#    (Section 17.3.1) packets are in this space.

pub mod map;
pub use map::Map;

mod packet_number;
pub use packet_number::{PacketNumber, MAX_PACKET_NUMBER};

mod packet_number_range;
pub use packet_number_range::PacketNumberRange;

#[test]
#[cfg_attr(miri, ignore)] // snapshot tests don't work on miri
fn size_of_snapshots() {
    use core::mem::size_of;
    use insta::assert_debug_snapshot;

    assert_debug_snapshot!(size_of::<PacketNumber>(), @"8");
    assert_debug_snapshot!(size_of::<Option<PacketNumber>>(), @"16");
}
