// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::packet::number::PacketNumberRange;

/// Records that an ACK frame was sent
///
/// Once the packet carrying this frame is acknowledged, the peer is known to have seen
/// the acknowledgements for `range` and the receiver can stop repeating them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ack {
    /// The range of received packet numbers that were acknowledged
    pub range: PacketNumberRange,
}
