// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#[cfg(any(test, feature = "generator"))]
use bolero_generator::prelude::*;

/// The key epoch a packet was protected with
///
/// Each epoch maps onto a packet number space. 0-RTT and 1-RTT packets share
/// the application data space, which is why a packet is tracked with the epoch
/// it will be acknowledged in rather than the one it was sent in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(any(test, feature = "generator"), derive(TypeGenerator))]
pub enum Epoch {
    #[default]
    Initial,
    ZeroRtt,
    Handshake,
    OneRtt,
}

impl Epoch {
    /// Returns `true` if the `Epoch` is set to `Initial`
    #[inline]
    pub fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }

    /// Returns `true` if the `Epoch` is set to `Handshake`
    #[inline]
    pub fn is_handshake(self) -> bool {
        matches!(self, Self::Handshake)
    }

    /// Returns `true` if the `Epoch` belongs to the application data space
    #[inline]
    pub fn is_application_data(self) -> bool {
        matches!(self, Self::ZeroRtt | Self::OneRtt)
    }

    /// Returns the epoch that acknowledges packets sent in this epoch
    ///
    /// 0-RTT packets are acknowledged in 1-RTT packets.
    #[inline]
    pub fn ack_epoch(self) -> Self {
        match self {
            Self::ZeroRtt => Self::OneRtt,
            epoch => epoch,
        }
    }
}
