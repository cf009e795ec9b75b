// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#[cfg(any(test, feature = "generator"))]
use bolero_generator::prelude::*;

/// A flow control value that was advertised to the peer
///
/// Senders keep one of these next to each limit they announce. A copy is stored in the
/// sent packet so the owner can tell whether the loss of that packet still matters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "generator"), derive(TypeGenerator))]
pub struct Limit {
    /// The advertised value
    pub value: u64,
    /// Set while the packet carrying the value has not been resolved
    pub is_inflight: bool,
}

impl Limit {
    /// Creates a limit for a value that is about to be transmitted
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            is_inflight: true,
        }
    }

    /// Marks the value as no longer in flight
    ///
    /// Returns `true` if the value was in flight before the call.
    #[inline]
    pub fn clear_inflight(&mut self) -> bool {
        core::mem::replace(&mut self.is_inflight, false)
    }
}
