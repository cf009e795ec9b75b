// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//= https://www.rfc-editor.org/rfc/rfc9000#section-13.3
//# New tokens (NEW_TOKEN frames) are retransmitted if the packet
//# containing them is determined to be lost.

/// Records a NEW_TOKEN frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewToken {
    /// Set while the packet carrying the token has not been resolved
    pub is_inflight: bool,
    /// The generation of the token that was sent
    ///
    /// A lost token is only retransmitted if no newer generation has been issued.
    pub generation: u64,
}
