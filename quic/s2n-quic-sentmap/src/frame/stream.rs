// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::stream::StreamId;

//= https://www.rfc-editor.org/rfc/rfc9000#section-13.3
//# Application data sent in STREAM frames is retransmitted in new STREAM
//# frames unless the endpoint has sent a RESET_STREAM for that stream.

/// Records the span of stream data carried by a STREAM frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stream {
    pub stream_id: StreamId,
    /// Offset of the first byte that was sent
    pub start: u64,
    /// Offset one past the last byte that was sent
    pub end: u64,
    /// Set if the frame carried the FIN bit
    pub is_fin: bool,
}

/// Records that a RESET_STREAM or STOP_SENDING frame was sent for a stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamStateSender {
    pub stream_id: StreamId,
}
