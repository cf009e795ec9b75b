// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Types and utilities around the QUIC Stream identifier

use crate::stream::StreamType;
#[cfg(any(test, feature = "generator"))]
use bolero_generator::prelude::*;

/// The largest value a stream identifier can take
const MAX_STREAM_ID: u64 = (1 << 62) - 1;

/// The ID of a stream.
///
/// A stream ID is a 62-bit integer (0 to 2^62-1) that is unique for all streams
/// on a connection.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
pub struct StreamId(u64);

#[cfg(any(test, feature = "generator"))]
impl TypeGenerator for StreamId {
    fn generate<D: bolero_generator::Driver>(driver: &mut D) -> Option<Self> {
        let value = (0..=MAX_STREAM_ID).generate(driver)?;
        Some(Self(value))
    }
}

impl From<StreamId> for u64 {
    fn from(id: StreamId) -> Self {
        id.0
    }
}

impl StreamId {
    /// Creates a Stream ID, returning `None` if the value exceeds 2^62-1
    #[inline]
    pub const fn new(id: u64) -> Option<StreamId> {
        if id > MAX_STREAM_ID {
            None
        } else {
            Some(StreamId(id))
        }
    }

    #[inline]
    pub const fn from_u32(id: u32) -> StreamId {
        StreamId(id as u64)
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns `true` if the Stream was opened by the client
    #[inline]
    pub fn is_client_initiated(self) -> bool {
        //= https://www.rfc-editor.org/rfc/rfc9000#section-2.1
        //# The least significant bit (0x1) of the stream ID identifies the
        //# initiator of the stream.  Client-initiated streams have even-numbered
        //# stream IDs (with the bit set to 0)
        self.0 & 0x01 == 0
    }

    /// Returns whether the Stream is unidirectional or bidirectional.
    #[inline]
    pub fn stream_type(self) -> StreamType {
        //= https://www.rfc-editor.org/rfc/rfc9000#section-2.1
        //# The second least significant bit (0x2) of the stream ID distinguishes
        //# between bidirectional streams (with the bit set to 0) and
        //# unidirectional streams (with the bit set to 1).
        if self.0 & 0x02 == 0 {
            StreamType::Bidirectional
        } else {
            StreamType::Unidirectional
        }
    }
}
