// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::Limit;
use crate::stream::{StreamId, StreamType};

//= https://www.rfc-editor.org/rfc/rfc9000#section-13.3
//# The current connection maximum data is sent in MAX_DATA frames.  An
//# updated value is sent in a MAX_DATA frame if the packet containing
//# the most recently sent MAX_DATA frame is declared lost or when the
//# endpoint decides to update the limit.

/// Records a MAX_DATA advertisement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxData {
    pub sent: Limit,
}

/// Records a MAX_STREAM_DATA advertisement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxStreamData {
    pub stream_id: StreamId,
    pub sent: Limit,
}

/// Records a MAX_STREAMS advertisement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxStreams {
    pub stream_type: StreamType,
    pub sent: Limit,
}

/// Records a STREAMS_BLOCKED signal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamsBlocked {
    pub stream_type: StreamType,
    pub sent: Limit,
}
