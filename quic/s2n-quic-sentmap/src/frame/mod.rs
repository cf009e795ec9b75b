// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Records of the frames carried by a sent packet
//!
//! Each record holds just enough state for the frame's owner to react once the packet is
//! acknowledged, declared lost or expired. The owner is reached through the
//! [`Context`](crate::sentmap::Context) method that matches the record's variant.

use crate::sentmap::{Context, Event, PacketInfo};

mod ack;
pub mod ack_elicitation;
mod flow;
mod limit;
mod new_token;
mod stream;

pub use ack::Ack;
pub use ack_elicitation::{AckElicitable, AckElicitation};
pub use flow::{MaxData, MaxStreamData, MaxStreams, StreamsBlocked};
pub use limit::Limit;
pub use new_token::NewToken;
pub use stream::{Stream, StreamStateSender};

macro_rules! frames {
    ($($variant:ident => $handler:ident,)*) => {
        /// A frame record stored alongside a sent packet
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum Frame {
            $(
                $variant($variant),
            )*
        }

        $(
            impl From<$variant> for Frame {
                #[inline]
                fn from(frame: $variant) -> Self {
                    Self::$variant(frame)
                }
            }
        )*

        impl Frame {
            /// Notifies the owner of the frame that `event` happened to the packet
            #[inline]
            pub(crate) fn on_event<C: Context>(
                &mut self,
                context: &mut C,
                packet: &PacketInfo,
                event: Event,
            ) -> Result<(), C::Error> {
                match self {
                    $(
                        Self::$variant(frame) => context.$handler(packet, frame, event),
                    )*
                }
            }
        }

        impl AckElicitable for Frame {
            #[inline]
            fn ack_elicitation(&self) -> AckElicitation {
                match self {
                    $(
                        Self::$variant(frame) => frame.ack_elicitation(),
                    )*
                }
            }
        }
    };
}

frames!(
    Ack => on_ack_frame,
    Stream => on_stream_frame,
    MaxStreamData => on_max_stream_data_frame,
    MaxData => on_max_data_frame,
    MaxStreams => on_max_streams_frame,
    StreamsBlocked => on_streams_blocked_frame,
    StreamStateSender => on_stream_state_sender_frame,
    NewToken => on_new_token_frame,
);
