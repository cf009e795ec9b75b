use bolero::{check, generator::*};
use core::convert::Infallible;
use s2n_quic_sentmap::{
    frame,
    packet::{
        number::{Map, PacketNumber, PacketNumberRange},
        Epoch,
    },
    sentmap::{Context, Event, PacketInfo, Queue, SentMap, SentPacket, Storage},
    stream::StreamId,
    time::{Duration, Timestamp},
};
use std::collections::HashMap;

fn main() {
    check!()
        .with_type::<Vec<Operation>>()
        .for_each(|operations| {
            Model::<Map<SentPacket>>::default().run(operations);
            Model::<Queue<SentPacket>>::default().run(operations);
        });
}

#[derive(Clone, Copy, Debug, TypeGenerator)]
enum Operation {
    /// Sends a packet carrying up to 3 stream frames
    Send {
        gap: u8,
        frames: u8,
        bytes_in_flight: u16,
    },
    /// Acknowledges a range relative to the oldest tracked packet
    Ack { offset: u8, len: u8 },
    /// Declares the oldest in-flight packets lost
    Lose { count: u8 },
    /// Expires packets sent before the given time that are no longer in flight
    Expire { millis: u8 },
}

#[derive(Clone, Copy, Debug)]
struct FrameState {
    is_inflight: bool,
    lost: bool,
    resolved: Option<Event>,
}

/// Tracks the fate of every byte range sent on a stream
#[derive(Debug, Default)]
struct Sender {
    frames: HashMap<u64, FrameState>,
}

impl Context for Sender {
    type Error = Infallible;

    fn on_ack_frame(
        &mut self,
        _packet: &PacketInfo,
        _frame: &mut frame::Ack,
        _event: Event,
    ) -> Result<(), Self::Error> {
        unreachable!("only stream frames are sent")
    }

    fn on_stream_frame(
        &mut self,
        packet: &PacketInfo,
        frame: &mut frame::Stream,
        event: Event,
    ) -> Result<(), Self::Error> {
        let state = self
            .frames
            .get_mut(&frame.start)
            .expect("notified frames were sent");

        assert!(
            state.resolved.is_none(),
            "{frame:?} in {packet:?} was already resolved"
        );

        match event {
            Event::Lost => {
                assert!(!state.lost, "{frame:?} was already lost");
                assert!(state.is_inflight);
                state.lost = true;
                state.is_inflight = false;
            }
            Event::Expired => {
                // in-flight frames are declared lost before they expire
                assert!(!state.is_inflight);
                state.resolved = Some(event);
            }
            Event::Acked => {
                state.is_inflight = false;
                state.resolved = Some(event);
            }
        }

        Ok(())
    }

    fn on_max_stream_data_frame(
        &mut self,
        _packet: &PacketInfo,
        _frame: &mut frame::MaxStreamData,
        _event: Event,
    ) -> Result<(), Self::Error> {
        unreachable!("only stream frames are sent")
    }

    fn on_max_data_frame(
        &mut self,
        _packet: &PacketInfo,
        _frame: &mut frame::MaxData,
        _event: Event,
    ) -> Result<(), Self::Error> {
        unreachable!("only stream frames are sent")
    }

    fn on_max_streams_frame(
        &mut self,
        _packet: &PacketInfo,
        _frame: &mut frame::MaxStreams,
        _event: Event,
    ) -> Result<(), Self::Error> {
        unreachable!("only stream frames are sent")
    }

    fn on_streams_blocked_frame(
        &mut self,
        _packet: &PacketInfo,
        _frame: &mut frame::StreamsBlocked,
        _event: Event,
    ) -> Result<(), Self::Error> {
        unreachable!("only stream frames are sent")
    }

    fn on_stream_state_sender_frame(
        &mut self,
        _packet: &PacketInfo,
        _frame: &mut frame::StreamStateSender,
        _event: Event,
    ) -> Result<(), Self::Error> {
        unreachable!("only stream frames are sent")
    }

    fn on_new_token_frame(
        &mut self,
        _packet: &PacketInfo,
        _frame: &mut frame::NewToken,
        _event: Event,
    ) -> Result<(), Self::Error> {
        unreachable!("only stream frames are sent")
    }
}

struct Model<S> {
    sentmap: SentMap<S>,
    sender: Sender,
    next_packet_number: u64,
    next_offset: u64,
    now: Duration,
}

impl<S: Storage<SentPacket>> Default for Model<S> {
    fn default() -> Self {
        Self {
            sentmap: SentMap::default(),
            sender: Sender::default(),
            next_packet_number: 0,
            next_offset: 0,
            now: Duration::ZERO,
        }
    }
}

impl<S: Storage<SentPacket>> Model<S> {
    fn run(mut self, operations: &[Operation]) {
        for operation in operations.iter().copied() {
            self.apply(operation);
            self.check_consistency();
        }

        // dropping the connection keys expires everything that's left
        self.sentmap
            .discard_epochs(|_| true, &mut self.sender)
            .unwrap();
        self.check_consistency();

        assert!(self.sentmap.is_empty());
        assert_eq!(self.sentmap.bytes_in_flight(), 0);
        for (offset, state) in self.sender.frames.iter() {
            assert!(state.resolved.is_some(), "frame at {offset} was never resolved");
        }
    }

    fn apply(&mut self, operation: Operation) {
        match operation {
            Operation::Send {
                gap,
                frames,
                bytes_in_flight,
            } => {
                self.next_packet_number += gap as u64;
                let packet_number = PacketNumber::new(self.next_packet_number).unwrap();
                self.next_packet_number += 1;

                self.sentmap
                    .prepare(
                        packet_number,
                        Timestamp::from_duration(self.now),
                        Epoch::OneRtt,
                    )
                    .unwrap();

                for _ in 0..(frames % 4) {
                    let start = self.next_offset;
                    self.next_offset += 100;

                    self.sentmap.allocate_frame(frame::Stream {
                        stream_id: StreamId::from_u32(0),
                        start,
                        end: self.next_offset,
                        is_fin: false,
                    });
                    self.sender.frames.insert(
                        start,
                        FrameState {
                            is_inflight: bytes_in_flight != 0,
                            lost: false,
                            resolved: None,
                        },
                    );
                }

                self.sentmap.commit(bytes_in_flight);
                self.now += Duration::from_millis(1);
            }
            Operation::Ack { offset, len } => {
                let Some(first) = self.sentmap.iter().next() else {
                    return;
                };
                let start = first.info().packet_number.as_u64() + offset as u64;
                let range = PacketNumberRange::new(
                    PacketNumber::new(start).unwrap(),
                    PacketNumber::new(start + len as u64).unwrap(),
                );
                self.sentmap
                    .on_packet_ack(range, &mut self.sender)
                    .unwrap();
            }
            Operation::Lose { count } => {
                let mut remaining = count % 8;
                let mut cursor = self.sentmap.cursor();
                while remaining > 0 && !cursor.is_end() {
                    if cursor.get().is_in_flight() {
                        cursor.update(Event::Lost, &mut self.sender).unwrap();
                        remaining -= 1;
                    } else {
                        cursor.skip();
                    }
                }
            }
            Operation::Expire { millis } => {
                let threshold = Timestamp::from_duration(Duration::from_millis(millis as u64));
                self.sentmap
                    .expire_before(threshold, &mut self.sender)
                    .unwrap();
            }
        }
    }

    fn check_consistency(&self) {
        assert!(!self.sentmap.is_open());

        let mut total = 0;
        let mut previous = None;
        for packet in self.sentmap.iter() {
            let info = packet.info();
            total += info.bytes_in_flight as usize;

            if let Some(previous) = previous {
                assert!(previous < info.packet_number);
            }
            previous = Some(info.packet_number);
        }

        assert_eq!(self.sentmap.bytes_in_flight(), total);
    }
}
