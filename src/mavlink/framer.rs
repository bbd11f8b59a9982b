use super::{
    view::{IncompatFlags, MavlinkVersion, MessageView},
    CHECKSUM_LEN, MAX_FRAME_LEN, SIGNATURE_LEN,
};
use crate::{buffer::BytesReader, Error};

/// Struct for configuring a [`Framer`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramerConfig {
    /// Start markers that begin a frame. Default is `[0xFD, 0xFE]` (v2 and v1).
    pub sync: &'static [u8],
}

impl FramerConfig {
    pub const fn default() -> Self {
        Self {
            sync: &[MavlinkVersion::V2 as u8, MavlinkVersion::V1 as u8],
        }
    }

    /// Accepts MAVLink 2 frames only.
    pub const fn v2_only() -> Self {
        Self {
            sync: &[MavlinkVersion::V2 as u8],
        }
    }
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self::default()
    }
}

/// State machine for reading a binary frame.
///
/// ```text
/// SeekSync -> ReadLength -> ReadIncompatFlags -> ReadCompatFlags -> ReadHeader
///    ^             |  (v1)                                          ^   |
///    |             +------------------------------------------------+   v
///    +---- ReadSignature <- ReadChecksum <------------------------ ReadPayload
///          (signed only)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    SeekSync,
    ReadLength,
    ReadIncompatFlags,
    ReadCompatFlags,
    ReadHeader { remaining: usize },
    ReadPayload { remaining: usize },
    ReadChecksum { remaining: usize },
    ReadSignature { remaining: usize },
}

enum Step {
    Pending,
    Complete,
    Failed(Error),
}

/// Incremental binary framer.
///
/// `N` is the working-buffer capacity; the default fits the largest signed v2 frame. Frames that
/// do not fit are reported as [`Error::BufferOverrun`] and skipped.
pub struct Framer<const N: usize = MAX_FRAME_LEN> {
    config: FramerConfig,
    state: State,
    version: MavlinkVersion,
    payload_len: usize,
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Framer<N> {
    pub const fn new(config: FramerConfig) -> Self {
        Self {
            config,
            state: State::SeekSync,
            version: MavlinkVersion::V2,
            payload_len: 0,
            buf: [0; N],
            len: 0,
        }
    }

    /// Abandons any partially read frame.
    pub fn reset(&mut self) {
        if self.state != State::SeekSync {
            debug!("discarding partial frame of {=usize} bytes", self.len);
        }
        self.state = State::SeekSync;
        self.len = 0;
    }

    /// Consumes a byte and returns a frame or a framing error if one is complete.
    pub fn push(&mut self, byte: u8) -> Option<Result<MessageView<'_>, Error>> {
        match self.step(byte) {
            Step::Pending => None,
            Step::Complete => Some(self.view()),
            Step::Failed(err) => Some(Err(err)),
        }
    }

    /// Consumes bytes until a frame or an error is available, returning it together with the
    /// input that was not consumed.
    pub fn push_bytes<'b>(
        &mut self,
        data: &'b [u8],
    ) -> (Option<Result<MessageView<'_>, Error>>, &'b [u8]) {
        let mut reader = BytesReader::new(data);
        while let Some(byte) = reader.next() {
            match self.step(byte) {
                Step::Pending => {}
                Step::Complete => return (Some(self.view()), reader.remaining()),
                Step::Failed(err) => return (Some(Err(err)), reader.remaining()),
            }
        }
        (None, reader.remaining())
    }

    fn view(&self) -> Result<MessageView<'_>, Error> {
        MessageView::from_frame(&self.buf[..self.len])
    }

    fn step(&mut self, byte: u8) -> Step {
        if self.state == State::SeekSync {
            if let Ok(version) = self.sync(byte) {
                trace!("frame start {=u8:#x}", byte);
                self.version = version;
                self.len = 0;
                self.state = State::ReadLength;
                return self.append(byte);
            }
            return Step::Pending;
        }

        if let Step::Failed(err) = self.append(byte) {
            return Step::Failed(err);
        }

        self.state = match self.state {
            State::SeekSync => State::SeekSync,
            State::ReadLength => {
                self.payload_len = byte as usize;
                match self.version {
                    MavlinkVersion::V2 => State::ReadIncompatFlags,
                    MavlinkVersion::V1 => State::ReadHeader {
                        remaining: MavlinkVersion::V1.header_len() - 2,
                    },
                }
            }
            State::ReadIncompatFlags => State::ReadCompatFlags,
            State::ReadCompatFlags => State::ReadHeader {
                remaining: MavlinkVersion::V2.header_len() - 4,
            },
            State::ReadHeader { remaining: 1 } => self.after_header(),
            State::ReadHeader { remaining } => State::ReadHeader {
                remaining: remaining - 1,
            },
            State::ReadPayload { remaining: 1 } => State::ReadChecksum {
                remaining: CHECKSUM_LEN,
            },
            State::ReadPayload { remaining } => State::ReadPayload {
                remaining: remaining - 1,
            },
            State::ReadChecksum { remaining: 1 } => {
                if self.is_signed() {
                    State::ReadSignature {
                        remaining: SIGNATURE_LEN,
                    }
                } else {
                    return self.complete();
                }
            }
            State::ReadChecksum { remaining } => State::ReadChecksum {
                remaining: remaining - 1,
            },
            State::ReadSignature { remaining: 1 } => return self.complete(),
            State::ReadSignature { remaining } => State::ReadSignature {
                remaining: remaining - 1,
            },
        };
        Step::Pending
    }

    fn sync(&self, byte: u8) -> Result<MavlinkVersion, Error> {
        if !self.config.sync.contains(&byte) {
            return Err(Error::InvalidMagic { byte });
        }
        MavlinkVersion::try_from(byte).map_err(|_| Error::InvalidMagic { byte })
    }

    fn after_header(&self) -> State {
        if self.payload_len == 0 {
            State::ReadChecksum {
                remaining: CHECKSUM_LEN,
            }
        } else {
            State::ReadPayload {
                remaining: self.payload_len,
            }
        }
    }

    fn is_signed(&self) -> bool {
        self.version == MavlinkVersion::V2 && IncompatFlags::from_bits(self.buf[2]).signed()
    }

    fn append(&mut self, byte: u8) -> Step {
        match self.buf.get_mut(self.len) {
            Some(slot) => {
                *slot = byte;
                self.len += 1;
                Step::Pending
            }
            None => {
                warn!("frame exceeds {=usize} byte buffer", N);
                self.state = State::SeekSync;
                self.len = 0;
                Step::Failed(Error::BufferOverrun)
            }
        }
    }

    fn complete(&mut self) -> Step {
        trace!("frame complete, {=usize} bytes", self.len);
        self.state = State::SeekSync;
        Step::Complete
    }
}

impl Default for Framer {
    fn default() -> Self {
        Self::new(FramerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mavlink::{
        codec::serialize,
        messages::{Attitude, ChangeOperatorControlAck, Heartbeat},
    };

    fn attitude_frame(buf: &mut [u8; MAX_FRAME_LEN]) -> usize {
        let msg = Attitude {
            time_boot_ms: 1000,
            roll: 0.5,
            pitch: -0.25,
            yaw: 1.5,
            rollspeed: 0.125,
            pitchspeed: -2.0,
            yawspeed: 1.0,
        };
        serialize(&msg, 1, 1, 0, buf).unwrap()
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut buf = [0; MAX_FRAME_LEN];
        let n = attitude_frame(&mut buf);

        let mut framer: Framer = Framer::default();
        let (last, rest) = buf[..n].split_last().unwrap();
        for &byte in rest {
            assert!(framer.push(byte).is_none());
        }
        match framer.push(*last) {
            Some(Ok(view)) => {
                assert_eq!(view.message_id(), 30);
                assert_eq!(view.payload().len(), 28);
                assert_eq!(view.sequence(), 0);
            }
            e => panic!("This frame should parse successfully: {e:?}"),
        }
    }

    #[test]
    fn test_chunking_does_not_matter() {
        let mut buf = [0; MAX_FRAME_LEN];
        let n = attitude_frame(&mut buf);
        let frame = &buf[..n];

        let mut whole: Framer = Framer::default();
        let (result, rest) = whole.push_bytes(frame);
        let expected_payload = {
            let view = result.unwrap().unwrap();
            let mut copy = [0u8; 28];
            copy.copy_from_slice(view.payload());
            copy
        };
        assert!(rest.is_empty());

        for chunk_len in [1, 2, 3, 7, 13] {
            let mut framer: Framer = Framer::default();
            let mut found = None;
            for chunk in frame.chunks(chunk_len) {
                let mut input = chunk;
                while !input.is_empty() {
                    let (result, rest) = framer.push_bytes(input);
                    if let Some(result) = result {
                        let view = result.unwrap();
                        let mut copy = [0u8; 28];
                        copy.copy_from_slice(view.payload());
                        found = Some(copy);
                    }
                    input = rest;
                }
            }
            assert_eq!(found, Some(expected_payload), "chunk length {chunk_len}");
        }
    }

    #[test]
    fn test_skips_garbage_between_frames() {
        let mut buf = [0; MAX_FRAME_LEN];
        let n = serialize(&ChangeOperatorControlAck::default(), 3, 4, 5, &mut buf).unwrap();

        let mut stream = [0u8; 64];
        stream[..3].copy_from_slice(&[0x00, 0x55, 0xAA]);
        stream[3..3 + n].copy_from_slice(&buf[..n]);
        stream[3 + n..3 + 2 * n].copy_from_slice(&buf[..n]);

        let mut framer: Framer = Framer::default();
        let mut count = 0;
        let mut input = &stream[..3 + 2 * n];
        while !input.is_empty() {
            let (result, rest) = framer.push_bytes(input);
            if let Some(result) = result {
                let view = result.unwrap();
                assert_eq!(view.message_id(), 6);
                assert_eq!(view.system_id(), 3);
                assert_eq!(view.component_id(), 4);
                assert_eq!(view.sequence(), 5);
                count += 1;
            }
            input = rest;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_buffer_overrun_then_recovers() {
        let mut big = [0; MAX_FRAME_LEN];
        let big_len = attitude_frame(&mut big);
        let mut small = [0; MAX_FRAME_LEN];
        let small_len = serialize(&Heartbeat::default(), 1, 1, 1, &mut small).unwrap();
        assert!(small_len <= 20);

        let mut framer = Framer::<20>::new(FramerConfig::default());
        let (result, _) = framer.push_bytes(&big[..big_len]);
        assert!(matches!(result, Some(Err(Error::BufferOverrun))));

        let (result, rest) = framer.push_bytes(&small[..small_len]);
        match result {
            Some(Ok(view)) => assert_eq!(view.message_id(), 0),
            e => panic!("This frame should parse successfully: {e:?}"),
        }
        assert!(rest.is_empty());
    }

    #[test]
    fn test_v1_frame() {
        let frame = [0xFE, 0x02, 0x07, 0x2A, 0xBE, 0x4D, 0x01, 0x02, 0x34, 0x12];
        let mut framer: Framer = Framer::default();
        let (result, rest) = framer.push_bytes(&frame);
        let view = result.unwrap().unwrap();
        assert_eq!(view.message_id(), 77);
        assert_eq!(view.checksum(), 0x1234);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_v2_only_ignores_v1() {
        let frame = [0xFE, 0x02, 0x07, 0x2A, 0xBE, 0x4D, 0x01, 0x02, 0x34, 0x12];
        let mut framer: Framer = Framer::new(FramerConfig::v2_only());
        let (result, rest) = framer.push_bytes(&frame);
        assert!(result.is_none());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_signed_frame_reads_signature() {
        let mut frame = [0u8; 10 + 1 + 2 + 13];
        frame[..10].copy_from_slice(&[0xFD, 1, 0x01, 0, 0, 1, 1, 0, 0, 0]);
        frame[13..].copy_from_slice(&[7; 13]);
        let mut framer: Framer = Framer::default();
        let (result, rest) = framer.push_bytes(&frame);
        let view = result.unwrap().unwrap();
        assert_eq!(view.signature(), Some(&[7; 13]));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_reset_discards_partial_frame() {
        let mut buf = [0; MAX_FRAME_LEN];
        let n = attitude_frame(&mut buf);
        let mut framer: Framer = Framer::default();
        assert!(framer.push_bytes(&buf[..5]).0.is_none());
        framer.reset();
        let (result, _) = framer.push_bytes(&buf[..n]);
        assert!(matches!(result, Some(Ok(_))));
    }
}
