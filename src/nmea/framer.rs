use super::{checksum, view::SentenceView, MAX_FIELDS, MAX_SENTENCE_LEN};
use crate::{buffer::BytesReader, Error};

/// Struct for configuring a [`Framer`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramerConfig {
    /// Characters that begin a sentence. Default is `$` and `!`.
    pub start: &'static [u8],
}

impl FramerConfig {
    pub const fn default() -> Self {
        Self { start: b"$!" }
    }
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self::default()
    }
}

/// State machine for reading a sentence.
///
/// ```text
/// SeekStart -> ReadFields -> ReadChecksum -> ReadCr -> ReadLf -> (validate)
///    ^             |  '\n'                     |          |
///    +-------------+---------------------------+----------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    SeekStart,
    ReadFields,
    ReadChecksum { index: usize },
    ReadCr,
    ReadLf,
}

enum Step {
    Pending,
    Complete,
    Failed(Error),
}

/// Incremental sentence framer.
///
/// The working buffer holds the text between the start character and `*`. `N` bounds its size;
/// longer sentences are reported as [`Error::BufferOverrun`] and skipped.
pub struct Framer<const N: usize = MAX_SENTENCE_LEN> {
    config: FramerConfig,
    state: State,
    buf: [u8; N],
    len: usize,
    checksum: u8,
    digits: [u8; 2],
    header_end: Option<usize>,
    field_start: usize,
    fields: [(usize, usize); MAX_FIELDS],
    field_count: usize,
}

impl<const N: usize> Framer<N> {
    pub const fn new(config: FramerConfig) -> Self {
        Self {
            config,
            state: State::SeekStart,
            buf: [0; N],
            len: 0,
            checksum: 0,
            digits: [0; 2],
            header_end: None,
            field_start: 0,
            fields: [(0, 0); MAX_FIELDS],
            field_count: 0,
        }
    }

    /// Abandons any partially read sentence.
    pub fn reset(&mut self) {
        if self.state != State::SeekStart {
            debug!("discarding partial sentence of {=usize} bytes", self.len);
        }
        self.state = State::SeekStart;
    }

    /// Consumes a character and returns a sentence or a framing error if one is complete.
    pub fn push(&mut self, byte: u8) -> Option<Result<SentenceView<'_>, Error>> {
        match self.step(byte) {
            Step::Pending => None,
            Step::Complete => Some(self.view()),
            Step::Failed(err) => Some(Err(err)),
        }
    }

    /// Consumes characters until a sentence or an error is available, returning it together
    /// with the input that was not consumed.
    pub fn push_bytes<'b>(
        &mut self,
        data: &'b [u8],
    ) -> (Option<Result<SentenceView<'_>, Error>>, &'b [u8]) {
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

    fn step(&mut self, byte: u8) -> Step {
        match self.state {
            State::SeekStart => {
                if self.config.start.contains(&byte) {
                    trace!("sentence start {=u8:#x}", byte);
                    self.begin();
                    self.state = State::ReadFields;
                }
                Step::Pending
            }
            State::ReadFields => match byte {
                b'\n' => self.fail(Error::ProtocolViolation),
                b'*' => {
                    self.close_field();
                    self.state = State::ReadChecksum { index: 0 };
                    Step::Pending
                }
                b',' => {
                    self.close_field();
                    let step = self.append(byte);
                    self.field_start = self.len;
                    step
                }
                _ => self.append(byte),
            },
            State::ReadChecksum { index } => {
                self.digits[index] = byte;
                self.state = if index == 0 {
                    State::ReadChecksum { index: 1 }
                } else {
                    State::ReadCr
                };
                Step::Pending
            }
            State::ReadCr => {
                if byte != b'\r' {
                    return self.fail(Error::ProtocolViolation);
                }
                self.state = State::ReadLf;
                Step::Pending
            }
            State::ReadLf => {
                if byte != b'\n' {
                    return self.fail(Error::ProtocolViolation);
                }
                self.validate()
            }
        }
    }

    fn begin(&mut self) {
        self.len = 0;
        self.checksum = 0;
        self.header_end = None;
        self.field_start = 0;
        self.field_count = 0;
    }

    fn append(&mut self, byte: u8) -> Step {
        match self.buf.get_mut(self.len) {
            Some(slot) => {
                *slot = byte;
                self.len += 1;
                checksum::accumulate(byte, &mut self.checksum);
                Step::Pending
            }
            None => {
                warn!("sentence exceeds {=usize} byte buffer", N);
                self.fail(Error::BufferOverrun)
            }
        }
    }

    fn close_field(&mut self) {
        if self.header_end.is_none() {
            self.header_end = Some(self.len);
        } else if self.field_count < MAX_FIELDS {
            self.fields[self.field_count] = (self.field_start, self.len);
            self.field_count += 1;
        } else {
            trace!("dropping field past {=usize}", MAX_FIELDS);
        }
    }

    fn validate(&mut self) -> Step {
        self.state = State::SeekStart;
        let received = match checksum::from_hex(self.digits) {
            Ok(sum) => sum,
            Err(err) => {
                warn!("non-hex checksum digits");
                return Step::Failed(err);
            }
        };
        if received != self.checksum {
            warn!(
                "checksum mismatch: computed {=u8:#x}, received {=u8:#x}",
                self.checksum,
                received
            );
            return Step::Failed(Error::ChecksumMismatch {
                expected: self.checksum as u16,
                actual: received as u16,
            });
        }
        trace!("sentence complete, {=usize} bytes", self.len);
        Step::Complete
    }

    fn fail(&mut self, err: Error) -> Step {
        if matches!(err, Error::ProtocolViolation) {
            warn!("protocol violation after {=usize} bytes", self.len);
        }
        self.state = State::SeekStart;
        Step::Failed(err)
    }

    fn view(&self) -> Result<SentenceView<'_>, Error> {
        let text = core::str::from_utf8(&self.buf[..self.len]).map_err(|_| {
            warn!("sentence is not valid UTF-8");
            Error::ProtocolViolation
        })?;
        let header = text.get(..self.header_end.unwrap_or(0)).unwrap_or("");
        let (talker, sentence_id) = match (header.get(0..2), header.get(2..5)) {
            (Some(talker), Some(id)) => (talker, id),
            _ => ("", ""),
        };

        let mut fields = [""; MAX_FIELDS];
        for (slot, &(start, end)) in fields.iter_mut().zip(&self.fields[..self.field_count]) {
            *slot = text.get(start..end).unwrap_or("");
        }
        Ok(SentenceView::new(
            talker,
            sentence_id,
            &fields[..self.field_count],
        ))
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

    const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

    fn push_all<const N: usize>(
        framer: &mut Framer<N>,
        data: &[u8],
        mut on_result: impl FnMut(Result<SentenceView<'_>, Error>),
    ) {
        for &byte in data {
            if let Some(result) = framer.push(byte) {
                on_result(result);
            }
        }
    }

    #[test]
    fn test_parse_gga() {
        let mut framer: Framer = Framer::default();
        let mut count = 0;
        push_all(&mut framer, GGA, |result| {
            let view = result.unwrap();
            assert_eq!(view.talker(), "GP");
            assert_eq!(view.sentence_id(), "GGA");
            assert_eq!(view.field_count(), 14);
            assert_eq!(view.field(0), Some("123519"));
            assert_eq!(view.field(1), Some("4807.038"));
            assert_eq!(view.field(11), Some("M"));
            assert_eq!(view.field(12), Some(""));
            assert_eq!(view.field(13), Some(""));
            count += 1;
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn test_checksum_errors() {
        let mut framer: Framer = Framer::default();
        let mut bad = [0u8; GGA.len()];
        bad.copy_from_slice(GGA);
        let star = GGA.len() - 5;

        bad[star + 2] = b'8';
        let mut results = 0;
        push_all(&mut framer, &bad, |result| {
            assert_eq!(
                result,
                Err(Error::ChecksumMismatch {
                    expected: 0x47,
                    actual: 0x48
                })
            );
            results += 1;
        });

        bad[star + 2] = b'G';
        push_all(&mut framer, &bad, |result| {
            assert_eq!(result, Err(Error::InvalidChecksumChar));
            results += 1;
        });
        assert_eq!(results, 2);

        push_all(&mut framer, GGA, |result| assert!(result.is_ok()));
    }

    #[test]
    fn test_lower_case_checksum_digits() {
        let mut framer: Framer = Framer::default();
        let mut ok = false;
        push_all(&mut framer, b"$GPROT,,*5e\r\n", |result| {
            assert_eq!(result.unwrap().fields(), &["", ""]);
            ok = true;
        });
        assert!(ok);
    }

    #[test]
    fn test_protocol_violations() {
        let mut framer: Framer = Framer::default();
        let mut results = 0;
        push_all(&mut framer, b"$GPGGA,123\n519*45\r\n", |result| {
            assert_eq!(result, Err(Error::ProtocolViolation));
            results += 1;
        });
        push_all(&mut framer, b"$GPGGA,123519*45\n\r", |result| {
            assert_eq!(result, Err(Error::ProtocolViolation));
            results += 1;
        });
        assert_eq!(results, 2);
    }

    #[test]
    fn test_chunked_equals_byte_at_a_time() {
        let mut stream = [0u8; 2 * GGA.len() + 4];
        stream[..2].copy_from_slice(b"xx");
        stream[2..2 + GGA.len()].copy_from_slice(GGA);
        stream[2 + GGA.len()..4 + GGA.len()].copy_from_slice(b"\r\n");
        stream[4 + GGA.len()..].copy_from_slice(GGA);

        for chunk_size in [1, 3, 7, stream.len()] {
            let mut framer: Framer = Framer::default();
            let mut sentences = 0;
            for chunk in stream.chunks(chunk_size) {
                let mut input = chunk;
                while !input.is_empty() {
                    let (result, rest) = framer.push_bytes(input);
                    if let Some(result) = result {
                        let view = result.unwrap();
                        assert_eq!(view.sentence_id(), "GGA");
                        assert_eq!(view.field(3), Some("01131.000"));
                        sentences += 1;
                    }
                    input = rest;
                }
            }
            assert_eq!(sentences, 2, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn test_buffer_overrun_recovers() {
        let mut framer = Framer::<16>::new(FramerConfig::default());
        let mut results = 0;
        push_all(&mut framer, GGA, |result| {
            assert_eq!(result, Err(Error::BufferOverrun));
            results += 1;
        });
        push_all(&mut framer, b"$GPROT,10.0,A*00\r\n", |result| {
            let view = result.unwrap();
            assert_eq!(view.sentence_id(), "ROT");
            assert_eq!(view.fields(), &["10.0", "A"]);
            results += 1;
        });
        assert_eq!(results, 2);
    }

    #[test]
    fn test_fields_past_capacity_are_dropped() {
        let mut body = [0u8; 5 + 2 * 40];
        body[..5].copy_from_slice(b"GPXYZ");
        for i in 0..40 {
            body[5 + 2 * i] = b',';
            body[6 + 2 * i] = b'0' + (i % 10) as u8;
        }
        let sum = checksum::to_hex(checksum::checksum(&body));

        let mut framer: Framer = Framer::default();
        let mut ok = false;
        framer.push(b'$');
        push_all(&mut framer, &body, |_| panic!("early result"));
        push_all(&mut framer, &[b'*', sum[0], sum[1], b'\r', b'\n'], |result| {
            let view = result.unwrap();
            assert_eq!(view.field_count(), MAX_FIELDS);
            assert_eq!(view.field(31), Some("1"));
            ok = true;
        });
        assert!(ok);
    }

    #[test]
    fn test_short_header_and_bang_start() {
        let mut framer: Framer = Framer::default();
        let mut ok = false;
        // XOR of "AB,1"
        push_all(&mut framer, b"!AB,1*1E\r\n", |result| {
            let view = result.unwrap();
            assert_eq!(view.talker(), "");
            assert_eq!(view.sentence_id(), "");
            assert_eq!(view.fields(), &["1"]);
            ok = true;
        });
        assert!(ok);
    }

    #[test]
    fn test_custom_start_characters() {
        let mut framer = Framer::<MAX_SENTENCE_LEN>::new(FramerConfig { start: b"$" });
        let mut results = 0;
        push_all(&mut framer, b"!AB,1*1E\r\n", |_| results += 1);
        assert_eq!(results, 0);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut framer: Framer = Framer::default();
        let body = [b'G', b'P', b'T', b'X', b'T', b',', 0xFF];
        let sum = checksum::to_hex(checksum::checksum(&body));
        framer.push(b'$');
        push_all(&mut framer, &body, |_| panic!("early result"));
        let mut results = 0;
        push_all(&mut framer, &[b'*', sum[0], sum[1], b'\r', b'\n'], |result| {
            assert_eq!(result, Err(Error::ProtocolViolation));
            results += 1;
        });
        assert_eq!(results, 1);
    }
}
