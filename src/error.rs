use snafu::Snafu;

/// Enum of codec errors, shared by both protocols.
///
/// Framing errors are returned as the result of a single `push` and never leave a framer in a
/// stuck state: the offending partial frame is dropped and scanning resumes with the next byte.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A field's text could not be parsed into its value type, or a frame holds a different
    /// message than the one requested.
    #[snafu(display("Malformed field text"))]
    ParseError,
    /// The working or destination buffer is too small for the frame.
    #[snafu(display("Buffer overrun"))]
    BufferOverrun,
    /// A byte that does not start any frame.
    #[snafu(display("Invalid start marker {byte:#04x}"))]
    InvalidMagic { byte: u8 },
    /// The checksum digits of a sentence are not hexadecimal.
    #[snafu(display("Invalid hex character in checksum"))]
    InvalidChecksumChar,
    #[snafu(display("Checksum mismatch: expected {expected:#06x}, got {actual:#06x}"))]
    ChecksumMismatch { expected: u16, actual: u16 },
    /// Stray line feed inside a sentence, or a sentence not terminated by CRLF.
    #[snafu(display("Protocol violation"))]
    ProtocolViolation,
    #[snafu(display("Field count mismatch: expected {expected}, got {actual}"))]
    FieldCountMismatch { expected: usize, actual: usize },
}
