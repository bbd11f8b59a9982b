//! Serializer and deserializer for binary frames.
//!
//! Serialized frames are always MAVLink 2, unsigned, with the payload's trailing zero bytes
//! trimmed (keeping at least one byte). Deserializing zero-fills whatever the payload leaves out,
//! so a trimmed frame decodes back to the original message.

use super::{
    checksum::frame_crc,
    field::{PayloadReader, PayloadWriter},
    message::MavMessage,
    view::{MavlinkVersion, MessageView},
    CHECKSUM_LEN, MAX_FRAME_LEN, MAX_PAYLOAD_LEN,
};
use crate::Error;

/// Writes `message` as a complete frame into `buf` and returns the frame length.
///
/// `buf` must be at least [`MAX_FRAME_LEN`] bytes long.
pub fn serialize<M: MavMessage>(
    message: &M,
    system_id: u8,
    component_id: u8,
    sequence: u8,
    buf: &mut [u8],
) -> Result<usize, Error> {
    if buf.len() < MAX_FRAME_LEN {
        warn!(
            "serialize buffer too small: {=usize} < {=usize}",
            buf.len(),
            MAX_FRAME_LEN
        );
        return Err(Error::BufferOverrun);
    }

    let header_len = MavlinkVersion::V2.header_len();
    let payload = &mut buf[header_len..header_len + MAX_PAYLOAD_LEN];
    payload[0] = 0;
    let mut writer = PayloadWriter::new(payload);
    message.write_fields(&mut writer);
    let written = writer.position();

    let payload_len = payload[..written]
        .iter()
        .rposition(|&b| b != 0)
        .map_or(1, |last| last + 1);

    let [id0, id1, id2, _] = M::ID.to_le_bytes();
    buf[..header_len].copy_from_slice(&[
        MavlinkVersion::V2.into(),
        payload_len as u8,
        0,
        0,
        sequence,
        system_id,
        component_id,
        id0,
        id1,
        id2,
    ]);

    let payload_end = header_len + payload_len;
    let crc = frame_crc(&buf[1..payload_end], M::CRC_EXTRA);
    buf[payload_end..payload_end + CHECKSUM_LEN].copy_from_slice(&crc.to_le_bytes());
    Ok(payload_end + CHECKSUM_LEN)
}

/// Decodes the payload of `view` as an `M`.
///
/// The frame checksum is not checked; use [`deserialize_verified`] for that.
pub fn deserialize<M: MavMessage>(view: &MessageView<'_>) -> Result<M, Error> {
    if view.message_id() != M::ID {
        debug!(
            "expected message id {=u32}, got {=u32}",
            M::ID,
            view.message_id()
        );
        return Err(Error::ParseError);
    }
    Ok(M::read_fields(&mut PayloadReader::new(view.payload())))
}

/// Verifies the frame checksum with `M`'s CRC_EXTRA, then decodes.
pub fn deserialize_verified<M: MavMessage>(view: &MessageView<'_>) -> Result<M, Error> {
    view.verify::<M>()?;
    deserialize(view)
}
