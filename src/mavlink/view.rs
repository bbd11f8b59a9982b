use bitfields::bitfield;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::{checksum::frame_crc, message::MavMessage, CHECKSUM_LEN, SIGNATURE_LEN};
use crate::Error;

/// Protocol version, identified by the frame's start marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MavlinkVersion {
    V2 = 0xFD,
    V1 = 0xFE,
}

impl MavlinkVersion {
    /// Header length including the start marker.
    pub const fn header_len(self) -> usize {
        match self {
            MavlinkVersion::V2 => 10,
            MavlinkVersion::V1 => 6,
        }
    }
}

/// MAVLink 2 incompatibility flags.
#[bitfield(u8)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IncompatFlags {
    /// The frame carries a 13-byte signature after the checksum.
    signed: bool,
    #[bits(7)]
    _reserved: u8,
}

/// Zero-copy view of one binary frame.
///
/// Borrows the framer's working buffer, so it must be consumed before the next byte is pushed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageView<'a> {
    version: MavlinkVersion,
    incompat_flags: IncompatFlags,
    compat_flags: u8,
    sequence: u8,
    system_id: u8,
    component_id: u8,
    message_id: u32,
    payload: &'a [u8],
    checksum: u16,
    signature: Option<&'a [u8; SIGNATURE_LEN]>,
    /// Everything the frame CRC covers: the frame minus the start marker, up to the payload end.
    crc_data: &'a [u8],
}

impl<'a> MessageView<'a> {
    /// Builds a view over one complete v1 or v2 frame, start marker included.
    ///
    /// The frame checksum is not checked, see [`MessageView::verify_checksum`].
    pub fn from_frame(frame: &'a [u8]) -> Result<Self, Error> {
        let (&magic, _) = frame.split_first().ok_or(Error::BufferOverrun)?;
        let version =
            MavlinkVersion::try_from(magic).map_err(|_| Error::InvalidMagic { byte: magic })?;
        let header = frame
            .get(..version.header_len())
            .ok_or(Error::BufferOverrun)?;

        let (incompat_flags, compat_flags, core) = match version {
            MavlinkVersion::V2 => (IncompatFlags::from_bits(header[2]), header[3], &header[4..]),
            MavlinkVersion::V1 => (IncompatFlags::from_bits(0), 0, &header[2..]),
        };
        let message_id = match core {
            &[_, _, _, lo, mid, hi] => u32::from_le_bytes([lo, mid, hi, 0]),
            &[_, _, _, id] => id as u32,
            _ => return Err(Error::ParseError),
        };

        let payload_end = version.header_len() + header[1] as usize;
        let crc_end = payload_end + CHECKSUM_LEN;
        let payload = frame
            .get(version.header_len()..payload_end)
            .ok_or(Error::BufferOverrun)?;
        let checksum = match frame.get(payload_end..crc_end) {
            Some(&[lo, hi]) => u16::from_le_bytes([lo, hi]),
            _ => return Err(Error::BufferOverrun),
        };
        let signature = if incompat_flags.signed() {
            let raw = frame
                .get(crc_end..crc_end + SIGNATURE_LEN)
                .ok_or(Error::BufferOverrun)?;
            Some(<&[u8; SIGNATURE_LEN]>::try_from(raw).map_err(|_| Error::BufferOverrun)?)
        } else {
            None
        };

        Ok(Self {
            version,
            incompat_flags,
            compat_flags,
            sequence: core[0],
            system_id: core[1],
            component_id: core[2],
            message_id,
            payload,
            checksum,
            signature,
            crc_data: &frame[1..payload_end],
        })
    }

    pub fn version(&self) -> MavlinkVersion {
        self.version
    }

    pub fn message_id(&self) -> u32 {
        self.message_id
    }

    pub fn system_id(&self) -> u8 {
        self.system_id
    }

    pub fn component_id(&self) -> u8 {
        self.component_id
    }

    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    pub fn incompat_flags(&self) -> IncompatFlags {
        self.incompat_flags
    }

    pub fn compat_flags(&self) -> u8 {
        self.compat_flags
    }

    /// Payload bytes as received, possibly truncated.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// CRC carried by the frame.
    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    pub fn signature(&self) -> Option<&'a [u8; SIGNATURE_LEN]> {
        self.signature
    }

    /// Recomputes the frame CRC with the given CRC_EXTRA and compares it with the received one.
    pub fn verify_checksum(&self, crc_extra: u8) -> Result<(), Error> {
        let expected = frame_crc(self.crc_data, crc_extra);
        if expected == self.checksum {
            Ok(())
        } else {
            Err(Error::ChecksumMismatch {
                expected,
                actual: self.checksum,
            })
        }
    }

    /// Checks that the frame holds an `M` with an intact checksum.
    pub fn verify<M: MavMessage>(&self) -> Result<(), Error> {
        if self.message_id != M::ID {
            return Err(Error::ParseError);
        }
        self.verify_checksum(M::CRC_EXTRA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // HEARTBEAT, v2, seq 0, sys 1, comp 1, payload trimmed to 6 bytes
    const HEARTBEAT_V2: [u8; 18] = [
        0xFD, 0x06, 0x00, 0x00, 0x00, 0x01, 0x01, 0x00, 0x00, 0x00, // header
        0x00, 0x00, 0x00, 0x00, 0x02, 0x03, // payload
        0x00, 0x00, // checksum placeholder
    ];

    #[test]
    fn test_v2_header_fields() {
        let view = MessageView::from_frame(&HEARTBEAT_V2).unwrap();
        assert_eq!(view.version(), MavlinkVersion::V2);
        assert_eq!(view.message_id(), 0);
        assert_eq!(view.system_id(), 1);
        assert_eq!(view.component_id(), 1);
        assert_eq!(view.payload(), &[0, 0, 0, 0, 2, 3]);
        assert_eq!(view.signature(), None);
        assert!(!view.incompat_flags().signed());
    }

    #[test]
    fn test_v1_header_fields() {
        let frame = [0xFE, 0x02, 0x07, 0x2A, 0xBE, 0x4D, 0x01, 0x02, 0x34, 0x12];
        let view = MessageView::from_frame(&frame).unwrap();
        assert_eq!(view.version(), MavlinkVersion::V1);
        assert_eq!(view.sequence(), 7);
        assert_eq!(view.system_id(), 42);
        assert_eq!(view.component_id(), 190);
        assert_eq!(view.message_id(), 77);
        assert_eq!(view.payload(), &[1, 2]);
        assert_eq!(view.checksum(), 0x1234);
    }

    #[test]
    fn test_signed_frame_signature() {
        let mut frame = [0u8; 10 + 1 + 2 + 13];
        frame[..10].copy_from_slice(&[0xFD, 1, 0x01, 0, 0, 1, 1, 0x10, 0x27, 0]);
        frame[13..].copy_from_slice(&[9; 13]);
        let view = MessageView::from_frame(&frame).unwrap();
        assert!(view.incompat_flags().signed());
        assert_eq!(view.message_id(), 10000);
        assert_eq!(view.signature(), Some(&[9; 13]));
    }

    #[test]
    fn test_short_frame() {
        assert_eq!(
            MessageView::from_frame(&HEARTBEAT_V2[..17]),
            Err(Error::BufferOverrun)
        );
        assert_eq!(
            MessageView::from_frame(&[0x55, 0]),
            Err(Error::InvalidMagic { byte: 0x55 })
        );
    }

    #[test]
    fn test_verify_checksum_mismatch() {
        let view = MessageView::from_frame(&HEARTBEAT_V2).unwrap();
        let expected = frame_crc(&HEARTBEAT_V2[1..16], 50);
        assert_eq!(
            view.verify_checksum(50),
            Err(Error::ChecksumMismatch {
                expected,
                actual: 0
            })
        );

        let mut frame = HEARTBEAT_V2;
        frame[16..].copy_from_slice(&expected.to_le_bytes());
        let view = MessageView::from_frame(&frame).unwrap();
        assert_eq!(view.verify_checksum(50), Ok(()));
    }
}
