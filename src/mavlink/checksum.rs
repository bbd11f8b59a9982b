//! X.25 CRC used by MAVLink, and the per-message CRC_EXTRA seed byte.
//!
//! The rolling step is a `const fn` so that CRC_EXTRA is folded into each message type as an
//! associated constant. Whole-frame digests go through the `crc` crate, whose
//! `CRC_16_MCRF4XX` algorithm is the same X.25 variant (poly 0x1021 reflected, init 0xFFFF,
//! no final xor).

use super::field::FieldDescriptor;

pub(crate) const CRC16: crc::Crc<u16> = crc::Crc::<u16>::new(&crc::CRC_16_MCRF4XX);

/// Seed of every MAVLink CRC.
pub const X25_INIT: u16 = 0xFFFF;

/// Rolling X.25 CRC state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct X25(pub u16);

impl X25 {
    pub const fn new() -> Self {
        Self(X25_INIT)
    }

    /// One step of the rolling CRC.
    pub const fn accumulate(self, byte: u8) -> Self {
        let mut tmp = byte ^ (self.0 & 0xFF) as u8;
        tmp ^= tmp << 4;
        let tmp = tmp as u16;
        Self((self.0 >> 8) ^ (tmp << 8) ^ (tmp << 3) ^ (tmp >> 4))
    }

    pub const fn accumulate_buffer(self, data: &[u8]) -> Self {
        let mut crc = self;
        let mut i = 0;
        while i < data.len() {
            crc = crc.accumulate(data[i]);
            i += 1;
        }
        crc
    }

    pub const fn accumulate_str(self, s: &str) -> Self {
        self.accumulate_buffer(s.as_bytes())
    }

    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for X25 {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds `byte` into the CRC held in `crc`.
pub fn accumulate(byte: u8, crc: &mut u16) {
    *crc = X25(*crc).accumulate(byte).0;
}

pub fn accumulate_buffer(data: &[u8], crc: &mut u16) {
    *crc = X25(*crc).accumulate_buffer(data).0;
}

pub fn accumulate_str(s: &str, crc: &mut u16) {
    *crc = X25(*crc).accumulate_str(s).0;
}

/// Computes the CRC_EXTRA byte of a message type from its name and wire-ordered fields.
///
/// Each field contributes `"<type> <name> "`. Array fields use the element type name and then
/// fold the array length in as one raw byte.
pub const fn crc_extra(name: &str, fields: &[FieldDescriptor]) -> u8 {
    let mut crc = X25::new().accumulate_str(name).accumulate(b' ');
    let mut i = 0;
    while i < fields.len() {
        let field = &fields[i];
        crc = crc
            .accumulate_str(field.primitive.type_name())
            .accumulate(b' ')
            .accumulate_str(field.name)
            .accumulate(b' ');
        if field.array_len > 0 {
            crc = crc.accumulate(field.array_len as u8);
        }
        i += 1;
    }
    ((crc.0 & 0xFF) ^ (crc.0 >> 8)) as u8
}

/// CRC of a complete v1/v2 frame body: every byte after the start marker up to the end of the
/// payload, then the message type's CRC_EXTRA.
pub(crate) fn frame_crc(header_and_payload: &[u8], crc_extra: u8) -> u16 {
    let mut digest = CRC16.digest();
    digest.update(header_and_payload);
    digest.update(&[crc_extra]);
    digest.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedStr;

    #[test]
    fn test_accumulate_matches_crc_crate() {
        let data = b"123456789";
        let mut crc = X25_INIT;
        accumulate_buffer(data, &mut crc);
        assert_eq!(crc, CRC16.checksum(data));
        // Published check value of CRC-16/MCRF4XX
        assert_eq!(crc, 0x6F91);
    }

    #[test]
    fn test_accumulate_step_by_step() {
        let mut a = X25_INIT;
        let mut b = X25_INIT;
        for byte in b"HEARTBEAT " {
            accumulate(*byte, &mut a);
        }
        accumulate_str("HEARTBEAT ", &mut b);
        assert_eq!(a, b);
        assert_eq!(X25::new().accumulate_str("HEARTBEAT ").value(), a);
    }

    #[test]
    fn test_crc_extra_heartbeat() {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::of::<u32>("custom_mode"),
            FieldDescriptor::of::<u8>("type"),
            FieldDescriptor::of::<u8>("autopilot"),
            FieldDescriptor::of::<u8>("base_mode"),
            FieldDescriptor::of::<u8>("system_status"),
            FieldDescriptor::of::<u8>("mavlink_version"),
        ];
        assert_eq!(crc_extra("HEARTBEAT", FIELDS), 50);
        assert_eq!(crc_extra("HEARTBEAT", FIELDS), crc_extra("HEARTBEAT", FIELDS));
    }

    #[test]
    fn test_crc_extra_sys_status() {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::of::<u32>("onboard_control_sensors_present"),
            FieldDescriptor::of::<u32>("onboard_control_sensors_enabled"),
            FieldDescriptor::of::<u32>("onboard_control_sensors_health"),
            FieldDescriptor::of::<u16>("load"),
            FieldDescriptor::of::<u16>("voltage_battery"),
            FieldDescriptor::of::<i16>("current_battery"),
            FieldDescriptor::of::<u16>("drop_rate_comm"),
            FieldDescriptor::of::<u16>("errors_comm"),
            FieldDescriptor::of::<u16>("errors_count1"),
            FieldDescriptor::of::<u16>("errors_count2"),
            FieldDescriptor::of::<u16>("errors_count3"),
            FieldDescriptor::of::<u16>("errors_count4"),
            FieldDescriptor::of::<i8>("battery_remaining"),
        ];
        assert_eq!(crc_extra("SYS_STATUS", FIELDS), 124);
    }

    #[test]
    fn test_crc_extra_char_array() {
        const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::of::<FixedStr<32>>("key")];
        assert_eq!(crc_extra("AUTH_KEY", FIELDS), 119);
    }

    #[test]
    fn test_frame_crc_is_rolling_crc() {
        let body = [9, 0, 0, 0, 1, 1, 0, 0, 0, 1, 2, 3];
        let mut crc = X25_INIT;
        accumulate_buffer(&body, &mut crc);
        accumulate(50, &mut crc);
        assert_eq!(frame_crc(&body, 50), crc);
    }
}
