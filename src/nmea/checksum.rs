//! XOR checksum of the text protocol.

use crate::Error;

/// XOR of all bytes between the start delimiter and `*`.
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, b| acc ^ b)
}

/// Folds `byte` into the running checksum.
pub fn accumulate(byte: u8, sum: &mut u8) {
    *sum ^= byte;
}

/// Two upper-case hex digits, as written after `*`.
pub fn to_hex(sum: u8) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    [DIGITS[(sum >> 4) as usize], DIGITS[(sum & 0x0F) as usize]]
}

/// Parses the two checksum digits. Lower-case digits are accepted.
pub fn from_hex(digits: [u8; 2]) -> Result<u8, Error> {
    let hi = hex_value(digits[0]).ok_or(Error::InvalidChecksumChar)?;
    let lo = hex_value(digits[1]).ok_or(Error::InvalidChecksumChar)?;
    Ok(hi << 4 | lo)
}

fn hex_value(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gga_checksum() {
        let body = b"GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
        assert_eq!(checksum(body), 0x47);

        let mut sum = 0;
        for &b in body.iter() {
            accumulate(b, &mut sum);
        }
        assert_eq!(sum, 0x47);
    }

    #[test]
    fn test_hex_digits() {
        assert_eq!(&to_hex(0x47), b"47");
        assert_eq!(&to_hex(0x0A), b"0A");
        assert_eq!(from_hex(*b"5E"), Ok(0x5E));
        assert_eq!(from_hex(*b"5e"), Ok(0x5E));
        assert_eq!(from_hex(*b"4G"), Err(Error::InvalidChecksumChar));
        assert_eq!(from_hex(*b" 4"), Err(Error::InvalidChecksumChar));
    }
}
