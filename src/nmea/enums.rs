//! Single-character indicators used in sentence fields.

use core::fmt::Write;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::field::{Parse, Render};
use crate::Error;

macro_rules! char_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $ch:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u8)]
        pub enum $name {
            $($(#[$variant_meta])* $variant = $ch,)*
        }

        impl $name {
            pub const fn as_char(self) -> char {
                self as u8 as char
            }
        }

        impl TryFrom<char> for $name {
            type Error = Error;

            fn try_from(c: char) -> Result<Self, Error> {
                u8::try_from(c)
                    .ok()
                    .and_then(|b| Self::try_from(b).ok())
                    .ok_or(Error::ParseError)
            }
        }

        impl From<$name> for char {
            fn from(value: $name) -> char {
                value.as_char()
            }
        }

        impl Render for $name {
            fn render<W: Write>(&self, _precision: u8, _width: u8, out: &mut W) -> core::fmt::Result {
                out.write_char(self.as_char())
            }
        }

        impl<'a> Parse<'a> for $name {
            fn parse(token: &'a str) -> Result<Self, Error> {
                token
                    .chars()
                    .next()
                    .ok_or(Error::ParseError)
                    .and_then(Self::try_from)
            }
        }
    };
}

char_enum! {
    /// Hemisphere of a latitude or longitude.
    pub enum Direction {
        North = b'N',
        South = b'S',
        East = b'E',
        West = b'W',
    }
}

char_enum! {
    /// Data valid flag.
    pub enum Status {
        Active = b'A',
        Void = b'V',
    }
}

char_enum! {
    pub enum Units {
        KilometersPerHour = b'K',
        Meters = b'M',
        Knots = b'N',
    }
}

char_enum! {
    /// GGA fix quality.
    pub enum PositionFixQuality {
        NoFix = b'0',
        Autonomous = b'1',
        Differential = b'2',
        PpsMode = b'3',
        RealTimeKinematic = b'4',
        FloatRtk = b'5',
        /// Dead reckoning
        Estimated = b'6',
        ManualInput = b'7',
        Simulator = b'8',
    }
}

char_enum! {
    /// Positioning system mode (FAA mode indicator).
    pub enum PositionFixModeIndicator {
        Autonomous = b'A',
        Differential = b'D',
        Estimated = b'E',
        FloatRtk = b'F',
        ManualInput = b'M',
        NoFix = b'N',
        Precise = b'P',
        RealTimeKinematic = b'R',
        Simulator = b'S',
    }
}

char_enum! {
    /// GSA selection mode.
    pub enum FixMode {
        Automatic = b'A',
        Manual = b'M',
    }
}

char_enum! {
    /// GSA fix dimension.
    pub enum FixType {
        NoFix = b'1',
        TwoDimensional = b'2',
        ThreeDimensional = b'3',
    }
}

char_enum! {
    pub enum NorthReference {
        Magnetic = b'M',
        True = b'T',
    }
}

char_enum! {
    pub enum SafeIndicator {
        Safe = b'S',
        Unsafe = b'U',
    }
}

char_enum! {
    /// GNS navigational status.
    pub enum NavigationalStatus {
        Safe = b'S',
        Caution = b'C',
        Unsafe = b'U',
        NotValid = b'V',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_conversions() {
        assert_eq!(Direction::try_from('S'), Ok(Direction::South));
        assert_eq!(char::from(Units::Knots), 'N');
        assert_eq!(PositionFixQuality::Differential.as_char(), '2');
        assert_eq!(FixType::try_from('4'), Err(Error::ParseError));
        assert_eq!(Status::try_from('é'), Err(Error::ParseError));
    }

    #[test]
    fn test_parse_first_char() {
        assert_eq!(Status::parse("A"), Ok(Status::Active));
        assert_eq!(NavigationalStatus::parse("V"), Ok(NavigationalStatus::NotValid));
        assert_eq!(Direction::parse("X"), Err(Error::ParseError));
        assert_eq!(Direction::parse(""), Err(Error::ParseError));
    }
}
