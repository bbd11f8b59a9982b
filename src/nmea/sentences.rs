//! Sentence definitions.
//!
//! Each sentence comes in two forms: `Xxx` with eager fields for building output, and
//! `LazyXxx<'a>` with borrowed tokens for reading input.

use super::{
    codec::bind,
    enums::{
        Direction, FixMode, FixType, NavigationalStatus, NorthReference, PositionFixModeIndicator,
        PositionFixQuality, Status, Units,
    },
    sentence::Bind,
    view::SentenceView,
};

nmea_sentence! {
    /// Datum reference.
    pub struct Dtm / LazyDtm: "DTM" {
        pub local_datum_code: text(5),
        pub local_datum_subdivision_code: text(8),
        /// Minutes
        pub latitude_offset: float(f64, 4),
        pub latitude_offset_direction: one(Direction),
        /// Minutes
        pub longitude_offset: float(f64, 4),
        pub longitude_offset_direction: one(Direction),
        /// Meters
        pub altitude_offset: float(f64, 1),
        pub reference_datum_code: text(5),
    }
}

nmea_sentence! {
    /// GNSS satellite fault detection.
    pub struct Gbs / LazyGbs: "GBS" {
        /// `hhmmss.ss`
        pub utc_time: float(f64, 2, 9),
        pub lat_error: float(f32, 1),
        pub lon_error: float(f32, 1),
        pub alt_error: float(f32, 1),
        pub satellite_id: int(i32, 2),
        pub probability: float(f32, 3),
        pub bias: float(f32, 1),
        pub std_dev: float(f32, 1),
    }
}

nmea_sentence! {
    /// Global positioning system fix data.
    pub struct Gga / LazyGga: "GGA" {
        /// `hhmmss.ss`
        pub utc_time: float(f64, 2, 9),
        /// `ddmm.mmmm`
        pub latitude: float(f64, 4, 9),
        pub latitude_direction: one(Direction),
        /// `dddmm.mmmm`
        pub longitude: float(f64, 4, 10),
        pub longitude_direction: one(Direction),
        pub quality: one(PositionFixQuality),
        pub num_satellites: int(i32, 2),
        pub hdop: float(f32, 1),
        pub altitude: float(f32, 1),
        pub altitude_units: one(Units),
        pub geoid_separation: float(f32, 1),
        pub geoid_separation_units: one(Units),
        /// Seconds since the last differential update
        pub age_of_differential: float(f32, 1),
        pub station_id: int(i32, 4),
    }
}

nmea_sentence! {
    /// Geographic position, latitude and longitude.
    pub struct Gll / LazyGll: "GLL" {
        pub latitude: float(f64, 4, 9),
        pub latitude_direction: one(Direction),
        pub longitude: float(f64, 4, 10),
        pub longitude_direction: one(Direction),
        pub utc_time: float(f64, 2, 9),
        pub status: one(Status),
        pub mode_indicator: one(PositionFixModeIndicator),
    }
}

nmea_sentence! {
    /// GNSS fix data.
    pub struct Gns / LazyGns: "GNS" {
        pub utc_time: float(f64, 2, 9),
        pub latitude: float(f64, 4, 9),
        pub latitude_direction: one(Direction),
        pub longitude: float(f64, 4, 10),
        pub longitude_direction: one(Direction),
        /// One mode character per constellation
        pub mode_indicator: text(8),
        pub num_satellites: int(i32, 2),
        pub hdop: float(f32, 1),
        pub altitude: float(f32, 1),
        pub geoid_separation: float(f32, 1),
        pub age_of_differential: float(f32, 1),
        pub station_id: int(i32, 4),
        pub navigational_status: one(NavigationalStatus),
    }
}

nmea_sentence! {
    /// GNSS DOP and active satellites.
    pub struct Gsa / LazyGsa: "GSA" {
        pub selection_mode: one(FixMode),
        pub fix_mode: one(FixType),
        pub sv_id_01: int(i32, 2),
        pub sv_id_02: int(i32, 2),
        pub sv_id_03: int(i32, 2),
        pub sv_id_04: int(i32, 2),
        pub sv_id_05: int(i32, 2),
        pub sv_id_06: int(i32, 2),
        pub sv_id_07: int(i32, 2),
        pub sv_id_08: int(i32, 2),
        pub sv_id_09: int(i32, 2),
        pub sv_id_10: int(i32, 2),
        pub sv_id_11: int(i32, 2),
        pub sv_id_12: int(i32, 2),
        pub pdop: float(f32, 1),
        pub hdop: float(f32, 1),
        pub vdop: float(f32, 1),
    }
}

nmea_sentence! {
    /// GNSS pseudorange error statistics.
    pub struct Gst / LazyGst: "GST" {
        pub utc_time: float(f64, 2, 9),
        pub rms_std_dev: float(f32, 1),
        pub semi_major_std_dev: float(f32, 1),
        pub semi_minor_std_dev: float(f32, 1),
        /// Degrees from true north
        pub semi_major_orientation: float(f32, 1),
        pub latitude_error_std_dev: float(f32, 1),
        pub longitude_error_std_dev: float(f32, 1),
        pub altitude_error_std_dev: float(f32, 1),
    }
}

nmea_sentence! {
    /// True heading.
    pub struct Hdt / LazyHdt: "HDT" {
        pub heading: float(f32, 1),
        pub true_indicator: one(NorthReference),
    }
}

nmea_sentence! {
    /// Recommended minimum specific GNSS data.
    pub struct Rmc / LazyRmc: "RMC" {
        pub utc_time: float(f64, 2, 9),
        pub status: one(Status),
        pub latitude: float(f64, 4, 9),
        pub latitude_direction: one(Direction),
        pub longitude: float(f64, 4, 10),
        pub longitude_direction: one(Direction),
        /// Knots
        pub speed: float(f32, 1),
        /// Degrees true
        pub course: float(f32, 1),
        /// `ddmmyy`
        pub date: int(i32, 6),
        pub magnetic_variation: float(f32, 1),
        pub magnetic_variation_direction: one(Direction),
        pub mode_indicator: one(PositionFixModeIndicator),
    }
}

nmea_sentence! {
    /// Rate of turn.
    pub struct Rot / LazyRot: "ROT" {
        /// Degrees per minute, negative to port
        pub rate_of_turn: float(f32, 1),
        pub status: one(Status),
    }
}

nmea_sentence! {
    /// Course over ground and ground speed.
    pub struct Vtg / LazyVtg: "VTG" {
        pub course_true: float(f32, 1),
        pub reference_true: one(NorthReference),
        pub course_magnetic: float(f32, 1),
        pub reference_magnetic: one(NorthReference),
        pub speed_knots: float(f32, 1),
        pub units_knots: one(Units),
        pub speed_kph: float(f32, 1),
        pub units_kph: one(Units),
        pub mode_indicator: one(PositionFixModeIndicator),
    }
}

nmea_sentence! {
    /// Time and date.
    pub struct Zda / LazyZda: "ZDA" {
        pub utc_time: float(f64, 2, 9),
        pub day: int(i32, 2),
        pub month: int(i32, 2),
        pub year: int(i32, 4),
        pub local_zone_hours: int(i32, 2),
        pub local_zone_minutes: int(i32, 2),
    }
}

macro_rules! sentence_enum {
    ($($variant:ident => $lazy:ident),* $(,)?) => {
        /// Any received sentence defined by this crate, with fields still unparsed.
        #[non_exhaustive]
        #[derive(Clone, Copy, Debug, PartialEq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum LazySentence<'a> {
            $($variant($lazy<'a>),)*
        }

        impl<'a> LazySentence<'a> {
            /// Binds a sentence by its id. Returns `None` for sentences this crate does not define.
            pub fn bind(view: &SentenceView<'a>) -> Option<Self> {
                match view.sentence_id() {
                    $(id if id == <$lazy<'a> as Bind<'a>>::ID => Some(LazySentence::$variant(bind(view))),)*
                    id => {
                        debug!("unknown sentence id {=str}", id);
                        None
                    }
                }
            }

            pub fn sentence_id(&self) -> &'static str {
                match self {
                    $(LazySentence::$variant(_) => <$lazy<'a> as Bind<'a>>::ID,)*
                }
            }
        }
    };
}

sentence_enum! {
    Dtm => LazyDtm,
    Gbs => LazyGbs,
    Gga => LazyGga,
    Gll => LazyGll,
    Gns => LazyGns,
    Gsa => LazyGsa,
    Gst => LazyGst,
    Hdt => LazyHdt,
    Rmc => LazyRmc,
    Rot => LazyRot,
    Vtg => LazyVtg,
    Zda => LazyZda,
}
