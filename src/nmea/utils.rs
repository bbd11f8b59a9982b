//! Conversions between sentence fields and conventional units.
//!
//! Positions are carried as `ddmm.mmmm` (degrees and decimal minutes) plus a hemisphere
//! indicator; [`Latitude`] and [`Longitude`] convert to and from signed decimal degrees.
//! [`Timestamp`] combines `hhmmss.ss` time-of-day with the sentence's date fields.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::{
    enums::Direction,
    sentences::{Gga, Gll, Gns, Rmc, Zda},
};

/// `ddmm.mmmm` to signed decimal degrees.
pub fn to_decimal(value: f64, direction: Direction) -> f64 {
    let degrees = (value / 100.0) as i32;
    let minutes = value % 100.0;
    let decimal = degrees as f64 + minutes / 60.0;
    match direction {
        Direction::South | Direction::West => -decimal,
        Direction::North | Direction::East => decimal,
    }
}

/// Signed decimal degrees to unsigned `ddmm.mmmm`.
fn from_decimal(decimal: f64) -> f64 {
    let magnitude = if decimal < 0.0 { -decimal } else { decimal };
    let degrees = magnitude as i32;
    let minutes = (magnitude - degrees as f64) * 60.0;
    degrees as f64 * 100.0 + minutes
}

/// Sentences with `latitude` and `latitude_direction` fields.
pub trait Latitude {
    /// Signed decimal degrees, north positive. `None` unless both fields are present.
    fn latitude_deg(&self) -> Option<f64>;
    fn set_latitude_deg(&mut self, latitude: f64);
}

/// Sentences with `longitude` and `longitude_direction` fields.
pub trait Longitude {
    /// Signed decimal degrees, east positive. `None` unless both fields are present.
    fn longitude_deg(&self) -> Option<f64>;
    fn set_longitude_deg(&mut self, longitude: f64);
}

macro_rules! impl_position {
    ($($sentence:ty),*) => {
        $(
            impl Latitude for $sentence {
                fn latitude_deg(&self) -> Option<f64> {
                    Some(to_decimal(self.latitude.value?, self.latitude_direction.value?))
                }

                fn set_latitude_deg(&mut self, latitude: f64) {
                    let direction = if latitude >= 0.0 { Direction::North } else { Direction::South };
                    self.latitude.set(from_decimal(latitude));
                    self.latitude_direction.set(direction);
                }
            }

            impl Longitude for $sentence {
                fn longitude_deg(&self) -> Option<f64> {
                    Some(to_decimal(self.longitude.value?, self.longitude_direction.value?))
                }

                fn set_longitude_deg(&mut self, longitude: f64) {
                    let direction = if longitude >= 0.0 { Direction::East } else { Direction::West };
                    self.longitude.set(from_decimal(longitude));
                    self.longitude_direction.set(direction);
                }
            }
        )*
    };
}

impl_position!(Gga, Gll, Gns, Rmc);

/// Sentences carrying a UTC time of day and a calendar date.
pub trait Timestamp {
    /// `None` if a field is absent or the fields do not form a valid date and time.
    fn timestamp(&self) -> Option<NaiveDateTime>;
    fn set_timestamp(&mut self, timestamp: NaiveDateTime);
}

fn time_of_day(utc_time: f64) -> Option<NaiveTime> {
    if utc_time < 0.0 {
        return None;
    }
    let hours = (utc_time / 10000.0) as u32;
    let minutes = ((utc_time % 10000.0) / 100.0) as u32;
    let seconds = utc_time % 100.0;
    let whole = seconds as u32;
    let nanos = (((seconds - whole as f64) * 1e9 + 0.5) as u32).min(999_999_999);
    NaiveTime::from_hms_nano_opt(hours, minutes, whole, nanos)
}

fn utc_time(timestamp: &NaiveDateTime) -> f64 {
    timestamp.hour() as f64 * 10000.0
        + timestamp.minute() as f64 * 100.0
        + timestamp.second() as f64
        + timestamp.nanosecond() as f64 / 1e9
}

impl Timestamp for Rmc {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        let time = time_of_day(self.utc_time.value?)?;
        let ddmmyy = u32::try_from(self.date.value?).ok()?;
        let date = NaiveDate::from_ymd_opt(
            (ddmmyy % 100) as i32 + 2000,
            (ddmmyy / 100) % 100,
            ddmmyy / 10000,
        )?;
        Some(date.and_time(time))
    }

    fn set_timestamp(&mut self, timestamp: NaiveDateTime) {
        self.utc_time.set(utc_time(&timestamp));
        self.date.set(
            timestamp.day() as i32 * 10000
                + timestamp.month() as i32 * 100
                + timestamp.year().rem_euclid(100),
        );
    }
}

impl Timestamp for Zda {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        let time = time_of_day(self.utc_time.value?)?;
        let date = NaiveDate::from_ymd_opt(
            self.year.value?,
            u32::try_from(self.month.value?).ok()?,
            u32::try_from(self.day.value?).ok()?,
        )?;
        Some(date.and_time(time))
    }

    fn set_timestamp(&mut self, timestamp: NaiveDateTime) {
        self.utc_time.set(utc_time(&timestamp));
        self.day.set(timestamp.day() as i32);
        self.month.set(timestamp.month() as i32);
        self.year.set(timestamp.year());
    }
}
