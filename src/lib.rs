//! This crate provides `no-std` wire codecs for two telemetry protocols: binary MAVLink
//! ([`mavlink`]) and text NMEA-0183 ([`nmea`]).
//!
//! Both sides follow the same shape: a byte-at-a-time framer that yields borrowed views into its
//! working buffer, and a codec that turns views into typed messages and typed messages into bytes.
//! Nothing allocates; all buffers are fixed-size or supplied by the caller.
//! # Usage
//! ### Binary frames
//! ```rust
//! use telemetry_codec::mavlink::{self, messages::Attitude, Framer, Message, MAX_FRAME_LEN};
//!
//! let attitude = Attitude { time_boot_ms: 1000, roll: 0.5, ..Default::default() };
//! let mut buf = [0u8; MAX_FRAME_LEN];
//! let len = mavlink::serialize(&attitude, 1, 1, 0, &mut buf).unwrap();
//!
//! let mut framer: Framer = Framer::default();
//! let (result, _) = framer.push_bytes(&buf[..len]);
//! match result {
//!     Some(Ok(view)) => assert_eq!(Message::decode_verified(&view), Ok(Message::Attitude(attitude))),
//!     e => panic!("This data should parse succesfully: {e:?}"),
//! }
//! ```
//! ### Text sentences
//! ```rust
//! use telemetry_codec::nmea::{self, enums::Status, field::TxField, sentences::{LazyRot, Rot}, Framer};
//!
//! let rot = Rot { rate_of_turn: TxField::new(-2.5), status: TxField::new(Status::Active) };
//! let mut buf = [0u8; 64];
//! let len = nmea::serialize("HE", &rot, &mut buf);
//!
//! let mut framer: Framer = Framer::default();
//! let (result, _) = framer.push_bytes(&buf[..len]);
//! match result {
//!     Some(Ok(view)) => assert_eq!(nmea::bind::<LazyRot>(&view).parse(), Ok(rot)),
//!     e => panic!("This data should parse succesfully: {e:?}"),
//! }
//! ```

#![no_std]

#[macro_use]
mod logging;

mod buffer;
mod error;
mod fixed_str;

pub use error::Error;
pub use fixed_str::FixedStr;

pub mod mavlink;
pub mod nmea;
