//! MAVLink binary protocol: framer, X.25 checksum with CRC_EXTRA, and message codec.
//!
//! ### Framing
//! ```rust
//! use telemetry_codec::mavlink::{Framer, FramerConfig, Message};
//!
//! let mut framer: Framer = Framer::new(FramerConfig::default());
//! let data = [0xFD, 9, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 2, 3, 0x81, 4, 3, 0x9F, 0xE6];
//! let mut input = &data[..];
//! while !input.is_empty() {
//!     let (result, rest) = framer.push_bytes(input);
//!     if let Some(Ok(view)) = result {
//!         assert_eq!(view.message_id(), 0);
//!         assert!(matches!(Message::decode_verified(&view), Ok(Message::Heartbeat(_))));
//!     }
//!     input = rest;
//! }
//! ```
//! ### Serialization
//! ```rust
//! use telemetry_codec::mavlink::{messages::CommandAck, serialize, MAX_FRAME_LEN};
//!
//! let ack = CommandAck { command: 400, result: 0 };
//! let mut buf = [0u8; MAX_FRAME_LEN];
//! let len = serialize(&ack, 1, 1, 0, &mut buf).unwrap();
//! assert_eq!(len, 10 + 2 + 2);
//! ```

pub mod checksum;
pub mod field;
#[macro_use]
pub mod message;
pub mod codec;
pub mod enums;
pub mod framer;
pub mod messages;
pub mod view;

pub use codec::{deserialize, deserialize_verified, serialize};
pub use framer::{Framer, FramerConfig};
pub use message::MavMessage;
pub use messages::Message;
pub use view::{IncompatFlags, MavlinkVersion, MessageView};

/// Largest payload a frame can carry.
pub const MAX_PAYLOAD_LEN: usize = 255;
pub const CHECKSUM_LEN: usize = 2;
pub const SIGNATURE_LEN: usize = 13;
/// Largest frame: v2 header, full payload, checksum and signature.
pub const MAX_FRAME_LEN: usize = 10 + MAX_PAYLOAD_LEN + CHECKSUM_LEN + SIGNATURE_LEN;
