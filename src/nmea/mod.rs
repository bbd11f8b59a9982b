//! NMEA-0183 text protocol: sentence framer, XOR checksum, and field codec.
//!
//! ### Framing and binding
//! ```rust
//! use telemetry_codec::nmea::{sentences::LazySentence, Framer};
//!
//! let mut framer: Framer = Framer::default();
//! let data = b"$GPROT,35.5,A*02\r\n";
//! let mut input = &data[..];
//! while !input.is_empty() {
//!     let (result, rest) = framer.push_bytes(input);
//!     if let Some(Ok(view)) = result {
//!         match LazySentence::bind(&view) {
//!             Some(LazySentence::Rot(rot)) => assert_eq!(rot.rate_of_turn.parse(), Ok(Some(35.5))),
//!             other => panic!("unexpected sentence {other:?}"),
//!         }
//!     }
//!     input = rest;
//! }
//! ```
//! ### Serialization
//! ```rust
//! use telemetry_codec::nmea::{enums::NorthReference, field::TxField, sentences::Hdt, serialize};
//!
//! let hdt = Hdt {
//!     heading: TxField::new(274.1),
//!     true_indicator: TxField::new(NorthReference::True),
//! };
//! let mut buf = [0u8; 32];
//! let len = serialize("HE", &hdt, &mut buf);
//! assert_eq!(&buf[..len], b"$HEHDT,274.1,T*2F\r\n");
//! ```

pub mod checksum;
pub mod field;
#[macro_use]
pub mod sentence;
pub mod codec;
pub mod enums;
pub mod framer;
pub mod sentences;
pub mod utils;
pub mod view;

pub use codec::{bind, bind_strict, serialize};
pub use framer::{Framer, FramerConfig};
pub use sentence::{Bind, Sentence};
pub use view::SentenceView;

/// Fields kept per sentence, not counting the talker/sentence id header.
pub const MAX_FIELDS: usize = 32;
/// Default working-buffer size of [`Framer`].
pub const MAX_SENTENCE_LEN: usize = 256;
