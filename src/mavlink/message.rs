use super::{
    checksum::crc_extra,
    field::{payload_len, FieldDescriptor, PayloadReader, PayloadWriter},
};

/// A MAVLink message type with a fixed, wire-ordered field table.
///
/// Implementations are generated by [`mavlink_message!`], which keeps `FIELDS`, `write_fields`
/// and `read_fields` in the same order.
pub trait MavMessage: Sized {
    /// Message id, up to 24 bits.
    const ID: u32;
    /// Upper-case message name as used by the protocol definition.
    const NAME: &'static str;
    /// Field table in wire order.
    const FIELDS: &'static [FieldDescriptor];
    /// Schema seed folded into every frame CRC of this message type.
    const CRC_EXTRA: u8 = crc_extra(Self::NAME, Self::FIELDS);
    /// Payload length before trailing-zero truncation.
    const ENCODED_LEN: usize = payload_len(Self::FIELDS);

    /// Writes every field, in wire order.
    fn write_fields(&self, writer: &mut PayloadWriter<'_>);

    /// Reads every field, in wire order, zero-filling what the payload does not cover.
    fn read_fields(reader: &mut PayloadReader<'_>) -> Self;
}

macro_rules! field_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $wire:literal) => {
        $wire
    };
}

/// Defines a message struct and its [`MavMessage`] implementation.
///
/// Fields must be listed in wire order (largest element type first); this is checked at compile
/// time. A field whose wire name is a Rust keyword takes the wire name in parentheses.
macro_rules! mavlink_message {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $id:literal, $wire:literal {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident $(($field_wire:literal))? : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: <$ty as $crate::mavlink::field::WireField>::ZERO,)*
                }
            }
        }

        impl $crate::mavlink::message::MavMessage for $name {
            const ID: u32 = $id;
            const NAME: &'static str = $wire;
            const FIELDS: &'static [$crate::mavlink::field::FieldDescriptor] = &[
                $($crate::mavlink::field::FieldDescriptor::of::<$ty>(field_name!($field $(, $field_wire)?)),)*
            ];

            fn write_fields(&self, writer: &mut $crate::mavlink::field::PayloadWriter<'_>) {
                $(writer.put(&self.$field);)*
            }

            fn read_fields(reader: &mut $crate::mavlink::field::PayloadReader<'_>) -> Self {
                Self {
                    $($field: reader.take::<$ty>(),)*
                }
            }
        }

        const _: () = {
            use $crate::mavlink::message::MavMessage;
            assert!(
                $crate::mavlink::field::is_wire_ordered(<$name as MavMessage>::FIELDS),
                concat!(stringify!($name), " fields are not in wire order"),
            );
            assert!(<$name as MavMessage>::ENCODED_LEN <= $crate::mavlink::MAX_PAYLOAD_LEN);
        };
    };
}
