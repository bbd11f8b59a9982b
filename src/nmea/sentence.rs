use super::field::FieldWriter;

/// A sentence type that can be written out.
pub trait Sentence {
    /// Three-character sentence id, e.g. `"GGA"`.
    const ID: &'static str;
    const FIELD_COUNT: usize;

    /// Writes every field in column order.
    fn write_fields(&self, out: &mut FieldWriter<'_, '_>);
}

/// A received sentence type whose fields borrow from a [`super::SentenceView`].
pub trait Bind<'a>: Sized {
    const ID: &'static str;
    const FIELD_COUNT: usize;

    /// Takes fields positionally; columns past the end of `fields` are bound empty.
    fn bind_fields(fields: &[&'a str]) -> Self;
}

macro_rules! tx_field {
    (float($ty:ty, $precision:literal)) => {
        $crate::nmea::field::TxField<$ty, $precision>
    };
    (float($ty:ty, $precision:literal, $width:literal)) => {
        $crate::nmea::field::TxField<$ty, $precision, $width>
    };
    (int($ty:ty)) => {
        $crate::nmea::field::TxField<$ty>
    };
    (int($ty:ty, $width:literal)) => {
        $crate::nmea::field::TxField<$ty, 0, $width>
    };
    (one($ty:ty)) => {
        $crate::nmea::field::TxField<$ty>
    };
    (text($capacity:literal)) => {
        $crate::nmea::field::TxField<$crate::FixedStr<$capacity>>
    };
}

macro_rules! rx_field {
    ($a:lifetime, float($ty:ty, $($format:literal),+)) => {
        $crate::nmea::field::RxField<$a, $ty>
    };
    ($a:lifetime, int($ty:ty $(, $width:literal)?)) => {
        $crate::nmea::field::RxField<$a, $ty>
    };
    ($a:lifetime, one($ty:ty)) => {
        $crate::nmea::field::RxField<$a, $ty>
    };
    ($a:lifetime, text($capacity:literal)) => {
        $crate::nmea::field::RxField<$a, &$a str>
    };
}

/// Defines a sentence as an eager struct for transmission and a lazy struct for reception.
///
/// Field kinds: `float(type, precision[, width])`, `int(type[, width])`, `one(type)` for a
/// single character or indicator enum, and `text(capacity)`.
macro_rules! nmea_sentence {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $lazy:ident : $id:literal {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $kind:ident ( $($args:tt)* )
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: tx_field!($kind($($args)*)),
            )*
        }

        $(#[$meta])*
        ///
        /// Received form: fields are borrowed tokens, parsed on demand.
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $lazy<'a> {
            $(
                $(#[$field_meta])*
                pub $field: rx_field!('a, $kind($($args)*)),
            )*
        }

        impl $crate::nmea::sentence::Sentence for $name {
            const ID: &'static str = $id;
            const FIELD_COUNT: usize = [$(stringify!($field)),*].len();

            fn write_fields(&self, out: &mut $crate::nmea::field::FieldWriter<'_, '_>) {
                $(out.put(&self.$field);)*
            }
        }

        impl<'a> $crate::nmea::sentence::Bind<'a> for $lazy<'a> {
            const ID: &'static str = $id;
            const FIELD_COUNT: usize = [$(stringify!($field)),*].len();

            fn bind_fields(fields: &[&'a str]) -> Self {
                let mut tokens = fields.iter().copied();
                Self {
                    $($field: $crate::nmea::field::RxField::new(tokens.next().unwrap_or("")),)*
                }
            }
        }

        impl<'a> $lazy<'a> {
            /// Parses every field into the eager form.
            pub fn parse(&self) -> Result<$name, $crate::Error> {
                Ok($name {
                    $($field: $crate::nmea::field::TxField {
                        value: self.$field.parse()?.map(Into::into),
                    },)*
                })
            }
        }
    };
}
