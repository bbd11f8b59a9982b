//! Binary field layout: fixed-size little-endian primitives and arrays, written back to back in
//! declared order with no padding.

use crate::FixedStr;

use super::MAX_PAYLOAD_LEN;

/// MAVLink primitive type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Primitive {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    Char,
}

impl Primitive {
    /// Size of one element in bytes.
    pub const fn size(self) -> usize {
        match self {
            Primitive::U8 | Primitive::I8 | Primitive::Char => 1,
            Primitive::U16 | Primitive::I16 => 2,
            Primitive::U32 | Primitive::I32 | Primitive::F32 => 4,
            Primitive::U64 | Primitive::I64 | Primitive::F64 => 8,
        }
    }

    /// Canonical MAVLink type name, as fed into CRC_EXTRA.
    pub const fn type_name(self) -> &'static str {
        match self {
            Primitive::U8 => "uint8_t",
            Primitive::I8 => "int8_t",
            Primitive::U16 => "uint16_t",
            Primitive::I16 => "int16_t",
            Primitive::U32 => "uint32_t",
            Primitive::I32 => "int32_t",
            Primitive::U64 => "uint64_t",
            Primitive::I64 => "int64_t",
            Primitive::F32 => "float",
            Primitive::F64 => "double",
            Primitive::Char => "char",
        }
    }
}

/// One entry of a message's field table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldDescriptor {
    /// Wire name of the field.
    pub name: &'static str,
    pub primitive: Primitive,
    /// Element count for arrays, `0` for scalars.
    pub array_len: usize,
}

impl FieldDescriptor {
    pub const fn of<T: WireField>(name: &'static str) -> Self {
        Self {
            name,
            primitive: T::PRIMITIVE,
            array_len: T::ARRAY_LEN,
        }
    }

    /// Encoded size in bytes.
    pub const fn size(&self) -> usize {
        if self.array_len == 0 {
            self.primitive.size()
        } else {
            self.primitive.size() * self.array_len
        }
    }
}

/// Untruncated payload length of a field table.
pub const fn payload_len(fields: &[FieldDescriptor]) -> usize {
    let mut len = 0;
    let mut i = 0;
    while i < fields.len() {
        len += fields[i].size();
        i += 1;
    }
    len
}

/// Checks that fields are sorted by element size, largest first.
pub const fn is_wire_ordered(fields: &[FieldDescriptor]) -> bool {
    let mut i = 1;
    while i < fields.len() {
        if fields[i].primitive.size() > fields[i - 1].primitive.size() {
            return false;
        }
        i += 1;
    }
    true
}

/// A value with a fixed little-endian wire layout.
pub trait WireField: Copy {
    const PRIMITIVE: Primitive;
    const ARRAY_LEN: usize = 0;
    const SIZE: usize;
    /// The all-zero bit pattern.
    const ZERO: Self;

    /// Writes the value into `out`, which is exactly `SIZE` bytes long.
    fn encode(&self, out: &mut [u8]);

    /// Reads a value from `raw`, which is exactly `SIZE` bytes long.
    fn decode(raw: &[u8]) -> Self;
}

/// Marker for single-element wire fields, which may be grouped into arrays.
pub trait Scalar: WireField {}

macro_rules! impl_scalar {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl WireField for $ty {
                const PRIMITIVE: Primitive = Primitive::$prim;
                const SIZE: usize = core::mem::size_of::<$ty>();
                const ZERO: Self = 0 as $ty;

                fn encode(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                fn decode(raw: &[u8]) -> Self {
                    let mut bytes = [0u8; core::mem::size_of::<$ty>()];
                    bytes.copy_from_slice(raw);
                    <$ty>::from_le_bytes(bytes)
                }
            }

            impl Scalar for $ty {}
        )*
    };
}

impl_scalar! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

impl<T: Scalar, const N: usize> WireField for [T; N] {
    const PRIMITIVE: Primitive = T::PRIMITIVE;
    const ARRAY_LEN: usize = N;
    const SIZE: usize = T::SIZE * N;
    const ZERO: Self = [T::ZERO; N];

    fn encode(&self, out: &mut [u8]) {
        for (chunk, value) in out.chunks_exact_mut(T::SIZE).zip(self.iter()) {
            value.encode(chunk);
        }
    }

    fn decode(raw: &[u8]) -> Self {
        core::array::from_fn(|i| T::decode(&raw[i * T::SIZE..(i + 1) * T::SIZE]))
    }
}

impl<const N: usize> WireField for FixedStr<N> {
    const PRIMITIVE: Primitive = Primitive::Char;
    const ARRAY_LEN: usize = N;
    const SIZE: usize = N;
    const ZERO: Self = FixedStr::EMPTY;

    fn encode(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.0);
    }

    fn decode(raw: &[u8]) -> Self {
        let mut buf = [0; N];
        buf.copy_from_slice(raw);
        FixedStr(buf)
    }
}

/// Writes fields back to back into a payload region.
pub struct PayloadWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> PayloadWriter<'a> {
    /// `buf` must hold at least the message's untruncated payload length.
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn put<T: WireField>(&mut self, value: &T) {
        value.encode(&mut self.buf[self.pos..self.pos + T::SIZE]);
        self.pos += T::SIZE;
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Reads fields back to back from a possibly truncated payload.
///
/// Bytes missing at the end of the payload read as zero, the mirror image of the serializer
/// trimming trailing zeros.
pub struct PayloadReader<'a> {
    remaining: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    pub(crate) fn new(payload: &'a [u8]) -> Self {
        Self { remaining: payload }
    }

    pub fn take<T: WireField>(&mut self) -> T {
        let mut scratch = [0u8; MAX_PAYLOAD_LEN];
        let raw = &mut scratch[..T::SIZE];
        let n = T::SIZE.min(self.remaining.len());
        raw[..n].copy_from_slice(&self.remaining[..n]);
        self.remaining = &self.remaining[n..];
        T::decode(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
