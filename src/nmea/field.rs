//! Text field grammar.
//!
//! Sentences built for transmission hold [`TxField`]s: an optional value plus a fixed decimal
//! precision and minimum width. Received sentences hold [`RxField`]s: the borrowed token, parsed
//! only when asked. An empty token always means "absent".

use core::{fmt::Write, marker::PhantomData};

use crate::{buffer::SliceWriter, Error, FixedStr};

/// Renders a present value as field text.
pub trait Render {
    /// Writes the value with `precision` decimals (floats only), left-padded with zeros to
    /// `width` digits. A minus sign is written before the padded digits and does not count
    /// towards `width`.
    fn render<W: Write>(&self, precision: u8, width: u8, out: &mut W) -> core::fmt::Result;
}

/// Parses a non-empty field token.
pub trait Parse<'a>: Sized {
    fn parse(token: &'a str) -> Result<Self, Error>;
}

macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl Render for $ty {
                fn render<W: Write>(&self, precision: u8, width: u8, out: &mut W) -> core::fmt::Result {
                    // -0.0 renders as 0
                    let magnitude = if *self < 0.0 {
                        out.write_char('-')?;
                        -*self
                    } else {
                        *self + 0.0
                    };
                    write!(
                        out,
                        "{:0width$.precision$}",
                        magnitude,
                        width = width as usize,
                        precision = precision as usize
                    )
                }
            }

            impl<'a> Parse<'a> for $ty {
                fn parse(token: &'a str) -> Result<Self, Error> {
                    token.parse().map_err(|_| Error::ParseError)
                }
            }
        )*
    };
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl Render for $ty {
                fn render<W: Write>(&self, _precision: u8, width: u8, out: &mut W) -> core::fmt::Result {
                    if *self < 0 {
                        out.write_char('-')?;
                    }
                    write!(out, "{:0width$}", self.unsigned_abs(), width = width as usize)
                }
            }

            impl<'a> Parse<'a> for $ty {
                fn parse(token: &'a str) -> Result<Self, Error> {
                    token.parse().map_err(|_| Error::ParseError)
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Render for $ty {
                fn render<W: Write>(&self, _precision: u8, width: u8, out: &mut W) -> core::fmt::Result {
                    write!(out, "{:0width$}", self, width = width as usize)
                }
            }

            impl<'a> Parse<'a> for $ty {
                fn parse(token: &'a str) -> Result<Self, Error> {
                    token.parse().map_err(|_| Error::ParseError)
                }
            }
        )*
    };
}

impl_float!(f32, f64);
impl_signed!(i8, i16, i32, i64);
impl_unsigned!(u8, u16, u32, u64);

impl Render for char {
    fn render<W: Write>(&self, _precision: u8, _width: u8, out: &mut W) -> core::fmt::Result {
        out.write_char(*self)
    }
}

impl<'a> Parse<'a> for char {
    fn parse(token: &'a str) -> Result<Self, Error> {
        token.chars().next().ok_or(Error::ParseError)
    }
}

impl<const N: usize> Render for FixedStr<N> {
    fn render<W: Write>(&self, _precision: u8, _width: u8, out: &mut W) -> core::fmt::Result {
        out.write_str(self.as_str())
    }
}

impl<'a> Parse<'a> for &'a str {
    fn parse(token: &'a str) -> Result<Self, Error> {
        Ok(token)
    }
}

/// Field of a sentence built for transmission.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxField<T, const PRECISION: u8 = 0, const WIDTH: u8 = 0> {
    pub value: Option<T>,
}

impl<T, const PRECISION: u8, const WIDTH: u8> TxField<T, PRECISION, WIDTH> {
    pub const fn new(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub const fn absent() -> Self {
        Self { value: None }
    }

    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}

impl<T: Render, const PRECISION: u8, const WIDTH: u8> TxField<T, PRECISION, WIDTH> {
    /// Writes the field text; nothing for an absent value.
    pub fn render<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        match &self.value {
            Some(value) => value.render(PRECISION, WIDTH, out),
            None => Ok(()),
        }
    }
}

impl<T, const PRECISION: u8, const WIDTH: u8> Default for TxField<T, PRECISION, WIDTH> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T, const PRECISION: u8, const WIDTH: u8> From<Option<T>> for TxField<T, PRECISION, WIDTH> {
    fn from(value: Option<T>) -> Self {
        Self { value }
    }
}

/// Field of a received sentence: a token borrowed from the framer's buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RxField<'a, T> {
    token: &'a str,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> RxField<'a, T> {
    pub const fn new(token: &'a str) -> Self {
        Self {
            token,
            _marker: PhantomData,
        }
    }

    pub const fn empty() -> Self {
        Self::new("")
    }

    /// The raw field text.
    pub fn token(&self) -> &'a str {
        self.token
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }
}

impl<'a, T: Parse<'a>> RxField<'a, T> {
    /// `Ok(None)` for an empty token, `Err(ParseError)` for malformed text.
    pub fn parse(&self) -> Result<Option<T>, Error> {
        if self.token.is_empty() {
            Ok(None)
        } else {
            T::parse(self.token).map(Some)
        }
    }
}

impl<T> Default for RxField<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(feature = "defmt")]
impl<T> defmt::Format for RxField<'_, T> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.token)
    }
}

/// Writes a sentence's fields, comma separated.
pub struct FieldWriter<'w, 'b> {
    out: &'w mut SliceWriter<'b>,
    count: usize,
}

impl<'w, 'b> FieldWriter<'w, 'b> {
    pub(crate) fn new(out: &'w mut SliceWriter<'b>) -> Self {
        Self { out, count: 0 }
    }

    pub fn put<T: Render, const PRECISION: u8, const WIDTH: u8>(
        &mut self,
        field: &TxField<T, PRECISION, WIDTH>,
    ) {
        if self.count > 0 {
            self.out.push(b',');
        }
        // SliceWriter truncates instead of failing
        let _ = field.render(self.out);
        self.count += 1;
    }

    /// Number of fields written.
    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: Render, const P: u8, const W: u8>(field: TxField<T, P, W>) -> ([u8; 32], usize) {
        let mut buf = [0u8; 32];
        let mut out = SliceWriter::new(&mut buf);
        field.render(&mut out).unwrap();
        let len = out.len();
        (buf, len)
    }

    macro_rules! assert_renders {
        ($field:expr, $text:expr) => {{
            let (buf, len) = render($field);
            assert_eq!(core::str::from_utf8(&buf[..len]).unwrap(), $text);
        }};
    }

    #[test]
    fn test_render_float_precision_and_width() {
        assert_renders!(TxField::<f64, 2, 9>::new(123519.0), "123519.00");
        assert_renders!(TxField::<f64, 4, 9>::new(4807.038), "4807.0380");
        assert_renders!(TxField::<f64, 4, 10>::new(1131.0), "01131.0000");
        assert_renders!(TxField::<f32, 1>::new(0.9), "0.9");
        assert_renders!(TxField::<f64, 2, 9>::new(5.5), "000005.50");
    }

    #[test]
    fn test_render_negative_sign_outside_width() {
        assert_renders!(TxField::<f32, 1, 5>::new(-2.5), "-002.5");
        assert_renders!(TxField::<f32, 1>::new(-35.5), "-35.5");
        assert_renders!(TxField::<i32, 0, 2>::new(-5), "-05");
    }

    #[test]
    fn test_render_negative_zero_unsigned() {
        assert_renders!(TxField::<f32, 1, 5>::new(-0.0), "000.0");
        assert_renders!(TxField::<f64, 2>::new(-0.0), "0.00");
        assert_renders!(TxField::<f32, 1, 5>::new(0.0), "000.0");
    }

    #[test]
    fn test_render_integers() {
        assert_renders!(TxField::<i32, 0, 2>::new(8), "08");
        assert_renders!(TxField::<i32, 0, 6>::new(230394), "230394");
        assert_renders!(TxField::<i32, 0, 4>::new(12345), "12345");
        assert_renders!(TxField::<u16>::new(7), "7");
    }

    #[test]
    fn test_render_absent_char_and_text() {
        assert_renders!(TxField::<f32, 1>::absent(), "");
        assert_renders!(TxField::<char>::new('A'), "A");
        assert_renders!(TxField::<FixedStr<8>>::new(FixedStr::new("W84")), "W84");
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(RxField::<f64>::new("4807.038").parse(), Ok(Some(4807.038)));
        assert_eq!(RxField::<i32>::new("08").parse(), Ok(Some(8)));
        assert_eq!(RxField::<i32>::new("-12").parse(), Ok(Some(-12)));
        assert_eq!(RxField::<char>::new("AB").parse(), Ok(Some('A')));
        assert_eq!(RxField::<&str>::new("W84").parse(), Ok(Some("W84")));
    }

    #[test]
    fn test_parse_empty_is_absent() {
        assert_eq!(RxField::<f32>::new("").parse(), Ok(None));
        assert_eq!(RxField::<char>::empty().parse(), Ok(None));
        assert!(RxField::<&str>::default().is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(RxField::<f32>::new("1.2.3").parse(), Err(Error::ParseError));
        assert_eq!(RxField::<i32>::new("12a").parse(), Err(Error::ParseError));
        assert_eq!(RxField::<u8>::new("300").parse(), Err(Error::ParseError));
    }

    #[test]
    fn test_field_writer_separators() {
        let mut buf = [0u8; 32];
        let mut out = SliceWriter::new(&mut buf);
        let mut fields = FieldWriter::new(&mut out);
        fields.put(&TxField::<f32, 1>::new(35.5));
        fields.put(&TxField::<char>::absent());
        fields.put(&TxField::<char>::absent());
        assert_eq!(fields.count(), 3);
        assert_eq!(out.written(), b"35.5,,");
    }
}
