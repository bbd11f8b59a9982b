use super::{
    checksum,
    field::FieldWriter,
    sentence::{Bind, Sentence},
    view::SentenceView,
};
use crate::{buffer::SliceWriter, Error};

/// Writes `sentence` as `$<talker><id>,<fields>*<checksum>\r\n` into `buf`.
///
/// Output that does not fit is cut off without error; the return value is the number of bytes
/// written. The checksum covers whatever part of the body was actually written.
pub fn serialize<S: Sentence>(talker: &str, sentence: &S, buf: &mut [u8]) -> usize {
    let mut out = SliceWriter::new(buf);
    out.push(b'$');
    out.push_bytes(talker.as_bytes());
    out.push_bytes(S::ID.as_bytes());
    out.push(b',');
    sentence.write_fields(&mut FieldWriter::new(&mut out));

    let sum = checksum::checksum(out.written().get(1..).unwrap_or_default());
    out.push(b'*');
    out.push_bytes(&checksum::to_hex(sum));
    out.push_bytes(b"\r\n");

    if out.overflowed() {
        warn!("{=str} sentence truncated to {=usize} bytes", S::ID, out.len());
    }
    out.len()
}

/// Binds the fields of `view` positionally. Missing trailing fields are bound empty, so this
/// never fails; use [`bind_strict`] to reject mismatched sentences.
pub fn bind<'a, T: Bind<'a>>(view: &SentenceView<'a>) -> T {
    T::bind_fields(view.fields())
}

/// Like [`bind`], but checks the sentence id and that every declared field is present.
pub fn bind_strict<'a, T: Bind<'a>>(view: &SentenceView<'a>) -> Result<T, Error> {
    if view.sentence_id() != T::ID {
        return Err(Error::ParseError);
    }
    if view.field_count() < T::FIELD_COUNT {
        return Err(Error::FieldCountMismatch {
            expected: T::FIELD_COUNT,
            actual: view.field_count(),
        });
    }
    Ok(bind(view))
}
