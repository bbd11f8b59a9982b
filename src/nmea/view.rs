use super::MAX_FIELDS;

/// A validated sentence, borrowed from the framer's working buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SentenceView<'a> {
    talker: &'a str,
    sentence_id: &'a str,
    fields: [&'a str; MAX_FIELDS],
    field_count: usize,
}

impl<'a> SentenceView<'a> {
    /// Builds a view from already split parts. Fields past [`MAX_FIELDS`] are dropped.
    pub fn new(talker: &'a str, sentence_id: &'a str, fields: &[&'a str]) -> Self {
        let field_count = fields.len().min(MAX_FIELDS);
        let mut stored = [""; MAX_FIELDS];
        stored[..field_count].copy_from_slice(&fields[..field_count]);
        Self {
            talker,
            sentence_id,
            fields: stored,
            field_count,
        }
    }

    /// Two-character source id, e.g. `"GP"`. Empty if the header was too short.
    pub fn talker(&self) -> &'a str {
        self.talker
    }

    /// Three-character sentence id, e.g. `"GGA"`. Empty if the header was too short.
    pub fn sentence_id(&self) -> &'a str {
        self.sentence_id
    }

    /// Fields following the header, in order. Empty fields are empty strings.
    pub fn fields(&self) -> &[&'a str] {
        &self.fields[..self.field_count]
    }

    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields().get(index).copied()
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }
}
