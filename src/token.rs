/// One parsed line of a codepoints file.
///
/// `identifier` is the cleaned-up member name and is never empty.
/// `value` is everything after the first space, untouched.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CodepointToken {
    pub(crate) identifier: String,
    pub(crate) value: String,
}

impl CodepointToken {
    pub fn new(identifier: String, value: String) -> Self {
        Self { identifier, value }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
