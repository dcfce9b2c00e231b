use super::layout;

/// Tokenizer over a mask string.
///
/// Splitting never allocates new strings: every piece borrows from the input.
pub struct MaskReader<'a> {
    mask: &'a str,
}

impl<'a> MaskReader<'a> {
    pub fn new(mask: &'a str) -> Self {
        Self { mask }
    }

    /// Trimmed tokens in input order.
    ///
    /// A single empty piece after the last separator is dropped, so a trailing
    /// comma and the empty mask contribute no token. Any other empty piece is
    /// kept and later rejected by the parser.
    pub fn tokens(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let mut pieces: Vec<&'a str> = self.mask.split(layout::TOKEN_SEPARATOR).collect();
        if pieces.last().is_some_and(|piece| piece.is_empty()) {
            pieces.pop();
        }
        pieces.into_iter().map(trim)
    }
}

pub fn trim(text: &str) -> &str {
    text.trim_matches(&layout::WHITESPACE[..])
}

/// Split `text` on the first `separator` and trim both halves.
pub fn split_trimmed(text: &str, separator: char) -> Option<(&str, &str)> {
    text.split_once(separator)
        .map(|(head, tail)| (trim(head), trim(tail)))
}
