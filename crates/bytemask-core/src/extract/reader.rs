use super::layout;

pub struct PayloadReader<'a> {
    payload: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    /// Bytes of the inclusive range `start..=end` that exist in the payload,
    /// capped at [`layout::MAX_FIELD_BYTES`] from `start`.
    ///
    /// Returns an empty slice when `start > end` or when the range lies past
    /// the end of the payload.
    pub fn window(&self, start: usize, end: usize) -> &'a [u8] {
        if start > end || start >= self.payload.len() {
            return &[];
        }
        let last = end
            .min(self.payload.len() - 1)
            .min(start.saturating_add(layout::MAX_FIELD_BYTES - 1));
        self.payload.get(start..=last).unwrap_or(&[])
    }
}
