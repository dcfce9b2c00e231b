use std::mem;

use thiserror::Error;

use crate::row::DecodedField;

/// The entries of one unit of work would exceed the configured cap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("exceeded maximum number of entries per unit of work: need {needed}, max {max}")]
pub struct CapacityError {
    pub needed: usize,
    pub max: usize,
}

/// Location of one row inside an [`EntryBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSlot {
    pub offset: usize,
    pub length: usize,
    pub valid: bool,
}

/// Contiguous storage for the decoded entries of one unit of work.
///
/// Names and values live in two flat vectors; each row owns an
/// `offset..offset + length` slice of them. Null rows take an empty slice at
/// the current end. When a cap is set, a row that would push the total past
/// it is rejected before anything is written.
///
/// # Examples
/// ```
/// use bytemask_core::{DecodedField, EntryBuffer};
///
/// let mut buffer = EntryBuffer::new(Some(2));
/// let field = |name: &str, value| DecodedField { name: name.to_string(), value };
///
/// buffer.push_row(Some(vec![field("a", 1)])).unwrap();
/// buffer.push_row(None).unwrap();
/// assert!(buffer.push_row(Some(vec![field("b", 2), field("c", 3)])).is_err());
/// assert_eq!(buffer.rows(), 2);
/// assert_eq!(buffer.entries_total(), 1);
/// ```
#[derive(Debug, Default)]
pub struct EntryBuffer {
    names: Vec<String>,
    values: Vec<i64>,
    slots: Vec<RowSlot>,
    max_entries: Option<usize>,
}

impl EntryBuffer {
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    /// Append one row. `None` records a null row.
    ///
    /// # Errors
    /// Returns [`CapacityError`] when the row does not fit under the cap; the
    /// buffer is left unchanged.
    pub fn push_row(&mut self, fields: Option<Vec<DecodedField>>) -> Result<(), CapacityError> {
        let offset = self.values.len();
        let Some(fields) = fields else {
            self.slots.push(RowSlot {
                offset,
                length: 0,
                valid: false,
            });
            return Ok(());
        };

        let needed = offset + fields.len();
        if let Some(max) = self.max_entries {
            if needed > max {
                return Err(CapacityError { needed, max });
            }
        }

        self.slots.push(RowSlot {
            offset,
            length: fields.len(),
            valid: true,
        });
        for field in fields {
            self.names.push(field.name);
            self.values.push(field.value);
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.slots.len()
    }

    pub fn entries_total(&self) -> usize {
        self.values.len()
    }

    pub fn slot(&self, index: usize) -> Option<RowSlot> {
        self.slots.get(index).copied()
    }

    /// Entries of row `index`, or `None` for a null row or an unknown index.
    pub fn row(&self, index: usize) -> Option<impl Iterator<Item = (&str, i64)> + '_> {
        let slot = self.slot(index).filter(|slot| slot.valid)?;
        let range = slot.offset..slot.offset + slot.length;
        let names = self.names.get(range.clone())?;
        let values = self.values.get(range)?;
        Some(
            names
                .iter()
                .map(String::as_str)
                .zip(values.iter().copied()),
        )
    }

    /// Move every row out as owned field lists, leaving the buffer empty.
    ///
    /// Slots are laid out back to back, so names and values are handed over
    /// without copying.
    pub fn drain_rows(&mut self) -> Vec<Option<Vec<DecodedField>>> {
        let mut names = mem::take(&mut self.names).into_iter();
        let mut values = mem::take(&mut self.values).into_iter();
        self.slots
            .drain(..)
            .map(|slot| {
                slot.valid.then(|| {
                    names
                        .by_ref()
                        .zip(values.by_ref())
                        .take(slot.length)
                        .map(|(name, value)| DecodedField { name, value })
                        .collect()
                })
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.names.clear();
        self.values.clear();
        self.slots.clear();
    }
}
