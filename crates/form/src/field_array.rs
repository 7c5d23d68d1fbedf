//! Repeatable rows bound to one list field.
//!
//! Rows live in an arena addressed by [`EntryKey`]; the visible order is a
//! separate list of keys. Removing or moving a row shifts the indices of
//! the others but never their keys, so per-row edit state keyed by
//! `EntryKey` stays attached to the right row.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::error::FormError;
use crate::value::{RawRecord, RawValue};

/// Stable identity of a row; never reused within one [`FieldArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryKey(u64);

impl EntryKey {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered, mutable rows of a list field.
#[derive(Debug, Clone, Default)]
pub struct FieldArray {
    entries: HashMap<EntryKey, RawRecord>,
    order: Vec<EntryKey>,
    next_key: u64,
}

impl FieldArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an array from rows, keyed in order.
    pub fn from_rows(rows: impl IntoIterator<Item = RawRecord>) -> Self {
        let mut array = Self::new();
        for row in rows {
            array.append(row);
        }
        array
    }

    fn allocate(&mut self, entry: RawRecord) -> EntryKey {
        let key = EntryKey(self.next_key);
        self.next_key += 1;
        self.entries.insert(key, entry);
        key
    }

    fn check_index(&self, index: usize, len: usize) -> Result<(), FormError> {
        if index < len {
            Ok(())
        } else {
            Err(FormError::IndexOutOfBounds {
                index,
                len: self.order.len(),
            })
        }
    }

    /// Adds a row at the end.
    pub fn append(&mut self, entry: RawRecord) -> EntryKey {
        let key = self.allocate(entry);
        self.order.push(key);
        trace!(%key, len = self.order.len(), "appended field array entry");
        key
    }

    /// Adds a row at the start.
    pub fn prepend(&mut self, entry: RawRecord) -> EntryKey {
        let key = self.allocate(entry);
        self.order.insert(0, key);
        trace!(%key, len = self.order.len(), "prepended field array entry");
        key
    }

    /// Adds a row so that it ends up at `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, entry: RawRecord) -> Result<EntryKey, FormError> {
        self.check_index(index, self.order.len() + 1)?;
        let key = self.allocate(entry);
        self.order.insert(index, key);
        trace!(%key, index, "inserted field array entry");
        Ok(key)
    }

    /// Removes the row at `index`; later rows move up one position.
    pub fn remove(&mut self, index: usize) -> Option<RawRecord> {
        if index >= self.order.len() {
            return None;
        }
        let key = self.order.remove(index);
        trace!(%key, index, "removed field array entry");
        self.entries.remove(&key)
    }

    /// Removes the row with `key`, wherever it is.
    pub fn remove_key(&mut self, key: EntryKey) -> Option<RawRecord> {
        let index = self.index_of(key)?;
        self.remove(index)
    }

    /// Exchanges the rows at two positions.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), FormError> {
        self.check_index(a, self.order.len())?;
        self.check_index(b, self.order.len())?;
        self.order.swap(a, b);
        Ok(())
    }

    /// Moves the row at `from` so that it ends up at `to`.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), FormError> {
        self.check_index(from, self.order.len())?;
        self.check_index(to, self.order.len())?;
        let key = self.order.remove(from);
        self.order.insert(to, key);
        Ok(())
    }

    /// Replaces the whole row with `key`.
    pub fn update(&mut self, key: EntryKey, entry: RawRecord) -> Result<RawRecord, FormError> {
        let slot = self
            .entries
            .get_mut(&key)
            .ok_or(FormError::UnknownEntry { key: key.get() })?;
        Ok(std::mem::replace(slot, entry))
    }

    /// Sets one field of the row with `key`.
    pub fn set_field(&mut self, key: EntryKey, field: impl Into<String>, value: impl Into<RawValue>) -> Result<(), FormError> {
        let entry = self
            .entries
            .get_mut(&key)
            .ok_or(FormError::UnknownEntry { key: key.get() })?;
        entry.insert(field, value);
        Ok(())
    }

    /// Row at a visible position.
    pub fn get(&self, index: usize) -> Option<&RawRecord> {
        self.order.get(index).and_then(|key| self.entries.get(key))
    }

    pub fn get_by_key(&self, key: EntryKey) -> Option<&RawRecord> {
        self.entries.get(&key)
    }

    /// Key of the row at a visible position.
    pub fn key_at(&self, index: usize) -> Option<EntryKey> {
        self.order.get(index).copied()
    }

    /// Current position of the row with `key`.
    pub fn index_of(&self, key: EntryKey) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }

    /// Rows with their keys, in visible order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryKey, &RawRecord)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|entry| (*key, entry)))
    }

    pub fn keys(&self) -> &[EntryKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drops every row. Keys handed out before are not reused.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// The value submitted for this field: one element per visible row.
    pub fn to_raw(&self) -> RawValue {
        RawValue::List(self.iter().map(|(_, entry)| entry.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tech(title: &str) -> RawRecord {
        RawRecord::new().with("title", title).with("knowledge", "")
    }

    fn titles(array: &FieldArray) -> Vec<String> {
        array
            .iter()
            .filter_map(|(_, entry)| match entry.get("title") {
                Some(RawValue::Text(title)) => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn append_assigns_increasing_keys() {
        let mut array = FieldArray::new();
        let a = array.append(tech("go"));
        let b = array.append(tech("ts"));
        assert!(a < b);
        assert_eq!(array.len(), 2);
        assert_eq!(array.key_at(1), Some(b));
    }

    #[test]
    fn remove_shifts_indices_but_keeps_keys() {
        let mut array = FieldArray::from_rows([tech("go"), tech("ts"), tech("rust")]);
        let rust = array.key_at(2).unwrap();

        let removed = array.remove(0).unwrap();
        assert_eq!(removed.get("title"), Some(&RawValue::Text("go".into())));
        assert_eq!(array.index_of(rust), Some(1));
        assert_eq!(titles(&array), vec!["ts", "rust"]);
        assert_eq!(array.remove(5), None);
    }

    #[test]
    fn keys_are_not_reused_after_clear() {
        let mut array = FieldArray::new();
        let first = array.append(tech("go"));
        array.clear();
        assert!(array.is_empty());
        let second = array.append(tech("go"));
        assert_ne!(first, second);
        assert_eq!(array.get_by_key(first), None);
    }

    #[test]
    fn insert_prepend_swap_move() {
        let mut array = FieldArray::from_rows([tech("b"), tech("d")]);
        array.prepend(tech("a"));
        array.insert(2, tech("c")).unwrap();
        array.insert(4, tech("e")).unwrap();
        assert_eq!(titles(&array), vec!["a", "b", "c", "d", "e"]);

        array.swap(0, 4).unwrap();
        assert_eq!(titles(&array), vec!["e", "b", "c", "d", "a"]);

        array.move_entry(4, 0).unwrap();
        assert_eq!(titles(&array), vec!["a", "e", "b", "c", "d"]);

        assert_eq!(
            array.insert(9, tech("x")).unwrap_err(),
            FormError::IndexOutOfBounds { index: 9, len: 5 }
        );
        assert!(array.swap(0, 5).is_err());
        assert!(array.move_entry(5, 0).is_err());
    }

    #[test]
    fn edits_follow_the_key() {
        let mut array = FieldArray::from_rows([tech("go"), tech("ts")]);
        let ts = array.key_at(1).unwrap();
        array.remove(0);

        array.set_field(ts, "knowledge", "40").unwrap();
        assert_eq!(array.get(0).unwrap().get("knowledge"), Some(&RawValue::Text("40".into())));

        let old = array.update(ts, tech("typescript")).unwrap();
        assert_eq!(old.get("title"), Some(&RawValue::Text("ts".into())));
        assert_eq!(titles(&array), vec!["typescript"]);

        let gone = array.key_at(0).map(|k| EntryKey(k.get() + 10)).unwrap();
        assert_eq!(
            array.set_field(gone, "title", "x").unwrap_err().code(),
            "FORM_UNKNOWN_ENTRY"
        );
        assert!(array.remove_key(ts).is_some());
        assert!(array.is_empty());
    }

    #[test]
    fn to_raw_matches_visible_rows() {
        let mut array = FieldArray::from_rows([tech("go"), tech("ts"), tech("rust")]);
        array.remove(1);
        match array.to_raw() {
            RawValue::List(rows) => {
                assert_eq!(rows.len(), array.len());
                assert_eq!(rows[1], tech("rust"));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }
}
