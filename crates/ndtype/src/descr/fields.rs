// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Named fields of structured descriptors.
//!
//! A structured descriptor pairs an ordered [`NamesList`] (enumeration order)
//! with a [`FieldTable`] (lookup by name). A field declared with a title is
//! stored twice: under its name, and under its title as an alias entry whose
//! `title` equals its key. Recursive traversals skip alias entries so every
//! sub-descriptor is processed once.

use indexmap::IndexMap;

use crate::config::FIELDS_TABLE_CAPACITY;
use crate::descr::DescrRef;
use crate::error::{DescrError, Result};

/// A field record: shared sub-descriptor, byte offset and optional title.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Sub-descriptor; shared with the title alias entry, if any.
    pub descr: DescrRef,
    /// Byte offset of the field inside the parent element.
    pub offset: usize,
    /// Alternate lookup name.
    pub title: Option<String>,
}

impl Field {
    pub fn new(descr: DescrRef, offset: usize, title: Option<&str>) -> Self {
        Self {
            descr,
            offset,
            title: title.map(str::to_owned),
        }
    }

    /// Whether this record, stored under `key`, is a title alias.
    pub fn is_alias(&self, key: &str) -> bool {
        self.title.as_deref() == Some(key)
    }
}

/// Name -> field record table.
///
/// Iteration follows insertion order and is stable for a given table state.
#[derive(Debug, PartialEq, Default)]
pub struct FieldTable {
    entries: IndexMap<String, Field>,
}

impl FieldTable {
    /// Allocate an empty table.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::with_capacity(FIELDS_TABLE_CAPACITY),
        }
    }

    /// Deep copy: every key is duplicated and every sub-descriptor retained.
    pub fn try_copy(&self) -> Result<Self> {
        let mut entries = IndexMap::new();
        entries.try_reserve(self.entries.len())?;
        entries.extend(
            self.entries
                .iter()
                .map(|(key, field)| (key.clone(), field.clone())),
        );
        Ok(Self { entries })
    }

    /// Insert or overwrite `key`, taking ownership of `descr`.
    ///
    /// Returns the replaced record; dropping it releases its sub-descriptor.
    pub fn set_field(
        &mut self,
        key: &str,
        descr: DescrRef,
        offset: usize,
        title: Option<&str>,
    ) -> Option<Field> {
        self.put(key.to_owned(), Field::new(descr, offset, title))
    }

    pub fn put(&mut self, key: String, field: Field) -> Option<Field> {
        self.entries.insert(key, field)
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Field> {
        self.entries.shift_remove(key)
    }

    /// Move the entry stored under `old` to `new`, keeping its position.
    pub fn rekey(&mut self, old: &str, new: String) -> Result<bool> {
        if !self.contains_key(old) {
            return Ok(false);
        }
        self.rekey_many(&[(old, new)])?;
        Ok(true)
    }

    /// Re-key several entries at once; renames may permute existing keys.
    ///
    /// Rejected without any change when two renames share a target or a
    /// target is a key (alias keys included) that is not itself renamed.
    pub(crate) fn rekey_many(&mut self, renames: &[(&str, String)]) -> Result<()> {
        for (i, (_, new)) in renames.iter().enumerate() {
            let repeated = renames[..i].iter().any(|(_, prev)| prev == new);
            let taken = self.contains_key(new) && !renames.iter().any(|(old, _)| old == new);
            if repeated || taken {
                return Err(DescrError::DuplicateName(new.clone()));
            }
        }

        let mut rebuilt = IndexMap::new();
        rebuilt.try_reserve(self.entries.len())?;

        for (key, field) in self.entries.drain(..) {
            let key = renames
                .iter()
                .find(|(old, _)| *old == key)
                .map_or(key, |(_, new)| new.clone());
            rebuilt.insert(key, field);
        }
        self.entries = rebuilt;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, aliases included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Field)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries that are not title aliases.
    pub fn primary(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.iter().filter(|(key, field)| !field.is_alias(key))
    }
}

/// Ordered field names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamesList(Vec<String>);

impl NamesList {
    /// Allocate `n` empty slots.
    pub fn alloc(n: usize) -> Result<Self> {
        let mut names = Vec::new();
        names.try_reserve_exact(n)?;
        names.resize_with(n, String::new);
        Ok(Self(names))
    }

    /// Duplicate every name.
    pub fn try_copy(&self) -> Result<Self> {
        let mut names = Vec::new();
        names.try_reserve_exact(self.0.len())?;
        names.extend(self.0.iter().cloned());
        Ok(Self(names))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn set(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        let len = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or(DescrError::NameIndex { index, len })?;
        *slot = name.into();
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }
}

impl<S: Into<String>> FromIterator<S> for NamesList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Names plus fields; present on a descriptor as a unit.
#[derive(Debug, PartialEq, Default)]
pub struct FieldLayout {
    pub(crate) names: NamesList,
    pub(crate) fields: FieldTable,
}

impl FieldLayout {
    pub fn new(names: NamesList, fields: FieldTable) -> Self {
        Self { names, fields }
    }

    pub fn names(&self) -> &NamesList {
        &self.names
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    pub(crate) fn try_copy(&self) -> Result<Self> {
        Ok(Self {
            names: self.names.try_copy()?,
            fields: self.fields.try_copy()?,
        })
    }

    /// Fields in names-list order (aliases excluded).
    pub fn ordered(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.names
            .iter()
            .filter_map(|name| self.fields.get(name).map(|field| (name, field)))
    }

    /// Replace the names, re-keying every named entry to its new name.
    ///
    /// Rejected without any change unless `names` has exactly the current
    /// length, holds no repeated name and renames nothing onto a key that
    /// stays in the table.
    pub(crate) fn replace_names(&mut self, names: NamesList) -> Result<()> {
        if names.len() != self.names.len() {
            return Err(DescrError::LengthMismatch {
                expected: self.names.len(),
                found: names.len(),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if names.iter().take(i).any(|prev| prev == name) {
                return Err(DescrError::DuplicateName(name.to_owned()));
            }
        }

        let renames: Vec<(&str, String)> = self
            .names
            .iter()
            .zip(names.iter())
            .filter(|(old, new)| old != new)
            .map(|(old, new)| (old, new.to_owned()))
            .collect();
        if !renames.is_empty() {
            self.fields.rekey_many(&renames)?;
        }
        self.names = names;
        Ok(())
    }
}
