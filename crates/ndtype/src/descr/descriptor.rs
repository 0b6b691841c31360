// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The element type descriptor and its lifecycle.
//!
//! Descriptors are shared between arrays through [`DescrRef`] handles. Shared
//! descriptors are immutable by convention: every mutation goes through an
//! owned `Descriptor` (fresh from [`Descriptor::duplicate`] or
//! [`Descriptor::new_from_type`]) or through [`Descriptor::make_private`],
//! which copies on write when the handle is not unique.
//!
//! Teardown is `Drop`: names and fields first (each field record releases its
//! sub-descriptor), then the sub-array (releasing its base), then temporal
//! metadata and the interface object.

use std::fmt;
use std::sync::Arc;

use crate::config::RuntimeConfig;
use crate::datetime::DateTimeInfo;
use crate::descr::fields::{Field, FieldLayout, FieldTable, NamesList};
use crate::descr::flags::{DescrFlags, FlagCell};
use crate::descr::{registry, ByteOrder, Subarray, TypeCode};
use crate::error::{DescrError, Result};
use crate::hook::Interface;

/// Shared, reference-counted descriptor handle.
pub type DescrRef = Arc<Descriptor>;

/// Metadata describing how a fixed-size byte span is read as a typed element.
pub struct Descriptor {
    pub(crate) type_code: TypeCode,
    pub(crate) kind: char,
    pub(crate) type_char: char,
    pub(crate) byte_order: ByteOrder,
    pub(crate) elem_size: usize,
    pub(crate) alignment: usize,
    pub(crate) flags: FlagCell,
    // Field order is teardown order.
    pub(crate) layout: Option<FieldLayout>,
    pub(crate) subarray: Option<Subarray>,
    pub(crate) datetime: Option<DateTimeInfo>,
    pub(crate) interface: Option<Interface>,
}

impl Descriptor {
    /// Canonical attributes of a built-in code.
    pub(crate) fn canonical(code: TypeCode) -> Self {
        let byte_order = match code {
            TypeCode::Bool
            | TypeCode::Byte
            | TypeCode::UByte
            | TypeCode::Object
            | TypeCode::String
            | TypeCode::Void
            | TypeCode::User(_) => ByteOrder::NotApplicable,
            _ => ByteOrder::Native,
        };
        let flags = if code.is_object() {
            DescrFlags::OBJECT_DTYPE_FLAGS
        } else {
            DescrFlags::EMPTY
        };
        let datetime = code.is_temporal().then(DateTimeInfo::default);

        Self {
            type_code: code,
            kind: code.kind(),
            type_char: code.type_char(),
            byte_order,
            elem_size: code.default_size(),
            alignment: code.default_alignment(),
            flags: FlagCell::new(flags),
            layout: None,
            subarray: None,
            datetime,
            interface: None,
        }
    }

    /// Shared canonical descriptor for `code`.
    pub fn from_type(code: TypeCode) -> Result<DescrRef> {
        registry::descr_from_type(code)
    }

    /// Private, mutable copy of the canonical descriptor for `code`.
    pub fn new_from_type(code: TypeCode) -> Result<Descriptor> {
        let canonical = Self::from_type(code)?;
        canonical.duplicate()
    }

    /// Independent copy of `self`.
    ///
    /// Names and fields are deep-copied (sub-descriptors retained), the
    /// sub-array duplicated (base retained, shape copied) and temporal
    /// metadata copied by value. The installed interface hook, if any, then
    /// mirrors the copy; a hook failure drops the copy and fails.
    pub fn duplicate(&self) -> Result<Descriptor> {
        self.duplicate_with(RuntimeConfig::global())
    }

    pub(crate) fn duplicate_with(&self, config: &RuntimeConfig) -> Result<Descriptor> {
        let layout = self.layout.as_ref().map(FieldLayout::try_copy).transpose()?;
        let subarray = self.subarray.as_ref().map(Subarray::try_copy).transpose()?;

        let mut new = Descriptor {
            type_code: self.type_code,
            kind: self.kind,
            type_char: self.type_char,
            byte_order: self.byte_order,
            elem_size: self.elem_size,
            alignment: self.alignment,
            flags: self.flags.clone(),
            layout,
            subarray,
            datetime: self.datetime,
            interface: None,
        };

        if let Some(hook) = config.interface_hook() {
            match hook.wrap(self, &new) {
                Ok(interface) => new.interface = interface,
                Err(err) => {
                    log::warn!(
                        "[descr] interface hook rejected {} descriptor: {}",
                        self.type_code,
                        err
                    );
                    return Err(err.into());
                }
            }
        }
        Ok(new)
    }

    /// Wrap into a shared handle.
    pub fn into_ref(self) -> DescrRef {
        Arc::new(self)
    }

    /// Copy-on-write access: duplicates the descriptor behind `this` unless
    /// the handle is its only owner.
    pub fn make_private(this: &mut DescrRef) -> Result<&mut Descriptor> {
        if Arc::get_mut(this).is_none() {
            let private = this.duplicate()?;
            *this = Arc::new(private);
        }
        Arc::get_mut(this).ok_or(DescrError::StillShared)
    }

    // ===================================================================
    // Scalar attributes
    // ===================================================================

    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    pub fn kind(&self) -> char {
        self.kind
    }

    pub fn type_char(&self) -> char {
        self.type_char
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn elem_size(&self) -> usize {
        self.elem_size
    }

    pub fn alignment(&self) -> usize {
        self.alignment
    }

    pub fn flags(&self) -> DescrFlags {
        self.flags.get()
    }

    pub fn is_object_kind(&self) -> bool {
        self.kind == crate::descr::kind::OBJECT
    }

    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.byte_order = order;
    }

    pub fn set_elem_size(&mut self, size: usize) {
        self.elem_size = size;
    }

    pub fn set_alignment(&mut self, alignment: usize) {
        self.alignment = alignment;
    }

    pub fn set_flags(&mut self, flags: DescrFlags) {
        self.flags.set(flags);
    }

    /// Raise flag bits on a possibly shared descriptor.
    pub(crate) fn raise_flags(&self, flags: DescrFlags) {
        self.flags.raise(flags);
    }

    // ===================================================================
    // Sub-array and temporal metadata
    // ===================================================================

    pub fn subarray(&self) -> Option<&Subarray> {
        self.subarray.as_ref()
    }

    pub fn set_subarray(&mut self, subarray: Option<Subarray>) -> Option<Subarray> {
        std::mem::replace(&mut self.subarray, subarray)
    }

    pub fn datetime_info(&self) -> Option<&DateTimeInfo> {
        self.datetime.as_ref()
    }

    pub fn set_datetime_info(&mut self, info: DateTimeInfo) -> Result<()> {
        if !self.type_code.is_temporal() {
            return Err(DescrError::NotTemporal(self.type_code));
        }
        self.datetime = Some(info);
        Ok(())
    }

    /// Host mirror object created by the interface hook.
    pub fn interface(&self) -> Option<&Interface> {
        self.interface.as_ref()
    }

    // ===================================================================
    // Names and fields
    // ===================================================================

    pub fn has_fields(&self) -> bool {
        self.layout.is_some()
    }

    pub fn layout(&self) -> Option<&FieldLayout> {
        self.layout.as_ref()
    }

    pub fn names(&self) -> Option<&NamesList> {
        self.layout.as_ref().map(FieldLayout::names)
    }

    pub fn fields(&self) -> Option<&FieldTable> {
        self.layout.as_ref().map(FieldLayout::fields)
    }

    pub fn fields_mut(&mut self) -> Option<&mut FieldTable> {
        self.layout.as_mut().map(|layout| &mut layout.fields)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields()?.get(name)
    }

    /// Install names and fields together, returning the previous pair.
    pub fn set_fields(&mut self, names: NamesList, fields: FieldTable) -> Option<FieldLayout> {
        self.layout.replace(FieldLayout::new(names, fields))
    }

    /// Release names and fields (sub-descriptor references included).
    pub fn dealloc_names_and_fields(&mut self) {
        self.layout = None;
    }

    /// Replace the names list, re-keying each field to its new name.
    ///
    /// `names` must have exactly the current length and must not rename a
    /// field onto another field-table key (title aliases included);
    /// otherwise the descriptor is left untouched and an error returned.
    pub fn replace_names(&mut self, names: NamesList) -> Result<()> {
        match self.layout.as_mut() {
            Some(layout) => layout.replace_names(names),
            None if names.is_empty() => Ok(()),
            None => Err(DescrError::LengthMismatch {
                expected: 0,
                found: names.len(),
            }),
        }
    }

    /// Replace the names list without touching the fields.
    ///
    /// The caller keeps names and fields consistent; a descriptor without
    /// fields receives an empty field table alongside the names.
    pub fn set_names(&mut self, names: NamesList) {
        match self.layout.as_mut() {
            Some(layout) => layout.names = names,
            None => self.layout = Some(FieldLayout::new(names, FieldTable::new())),
        }
    }
}

impl Drop for Descriptor {
    fn drop(&mut self) {
        log::trace!(
            "[descr] releasing {} descriptor ({} bytes)",
            self.type_code,
            self.elem_size
        );
    }
}

/// Structural equality; the interface object is ignored.
impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_code == other.type_code
            && self.kind == other.kind
            && self.type_char == other.type_char
            && self.byte_order == other.byte_order
            && self.elem_size == other.elem_size
            && self.alignment == other.alignment
            && self.flags() == other.flags()
            && self.layout == other.layout
            && self.subarray == other.subarray
            && self.datetime == other.datetime
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Descriptor");
        s.field("type_code", &self.type_code)
            .field("byte_order", &self.byte_order)
            .field("elem_size", &self.elem_size)
            .field("alignment", &self.alignment)
            .field("flags", &self.flags());
        if let Some(layout) = &self.layout {
            s.field("names", layout.names());
        }
        if let Some(subarray) = &self.subarray {
            s.field("subarray", subarray);
        }
        if let Some(info) = &self.datetime {
            s.field("datetime", info);
        }
        s.finish_non_exhaustive()
    }
}
