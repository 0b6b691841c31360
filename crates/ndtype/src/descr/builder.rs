// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder for structured descriptors.

use std::sync::Arc;

use crate::config::UNICODE_CODE_UNIT;
use crate::descr::fields::{FieldTable, NamesList};
use crate::descr::{DescrFlags, DescrRef, Descriptor, Subarray, TypeCode};
use crate::error::{DescrError, Result};
use crate::scan;

#[derive(Debug)]
enum FieldSource {
    Builtin(TypeCode),
    Sized(TypeCode, usize),
    Descr(DescrRef),
}

#[derive(Debug)]
struct PendingField {
    name: String,
    title: Option<String>,
    source: FieldSource,
    shape: Vec<usize>,
    offset: Option<usize>,
}

impl PendingField {
    fn new(name: impl Into<String>, source: FieldSource) -> Self {
        Self {
            name: name.into(),
            title: None,
            source,
            shape: Vec::new(),
            offset: None,
        }
    }
}

/// Builder for structured (`Void`) descriptors.
///
/// Fields are laid out in declaration order, packed by default. With
/// [`aligned`](Self::aligned) each offset is rounded up to its field's
/// alignment and the element size to the largest alignment seen.
#[derive(Debug, Default)]
pub struct StructBuilder {
    fields: Vec<PendingField>,
    aligned: bool,
}

impl StructBuilder {
    /// Create a builder for a packed record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Align field offsets like a C struct.
    pub fn aligned(mut self, aligned: bool) -> Self {
        self.aligned = aligned;
        self
    }

    /// Add a field of a built-in type.
    pub fn field(mut self, name: impl Into<String>, code: TypeCode) -> Self {
        self.fields
            .push(PendingField::new(name, FieldSource::Builtin(code)));
        self
    }

    /// Add a field with an existing descriptor.
    pub fn field_with_descr(mut self, name: impl Into<String>, descr: DescrRef) -> Self {
        self.fields
            .push(PendingField::new(name, FieldSource::Descr(descr)));
        self
    }

    /// Add a field also reachable under `title`.
    pub fn titled_field(
        mut self,
        name: impl Into<String>,
        title: impl Into<String>,
        descr: DescrRef,
    ) -> Self {
        let mut field = PendingField::new(name, FieldSource::Descr(descr));
        field.title = Some(title.into());
        self.fields.push(field);
        self
    }

    /// Add a fixed-width byte string field of `len` bytes.
    pub fn string_field(mut self, name: impl Into<String>, len: usize) -> Self {
        self.fields
            .push(PendingField::new(name, FieldSource::Sized(TypeCode::String, len)));
        self
    }

    /// Add a unicode field of `chars` characters.
    pub fn unicode_field(mut self, name: impl Into<String>, chars: usize) -> Self {
        self.fields.push(PendingField::new(
            name,
            FieldSource::Sized(TypeCode::Unicode, chars.saturating_mul(UNICODE_CODE_UNIT)),
        ));
        self
    }

    /// Add a sub-array field of `shape` elements of `code`.
    pub fn array_field(mut self, name: impl Into<String>, code: TypeCode, shape: &[usize]) -> Self {
        let mut field = PendingField::new(name, FieldSource::Builtin(code));
        field.shape = shape.to_vec();
        self.fields.push(field);
        self
    }

    /// Add a field at an explicit byte offset.
    pub fn field_at(mut self, name: impl Into<String>, descr: DescrRef, offset: usize) -> Self {
        let mut field = PendingField::new(name, FieldSource::Descr(descr));
        field.offset = Some(offset);
        self.fields.push(field);
        self
    }

    /// Build the structured descriptor.
    pub fn build(self) -> Result<Descriptor> {
        let mut names = NamesList::alloc(self.fields.len())?;
        let mut table = FieldTable::new();
        let mut cursor = 0usize;
        let mut size = 0usize;
        let mut alignment = 1usize;

        for (index, pending) in self.fields.into_iter().enumerate() {
            let descr = resolve(pending.source, pending.shape)?;

            if table.contains_key(&pending.name) {
                return Err(DescrError::Value(format!(
                    "duplicate field name {:?}",
                    pending.name
                )));
            }
            if let Some(title) = &pending.title {
                if title == &pending.name || table.contains_key(title) {
                    return Err(DescrError::Value(format!(
                        "title {:?} collides with an existing field",
                        title
                    )));
                }
            }

            let field_align = if self.aligned {
                descr.alignment().max(1)
            } else {
                1
            };
            let offset = match pending.offset {
                Some(offset) => offset,
                None => round_up(cursor, field_align)?,
            };
            let end = offset
                .checked_add(descr.elem_size())
                .ok_or_else(|| DescrError::Value("structured element size overflows".into()))?;

            cursor = end;
            size = size.max(end);
            alignment = alignment.max(field_align);

            names.set(index, pending.name.clone())?;
            let title = pending.title.as_deref();
            table.set_field(&pending.name, descr.clone(), offset, title);
            if let Some(title) = title {
                table.set_field(title, descr, offset, Some(title));
            }
        }

        let mut record = Descriptor::new_from_type(TypeCode::Void)?;
        record.set_elem_size(if self.aligned {
            round_up(size, alignment)?
        } else {
            size
        });
        record.set_alignment(alignment);
        record.set_fields(names, table);
        if scan::find_object_flag(&record) {
            record.set_flags(DescrFlags::OBJECT_DTYPE_FLAGS);
        }

        log::trace!(
            "[builder] built {} byte record with {} fields",
            record.elem_size(),
            record.names().map_or(0, NamesList::len)
        );
        Ok(record)
    }
}

fn resolve(source: FieldSource, shape: Vec<usize>) -> Result<DescrRef> {
    let base = match source {
        FieldSource::Builtin(code) => Descriptor::from_type(code)?,
        FieldSource::Sized(code, size) => {
            let mut sized = Descriptor::new_from_type(code)?;
            sized.set_elem_size(size);
            Arc::new(sized)
        }
        FieldSource::Descr(descr) => descr,
    };
    if shape.is_empty() {
        return Ok(base);
    }

    let subarray = Subarray::new(base, shape);
    let size = subarray
        .base()
        .elem_size()
        .checked_mul(subarray.count())
        .ok_or_else(|| DescrError::Value("sub-array element size overflows".into()))?;

    let mut wrapper = Descriptor::new_from_type(TypeCode::Void)?;
    wrapper.set_elem_size(size);
    wrapper.set_alignment(subarray.base().alignment());
    wrapper.set_flags(subarray.base().flags());
    wrapper.set_subarray(Some(subarray));
    Ok(Arc::new(wrapper))
}

fn round_up(value: usize, align: usize) -> Result<usize> {
    let overflow = || DescrError::Value("structured element size overflows".into());
    let padded = value.checked_add(align - 1).ok_or_else(overflow)?;
    Ok(padded / align * align)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_layout() {
        let d = StructBuilder::new()
            .field("a", TypeCode::Byte)
            .field("b", TypeCode::Double)
            .string_field("c", 3)
            .build()
            .expect("valid struct");

        assert_eq!(d.type_code(), TypeCode::Void);
        assert_eq!(d.elem_size(), 12);
        assert_eq!(d.field("b").map(|f| f.offset), Some(1));
        assert_eq!(d.field("c").map(|f| f.descr.elem_size()), Some(3));
        let names: Vec<&str> = d.names().expect("names").iter().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_aligned_layout() {
        let d = StructBuilder::new()
            .aligned(true)
            .field("a", TypeCode::Byte)
            .field("b", TypeCode::Int)
            .field("c", TypeCode::Short)
            .build()
            .expect("valid struct");

        assert_eq!(d.field("b").map(|f| f.offset), Some(4));
        assert_eq!(d.field("c").map(|f| f.offset), Some(8));
        assert_eq!(d.elem_size(), 12);
        assert_eq!(d.alignment(), 4);
    }

    #[test]
    fn test_titles_share_descriptor() {
        let sub = Descriptor::from_type(TypeCode::Float).expect("builtin");
        let d = StructBuilder::new()
            .titled_field("x", "X coordinate", sub)
            .build()
            .expect("valid struct");

        let fields = d.fields().expect("fields");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.primary().count(), 1);
        let (primary, alias) = (d.field("x"), d.field("X coordinate"));
        let (primary, alias) = (primary.expect("field"), alias.expect("alias"));
        assert!(Arc::ptr_eq(&primary.descr, &alias.descr));
        assert!(alias.is_alias("X coordinate"));
        assert!(!primary.is_alias("x"));
    }

    #[test]
    fn test_array_field() {
        let d = StructBuilder::new()
            .array_field("m", TypeCode::Double, &[2, 3])
            .build()
            .expect("valid struct");

        let field = d.field("m").expect("field");
        let sub = field.descr.subarray().expect("subarray");
        assert_eq!(sub.shape(), &[2, 3]);
        assert_eq!(field.descr.elem_size(), 48);
        assert_eq!(d.elem_size(), 48);
    }

    #[test]
    fn test_object_flag_propagates() {
        let d = StructBuilder::new()
            .field("n", TypeCode::Int)
            .field("o", TypeCode::Object)
            .build()
            .expect("valid struct");
        assert!(d.flags().has_object());

        let plain = StructBuilder::new()
            .field("n", TypeCode::Int)
            .build()
            .expect("valid struct");
        assert!(!plain.flags().has_object());
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = StructBuilder::new()
            .field("a", TypeCode::Int)
            .field("a", TypeCode::Int)
            .build();
        assert!(matches!(err, Err(DescrError::Value(_))));

        let int = Descriptor::from_type(TypeCode::Int).expect("builtin");
        let err = StructBuilder::new()
            .field("a", TypeCode::Int)
            .titled_field("b", "a", int)
            .build();
        assert!(matches!(err, Err(DescrError::Value(_))));
    }

    #[test]
    fn test_explicit_offsets_overlap() {
        let int = Descriptor::from_type(TypeCode::Int).expect("builtin");
        let short = Descriptor::from_type(TypeCode::Short).expect("builtin");
        let d = StructBuilder::new()
            .field_at("whole", int, 0)
            .field_at("low", short, 0)
            .build()
            .expect("valid union-like record");
        assert_eq!(d.elem_size(), 4);
    }
}
