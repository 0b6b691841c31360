// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte-order transform over whole descriptor trees.

use std::sync::Arc;

use crate::descr::{ByteOrderMode, DescrRef, Descriptor};
use crate::error::Result;

impl Descriptor {
    /// Fresh descriptor tree with every byte order rewritten by `mode`.
    ///
    /// Nested field descriptors and the sub-array base are transformed
    /// recursively; title aliases are not visited but are re-pointed to
    /// their field's new descriptor. `self` is left untouched. The first
    /// nested failure aborts the transform and drops the partial copy.
    pub fn new_byteorder(&self, mode: ByteOrderMode) -> Result<Descriptor> {
        let mut new = self.duplicate()?;
        new.set_byte_order(self.byte_order().apply(mode));

        if let Some(fields) = new.fields_mut() {
            let mut titled: Vec<(String, DescrRef)> = Vec::new();
            for (key, field) in fields.iter_mut() {
                if field.is_alias(key) {
                    continue;
                }
                let swapped = field.descr.new_byteorder(mode)?;
                field.descr = Arc::new(swapped);
                if let Some(title) = &field.title {
                    titled.push((title.clone(), field.descr.clone()));
                }
            }

            for (key, field) in fields.iter_mut() {
                if !field.is_alias(key) {
                    continue;
                }
                if let Some((_, descr)) = titled.iter().find(|(title, _)| title == key) {
                    field.descr = descr.clone();
                }
            }
        }

        if let Some(subarray) = new.subarray.as_mut() {
            let base = subarray.base().new_byteorder(mode)?;
            subarray.replace_base(Arc::new(base));
        }

        log::trace!(
            "[byteorder] {:?}: {} -> {}",
            mode,
            self.byte_order(),
            new.byte_order()
        );
        Ok(new)
    }
}
