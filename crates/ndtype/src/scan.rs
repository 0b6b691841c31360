// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive predicates over descriptor trees.
//!
//! Both scanners visit every non-alias field and the sub-array base once.

use crate::descr::{DescrFlags, Descriptor, TypeCode};

/// Whether every element byte order in the tree is native.
///
/// A descriptor without fields is native when its own order is; a
/// structured descriptor when all of its fields are.
pub fn is_native(descr: &Descriptor) -> bool {
    let own = match descr.fields() {
        None => descr.byte_order().is_native(),
        Some(fields) => fields.primary().all(|(_, field)| is_native(&field.descr)),
    };
    own && descr.subarray().map_or(true, |sub| is_native(sub.base()))
}

/// Whether the tree holds object references anywhere.
///
/// Nested descriptors found to hold objects get the object flags raised on
/// them, so later scans stop at that level. The raise is visible to every
/// owner of a shared nested descriptor.
pub fn find_object_flag(descr: &Descriptor) -> bool {
    if descr.flags().has_object()
        || descr.type_code() == TypeCode::Object
        || descr.is_object_kind()
    {
        return true;
    }

    if let Some(fields) = descr.fields() {
        for (_, field) in fields.primary() {
            if find_object_flag(&field.descr) {
                field.descr.raise_flags(DescrFlags::OBJECT_DTYPE_FLAGS);
                return true;
            }
        }
    }

    match descr.subarray() {
        Some(sub) if find_object_flag(sub.base()) => {
            sub.base().raise_flags(DescrFlags::OBJECT_DTYPE_FLAGS);
            true
        }
        _ => false,
    }
}
