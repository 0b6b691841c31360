// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural type equivalence.

use std::sync::Arc;

use crate::descr::Descriptor;
use crate::scan;

/// Whether `a` and `b` describe the same element layout.
///
/// Byte orders compare by nativity, so `=` and the platform's explicit
/// order are equivalent. Field titles and offsets must match, and nested
/// descriptors are compared recursively.
pub fn equiv_types(a: &Descriptor, b: &Descriptor) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    if a.type_code() != b.type_code()
        || a.elem_size() != b.elem_size()
        || scan::is_native(a) != scan::is_native(b)
    {
        return false;
    }

    let fields_match = match (a.layout(), b.layout()) {
        (None, None) => true,
        (Some(la), Some(lb)) => {
            la.names() == lb.names()
                && la.names().iter().all(|name| {
                    match (la.fields().get(name), lb.fields().get(name)) {
                        (Some(fa), Some(fb)) => {
                            fa.offset == fb.offset
                                && fa.title == fb.title
                                && (Arc::ptr_eq(&fa.descr, &fb.descr)
                                    || equiv_types(&fa.descr, &fb.descr))
                        }
                        (None, None) => true,
                        _ => false,
                    }
                })
        }
        _ => false,
    };
    if !fields_match {
        return false;
    }

    let subarrays_match = match (a.subarray(), b.subarray()) {
        (None, None) => true,
        (Some(sa), Some(sb)) => sa.shape() == sb.shape() && equiv_types(sa.base(), sb.base()),
        _ => false,
    };

    subarrays_match && a.datetime_info() == b.datetime_info()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::DateTimeInfo;
    use crate::descr::{ByteOrder, StructBuilder, Subarray, TypeCode};

    #[test]
    fn test_identity_and_builtins() {
        let int = Descriptor::from_type(TypeCode::Int).expect("builtin");
        assert!(equiv_types(&int, &int));

        let copy = int.duplicate().expect("copy");
        assert!(equiv_types(&int, &copy));

        let long = Descriptor::from_type(TypeCode::LongLong).expect("builtin");
        assert!(!equiv_types(&int, &long));
    }

    #[test]
    fn test_byte_order_by_nativity() {
        let native = Descriptor::from_type(TypeCode::Double).expect("builtin");

        let mut explicit = native.duplicate().expect("copy");
        explicit.set_byte_order(ByteOrder::native_explicit());
        assert!(equiv_types(&native, &explicit));

        let mut swapped = native.duplicate().expect("copy");
        swapped.set_byte_order(ByteOrder::opposite());
        assert!(!equiv_types(&native, &swapped));
    }

    #[test]
    fn test_extended_sizes() {
        let mut s5 = Descriptor::new_from_type(TypeCode::String).expect("builtin");
        s5.set_elem_size(5);
        let mut s8 = Descriptor::new_from_type(TypeCode::String).expect("builtin");
        s8.set_elem_size(8);
        assert!(!equiv_types(&s5, &s8));
    }

    #[test]
    fn test_structured() {
        let build = |second: TypeCode| {
            StructBuilder::new()
                .field("x", TypeCode::Int)
                .field("y", second)
                .build()
                .expect("valid struct")
        };
        let a = build(TypeCode::Float);
        let b = build(TypeCode::Float);
        let c = build(TypeCode::Int);
        assert!(equiv_types(&a, &b));
        assert!(!equiv_types(&a, &c));

        let renamed = StructBuilder::new()
            .field("x", TypeCode::Int)
            .field("z", TypeCode::Float)
            .build()
            .expect("valid struct");
        assert!(!equiv_types(&a, &renamed));
    }

    #[test]
    fn test_subarray_shape() {
        let base = Descriptor::from_type(TypeCode::Short).expect("builtin");
        let make = |shape: Vec<usize>| {
            let mut d = Descriptor::new_from_type(TypeCode::Void).expect("builtin");
            d.set_elem_size(2 * shape.iter().product::<usize>());
            d.set_subarray(Some(Subarray::new(base.clone(), shape)));
            d
        };
        assert!(equiv_types(&make(vec![2, 3]), &make(vec![2, 3])));
        assert!(!equiv_types(&make(vec![2, 3]), &make(vec![3, 2])));
    }

    #[test]
    fn test_temporal_units() {
        let mut ms = Descriptor::new_from_type(TypeCode::DateTime).expect("builtin");
        ms.set_datetime_info(DateTimeInfo::new(Some("ms"), 1, 1, 1).expect("valid"))
            .expect("temporal");
        let us = Descriptor::from_type(TypeCode::DateTime).expect("builtin");
        assert!(!equiv_types(&ms, &us));
        assert!(equiv_types(&us, &us.duplicate().expect("copy")));
    }
}
