// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type promotion.
//!
//! [`small_type`] picks the smallest descriptor able to hold values of two
//! inputs by walking the ordered built-in code space upward from the larger
//! of the two codes. Extended results (string, unicode, void) are widened to
//! cover both inputs' element sizes, on a private copy.

use crate::config::{NTYPES, UNICODE_CODE_UNIT};
use crate::descr::{equiv_types, DescrRef, Descriptor, TypeCode};
use crate::error::Result;

/// Anything that carries an element descriptor.
pub trait ArrayLike {
    fn descr(&self) -> &DescrRef;
}

impl ArrayLike for DescrRef {
    fn descr(&self) -> &DescrRef {
        self
    }
}

/// First code from `seed` upward that both inputs cast to safely; `seed`
/// itself when the built-in space is exhausted.
fn common_code(seed: TypeCode, a: TypeCode, b: TypeCode) -> TypeCode {
    (seed.num()..NTYPES)
        .filter_map(TypeCode::from_num)
        .find(|&code| a.can_cast_safely(code) && b.can_cast_safely(code))
        .unwrap_or(seed)
}

/// Smallest common descriptor of `chk` and `min`.
///
/// Equivalent inputs return `min` itself. Object absorbs string and unicode
/// whichever side it is on.
pub fn small_type(chk: &DescrRef, min: &DescrRef) -> Result<DescrRef> {
    if equiv_types(chk, min) {
        return Ok(min.clone());
    }

    let (chk_code, min_code) = (chk.type_code(), min.type_code());
    if (chk_code.is_object() && min_code.is_string())
        || (min_code.is_object() && chk_code.is_string())
    {
        return Descriptor::from_type(TypeCode::Object);
    }

    let seed = if chk_code.num() > min_code.num() {
        chk_code
    } else {
        min_code
    };
    let out_code = common_code(seed, chk_code, min_code);
    let mut out = Descriptor::from_type(out_code)?;

    if out_code.is_extended() {
        let (chk_size, min_size) = (chk.elem_size(), min.elem_size());
        let size = if out_code == TypeCode::Unicode && min_code == TypeCode::String {
            chk_size.max(min_size.saturating_mul(UNICODE_CODE_UNIT))
        } else if chk_code == TypeCode::String && min_code == TypeCode::Unicode {
            chk_size.saturating_mul(UNICODE_CODE_UNIT).max(min_size)
        } else {
            chk_size.max(min_size)
        };

        if size != out.elem_size() {
            let private = Descriptor::make_private(&mut out)?;
            private.set_elem_size(size);
            private.dealloc_names_and_fields();
        }
    }

    log::trace!(
        "[promote] {}({}) + {}({}) -> {}({})",
        chk_code,
        chk.elem_size(),
        min_code,
        min.elem_size(),
        out.type_code(),
        out.elem_size()
    );
    Ok(out)
}

/// Descriptor for values of `array` combined with an optional minimum type.
///
/// Ordinary promotion never lands on a raw record type: a `Void` result is
/// replaced by `Object` unless `min_type` was itself `Void`.
pub fn descr_from_array<A>(array: &A, min_type: Option<&DescrRef>) -> Result<DescrRef>
where
    A: ArrayLike + ?Sized,
{
    let chk = array.descr();
    let Some(min_type) = min_type else {
        return Ok(chk.clone());
    };

    let out = small_type(chk, min_type)?;
    if out.type_code() == TypeCode::Void && min_type.type_code() != TypeCode::Void {
        return Descriptor::from_type(TypeCode::Object);
    }
    Ok(out)
}
