// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical descriptors.
//!
//! Built-in descriptors are created once per process and handed out as
//! shared handles. User-defined types are registered at runtime under type
//! numbers from [`USER_TYPE_BASE`] upward.

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::config::USER_TYPE_BASE;
use crate::descr::{DescrRef, Descriptor, TypeCode};
use crate::error::{DescrError, Result};

struct TypeRegistry {
    builtins: Vec<DescrRef>,
    user: DashMap<u16, DescrRef>,
    next_user: AtomicU16,
}

impl TypeRegistry {
    fn new() -> Self {
        Self {
            builtins: TypeCode::BUILTIN
                .iter()
                .map(|&code| Arc::new(Descriptor::canonical(code)))
                .collect(),
            user: DashMap::new(),
            next_user: AtomicU16::new(USER_TYPE_BASE),
        }
    }
}

fn registry() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(TypeRegistry::new)
}

/// Shared canonical descriptor for `code`.
pub fn descr_from_type(code: TypeCode) -> Result<DescrRef> {
    let registry = registry();
    match code {
        TypeCode::User(num) => registry
            .user
            .get(&num)
            .map(|entry| entry.value().clone())
            .ok_or(DescrError::UnknownType(num)),
        builtin => registry
            .builtins
            .get(builtin.num() as usize)
            .cloned()
            .ok_or(DescrError::UnknownType(builtin.num())),
    }
}

/// Register `descr` as a new user-defined type and return its code.
///
/// The descriptor's type code is rewritten to the assigned number. User
/// types must declare a nonzero element size.
pub fn register_user_type(mut descr: Descriptor) -> Result<TypeCode> {
    if descr.elem_size() == 0 {
        return Err(DescrError::Value(
            "user-defined types must have a nonzero element size".into(),
        ));
    }

    let registry = registry();
    let num = registry
        .next_user
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
        .map_err(|_| DescrError::Value("user type numbers exhausted".into()))?;

    let code = TypeCode::User(num);
    descr.type_code = code;
    log::debug!(
        "[registry] registered {} ({} bytes, kind {:?})",
        code,
        descr.elem_size(),
        descr.kind()
    );
    registry.user.insert(num, Arc::new(descr));
    Ok(code)
}

/// Number of registered user-defined types.
pub fn user_type_count() -> usize {
    registry().user.len()
}
