// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by every descriptor operation.
//!
//! Failures are always reported, never masked: a nested recursive call that
//! fails aborts the traversal, and whatever partial descriptor had been built
//! is released by `Drop` before the error reaches the caller.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::descr::TypeCode;
use crate::hook::InterfaceError;

/// Descriptor construction, mutation and promotion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescrError {
    /// Storage for names or sub-array shapes could not be reserved.
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    /// A field table could not grow.
    #[error("field table allocation failed: {0}")]
    TableAlloc(#[from] indexmap::TryReserveError),

    /// A value was rejected (e.g. a temporal divisor with no integer refinement).
    #[error("{0}")]
    Value(String),

    /// A replacement names list does not match the existing one in length.
    #[error("names list length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Length of the names list currently held by the descriptor.
        expected: usize,
        /// Length of the rejected replacement.
        found: usize,
    },

    /// No canonical descriptor is registered for this type number.
    #[error("unknown type number {0}")]
    UnknownType(u16),

    /// The interface hook refused to mirror a new descriptor.
    #[error("interface wrapper failed: {0}")]
    Interface(#[from] InterfaceError),

    /// A type string could not be parsed.
    #[error("invalid type string {0:?}")]
    InvalidTypeStr(String),

    /// A renamed field would collide with another field-table key.
    #[error("duplicate field name {0:?}")]
    DuplicateName(String),

    /// A names-list slot index is out of range.
    #[error("name index {index} out of range for {len} names")]
    NameIndex {
        /// Requested slot.
        index: usize,
        /// Number of slots in the list.
        len: usize,
    },

    /// Temporal metadata was attached to a non-temporal type.
    #[error("type {0} does not carry temporal metadata")]
    NotTemporal(TypeCode),

    /// A freshly duplicated descriptor was still reachable from another owner.
    #[error("descriptor is still shared after copy-on-write duplication")]
    StillShared,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DescrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DescrError::LengthMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "names list length mismatch: expected 3, found 2"
        );

        let err = DescrError::Value("divisor (7) is not a multiple of a lower-unit".into());
        assert_eq!(
            err.to_string(),
            "divisor (7) is not a multiple of a lower-unit"
        );
    }

    #[test]
    fn test_from_try_reserve() {
        let mut v: Vec<u64> = Vec::new();
        let reserve = v.try_reserve_exact(usize::MAX);
        let err: DescrError = reserve.map_err(DescrError::from).unwrap_err();
        assert!(matches!(err, DescrError::Alloc(_)));
    }
}
