// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor flag bits.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::sync::atomic::{AtomicU32, Ordering};

/// Flag bitset carried by every descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DescrFlags(u32);

impl DescrFlags {
    pub const EMPTY: DescrFlags = DescrFlags(0);
    /// Elements hold object references that must be reference counted.
    pub const ITEM_REFCOUNT: DescrFlags = DescrFlags(0x01);
    /// Elements are pickled as a list.
    pub const LIST_PICKLE: DescrFlags = DescrFlags(0x02);
    /// Elements are pointers.
    pub const ITEM_IS_POINTER: DescrFlags = DescrFlags(0x04);
    /// Memory must be initialized before use.
    pub const NEEDS_INIT: DescrFlags = DescrFlags(0x08);
    /// Element access goes through the host object API.
    pub const NEEDS_HOST_API: DescrFlags = DescrFlags(0x10);
    /// Element reads use the type's getter.
    pub const USE_GETITEM: DescrFlags = DescrFlags(0x20);
    /// Element writes use the type's setter.
    pub const USE_SETITEM: DescrFlags = DescrFlags(0x40);

    /// Everything an object-containing element type implies.
    pub const OBJECT_DTYPE_FLAGS: DescrFlags = DescrFlags(
        Self::LIST_PICKLE.0
            | Self::USE_GETITEM.0
            | Self::ITEM_IS_POINTER.0
            | Self::ITEM_REFCOUNT.0
            | Self::NEEDS_INIT.0
            | Self::NEEDS_HOST_API.0,
    );

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: DescrFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn has_object(self) -> bool {
        self.contains(Self::ITEM_REFCOUNT)
    }
}

impl BitOr for DescrFlags {
    type Output = DescrFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        DescrFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for DescrFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for DescrFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DescrFlags({:#04x})", self.0)
    }
}

/// Flag cell that can be raised through a shared reference.
///
/// Object-flag discovery memoizes its result on nested descriptors that may
/// be shared by many owners; raising bits is idempotent, so relaxed ordering
/// is enough.
#[derive(Default)]
pub(crate) struct FlagCell(AtomicU32);

impl FlagCell {
    pub(crate) fn new(flags: DescrFlags) -> Self {
        Self(AtomicU32::new(flags.bits()))
    }

    pub(crate) fn get(&self) -> DescrFlags {
        DescrFlags(self.0.load(Ordering::Relaxed))
    }

    pub(crate) fn set(&self, flags: DescrFlags) {
        self.0.store(flags.bits(), Ordering::Relaxed);
    }

    pub(crate) fn raise(&self, flags: DescrFlags) {
        self.0.fetch_or(flags.bits(), Ordering::Relaxed);
    }
}

impl Clone for FlagCell {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_flags() {
        let flags = DescrFlags::OBJECT_DTYPE_FLAGS;
        assert_eq!(flags.bits(), 0x3f);
        assert!(flags.has_object());
        assert!(!flags.contains(DescrFlags::USE_SETITEM));
        assert!(DescrFlags::EMPTY.is_empty());
    }

    #[test]
    fn test_flag_cell() {
        let cell = FlagCell::new(DescrFlags::EMPTY);
        cell.raise(DescrFlags::NEEDS_INIT);
        cell.raise(DescrFlags::ITEM_REFCOUNT);
        assert_eq!(
            cell.get(),
            DescrFlags::NEEDS_INIT | DescrFlags::ITEM_REFCOUNT
        );

        let copy = cell.clone();
        cell.set(DescrFlags::EMPTY);
        assert!(cell.get().is_empty());
        assert!(copy.get().has_object());
    }
}
