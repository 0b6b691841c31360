// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ndtype Global Configuration - Single Source of Truth
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: Compile-time constants (type-number space, platform
//!   sizes, table capacities, temporal defaults)
//! - **Level 2 (Dynamic)**: `RuntimeConfig` for process-wide runtime slots
//!   (the interface hook invoked once per new descriptor)
//!
//! # Example
//!
//! ```ignore
//! use ndtype::config::*;
//!
//! // Static constants
//! let units = UNICODE_CODE_UNIT; // 4 bytes per unicode character
//!
//! // Dynamic config
//! RuntimeConfig::global().set_interface_hook(Arc::new(MyHook));
//! ```

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use crate::datetime::DateTimeUnit;
use crate::hook::InterfaceHook;

// =======================================================================
// Type-number space
// =======================================================================

/// Number of built-in type numbers (Bool .. TimeDelta).
///
/// Promotion scans never go past this bound.
pub const NTYPES: u16 = 23;

/// First type number handed out to user-defined types.
pub const USER_TYPE_BASE: u16 = 256;

// =======================================================================
// Platform element sizes
// =======================================================================

/// Size of the platform C `long` (8 on LP64, 4 on LLP64 and 32-bit targets).
pub const LONG_SIZE: usize = std::mem::size_of::<std::ffi::c_long>();

/// Size of a stored object reference.
pub const POINTER_SIZE: usize = std::mem::size_of::<usize>();

#[cfg(target_os = "windows")]
pub const LONG_DOUBLE_SIZE: usize = 8;
#[cfg(not(target_os = "windows"))]
pub const LONG_DOUBLE_SIZE: usize = 16;

#[cfg(target_os = "windows")]
pub const LONG_DOUBLE_ALIGN: usize = 8;
#[cfg(not(target_os = "windows"))]
pub const LONG_DOUBLE_ALIGN: usize = 16;

/// Bytes per unicode code unit.
///
/// A unicode descriptor of `n` characters has `elem_size == n * UNICODE_CODE_UNIT`;
/// promotion of a string to unicode scales the string side by this factor.
pub const UNICODE_CODE_UNIT: usize = 4;

// =======================================================================
// Tables and temporal defaults
// =======================================================================

/// Initial capacity of a freshly allocated field table.
pub const FIELDS_TABLE_CAPACITY: usize = 7;

/// Unit used when a temporal unit string is absent or unrecognized.
pub const DATETIME_DEFAULT_UNIT: DateTimeUnit = DateTimeUnit::Microsecond;

/// Event count carried by the canonical temporal descriptors.
pub const DATETIME_DEFAULT_EVENTS: i32 = 1;

// =======================================================================
// Runtime Configuration
// =======================================================================

/// Process-wide runtime configuration.
///
/// Cloning shares the same slots (clone = Arc counter increment).
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Hook mirroring every new descriptor into a host object system
    /// (None = descriptors carry no interface object).
    ///
    /// `ArcSwap` lets the hook be installed or cleared without a lock.
    interface_hook: Arc<ArcSwap<Option<Arc<dyn InterfaceHook>>>>,
}

impl RuntimeConfig {
    /// Create a config with no hook installed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interface_hook: Arc::new(ArcSwap::new(Arc::new(None))),
        }
    }

    /// The configuration consulted by descriptor construction.
    pub fn global() -> &'static RuntimeConfig {
        static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();
        CONFIG.get_or_init(RuntimeConfig::new)
    }

    /// Install the interface hook, replacing any previous one.
    pub fn set_interface_hook(&self, hook: Arc<dyn InterfaceHook>) {
        self.interface_hook.store(Arc::new(Some(hook)));
    }

    /// Currently installed interface hook.
    #[must_use]
    pub fn interface_hook(&self) -> Option<Arc<dyn InterfaceHook>> {
        (**self.interface_hook.load()).clone()
    }

    /// Remove the interface hook.
    pub fn clear_interface_hook(&self) {
        self.interface_hook.store(Arc::new(None));
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("interface_hook", &self.interface_hook.load().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descr::Descriptor;
    use crate::hook::{Interface, InterfaceError};

    struct NoopHook;

    impl InterfaceHook for NoopHook {
        fn wrap(
            &self,
            _base: &Descriptor,
            _new: &Descriptor,
        ) -> Result<Option<Interface>, InterfaceError> {
            Ok(None)
        }
    }

    #[test]
    fn test_platform_sizes() {
        assert!(LONG_SIZE == 4 || LONG_SIZE == 8);
        assert_eq!(POINTER_SIZE, std::mem::size_of::<*const u8>());
        assert!(LONG_DOUBLE_SIZE >= 8);
        assert_eq!(UNICODE_CODE_UNIT, 4);
    }

    #[test]
    fn test_runtime_config_hook_slot() {
        let config = RuntimeConfig::new();
        assert!(config.interface_hook().is_none());

        config.set_interface_hook(Arc::new(NoopHook));
        assert!(config.interface_hook().is_some());

        let shared = config.clone();
        shared.clear_interface_hook();
        assert!(config.interface_hook().is_none());
    }
}
