// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host interface hook.
//!
//! A host object system (a scripting-language binding, a GUI inspector, ...)
//! may keep a mirror object for every descriptor. The hook is invoked once per
//! newly duplicated descriptor with the descriptor it was copied from; its
//! returned object is owned by the new descriptor and dropped with it.
//!
//! A failing hook aborts construction: the new descriptor is torn down
//! through its normal `Drop` path and the caller receives
//! [`DescrError::Interface`](crate::DescrError::Interface).

use std::any::Any;
use std::sync::Arc;

use thiserror::Error;

use crate::descr::Descriptor;

/// Host-side mirror object owned by a descriptor.
pub type Interface = Arc<dyn Any + Send + Sync>;

/// Reason an interface hook refused a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InterfaceError {
    message: String,
}

impl InterfaceError {
    /// Create an error with a host-provided message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The host-provided message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Builds the host mirror of a new descriptor.
pub trait InterfaceHook: Send + Sync {
    /// Called once per duplicated descriptor.
    ///
    /// `base` is the descriptor being copied, `new` the fully built copy.
    /// Returning `Ok(None)` leaves the copy without a mirror.
    fn wrap(&self, base: &Descriptor, new: &Descriptor)
        -> Result<Option<Interface>, InterfaceError>;
}
