// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-shape sub-array elements.

use crate::descr::DescrRef;
use crate::error::Result;

/// An element that is itself a fixed-shape array of `base` elements.
#[derive(Debug, PartialEq)]
pub struct Subarray {
    base: DescrRef,
    /// `None` for a scalar shape; never `Some(empty)`.
    shape: Option<Vec<usize>>,
}

impl Subarray {
    /// An empty `shape` is stored as scalar-shaped.
    pub fn new(base: DescrRef, shape: Vec<usize>) -> Self {
        Self {
            base,
            shape: if shape.is_empty() { None } else { Some(shape) },
        }
    }

    pub fn base(&self) -> &DescrRef {
        &self.base
    }

    /// Swap in a new base, handing back the previous one.
    pub(crate) fn replace_base(&mut self, base: DescrRef) -> DescrRef {
        std::mem::replace(&mut self.base, base)
    }

    pub fn shape(&self) -> &[usize] {
        self.shape.as_deref().unwrap_or(&[])
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Number of base elements per sub-array element.
    pub fn count(&self) -> usize {
        self.shape().iter().product()
    }

    /// Duplicate: the base is retained, the shape copied.
    pub fn try_copy(&self) -> Result<Self> {
        let shape = match &self.shape {
            Some(dims) => {
                let mut copy = Vec::new();
                copy.try_reserve_exact(dims.len())?;
                copy.extend_from_slice(dims);
                Some(copy)
            }
            None => None,
        };
        Ok(Self {
            base: self.base.clone(),
            shape,
        })
    }
}
