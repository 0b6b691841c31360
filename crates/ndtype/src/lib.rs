// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # ndtype - Array element type descriptors
//!
//! Reference-counted metadata describing how the raw bytes of an array
//! buffer are read as typed elements: scalar kind, element size, byte order,
//! named sub-fields with their own descriptors and offsets, fixed-shape
//! sub-arrays, and temporal units.
//!
//! ## Quick Start
//!
//! ```rust
//! use ndtype::{small_type, ByteOrderMode, Descriptor, Result, TypeCode};
//!
//! fn main() -> Result<()> {
//!     let int = Descriptor::from_type(TypeCode::Int)?;
//!     let float = Descriptor::from_type(TypeCode::Float)?;
//!
//!     // Smallest type holding both without loss
//!     let common = small_type(&int, &float)?;
//!     assert_eq!(common.type_code(), TypeCode::Double);
//!
//!     // Byte-swapped private copy; the shared original is untouched
//!     let swapped = common.new_byteorder(ByteOrderMode::Swap)?;
//!     assert!(!ndtype::is_native(&swapped));
//!     Ok(())
//! }
//! ```
//!
//! ## Ownership
//!
//! Descriptors are shared as [`DescrRef`] (`Arc<Descriptor>`). Shared
//! descriptors are never mutated in place: operations that change a
//! descriptor either build a new one ([`Descriptor::duplicate`],
//! [`Descriptor::new_byteorder`]) or copy on write
//! ([`Descriptor::make_private`]).
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Descriptor`] | Element type metadata, shared through [`DescrRef`] |
//! | [`TypeCode`] | Built-in and user-defined scalar codes |
//! | [`FieldTable`] / [`NamesList`] | Named fields of structured types |
//! | [`Subarray`] | Fixed-shape array-valued elements |
//! | [`DateTimeInfo`] | Temporal unit and scale |
//! | [`StructBuilder`] | Fluent construction of structured types |
//!
//! ## Modules Overview
//!
//! - [`descr`] - Descriptor model and lifecycle (start here)
//! - [`promote`] - Type promotion
//! - [`scan`] - Nativity and object-reference scanners
//! - [`datetime`] - Temporal unit metadata
//! - [`config`] - Constants and runtime configuration
//! - [`hook`] - Host interface hook

mod byteorder;
pub mod config;
pub mod datetime;
pub mod descr;
pub mod error;
pub mod hook;
pub mod promote;
pub mod scan;

pub use config::RuntimeConfig;
pub use datetime::{DateTimeInfo, DateTimeUnit};
pub use descr::{
    equiv_types, register_user_type, ByteOrder, ByteOrderMode, DescrFlags, DescrRef, Descriptor,
    Field, FieldLayout, FieldTable, NamesList, StructBuilder, Subarray, TypeCode,
};
pub use error::{DescrError, Result};
pub use hook::{Interface, InterfaceError, InterfaceHook};
pub use promote::{descr_from_array, small_type, ArrayLike};
pub use scan::{find_object_flag, is_native};
