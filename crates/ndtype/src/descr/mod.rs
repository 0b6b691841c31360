// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor model: type codes, byte orders, flags, fields, sub-arrays and
//! the reference-counted [`Descriptor`] that composes them.
//!
//! # Example
//!
//! ```
//! use ndtype::descr::{StructBuilder, TypeCode};
//!
//! let point = StructBuilder::new()
//!     .field("x", TypeCode::Double)
//!     .field("y", TypeCode::Double)
//!     .build()
//!     .unwrap();
//! assert_eq!(point.elem_size(), 16);
//! assert_eq!(point.field("y").map(|f| f.offset), Some(8));
//! ```

mod builder;
mod byte_order;
mod descriptor;
mod equivalence;
pub mod fields;
mod flags;
pub mod registry;
mod subarray;
mod type_code;
mod typestr;

pub use builder::StructBuilder;
pub use byte_order::{ByteOrder, ByteOrderMode};
pub use descriptor::{DescrRef, Descriptor};
pub use equivalence::equiv_types;
pub use fields::{Field, FieldLayout, FieldTable, NamesList};
pub use flags::DescrFlags;
pub use registry::register_user_type;
pub use subarray::Subarray;
pub use type_code::{kind, TypeCode};
