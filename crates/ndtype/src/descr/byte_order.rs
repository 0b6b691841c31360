// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte order markers and byte-order change modes.

use std::fmt;
use std::str::FromStr;

use crate::error::DescrError;

/// Byte order of a descriptor's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Platform order, spelled `=`.
    Native,
    /// Explicit little endian, `<`.
    Little,
    /// Explicit big endian, `>`.
    Big,
    /// Order is meaningless (single bytes, raw records), `|`.
    NotApplicable,
}

impl ByteOrder {
    /// The platform's explicit order.
    pub const fn native_explicit() -> ByteOrder {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// The explicit order opposite to the platform's.
    pub const fn opposite() -> ByteOrder {
        if cfg!(target_endian = "little") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Everything except the opposite-of-native marker counts as native.
    pub fn is_native(self) -> bool {
        self != Self::opposite()
    }

    /// Concrete order with `Native` resolved against the platform.
    pub fn resolve(self) -> ByteOrder {
        match self {
            ByteOrder::Native => Self::native_explicit(),
            other => other,
        }
    }

    /// Order after applying `mode`; `NotApplicable` never changes.
    pub fn apply(self, mode: ByteOrderMode) -> ByteOrder {
        if self == ByteOrder::NotApplicable {
            return self;
        }
        match mode {
            ByteOrderMode::Swap => {
                if self.is_native() {
                    Self::opposite()
                } else {
                    Self::native_explicit()
                }
            }
            ByteOrderMode::Force(ByteOrder::NotApplicable) | ByteOrderMode::Keep => self,
            ByteOrderMode::Force(order) => order,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            ByteOrder::Native => '=',
            ByteOrder::Little => '<',
            ByteOrder::Big => '>',
            ByteOrder::NotApplicable => '|',
        }
    }

    pub fn from_char(c: char) -> Option<ByteOrder> {
        match c {
            '=' => Some(ByteOrder::Native),
            '<' => Some(ByteOrder::Little),
            '>' => Some(ByteOrder::Big),
            '|' => Some(ByteOrder::NotApplicable),
            _ => None,
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// How `new_byteorder` rewrites byte orders throughout a descriptor tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrderMode {
    /// Native becomes the opposite marker and vice versa.
    Swap,
    /// Every applicable order is set to the given one.
    ///
    /// `Force(NotApplicable)` behaves like `Keep`.
    Force(ByteOrder),
    /// Orders are left as they are.
    Keep,
}

impl FromStr for ByteOrderMode {
    type Err = DescrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.to_ascii_lowercase().as_str() {
            "s" | "swap" => ByteOrderMode::Swap,
            "<" | "l" | "little" => ByteOrderMode::Force(ByteOrder::Little),
            ">" | "b" | "big" => ByteOrderMode::Force(ByteOrder::Big),
            "=" | "n" | "native" => ByteOrderMode::Force(ByteOrder::Native),
            "|" | "i" | "ignore" => ByteOrderMode::Keep,
            _ => return Err(DescrError::Value(format!("{:?} is an unrecognized byteorder", s))),
        };
        Ok(mode)
    }
}
