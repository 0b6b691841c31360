// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array-interface type strings.
//!
//! Grammar: `[<byteorder>]<kind><size>[\[<temporal metadata>\]]`, e.g. `<i4`,
//! `|S5`, `>U3` (unicode sizes count characters), `<M8[ms]`. Structured and
//! user-defined descriptors render as raw `|V<size>` records.

use std::fmt;
use std::str::FromStr;

use crate::config::{LONG_DOUBLE_SIZE, LONG_SIZE, POINTER_SIZE, UNICODE_CODE_UNIT};
use crate::datetime::DateTimeInfo;
use crate::descr::{kind, ByteOrder, Descriptor, TypeCode};
use crate::error::{DescrError, Result};

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.type_code();
        let order = self.byte_order().resolve();

        let (kind, size) = match code {
            TypeCode::Unicode => (kind::UNICODE, self.elem_size() / UNICODE_CODE_UNIT),
            TypeCode::User(_) => (kind::VOID, self.elem_size()),
            _ if self.has_fields() => (kind::VOID, self.elem_size()),
            _ => (self.kind(), self.elem_size()),
        };
        write!(f, "{}{}{}", order, kind, size)?;

        if let Some(info) = self.datetime_info() {
            write!(f, "[{}]", info)?;
        }
        Ok(())
    }
}

/// Code for a numeric kind tag and element size.
///
/// Integer codes sharing a size resolve to `Long`/`ULong`, so `LongLong` on
/// LP64 (`Int` on LLP64) does not survive a render-and-parse round trip.
fn numeric_code(kind_char: char, size: usize) -> Option<TypeCode> {
    use TypeCode::*;
    let code = match (kind_char, size) {
        (kind::BOOL, 1) => Bool,
        (kind::SIGNED, 1) => Byte,
        (kind::SIGNED, 2) => Short,
        (kind::SIGNED, 4) if LONG_SIZE == 4 => Long,
        (kind::SIGNED, 4) => Int,
        (kind::SIGNED, 8) if LONG_SIZE == 8 => Long,
        (kind::SIGNED, 8) => LongLong,
        (kind::UNSIGNED, 1) => UByte,
        (kind::UNSIGNED, 2) => UShort,
        (kind::UNSIGNED, 4) if LONG_SIZE == 4 => ULong,
        (kind::UNSIGNED, 4) => UInt,
        (kind::UNSIGNED, 8) if LONG_SIZE == 8 => ULong,
        (kind::UNSIGNED, 8) => ULongLong,
        (kind::FLOAT, 4) => Float,
        (kind::FLOAT, 8) => Double,
        (kind::FLOAT, n) if n == LONG_DOUBLE_SIZE => LongDouble,
        (kind::COMPLEX, 8) => CFloat,
        (kind::COMPLEX, 16) => CDouble,
        (kind::COMPLEX, n) if n == 2 * LONG_DOUBLE_SIZE => CLongDouble,
        (kind::OBJECT, n) if n == POINTER_SIZE => Object,
        (kind::DATETIME, 8) => DateTime,
        (kind::TIMEDELTA, 8) => TimeDelta,
        _ => return None,
    };
    Some(code)
}

impl Descriptor {
    /// Parse an array-interface type string into a fresh descriptor.
    ///
    /// A missing byte order means native. Single-byte and object types keep
    /// the not-applicable marker whatever order is given.
    pub fn from_typestr(s: &str) -> Result<Descriptor> {
        let invalid = || DescrError::InvalidTypeStr(s.to_owned());

        let mut chars = s.chars();
        let first = chars.next().ok_or_else(invalid)?;
        let (order, rest) = match ByteOrder::from_char(first) {
            Some(order) => (order, chars.as_str()),
            None => (ByteOrder::Native, s),
        };

        let mut chars = rest.chars();
        let kind_char = chars.next().ok_or_else(invalid)?;
        let rest = chars.as_str();

        let (size_text, meta) = match rest.split_once('[') {
            Some((size, meta)) => (size, Some(meta.strip_suffix(']').ok_or_else(invalid)?)),
            None => (rest, None),
        };
        if size_text.is_empty() || !size_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let size: usize = size_text.parse().map_err(|_| invalid())?;

        let (code, elem_size) = match kind_char {
            kind::STRING => (TypeCode::String, size),
            kind::UNICODE => (
                TypeCode::Unicode,
                size.checked_mul(UNICODE_CODE_UNIT).ok_or_else(invalid)?,
            ),
            kind::VOID => (TypeCode::Void, size),
            other => (numeric_code(other, size).ok_or_else(invalid)?, size),
        };

        let mut descr = Descriptor::new_from_type(code)?;
        descr.set_elem_size(elem_size);
        if descr.byte_order() != ByteOrder::NotApplicable {
            let order = if order == ByteOrder::NotApplicable {
                ByteOrder::Native
            } else {
                order
            };
            descr.set_byte_order(order);
        }

        match meta {
            Some(meta) if code.is_temporal() => {
                descr.set_datetime_info(meta.parse::<DateTimeInfo>()?)?
            }
            Some(_) => return Err(invalid()),
            None => {}
        }
        Ok(descr)
    }
}

impl FromStr for Descriptor {
    type Err = DescrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_typestr(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::DateTimeUnit;

    fn native() -> char {
        ByteOrder::native_explicit().as_char()
    }

    #[test]
    fn test_display_builtins() {
        let int = Descriptor::from_type(TypeCode::Int).expect("builtin");
        assert_eq!(int.to_string(), format!("{}i4", native()));

        let bool_ = Descriptor::from_type(TypeCode::Bool).expect("builtin");
        assert_eq!(bool_.to_string(), "|b1");

        let mut s = Descriptor::new_from_type(TypeCode::String).expect("builtin");
        s.set_elem_size(5);
        assert_eq!(s.to_string(), "|S5");

        let mut u = Descriptor::new_from_type(TypeCode::Unicode).expect("builtin");
        u.set_elem_size(12);
        assert_eq!(u.to_string(), format!("{}U3", native()));
    }

    #[test]
    fn test_display_temporal() {
        let mut dt = Descriptor::new_from_type(TypeCode::DateTime).expect("builtin");
        dt.set_byte_order(ByteOrder::Big);
        dt.set_datetime_info(DateTimeInfo::new(Some("ms"), 1, 1, 1).expect("valid"))
            .expect("temporal");
        assert_eq!(dt.to_string(), ">M8[ms]");
    }

    #[test]
    fn test_parse() {
        let d: Descriptor = ">f8".parse().expect("valid");
        assert_eq!(d.type_code(), TypeCode::Double);
        assert_eq!(d.byte_order(), ByteOrder::Big);

        let d = Descriptor::from_typestr("i2").expect("valid");
        assert_eq!(d.type_code(), TypeCode::Short);
        assert_eq!(d.byte_order(), ByteOrder::Native);

        let d = Descriptor::from_typestr("<U3").expect("valid");
        assert_eq!(d.type_code(), TypeCode::Unicode);
        assert_eq!(d.elem_size(), 12);

        let d = Descriptor::from_typestr(">u1").expect("valid");
        assert_eq!(d.type_code(), TypeCode::UByte);
        assert_eq!(d.byte_order(), ByteOrder::NotApplicable);

        let d = Descriptor::from_typestr("<m8[5s]").expect("valid");
        assert_eq!(d.type_code(), TypeCode::TimeDelta);
        let info = d.datetime_info().copied().expect("temporal");
        assert_eq!(info.base, DateTimeUnit::Second);
        assert_eq!(info.num, 5);
    }

    #[test]
    fn test_parse_rejects() {
        for bad in ["", "<", "<i", "<i3", "<q8", "<f8[ms]", "<M8[ms", "|S-1", "<i 4"] {
            assert!(
                matches!(Descriptor::from_typestr(bad), Err(DescrError::InvalidTypeStr(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(matches!(
            Descriptor::from_typestr("<M8[parsec]"),
            Err(DescrError::Value(_))
        ));
    }

    #[test]
    fn test_display_parses_back() {
        for code in [TypeCode::Byte, TypeCode::UShort, TypeCode::Float, TypeCode::CDouble] {
            let d = Descriptor::from_type(code).expect("builtin");
            let parsed = Descriptor::from_typestr(&d.to_string()).expect("valid");
            assert_eq!(parsed.type_code(), code);
            assert_eq!(parsed.elem_size(), d.elem_size());
        }
    }

    #[test]
    fn test_shared_size_integers_parse_as_long() {
        for (code, long) in [
            (TypeCode::Int, TypeCode::Long),
            (TypeCode::LongLong, TypeCode::Long),
            (TypeCode::UInt, TypeCode::ULong),
            (TypeCode::ULongLong, TypeCode::ULong),
        ] {
            let d = Descriptor::from_type(code).expect("builtin");
            let parsed = Descriptor::from_typestr(&d.to_string()).expect("valid");
            assert_eq!(parsed.kind(), d.kind());
            assert_eq!(parsed.elem_size(), d.elem_size());
            let expected = if d.elem_size() == LONG_SIZE { long } else { code };
            assert_eq!(parsed.type_code(), expected);
        }
    }
}
