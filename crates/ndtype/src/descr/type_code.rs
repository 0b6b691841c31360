// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar type codes.
//!
//! The built-in codes form an ordered space (`Bool` .. `TimeDelta`, numbered
//! `0 .. NTYPES`); promotion walks it upward looking for a common safe target.
//! User-defined types are numbered from [`USER_TYPE_BASE`] and sit outside the
//! scanned range.

use std::fmt;

use crate::config::{
    LONG_DOUBLE_ALIGN, LONG_DOUBLE_SIZE, LONG_SIZE, NTYPES, POINTER_SIZE, USER_TYPE_BASE,
};

/// Element type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    Bool,
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Float,
    Double,
    LongDouble,
    CFloat,
    CDouble,
    CLongDouble,
    /// Reference to a host object.
    Object,
    /// Fixed-width byte string.
    String,
    /// Fixed-width UCS4 string.
    Unicode,
    /// Raw bytes, structured records and sub-arrays.
    Void,
    DateTime,
    TimeDelta,
    /// User-registered type; carries its full type number (>= 256).
    User(u16),
}

/// One-character category tag cached on every descriptor.
pub mod kind {
    pub const BOOL: char = 'b';
    pub const SIGNED: char = 'i';
    pub const UNSIGNED: char = 'u';
    pub const FLOAT: char = 'f';
    pub const COMPLEX: char = 'c';
    pub const OBJECT: char = 'O';
    pub const STRING: char = 'S';
    pub const UNICODE: char = 'U';
    pub const VOID: char = 'V';
    pub const DATETIME: char = 'M';
    pub const TIMEDELTA: char = 'm';
}

impl TypeCode {
    /// Built-in codes in type-number order.
    pub const BUILTIN: [TypeCode; NTYPES as usize] = [
        TypeCode::Bool,
        TypeCode::Byte,
        TypeCode::UByte,
        TypeCode::Short,
        TypeCode::UShort,
        TypeCode::Int,
        TypeCode::UInt,
        TypeCode::Long,
        TypeCode::ULong,
        TypeCode::LongLong,
        TypeCode::ULongLong,
        TypeCode::Float,
        TypeCode::Double,
        TypeCode::LongDouble,
        TypeCode::CFloat,
        TypeCode::CDouble,
        TypeCode::CLongDouble,
        TypeCode::Object,
        TypeCode::String,
        TypeCode::Unicode,
        TypeCode::Void,
        TypeCode::DateTime,
        TypeCode::TimeDelta,
    ];

    /// Type number (position in the ordered code space).
    pub fn num(self) -> u16 {
        match self {
            TypeCode::User(num) => num,
            builtin => Self::BUILTIN
                .iter()
                .position(|c| *c == builtin)
                .map_or(NTYPES, |pos| pos as u16),
        }
    }

    /// Code for a type number; `None` for unassigned numbers.
    pub fn from_num(num: u16) -> Option<TypeCode> {
        if num < NTYPES {
            Some(Self::BUILTIN[num as usize])
        } else if num >= USER_TYPE_BASE {
            Some(TypeCode::User(num))
        } else {
            None
        }
    }

    /// Next built-in code in promotion order.
    pub fn next_builtin(self) -> Option<TypeCode> {
        let num = self.num();
        if num + 1 < NTYPES {
            Some(Self::BUILTIN[num as usize + 1])
        } else {
            None
        }
    }

    pub fn is_builtin(self) -> bool {
        !matches!(self, TypeCode::User(_))
    }

    /// Category tag of the canonical descriptor.
    pub fn kind(self) -> char {
        use TypeCode::*;
        match self {
            Bool => kind::BOOL,
            Byte | Short | Int | Long | LongLong => kind::SIGNED,
            UByte | UShort | UInt | ULong | ULongLong => kind::UNSIGNED,
            Float | Double | LongDouble => kind::FLOAT,
            CFloat | CDouble | CLongDouble => kind::COMPLEX,
            Object => kind::OBJECT,
            String => kind::STRING,
            Unicode => kind::UNICODE,
            Void | User(_) => kind::VOID,
            DateTime => kind::DATETIME,
            TimeDelta => kind::TIMEDELTA,
        }
    }

    /// Single-character type code of the canonical descriptor.
    pub fn type_char(self) -> char {
        use TypeCode::*;
        match self {
            Bool => '?',
            Byte => 'b',
            UByte => 'B',
            Short => 'h',
            UShort => 'H',
            Int => 'i',
            UInt => 'I',
            Long => 'l',
            ULong => 'L',
            LongLong => 'q',
            ULongLong => 'Q',
            Float => 'f',
            Double => 'd',
            LongDouble => 'g',
            CFloat => 'F',
            CDouble => 'D',
            CLongDouble => 'G',
            Object => 'O',
            String => 'S',
            Unicode => 'U',
            Void | User(_) => 'V',
            DateTime => 'M',
            TimeDelta => 'm',
        }
    }

    /// Default element size in bytes (0 for the extended kinds).
    pub fn default_size(self) -> usize {
        use TypeCode::*;
        match self {
            Bool | Byte | UByte => 1,
            Short | UShort => 2,
            Int | UInt | Float => 4,
            Long | ULong => LONG_SIZE,
            LongLong | ULongLong | Double | CFloat | DateTime | TimeDelta => 8,
            LongDouble => LONG_DOUBLE_SIZE,
            CDouble => 16,
            CLongDouble => 2 * LONG_DOUBLE_SIZE,
            Object => POINTER_SIZE,
            String | Unicode | Void | User(_) => 0,
        }
    }

    /// Default alignment in bytes.
    pub fn default_alignment(self) -> usize {
        use TypeCode::*;
        match self {
            Bool | Byte | UByte | String | Void | User(_) => 1,
            Short | UShort => 2,
            Int | UInt | Float | CFloat | Unicode => 4,
            Long | ULong => LONG_SIZE,
            LongLong | ULongLong | Double | CDouble | DateTime | TimeDelta => 8,
            LongDouble | CLongDouble => LONG_DOUBLE_ALIGN,
            Object => POINTER_SIZE,
        }
    }

    pub fn is_bool(self) -> bool {
        self == TypeCode::Bool
    }

    pub fn is_signed(self) -> bool {
        self.kind() == kind::SIGNED
    }

    pub fn is_unsigned(self) -> bool {
        self.kind() == kind::UNSIGNED
    }

    pub fn is_integer(self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub fn is_float(self) -> bool {
        self.kind() == kind::FLOAT
    }

    pub fn is_complex(self) -> bool {
        self.kind() == kind::COMPLEX
    }

    /// String or unicode.
    pub fn is_string(self) -> bool {
        matches!(self, TypeCode::String | TypeCode::Unicode)
    }

    pub fn is_object(self) -> bool {
        self == TypeCode::Object
    }

    /// Kinds whose element size is chosen per descriptor.
    pub fn is_extended(self) -> bool {
        matches!(self, TypeCode::String | TypeCode::Unicode | TypeCode::Void)
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, TypeCode::DateTime | TypeCode::TimeDelta)
    }

    /// Whether every value of `self` is representable, without loss, as `to`.
    ///
    /// Sizes are the canonical defaults of each code.
    pub fn can_cast_safely(self, to: TypeCode) -> bool {
        use TypeCode::*;

        if self == to || self == Bool {
            return true;
        }
        if to == Bool || self.is_temporal() || to.is_temporal() {
            return false;
        }
        if matches!(to, Object | Void) {
            return true;
        }
        if matches!(self, Object | Void) || !self.is_builtin() || !to.is_builtin() {
            return false;
        }

        let from_size = self.default_size();
        let to_size = to.default_size();
        let later = to.num() > self.num();

        // Floats of 8+ bytes hold any integer of the same width; narrower
        // floats need strictly more room.
        let float_holds = |size: usize| {
            if from_size < 8 {
                size > from_size
            } else {
                size >= from_size
            }
        };

        if self.is_signed() {
            if to.is_integer() {
                to.is_signed() && to_size >= from_size
            } else if to.is_float() {
                float_holds(to_size)
            } else if to.is_complex() {
                float_holds(to_size >> 1)
            } else {
                later
            }
        } else if self.is_unsigned() {
            if to.is_integer() {
                if to.is_signed() {
                    to_size > from_size
                } else {
                    to_size >= from_size
                }
            } else if to.is_float() {
                float_holds(to_size)
            } else if to.is_complex() {
                float_holds(to_size >> 1)
            } else {
                later
            }
        } else if self.is_float() {
            if to.is_complex() {
                (to_size >> 1) >= from_size
            } else {
                later
            }
        } else {
            // complex, string, unicode
            later
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TypeCode::*;
        let name = match self {
            Bool => "bool",
            Byte => "byte",
            UByte => "ubyte",
            Short => "short",
            UShort => "ushort",
            Int => "int",
            UInt => "uint",
            Long => "long",
            ULong => "ulong",
            LongLong => "longlong",
            ULongLong => "ulonglong",
            Float => "float",
            Double => "double",
            LongDouble => "longdouble",
            CFloat => "cfloat",
            CDouble => "cdouble",
            CLongDouble => "clongdouble",
            Object => "object",
            String => "string",
            Unicode => "unicode",
            Void => "void",
            DateTime => "datetime",
            TimeDelta => "timedelta",
            User(num) => return write!(f, "user{}", num),
        };
        f.write_str(name)
    }
}
