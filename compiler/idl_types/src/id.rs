//! Type handles.
//!
//! # Design
//!
//! - Every Type lives in the [`crate::TypePool`] arena and is referenced by
//!   a 32-bit [`TypeId`], so cyclic references between types are plain
//!   indices rather than shared ownership
//! - The nine primitives have fixed ids (0-8)
//! - Type identity is id equality

use std::fmt;

use idl_ir::PrimitiveKind;

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const VOID: Self = Self(0);
    pub const BOOLEAN: Self = Self(1);
    pub const BYTE: Self = Self(2);
    pub const CHAR: Self = Self(3);
    pub const SHORT: Self = Self(4);
    pub const INT: Self = Self(5);
    pub const LONG: Self = Self(6);
    pub const FLOAT: Self = Self(7);
    pub const DOUBLE: Self = Self(8);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 9;

    /// First index for types created during classification.
    pub const FIRST_DYNAMIC: u32 = Self::PRIMITIVE_COUNT;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The pre-interned id of a primitive kind.
    #[inline]
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        Self(kind as u32)
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "TypeId(void)"),
            1 => write!(f, "TypeId(boolean)"),
            2 => write!(f, "TypeId(byte)"),
            3 => write!(f, "TypeId(char)"),
            4 => write!(f, "TypeId(short)"),
            5 => write!(f, "TypeId(int)"),
            6 => write!(f, "TypeId(long)"),
            7 => write!(f, "TypeId(float)"),
            8 => write!(f, "TypeId(double)"),
            n => write!(f, "TypeId({n})"),
        }
    }
}
