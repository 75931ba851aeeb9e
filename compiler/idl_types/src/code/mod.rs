//! Type codes.
//!
//! # Layout
//!
//! - Bits 0-23: the mapping category. Exactly one is set per type.
//! - Bits 24-31: modifiers describing the shape of the type.
//!
//! [`TypeCode::is`] tests that every bit of a mask is present, so callers
//! can ask for a category, a modifier, or both at once.

use bitflags::bitflags;
use idl_ir::PrimitiveKind;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeCode: u32 {
        // === Categories ===
        const VOID = 0x0000_0001;
        const BOOLEAN = 0x0000_0002;
        const BYTE = 0x0000_0004;
        const CHAR = 0x0000_0008;
        const SHORT = 0x0000_0010;
        const INT = 0x0000_0020;
        const LONG = 0x0000_0040;
        const FLOAT = 0x0000_0080;
        const DOUBLE = 0x0000_0100;
        const STRING = 0x0000_0200;
        const ANY = 0x0000_0400;
        const CORBA_OBJECT = 0x0000_0800;
        const REMOTE = 0x0000_1000;
        const ABSTRACT = 0x0000_2000;
        const NC_INTERFACE = 0x0000_4000;
        const VALUE = 0x0000_8000;
        const IMPLEMENTATION = 0x0001_0000;
        const NC_CLASS = 0x0002_0000;
        const ARRAY = 0x0004_0000;
        const JAVA_RMI_REMOTE = 0x0008_0000;

        // === Modifiers ===
        const PRIMITIVE = 0x0100_0000;
        const COMPOUND = 0x0200_0000;
        const CLASS = 0x0400_0000;
        const INTERFACE = 0x0800_0000;
        const SPECIAL_CLASS = 0x1000_0000;
        const SPECIAL_INTERFACE = 0x2000_0000;
        const NON_CONFORMING = 0x4000_0000;
        const INNER = 0x8000_0000;

        /// Mask of all category bits.
        const CATEGORY_MASK = 0x00FF_FFFF;
        /// Mask of all modifier bits.
        const MODIFIER_MASK = 0xFF00_0000;
    }
}

impl TypeCode {
    /// Full code of a primitive kind.
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        let category = match kind {
            PrimitiveKind::Void => Self::VOID,
            PrimitiveKind::Boolean => Self::BOOLEAN,
            PrimitiveKind::Byte => Self::BYTE,
            PrimitiveKind::Char => Self::CHAR,
            PrimitiveKind::Short => Self::SHORT,
            PrimitiveKind::Int => Self::INT,
            PrimitiveKind::Long => Self::LONG,
            PrimitiveKind::Float => Self::FLOAT,
            PrimitiveKind::Double => Self::DOUBLE,
        };
        category.union(Self::PRIMITIVE)
    }

    /// Whether every bit of `mask` is set.
    #[inline]
    pub const fn is(self, mask: TypeCode) -> bool {
        self.contains(mask)
    }

    /// The category bits alone.
    #[inline]
    pub const fn category(self) -> TypeCode {
        self.intersection(Self::CATEGORY_MASK)
    }

    /// Human-readable category name, as used in diagnostics and traces.
    pub fn category_name(self) -> &'static str {
        const NAMES: [(TypeCode, &str); 20] = [
            (TypeCode::VOID, "void"),
            (TypeCode::BOOLEAN, "boolean"),
            (TypeCode::BYTE, "byte"),
            (TypeCode::CHAR, "char"),
            (TypeCode::SHORT, "short"),
            (TypeCode::INT, "int"),
            (TypeCode::LONG, "long"),
            (TypeCode::FLOAT, "float"),
            (TypeCode::DOUBLE, "double"),
            (TypeCode::STRING, "String"),
            (TypeCode::ANY, "Any"),
            (TypeCode::CORBA_OBJECT, "CORBA Object"),
            (TypeCode::REMOTE, "Remote"),
            (TypeCode::ABSTRACT, "Abstract"),
            (TypeCode::NC_INTERFACE, "NC Interface"),
            (TypeCode::VALUE, "Value"),
            (TypeCode::IMPLEMENTATION, "Implementation"),
            (TypeCode::NC_CLASS, "NC Class"),
            (TypeCode::ARRAY, "Array"),
            (TypeCode::JAVA_RMI_REMOTE, "java.rmi.Remote"),
        ];
        let category = self.category();
        NAMES
            .iter()
            .find(|(code, _)| *code == category)
            .map_or("unknown", |(_, name)| name)
    }
}

#[cfg(test)]
mod tests;
