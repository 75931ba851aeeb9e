//! Declaration modifiers.

use bitflags::bitflags;

bitflags! {
    /// Access and storage modifiers of a class or member.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const TRANSIENT = 1 << 5;
        const ABSTRACT = 1 << 6;

        /// Modifiers every interface field implicitly carries.
        const CONSTANT = Self::PUBLIC.bits() | Self::STATIC.bits() | Self::FINAL.bits();
    }
}

impl Modifiers {
    #[inline]
    pub const fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    #[inline]
    pub const fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    #[inline]
    pub const fn is_protected(self) -> bool {
        self.contains(Self::PROTECTED)
    }

    #[inline]
    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    #[inline]
    pub const fn is_final(self) -> bool {
        self.contains(Self::FINAL)
    }

    #[inline]
    pub const fn is_transient(self) -> bool {
        self.contains(Self::TRANSIENT)
    }

    /// Java source spelling, e.g. `"private static final"`.
    pub fn visibility_string(self) -> String {
        const ORDER: [(Modifiers, &str); 6] = [
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PROTECTED, "protected"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::STATIC, "static"),
            (Modifiers::FINAL, "final"),
            (Modifiers::TRANSIENT, "transient"),
        ];
        ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, word)| *word)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
