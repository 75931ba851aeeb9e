//! Data members of compound types.

use idl_ir::Modifiers;

use crate::TypeId;

/// A field, constant or nested class declaration of a compound type.
#[derive(Clone, Debug)]
pub struct Member {
    /// Java name.
    pub name: String,
    pub ty: TypeId,
    /// IDL literal, for compile-time constants.
    pub value: Option<String>,
    pub modifiers: Modifiers,
    /// Not listed in `serialPersistentFields`, so not serialized.
    pub forced_transient: bool,
    pub is_inner_class_declaration: bool,
    pub idl_name: String,
}

impl Member {
    pub fn is_constant(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_transient(&self) -> bool {
        self.forced_transient || self.modifiers.is_transient()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.is_public()
    }

    pub fn is_private(&self) -> bool {
        self.modifiers.is_private()
    }

    /// Java modifier spelling.
    pub fn visibility(&self) -> String {
        let mut modifiers = self.modifiers;
        if self.forced_transient {
            modifiers |= Modifiers::TRANSIENT;
        }
        modifiers.visibility_string()
    }
}
