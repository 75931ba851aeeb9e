//! Class and interface declarations.

use crate::{known, JavaType, MemberDef, MemberKind, Modifiers};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKind {
    Class,
    Interface,
}

/// One entry of an explicit `serialPersistentFields` declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistentField {
    pub name: String,
    pub ty: JavaType,
}

impl PersistentField {
    pub fn new(name: impl Into<String>, ty: JavaType) -> Self {
        PersistentField {
            name: name.into(),
            ty,
        }
    }
}

/// A class or interface declaration.
///
/// `name` is the binary qualified name; nested classes use `Outer$Inner`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDef {
    pub name: String,
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    pub superclass: Option<String>,
    /// Directly implemented (classes) or extended (interfaces) interfaces.
    pub interfaces: Vec<String>,
    /// Declarations in source order.
    pub members: Vec<MemberDef>,
    /// Enclosing class, for nested classes.
    pub outer: Option<String>,
    /// Contents of `serialPersistentFields`, when the class declares one.
    pub persistent_fields: Option<Vec<PersistentField>>,
    /// Repository id fixed by the class itself (e.g. an IDL helper's `id()`).
    pub repository_id: Option<String>,
    pub serial_version_uid: Option<i64>,
}

impl ClassDef {
    fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        ClassDef {
            name: name.into(),
            kind,
            modifiers: Modifiers::PUBLIC,
            superclass: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            outer: None,
            persistent_fields: None,
            repository_id: None,
            serial_version_uid: None,
        }
    }

    /// A public class extending `java.lang.Object`.
    pub fn class(name: impl Into<String>) -> Self {
        let mut def = Self::new(name, ClassKind::Class);
        if def.name != known::JAVA_LANG_OBJECT {
            def.superclass = Some(known::JAVA_LANG_OBJECT.to_owned());
        }
        def
    }

    /// A public interface.
    pub fn interface(name: impl Into<String>) -> Self {
        let mut def = Self::new(name, ClassKind::Interface);
        def.modifiers |= Modifiers::ABSTRACT;
        def
    }

    /// Set the superclass of a class, or add a super-interface of an interface.
    #[must_use]
    pub fn extends(mut self, name: impl Into<String>) -> Self {
        match self.kind {
            ClassKind::Class => self.superclass = Some(name.into()),
            ClassKind::Interface => self.interfaces.push(name.into()),
        }
        self
    }

    /// Add a directly implemented interface.
    #[must_use]
    pub fn implements(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(name.into());
        self
    }

    /// Append a member, applying the implicit modifiers of interface members.
    #[must_use]
    pub fn member(mut self, mut member: MemberDef) -> Self {
        if self.kind == ClassKind::Interface {
            match member.kind {
                MemberKind::Field => member.modifiers |= Modifiers::CONSTANT,
                MemberKind::Method => member.modifiers |= Modifiers::PUBLIC | Modifiers::ABSTRACT,
                _ => {}
            }
        }
        self.members.push(member);
        self
    }

    /// Mark this class as nested inside `outer`.
    #[must_use]
    pub fn inner_of(mut self, outer: impl Into<String>) -> Self {
        self.outer = Some(outer.into());
        self
    }

    /// Declare `serialPersistentFields` with the given entries.
    ///
    /// Also adds the `private static final ObjectStreamField[]` field itself
    /// unless the class already declares one.
    #[must_use]
    pub fn persistent_fields(mut self, fields: impl IntoIterator<Item = PersistentField>) -> Self {
        let declared = self
            .members
            .iter()
            .any(|member| member.name == known::SERIAL_PERSISTENT_FIELDS);
        if !declared {
            self.members.push(
                MemberDef::field(
                    known::SERIAL_PERSISTENT_FIELDS,
                    JavaType::array(JavaType::class(known::OBJECT_STREAM_FIELD), 1),
                )
                .with_modifiers(Modifiers::PRIVATE | Modifiers::STATIC | Modifiers::FINAL),
            );
        }
        self.persistent_fields = Some(fields.into_iter().collect());
        self
    }

    #[must_use]
    pub fn repository_id(mut self, id: impl Into<String>) -> Self {
        self.repository_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn serial_version_uid(mut self, uid: i64) -> Self {
        self.serial_version_uid = Some(uid);
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Package portion of the name; empty for the default package.
    pub fn package_name(&self) -> &str {
        self.name.rfind('.').map_or("", |dot| &self.name[..dot])
    }

    /// Name without package; nested classes read `Outer.Inner`.
    pub fn simple_name(&self) -> String {
        let unqualified = self.name.rfind('.').map_or(self.name.as_str(), |dot| &self.name[dot + 1..]);
        unqualified.replace('$', ".")
    }
}
