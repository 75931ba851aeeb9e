//! The class model interface.

use std::fmt;

use crate::{ClassDef, MemberDef, PersistentField};

/// Handle to a class known to a [`ClassModel`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ClassId(u32);

impl ClassId {
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
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// A referenced class is not available.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("class `{name}` not found")]
pub struct ClassNotFound {
    pub name: String,
}

impl ClassNotFound {
    pub fn new(name: impl Into<String>) -> Self {
        ClassNotFound { name: name.into() }
    }
}

/// Read-only queries over classes, interfaces and their members.
///
/// Implementations wrap a host reflection system. Only the three required
/// methods touch the host; everything else is derived from [`ClassDef`].
pub trait ClassModel {
    /// Resolve a binary qualified name.
    fn find_class(&self, name: &str) -> Result<ClassId, ClassNotFound>;

    /// The declaration behind a handle returned by [`ClassModel::find_class`].
    fn class(&self, id: ClassId) -> &ClassDef;

    /// Whether `sub` is `sup` or inherits from it through any chain of
    /// superclass and interface edges.
    fn implemented_by(&self, sub: ClassId, sup: &str) -> Result<bool, ClassNotFound>;

    fn qualified_name(&self, id: ClassId) -> &str {
        &self.class(id).name
    }

    fn package_name(&self, id: ClassId) -> &str {
        self.class(id).package_name()
    }

    fn simple_name(&self, id: ClassId) -> String {
        self.class(id).simple_name()
    }

    fn is_interface(&self, id: ClassId) -> bool {
        self.class(id).is_interface()
    }

    fn is_inner_class(&self, id: ClassId) -> bool {
        self.class(id).outer.is_some()
    }

    fn superclass(&self, id: ClassId) -> Result<Option<ClassId>, ClassNotFound> {
        self.class(id)
            .superclass
            .as_deref()
            .map(|name| self.find_class(name))
            .transpose()
    }

    fn interfaces(&self, id: ClassId) -> Result<Vec<ClassId>, ClassNotFound> {
        self.class(id)
            .interfaces
            .iter()
            .map(|name| self.find_class(name))
            .collect()
    }

    fn members(&self, id: ClassId) -> &[MemberDef] {
        &self.class(id).members
    }

    fn serial_persistent_fields(&self, id: ClassId) -> Option<&[PersistentField]> {
        self.class(id).persistent_fields.as_deref()
    }

    fn declared_repository_id(&self, id: ClassId) -> Option<&str> {
        self.class(id).repository_id.as_deref()
    }

    fn serial_version_uid(&self, id: ClassId) -> Option<i64> {
        self.class(id).serial_version_uid
    }
}
