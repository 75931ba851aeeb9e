//! Methods of compound types.

use idl_ir::{ClassId, Modifiers};
use smallvec::SmallVec;

use crate::TypeId;

/// How a method participates in IDL attribute mapping.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum AttributeKind {
    /// Plain operation.
    #[default]
    None,
    /// `isX()` read-only attribute.
    Is,
    /// `getX()` read-only attribute.
    Get,
    /// `isX()` paired with `setX()`.
    IsReadWrite,
    /// `getX()` paired with `setX()`.
    GetReadWrite,
    /// `setX()` paired with a getter.
    Set,
}

impl AttributeKind {
    /// Prefix of the operation name seen on the wire.
    pub const fn wire_prefix(self) -> &'static str {
        match self {
            AttributeKind::None => "",
            AttributeKind::Is
            | AttributeKind::Get
            | AttributeKind::IsReadWrite
            | AttributeKind::GetReadWrite => "_get_",
            AttributeKind::Set => "_set_",
        }
    }

    pub const fn is_attribute(self) -> bool {
        !matches!(self, AttributeKind::None)
    }

    /// Getter of a read-only or read-write attribute.
    pub const fn is_getter(self) -> bool {
        matches!(
            self,
            AttributeKind::Is
                | AttributeKind::Get
                | AttributeKind::IsReadWrite
                | AttributeKind::GetReadWrite
        )
    }

    pub const fn is_read_write(self) -> bool {
        matches!(self, AttributeKind::IsReadWrite | AttributeKind::GetReadWrite)
    }
}

/// A method or constructor in a compound type's method set.
#[derive(Clone, Debug)]
pub struct Method {
    /// Java name; constructors are `<init>`.
    pub name: String,
    /// Class whose method set holds this method.
    pub enclosing: ClassId,
    /// Class whose declaration this method was taken from.
    pub declared_by: ClassId,
    pub modifiers: Modifiers,
    pub is_constructor: bool,
    pub return_type: TypeId,
    pub arguments: SmallVec<[TypeId; 4]>,
    pub argument_names: Vec<String>,
    /// Declared thrown types, de-duplicated in declaration order.
    pub exceptions: Vec<TypeId>,
    /// Thrown types of the implementing class's own declaration, for
    /// implementation types; otherwise equal to `exceptions`.
    pub impl_exceptions: Vec<TypeId>,
    pub attribute_kind: AttributeKind,
    /// Mangled attribute name, for attributes.
    pub attribute_name: Option<String>,
    /// Index of the paired getter or setter within the same method set.
    pub attribute_pair: Option<usize>,
    /// Operation name on the wire; `_get_`/`_set_` prefixed for attributes.
    pub idl_name: String,
}

impl Method {
    /// Same name and argument types.
    pub fn same_signature(&self, other: &Method) -> bool {
        self.name == other.name && self.arguments == other.arguments
    }

    pub fn is_attribute(&self) -> bool {
        self.attribute_kind.is_attribute()
    }

    /// Declared by a class other than the one whose method set holds it.
    pub fn is_inherited(&self) -> bool {
        self.declared_by != self.enclosing
    }

    pub fn is_private(&self) -> bool {
        self.modifiers.is_private()
    }

    /// Narrow this method's exceptions to those legal for both this
    /// declaration and `other`, which has the same signature.
    pub fn merge_with(&mut self, other: &Method, is_subclass: impl Fn(TypeId, TypeId) -> bool) {
        self.exceptions = narrow_exceptions(&other.exceptions, &self.exceptions, is_subclass);
        self.impl_exceptions = self.exceptions.clone();
    }
}

/// Entries of `from` that are a subclass of some entry of `with`.
pub fn compatible_exceptions(
    from: &[TypeId],
    with: &[TypeId],
    is_subclass: impl Fn(TypeId, TypeId) -> bool,
) -> Vec<TypeId> {
    from.iter()
        .copied()
        .filter(|&exception| with.iter().any(|&bound| is_subclass(exception, bound)))
        .collect()
}

/// Exceptions throwable by an override of two same-signature declarations.
///
/// Keeps every exception of either list that is a subclass of some
/// exception of the other, without duplicates, `a` first.
pub fn narrow_exceptions(
    a: &[TypeId],
    b: &[TypeId],
    is_subclass: impl Fn(TypeId, TypeId) -> bool,
) -> Vec<TypeId> {
    let mut merged = Vec::new();
    let from_a = compatible_exceptions(a, b, &is_subclass);
    let from_b = compatible_exceptions(b, a, &is_subclass);
    for exception in from_a.into_iter().chain(from_b) {
        if !merged.contains(&exception) {
            merged.push(exception);
        }
    }
    merged
}

/// Drop exceptions already caught by a superclass entry, keeping order.
pub fn unique_catch_list(
    exceptions: &[TypeId],
    is_subclass: impl Fn(TypeId, TypeId) -> bool,
) -> Vec<TypeId> {
    let mut unique: Vec<TypeId> = Vec::new();
    for (index, &exception) in exceptions.iter().enumerate() {
        let subsumed = exceptions
            .iter()
            .enumerate()
            .any(|(other_index, &other)| {
                other_index != index && other != exception && is_subclass(exception, other)
            });
        if !subsumed && !unique.contains(&exception) {
            unique.push(exception);
        }
    }
    unique
}
