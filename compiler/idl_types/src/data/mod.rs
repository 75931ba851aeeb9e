//! Type records stored in the pool.

use bitflags::bitflags;
use idl_ir::{ClassId, PrimitiveKind};

use crate::{Member, Method, TypeCode, TypeId};

/// Classification state of a Type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Status {
    /// Registered, still initializing. Reachable only from within its own
    /// classification.
    Pending,
    Valid,
    /// Evicted after a failed classification attempt.
    Invalid,
}

bitflags! {
    /// Capabilities of a compound type, computed once at creation.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct CompoundFlags: u16 {
        const CORBA_OBJECT = 1 << 0;
        const IDL_ENTITY = 1 << 1;
        const VALUE_BASE = 1 << 2;
        const ABSTRACT_BASE = 1 << 3;
        const CORBA_USER_EXCEPTION = 1 << 4;
        const EXCEPTION = 1 << 5;
        const CHECKED_EXCEPTION = 1 << 6;
        const REMOTE_EXCEPTION_OR_SUBCLASS = 1 << 7;
        const BOXED = 1 << 8;
    }
}

/// Shared payload of the compound variants.
#[derive(Clone, Debug)]
pub struct CompoundData {
    pub class: ClassId,
    pub flags: CompoundFlags,
    pub methods: Vec<Method>,
    pub members: Vec<Member>,
    /// Directly implemented interfaces, as mapped.
    pub interfaces: Vec<TypeId>,
    /// IDL name of the exception mapped from this type, for exceptions.
    pub exception_name: Option<String>,
    pub qualified_exception_name: Option<String>,
}

impl CompoundData {
    pub fn new(class: ClassId, flags: CompoundFlags) -> Self {
        CompoundData {
            class,
            flags,
            methods: Vec::new(),
            members: Vec::new(),
            interfaces: Vec::new(),
            exception_name: None,
            qualified_exception_name: None,
        }
    }

    #[inline]
    pub fn has(&self, flags: CompoundFlags) -> bool {
        self.flags.contains(flags)
    }

    pub fn is_exception(&self) -> bool {
        self.has(CompoundFlags::EXCEPTION)
    }

    pub fn is_checked_exception(&self) -> bool {
        self.has(CompoundFlags::CHECKED_EXCEPTION)
    }

    pub fn is_remote_exception_or_subclass(&self) -> bool {
        self.has(CompoundFlags::REMOTE_EXCEPTION_OR_SUBCLASS)
    }

    pub fn is_idl_entity(&self) -> bool {
        self.has(CompoundFlags::IDL_ENTITY)
    }

    pub fn is_corba_object(&self) -> bool {
        self.has(CompoundFlags::CORBA_OBJECT)
    }

    pub fn is_boxed(&self) -> bool {
        self.has(CompoundFlags::BOXED)
    }
}

/// Payload of the class variants: a compound plus its superclass.
#[derive(Clone, Debug)]
pub struct ClassData {
    pub compound: CompoundData,
    pub parent: Option<TypeId>,
    /// Value types only: serialized through custom marshaling.
    pub is_custom: bool,
}

impl ClassData {
    pub fn new(compound: CompoundData) -> Self {
        ClassData {
            compound,
            parent: None,
            is_custom: false,
        }
    }
}

/// The closed set of mapping categories.
#[derive(Clone, Debug)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    Array { element: TypeId, dimension: u32 },
    SpecialClass(CompoundData),
    SpecialInterface(CompoundData),
    Remote(CompoundData),
    Abstract(CompoundData),
    NcInterface(CompoundData),
    Value(ClassData),
    Implementation(ClassData),
    NcClass(ClassData),
}

/// One classified Type.
#[derive(Clone, Debug)]
pub struct TypeData {
    pub code: TypeCode,
    pub kind: TypeKind,
    /// Java spelling: `int`, `com.acme.Foo`, `int[][]`.
    pub java_name: String,
    pub idl_name: String,
    pub modules: Vec<String>,
    /// `::`-joined modules and name, without a leading `::`.
    pub qualified_idl_name: String,
    pub repository_id: Option<String>,
    pub status: Status,
}

impl TypeData {
    /// Whether every bit of `mask` is set in the type code.
    #[inline]
    pub fn is(&self, mask: TypeCode) -> bool {
        self.code.is(mask)
    }

    pub fn is_valid(&self) -> bool {
        self.status == Status::Valid
    }

    pub fn is_compound(&self) -> bool {
        self.compound().is_some()
    }

    pub fn is_interface(&self) -> bool {
        self.is(TypeCode::INTERFACE)
    }

    pub fn is_class(&self) -> bool {
        self.is(TypeCode::CLASS)
    }

    pub fn compound(&self) -> Option<&CompoundData> {
        match &self.kind {
            TypeKind::SpecialClass(data)
            | TypeKind::SpecialInterface(data)
            | TypeKind::Remote(data)
            | TypeKind::Abstract(data)
            | TypeKind::NcInterface(data) => Some(data),
            TypeKind::Value(class) | TypeKind::Implementation(class) | TypeKind::NcClass(class) => {
                Some(&class.compound)
            }
            TypeKind::Primitive(_) | TypeKind::Array { .. } => None,
        }
    }

    pub fn compound_mut(&mut self) -> Option<&mut CompoundData> {
        match &mut self.kind {
            TypeKind::SpecialClass(data)
            | TypeKind::SpecialInterface(data)
            | TypeKind::Remote(data)
            | TypeKind::Abstract(data)
            | TypeKind::NcInterface(data) => Some(data),
            TypeKind::Value(class) | TypeKind::Implementation(class) | TypeKind::NcClass(class) => {
                Some(&mut class.compound)
            }
            TypeKind::Primitive(_) | TypeKind::Array { .. } => None,
        }
    }

    pub fn class_data(&self) -> Option<&ClassData> {
        match &self.kind {
            TypeKind::Value(class) | TypeKind::Implementation(class) | TypeKind::NcClass(class) => {
                Some(class)
            }
            _ => None,
        }
    }

    pub fn class_data_mut(&mut self) -> Option<&mut ClassData> {
        match &mut self.kind {
            TypeKind::Value(class) | TypeKind::Implementation(class) | TypeKind::NcClass(class) => {
                Some(class)
            }
            _ => None,
        }
    }

    /// Class model handle, for compound types.
    pub fn class(&self) -> Option<ClassId> {
        self.compound().map(|data| data.class)
    }

    /// Superclass, for class variants.
    pub fn parent(&self) -> Option<TypeId> {
        self.class_data().and_then(|class| class.parent)
    }

    pub fn methods(&self) -> &[Method] {
        self.compound().map_or(&[][..], |data| data.methods.as_slice())
    }

    pub fn members(&self) -> &[Member] {
        self.compound().map_or(&[][..], |data| data.members.as_slice())
    }

    pub fn interfaces(&self) -> &[TypeId] {
        self.compound().map_or(&[][..], |data| data.interfaces.as_slice())
    }

    /// Array element and dimension.
    pub fn array(&self) -> Option<(TypeId, u32)> {
        match self.kind {
            TypeKind::Array { element, dimension } => Some((element, dimension)),
            _ => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(&self.kind, TypeKind::Value(class) if class.is_custom)
    }

    /// Qualified name, with a leading `::` when `global` and the type has
    /// modules.
    pub fn qualified_idl_name_global(&self, global: bool) -> String {
        if global && !self.modules.is_empty() {
            format!("::{}", self.qualified_idl_name)
        } else {
            self.qualified_idl_name.clone()
        }
    }

    /// Kind name used in traces and context frames.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TypeKind::Primitive(_) => "Primitive",
            TypeKind::Array { .. } => "Array",
            TypeKind::SpecialClass(_) => "SpecialClass",
            TypeKind::SpecialInterface(_) => "SpecialInterface",
            TypeKind::Remote(_) => "Remote",
            TypeKind::Abstract(_) => "Abstract",
            TypeKind::NcInterface(_) => "NCInterface",
            TypeKind::Value(_) => "Value",
            TypeKind::Implementation(_) => "Implementation",
            TypeKind::NcClass(_) => "NCClass",
        }
    }
}
