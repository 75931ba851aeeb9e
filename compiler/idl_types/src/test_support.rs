//! Builders for unit tests that need types in a pool without classifying.

use idl_ir::{ClassId, Modifiers};
use smallvec::SmallVec;

use crate::{
    ClassData, CompoundData, CompoundFlags, Member, Method, Status, TypeCode, TypeData, TypeId,
    TypeKey, TypeKind, TypePool,
};

/// Register a valid value type named `java_name` with `flags`.
pub(crate) fn value_type(pool: &mut TypePool, java_name: &str, flags: CompoundFlags) -> TypeId {
    let (package, simple) = java_name.rsplit_once('.').unwrap_or(("", java_name));
    let modules: Vec<String> = if package.is_empty() {
        Vec::new()
    } else {
        package.split('.').map(str::to_owned).collect()
    };
    let qualified_idl_name = crate::names::mangle::qualified_name(&modules, simple);
    let id = pool.register(
        TypeKey::plain(java_name),
        TypeData {
            code: TypeCode::VALUE | TypeCode::COMPOUND | TypeCode::CLASS,
            kind: TypeKind::Value(ClassData::new(CompoundData::new(ClassId::from_raw(0), flags))),
            java_name: java_name.to_owned(),
            idl_name: simple.to_owned(),
            modules,
            qualified_idl_name,
            repository_id: None,
            status: Status::Pending,
        },
    );
    pool.mark_valid(id);
    id
}

/// A checked exception that is not a `RemoteException`.
pub(crate) fn checked_exception(pool: &mut TypePool, java_name: &str) -> TypeId {
    value_type(pool, java_name, CompoundFlags::EXCEPTION | CompoundFlags::CHECKED_EXCEPTION)
}

/// `java.rmi.RemoteException`.
pub(crate) fn remote_exception(pool: &mut TypePool) -> TypeId {
    value_type(
        pool,
        "java.rmi.RemoteException",
        CompoundFlags::EXCEPTION
            | CompoundFlags::CHECKED_EXCEPTION
            | CompoundFlags::REMOTE_EXCEPTION_OR_SUBCLASS,
    )
}

pub(crate) fn method(name: &str, return_type: TypeId, arguments: &[TypeId], exceptions: &[TypeId]) -> Method {
    Method {
        name: name.to_owned(),
        enclosing: ClassId::from_raw(0),
        declared_by: ClassId::from_raw(0),
        modifiers: Modifiers::PUBLIC,
        is_constructor: name == idl_ir::MemberDef::CONSTRUCTOR_NAME,
        return_type,
        arguments: arguments.iter().copied().collect::<SmallVec<_>>(),
        argument_names: (0..arguments.len()).map(|i| format!("arg{i}")).collect(),
        exceptions: exceptions.to_vec(),
        impl_exceptions: exceptions.to_vec(),
        attribute_kind: crate::AttributeKind::None,
        attribute_name: None,
        attribute_pair: None,
        idl_name: String::new(),
    }
}

pub(crate) fn member(name: &str, ty: TypeId) -> Member {
    Member {
        name: name.to_owned(),
        ty,
        value: None,
        modifiers: Modifiers::PUBLIC,
        forced_transient: false,
        is_inner_class_declaration: false,
        idl_name: String::new(),
    }
}
