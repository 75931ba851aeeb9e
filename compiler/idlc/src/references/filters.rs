//! What of a compound type shows up in its IDL.

use idl_ir::{known, ClassModel};
use idl_types::{is_special_typedef, Member, Method, TypeCode, TypeId, TypeKind};

use crate::IdlContext;

/// Serialization hooks that never map to operations.
const SERIALIZATION_HOOKS: [&str; 4] = ["readObject", "writeObject", "readExternal", "writeExternal"];

impl<'a, M: ClassModel + ?Sized> IdlContext<'a, M> {
    /// State members of a value type, in Java name order.
    ///
    /// Static and transient fields are not state; a custom value type only
    /// maps its public fields.
    pub fn data_members(&self, id: TypeId) -> Vec<&'a Member> {
        let data = self.get(id);
        if !matches!(data.kind, TypeKind::Value(_)) {
            return Vec::new();
        }
        let custom = data.is_custom();
        let mut members: Vec<&Member> = data
            .members()
            .iter()
            .filter(|member| !member.is_static() && !member.is_transient())
            .filter(|member| member.is_public() || !custom)
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        members
    }

    /// Operations and attributes declared by the type itself.
    ///
    /// Remote and abstract interfaces always map their methods; value and
    /// non-conforming types only with `value_methods`.
    pub fn idl_methods(&self, id: TypeId) -> Vec<&'a Method> {
        let data = self.get(id);
        let is_value = match data.kind {
            TypeKind::Remote(_) | TypeKind::Abstract(_) => false,
            TypeKind::Value(_) if self.config.value_methods => true,
            TypeKind::NcClass(_) | TypeKind::NcInterface(_) if self.config.value_methods => false,
            _ => return Vec::new(),
        };
        let non_conforming = data.is(TypeCode::NON_CONFORMING);
        data.methods()
            .iter()
            .filter(|method| !method.is_private() && !method.is_inherited())
            .filter(|method| !(is_value && SERIALIZATION_HOOKS.contains(&method.name.as_str())))
            .filter(|method| !(non_conforming && method.is_constructor))
            .collect()
    }

    /// Public static final fields with a primitive or `String` value.
    pub fn constants(&self, id: TypeId) -> Vec<&'a Member> {
        self.get(id)
            .members()
            .iter()
            .filter(|member| {
                member.is_public()
                    && member.modifiers.is_final()
                    && member.is_static()
                    && member.is_constant()
            })
            .filter(|member| {
                let ty = self.get(member.ty);
                ty.is(TypeCode::PRIMITIVE) || ty.java_name == known::JAVA_LANG_STRING
            })
            .collect()
    }

    /// Thrown types that map to IDL exceptions: checked, and not a
    /// `RemoteException`.
    pub fn idl_exceptions(&self, method: &Method) -> Vec<TypeId> {
        method
            .exceptions
            .iter()
            .copied()
            .filter(|&exception| {
                self.compound(exception).is_some_and(|compound| {
                    compound.is_checked_exception() && !compound.is_remote_exception_or_subclass()
                })
            })
            .collect()
    }

    /// Interfaces named in the IDL inheritance list.
    ///
    /// Classes drop the serialization markers and `IDLEntity`; everything
    /// else drops `java.rmi.Remote`.
    pub fn idl_interfaces(&self, id: TypeId) -> Vec<TypeId> {
        let data = self.get(id);
        let is_class = matches!(data.kind, TypeKind::Value(_) | TypeKind::NcClass(_));
        data.interfaces()
            .iter()
            .copied()
            .filter(|&interface| {
                let name = self.get(interface).java_name.as_str();
                if is_class {
                    !matches!(name, known::EXTERNALIZABLE | known::SERIALIZABLE | known::IDL_ENTITY)
                } else {
                    name != known::REMOTE
                }
            })
            .collect()
    }

    /// Superclass named in the IDL inheritance list of a value or
    /// non-conforming class. `java.lang.Object` is implicit.
    pub fn idl_parent(&self, id: TypeId) -> Option<TypeId> {
        let data = self.get(id);
        if !matches!(data.kind, TypeKind::Value(_) | TypeKind::NcClass(_)) {
            return None;
        }
        data.parent()
            .filter(|&parent| self.get(parent).java_name != known::JAVA_LANG_OBJECT)
    }

    /// Parent first, then interfaces.
    pub fn inheritance(&self, id: TypeId) -> Vec<TypeId> {
        self.idl_parent(id)
            .into_iter()
            .chain(self.idl_interfaces(id))
            .collect()
    }

    /// One of the types IDL defines as a fixed typedef.
    pub fn is_special_reference(&self, id: TypeId) -> bool {
        let data = self.get(id);
        data.is_compound() && is_special_typedef(&data.java_name)
    }

    /// Whether the type gets IDL of its own.
    ///
    /// CORBA objects and most `IDLEntity` types already are IDL. An
    /// implementation only needs an interface when it joins two or more.
    pub fn is_idl_generated_for(&self, id: TypeId) -> bool {
        let data = self.get(id);
        let Some(compound) = data.compound() else {
            return false;
        };
        if compound.is_corba_object() {
            return false;
        }
        if compound.is_idl_entity() {
            return compound.is_boxed()
                || data.java_name == known::IDL_ENTITY
                || compound.has(idl_types::CompoundFlags::CORBA_USER_EXCEPTION);
        }
        if matches!(data.kind, TypeKind::Implementation(_)) {
            return self.idl_interfaces(id).len() >= 2;
        }
        true
    }
}
