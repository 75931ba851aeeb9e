//! Shared construction and initialization of compound types.

use idl_diagnostic::Constraint;
use idl_ir::{known, ClassId, ClassModel};

use super::Classifier;
use crate::names::mangle::{exception_name, qualified_name};
use crate::names::{set_member_names, set_method_names, MethodNaming};
use crate::repository_id;
use crate::{
    Attempt, CompoundData, CompoundFlags, Member, Method, Status, TypeCode, TypeData, TypeId,
    TypeKind,
};

/// What an attempt collected before the compound is finished.
#[derive(Default)]
pub(super) struct CompoundParts {
    pub interfaces: Vec<TypeId>,
    pub methods: Vec<Method>,
    pub members: Vec<Member>,
}

impl<M: ClassModel + ?Sized> Classifier<'_, M> {
    /// Capability flags of `class`.
    pub(super) fn compound_flags(&mut self, class: ClassId) -> Attempt<CompoundFlags> {
        let is_interface = self.model.is_interface(class);
        let corba_object = self.implements(class, known::CORBA_OBJECT)?;
        let idl_entity = self.implements(class, known::IDL_ENTITY)?;
        let value_base = self.implements(class, known::VALUE_BASE)?;
        let user_exception = self.implements(class, known::CORBA_USER_EXCEPTION)?;
        let exception = self.implements(class, known::THROWABLE)?;
        let checked = exception
            && !self.implements(class, known::RUNTIME_EXCEPTION)?
            && !self.implements(class, known::ERROR)?;
        let remote_exception = exception && self.implements(class, known::REMOTE_EXCEPTION)?;
        let abstract_base = is_interface && idl_entity && !value_base && !corba_object;
        let boxed = idl_entity && !value_base && !abstract_base && !corba_object && !exception;

        let mut flags = CompoundFlags::empty();
        flags.set(CompoundFlags::CORBA_OBJECT, corba_object);
        flags.set(CompoundFlags::IDL_ENTITY, idl_entity);
        flags.set(CompoundFlags::VALUE_BASE, value_base);
        flags.set(CompoundFlags::ABSTRACT_BASE, abstract_base);
        flags.set(CompoundFlags::CORBA_USER_EXCEPTION, user_exception);
        flags.set(CompoundFlags::EXCEPTION, exception);
        flags.set(CompoundFlags::CHECKED_EXCEPTION, checked);
        flags.set(CompoundFlags::REMOTE_EXCEPTION_OR_SUBCLASS, remote_exception);
        flags.set(CompoundFlags::BOXED, boxed);
        Ok(flags)
    }

    /// IDL name and modules of `class`, claimed in the name contexts.
    ///
    /// A case-insensitive clash with another type of the same package, or
    /// of one package with another, is always loud.
    pub(super) fn type_names(&mut self, class: ClassId, flags: CompoundFlags) -> Attempt<(String, Vec<String>)> {
        let model = self.model;
        let package = model.package_name(class);
        let entity = model.qualified_name(class);
        let name = match self.names.class_or_interface_name(package, &model.simple_name(class)) {
            Ok(name) => name,
            Err(collision) => {
                return Err(self.collision(Constraint::TypeNameCollision, false, entity, collision))
            }
        };
        match self.names.module_names(package, flags.contains(CompoundFlags::BOXED)) {
            Ok(modules) => Ok((name, modules)),
            Err(collision) => Err(self.collision(Constraint::TypeNameCollision, false, entity, collision)),
        }
    }

    /// A pending record for `class` with derived names.
    pub(super) fn compound_data(
        &mut self,
        class: ClassId,
        code: TypeCode,
        kind: fn(CompoundData) -> TypeKind,
    ) -> Attempt<TypeData> {
        let flags = self.compound_flags(class)?;
        let (idl_name, modules) = self.type_names(class, flags)?;
        Ok(self.compound_record(class, code, kind, flags, idl_name, modules))
    }

    /// A pending record for `class` with the given names.
    pub(super) fn compound_record(
        &self,
        class: ClassId,
        code: TypeCode,
        kind: fn(CompoundData) -> TypeKind,
        flags: CompoundFlags,
        idl_name: String,
        modules: Vec<String>,
    ) -> TypeData {
        let mut code = code | TypeCode::COMPOUND;
        if self.model.is_inner_class(class) {
            code |= TypeCode::INNER;
        }
        let mut compound = CompoundData::new(class, flags);
        if compound.is_exception() {
            let exception = exception_name(&idl_name);
            compound.qualified_exception_name = Some(qualified_name(&modules, &exception));
            compound.exception_name = Some(exception);
        }
        TypeData {
            code,
            kind: kind(compound),
            java_name: self.model.qualified_name(class).to_owned(),
            qualified_idl_name: qualified_name(&modules, &idl_name),
            idl_name,
            modules,
            repository_id: None,
            status: Status::Pending,
        }
    }

    /// Name the collected methods and members, classify nested class
    /// declarations, set the repository id, and store the parts.
    pub(super) fn finish_compound(&mut self, id: TypeId, mut parts: CompoundParts, quiet: bool) -> Attempt<()> {
        let data = self.pool.get(id);
        let container = data.idl_name.clone();
        let entity = data.java_name.clone();
        let is_interface = data.is_interface();
        let (infer_attributes, value_semantics) = match data.kind {
            TypeKind::Remote(_) | TypeKind::Abstract(_) => (true, false),
            TypeKind::Value(_) => (true, true),
            _ => (false, false),
        };
        let Some(compound) = data.compound() else {
            return Ok(());
        };
        let class = compound.class;
        let idl_entity = compound.is_idl_entity();
        let declared_id = data.repository_id.clone();

        let naming = MethodNaming {
            container: &container,
            infer_attributes,
            value_semantics,
        };
        if let Err(collision) = set_method_names(&mut self.names, &self.pool, naming, &mut parts.methods) {
            return Err(self.collision(Constraint::MethodNameCollision, quiet, &entity, collision));
        }

        self.init_inner_class_members(class, &mut parts.members)?;

        if let Err(collision) = set_member_names(&mut self.names, &container, &mut parts.members, &parts.methods) {
            let constraint = if is_interface {
                Constraint::InterfaceMemberCollision
            } else {
                Constraint::ClassMemberCollision
            };
            return Err(self.collision(constraint, quiet, &entity, collision));
        }

        let repository_id = match declared_id {
            Some(id) => id,
            None => {
                let computed = repository_id::compound_id(self.model, class, idl_entity);
                self.lookup(computed)?
            }
        };

        let data = self.pool.get_mut(id);
        data.repository_id = Some(repository_id);
        if let Some(compound) = data.compound_mut() {
            compound.interfaces = parts.interfaces;
            compound.methods = parts.methods;
            compound.members = parts.members;
        }
        Ok(())
    }
}
