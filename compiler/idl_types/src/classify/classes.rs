//! Value, implementation and non-conforming classes.

use idl_diagnostic::Constraint;
use idl_ir::{known, ClassId, ClassModel, JavaType, MemberDef, MemberKind};

use super::compound::CompoundParts;
use super::Classifier;
use crate::{
    Attempt, ClassData, ContextCode, Member, Method, TypeCode, TypeId, TypeKey, TypeKind,
};

/// `private void writeObject(java.io.ObjectOutputStream)`.
fn is_write_object(def: &MemberDef) -> bool {
    def.kind == MemberKind::Method
        && def.modifiers.is_private()
        && def.ty.is_void()
        && def.has_signature("writeObject", &[JavaType::class(known::OBJECT_OUTPUT_STREAM)])
}

impl<M: ClassModel + ?Sized> Classifier<'_, M> {
    /// A serializable, non-remote class.
    ///
    /// `java.lang.Class` maps as `javax.rmi.CORBA.ClassDesc`; both names
    /// resolve to the same Type.
    pub(super) fn value_type(&mut self, class: ClassId, quiet: bool) -> Attempt<TypeId> {
        let model = self.model;
        let is_class = model.qualified_name(class) == known::JAVA_LANG_CLASS;
        let class = if is_class {
            self.find_class(known::CLASS_DESC)?
        } else {
            class
        };
        let result = match self.existing(class, |kind| matches!(kind, TypeKind::Value(_))) {
            Some(existing) => existing,
            None => self.new_value_type(class, quiet),
        };
        if let (true, Ok(id)) = (is_class, result) {
            self.pool.alias(TypeKey::plain(known::JAVA_LANG_CLASS), id);
        }
        result
    }

    fn new_value_type(&mut self, class: ClassId, quiet: bool) -> Attempt<TypeId> {
        let name = self.model.qualified_name(class);
        if self.implements(class, known::REMOTE)? {
            return Err(self.fail(Constraint::ValueIsRemote, false, name));
        }
        if !self.implements(class, known::SERIALIZABLE)? {
            return Err(self.fail(Constraint::ValueNotSerializable, false, name));
        }
        let data = self.compound_data(class, TypeCode::VALUE | TypeCode::CLASS, |compound| {
            TypeKind::Value(ClassData::new(compound))
        })?;
        self.attempt(TypeKey::plain(name), data, |this, id| this.init_value(id, class, quiet))
    }

    fn init_value(&mut self, id: TypeId, class: ClassId, quiet: bool) -> Attempt<()> {
        let model = self.model;
        let name = model.qualified_name(class);
        if let Err(cause) = self.init_parent(id, class) {
            return Err(self.escalate(cause, Constraint::InvalidSuperclass, quiet, name));
        }
        let interfaces = self.add_non_remote_interfaces(class)?;
        let mut methods = self.add_all_methods(class, false, false)?;
        self.update_parent_class_methods(class, &mut methods, false)?;
        let mut members = self.add_all_members(class, false, false)?;

        let externalizable = self.implements(class, known::EXTERNALIZABLE)?;
        if !externalizable {
            self.check_persistent_fields(class, &methods, &mut members, quiet)?;
        }
        let is_custom = externalizable || model.members(class).iter().any(is_write_object);

        let parts = CompoundParts {
            interfaces,
            methods,
            members,
        };
        self.finish_compound(id, parts, quiet)?;
        if let Some(data) = self.pool.get_mut(id).class_data_mut() {
            data.is_custom = is_custom;
        }
        Ok(())
    }

    /// Validate an explicit `serialPersistentFields` declaration and mark
    /// every field it does not list as transient.
    fn check_persistent_fields(
        &mut self,
        class: ClassId,
        methods: &[Method],
        members: &mut [Member],
        quiet: bool,
    ) -> Attempt<()> {
        let model = self.model;
        let writes_itself = methods.iter().any(|method| {
            method.name == "writeObject"
                && method.return_type == TypeId::VOID
                && method.arguments.len() == 1
                && self.pool.java_name(method.arguments[0]) == known::OBJECT_OUTPUT_STREAM
        });
        if writes_itself {
            return Ok(());
        }

        let declaration = model.members(class).iter().find(|def| {
            def.kind == MemberKind::Field
                && def.name == known::SERIAL_PERSISTENT_FIELDS
                && def.ty.is_array()
                && def.ty.element().class_name() == Some(known::OBJECT_STREAM_FIELD)
        });
        let Some(declaration) = declaration else {
            return Ok(());
        };
        let entity = format!("{}.{}", model.qualified_name(class), declaration.name);
        let modifiers = declaration.modifiers;
        if !(modifiers.is_private() && modifiers.is_static() && modifiers.is_final()) {
            return Err(self.fail(Constraint::PersistentFieldsModifiers, quiet, &entity));
        }
        let Some(fields) = model.serial_persistent_fields(class) else {
            return Ok(());
        };

        for field in fields {
            let declared = model
                .members(class)
                .iter()
                .find(|def| def.kind == MemberKind::Field && def.name == field.name);
            match declared {
                None => {
                    let detail = format!("no field named `{}`", field.name);
                    return Err(self.fail_with(Constraint::PersistentFieldMissing, quiet, &entity, Some(detail)));
                }
                Some(def) if def.ty != field.ty => {
                    let detail = format!("`{}` is declared `{}`, listed as `{}`", field.name, def.ty, field.ty);
                    return Err(self.fail_with(Constraint::PersistentFieldMismatch, quiet, &entity, Some(detail)));
                }
                Some(_) => {}
            }
        }

        for member in members.iter_mut() {
            let listed = fields.iter().any(|field| field.name == member.name);
            if !listed && !member.is_inner_class_declaration && !member.is_static() {
                member.forced_transient = true;
            }
        }
        Ok(())
    }

    /// A class implementing at least one remote interface.
    pub(super) fn implementation_type(&mut self, class: ClassId, quiet: bool) -> Attempt<TypeId> {
        if let Some(existing) = self.existing(class, |kind| matches!(kind, TypeKind::Implementation(_))) {
            return existing;
        }
        let name = self.model.qualified_name(class);
        if self.model.is_interface(class) {
            return Err(self.fail(Constraint::ImplementationNotClass, quiet, name));
        }
        if !self.implements(class, known::REMOTE)? {
            return Err(self.fail(Constraint::NoRemoteInterface, quiet, name));
        }
        let data = self.compound_data(class, TypeCode::IMPLEMENTATION | TypeCode::CLASS, |compound| {
            TypeKind::Implementation(ClassData::new(compound))
        })?;
        self.attempt(TypeKey::plain(name), data, |this, id| {
            this.init_parent(id, class)?;
            let interfaces = this.add_remote_interfaces(class, true, quiet)?;
            let has_remote = interfaces.iter().any(|&interface| {
                let data = this.pool.get(interface);
                data.is(TypeCode::REMOTE) || data.is(TypeCode::JAVA_RMI_REMOTE)
            });
            let mut methods = Vec::new();
            for &interface in &interfaces {
                this.copy_remote_methods(interface, class, &mut methods);
            }
            if !has_remote {
                return Err(this.fail(Constraint::NoRemoteInterface, quiet, name));
            }
            this.apply_impl_exceptions(class, &mut methods, quiet)?;
            let parts = CompoundParts {
                interfaces,
                methods,
                ..CompoundParts::default()
            };
            this.finish_compound(id, parts, quiet)
        })
    }

    /// Gather the methods of remote interface `interface` and everything it
    /// extends, merging redeclarations with exception narrowing.
    fn copy_remote_methods(&self, interface: TypeId, class: ClassId, methods: &mut Vec<Method>) {
        let data = self.pool.get(interface);
        if !matches!(data.kind, TypeKind::Remote(_)) {
            return;
        }
        for method in data.methods() {
            let mut copy = method.clone();
            copy.enclosing = class;
            match methods.iter().position(|existing| existing.same_signature(&copy)) {
                Some(index) => {
                    copy.merge_with(&methods[index], |sub, sup| self.is_subclass(sub, sup));
                    methods[index] = copy;
                }
                None => methods.push(copy),
            }
        }
        for &inherited in data.interfaces() {
            self.copy_remote_methods(inherited, class, methods);
        }
    }

    /// Take each method's implementation exceptions from the class's own
    /// matching declaration.
    fn apply_impl_exceptions(&mut self, class: ClassId, methods: &mut [Method], quiet: bool) -> Attempt<()> {
        let model = self.model;
        for def in model.members(class) {
            if def.kind != MemberKind::Method {
                continue;
            }
            let matching: Vec<usize> = methods
                .iter()
                .enumerate()
                .filter(|(_, method)| {
                    method.name == def.name
                        && method.arguments.len() == def.arguments.len()
                        && method
                            .arguments
                            .iter()
                            .zip(def.argument_types())
                            .all(|(&argument, ty)| self.pool.java_name(argument) == ty.type_string())
                })
                .map(|(index, _)| index)
                .collect();
            if matching.is_empty() {
                continue;
            }
            let exceptions = self.method_exceptions(def, quiet)?;
            for index in matching {
                methods[index].impl_exceptions.clone_from(&exceptions);
            }
        }
        Ok(())
    }

    /// Any other class, when non-conforming types are enabled.
    pub(super) fn nc_class(&mut self, class: ClassId) -> Attempt<TypeId> {
        if let Some(existing) = self.existing(class, |kind| matches!(kind, TypeKind::NcClass(_))) {
            return existing;
        }
        let name = self.model.qualified_name(class);
        if !self.options.parse_non_conforming {
            return Err(self.fail(Constraint::NonConformingDisabled, false, name));
        }
        let data = self.compound_data(
            class,
            TypeCode::NC_CLASS | TypeCode::CLASS | TypeCode::NON_CONFORMING,
            |compound| TypeKind::NcClass(ClassData::new(compound)),
        )?;
        self.attempt(TypeKey::plain(name), data, |this, id| {
            this.init_parent(id, class)?;
            let interfaces = this.add_non_remote_interfaces(class)?;
            let mut methods = this.add_all_methods(class, false, false)?;
            this.update_parent_class_methods(class, &mut methods, false)?;
            let members = this.add_all_members(class, false, false)?;
            let parts = CompoundParts {
                interfaces,
                methods,
                members,
            };
            this.finish_compound(id, parts, false)
        })
    }

    /// Classify the superclass of `class` in an EXTENDS context and record
    /// it on `id`.
    fn init_parent(&mut self, id: TypeId, class: ClassId) -> Attempt<()> {
        let model = self.model;
        let Some(parent) = self.lookup(model.superclass(class))? else {
            return Ok(());
        };
        self.stack.set_next_code(ContextCode::Extends);
        let parent_id = self.make_type(&JavaType::class(model.qualified_name(parent)))?;
        if let Some(data) = self.pool.get_mut(id).class_data_mut() {
            data.parent = Some(parent_id);
        }
        Ok(())
    }
}

