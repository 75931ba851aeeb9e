//! Special classes, special interfaces and arrays.
//!
//! Special types map to fixed IDL names instead of being derived from the
//! Java name:
//!
//! | Java                       | IDL                                |
//! |----------------------------|------------------------------------|
//! | `java.lang.String`         | `::CORBA::WStringValue`, or `wstring` for constants |
//! | `java.lang.Object`         | `::java::lang::_Object` (`any`)    |
//! | `java.io.Serializable`     | `::java::io::Serializable` (`any`) |
//! | `java.io.Externalizable`   | `::java::io::Externalizable` (`any`) |
//! | `java.rmi.Remote`          | `::java::rmi::Remote` (`Object`)   |
//! | `org.omg.CORBA.portable.IDLEntity` | `::org::omg::CORBA::portable::IDLEntity` (`any`) |
//! | `org.omg.CORBA.Object`     | `Object`                           |
//!
//! Other `org.omg.CORBA.Object` subinterfaces are CORBA objects with
//! ordinary names.

use idl_ir::{known, ClassId, ClassModel, JavaType};

use super::compound::CompoundParts;
use super::Classifier;
use crate::names::mangle::{qualified_name, sequence_name, strip_leading_underscore};
use crate::names::BOXED_RMI_MODULES;
use crate::repository_id;
use crate::{Attempt, CompoundFlags, Rejection, Status, TypeCode, TypeData, TypeId, TypeKey, TypeKind};

/// Fixed names of a special type.
struct FixedNames {
    code: TypeCode,
    idl_name: &'static str,
    modules: &'static [&'static str],
}

const fn fixed(code: TypeCode, idl_name: &'static str, modules: &'static [&'static str]) -> FixedNames {
    FixedNames {
        code,
        idl_name,
        modules,
    }
}

fn special_interface_names(name: &str) -> Option<FixedNames> {
    match name {
        known::REMOTE => Some(fixed(TypeCode::JAVA_RMI_REMOTE, "Remote", &["java", "rmi"])),
        known::SERIALIZABLE => Some(fixed(TypeCode::ANY, "Serializable", &["java", "io"])),
        known::EXTERNALIZABLE => Some(fixed(TypeCode::ANY, "Externalizable", &["java", "io"])),
        known::IDL_ENTITY => Some(fixed(
            TypeCode::ANY,
            "IDLEntity",
            &["org", "omg", "CORBA", "portable"],
        )),
        known::CORBA_OBJECT => Some(fixed(TypeCode::CORBA_OBJECT, "Object", &[])),
        _ => None,
    }
}

fn owned_modules(modules: &[&str]) -> Vec<String> {
    modules.iter().map(|&module| module.to_owned()).collect()
}

impl<M: ClassModel + ?Sized> Classifier<'_, M> {
    /// The special interface `class` maps to, if it is one.
    pub(super) fn special_interface(&mut self, class: ClassId) -> Attempt<Option<TypeId>> {
        let model = self.model;
        let name = model.qualified_name(class);
        let names = special_interface_names(name);
        if names.is_none() && !self.implements(class, known::CORBA_OBJECT)? {
            return Ok(None);
        }
        if let Some(existing) = self.existing(class, |kind| matches!(kind, TypeKind::SpecialInterface(_))) {
            return Ok(existing.ok());
        }

        let code = TypeCode::SPECIAL_INTERFACE | TypeCode::INTERFACE;
        let data = match names {
            Some(names) => {
                let flags = self.compound_flags(class)?;
                let modules = owned_modules(names.modules);
                let mut data = self.compound_record(
                    class,
                    code | names.code,
                    TypeKind::SpecialInterface,
                    flags,
                    names.idl_name.to_owned(),
                    modules,
                );
                data.repository_id = Some(if name == known::CORBA_OBJECT {
                    repository_id::CORBA_OBJECT.to_owned()
                } else {
                    let idl_entity = flags.contains(CompoundFlags::IDL_ENTITY);
                    let computed = repository_id::compound_id(model, class, idl_entity);
                    self.lookup(computed)?
                });
                data
            }
            None => self.compound_data(class, code | TypeCode::CORBA_OBJECT, TypeKind::SpecialInterface)?,
        };
        self.attempt(TypeKey::plain(name), data, |this, id| {
            this.finish_compound(id, CompoundParts::default(), false)
        })
        .map(Some)
    }

    /// The special class `class` maps to, if it is one.
    ///
    /// `String` is cached per context: constants map to `wstring`.
    pub(super) fn special_class(&mut self, class: ClassId) -> Attempt<Option<TypeId>> {
        let model = self.model;
        let name = model.qualified_name(class);
        let (key, names, repository_id) = match name {
            known::JAVA_LANG_STRING => {
                let constant = self.stack.is_constant();
                let names = if constant {
                    fixed(TypeCode::STRING, "wstring", &[])
                } else {
                    fixed(TypeCode::STRING, "WStringValue", &["CORBA"])
                };
                (TypeKey::in_context(name, constant), names, repository_id::WSTRING_VALUE)
            }
            known::JAVA_LANG_OBJECT => (
                TypeKey::plain(name),
                fixed(TypeCode::ANY, "_Object", &["java", "lang"]),
                repository_id::ANY,
            ),
            _ => return Ok(None),
        };
        if let Some(id) = self.pool.lookup(&key) {
            return Ok(matches!(self.pool.get(id).kind, TypeKind::SpecialClass(_)).then_some(id));
        }

        let flags = self.compound_flags(class)?;
        let mut data = self.compound_record(
            class,
            names.code | TypeCode::SPECIAL_CLASS | TypeCode::CLASS,
            TypeKind::SpecialClass,
            flags,
            names.idl_name.to_owned(),
            owned_modules(names.modules),
        );
        data.repository_id = Some(repository_id.to_owned());
        self.attempt(key, data, |_, _| Ok(())).map(Some)
    }

    /// A sequence of `element`, `dimension` deep.
    pub(super) fn array_type(&mut self, ty: &JavaType, element: &JavaType, dimension: u32) -> Attempt<TypeId> {
        let key = TypeKey::plain(ty.type_string());
        if let Some(id) = self.pool.lookup(&key) {
            return match self.pool.get(id).kind {
                TypeKind::Array { .. } => Ok(id),
                _ => Err(Rejection::NoMatch),
            };
        }
        let computed = repository_id::array_id(self.model, element, dimension);
        let repository_id = self.lookup(computed)?;
        let code = self.stack.next_code();
        let data = TypeData {
            code: TypeCode::ARRAY,
            // Element filled in once classified.
            kind: TypeKind::Array {
                element: TypeId::VOID,
                dimension,
            },
            java_name: ty.type_string(),
            idl_name: String::new(),
            modules: Vec::new(),
            qualified_idl_name: String::new(),
            repository_id: Some(repository_id),
            status: Status::Pending,
        };
        self.attempt(key, data, |this, id| {
            this.stack.set_next_code(code);
            let element_id = this.make_type(element)?;
            let element_data = this.pool.get(element_id);
            let idl_name = sequence_name(dimension, strip_leading_underscore(&element_data.idl_name));
            let mut modules = owned_modules(&BOXED_RMI_MODULES);
            modules.extend(element_data.modules.iter().cloned());

            let data = this.pool.get_mut(id);
            data.kind = TypeKind::Array {
                element: element_id,
                dimension,
            };
            data.qualified_idl_name = qualified_name(&modules, &idl_name);
            data.idl_name = idl_name;
            data.modules = modules;
            Ok(())
        })
    }
}

/// Whether `name` is one of the special types emitted as a typedef.
pub fn is_special_typedef(name: &str) -> bool {
    matches!(
        name,
        known::SERIALIZABLE
            | known::EXTERNALIZABLE
            | known::JAVA_LANG_OBJECT
            | known::REMOTE
            | known::IDL_ENTITY
    )
}

