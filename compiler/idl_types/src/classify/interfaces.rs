//! Remote, abstract and non-conforming interfaces.

use idl_diagnostic::Constraint;
use idl_ir::{known, ClassId, ClassModel};

use super::compound::CompoundParts;
use super::Classifier;
use crate::{Attempt, ContextCode, Rejection, TypeCode, TypeId, TypeKey, TypeKind};

impl<M: ClassModel + ?Sized> Classifier<'_, M> {
    /// An interface extending `java.rmi.Remote` whose methods and constants
    /// all conform.
    pub(super) fn remote_type(&mut self, class: ClassId, quiet: bool) -> Attempt<TypeId> {
        if let Some(existing) = self.existing(class, |kind| matches!(kind, TypeKind::Remote(_))) {
            return existing;
        }
        let name = self.model.qualified_name(class);
        if !self.model.is_interface(class) {
            return Err(self.fail(Constraint::RemoteNotInterface, quiet, name));
        }
        if !self.implements(class, known::REMOTE)? {
            return Err(self.fail(Constraint::NotRemote, quiet, name));
        }
        let data = self.compound_data(
            class,
            TypeCode::REMOTE | TypeCode::INTERFACE,
            TypeKind::Remote,
        )?;
        self.attempt(TypeKey::plain(name), data, |this, id| {
            let interfaces = this.add_remote_interfaces(class, false, quiet)?;
            let members = this.add_all_members(class, true, quiet)?;
            let methods = this.add_all_methods(class, true, quiet)?;
            let checks: Vec<Attempt<()>> = methods
                .iter()
                .map(|method| this.check_remote_method(method, quiet))
                .collect();
            checks.into_iter().collect::<Attempt<Vec<()>>>()?;
            let parts = CompoundParts {
                interfaces,
                methods,
                members,
            };
            this.finish_compound(id, parts, quiet)
        })
    }

    /// A non-remote interface whose methods all conform to the remote
    /// method rules. Abstract interfaces map no constants and no
    /// inherited interfaces.
    pub(super) fn abstract_type(&mut self, class: ClassId, quiet: bool) -> Attempt<TypeId> {
        if let Some(existing) = self.existing(class, |kind| matches!(kind, TypeKind::Abstract(_))) {
            return existing;
        }
        let name = self.model.qualified_name(class);
        if !self.model.is_interface(class) {
            return Err(self.fail(Constraint::AbstractNotInterface, quiet, name));
        }
        if self.implements(class, known::REMOTE)? {
            return Err(self.fail(Constraint::AbstractIsRemote, quiet, name));
        }
        let data = self.compound_data(
            class,
            TypeCode::ABSTRACT | TypeCode::INTERFACE,
            TypeKind::Abstract,
        )?;
        self.attempt(TypeKey::plain(name), data, |this, id| {
            let methods = this.add_all_methods(class, true, quiet)?;
            let checks: Vec<Attempt<()>> = methods
                .iter()
                .map(|method| this.check_remote_method(method, true))
                .collect();
            checks.into_iter().collect::<Attempt<Vec<()>>>()?;
            let parts = CompoundParts {
                methods,
                ..CompoundParts::default()
            };
            this.finish_compound(id, parts, quiet)
        })
    }

    /// Any other interface, when non-conforming types are enabled.
    pub(super) fn nc_interface(&mut self, class: ClassId) -> Attempt<TypeId> {
        if let Some(existing) = self.existing(class, |kind| matches!(kind, TypeKind::NcInterface(_))) {
            return existing;
        }
        let name = self.model.qualified_name(class);
        if !self.options.parse_non_conforming {
            return Err(self.fail(Constraint::NonConformingDisabled, false, name));
        }
        let data = self.compound_data(
            class,
            TypeCode::NC_INTERFACE | TypeCode::INTERFACE | TypeCode::NON_CONFORMING,
            TypeKind::NcInterface,
        )?;
        self.attempt(TypeKey::plain(name), data, |this, id| {
            let interfaces = this.add_non_remote_interfaces(class)?;
            let methods = this.add_all_methods(class, false, false)?;
            let members = this.add_conforming_constants(class, false)?;
            let parts = CompoundParts {
                interfaces,
                methods,
                members,
            };
            this.finish_compound(id, parts, false)
        })
    }

    /// Map the interfaces `class` directly implements or extends, for
    /// remote interfaces and implementations.
    ///
    /// Each is special, remote, abstract or (when `allow_non_conforming`)
    /// non-conforming; any other interface fails the whole set.
    pub(super) fn add_remote_interfaces(
        &mut self,
        class: ClassId,
        allow_non_conforming: bool,
        quiet: bool,
    ) -> Attempt<Vec<TypeId>> {
        let model = self.model;
        let declared = self.lookup(model.interfaces(class))?;
        let mut interfaces = Vec::with_capacity(declared.len());
        for interface in declared {
            self.stack.set_next_code(ContextCode::Implements);
            let mapped = match self.special_interface(interface)? {
                Some(id) => Ok(id),
                None if self.implements(interface, known::REMOTE)? => self.remote_type(interface, false),
                None => match self.abstract_type(interface, true) {
                    Err(Rejection::NoMatch) if allow_non_conforming => self.nc_interface(interface),
                    other => other,
                },
            };
            match mapped {
                Ok(id) => {
                    if !interfaces.contains(&id) {
                        interfaces.push(id);
                    }
                }
                Err(Rejection::NoMatch) => {
                    let entity = model.qualified_name(interface);
                    return Err(self.fail(Constraint::InvalidInterface, quiet, entity));
                }
                Err(Rejection::Fatal) => return Err(Rejection::Fatal),
            }
        }
        Ok(interfaces)
    }

    /// Map the interfaces of a value type or non-conforming type: special,
    /// else abstract, else non-conforming.
    pub(super) fn add_non_remote_interfaces(&mut self, class: ClassId) -> Attempt<Vec<TypeId>> {
        let model = self.model;
        let declared = self.lookup(model.interfaces(class))?;
        let mut interfaces = Vec::with_capacity(declared.len());
        for interface in declared {
            self.stack.set_next_code(ContextCode::Implements);
            let mapped = match self.special_interface(interface)? {
                Some(id) => Ok(id),
                None => match self.abstract_type(interface, true) {
                    Err(Rejection::NoMatch) => self.nc_interface(interface),
                    other => other,
                },
            };
            match mapped {
                Ok(id) => {
                    if !interfaces.contains(&id) {
                        interfaces.push(id);
                    }
                }
                Err(Rejection::NoMatch) => {
                    let entity = model.qualified_name(interface);
                    return Err(self.fail(Constraint::InvalidInterface, false, entity));
                }
                Err(Rejection::Fatal) => return Err(Rejection::Fatal),
            }
        }
        Ok(interfaces)
    }
}
