//! IDL text for one output file.
//!
//! Every file follows the same frame:
//!
//! ```text
//! banner
//! forward declarations and #includes the body depends on
//! #ifndef / #define guard
//! module nesting { body }
//! #includes of types only forward-declared above
//! #endif
//! ```
//!
//! The body depends on the [`OutputKind`] and on the type's category; see
//! [`IdlEmitter::emit`].

mod body;
mod writer;

use std::collections::BTreeMap;

use idl_ir::{known, ClassModel};
use idl_types::names::mangle::{sequence_name, strip_leading_underscore};
use idl_types::{TypeCode, TypeId, TypeKind};

use crate::{IdlContext, OutputKind, OutputType, ReferenceSet};

pub use writer::IdlWriter;

/// Renders output files of one classified pool.
pub struct IdlEmitter<'a, M: ClassModel + ?Sized> {
    ctx: IdlContext<'a, M>,
    out: IdlWriter,
}

impl<'a, M: ClassModel + ?Sized> IdlEmitter<'a, M> {
    pub fn new(ctx: IdlContext<'a, M>) -> Self {
        IdlEmitter {
            ctx,
            out: IdlWriter::new(),
        }
    }

    /// Text of `output`, or `None` for a type that has no IDL of its own.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %output))]
    pub fn emit(mut self, output: &OutputType) -> Option<String> {
        let id = output.ty;
        let data = self.ctx.get(id);
        match output.kind {
            OutputKind::Sequence { dimension } => self.write_sequence(id, dimension),
            OutputKind::Exception => self.write_exception(id),
            OutputKind::Type if self.ctx.is_special_reference(id) => self.write_special(id),
            OutputKind::Type if data.compound().is_some_and(|c| c.is_idl_entity() && c.is_boxed()) => {
                self.write_boxed_idl(id);
            }
            OutputKind::Type => match data.kind {
                TypeKind::Implementation(_) => self.write_implementation(id),
                TypeKind::NcClass(_) | TypeKind::NcInterface(_) => self.write_nc_type(id),
                TypeKind::Remote(_) | TypeKind::Abstract(_) => self.write_remote(id),
                TypeKind::Value(_) => self.write_value(id),
                _ => {
                    tracing::debug!(kind = data.kind_name(), "no IDL body");
                    return None;
                }
            },
        }
        Some(self.out.finish())
    }

    // === Frame ===

    /// Module path and file name used by the banner and guards.
    fn label(&self, id: TypeId, dimension: u32, exception: bool) -> (Vec<String>, String) {
        let data = self.ctx.get(id);
        let modules = self.ctx.idl_module_names(id);
        let name = match (data.array(), data.compound()) {
            (Some((element, _)), _) if dimension > 0 => {
                sequence_name(dimension, strip_leading_underscore(&self.ctx.get(element).idl_name))
            }
            (_, Some(compound)) if exception && data.is_class() => {
                let exception_name = compound.exception_name.as_deref().unwrap_or(&data.idl_name);
                strip_leading_underscore(exception_name).to_owned()
            }
            _ => strip_leading_underscore(&data.idl_name).to_owned(),
        };
        (modules, name)
    }

    fn banner(&mut self, id: TypeId, dimension: u32, exception: bool) {
        let (modules, name) = self.label(id, dimension, exception);
        self.out.line("/**");
        let mut path = String::from(" * ");
        for module in &modules {
            path.push_str(module);
            path.push('/');
        }
        path.push_str(&name);
        path.push_str(".idl");
        self.out.line(&path);
        self.out.line(" * Generated by idlc. Do not edit");
        self.out.line(" */");
        self.out.newline();
    }

    /// `#ifndef` guard; a forward declaration's guard has no `#define`.
    fn ifndef(&mut self, id: TypeId, dimension: u32, exception: bool, forward: bool) {
        let (modules, name) = self.label(id, dimension, exception);
        let mut guard = String::from("__");
        for module in &modules {
            guard.push_str(module);
            guard.push('_');
        }
        guard.push_str(&name);
        guard.push_str("__");
        self.out.newline();
        self.out.line(&format!("#ifndef {guard}"));
        if !forward {
            self.out.line(&format!("#define {guard}"));
            self.out.newline();
        }
    }

    fn endif(&mut self) {
        self.out.line("#endif");
        self.out.newline();
    }

    fn module_open(&mut self, id: TypeId) {
        self.out.newline();
        for module in self.ctx.idl_module_names(id) {
            self.out.line(&format!("module {module} {{"));
        }
    }

    fn module_close(&mut self, id: TypeId) {
        for _ in self.ctx.idl_module_names(id) {
            self.out.line("};");
        }
        self.out.newline();
    }

    fn include_orb(&mut self) {
        self.out.line("#include \"orb.idl\"");
    }

    fn pragma_id(&mut self, id: TypeId) {
        let data = self.ctx.get(id);
        let repository_id = match data.compound() {
            Some(compound) if compound.is_boxed() => {
                let modules = self.ctx.idl_module_names(id);
                idl_types::repository_id::boxed_idl_id(modules.get(3..).unwrap_or_default(), &data.idl_name)
            }
            _ => data.repository_id.clone().unwrap_or_default(),
        };
        self.out.line(&format!("#pragma ID {} \"{repository_id}\"", data.idl_name));
    }

    // === Includes ===

    /// `#include` for `id`. A sequence names its depth; depth zero includes
    /// the element instead. `thrown` selects the exception file of
    /// exception classes.
    fn include(&mut self, id: TypeId, dimension: u32, thrown: bool) {
        let data = self.ctx.get(id);
        if let Some(compound) = data.compound() {
            if data.java_name == known::JAVA_LANG_STRING {
                self.include_orb();
                return;
            }
            if self.ctx.is_corba_object_root(id) {
                return;
            }
            let modules = self.ctx.idl_module_names(id);
            let exception_name = || {
                strip_leading_underscore(compound.exception_name.as_deref().unwrap_or(&data.idl_name)).to_owned()
            };
            let name = if !compound.is_exception() {
                strip_leading_underscore(&data.idl_name).to_owned()
            } else if compound.is_idl_entity() {
                if !compound.has(idl_types::CompoundFlags::CORBA_USER_EXCEPTION) {
                    self.ctx.simple_name(id)
                } else if thrown {
                    exception_name()
                } else {
                    strip_leading_underscore(&data.idl_name).to_owned()
                }
            } else if thrown {
                exception_name()
            } else {
                strip_leading_underscore(&data.idl_name).to_owned()
            };
            self.include_file(id, &modules, &name);
            return;
        }

        let Some((element, _)) = data.array() else {
            return;
        };
        if dimension > 0 {
            let modules = self.ctx.idl_module_names(id);
            let name = sequence_name(dimension, strip_leading_underscore(&self.ctx.get(element).idl_name));
            self.include_file(id, &modules, &name);
        } else if self.ctx.get(element).is_compound() {
            let modules = self.ctx.idl_module_names(element);
            let name = strip_leading_underscore(&self.ctx.get(element).idl_name).to_owned();
            self.include_file(element, &modules, &name);
        }
    }

    /// `#include "m1/m2/name.idl"`, unless an `-idlFile` remap names the
    /// file of an `IDLEntity`.
    fn include_file(&mut self, id: TypeId, modules: &[String], name: &str) {
        let data = self.ctx.get(id);
        if data.compound().is_some_and(|compound| compound.is_idl_entity()) {
            let remapped = self
                .ctx
                .config
                .idl_file_remap
                .iter()
                .filter(|(from, _)| data.java_name.starts_with(from.as_str()))
                .max_by_key(|(from, _)| from.len());
            if let Some((_, to)) = remapped {
                self.out.line(&format!("#include \"{to}\""));
                return;
            }
        }
        let mut line = String::from("#include \"");
        for module in modules {
            line.push_str(module);
            line.push('/');
        }
        line.push_str(name);
        line.push_str(".idl\"");
        self.out.line(&line);
    }

    // === Forward declarations ===

    /// Keyword introducing a declaration of `id`, with a trailing space.
    fn declaration_keyword(&self, id: TypeId) -> &'static str {
        let data = self.ctx.get(id);
        match data.kind {
            TypeKind::NcClass(_) | TypeKind::NcInterface(_) => "abstract valuetype ",
            TypeKind::Abstract(_) => "abstract interface ",
            TypeKind::Value(_) => "valuetype ",
            TypeKind::Remote(_) => "interface ",
            _ if data.is(TypeCode::CORBA_OBJECT) => "interface ",
            _ => "",
        }
    }

    fn forward_reference(&mut self, id: TypeId) {
        if self.ctx.is_corba_object_root(id) {
            return;
        }
        self.ifndef(id, 0, false, true);
        self.module_open(id);
        self.out.newline();
        self.out.indent();
        let keyword = self.declaration_keyword(id);
        self.out.text(keyword);
        self.out.line(&format!("{};", self.ctx.get(id).idl_name));
        self.out.outdent();
        self.out.newline();
        self.module_close(id);
        self.endif();
    }

    // === Prolog and epilog ===

    /// Everything before the module nesting of a compound type's file.
    ///
    /// `IDLEntity` references are included here and leave `references`;
    /// the rest are forward-declared now and included by
    /// [`Self::epilog`].
    fn prolog(
        &mut self,
        id: TypeId,
        references: &mut ReferenceSet,
        exceptions: &BTreeMap<String, TypeId>,
        inheritance: &[TypeId],
    ) {
        self.banner(id, 0, false);

        let is_entity = |ctx: &IdlContext<'a, M>, reference: TypeId| {
            ctx.compound(reference).is_some_and(|compound| compound.is_idl_entity())
        };
        let forward: Vec<TypeId> = references
            .compounds
            .values()
            .copied()
            .filter(|&reference| !is_entity(&self.ctx, reference))
            .collect();
        for reference in forward {
            self.forward_reference(reference);
        }

        for &exception in exceptions.values() {
            self.include(exception, 0, true);
        }
        for &inherited in inheritance {
            self.include(inherited, 0, false);
        }
        let specials: Vec<TypeId> = references.specials.values().copied().collect();
        for special in specials {
            self.include(special, 0, false);
        }
        let arrays: Vec<TypeId> = references.arrays.values().copied().collect();
        for array in arrays {
            let dimension = self.ctx.get(array).array().map_or(0, |(_, dimension)| dimension);
            self.include(array, dimension, false);
        }

        let ctx = self.ctx;
        let entities: Vec<TypeId> = references
            .compounds
            .values()
            .copied()
            .filter(|&reference| is_entity(&ctx, reference))
            .collect();
        for entity in entities {
            self.include(entity, 0, false);
            references.compounds.remove(&ctx.get(entity).java_name);
        }

        self.include_orb();
        self.ifndef(id, 0, false, false);
    }

    fn epilog(&mut self, references: &ReferenceSet) {
        let remaining: Vec<TypeId> = references.compounds.values().copied().collect();
        for reference in remaining {
            self.include(reference, 0, false);
        }
        self.endif();
    }
}

impl<M: ClassModel + ?Sized> IdlContext<'_, M> {
    /// Text of one output file; see [`IdlEmitter::emit`].
    pub fn emit(&self, output: &OutputType) -> Option<String> {
        IdlEmitter::new(*self).emit(output)
    }
}

#[cfg(test)]
mod tests;
