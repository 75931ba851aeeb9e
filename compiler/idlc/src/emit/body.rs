//! Definitions of each kind of output file.

use std::collections::BTreeMap;

use idl_ir::{known, ClassModel};
use idl_types::names::mangle::strip_leading_underscore;
use idl_types::{CompoundFlags, Member, Method, TypeCode, TypeId, TypeKind};

use super::IdlEmitter;
use crate::ReferenceSet;

impl<M: ClassModel + ?Sized> IdlEmitter<'_, M> {
    /// References of the declarations written into `id`'s own file, with
    /// thrown types kept apart.
    fn type_references(&self, id: TypeId) -> (ReferenceSet, BTreeMap<String, TypeId>) {
        let mut references = ReferenceSet::default();
        let mut exceptions = BTreeMap::new();
        let methods = self.ctx.idl_methods(id);
        references.add_method_references(self.ctx, &methods, Some(&mut exceptions));
        let members = self.ctx.data_members(id);
        references.add_member_references(self.ctx, &members);
        (references, exceptions)
    }

    /// Remote or abstract interface.
    pub(super) fn write_remote(&mut self, id: TypeId) {
        let data = self.ctx.get(id);
        let constants = self.ctx.constants(id);
        let methods = self.ctx.idl_methods(id);
        let inheritance = self.ctx.idl_interfaces(id);
        let (mut references, exceptions) = self.type_references(id);

        self.prolog(id, &mut references, &exceptions, &inheritance);
        self.module_open(id);
        self.out.newline();
        self.out.indent();
        if matches!(data.kind, TypeKind::Abstract(_)) {
            self.out.text("abstract ");
        }
        self.out.text(&format!("interface {}", data.idl_name));
        self.inherits(&inheritance, false);
        self.out.line(" {");
        if !constants.is_empty() || !methods.is_empty() {
            self.out.newline();
            self.out.indent();
            for constant in constants {
                self.constant(constant);
            }
            for method in methods {
                self.method(method);
            }
            self.out.outdent();
            self.out.newline();
        }
        self.out.line("};");
        self.out.outdent();
        self.out.newline();
        self.pragma_id(id);
        self.out.newline();
        self.module_close(id);
        self.epilog(&references);
    }

    /// Conforming value type. Primitive state comes before the rest.
    pub(super) fn write_value(&mut self, id: TypeId) {
        let data = self.ctx.get(id);
        let state = self.ctx.data_members(id);
        let constants = self.ctx.constants(id);
        let methods = self.ctx.idl_methods(id);
        let inheritance = self.ctx.inheritance(id);
        let (mut references, exceptions) = self.type_references(id);

        self.prolog(id, &mut references, &exceptions, &inheritance);
        self.module_open(id);
        self.out.newline();
        self.out.indent();
        if data.is_custom() {
            self.out.text("custom ");
        }
        self.out.text(&format!("valuetype {}", data.idl_name));
        self.inherits(&inheritance, true);
        self.out.line(" {");
        if !constants.is_empty() || !state.is_empty() || !methods.is_empty() {
            self.out.newline();
            self.out.indent();
            for constant in constants {
                self.constant(constant);
            }
            let (primitive, other): (Vec<&Member>, Vec<&Member>) = state
                .into_iter()
                .partition(|member| self.ctx.get(member.ty).is(TypeCode::PRIMITIVE));
            for member in primitive.into_iter().chain(other) {
                self.data_member(member);
            }
            for method in methods {
                self.method(method);
            }
            self.out.outdent();
            self.out.newline();
        }
        self.out.line("};");
        self.out.outdent();
        self.out.newline();
        self.pragma_id(id);
        self.out.newline();
        self.module_close(id);
        self.epilog(&references);
    }

    /// Non-conforming class or interface, as an abstract valuetype.
    pub(super) fn write_nc_type(&mut self, id: TypeId) {
        let data = self.ctx.get(id);
        let constants = self.ctx.constants(id);
        let methods = self.ctx.idl_methods(id);
        let inheritance = self.ctx.inheritance(id);
        let (mut references, exceptions) = self.type_references(id);

        self.prolog(id, &mut references, &exceptions, &inheritance);
        self.module_open(id);
        self.out.newline();
        self.out.indent();
        self.out.text(&format!("abstract valuetype {}", data.idl_name));
        self.inherits(&inheritance, false);
        self.out.line(" {");
        if !constants.is_empty() || !methods.is_empty() {
            self.out.newline();
            self.out.indent();
            for constant in constants {
                self.constant(constant);
            }
            for method in methods {
                self.method(method);
            }
            self.out.outdent();
            self.out.newline();
        }
        self.out.line("};");
        self.out.outdent();
        self.out.newline();
        self.module_close(id);
        self.epilog(&references);
    }

    /// Implementation joining several remote interfaces. Its operations
    /// are all inherited.
    pub(super) fn write_implementation(&mut self, id: TypeId) {
        let data = self.ctx.get(id);
        let inheritance = self.ctx.idl_interfaces(id);

        self.banner(id, 0, false);
        for &inherited in &inheritance {
            self.include(inherited, 0, false);
        }
        self.ifndef(id, 0, false, false);
        self.include_orb();
        self.module_open(id);
        self.out.newline();
        self.out.indent();
        self.out.text(&format!("interface {}", data.idl_name));
        self.inherits(&inheritance, false);
        self.out.line(" {");
        self.out.line("};");
        self.out.outdent();
        self.out.newline();
        self.module_close(id);
        self.epilog(&ReferenceSet::default());
    }

    /// Fixed typedef of a special type.
    pub(super) fn write_special(&mut self, id: TypeId) {
        let typedef = match self.ctx.get(id).java_name.as_str() {
            known::SERIALIZABLE => "typedef any Serializable;",
            known::EXTERNALIZABLE => "typedef any Externalizable;",
            known::JAVA_LANG_OBJECT => "typedef any _Object;",
            known::REMOTE => "typedef Object Remote;",
            known::IDL_ENTITY => "typedef any IDLEntity;",
            _ => return,
        };
        self.banner(id, 0, false);
        self.ifndef(id, 0, false, false);
        self.module_open(id);
        self.out.newline();
        self.out.indent();
        self.out.line(typedef);
        self.out.outdent();
        self.out.newline();
        self.module_close(id);
        self.endif();
    }

    /// One depth of a sequence, boxed as `valuetype seqN_X sequence<...>`.
    pub(super) fn write_sequence(&mut self, id: TypeId, dimension: u32) {
        let data = self.ctx.get(id);
        let Some((element, _)) = data.array() else {
            return;
        };
        let element_data = self.ctx.get(element);
        let element_name = strip_leading_underscore(&element_data.idl_name).replace(' ', "_");
        let sequence = format!("seq{dimension}_{element_name}");
        let is_string = element_data.java_name == known::JAVA_LANG_STRING;
        let is_object = self.ctx.is_corba_object_root(element);
        let is_special = self.ctx.is_special_reference(element);
        let from_idl = element_data
            .compound()
            .is_some_and(|compound| compound.is_idl_entity() || compound.is_corba_object());
        let forward_element = element_data.is_compound()
            && !is_special
            && dimension == 1
            && !from_idl
            && !is_object
            && !is_string;

        // Depths above 1 repeat the leading bracket run of the deepest id.
        let repository_id = data.repository_id.as_deref().unwrap_or_default();
        let repository_id = match (repository_id.find('['), repository_id.rfind('[')) {
            (Some(first), Some(last)) => format!(
                "{}{}{}",
                &repository_id[..first],
                "[".repeat(dimension as usize),
                &repository_id[last + 1..]
            ),
            _ => repository_id.to_owned(),
        };

        self.banner(id, dimension, false);
        if dimension == 1 && is_string {
            self.include_orb();
        }
        if !(dimension == 1 && is_object) && (is_special || dimension > 1 || from_idl) {
            self.include(id, dimension - 1, false);
        }
        self.ifndef(id, dimension, false, false);
        if forward_element {
            self.forward_reference(element);
        }
        self.module_open(id);
        self.out.newline();
        self.out.indent();
        let content = if dimension == 1 {
            self.ctx.qualified_idl_name(element)
        } else {
            format!("seq{}_{element_name}", dimension - 1)
        };
        self.out.line(&format!("valuetype {sequence} sequence<{content}>;"));
        self.out.outdent();
        self.out.newline();
        self.out.line(&format!("#pragma ID {sequence} \"{repository_id}\""));
        self.out.newline();
        self.module_close(id);
        if forward_element {
            self.include(id, 0, false);
        }
        self.endif();
    }

    /// Valuetype boxing an `IDLEntity` defined in IDL elsewhere.
    pub(super) fn write_boxed_idl(&mut self, id: TypeId) {
        let data = self.ctx.get(id);
        let boxed_modules = self.ctx.idl_module_names(id);
        let modules = boxed_modules.get(3..).unwrap_or_default();
        let name = strip_leading_underscore(&data.idl_name);

        self.banner(id, 0, false);
        self.include_file(id, modules, name);
        self.ifndef(id, 0, false, false);
        self.module_open(id);
        self.out.newline();
        self.out.indent();
        let mut boxed = format!("valuetype {name} ");
        for module in modules {
            boxed.push_str("::");
            boxed.push_str(module);
        }
        boxed.push_str("::");
        boxed.push_str(name);
        boxed.push(';');
        self.out.line(&boxed);
        self.out.outdent();
        self.out.newline();
        self.pragma_id(id);
        self.out.newline();
        self.module_close(id);
        self.endif();
    }

    /// IDL exception wrapping an exception value type.
    pub(super) fn write_exception(&mut self, id: TypeId) {
        let data = self.ctx.get(id);
        let Some(exception_name) = data.compound().and_then(|compound| compound.exception_name.as_deref())
        else {
            return;
        };

        self.banner(id, 0, true);
        self.ifndef(id, 0, true, false);
        self.forward_reference(id);
        self.module_open(id);
        self.out.newline();
        self.out.indent();
        self.out.line(&format!("exception {exception_name} {{"));
        self.out.newline();
        self.out.indent();
        self.out.line(&format!("{} value;", data.idl_name));
        self.out.outdent();
        self.out.newline();
        self.out.line("};");
        self.out.outdent();
        self.out.newline();
        self.module_close(id);
        self.include(id, 0, false);
        self.endif();
    }

    // === Declarations ===

    /// `: bases` and, for valuetypes, `supports` abstract interfaces.
    /// A class parent always comes first.
    fn inherits(&mut self, inheritance: &[TypeId], for_valuetype: bool) {
        let ctx = self.ctx;
        let (supports, bases): (Vec<TypeId>, Vec<TypeId>) = inheritance
            .iter()
            .copied()
            .partition(|&inherited| for_valuetype && matches!(ctx.get(inherited).kind, TypeKind::Abstract(_)));
        let names = |types: &[TypeId]| {
            types
                .iter()
                .map(|&inherited| ctx.qualified_idl_name(inherited))
                .collect::<Vec<_>>()
                .join(", ")
        };
        if !bases.is_empty() {
            self.out.text(&format!(": {}", names(&bases)));
        }
        if !supports.is_empty() {
            self.out.text(&format!(" supports {}", names(&supports)));
        }
    }

    fn constant(&mut self, constant: &Member) {
        let ty = self.ctx.qualified_idl_name(constant.ty);
        let value = constant.value.as_deref().unwrap_or_default();
        self.out.line(&format!("const {ty} {} = {value};", constant.idl_name));
    }

    fn data_member(&mut self, member: &Member) {
        if member.is_inner_class_declaration {
            return;
        }
        let visibility = if member.is_public() { "public" } else { "private" };
        let ty = self.ctx.qualified_idl_name(member.ty);
        self.out.line(&format!("{visibility} {ty} {};", member.idl_name));
    }

    /// Getters carry the attribute; setters are folded into them.
    fn attribute(&mut self, method: &Method) {
        if !method.attribute_kind.is_getter() {
            return;
        }
        if !method.attribute_kind.is_read_write() {
            self.out.text("readonly ");
        }
        let ty = self.ctx.qualified_idl_name(method.return_type);
        let name = method.attribute_name.as_deref().unwrap_or(&method.name);
        self.out.line(&format!("attribute {ty} {name};"));
    }

    fn method(&mut self, method: &Method) {
        if method.is_attribute() {
            self.attribute(method);
            return;
        }
        if method.is_constructor {
            if self.ctx.config.factory {
                self.out.text(&format!("factory {}(", method.idl_name));
            } else {
                self.out.text("init(");
            }
        } else {
            let ty = self.ctx.qualified_idl_name(method.return_type);
            self.out.text(&format!("{ty} {}(", method.idl_name));
        }

        self.out.indent();
        for (index, (&argument, name)) in method.arguments.iter().zip(&method.argument_names).enumerate() {
            if index > 0 {
                self.out.line(",");
            } else {
                self.out.newline();
            }
            let ty = self.ctx.qualified_idl_name(argument);
            self.out.text(&format!("in {ty} {name}"));
        }
        self.out.outdent();
        self.out.text(" )");

        let exceptions = self.ctx.idl_exceptions(method);
        if !exceptions.is_empty() {
            self.out.line(" raises (");
            self.out.indent();
            for (index, &exception) in exceptions.iter().enumerate() {
                if index > 0 {
                    self.out.line(",");
                }
                let raised = self.raised_name(exception);
                self.out.text(&raised);
            }
            self.out.outdent();
            self.out.text(" )");
        }
        self.out.line(";");
    }

    /// Name of the IDL exception raised for thrown type `exception`.
    fn raised_name(&self, exception: TypeId) -> String {
        let data = self.ctx.get(exception);
        let Some(compound) = data.compound() else {
            return data.idl_name.clone();
        };
        if compound.is_idl_entity() && compound.is_exception() {
            if compound.has(CompoundFlags::CORBA_USER_EXCEPTION) {
                return "::org::omg::CORBA::UserEx".to_owned();
            }
            let mut name = String::new();
            for module in self.ctx.idl_module_names(exception) {
                name.push_str("::");
                name.push_str(&module);
            }
            name.push_str("::");
            name.push_str(&self.ctx.simple_name(exception));
            return name;
        }
        let qualified = compound.qualified_exception_name.as_deref().unwrap_or(&data.qualified_idl_name);
        if data.modules.is_empty() {
            qualified.to_owned()
        } else {
            format!("::{qualified}")
        }
    }
}
