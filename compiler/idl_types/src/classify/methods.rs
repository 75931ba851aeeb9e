//! Method records and method-set construction.

use idl_diagnostic::Constraint;
use idl_ir::{known, ClassId, ClassModel, MemberDef};
use smallvec::SmallVec;

use super::Classifier;
use crate::{AttributeKind, Attempt, ContextCode, FrameSubject, Method, Rejection, TypeId};

/// Thrown types a remote method must declare one of.
const REMOTE_THROWS: [&str; 4] = [
    known::REMOTE_EXCEPTION,
    known::IO_EXCEPTION,
    known::EXCEPTION,
    known::THROWABLE,
];

/// Java spelling of a declaration's signature, e.g. `find(int, java.lang.String)`.
fn declaration_signature(def: &MemberDef) -> String {
    let arguments: Vec<String> = def.argument_types().map(ToString::to_string).collect();
    format!("{}({})", def.name, arguments.join(", "))
}

/// Same exceptions, ignoring order and repetition.
fn same_exception_set(a: &[TypeId], b: &[TypeId]) -> bool {
    a.iter().all(|exception| b.contains(exception)) && b.iter().all(|exception| a.contains(exception))
}

impl<M: ClassModel + ?Sized> Classifier<'_, M> {
    /// Classify the signature of `def`, declared by `declared_by`, as a
    /// method of `enclosing`.
    pub(super) fn new_method(
        &mut self,
        enclosing: ClassId,
        declared_by: ClassId,
        def: &MemberDef,
        quiet: bool,
    ) -> Attempt<Method> {
        let signature = format!(
            "{}.{}",
            self.model.qualified_name(declared_by),
            declaration_signature(def)
        );
        self.stack.set_next_code(ContextCode::Method);
        self.stack.push(FrameSubject::Method(signature.clone()));
        let result = self.method_signature(enclosing, declared_by, def, &signature, quiet);
        self.stack.pop(result.is_ok());
        result
    }

    fn method_signature(
        &mut self,
        enclosing: ClassId,
        declared_by: ClassId,
        def: &MemberDef,
        signature: &str,
        quiet: bool,
    ) -> Attempt<Method> {
        let return_type = if def.is_constructor() || def.ty.is_void() {
            TypeId::VOID
        } else {
            self.stack.set_next_code(ContextCode::MethodReturn);
            match self.make_type(&def.ty) {
                Ok(id) if self.is_implementation(id) => {
                    let cause = self.fail(Constraint::ImplementationInSignature, quiet, signature);
                    return Err(self.escalate(cause, Constraint::InvalidReturnType, quiet, signature));
                }
                Ok(id) => id,
                Err(cause) => {
                    return Err(self.escalate(cause, Constraint::InvalidReturnType, quiet, signature))
                }
            }
        };

        let mut arguments = SmallVec::with_capacity(def.arguments.len());
        for argument in &def.arguments {
            self.stack.set_next_code(ContextCode::MethodArgument);
            match self.make_type(&argument.ty) {
                Ok(id) if self.is_implementation(id) => {
                    return Err(self.fail(Constraint::ImplementationInSignature, quiet, signature));
                }
                Ok(id) => arguments.push(id),
                Err(_) => return Err(self.fail(Constraint::InvalidArgumentType, false, signature)),
            }
        }
        let argument_names = def
            .arguments
            .iter()
            .enumerate()
            .map(|(index, argument)| argument.name.clone().unwrap_or_else(|| format!("arg{index}")))
            .collect();

        let exceptions = self.method_exceptions(def, quiet)?;
        Ok(Method {
            name: def.name.clone(),
            enclosing,
            declared_by,
            modifiers: def.modifiers,
            is_constructor: def.is_constructor(),
            return_type,
            arguments,
            argument_names,
            impl_exceptions: exceptions.clone(),
            exceptions,
            attribute_kind: AttributeKind::None,
            attribute_name: None,
            attribute_pair: None,
            idl_name: String::new(),
        })
    }

    /// Classify the thrown types of `def` as value types, dropping
    /// repeats.
    pub(super) fn method_exceptions(&mut self, def: &MemberDef, quiet: bool) -> Attempt<Vec<TypeId>> {
        let model = self.model;
        let mut exceptions = Vec::with_capacity(def.exceptions.len());
        for name in &def.exceptions {
            self.stack.set_next_code(ContextCode::MethodException);
            let class = self.find_class(name)?;
            if model.is_interface(class) {
                return Err(self.fail(Constraint::ExceptionNotClass, false, name));
            }
            let id = match self.value_type(class, false) {
                Ok(id) => id,
                Err(Rejection::Fatal) => return Err(Rejection::Fatal),
                Err(Rejection::NoMatch) => {
                    return Err(self.fail(Constraint::InvalidException, quiet, name));
                }
            };
            if !exceptions.contains(&id) {
                exceptions.push(id);
            }
        }
        Ok(exceptions)
    }

    /// Every non-private method of `class` and the interfaces it extends or
    /// implements, least derived first.
    ///
    /// With `no_multi_inherited`, a signature redeclared by two unrelated
    /// interfaces with different exception sets fails (outside value
    /// types); otherwise redeclarations merge with exception narrowing.
    pub(super) fn add_all_methods(
        &mut self,
        class: ClassId,
        no_multi_inherited: bool,
        quiet: bool,
    ) -> Attempt<Vec<Method>> {
        let mut methods = Vec::new();
        self.collect_methods(class, class, &mut methods, no_multi_inherited, quiet)?;
        Ok(methods)
    }

    fn collect_methods(
        &mut self,
        enclosing: ClassId,
        current: ClassId,
        methods: &mut Vec<Method>,
        no_multi_inherited: bool,
        quiet: bool,
    ) -> Attempt<()> {
        let model = self.model;
        let interfaces = self.lookup(model.interfaces(current))?;
        for interface in interfaces {
            self.collect_methods(enclosing, interface, methods, no_multi_inherited, quiet)?;
        }

        for def in model.members(current) {
            if !def.is_method() || def.modifiers.is_private() {
                continue;
            }
            let method = self.new_method(enclosing, current, def, quiet)?;
            let Some(index) = methods.iter().position(|existing| existing.same_signature(&method)) else {
                methods.push(method);
                continue;
            };
            let existing = &methods[index];
            if no_multi_inherited
                && existing.declared_by != current
                && !self.stack.in_value_context()
                && !same_exception_set(&existing.exceptions, &method.exceptions)
                && !self.related(current, existing.declared_by)?
            {
                let signature = self.pool.method_signature(&method);
                let detail = format!(
                    "declared by `{}` and `{}`",
                    model.qualified_name(existing.declared_by),
                    model.qualified_name(current)
                );
                return Err(self.fail_with(Constraint::AmbiguousInheritedMethod, quiet, &signature, Some(detail)));
            }
            let mut merged = method;
            merged.merge_with(&methods[index], |sub, sup| self.is_subclass(sub, sup));
            methods[index] = merged;
        }
        Ok(())
    }

    /// Whether either class inherits from the other.
    fn related(&mut self, a: ClassId, b: ClassId) -> Attempt<bool> {
        let model = self.model;
        Ok(self.implements(a, model.qualified_name(b))? || self.implements(b, model.qualified_name(a))?)
    }

    /// Add the methods of every superclass below `java.lang.Object`.
    ///
    /// A method the class redeclares is attributed to the ancestor.
    pub(super) fn update_parent_class_methods(
        &mut self,
        class: ClassId,
        methods: &mut Vec<Method>,
        quiet: bool,
    ) -> Attempt<()> {
        let model = self.model;
        let mut current = self.lookup(model.superclass(class))?;
        while let Some(parent) = current {
            if model.qualified_name(parent) == known::JAVA_LANG_OBJECT {
                break;
            }
            for def in model.members(parent) {
                if !def.is_method() || def.is_constructor() || def.modifiers.is_private() {
                    continue;
                }
                let method = self.new_method(class, parent, def, quiet)?;
                match methods.iter_mut().find(|existing| existing.same_signature(&method)) {
                    Some(existing) => existing.declared_by = parent,
                    None => methods.push(method),
                }
            }
            current = self.lookup(model.superclass(parent))?;
        }
        Ok(())
    }

    /// A remote method declares a `RemoteException`-compatible throw and
    /// keeps `IDLEntity` exceptions out of its signature.
    pub(super) fn check_remote_method(&mut self, method: &Method, quiet: bool) -> Attempt<()> {
        let signature = self.pool.method_signature(method);
        let throws_remote = method
            .exceptions
            .iter()
            .any(|&exception| REMOTE_THROWS.contains(&self.pool.java_name(exception)));
        if !throws_remote {
            return Err(self.fail(Constraint::MissingRemoteException, quiet, &signature));
        }
        let uses_entity_exception = std::iter::once(method.return_type)
            .chain(method.arguments.iter().copied())
            .any(|ty| self.is_idl_entity_exception(ty));
        if uses_entity_exception {
            return Err(self.fail(Constraint::IdlEntityException, quiet, &signature));
        }
        Ok(())
    }

    /// An `IDLEntity` exception, or an array of them.
    fn is_idl_entity_exception(&self, ty: TypeId) -> bool {
        let data = self.pool.get(ty);
        let element = data.array().map_or(ty, |(element, _)| element);
        self.pool
            .get(element)
            .compound()
            .is_some_and(|compound| compound.is_idl_entity() && compound.is_exception())
    }
}
