//! The Type Classifier.
//!
//! [`Classifier::classify`] maps a Java type to a Type in the pool,
//! classifying everything its signature reaches on the way.
//!
//! # Design
//!
//! - Each mapping category is an attempt returning [`Attempt`]; the
//!   decision procedure in `make_type` tries them in a fixed order and falls
//!   through on [`Rejection::NoMatch`]
//! - A compound type is registered as `Pending` before its signature is
//!   classified, so a cycle back to it resolves to the same id
//! - Every attempt takes a pool checkpoint first. A failed attempt rolls
//!   back everything registered since, so no partial type stays cached
//! - Loud failures are recorded in order; once one is recorded every later
//!   `make_type` of the same root fails fast

mod classes;
mod compound;
mod interfaces;
mod members;
mod methods;
mod special;

pub use special::is_special_typedef;

use idl_diagnostic::{Constraint, ConstraintFailure};
use idl_ir::{known, ClassId, ClassModel, ClassNotFound, JavaType};

use crate::{
    Attempt, ClassificationFailure, ContextCode, ContextStack, FrameSubject, MappingError,
    MappingOptions, NameCollision, NameEnv, Rejection, TypeCode, TypeData, TypeId, TypeKey,
    TypeKind, TypePool,
};

/// Classifies Java types against a class model.
///
/// Owns the Type Cache and the name contexts for one compilation; both live
/// until [`Classifier::reset`] or a [`Classifier::reconfigure`] that
/// changes the options.
pub struct Classifier<'m, M: ClassModel + ?Sized> {
    model: &'m M,
    options: MappingOptions,
    pool: TypePool,
    names: NameEnv,
    stack: ContextStack,
    /// Loud failures of the root being classified.
    errors: Vec<MappingError>,
}

impl<'m, M: ClassModel + ?Sized> Classifier<'m, M> {
    pub fn new(model: &'m M, options: MappingOptions) -> Self {
        Classifier {
            model,
            options,
            pool: TypePool::new(),
            names: NameEnv::new(),
            stack: ContextStack::new(),
            errors: Vec::new(),
        }
    }

    pub fn model(&self) -> &'m M {
        self.model
    }

    pub fn options(&self) -> MappingOptions {
        self.options
    }

    pub fn pool(&self) -> &TypePool {
        &self.pool
    }

    pub fn names(&self) -> &NameEnv {
        &self.names
    }

    /// Shorthand for `self.pool().get(id)`.
    pub fn get(&self, id: TypeId) -> &TypeData {
        self.pool.get(id)
    }

    /// Switch options. Types cached under different options are discarded.
    pub fn reconfigure(&mut self, options: MappingOptions) {
        if options != self.options {
            tracing::debug!(?options, previous = ?self.options, "mapping options changed");
            self.options = options;
            self.reset();
        }
    }

    /// Discard every cached Type and claimed name.
    pub fn reset(&mut self) {
        self.pool.reset();
        self.names.reset();
        self.stack = ContextStack::new();
        self.errors.clear();
    }

    /// Classify the class or interface with the given qualified name.
    pub fn classify_class(&mut self, name: &str) -> Result<TypeId, ClassificationFailure> {
        self.classify(&JavaType::class(name))
    }

    /// Classify `ty` as a root.
    ///
    /// On failure the cache is rolled back to its state before the call, and
    /// the returned failure holds every loud error recorded on the way.
    #[tracing::instrument(level = "debug", skip_all, fields(root = %ty))]
    pub fn classify(&mut self, ty: &JavaType) -> Result<TypeId, ClassificationFailure> {
        let checkpoint = self.pool.checkpoint();
        self.errors.clear();
        self.stack = ContextStack::new();
        self.stack.set_next_code(ContextCode::Top);

        let result = self.make_type(ty);
        debug_assert!(self.stack.is_empty(), "unbalanced context frames");

        match result {
            Ok(id) if self.errors.is_empty() => {
                tracing::debug!(?id, cached = self.pool.cached(), "classified");
                Ok(id)
            }
            _ => {
                let evicted = self.pool.rollback(checkpoint);
                let mut errors = std::mem::take(&mut self.errors);
                if errors.is_empty() {
                    errors.push(MappingError::Unmappable {
                        name: ty.type_string(),
                    });
                }
                tracing::debug!(evicted, errors = errors.len(), "classification failed");
                Err(ClassificationFailure {
                    root: ty.type_string(),
                    errors,
                })
            }
        }
    }

    /// Whether `sub` is `sup` or inherits from it, for compound types.
    ///
    /// A class missing from the model answers `false`; classifying the
    /// types already resolved every class this can reach.
    pub fn is_subclass(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return true;
        }
        let (Some(sub_class), Some(sup_class)) = (self.pool.get(sub).class(), self.pool.get(sup).class())
        else {
            return false;
        };
        let model = self.model;
        model
            .implemented_by(sub_class, model.qualified_name(sup_class))
            .unwrap_or_else(|missing| {
                tracing::debug!(%missing, "subtype query failed");
                false
            })
    }

    // Decision procedure

    /// Classify `ty` in the context set by the caller.
    pub(crate) fn make_type(&mut self, ty: &JavaType) -> Attempt<TypeId> {
        idl_stack::ensure_sufficient_stack(|| self.make_type_inner(ty))
    }

    fn make_type_inner(&mut self, ty: &JavaType) -> Attempt<TypeId> {
        if !self.errors.is_empty() {
            return Err(Rejection::Fatal);
        }
        match ty {
            JavaType::Primitive(kind) => Ok(TypeId::primitive(*kind)),
            JavaType::Array { element, dimension } => self.array_type(ty, element, *dimension),
            JavaType::Class(name) => self.class_type(name),
        }
    }

    fn class_type(&mut self, name: &str) -> Attempt<TypeId> {
        if let Some(id) = self.cached(name) {
            tracing::trace!(name, ?id, "cache hit");
            return Ok(id);
        }
        let class = self.find_class(name)?;
        if self.model.is_interface(class) {
            self.interface_type(class)
        } else {
            self.concrete_class_type(class)
        }
    }

    fn interface_type(&mut self, class: ClassId) -> Attempt<TypeId> {
        if let Some(id) = self.special_interface(class)? {
            return Ok(id);
        }
        if self.implements(class, known::REMOTE)? {
            let in_value = self.stack.in_value_context();
            match self.remote_type(class, in_value) {
                Err(Rejection::NoMatch) if in_value => {
                    tracing::debug!(class = self.model.qualified_name(class), "remote fallback");
                    self.nc_interface(class)
                }
                other => other,
            }
        } else {
            match self.abstract_type(class, true) {
                Err(Rejection::NoMatch) => self.nc_interface(class),
                other => other,
            }
        }
    }

    fn concrete_class_type(&mut self, class: ClassId) -> Attempt<TypeId> {
        if let Some(id) = self.special_class(class)? {
            return Ok(id);
        }
        if self.implements(class, known::REMOTE)? {
            let in_value = self.stack.in_value_context();
            match self.implementation_type(class, in_value) {
                Err(Rejection::NoMatch) if in_value => {
                    tracing::debug!(class = self.model.qualified_name(class), "implementation fallback");
                    self.nc_class(class)
                }
                other => other,
            }
        } else {
            let attempt = if self.implements(class, known::SERIALIZABLE)? {
                self.value_type(class, true)
            } else {
                Err(Rejection::NoMatch)
            };
            match attempt {
                Err(Rejection::NoMatch) => self.nc_class(class),
                other => other,
            }
        }
    }

    // Attempt plumbing

    /// Cached type for `name` in the current context.
    fn cached(&self, name: &str) -> Option<TypeId> {
        self.pool.lookup(&TypeKey::plain(name)).or_else(|| {
            (name == known::JAVA_LANG_STRING)
                .then(|| TypeKey::in_context(name, self.stack.is_constant()))
                .and_then(|key| self.pool.lookup(&key))
        })
    }

    /// The type already cached for `class`: `Ok` when `matches` accepts its
    /// kind, `NoMatch` when it was mapped as something else.
    fn existing(&self, class: ClassId, matches: fn(&TypeKind) -> bool) -> Option<Attempt<TypeId>> {
        let id = self
            .pool
            .lookup(&TypeKey::plain(self.model.qualified_name(class)))?;
        Some(if matches(&self.pool.get(id).kind) {
            Ok(id)
        } else {
            Err(Rejection::NoMatch)
        })
    }

    /// Register `data` under `key`, push its frame and run `init`.
    ///
    /// Commits on success. On failure everything registered since the
    /// attempt began is evicted.
    fn attempt(
        &mut self,
        key: TypeKey,
        data: TypeData,
        init: impl FnOnce(&mut Self, TypeId) -> Attempt<()>,
    ) -> Attempt<TypeId> {
        let checkpoint = self.pool.checkpoint();
        let label = format!("{} {}", data.kind_name(), data.java_name);
        let is_value = matches!(data.kind, TypeKind::Value(_));
        let id = self.pool.register(key, data);

        let depth = self.stack.depth();
        self.stack.push(FrameSubject::Type { id, label, is_value });
        let result = init(self, id);
        debug_assert_eq!(self.stack.depth(), depth + 1, "unbalanced context frames");
        self.stack.pop(result.is_ok());

        match result {
            Ok(()) => {
                self.pool.mark_valid(id);
                Ok(id)
            }
            Err(rejection) => {
                let evicted = self.pool.rollback(checkpoint);
                tracing::debug!(?id, ?rejection, evicted, "attempt failed");
                Err(rejection)
            }
        }
    }

    /// Record a constraint failure, or stay silent when `quiet`.
    fn fail(&mut self, constraint: Constraint, quiet: bool, entity: &str) -> Rejection {
        self.fail_with(constraint, quiet, entity, None)
    }

    fn fail_with(
        &mut self,
        constraint: Constraint,
        quiet: bool,
        entity: &str,
        detail: Option<String>,
    ) -> Rejection {
        if quiet {
            tracing::trace!(constraint = constraint.number(), entity, "quiet failure");
            return Rejection::NoMatch;
        }
        let mut failure = ConstraintFailure::new(constraint, entity, self.stack.snapshot());
        if let Some(detail) = detail {
            failure = failure.with_detail(detail);
        }
        tracing::debug!(%failure, "constraint failed");
        self.errors.push(MappingError::Constraint(failure));
        Rejection::Fatal
    }

    /// Report `constraint` for a step that failed with `cause`. A fatal
    /// cause stays fatal even when the report itself is quiet.
    fn escalate(&mut self, cause: Rejection, constraint: Constraint, quiet: bool, entity: &str) -> Rejection {
        let own = self.fail(constraint, quiet, entity);
        if cause == Rejection::Fatal {
            Rejection::Fatal
        } else {
            own
        }
    }

    fn collision(
        &mut self,
        constraint: Constraint,
        quiet: bool,
        entity: &str,
        collision: NameCollision,
    ) -> Rejection {
        if quiet {
            tracing::trace!(constraint = constraint.number(), entity, %collision, "quiet collision");
            return Rejection::NoMatch;
        }
        tracing::debug!(constraint = constraint.number(), entity, %collision, "name collision");
        self.errors.push(MappingError::NameCollision {
            constraint,
            first: collision.first,
            second: collision.second,
            entity: entity.to_owned(),
            context: self.stack.snapshot(),
        });
        Rejection::Fatal
    }

    /// Turn a class model failure into a loud error.
    fn lookup<T>(&mut self, result: Result<T, ClassNotFound>) -> Attempt<T> {
        result.map_err(|missing| {
            tracing::debug!(%missing, "class not found");
            self.errors
                .push(MappingError::class_not_found(&missing, self.stack.snapshot()));
            Rejection::Fatal
        })
    }

    fn find_class(&mut self, name: &str) -> Attempt<ClassId> {
        let found = self.model.find_class(name);
        self.lookup(found)
    }

    /// Whether `class` is or inherits from the class named `sup`.
    fn implements(&mut self, class: ClassId, sup: &str) -> Attempt<bool> {
        let answer = self.model.implemented_by(class, sup);
        self.lookup(answer)
    }

    fn is_implementation(&self, id: TypeId) -> bool {
        self.pool.get(id).is(TypeCode::IMPLEMENTATION)
    }
}

#[cfg(test)]
mod tests;
