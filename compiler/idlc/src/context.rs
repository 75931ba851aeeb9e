//! Read-only view shared by reference collection, module derivation and
//! emission.

use idl_ir::{known, ClassModel};
use idl_types::{CompoundData, TypeData, TypeId, TypePool};

use crate::GeneratorConfig;

/// A classified pool together with the model it came from and the
/// generator options.
pub struct IdlContext<'a, M: ClassModel + ?Sized> {
    pub model: &'a M,
    pub pool: &'a TypePool,
    pub config: &'a GeneratorConfig,
}

// Manual impls: derives would require `M: Clone`.
impl<M: ClassModel + ?Sized> Clone for IdlContext<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ClassModel + ?Sized> Copy for IdlContext<'_, M> {}

impl<'a, M: ClassModel + ?Sized> IdlContext<'a, M> {
    pub fn new(model: &'a M, pool: &'a TypePool, config: &'a GeneratorConfig) -> Self {
        IdlContext { model, pool, config }
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> &'a TypeData {
        self.pool.get(id)
    }

    pub fn compound(&self, id: TypeId) -> Option<&'a CompoundData> {
        self.get(id).compound()
    }

    /// Java simple name of a compound type; nested classes read
    /// `Outer.Inner`.
    pub fn simple_name(&self, id: TypeId) -> String {
        match self.get(id).class() {
            Some(class) => self.model.simple_name(class),
            None => self.get(id).java_name.clone(),
        }
    }

    /// Java package of a compound type.
    pub fn package_name(&self, id: TypeId) -> &'a str {
        match self.get(id).class() {
            Some(class) => self.model.package_name(class),
            None => "",
        }
    }

    /// Whether `id` is `org.omg.CORBA.Object` itself, which IDL spells as
    /// the keyword `Object`.
    pub fn is_corba_object_root(&self, id: TypeId) -> bool {
        self.get(id).java_name == known::CORBA_OBJECT
    }
}
