//! The Type Cache.
//!
//! # Design
//!
//! - Types live in an arena and never move; [`TypeId`] is an index.
//! - The cache maps a [`TypeKey`] (Java spelling plus an optional context
//!   signature) to the one Type for that key.
//! - A Type is registered before it is initialized, so a cycle back to it
//!   finds the pending entry instead of recursing.
//! - Registrations are journaled. A failed attempt rolls the cache back to
//!   the [`Checkpoint`] taken before it: everything registered since is
//!   evicted and marked [`Status::Invalid`], including types that only the
//!   failed attempt could reach.

use idl_ir::PrimitiveKind;
use rustc_hash::FxHashMap;

use crate::{Status, TypeCode, TypeData, TypeId, TypeKind};

/// Mapping context that changes how a type maps.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ContextSignature {
    /// Type of a compile-time constant.
    Constant,
    /// Any other use.
    Ordinary,
}

/// Cache key.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeKey {
    pub name: String,
    pub context: Option<ContextSignature>,
}

impl TypeKey {
    pub fn plain(name: impl Into<String>) -> Self {
        TypeKey {
            name: name.into(),
            context: None,
        }
    }

    pub fn in_context(name: impl Into<String>, constant: bool) -> Self {
        TypeKey {
            name: name.into(),
            context: Some(if constant {
                ContextSignature::Constant
            } else {
                ContextSignature::Ordinary
            }),
        }
    }
}

/// Position in the registration journal.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Checkpoint(usize);

/// Arena of Types plus the identity cache over it.
#[derive(Clone, Debug)]
pub struct TypePool {
    types: Vec<TypeData>,
    cache: FxHashMap<TypeKey, TypeId>,
    journal: Vec<(TypeKey, TypeId)>,
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl TypePool {
    /// A pool holding only the primitives.
    pub fn new() -> Self {
        let mut pool = TypePool {
            types: Vec::with_capacity(64),
            cache: FxHashMap::default(),
            journal: Vec::new(),
        };
        pool.intern_primitives();
        pool
    }

    fn intern_primitives(&mut self) {
        for kind in PrimitiveKind::ALL {
            debug_assert_eq!(self.types.len(), TypeId::primitive(kind).index());
            self.types.push(TypeData {
                code: TypeCode::primitive(kind),
                kind: TypeKind::Primitive(kind),
                java_name: kind.java_name().to_owned(),
                idl_name: kind.idl_name().to_owned(),
                modules: Vec::new(),
                qualified_idl_name: kind.idl_name().to_owned(),
                repository_id: None,
                status: Status::Valid,
            });
        }
    }

    /// Discard every Type except the primitives.
    pub fn reset(&mut self) {
        tracing::debug!(types = self.types.len(), "type cache reset");
        self.types.clear();
        self.cache.clear();
        self.journal.clear();
        self.intern_primitives();
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.types[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: TypeId) -> &mut TypeData {
        &mut self.types[id.index()]
    }

    /// Number of arena slots, including evicted ones.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of live cache entries.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Live cache entry for `key`.
    pub fn lookup(&self, key: &TypeKey) -> Option<TypeId> {
        self.cache
            .get(key)
            .copied()
            .filter(|&id| self.get(id).status != Status::Invalid)
    }

    /// Live Type for a Java spelling in any context, ordinary use first.
    pub fn find(&self, java_name: &str) -> Option<TypeId> {
        self.lookup(&TypeKey::plain(java_name))
            .or_else(|| self.lookup(&TypeKey::in_context(java_name, false)))
            .or_else(|| self.lookup(&TypeKey::in_context(java_name, true)))
    }

    /// Add `data` to the arena and cache it under `key`.
    #[allow(clippy::cast_possible_truncation, reason = "pools stay far below u32::MAX types")]
    pub(crate) fn register(&mut self, key: TypeKey, data: TypeData) -> TypeId {
        let id = TypeId::from_raw(self.types.len() as u32);
        tracing::debug!(?id, key = %key.name, kind = data.kind_name(), "register");
        self.types.push(data);
        self.cache.insert(key.clone(), id);
        self.journal.push((key, id));
        id
    }

    /// Cache an existing Type under an additional key.
    pub(crate) fn alias(&mut self, key: TypeKey, id: TypeId) {
        self.cache.insert(key.clone(), id);
        self.journal.push((key, id));
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.journal.len())
    }

    /// Evict everything registered since `checkpoint`.
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) -> usize {
        let evicted = self.journal.len().saturating_sub(checkpoint.0);
        for (key, id) in self.journal.drain(checkpoint.0..).rev() {
            if self.cache.get(&key) == Some(&id) {
                self.cache.remove(&key);
            }
            self.types[id.index()].status = Status::Invalid;
        }
        if evicted > 0 {
            tracing::debug!(evicted, "type cache rollback");
        }
        evicted
    }

    pub(crate) fn mark_valid(&mut self, id: TypeId) {
        self.types[id.index()].status = Status::Valid;
    }

    /// Every live Type, in creation order.
    #[allow(clippy::cast_possible_truncation, reason = "pools stay far below u32::MAX types")]
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeData)> {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, data)| data.status != Status::Invalid)
            .map(|(index, data)| (TypeId::from_raw(index as u32), data))
    }

    pub fn idl_name(&self, id: TypeId) -> &str {
        &self.get(id).idl_name
    }

    pub fn qualified_idl_name(&self, id: TypeId) -> &str {
        &self.get(id).qualified_idl_name
    }

    pub fn java_name(&self, id: TypeId) -> &str {
        &self.get(id).java_name
    }

    /// `name(type, type, ...)` rendering of a method, for diagnostics.
    pub fn method_signature(&self, method: &crate::Method) -> String {
        let arguments: Vec<&str> = method
            .arguments
            .iter()
            .map(|&argument| self.java_name(argument))
            .collect();
        format!("{}({})", method.name, arguments.join(", "))
    }
}
