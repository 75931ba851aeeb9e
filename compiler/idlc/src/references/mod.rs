//! Reference collection.
//!
//! [`IdlContext::collect_references`] finds every type that needs an IDL
//! file of its own when a root type is generated.
//!
//! # Design
//!
//! - References fall into three groups: compound types, the special
//!   typedef types, and sequences. Each group is keyed by Java name so
//!   output order does not depend on discovery order.
//! - A sequence of depth N implies every shallower sequence of the same
//!   element, so only the deepest one per element is kept.
//! - The closure is a fixed point over the compound group. A type that
//!   needs no IDL of its own (see [`IdlContext::is_idl_generated_for`]) is
//!   dropped when found and not explored further; the root is always
//!   explored.

mod filters;

use std::collections::BTreeMap;

use idl_ir::{known, ClassModel};
use idl_types::{Member, Method, TypeCode, TypeId, TypeKind};
use rustc_hash::FxHashSet;

use crate::IdlContext;

/// Types referenced from a set of declarations.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct ReferenceSet {
    /// Compound types, by Java name.
    pub compounds: BTreeMap<String, TypeId>,
    /// Special typedef types, by Java name.
    pub specials: BTreeMap<String, TypeId>,
    /// The deepest sequence of each element, by element Java name.
    pub arrays: BTreeMap<String, TypeId>,
}

impl ReferenceSet {
    pub fn len(&self) -> usize {
        self.compounds.len() + self.specials.len() + self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every referenced type: compounds, then specials, then sequences.
    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.compounds
            .values()
            .chain(self.specials.values())
            .chain(self.arrays.values())
            .copied()
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.iter().any(|reference| reference == id)
    }

    /// Sort a referenced type into its group.
    ///
    /// Primitives, strings, `org.omg.CORBA.Object` and implementation
    /// types are never separate references.
    pub fn add<M: ClassModel + ?Sized>(&mut self, ctx: IdlContext<'_, M>, id: TypeId) {
        let data = ctx.get(id);
        match data.kind {
            TypeKind::Abstract(_)
            | TypeKind::Remote(_)
            | TypeKind::NcClass(_)
            | TypeKind::NcInterface(_)
            | TypeKind::Value(_) => {
                self.compounds.insert(data.java_name.clone(), id);
            }
            TypeKind::SpecialInterface(_) if data.is(TypeCode::CORBA_OBJECT) => {
                if data.java_name != known::CORBA_OBJECT {
                    self.compounds.insert(data.java_name.clone(), id);
                }
            }
            TypeKind::Array { .. } => self.add_array(ctx, id),
            _ if ctx.is_special_reference(id) => {
                self.specials.insert(data.java_name.clone(), id);
            }
            _ => {}
        }
    }

    /// Add a compound type without sorting, as interfaces, parents and
    /// thrown types are.
    fn add_compound<M: ClassModel + ?Sized>(&mut self, ctx: IdlContext<'_, M>, id: TypeId) {
        let data = ctx.get(id);
        if ctx.is_special_reference(id) {
            self.specials.insert(data.java_name.clone(), id);
        } else {
            self.compounds.insert(data.java_name.clone(), id);
        }
    }

    fn add_array<M: ClassModel + ?Sized>(&mut self, ctx: IdlContext<'_, M>, id: TypeId) {
        let Some((element, dimension)) = ctx.get(id).array() else {
            return;
        };
        let key = ctx.get(element).java_name.clone();
        let deeper = self
            .arrays
            .get(&key)
            .and_then(|&existing| ctx.get(existing).array())
            .is_none_or(|(_, existing)| existing < dimension);
        if deeper {
            self.arrays.insert(key, id);
        }
    }

    /// Argument, return and thrown types of `methods`. Thrown types go to
    /// `exceptions` when given, otherwise to the compound group.
    pub fn add_method_references<M: ClassModel + ?Sized>(
        &mut self,
        ctx: IdlContext<'_, M>,
        methods: &[&Method],
        mut exceptions: Option<&mut BTreeMap<String, TypeId>>,
    ) {
        for method in methods {
            for exception in ctx.idl_exceptions(method) {
                match exceptions.as_deref_mut() {
                    Some(exceptions) => {
                        exceptions.insert(ctx.get(exception).java_name.clone(), exception);
                    }
                    None => self.add_compound(ctx, exception),
                }
            }
            for &argument in &method.arguments {
                self.add(ctx, argument);
            }
            self.add(ctx, method.return_type);
        }
    }

    /// Types of `members`.
    pub fn add_member_references<M: ClassModel + ?Sized>(&mut self, ctx: IdlContext<'_, M>, members: &[&Member]) {
        for member in members {
            self.add(ctx, member.ty);
        }
    }
}

impl<M: ClassModel + ?Sized> IdlContext<'_, M> {
    /// Every type that needs its own IDL file when `root` is generated,
    /// `root` included unless it needs none.
    #[tracing::instrument(level = "debug", skip_all, fields(root = %self.get(root).java_name))]
    pub fn collect_references(&self, root: TypeId) -> ReferenceSet {
        let mut set = ReferenceSet::default();
        let mut explored = FxHashSet::default();
        let mut pending = vec![root];
        if self.is_idl_generated_for(root) {
            set.add_compound(*self, root);
        }

        while let Some(id) = pending.pop() {
            if !explored.insert(id) {
                continue;
            }
            let mut found = ReferenceSet::default();
            self.accumulate(id, &mut found);
            for (name, reference) in found.compounds {
                if !self.is_idl_generated_for(reference) {
                    tracing::trace!(name, "no IDL needed");
                    continue;
                }
                if set.compounds.insert(name, reference).is_none() {
                    pending.push(reference);
                }
            }
            set.specials.extend(found.specials);
            for array in found.arrays.into_values() {
                set.add_array(*self, array);
                if let Some((element, _)) = self.get(array).array() {
                    let mut elements = ReferenceSet::default();
                    elements.add(*self, element);
                    for (name, reference) in elements.compounds {
                        if self.is_idl_generated_for(reference) && set.compounds.insert(name, reference).is_none() {
                            pending.push(reference);
                        }
                    }
                    set.specials.extend(elements.specials);
                }
            }
        }

        tracing::debug!(
            compounds = set.compounds.len(),
            specials = set.specials.len(),
            arrays = set.arrays.len(),
            "references collected"
        );
        set
    }

    /// Direct references of one compound type.
    fn accumulate(&self, id: TypeId, found: &mut ReferenceSet) {
        for inherited in self.inheritance(id) {
            found.add_compound(*self, inherited);
        }
        let methods = self.idl_methods(id);
        found.add_method_references(*self, &methods, None);
        let members = self.data_members(id);
        found.add_member_references(*self, &members);
    }
}
