//! In-memory class model.

mod platform;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{ClassDef, ClassId, ClassModel, ClassNotFound};

/// A [`ClassModel`] backed by declarations held in memory.
///
/// Classes are stored densely and addressed by [`ClassId`]; redefining a
/// name replaces the previous declaration in place so existing handles stay
/// valid.
#[derive(Clone, Default, Debug)]
pub struct ClassTable {
    classes: Vec<ClassDef>,
    by_name: FxHashMap<String, ClassId>,
}

impl ClassTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding the platform classes the mapping depends on.
    pub fn with_platform_classes() -> Self {
        let mut table = Self::new();
        for def in platform::platform_classes() {
            table.define(def);
        }
        table
    }

    /// Add or replace a declaration.
    pub fn define(&mut self, def: ClassDef) -> ClassId {
        if let Some(&id) = self.by_name.get(&def.name) {
            self.classes[id.index()] = def;
            return id;
        }
        #[allow(clippy::cast_possible_truncation, reason = "class tables stay far below u32::MAX")]
        let id = ClassId::from_raw(self.classes.len() as u32);
        self.by_name.insert(def.name.clone(), id);
        self.classes.push(def);
        id
    }

    /// Builder-style [`ClassTable::define`].
    #[must_use]
    pub fn with(mut self, def: ClassDef) -> Self {
        self.define(def);
        self
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All declarations in definition order.
    #[allow(clippy::cast_possible_truncation, reason = "class tables stay far below u32::MAX")]
    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(index, def)| (ClassId::from_raw(index as u32), def))
    }
}

impl ClassModel for ClassTable {
    fn find_class(&self, name: &str) -> Result<ClassId, ClassNotFound> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ClassNotFound::new(name))
    }

    fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.index()]
    }

    fn implemented_by(&self, sub: ClassId, sup: &str) -> Result<bool, ClassNotFound> {
        let mut pending = vec![sub];
        let mut seen = FxHashSet::default();
        while let Some(current) = pending.pop() {
            if !seen.insert(current) {
                continue;
            }
            let def = self.class(current);
            if def.name == sup {
                return Ok(true);
            }
            if let Some(parent) = &def.superclass {
                pending.push(self.find_class(parent)?);
            }
            for interface in &def.interfaces {
                pending.push(self.find_class(interface)?);
            }
        }
        Ok(false)
    }
}
