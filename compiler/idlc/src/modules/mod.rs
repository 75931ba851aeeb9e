//! IDL module paths of generated types.
//!
//! Most types keep the modules the classifier gave them, one per Java
//! package component. `IDLEntity` types are different: they already are
//! IDL, so their modules come from an `-idlModule` remap when one
//! applies, and otherwise from their repository id with any prefix the
//! Java package does not carry stripped off.

use std::collections::BTreeMap;

use idl_ir::{known, ClassModel};
use idl_types::names::{BOXED_IDL_MODULES, BOXED_RMI_MODULES};
use idl_types::{TypeCode, TypeId};

use crate::IdlContext;

fn with_prefix(prefix: &[&str], modules: Vec<String>) -> Vec<String> {
    prefix.iter().map(|&module| module.to_owned()).chain(modules).collect()
}

/// Apply the `-idlModule` remap entry that matches `package` best.
///
/// An entry matches when its dotted tokens are a prefix of the package
/// tokens, or when they cover the whole package plus `simple_name`. The
/// match with the most tokens wins. Returns `None` when nothing matches.
pub fn translate_java_package(
    package: &str,
    simple_name: &str,
    remap: &BTreeMap<String, String>,
) -> Option<Vec<String>> {
    if package.is_empty() {
        return None;
    }
    let tokens: Vec<&str> = package.split('.').collect();

    let mut best: Option<(usize, bool, &str)> = None;
    for (from, to) in remap {
        let from_tokens: Vec<&str> = from.split('.').filter(|token| !token.is_empty()).collect();
        let names_class = match from_tokens.len().checked_sub(tokens.len()) {
            Some(0) => false,
            Some(1) => true,
            _ if from_tokens.len() < tokens.len() => false,
            _ => continue,
        };
        let package_part = &from_tokens[..from_tokens.len().min(tokens.len())];
        if package_part != &tokens[..package_part.len()] {
            continue;
        }
        if names_class && from_tokens.last() != Some(&simple_name) {
            continue;
        }
        if best.is_none_or(|(len, _, _)| from_tokens.len() > len) {
            best = Some((from_tokens.len(), names_class, to.as_str()));
        }
    }

    let (len, names_class, to) = best?;
    let matched = if names_class { len - 1 } else { len };
    let mut modules: Vec<String> = to
        .split(':')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect();
    if names_class && modules.last().is_some_and(|last| last == simple_name) {
        modules.pop();
    }
    modules.extend(tokens[matched..].iter().map(|&token| token.to_owned()));
    Some(modules)
}

/// Modules named by an `IDL:` repository id, minus any prefix the Java
/// package does not share.
///
/// `IDL:phoney.pfix/omega/Juliet:1.0` in package `fake.omega` gives
/// `omega`.
pub fn strip_java_package(package: &str, repository_id: &str) -> Vec<String> {
    let body = repository_id.get(4..).unwrap_or_default();
    let mut modules: Vec<String> = body
        .split('/')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect();
    if modules.len() < 2 {
        return Vec::new();
    }
    modules.pop();
    if package.is_empty() {
        return modules;
    }

    let shared = modules
        .iter()
        .rev()
        .zip(package.split('.').rev())
        .take_while(|(module, token)| module.as_str() == *token)
        .count();
    modules.split_off(modules.len() - shared)
}

impl<M: ClassModel + ?Sized> IdlContext<'_, M> {
    /// Module path of `id` in generated IDL.
    pub fn idl_module_names(&self, id: TypeId) -> Vec<String> {
        let data = self.get(id);
        let is_array = data.array().is_some();
        let entity = data.array().map_or(id, |(element, _)| element);
        let entity_data = self.get(entity);
        let Some(compound) = entity_data.compound() else {
            return data.modules.clone();
        };
        if !compound.is_idl_entity() || entity_data.java_name == known::IDL_ENTITY {
            return data.modules.clone();
        }

        let package = self.package_name(entity);
        let simple_name = self.simple_name(entity);
        let mut modules = translate_java_package(package, &simple_name, &self.config.idl_module_remap)
            .unwrap_or_else(|| {
                strip_java_package(package, entity_data.repository_id.as_deref().unwrap_or_default())
            });
        if compound.is_boxed() {
            modules = with_prefix(&BOXED_IDL_MODULES, modules);
        }
        if is_array {
            modules = with_prefix(&BOXED_RMI_MODULES, modules);
        }
        modules
    }

    /// Fully qualified IDL name with a leading `::`.
    ///
    /// Primitives and `Object` are never qualified.
    pub fn qualified_idl_name(&self, id: TypeId) -> String {
        let data = self.get(id);
        if data.is(TypeCode::PRIMITIVE) || self.is_corba_object_root(id) {
            return data.idl_name.clone();
        }
        let modules = self.idl_module_names(id);
        if modules.is_empty() {
            return data.idl_name.clone();
        }
        format!("::{}::{}", modules.join("::"), data.idl_name)
    }
}

#[cfg(test)]
mod tests;
