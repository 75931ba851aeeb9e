//! IDL name assignment.
//!
//! Raw Java identifiers become IDL identifiers in two layers:
//! - [`mangle`]: context-free rewriting (leading underscore, reserved
//!   words, character set), memoized per raw input by [`NameEnv`]
//! - [`NameContext`]: case-insensitive clash detection and resolution,
//!   which depends on the other names in scope and is never memoized
//!
//! Whole method and member sets are named at once by
//! [`set_method_names`] and [`set_member_names`], because overloads,
//! attributes and clashes are only visible across the set.

mod attributes;
mod context;
mod keywords;
pub mod mangle;
mod members;
mod methods;

use rustc_hash::FxHashMap;

pub use attributes::{decapitalize, initial_attribute_kind};
pub use context::{NameCollision, NameContext};
pub use keywords::{is_idl_keyword, IDL_KEYWORDS};
pub use members::set_member_names;
pub use methods::{set_method_names, MethodNaming};

/// Modules prepended to boxed `IDLEntity` types.
pub const BOXED_IDL_MODULES: [&str; 3] = ["org", "omg", "boxedIDL"];

/// Modules prepended to sequences.
pub const BOXED_RMI_MODULES: [&str; 3] = ["org", "omg", "boxedRMI"];

/// IDL name every constructor maps to before overload mangling.
pub const IDL_CONSTRUCTOR: &str = "create";

/// Case-insensitive equality, as IDL compares identifiers.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

/// Naming state shared by one compilation.
#[derive(Clone, Debug)]
pub struct NameEnv {
    /// Three-stage mangling results by raw identifier.
    identifiers: FxHashMap<String, String>,
    /// Character-set conversion results by raw module component.
    components: FxHashMap<String, String>,
    /// Type names already claimed, per package.
    packages: FxHashMap<String, NameContext>,
    /// Dotted package names already claimed.
    modules: NameContext,
}

impl Default for NameEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl NameEnv {
    pub fn new() -> Self {
        NameEnv {
            identifiers: FxHashMap::default(),
            components: FxHashMap::default(),
            packages: FxHashMap::default(),
            modules: NameContext::strict(),
        }
    }

    /// Forget every memoized name and claimed type or module name.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Memoized [`mangle::mangle_identifier`].
    pub fn identifier(&mut self, raw: &str) -> String {
        if let Some(mangled) = self.identifiers.get(raw) {
            return mangled.clone();
        }
        let mangled = mangle::mangle_identifier(raw);
        self.identifiers.insert(raw.to_owned(), mangled.clone());
        mangled
    }

    /// Resolve case clashes within `context`, then mangle.
    pub fn member_or_method_name(&mut self, context: &NameContext, raw: &str) -> String {
        let resolved = context.get(raw);
        self.identifier(&resolved)
    }

    fn module_component(&mut self, raw: &str) -> String {
        if let Some(converted) = self.components.get(raw) {
            return converted.clone();
        }
        let converted = mangle::convert_to_latin1(raw);
        self.components.insert(raw.to_owned(), converted.clone());
        converted
    }

    /// IDL name of a class or interface, claimed within its package.
    ///
    /// `simple_name` spells nested classes `Outer.Inner`.
    pub fn class_or_interface_name(
        &mut self,
        package: &str,
        simple_name: &str,
    ) -> Result<String, NameCollision> {
        let name = self.identifier(&mangle::convert_inner_class_dots(simple_name));
        self.packages
            .entry(package.to_owned())
            .or_insert_with(NameContext::strict)
            .assert_put(&name)?;
        Ok(name)
    }

    /// Module path of a package, claimed among all packages.
    pub fn module_names(&mut self, package: &str, boxed: bool) -> Result<Vec<String>, NameCollision> {
        let mut modules: Vec<String> = if boxed {
            BOXED_IDL_MODULES.iter().map(|&m| m.to_owned()).collect()
        } else {
            Vec::new()
        };
        if !package.is_empty() {
            self.modules.assert_put(package)?;
            for component in package.split('.') {
                let converted = self.module_component(component);
                modules.push(converted);
            }
        }
        Ok(modules)
    }

    /// Number of memoized identifiers.
    pub fn memoized(&self) -> usize {
        self.identifiers.len()
    }
}
