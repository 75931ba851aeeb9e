//! Generator configuration.
//!
//! [`GeneratorConfig`] carries the classification options plus everything
//! that only affects emitted IDL: include and module remapping for
//! `IDLEntity` types, whether value types map their methods, and how value
//! constructors are spelled.

use std::collections::BTreeMap;

use idl_types::MappingOptions;

/// Command-line style options rejected by [`GeneratorConfig::from_args`].
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("option `{option}` requires two arguments")]
    MissingArgument { option: &'static str },

    #[error("unknown option `{0}`")]
    UnknownOption(String),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GeneratorConfig {
    pub mapping: MappingOptions,
    /// Dotted prefix of an `IDLEntity` name to the file its `#include`
    /// names instead.
    pub idl_file_remap: BTreeMap<String, String>,
    /// Dotted package prefix, optionally ending in a class name, to the
    /// `::`-separated modules it maps to.
    pub idl_module_remap: BTreeMap<String, String>,
    /// Map methods and constructors of value and non-conforming types.
    pub value_methods: bool,
    /// Spell value constructors `factory` rather than `init`.
    pub factory: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            mapping: MappingOptions::default(),
            idl_file_remap: BTreeMap::new(),
            idl_module_remap: BTreeMap::new(),
            value_methods: true,
            factory: true,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mapping(mut self, mapping: MappingOptions) -> Self {
        self.mapping = mapping;
        self
    }

    #[must_use]
    pub fn with_value_methods(mut self, enabled: bool) -> Self {
        self.value_methods = enabled;
        self
    }

    #[must_use]
    pub fn with_factory(mut self, enabled: bool) -> Self {
        self.factory = enabled;
        self
    }

    #[must_use]
    pub fn with_idl_module(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.add_idl_module(from, to);
        self
    }

    #[must_use]
    pub fn with_idl_file(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.add_idl_file(from, to);
        self
    }

    /// `-idlModule from to`. A later entry for the same prefix wins.
    pub fn add_idl_module(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.idl_module_remap.insert(from.into(), to.into());
    }

    /// `-idlFile from to`. A later entry for the same prefix wins.
    pub fn add_idl_file(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.idl_file_remap.insert(from.into(), to.into());
    }

    /// Options the classifier runs with.
    ///
    /// Mapping value methods needs the types those methods reach, which
    /// may be non-conforming, so `value_methods` turns on non-conforming
    /// parsing.
    pub fn mapping_options(&self) -> MappingOptions {
        let parse_non_conforming = self.mapping.parse_non_conforming || self.value_methods;
        self.mapping.with_parse_non_conforming(parse_non_conforming)
    }

    /// Parse `rmic -idl` style options. Returns the configuration and the
    /// remaining arguments, the names of the root classes.
    ///
    /// Option names compare ignoring case.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<(Self, Vec<String>), ConfigError> {
        let mut config = Self::default();
        let mut roots = Vec::new();
        let mut args = args.iter().map(<S as AsRef<str>>::as_ref);
        while let Some(arg) = args.next() {
            if !arg.starts_with('-') {
                roots.push(arg.to_owned());
                continue;
            }
            match arg.to_ascii_lowercase().as_str() {
                "-idl" => {}
                "-valuemethods" => config.value_methods = true,
                "-novaluemethods" => config.value_methods = false,
                "-init" => config.factory = false,
                "-factory" => config.factory = true,
                "-idlfile" => {
                    let (from, to) = option_pair(&mut args, "-idlFile")?;
                    config.add_idl_file(from, to);
                }
                "-idlmodule" => {
                    let (from, to) = option_pair(&mut args, "-idlModule")?;
                    config.add_idl_module(from, to);
                }
                _ => return Err(ConfigError::UnknownOption(arg.to_owned())),
            }
        }
        Ok((config, roots))
    }
}

/// The two operands of `-idlFile` or `-idlModule`.
fn option_pair<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    option: &'static str,
) -> Result<(&'a str, &'a str), ConfigError> {
    let mut operand = || args.next().filter(|value| !value.starts_with('-'));
    match (operand(), operand()) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => Err(ConfigError::MissingArgument { option }),
    }
}

#[cfg(test)]
mod tests;
