//! Context-free identifier rewriting.
//!
//! The three stages run in a fixed order:
//! 1. [`convert_leading_underscore`]
//! 2. [`convert_idl_keyword`]
//! 3. [`convert_to_latin1`]
//!
//! Keyword conversion introduces a leading underscore of its own, which the
//! first stage must not see again.

use std::fmt::Write as _;

use super::keywords::is_idl_keyword;

/// `_foo` becomes `J_foo`.
pub fn convert_leading_underscore(name: &str) -> String {
    if name.starts_with('_') {
        format!("J{name}")
    } else {
        name.to_owned()
    }
}

/// Reserved words get a leading underscore, compared ignoring case.
pub fn convert_idl_keyword(name: &str) -> String {
    if is_idl_keyword(name) {
        format!("_{name}")
    } else {
        name.to_owned()
    }
}

/// Whether `c` may appear in an IDL identifier as is.
pub fn is_idl_identifier_char(c: char) -> bool {
    match c {
        'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => true,
        // Latin-1 letters, minus the multiplication and division signs.
        '\u{C0}'..='\u{FF}' => c != '\u{D7}' && c != '\u{F7}',
        _ => false,
    }
}

/// Replace every character outside the identifier set with `U` and four
/// uppercase hex digits per UTF-16 code unit.
///
/// Escapes already spelled `\u` or `\U` in the input become a bare `U`.
pub fn convert_to_latin1(name: &str) -> String {
    let unescaped = name.replace("\\u", "U").replace("\\U", "U");
    if unescaped.chars().all(is_idl_identifier_char) {
        return unescaped;
    }
    let mut result = String::with_capacity(unescaped.len() + 8);
    for c in unescaped.chars() {
        if is_idl_identifier_char(c) {
            result.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(result, "U{unit:04X}");
            }
        }
    }
    result
}

/// All three stages, in order.
pub fn mangle_identifier(name: &str) -> String {
    convert_to_latin1(&convert_idl_keyword(&convert_leading_underscore(name)))
}

/// Drop one leading underscore.
pub fn strip_leading_underscore(name: &str) -> &str {
    name.strip_prefix('_').unwrap_or(name)
}

/// Name of the IDL exception mapped from an exception type's IDL name.
///
/// A trailing `Exception` is replaced by `Ex`, and an underscore the
/// truncation leaves in front is dropped; otherwise `Ex` is appended.
pub fn exception_name(idl_name: &str) -> String {
    match idl_name.strip_suffix("Exception") {
        Some(stem) => format!("{}Ex", strip_leading_underscore(stem)),
        None => format!("{idl_name}Ex"),
    }
}

/// Inner class separators become `__`.
pub fn convert_inner_class_dots(simple_name: &str) -> String {
    simple_name.replace('.', "__")
}

/// `a::b::name`, or `name` without modules.
pub fn qualified_name(modules: &[String], name: &str) -> String {
    if modules.is_empty() {
        return name.to_owned();
    }
    let mut qualified = modules.join("::");
    qualified.push_str("::");
    qualified.push_str(name);
    qualified
}

/// IDL name of a sequence: `seq<dimension>_<element>`, spaces as `_`.
pub fn sequence_name(dimension: u32, element_idl_name: &str) -> String {
    format!("seq{dimension}_{}", element_idl_name.replace(' ', "_"))
}

/// Suffix component for an argument of an overloaded method.
pub fn overload_component(qualified_idl_name: &str) -> String {
    qualified_idl_name
        .replace("::_", "_")
        .replace("::", "_")
        .replace(' ', "_")
}
