//! IDL reserved words.

/// Reserved words of IDL, in their canonical spelling.
pub const IDL_KEYWORDS: [&str; 47] = [
    "abstract",
    "any",
    "attribute",
    "boolean",
    "case",
    "char",
    "const",
    "context",
    "custom",
    "default",
    "double",
    "enum",
    "exception",
    "factory",
    "FALSE",
    "fixed",
    "float",
    "in",
    "inout",
    "interface",
    "long",
    "module",
    "native",
    "Object",
    "octet",
    "oneway",
    "out",
    "private",
    "public",
    "raises",
    "readonly",
    "sequence",
    "short",
    "string",
    "struct",
    "supports",
    "switch",
    "TRUE",
    "truncatable",
    "typedef",
    "unsigned",
    "union",
    "ValueBase",
    "valuetype",
    "void",
    "wchar",
    "wstring",
];

/// Whether `name` matches a reserved word, ignoring case.
pub fn is_idl_keyword(name: &str) -> bool {
    IDL_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(name))
}
