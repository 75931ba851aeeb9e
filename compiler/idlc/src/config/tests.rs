#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn defaults_map_value_methods_with_factories() {
    let config = GeneratorConfig::default();
    assert!(config.value_methods);
    assert!(config.factory);
    assert!(!config.mapping.parse_non_conforming);
    assert!(config.mapping_options().parse_non_conforming);
}

#[test]
fn value_methods_off_keeps_conforming_mapping() {
    let config = GeneratorConfig::new().with_value_methods(false);
    assert!(!config.mapping_options().parse_non_conforming);

    let forced = config.with_mapping(MappingOptions::default().with_parse_non_conforming(true));
    assert!(forced.mapping_options().parse_non_conforming);
}

#[test]
fn options_and_roots_are_separated() {
    let (config, roots) = GeneratorConfig::from_args(&[
        "-idl",
        "-noValueMethods",
        "-INIT",
        "com.acme.Account",
        "-idlModule",
        "com.acme",
        "Corp::Acme",
        "-idlFile",
        "com.acme.Widget",
        "widget.idl",
        "com.acme.Ledger",
    ])
    .unwrap();

    assert_eq!(roots, vec!["com.acme.Account", "com.acme.Ledger"]);
    assert!(!config.value_methods);
    assert!(!config.factory);
    assert_eq!(config.idl_module_remap.get("com.acme").map(String::as_str), Some("Corp::Acme"));
    assert_eq!(
        config.idl_file_remap.get("com.acme.Widget").map(String::as_str),
        Some("widget.idl")
    );
}

#[test]
fn remap_options_need_two_operands() {
    let error = GeneratorConfig::from_args(&["-idlModule", "com.acme"]).unwrap_err();
    assert_eq!(error, ConfigError::MissingArgument { option: "-idlModule" });

    let error = GeneratorConfig::from_args(&["-idlFile", "com.acme", "-init"]).unwrap_err();
    assert_eq!(error, ConfigError::MissingArgument { option: "-idlFile" });
}

#[test]
fn unknown_options_are_rejected() {
    let error = GeneratorConfig::from_args(&["-iiop"]).unwrap_err();
    assert_eq!(error, ConfigError::UnknownOption("-iiop".to_owned()));
}

#[test]
fn later_remaps_replace_earlier_ones() {
    let config = GeneratorConfig::new()
        .with_idl_module("com.acme", "Acme")
        .with_idl_module("com.acme", "Corp::Acme");
    assert_eq!(config.idl_module_remap.len(), 1);
    assert_eq!(config.idl_module_remap["com.acme"], "Corp::Acme");
}
