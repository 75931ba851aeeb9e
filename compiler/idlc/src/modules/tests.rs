#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use idl_ir::{ClassDef, ClassTable, JavaType, MemberDef};
use idl_types::{Classifier, TypePool};
use pretty_assertions::assert_eq;

use super::*;
use crate::GeneratorConfig;

fn remap(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|&(from, to)| (from.to_owned(), to.to_owned()))
        .collect()
}

fn strings(modules: &[&str]) -> Vec<String> {
    modules.iter().map(|&module| module.to_owned()).collect()
}

#[test]
fn translate_replaces_the_matched_prefix() {
    let entries = remap(&[("com.acme", "Corp::Acme")]);
    assert_eq!(
        translate_java_package("com.acme.billing", "Invoice", &entries),
        Some(strings(&["Corp", "Acme", "billing"]))
    );
    assert_eq!(
        translate_java_package("com.acme", "Invoice", &entries),
        Some(strings(&["Corp", "Acme"]))
    );
}

#[test]
fn translate_prefers_the_longest_match() {
    let entries = remap(&[("com", "C"), ("com.acme", "Corp::Acme")]);
    assert_eq!(
        translate_java_package("com.acme.billing", "Invoice", &entries),
        Some(strings(&["Corp", "Acme", "billing"]))
    );
}

#[test]
fn translate_may_name_the_class() {
    let entries = remap(&[("com.acme.Invoice", "Billing::Invoice")]);
    assert_eq!(
        translate_java_package("com.acme", "Invoice", &entries),
        Some(strings(&["Billing"]))
    );
    assert_eq!(translate_java_package("com.acme", "Receipt", &entries), None);

    let renamed = remap(&[("com.acme.Invoice", "Billing::Docs")]);
    assert_eq!(
        translate_java_package("com.acme", "Invoice", &renamed),
        Some(strings(&["Billing", "Docs"]))
    );
}

#[test]
fn translate_ignores_unrelated_packages() {
    let entries = remap(&[("org.other", "Other"), ("com.acme.billing.deep", "Deep")]);
    assert_eq!(translate_java_package("com.acme", "Invoice", &entries), None);
    assert_eq!(translate_java_package("", "Invoice", &entries), None);
}

#[test]
fn strip_drops_prefixes_the_package_lacks() {
    assert_eq!(
        strip_java_package("fake.omega", "IDL:phoney.pfix/omega/Juliet:1.0"),
        strings(&["omega"])
    );
    assert_eq!(
        strip_java_package("com.acme", "IDL:com/acme/Widget:1.0"),
        strings(&["com", "acme"])
    );
}

#[test]
fn strip_handles_short_ids_and_empty_packages() {
    assert!(strip_java_package("com.acme", "IDL:Widget:1.0").is_empty());
    assert!(strip_java_package("com.acme", "").is_empty());
    assert_eq!(
        strip_java_package("", "IDL:omg.org/CORBA/Widget:1.0"),
        strings(&["omg.org", "CORBA"])
    );
    assert!(strip_java_package("com.acme", "IDL:other/Widget:1.0").is_empty());
}

const WIDGET: &str = "com.acme.Widget";

fn entity_table() -> ClassTable {
    ClassTable::with_platform_classes()
        .with(
            ClassDef::class(WIDGET)
                .implements(known::VALUE_BASE)
                .member(MemberDef::field("size", JavaType::INT)),
        )
        .with(
            ClassDef::class("fake.omega.Juliet")
                .implements(known::IDL_ENTITY)
                .repository_id("IDL:phoney.pfix/omega/Juliet:1.0"),
        )
        .with(
            ClassDef::class("com.acme.Panel")
                .implements(known::SERIALIZABLE)
                .member(MemberDef::field("widgets", JavaType::array(JavaType::class(WIDGET), 1)))
                .member(MemberDef::field("size", JavaType::INT)),
        )
}

fn classify(table: &ClassTable, name: &str) -> (TypePool, TypeId) {
    let mut classifier = Classifier::new(table, GeneratorConfig::default().mapping_options());
    let id = classifier.classify_class(name).unwrap();
    (classifier.pool().clone(), id)
}

#[test]
fn idl_entity_modules_follow_the_remap() {
    let table = entity_table();
    let (pool, widget) = classify(&table, WIDGET);
    let config = GeneratorConfig::default().with_idl_module("com.acme", "Corp::Acme");
    let ctx = IdlContext::new(&table, &pool, &config);

    assert_eq!(ctx.idl_module_names(widget), strings(&["Corp", "Acme"]));
    assert_eq!(ctx.qualified_idl_name(widget), "::Corp::Acme::Widget");
}

#[test]
fn idl_entity_modules_fall_back_to_the_repository_id() {
    let table = entity_table();
    let (pool, widget) = classify(&table, WIDGET);
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);
    assert_eq!(ctx.idl_module_names(widget), strings(&["com", "acme"]));

    let (pool, juliet) = classify(&table, "fake.omega.Juliet");
    let ctx = IdlContext::new(&table, &pool, &config);
    assert!(pool.get(juliet).compound().unwrap().is_boxed());
    assert_eq!(
        ctx.idl_module_names(juliet),
        strings(&["org", "omg", "boxedIDL", "omega"])
    );
}

#[test]
fn sequences_of_idl_entities_are_boxed() {
    let table = entity_table();
    let (pool, panel) = classify(&table, "com.acme.Panel");
    let config = GeneratorConfig::default().with_idl_module("com.acme", "Corp::Acme");
    let ctx = IdlContext::new(&table, &pool, &config);

    let widgets = pool.get(panel).members().iter().find(|m| m.name == "widgets").unwrap().ty;
    assert_eq!(
        ctx.idl_module_names(widgets),
        strings(&["org", "omg", "boxedRMI", "Corp", "Acme"])
    );
    assert_eq!(ctx.qualified_idl_name(widgets), "::org::omg::boxedRMI::Corp::Acme::seq1_Widget");
}

#[test]
fn ordinary_types_keep_their_modules() {
    let table = entity_table();
    let (pool, panel) = classify(&table, "com.acme.Panel");
    let config = GeneratorConfig::default().with_idl_module("com.acme", "Corp::Acme");
    let ctx = IdlContext::new(&table, &pool, &config);

    assert_eq!(ctx.idl_module_names(panel), strings(&["com", "acme"]));
    assert_eq!(ctx.qualified_idl_name(panel), "::com::acme::Panel");
    assert_eq!(ctx.qualified_idl_name(TypeId::INT), "long");
}
