#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use idl_ir::{ClassDef, ClassTable};
use pretty_assertions::assert_eq;

use super::*;

fn table() -> ClassTable {
    ClassTable::with_platform_classes()
        .with(ClassDef::interface("com.acme.Account").extends(known::REMOTE))
        .with(
            ClassDef::class("com.acme.Point")
                .implements(known::SERIALIZABLE)
                .serial_version_uid(0x1234),
        )
        .with(ClassDef::class("com.acme.Blob").implements(known::EXTERNALIZABLE))
        .with(
            ClassDef::class("com.acme.Fixed")
                .implements(known::SERIALIZABLE)
                .repository_id("IDL:acme.com/Fixed:2.0"),
        )
}

#[test]
fn interfaces_have_zero_hash() {
    let table = table();
    let account = table.find_class("com.acme.Account").unwrap();
    assert_eq!(
        compound_id(&table, account, false).unwrap(),
        "RMI:com.acme.Account:0000000000000000"
    );
}

#[test]
fn classes_carry_hash_and_suid() {
    let table = table();
    let point = table.find_class("com.acme.Point").unwrap();
    assert_eq!(
        compound_id(&table, point, false).unwrap(),
        "RMI:com.acme.Point:0000000000000000:0000000000001234"
    );
    let blob = table.find_class("com.acme.Blob").unwrap();
    assert_eq!(
        compound_id(&table, blob, false).unwrap(),
        "RMI:com.acme.Blob:0000000000000001:0000000000000000"
    );
}

#[test]
fn declared_id_wins() {
    let table = table();
    let fixed = table.find_class("com.acme.Fixed").unwrap();
    assert_eq!(compound_id(&table, fixed, true).unwrap(), "IDL:acme.com/Fixed:2.0");
}

#[test]
fn idl_entities_use_slashes() {
    assert_eq!(idl_entity_id("com.acme", "Widget"), "IDL:com/acme/Widget:1.0");
    assert_eq!(idl_entity_id("", "Widget"), "IDL:Widget:1.0");
    assert_eq!(idl_entity_id("com.acme", "Outer.Inner"), "IDL:com/acme/Outer/Inner:1.0");
}

#[test]
fn array_ids() {
    let table = table();
    assert_eq!(
        array_id(&table, &JavaType::INT, 2).unwrap(),
        "RMI:[[I:0000000000000000"
    );
    assert_eq!(
        array_id(&table, &JavaType::class("com.acme.Point"), 1).unwrap(),
        "RMI:[Lcom.acme.Point;:0000000000000000:0000000000001234"
    );
    assert_eq!(
        array_id(&table, &JavaType::class("com.acme.Account"), 1).unwrap(),
        "RMI:[Lcom.acme.Account;:0000000000000000"
    );
}

#[test]
fn negative_uid_prints_twos_complement() {
    assert_eq!(hex16(u64::MAX), "FFFFFFFFFFFFFFFF");
}

#[test]
fn boxed_ids_live_under_omg_org() {
    let modules = vec!["omega".to_owned()];
    assert_eq!(boxed_idl_id(&modules, "Juliet"), "IDL:omg.org/boxedIDL/omega/Juliet:1.0");
    assert_eq!(boxed_idl_id(&[], "Top"), "IDL:omg.org/boxedIDL/Top:1.0");
}
