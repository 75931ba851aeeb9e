#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use idl_ir::{ClassDef, ClassTable, ConstantValue, MemberDef, Modifiers, PersistentField};
use pretty_assertions::assert_eq;

use super::members::constant_literal;
use super::*;
use crate::AttributeKind;

const ACCOUNT: &str = "com.acme.Account";
const ACCOUNT_IMPL: &str = "com.acme.AccountImpl";

fn remote_method(name: &str, returns: JavaType) -> MemberDef {
    MemberDef::method(name, returns).throws(known::REMOTE_EXCEPTION)
}

/// Platform classes plus a well-formed remote interface and its
/// implementation.
fn bank() -> ClassTable {
    ClassTable::with_platform_classes()
        .with(
            ClassDef::interface(ACCOUNT)
                .extends(known::REMOTE)
                .member(remote_method("getBalance", JavaType::LONG))
                .member(remote_method("setBalance", JavaType::VOID).arg("balance", JavaType::LONG))
                .member(remote_method("deposit", JavaType::VOID).arg("amount", JavaType::LONG)),
        )
        .with(
            ClassDef::class(ACCOUNT_IMPL)
                .implements(ACCOUNT)
                .member(MemberDef::constructor())
                .member(remote_method("getBalance", JavaType::LONG))
                .member(MemberDef::method("setBalance", JavaType::VOID).arg("balance", JavaType::LONG))
                .member(remote_method("deposit", JavaType::VOID).arg("amount", JavaType::LONG)),
        )
}

fn non_conforming() -> MappingOptions {
    MappingOptions::default().with_parse_non_conforming(true)
}

fn idl_names(data: &TypeData) -> Vec<&str> {
    data.methods().iter().map(|m| m.idl_name.as_str()).collect()
}

fn member<'a>(data: &'a TypeData, name: &str) -> &'a crate::Member {
    data.members().iter().find(|m| m.name == name).unwrap()
}

fn rejected(table: &ClassTable, options: MappingOptions, name: &str) -> ClassificationFailure {
    Classifier::new(table, options).classify_class(name).unwrap_err()
}

#[test]
fn remote_interface_infers_attributes() {
    let table = bank();
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let id = classifier.classify_class(ACCOUNT).unwrap();
    let data = classifier.get(id);

    assert!(matches!(data.kind, TypeKind::Remote(_)));
    assert_eq!(data.idl_name, "Account");
    assert_eq!(data.qualified_idl_name, "com::acme::Account");
    assert_eq!(data.repository_id.as_deref(), Some("RMI:com.acme.Account:0000000000000000"));
    assert_eq!(idl_names(data), vec!["_get_balance", "_set_balance", "deposit"]);
    assert_eq!(data.methods()[0].attribute_kind, AttributeKind::GetReadWrite);
    assert_eq!(data.methods()[0].attribute_name.as_deref(), Some("balance"));
    assert_eq!(data.methods()[2].argument_names, vec!["amount"]);

    let interfaces = data.interfaces();
    assert_eq!(interfaces.len(), 1);
    assert!(classifier.get(interfaces[0]).is(TypeCode::JAVA_RMI_REMOTE));
}

#[test]
fn thrown_types_are_value_types() {
    let table = bank();
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let id = classifier.classify_class(ACCOUNT).unwrap();
    let remote_exception = classifier.get(id).methods()[0].exceptions[0];
    let data = classifier.get(remote_exception);

    assert!(matches!(data.kind, TypeKind::Value(_)));
    let compound = data.compound().unwrap();
    assert!(compound.is_remote_exception_or_subclass());
    assert_eq!(compound.exception_name.as_deref(), Some("RemoteEx"));
    assert_eq!(
        compound.qualified_exception_name.as_deref(),
        Some("java::rmi::RemoteEx")
    );

    let io_exception = classifier.get(remote_exception).parent().unwrap();
    assert_eq!(classifier.get(io_exception).java_name, known::IO_EXCEPTION);
}

#[test]
fn implementation_copies_remote_methods() {
    let table = bank();
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let id = classifier.classify_class(ACCOUNT_IMPL).unwrap();
    let data = classifier.get(id);

    assert!(matches!(data.kind, TypeKind::Implementation(_)));
    assert_eq!(idl_names(data), vec!["getBalance", "setBalance", "deposit"]);
    assert!(data.methods().iter().all(|m| m.attribute_kind == AttributeKind::None));
    let setter = &data.methods()[1];
    assert_eq!(setter.exceptions.len(), 1);
    assert!(setter.impl_exceptions.is_empty());
    assert!(data.members().is_empty());
}

#[test]
fn redeclared_methods_narrow_their_exceptions() {
    let table = ClassTable::with_platform_classes()
        .with(
            ClassDef::interface("com.acme.Base")
                .extends(known::REMOTE)
                .member(MemberDef::method("ping", JavaType::VOID).throws(known::IO_EXCEPTION)),
        )
        .with(
            ClassDef::interface("com.acme.Derived")
                .extends("com.acme.Base")
                .member(remote_method("ping", JavaType::VOID)),
        );
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let id = classifier.classify_class("com.acme.Derived").unwrap();
    let methods = classifier.get(id).methods();

    assert_eq!(methods.len(), 1);
    let exceptions: Vec<&str> = methods[0]
        .exceptions
        .iter()
        .map(|&e| classifier.pool().java_name(e))
        .collect();
    assert_eq!(exceptions, vec![known::REMOTE_EXCEPTION]);
    assert_eq!(methods[0].declared_by, table.find_class("com.acme.Derived").unwrap());
}

#[test]
fn implementation_of_unrelated_interfaces_keeps_common_exceptions() {
    let sql_exception = "java.sql.SQLException";
    let table = ClassTable::with_platform_classes()
        .with(ClassDef::class(sql_exception).extends(known::EXCEPTION))
        .with(
            ClassDef::interface("com.acme.A").extends(known::REMOTE).member(
                MemberDef::method("m", JavaType::VOID)
                    .throws(known::IO_EXCEPTION)
                    .throws(sql_exception),
            ),
        )
        .with(
            ClassDef::interface("com.acme.B")
                .extends(known::REMOTE)
                .member(MemberDef::method("m", JavaType::VOID).throws(known::IO_EXCEPTION)),
        )
        .with(
            ClassDef::class("com.acme.Impl")
                .implements("com.acme.A")
                .implements("com.acme.B")
                .member(MemberDef::constructor())
                .member(MemberDef::method("m", JavaType::VOID)),
        );
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let id = classifier.classify_class("com.acme.Impl").unwrap();
    let methods = classifier.get(id).methods();

    assert_eq!(methods.len(), 1);
    let exceptions: Vec<&str> = methods[0]
        .exceptions
        .iter()
        .map(|&e| classifier.pool().java_name(e))
        .collect();
    assert_eq!(exceptions, vec![known::IO_EXCEPTION]);
}

#[test]
fn ambiguous_inherited_methods_are_rejected() {
    let table = ClassTable::with_platform_classes()
        .with(ClassDef::class("com.acme.Busy").extends(known::EXCEPTION))
        .with(
            ClassDef::interface("com.acme.Left")
                .extends(known::REMOTE)
                .member(remote_method("ping", JavaType::VOID)),
        )
        .with(
            ClassDef::interface("com.acme.Right")
                .extends(known::REMOTE)
                .member(remote_method("ping", JavaType::VOID).throws("com.acme.Busy")),
        )
        .with(
            ClassDef::interface("com.acme.Both")
                .extends("com.acme.Left")
                .extends("com.acme.Right"),
        );
    let failure = rejected(&table, MappingOptions::default(), "com.acme.Both");
    assert_eq!(failure.constraints(), vec![Constraint::AmbiguousInheritedMethod]);
}

#[test]
fn value_self_reference_resolves_to_one_type() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::class("com.acme.Node")
            .implements(known::SERIALIZABLE)
            .member(MemberDef::field("next", JavaType::class("com.acme.Node")))
            .member(MemberDef::field("label", JavaType::class(known::JAVA_LANG_STRING))),
    );
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let id = classifier.classify_class("com.acme.Node").unwrap();
    let data = classifier.get(id);

    assert!(data.is_valid());
    assert_eq!(member(data, "next").ty, id);
    let label = classifier.get(member(data, "label").ty);
    assert_eq!(label.qualified_idl_name, "CORBA::WStringValue");
    assert_eq!(label.repository_id.as_deref(), Some("IDL:omg.org/CORBA/WStringValue:1.0"));
}

#[test]
fn string_constants_map_to_wstring() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::interface("com.acme.Names")
            .extends(known::REMOTE)
            .member(
                MemberDef::field("GREETING", JavaType::class(known::JAVA_LANG_STRING))
                    .constant(ConstantValue::String("hi \"there\"".to_owned())),
            )
            .member(MemberDef::field("LIMIT", JavaType::INT).constant(ConstantValue::Int(10)))
            .member(remote_method("name", JavaType::class(known::JAVA_LANG_STRING))),
    );
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let id = classifier.classify_class("com.acme.Names").unwrap();
    let data = classifier.get(id);

    let greeting = member(data, "GREETING");
    assert_eq!(greeting.value.as_deref(), Some("L\"hi \\\"there\\\"\""));
    assert_eq!(classifier.get(greeting.ty).idl_name, "wstring");
    assert_eq!(member(data, "LIMIT").value.as_deref(), Some("10"));
    assert_eq!(member(data, "LIMIT").ty, TypeId::INT);

    let returned = classifier.get(data.methods()[0].return_type);
    assert_eq!(returned.idl_name, "WStringValue");
    assert_ne!(greeting.ty, data.methods()[0].return_type);
}

#[test]
fn constant_literals() {
    assert_eq!(constant_literal(&ConstantValue::Boolean(true)), "TRUE");
    assert_eq!(constant_literal(&ConstantValue::Char('x')), "L'x'");
    assert_eq!(constant_literal(&ConstantValue::Long(-7)), "-7");
    assert_eq!(constant_literal(&ConstantValue::Float(2.0)), "2.0");
    assert_eq!(constant_literal(&ConstantValue::Double(0.25)), "0.25");
}

#[test]
fn class_and_class_desc_share_a_type() {
    let table = ClassTable::with_platform_classes();
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let class = classifier.classify_class(known::JAVA_LANG_CLASS).unwrap();
    let desc = classifier.classify_class(known::CLASS_DESC).unwrap();

    assert_eq!(class, desc);
    assert_eq!(classifier.get(class).qualified_idl_name, "javax::rmi::CORBA::ClassDesc");
}

#[test]
fn object_and_special_interfaces_have_fixed_names() {
    let table = ClassTable::with_platform_classes();
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let object = classifier.classify_class(known::JAVA_LANG_OBJECT).unwrap();
    let serializable = classifier.classify_class(known::SERIALIZABLE).unwrap();
    let corba = classifier.classify_class(known::CORBA_OBJECT).unwrap();

    assert_eq!(classifier.get(object).qualified_idl_name, "java::lang::_Object");
    assert_eq!(classifier.get(object).repository_id.as_deref(), Some("IDL:omg.org/CORBA/Any:1.0"));
    assert_eq!(classifier.get(serializable).qualified_idl_name, "java::io::Serializable");
    assert_eq!(classifier.get(corba).idl_name, "Object");
    assert!(is_special_typedef(known::SERIALIZABLE));
    assert!(!is_special_typedef(known::CORBA_OBJECT));
}

#[test]
fn arrays_map_to_boxed_sequences() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::interface("com.acme.Grid")
            .extends(known::REMOTE)
            .member(remote_method("cells", JavaType::array(JavaType::INT, 2))),
    );
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let id = classifier.classify_class("com.acme.Grid").unwrap();
    let array = classifier.get(classifier.get(id).methods()[0].return_type);

    assert_eq!(array.array(), Some((TypeId::INT, 2)));
    assert_eq!(array.qualified_idl_name, "org::omg::boxedRMI::seq2_long");
    assert_eq!(array.repository_id.as_deref(), Some("RMI:[[I:0000000000000000"));
}

#[test]
fn sequences_of_escaped_names_drop_the_underscore() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::interface("com.acme.Bag")
            .extends(known::REMOTE)
            .member(
                remote_method("put", JavaType::VOID)
                    .arg("all", JavaType::array(JavaType::class(known::JAVA_LANG_OBJECT), 1)),
            ),
    );
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let id = classifier.classify_class("com.acme.Bag").unwrap();
    let array = classifier.get(classifier.get(id).methods()[0].arguments[0]);

    assert_eq!(array.idl_name, "seq1_Object");
    assert_eq!(array.qualified_idl_name, "org::omg::boxedRMI::java::lang::seq1_Object");
}

#[test]
fn remote_methods_must_throw_remote_exception() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::interface("com.acme.Quiet")
            .extends(known::REMOTE)
            .member(MemberDef::method("ping", JavaType::VOID)),
    );
    let failure = rejected(&table, MappingOptions::default(), "com.acme.Quiet");
    assert_eq!(failure.constraints(), vec![Constraint::MissingRemoteException]);
    assert_eq!(failure.root, "com.acme.Quiet");
}

#[test]
fn remote_interface_fields_must_be_constants() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::interface("com.acme.Counter")
            .extends(known::REMOTE)
            .member(MemberDef::field("counter", JavaType::INT)),
    );
    let failure = rejected(&table, MappingOptions::default(), "com.acme.Counter");
    assert!(failure.has_constraint(Constraint::NonConformingConstant));
}

#[test]
fn thrown_interfaces_and_remote_exceptions_are_rejected() {
    let table = bank()
        .with(ClassDef::interface("com.acme.Fault"))
        .with(
            ClassDef::class("com.acme.RemoteFault")
                .extends(known::EXCEPTION)
                .implements(known::REMOTE),
        )
        .with(
            ClassDef::interface("com.acme.ThrowsInterface")
                .extends(known::REMOTE)
                .member(remote_method("ping", JavaType::VOID).throws("com.acme.Fault")),
        )
        .with(
            ClassDef::interface("com.acme.ThrowsRemote")
                .extends(known::REMOTE)
                .member(remote_method("ping", JavaType::VOID).throws("com.acme.RemoteFault")),
        );

    let failure = rejected(&table, MappingOptions::default(), "com.acme.ThrowsInterface");
    assert_eq!(failure.constraints(), vec![Constraint::ExceptionNotClass]);
    let failure = rejected(&table, MappingOptions::default(), "com.acme.ThrowsRemote");
    assert_eq!(failure.constraints(), vec![Constraint::ValueIsRemote]);
}

#[test]
fn implementations_stay_out_of_signatures() {
    let table = bank().with(
        ClassDef::interface("com.acme.Bank")
            .extends(known::REMOTE)
            .member(remote_method("open", JavaType::class(ACCOUNT_IMPL))),
    );
    let failure = rejected(&table, MappingOptions::default(), "com.acme.Bank");
    assert_eq!(
        failure.constraints(),
        vec![Constraint::ImplementationInSignature, Constraint::InvalidReturnType]
    );
}

#[test]
fn unknown_argument_types_are_reported() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::interface("com.acme.Lookup")
            .extends(known::REMOTE)
            .member(remote_method("find", JavaType::VOID).arg("key", JavaType::class("com.acme.Missing"))),
    );
    let failure = rejected(&table, MappingOptions::default(), "com.acme.Lookup");
    assert!(matches!(failure.errors[0], MappingError::ClassNotFound { .. }));
    assert!(failure.has_constraint(Constraint::InvalidArgumentType));
}

#[test]
fn value_fields_may_not_hold_implementations() {
    let table = bank().with(
        ClassDef::class("com.acme.Holder")
            .implements(known::SERIALIZABLE)
            .member(MemberDef::field("account", JavaType::class(ACCOUNT_IMPL))),
    );
    let failure = rejected(&table, MappingOptions::default(), "com.acme.Holder");
    assert!(failure.has_constraint(Constraint::ImplementationMember));

    let table = bank().with(
        ClassDef::class("com.acme.Holder")
            .implements(known::SERIALIZABLE)
            .member(
                MemberDef::field("account", JavaType::class(ACCOUNT_IMPL))
                    .with_modifiers(Modifiers::PRIVATE | Modifiers::TRANSIENT),
            ),
    );
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    assert!(classifier.classify_class("com.acme.Holder").is_ok());
}

#[test]
fn implementation_without_direct_remote_interface() {
    let table = bank().with(ClassDef::class("com.acme.SavingsImpl").extends(ACCOUNT_IMPL));
    let failure = rejected(&table, MappingOptions::default(), "com.acme.SavingsImpl");
    assert_eq!(failure.constraints(), vec![Constraint::NoRemoteInterface]);
}

#[test]
fn non_conforming_classes_need_the_option() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::class("com.acme.Plain")
            .member(MemberDef::field("size", JavaType::INT))
            .member(MemberDef::method("size", JavaType::INT)),
    );
    let failure = rejected(&table, MappingOptions::default(), "com.acme.Plain");
    assert_eq!(failure.constraints(), vec![Constraint::NonConformingDisabled]);

    let mut classifier = Classifier::new(&table, non_conforming());
    let id = classifier.classify_class("com.acme.Plain").unwrap();
    let data = classifier.get(id);
    assert!(matches!(data.kind, TypeKind::NcClass(_)));
    assert!(data.is(TypeCode::NON_CONFORMING));
    assert_eq!(idl_names(data), vec!["size"]);
    assert_eq!(member(data, "size").idl_name, "size_");
}

fn fault_table(fault: ClassDef) -> ClassTable {
    let name = fault.name.clone();
    ClassTable::with_platform_classes()
        .with(fault.extends(known::EXCEPTION))
        .with(
            ClassDef::interface("com.acme.Service")
                .extends(known::REMOTE)
                .member(remote_method("run", JavaType::VOID).throws(name)),
        )
}

#[test]
fn persistent_field_declarations_are_checked() {
    let wrong_modifiers = ClassDef::class("com.acme.Fault")
        .member(
            MemberDef::field(
                known::SERIAL_PERSISTENT_FIELDS,
                JavaType::array(JavaType::class(known::OBJECT_STREAM_FIELD), 1),
            )
            .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL),
        )
        .persistent_fields([]);
    let failure = rejected(&fault_table(wrong_modifiers), non_conforming(), "com.acme.Service");
    assert!(failure.has_constraint(Constraint::PersistentFieldsModifiers));

    let missing = ClassDef::class("com.acme.Fault")
        .member(MemberDef::field("code", JavaType::INT))
        .persistent_fields([PersistentField::new("reason", JavaType::INT)]);
    let failure = rejected(&fault_table(missing), non_conforming(), "com.acme.Service");
    assert!(failure.has_constraint(Constraint::PersistentFieldMissing));

    let mismatched = ClassDef::class("com.acme.Fault")
        .member(MemberDef::field("code", JavaType::INT))
        .persistent_fields([PersistentField::new("code", JavaType::LONG)]);
    let failure = rejected(&fault_table(mismatched), non_conforming(), "com.acme.Service");
    assert!(failure.has_constraint(Constraint::PersistentFieldMismatch));
}

#[test]
fn unlisted_fields_become_transient() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::class("com.acme.Record")
            .implements(known::SERIALIZABLE)
            .member(MemberDef::field("kept", JavaType::INT))
            .member(MemberDef::field("dropped", JavaType::INT))
            .member(MemberDef::field("shared", JavaType::INT).with_modifiers(Modifiers::STATIC))
            .persistent_fields([PersistentField::new("kept", JavaType::INT)]),
    );
    let mut classifier = Classifier::new(&table, non_conforming());
    let id = classifier.classify_class("com.acme.Record").unwrap();
    let data = classifier.get(id);

    assert!(!member(data, "kept").is_transient());
    assert!(member(data, "dropped").is_transient());
    assert_eq!(member(data, "dropped").visibility(), "public transient");
    assert!(!member(data, "shared").is_transient());
    assert!(!data.is_custom());
}

#[test]
fn custom_marshaling() {
    let write_object = MemberDef::method("writeObject", JavaType::VOID)
        .arg("out", JavaType::class(known::OBJECT_OUTPUT_STREAM))
        .with_modifiers(Modifiers::PRIVATE);
    let table = ClassTable::with_platform_classes()
        .with(
            ClassDef::class("com.acme.Custom")
                .implements(known::SERIALIZABLE)
                .member(write_object),
        )
        .with(ClassDef::class("com.acme.Blob").implements(known::EXTERNALIZABLE))
        .with(ClassDef::class("com.acme.Plain").implements(known::SERIALIZABLE));
    let mut classifier = Classifier::new(&table, non_conforming());

    for (name, custom) in [("com.acme.Custom", true), ("com.acme.Blob", true), ("com.acme.Plain", false)] {
        let id = classifier.classify_class(name).unwrap();
        assert_eq!(classifier.get(id).is_custom(), custom, "{name}");
    }
}

#[test]
fn failed_roots_leave_nothing_cached() {
    let table = bank()
        .with(
            ClassDef::class("com.acme.Broken")
                .implements(known::SERIALIZABLE)
                .member(MemberDef::field("ok", JavaType::class("com.acme.Fine")))
                .member(MemberDef::field("bad", JavaType::class("com.acme.Missing"))),
        )
        .with(ClassDef::class("com.acme.Fine").implements(known::SERIALIZABLE));
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    classifier.classify_class(ACCOUNT).unwrap();
    let cached = classifier.pool().cached();

    let failure = classifier.classify_class("com.acme.Broken").unwrap_err();
    assert_eq!(failure.errors.len(), 1);
    assert_eq!(classifier.pool().cached(), cached);
    assert!(classifier.pool().find("com.acme.Broken").is_none());
    assert!(classifier.pool().find("com.acme.Fine").is_none());
    assert!(classifier.pool().find(ACCOUNT).is_some());

    classifier.classify_class("com.acme.Fine").unwrap();
}

#[test]
fn reconfigure_discards_the_cache_only_on_change() {
    let table = bank();
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    classifier.classify_class(ACCOUNT).unwrap();
    let cached = classifier.pool().cached();
    assert!(cached > 0);

    classifier.reconfigure(MappingOptions::default());
    assert_eq!(classifier.pool().cached(), cached);

    classifier.reconfigure(non_conforming());
    assert_eq!(classifier.pool().cached(), 0);
    assert!(classifier.options().parse_non_conforming);
}

#[test]
fn inner_classes_are_named_with_double_underscores() {
    let table = ClassTable::with_platform_classes()
        .with(
            ClassDef::class("com.acme.Outer")
                .implements(known::SERIALIZABLE)
                .member(MemberDef::inner_class("com.acme.Outer$Inner")),
        )
        .with(
            ClassDef::class("com.acme.Outer$Inner")
                .implements(known::SERIALIZABLE)
                .inner_of("com.acme.Outer"),
        );
    let mut classifier = Classifier::new(&table, MappingOptions::default());
    let id = classifier.classify_class("com.acme.Outer").unwrap();
    let inner = member(classifier.get(id), "Inner");

    assert!(inner.is_inner_class_declaration);
    let inner = classifier.get(inner.ty);
    assert!(inner.is(TypeCode::INNER));
    assert_eq!(inner.idl_name, "Outer__Inner");
}
