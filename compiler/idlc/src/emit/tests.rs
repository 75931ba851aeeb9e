#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use idl_ir::{ClassDef, ClassTable, ConstantValue, JavaType, MemberDef, Modifiers};
use idl_types::{Classifier, TypePool};
use pretty_assertions::assert_eq;

use super::*;
use crate::GeneratorConfig;

const ACCOUNT: &str = "com.acme.Account";
const OVERDRAWN: &str = "com.acme.Overdrawn";

fn remote_method(name: &str, returns: JavaType) -> MemberDef {
    MemberDef::method(name, returns).throws(known::REMOTE_EXCEPTION)
}

fn bank() -> ClassTable {
    ClassTable::with_platform_classes()
        .with(ClassDef::class(OVERDRAWN).extends(known::EXCEPTION))
        .with(
            ClassDef::interface(ACCOUNT)
                .extends(known::REMOTE)
                .member(remote_method("getBalance", JavaType::LONG))
                .member(remote_method("deposit", JavaType::VOID).arg("amount", JavaType::LONG))
                .member(
                    remote_method("withdraw", JavaType::VOID)
                        .arg("amount", JavaType::LONG)
                        .throws(OVERDRAWN),
                ),
        )
}

fn classify(table: &ClassTable, name: &str) -> (TypePool, TypeId) {
    let mut classifier = Classifier::new(table, GeneratorConfig::default().mapping_options());
    let id = classifier.classify_class(name).unwrap();
    (classifier.pool().clone(), id)
}

fn render<M: ClassModel + ?Sized>(ctx: IdlContext<'_, M>, id: TypeId, kind: OutputKind) -> String {
    let output = ctx
        .output_types(id)
        .into_iter()
        .find(|output| output.kind == kind)
        .unwrap();
    ctx.emit(&output).unwrap()
}

#[test]
fn remote_interface_file() {
    let table = bank();
    let (pool, account) = classify(&table, ACCOUNT);
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);

    let expected = "\
/**
 * com/acme/Account.idl
 * Generated by idlc. Do not edit
 */

#include \"com/acme/OverdrawnEx.idl\"
#include \"orb.idl\"

#ifndef __com_acme_Account__
#define __com_acme_Account__


module com {
module acme {

    interface Account {

        readonly attribute long long balance;
        void deposit(
            in long long amount );
        void withdraw(
            in long long amount ) raises (
            ::com::acme::OverdrawnEx );

    };

#pragma ID Account \"RMI:com.acme.Account:0000000000000000\"

};
};

#endif

";
    assert_eq!(render(ctx, account, OutputKind::Type), expected);
}

#[test]
fn exception_file_wraps_the_value_type() {
    let table = bank();
    let (pool, _) = classify(&table, ACCOUNT);
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);
    let overdrawn = pool.find(OVERDRAWN).unwrap();

    let expected = "\
/**
 * com/acme/OverdrawnEx.idl
 * Generated by idlc. Do not edit
 */


#ifndef __com_acme_OverdrawnEx__
#define __com_acme_OverdrawnEx__


#ifndef __com_acme_Overdrawn__

module com {
module acme {

    valuetype Overdrawn;

};
};

#endif


module com {
module acme {

    exception OverdrawnEx {

        Overdrawn value;

    };

};
};

#include \"com/acme/Overdrawn.idl\"
#endif

";
    assert_eq!(render(ctx, overdrawn, OutputKind::Exception), expected);
}

#[test]
fn value_type_lists_primitive_state_first() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::class("com.acme.Point")
            .implements(known::SERIALIZABLE)
            .member(
                MemberDef::field("LIMIT", JavaType::INT)
                    .with_modifiers(Modifiers::CONSTANT)
                    .constant(ConstantValue::Int(100)),
            )
            .member(
                MemberDef::field("label", JavaType::class(known::JAVA_LANG_STRING))
                    .with_modifiers(Modifiers::PRIVATE),
            )
            .member(MemberDef::field("y", JavaType::INT))
            .member(MemberDef::field("x", JavaType::INT)),
    );
    let (pool, point) = classify(&table, "com.acme.Point");
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);

    let text = render(ctx, point, OutputKind::Type);
    let body = "    valuetype Point {

        const long LIMIT = 100;
        public long x;
        public long y;
        private ::CORBA::WStringValue label;

    };
";
    assert!(text.contains(body), "{text}");
    assert!(text.contains("#pragma ID Point \"RMI:com.acme.Point:0000000000000000:0000000000000000\""));
}

#[test]
fn constructors_follow_the_factory_option() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::class("com.acme.Pair")
            .implements(known::SERIALIZABLE)
            .member(MemberDef::constructor().arg("left", JavaType::INT).arg("right", JavaType::INT)),
    );
    let (pool, pair) = classify(&table, "com.acme.Pair");

    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);
    let text = render(ctx, pair, OutputKind::Type);
    assert!(
        text.contains("        factory create(\n            in long left,\n            in long right );\n"),
        "{text}"
    );

    let config = GeneratorConfig::default().with_factory(false);
    let ctx = IdlContext::new(&table, &pool, &config);
    let text = render(ctx, pair, OutputKind::Type);
    assert!(text.contains("        init(\n            in long left,\n"), "{text}");
}

#[test]
fn abstract_interfaces_follow_supports() {
    let table = ClassTable::with_platform_classes()
        .with(ClassDef::interface("com.acme.Shape").member(remote_method("area", JavaType::DOUBLE)))
        .with(
            ClassDef::class("com.acme.Circle")
                .implements(known::SERIALIZABLE)
                .implements("com.acme.Shape"),
        );
    let (pool, circle) = classify(&table, "com.acme.Circle");
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);

    let text = render(ctx, circle, OutputKind::Type);
    assert!(text.contains("#include \"com/acme/Shape.idl\"\n"), "{text}");
    assert!(text.contains("    valuetype Circle supports ::com::acme::Shape {\n"), "{text}");

    let shape = pool.find("com.acme.Shape").unwrap();
    let text = render(ctx, shape, OutputKind::Type);
    assert!(text.contains("    abstract interface Shape {\n"), "{text}");
}

#[test]
fn implementation_joins_its_interfaces() {
    let table = bank()
        .with(
            ClassDef::interface("com.acme.Audited")
                .extends(known::REMOTE)
                .member(remote_method("audit", JavaType::VOID)),
        )
        .with(
            ClassDef::class("com.acme.AuditedAccount")
                .implements(ACCOUNT)
                .implements("com.acme.Audited")
                .member(remote_method("audit", JavaType::VOID)),
        );
    let (pool, audited) = classify(&table, "com.acme.AuditedAccount");
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);

    let text = render(ctx, audited, OutputKind::Type);
    assert!(
        text.contains("    interface AuditedAccount: ::com::acme::Account, ::com::acme::Audited {\n    };\n"),
        "{text}"
    );
    assert!(text.ends_with("};\n};\n\n#endif\n\n"), "{text}");
}

#[test]
fn nested_sequences_include_the_shallower_depth() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::class("com.acme.Grid")
            .implements(known::SERIALIZABLE)
            .member(MemberDef::field("cells", JavaType::array(JavaType::INT, 2))),
    );
    let (pool, grid) = classify(&table, "com.acme.Grid");
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);
    let cells = pool.get(grid).members()[0].ty;

    let outer = render(ctx, cells, OutputKind::Sequence { dimension: 2 });
    assert!(outer.contains(" * org/omg/boxedRMI/seq2_long.idl\n"), "{outer}");
    assert!(outer.contains("#include \"org/omg/boxedRMI/seq1_long.idl\"\n"), "{outer}");
    assert!(outer.contains("    valuetype seq2_long sequence<seq1_long>;\n"), "{outer}");
    assert!(outer.contains("#pragma ID seq2_long \"RMI:[[I:0000000000000000\"\n"), "{outer}");

    let inner = render(ctx, cells, OutputKind::Sequence { dimension: 1 });
    assert!(!inner.contains("#include"), "{inner}");
    assert!(inner.contains("    valuetype seq1_long sequence<long>;\n"), "{inner}");
    assert!(inner.contains("#pragma ID seq1_long \"RMI:[I:0000000000000000\"\n"), "{inner}");
}

#[test]
fn sequences_of_values_forward_declare_the_element() {
    let table = ClassTable::with_platform_classes()
        .with(ClassDef::class("com.acme.Point").implements(known::SERIALIZABLE))
        .with(
            ClassDef::class("com.acme.Path")
                .implements(known::SERIALIZABLE)
                .member(MemberDef::field("points", JavaType::array(JavaType::class("com.acme.Point"), 1))),
        );
    let (pool, path) = classify(&table, "com.acme.Path");
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);
    let points = pool.get(path).members()[0].ty;

    let text = render(ctx, points, OutputKind::Sequence { dimension: 1 });
    assert!(text.contains("#ifndef __com_acme_Point__\n\nmodule com {"), "{text}");
    assert!(text.contains("    valuetype Point;\n"), "{text}");
    assert!(text.contains("    valuetype seq1_Point sequence<::com::acme::Point>;\n"), "{text}");
    assert!(text.ends_with("#include \"com/acme/Point.idl\"\n#endif\n\n"), "{text}");

    let text = render(ctx, path, OutputKind::Type);
    assert!(text.contains("#include \"org/omg/boxedRMI/com/acme/seq1_Point.idl\"\n"), "{text}");
    assert!(text.contains("        public ::org::omg::boxedRMI::com::acme::seq1_Point points;\n"), "{text}");
}

#[test]
fn object_sequences_are_named_as_defined() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::interface("com.acme.Bag")
            .extends(known::REMOTE)
            .member(
                remote_method("put", JavaType::VOID)
                    .arg("all", JavaType::array(JavaType::class(known::JAVA_LANG_OBJECT), 1)),
            ),
    );
    let (pool, bag) = classify(&table, "com.acme.Bag");
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);

    let text = render(ctx, bag, OutputKind::Type);
    assert!(text.contains("#include \"org/omg/boxedRMI/java/lang/seq1_Object.idl\"\n"), "{text}");
    assert!(text.contains("            in ::org::omg::boxedRMI::java::lang::seq1_Object all );\n"), "{text}");

    let all = pool.get(bag).methods()[0].arguments[0];
    let text = render(ctx, all, OutputKind::Sequence { dimension: 1 });
    assert!(text.contains("    valuetype seq1_Object sequence<::java::lang::_Object>;\n"), "{text}");
}

#[test]
fn special_types_are_fixed_typedefs() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::class("com.acme.Holder")
            .implements(known::SERIALIZABLE)
            .member(MemberDef::field("anything", JavaType::class(known::JAVA_LANG_OBJECT))),
    );
    let (pool, holder) = classify(&table, "com.acme.Holder");
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);
    let object = pool.get(holder).members()[0].ty;

    let text = render(ctx, object, OutputKind::Type);
    assert!(text.contains(" * java/lang/Object.idl\n"), "{text}");
    assert!(text.contains("#ifndef __java_lang_Object__\n"), "{text}");
    assert!(text.contains("    typedef any _Object;\n"), "{text}");

    let text = render(ctx, holder, OutputKind::Type);
    assert!(text.contains("#include \"java/lang/Object.idl\"\n"), "{text}");
    assert!(text.contains("        public ::java::lang::_Object anything;\n"), "{text}");
}

#[test]
fn boxed_entities_wrap_their_idl_definition() {
    let table = ClassTable::with_platform_classes().with(
        ClassDef::class("fake.omega.Juliet")
            .implements(known::IDL_ENTITY)
            .repository_id("IDL:phoney.pfix/omega/Juliet:1.0"),
    );
    let (pool, juliet) = classify(&table, "fake.omega.Juliet");
    let config = GeneratorConfig::default();
    let ctx = IdlContext::new(&table, &pool, &config);

    let text = render(ctx, juliet, OutputKind::Type);
    assert!(text.contains(" * org/omg/boxedIDL/omega/Juliet.idl\n"), "{text}");
    assert!(text.contains("#include \"omega/Juliet.idl\"\n"), "{text}");
    assert!(text.contains("    valuetype Juliet ::omega::Juliet;\n"), "{text}");
    assert!(
        text.contains("#pragma ID Juliet \"IDL:omg.org/boxedIDL/omega/Juliet:1.0\"\n"),
        "{text}"
    );

    let config = GeneratorConfig::default().with_idl_file("fake.omega", "juliet.idl");
    let ctx = IdlContext::new(&table, &pool, &config);
    let text = render(ctx, juliet, OutputKind::Type);
    assert!(text.contains("#include \"juliet.idl\"\n"), "{text}");
}

#[test]
fn writer_indents_only_text() {
    let mut out = IdlWriter::new();
    out.line("a {");
    out.indent();
    out.newline();
    out.text("b");
    out.text("c");
    out.newline();
    out.outdent();
    out.outdent();
    out.line("}");
    assert_eq!(out.as_str(), "a {\n\n    bc\n}\n");
}
