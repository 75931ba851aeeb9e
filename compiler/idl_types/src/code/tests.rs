use super::*;

#[test]
fn categories_and_modifiers_do_not_overlap() {
    assert!(TypeCode::CATEGORY_MASK
        .intersection(TypeCode::MODIFIER_MASK)
        .is_empty());
    assert_eq!(TypeCode::INNER.bits(), 0x8000_0000);
}

#[test]
fn is_requires_every_bit() {
    let code = TypeCode::VALUE | TypeCode::COMPOUND | TypeCode::CLASS;
    assert!(code.is(TypeCode::VALUE));
    assert!(code.is(TypeCode::VALUE | TypeCode::CLASS));
    assert!(!code.is(TypeCode::VALUE | TypeCode::INTERFACE));
}

#[test]
fn primitive_codes() {
    let code = TypeCode::primitive(PrimitiveKind::Long);
    assert!(code.is(TypeCode::LONG | TypeCode::PRIMITIVE));
    assert_eq!(code.category(), TypeCode::LONG);
    assert_eq!(code.category_name(), "long");
}

#[test]
fn category_ignores_modifiers() {
    let code = TypeCode::NC_CLASS | TypeCode::COMPOUND | TypeCode::NON_CONFORMING | TypeCode::INNER;
    assert_eq!(code.category(), TypeCode::NC_CLASS);
    assert_eq!(code.category_name(), "NC Class");
}
