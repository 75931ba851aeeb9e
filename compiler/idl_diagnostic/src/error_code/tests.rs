use super::*;

#[test]
fn constraint_codes_are_zero_padded() {
    assert_eq!(ErrorCode::from(Constraint::NotRemote).to_string(), "IDL001");
    assert_eq!(ErrorCode::from(Constraint::ImplementationMember).to_string(), "IDL028");
}

#[test]
fn environment_codes() {
    assert_eq!(ErrorCode::ClassNotFound.to_string(), "IDL100");
    assert_eq!(ErrorCode::OutputCollision.to_string(), "IDL101");
    assert_eq!(ErrorCode::Unmappable.to_string(), "IDL102");
    assert!(!ErrorCode::ClassNotFound.is_constraint());
}
