//! Data members: fields, constants and nested class declarations.

use idl_diagnostic::Constraint;
use idl_ir::{known, ClassId, ClassModel, ConstantValue, JavaType, MemberDef, PrimitiveKind};

use super::Classifier;
use crate::{Attempt, ContextCode, FrameSubject, Member, TypeId};

/// Types a constant may have in IDL: primitives and `String`.
fn is_conforming_constant_type(ty: &JavaType) -> bool {
    match ty {
        JavaType::Primitive(kind) => *kind != PrimitiveKind::Void,
        JavaType::Class(name) => name == known::JAVA_LANG_STRING,
        JavaType::Array { .. } => false,
    }
}

/// IDL literal for a constant value.
pub(super) fn constant_literal(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Boolean(true) => "TRUE".to_owned(),
        ConstantValue::Boolean(false) => "FALSE".to_owned(),
        ConstantValue::Char(c) => format!("L'{c}'"),
        ConstantValue::Int(value) => value.to_string(),
        ConstantValue::Long(value) => value.to_string(),
        ConstantValue::Float(value) => float_literal(value.to_string()),
        ConstantValue::Double(value) => float_literal(value.to_string()),
        ConstantValue::String(text) => {
            let mut literal = String::with_capacity(text.len() + 3);
            literal.push_str("L\"");
            for c in text.chars() {
                match c {
                    '"' => literal.push_str("\\\""),
                    '\\' => literal.push_str("\\\\"),
                    '\n' => literal.push_str("\\n"),
                    '\t' => literal.push_str("\\t"),
                    '\r' => literal.push_str("\\r"),
                    c => literal.push(c),
                }
            }
            literal.push('"');
            literal
        }
    }
}

/// Keep a decimal point on integral floating values.
fn float_literal(mut digits: String) -> String {
    if digits.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        digits.push_str(".0");
    }
    digits
}

/// The literal of a compile-time constant field.
fn constant_value(def: &MemberDef) -> Option<String> {
    let modifiers = def.modifiers;
    if def.is_inner_class() || !(modifiers.is_static() && modifiers.is_final()) {
        return None;
    }
    def.constant.as_ref().map(constant_literal)
}

impl<M: ClassModel + ?Sized> Classifier<'_, M> {
    /// Every field and nested class declaration of `class`.
    ///
    /// With `only_conforming`, every field must be a constant of a
    /// conforming type.
    pub(super) fn add_all_members(
        &mut self,
        class: ClassId,
        only_conforming: bool,
        quiet: bool,
    ) -> Attempt<Vec<Member>> {
        let model = self.model;
        let mut members = Vec::new();
        for def in model.members(class) {
            if !def.is_variable() {
                continue;
            }
            let value = constant_value(def);
            if only_conforming && !def.is_inner_class() {
                if value.is_none() {
                    let entity = format!("{}.{}", model.qualified_name(class), def.name);
                    return Err(self.fail(Constraint::NonConformingConstant, quiet, &entity));
                }
                if !is_conforming_constant_type(&def.ty) {
                    let entity = format!("{}.{}", model.qualified_name(class), def.name);
                    return Err(self.fail(Constraint::NonConformingConstant, false, &entity));
                }
            }
            members.push(self.new_member(class, def, value, quiet)?);
        }
        Ok(members)
    }

    /// The constants of a non-conforming interface; other fields are
    /// skipped.
    pub(super) fn add_conforming_constants(&mut self, class: ClassId, quiet: bool) -> Attempt<Vec<Member>> {
        let model = self.model;
        let mut members = Vec::new();
        for def in model.members(class) {
            if def.kind != idl_ir::MemberKind::Field {
                continue;
            }
            let Some(value) = constant_value(def) else {
                continue;
            };
            if !is_conforming_constant_type(&def.ty) {
                let entity = format!("{}.{}", model.qualified_name(class), def.name);
                return Err(self.fail(Constraint::NonConformingConstant, quiet, &entity));
            }
            members.push(self.new_member(class, def, Some(value), quiet)?);
        }
        Ok(members)
    }

    /// Classify the type of field `def`. Nested class declarations are
    /// left for [`Self::init_inner_class_members`].
    fn new_member(
        &mut self,
        enclosing: ClassId,
        def: &MemberDef,
        value: Option<String>,
        quiet: bool,
    ) -> Attempt<Member> {
        let mut member = Member {
            name: def.name.clone(),
            ty: TypeId::VOID,
            value,
            modifiers: def.modifiers,
            forced_transient: false,
            is_inner_class_declaration: def.is_inner_class(),
            idl_name: String::new(),
        };
        if member.is_inner_class_declaration {
            return Ok(member);
        }

        let code = if member.value.is_some() {
            ContextCode::MemberConstant
        } else if def.modifiers.is_static() {
            ContextCode::MemberStatic
        } else if def.modifiers.is_transient() {
            ContextCode::MemberTransient
        } else {
            ContextCode::Member
        };
        let entity = format!("{}.{}", self.model.qualified_name(enclosing), def.name);
        self.stack.set_next_code(code);
        self.stack.push(FrameSubject::Member(entity.clone()));
        let result = match self.make_type(&def.ty) {
            Ok(id) if self.is_implementation(id) && !def.modifiers.is_static() && !def.modifiers.is_transient() => {
                Err(self.fail(Constraint::ImplementationMember, quiet, &entity))
            }
            other => other,
        };
        self.stack.pop(result.is_ok());
        member.ty = result?;
        Ok(member)
    }

    /// Classify the nested classes declared by `class`, once the enclosing
    /// type is registered.
    pub(super) fn init_inner_class_members(&mut self, class: ClassId, members: &mut [Member]) -> Attempt<()> {
        let model = self.model;
        for member in members.iter_mut().filter(|member| member.is_inner_class_declaration) {
            let Some(def) = model
                .members(class)
                .iter()
                .find(|def| def.is_inner_class() && def.name == member.name)
            else {
                continue;
            };
            let entity = format!("{}.{}", model.qualified_name(class), def.name);
            self.stack.set_next_code(ContextCode::Member);
            self.stack.push(FrameSubject::Member(entity));
            let result = self.make_type(&def.ty);
            self.stack.pop(result.is_ok());
            member.ty = result?;
        }
        Ok(())
    }
}
