//! Member declarations.

use crate::{JavaType, Modifiers};

/// Kind of a class member, in the sense of the declaration list.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
    /// Static or instance initializer block.
    Initializer,
    /// Declaration of a nested class; carries its qualified name.
    InnerClass(String),
}

/// A method or constructor parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Argument {
    /// Parameter name, when the model retained it.
    pub name: Option<String>,
    pub ty: JavaType,
}

/// Compile-time constant value of a `static final` field.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstantValue {
    Boolean(bool),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

/// One entry of a class's declaration list.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberDef {
    pub name: String,
    pub kind: MemberKind,
    pub modifiers: Modifiers,
    /// Field type, or return type for methods (`void` for constructors).
    pub ty: JavaType,
    pub arguments: Vec<Argument>,
    /// Qualified names of declared thrown types.
    pub exceptions: Vec<String>,
    pub constant: Option<ConstantValue>,
}

impl MemberDef {
    /// Name javac gives constructors.
    pub const CONSTRUCTOR_NAME: &'static str = "<init>";
    /// Name javac gives static initializers.
    pub const INITIALIZER_NAME: &'static str = "<clinit>";

    fn new(name: impl Into<String>, kind: MemberKind, ty: JavaType, modifiers: Modifiers) -> Self {
        MemberDef {
            name: name.into(),
            kind,
            modifiers,
            ty,
            arguments: Vec::new(),
            exceptions: Vec::new(),
            constant: None,
        }
    }

    /// A public field.
    pub fn field(name: impl Into<String>, ty: JavaType) -> Self {
        Self::new(name, MemberKind::Field, ty, Modifiers::PUBLIC)
    }

    /// A public method.
    pub fn method(name: impl Into<String>, returns: JavaType) -> Self {
        Self::new(name, MemberKind::Method, returns, Modifiers::PUBLIC)
    }

    /// A public constructor.
    pub fn constructor() -> Self {
        Self::new(
            Self::CONSTRUCTOR_NAME,
            MemberKind::Constructor,
            JavaType::VOID,
            Modifiers::PUBLIC,
        )
    }

    /// A static initializer block.
    pub fn initializer() -> Self {
        Self::new(
            Self::INITIALIZER_NAME,
            MemberKind::Initializer,
            JavaType::VOID,
            Modifiers::STATIC,
        )
    }

    /// Declaration of the nested class `qualified` (binary name, `Outer$Inner`).
    pub fn inner_class(qualified: impl Into<String>) -> Self {
        let qualified = qualified.into();
        let simple = qualified
            .rsplit(['$', '.'])
            .next()
            .unwrap_or(qualified.as_str())
            .to_owned();
        let ty = JavaType::Class(qualified.clone());
        Self::new(
            simple,
            MemberKind::InnerClass(qualified),
            ty,
            Modifiers::PUBLIC | Modifiers::STATIC,
        )
    }

    /// Append a named parameter.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, ty: JavaType) -> Self {
        self.arguments.push(Argument {
            name: Some(name.into()),
            ty,
        });
        self
    }

    /// Append a parameter whose name the model did not retain.
    #[must_use]
    pub fn unnamed_arg(mut self, ty: JavaType) -> Self {
        self.arguments.push(Argument { name: None, ty });
        self
    }

    /// Append a thrown type.
    #[must_use]
    pub fn throws(mut self, exception: impl Into<String>) -> Self {
        self.exceptions.push(exception.into());
        self
    }

    /// Replace the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Attach a compile-time constant value.
    #[must_use]
    pub fn constant(mut self, value: ConstantValue) -> Self {
        self.constant = Some(value);
        self
    }

    /// Methods and constructors.
    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method | MemberKind::Constructor)
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, MemberKind::Constructor)
    }

    pub fn is_initializer(&self) -> bool {
        matches!(self.kind, MemberKind::Initializer)
    }

    /// Fields and nested class declarations, the non-method members.
    pub fn is_variable(&self) -> bool {
        matches!(self.kind, MemberKind::Field | MemberKind::InnerClass(_))
    }

    pub fn is_inner_class(&self) -> bool {
        matches!(self.kind, MemberKind::InnerClass(_))
    }

    pub fn argument_types(&self) -> impl Iterator<Item = &JavaType> {
        self.arguments.iter().map(|argument| &argument.ty)
    }

    /// Whether `name` and the parameter types match this member.
    pub fn has_signature(&self, name: &str, arguments: &[JavaType]) -> bool {
        self.name == name
            && self.arguments.len() == arguments.len()
            && self.argument_types().zip(arguments).all(|(a, b)| a == b)
    }
}
