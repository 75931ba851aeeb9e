//! The numbered mapping constraints.
//!
//! Numbers are stable: they identify a failure in diagnostics and tests.
//! New rules are appended, never renumbered.

use std::fmt;

/// A structural rule a Java type must satisfy to map to a given IDL form.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum Constraint {
    /// Remote interface does not extend `java.rmi.Remote`.
    NotRemote = 1,
    /// A `serialPersistentFields` entry disagrees with the field's type.
    PersistentFieldMismatch = 2,
    /// Constant is neither primitive nor `String`.
    NonConformingConstant = 3,
    /// `serialPersistentFields` is not `private static final`.
    PersistentFieldsModifiers = 4,
    /// Remote method does not throw `RemoteException` or a superclass of it.
    MissingRemoteException = 5,
    /// Same method inherited from unrelated interfaces.
    AmbiguousInheritedMethod = 6,
    /// Type or module name collides case-insensitively with another.
    TypeNameCollision = 7,
    /// Implementation class implements no remote interface.
    NoRemoteInterface = 8,
    /// `serialPersistentFields` names a field the class does not declare.
    PersistentFieldMissing = 9,
    /// Value type implements `java.rmi.Remote`.
    ValueIsRemote = 10,
    /// Value type does not implement `java.io.Serializable`.
    ValueNotSerializable = 11,
    /// Superclass could not be mapped.
    InvalidSuperclass = 12,
    /// Two methods map to the same IDL name.
    MethodNameCollision = 13,
    /// Abstract type is not an interface.
    AbstractNotInterface = 14,
    /// Abstract interface extends `java.rmi.Remote`.
    AbstractIsRemote = 15,
    /// Remote type is not an interface.
    RemoteNotInterface = 16,
    /// Implementation type is not a class.
    ImplementationNotClass = 17,
    /// `IDLEntity` exception used as an argument or return type.
    IdlEntityException = 18,
    /// Two interface members map to the same IDL name.
    InterfaceMemberCollision = 19,
    /// Two class members map to the same IDL name.
    ClassMemberCollision = 20,
    /// Implementation type used as an argument or return type.
    ImplementationInSignature = 21,
    /// Thrown type is not a class.
    ExceptionNotClass = 22,
    /// Thrown type cannot be mapped as a value type.
    InvalidException = 23,
    /// Return type cannot be mapped.
    InvalidReturnType = 24,
    /// Argument type cannot be mapped.
    InvalidArgumentType = 25,
    /// Inherited interface cannot be mapped.
    InvalidInterface = 26,
    /// Non-conforming type found while non-conforming mapping is disabled.
    NonConformingDisabled = 27,
    /// Implementation type used as a data member.
    ImplementationMember = 28,
}

impl Constraint {
    pub const ALL: [Constraint; 28] = [
        Constraint::NotRemote,
        Constraint::PersistentFieldMismatch,
        Constraint::NonConformingConstant,
        Constraint::PersistentFieldsModifiers,
        Constraint::MissingRemoteException,
        Constraint::AmbiguousInheritedMethod,
        Constraint::TypeNameCollision,
        Constraint::NoRemoteInterface,
        Constraint::PersistentFieldMissing,
        Constraint::ValueIsRemote,
        Constraint::ValueNotSerializable,
        Constraint::InvalidSuperclass,
        Constraint::MethodNameCollision,
        Constraint::AbstractNotInterface,
        Constraint::AbstractIsRemote,
        Constraint::RemoteNotInterface,
        Constraint::ImplementationNotClass,
        Constraint::IdlEntityException,
        Constraint::InterfaceMemberCollision,
        Constraint::ClassMemberCollision,
        Constraint::ImplementationInSignature,
        Constraint::ExceptionNotClass,
        Constraint::InvalidException,
        Constraint::InvalidReturnType,
        Constraint::InvalidArgumentType,
        Constraint::InvalidInterface,
        Constraint::NonConformingDisabled,
        Constraint::ImplementationMember,
    ];

    /// The stable rule number.
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Look up a rule by number.
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// One-line statement of the rule.
    pub const fn description(self) -> &'static str {
        match self {
            Constraint::NotRemote => "remote interface must extend java.rmi.Remote",
            Constraint::PersistentFieldMismatch => {
                "serialPersistentFields entry must match the declared field type"
            }
            Constraint::NonConformingConstant => "constants must be primitive or String",
            Constraint::PersistentFieldsModifiers => {
                "serialPersistentFields must be private static final"
            }
            Constraint::MissingRemoteException => {
                "remote methods must throw java.rmi.RemoteException or a superclass of it"
            }
            Constraint::AmbiguousInheritedMethod => {
                "method inherited from unrelated interfaces with different exceptions"
            }
            Constraint::TypeNameCollision => "type names may not differ only in case",
            Constraint::NoRemoteInterface => {
                "implementation classes must implement at least one remote interface"
            }
            Constraint::PersistentFieldMissing => {
                "serialPersistentFields names a field that is not declared"
            }
            Constraint::ValueIsRemote => "value types may not implement java.rmi.Remote",
            Constraint::ValueNotSerializable => "value types must implement java.io.Serializable",
            Constraint::InvalidSuperclass => "superclass cannot be mapped",
            Constraint::MethodNameCollision => "method names collide after mangling",
            Constraint::AbstractNotInterface => "abstract types must be interfaces",
            Constraint::AbstractIsRemote => "abstract interfaces may not extend java.rmi.Remote",
            Constraint::RemoteNotInterface => "remote types must be interfaces",
            Constraint::ImplementationNotClass => "implementation types must be classes",
            Constraint::IdlEntityException => {
                "IDLEntity exceptions may not be passed or returned by remote methods"
            }
            Constraint::InterfaceMemberCollision => "interface members collide after mangling",
            Constraint::ClassMemberCollision => "class members collide after mangling",
            Constraint::ImplementationInSignature => {
                "implementation types may not be passed or returned"
            }
            Constraint::ExceptionNotClass => "thrown types must be classes",
            Constraint::InvalidException => "thrown type cannot be mapped as a value type",
            Constraint::InvalidReturnType => "return type cannot be mapped",
            Constraint::InvalidArgumentType => "argument type cannot be mapped",
            Constraint::InvalidInterface => "inherited interface cannot be mapped",
            Constraint::NonConformingDisabled => {
                "type is non-conforming and non-conforming mapping is disabled"
            }
            Constraint::ImplementationMember => "implementation types may not be data members",
        }
    }

    /// Whether the rule reports a name collision.
    pub const fn is_name_collision(self) -> bool {
        matches!(
            self,
            Constraint::TypeNameCollision
                | Constraint::MethodNameCollision
                | Constraint::InterfaceMemberCollision
                | Constraint::ClassMemberCollision
        )
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.number(), self.description())
    }
}

/// A recorded constraint violation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConstraintFailure {
    pub constraint: Constraint,
    /// Qualified name of the offending class, method or member.
    pub entity: String,
    /// Classification frames, outermost first, at the point of failure.
    pub context: Vec<String>,
    /// Extra detail such as the two colliding names.
    pub detail: Option<String>,
}

impl ConstraintFailure {
    pub fn new(constraint: Constraint, entity: impl Into<String>, context: Vec<String>) -> Self {
        ConstraintFailure {
            constraint,
            entity: entity.into(),
            context,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for ConstraintFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entity, self.constraint)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}
