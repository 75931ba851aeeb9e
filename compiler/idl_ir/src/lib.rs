//! IDL IR - the class model consumed by the Java-to-IDL mapping.
//!
//! The mapping never inspects bytecode or source itself. It asks a
//! [`ClassModel`] for classes, their supertypes and their members, and
//! treats the answers as read-only facts:
//! - [`JavaType`] describes a field, argument or return type
//! - [`ClassDef`] and [`MemberDef`] describe declarations in order
//! - [`ClassModel`] resolves names and answers subtyping queries
//! - [`ClassTable`] is the in-memory model, seeded with the platform classes
//!   the mapping depends on
//!
//! # Design
//!
//! Classes are addressed by [`ClassId`] handles; references between classes
//! are by qualified name and resolved lazily, so a dangling reference only
//! fails when something actually follows it.

mod class;
mod java_type;
pub mod known;
mod member;
mod model;
mod modifiers;
mod table;

pub use class::{ClassDef, ClassKind, PersistentField};
pub use java_type::{JavaType, PrimitiveKind};
pub use member::{Argument, ConstantValue, MemberDef, MemberKind};
pub use model::{ClassId, ClassModel, ClassNotFound};
pub use modifiers::Modifiers;
pub use table::ClassTable;
