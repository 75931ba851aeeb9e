//! Java-to-IDL type classification.
//!
//! Maps the Java types a [`idl_ir::ClassModel`] describes onto the IDL
//! categories of the RMI-IIOP mapping:
//! - [`Classifier`] decides the category of each type and validates it
//! - [`TypePool`] caches every classified Type for one compilation
//! - [`names`] derives IDL identifiers, method names and module paths
//! - [`repository_id`] computes the repository id of each Type
//!
//! # Type Pool
//!
//! Types are stored once and referred to by [`TypeId`]. The nine
//! primitives occupy fixed ids; every other Type is added by the
//! classifier. Compound types reference each other by id, so cycles
//! through fields and signatures need no indirection.

mod classify;
mod code;
mod context;
mod data;
mod error;
mod id;
mod member;
mod method;
pub mod names;
mod options;
mod pool;
pub mod repository_id;

#[cfg(test)]
pub(crate) mod test_support;

pub use classify::{is_special_typedef, Classifier};
pub use code::TypeCode;
pub use context::{ContextCode, ContextStack, Frame, FrameSubject};
pub use data::{ClassData, CompoundData, CompoundFlags, Status, TypeData, TypeKind};
pub use error::{Attempt, ClassificationFailure, MappingError, Rejection};
pub use id::TypeId;
pub use member::Member;
pub use method::{compatible_exceptions, narrow_exceptions, unique_catch_list, AttributeKind, Method};
pub use names::{NameCollision, NameEnv};
pub use options::MappingOptions;
pub use pool::{Checkpoint, ContextSignature, TypeKey, TypePool};
