//! Classification errors.
//!
//! # Design
//!
//! A classification attempt returns [`Attempt`]. [`Rejection::NoMatch`] is
//! the quiet outcome: the type does not fit this branch and the caller may
//! try the next one. [`Rejection::Fatal`] means a loud failure has already
//! been recorded as a [`MappingError`] and the whole root must fail.

use idl_diagnostic::{Constraint, ConstraintFailure, Diagnostic, ErrorCode};
use idl_ir::ClassNotFound;

/// Why a classification attempt produced no type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Rejection {
    /// The type does not fit; nothing was reported.
    NoMatch,
    /// A failure was reported; the root is lost.
    Fatal,
}

/// Result of one classification attempt.
pub type Attempt<T> = Result<T, Rejection>;

/// A reported mapping failure.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum MappingError {
    #[error("{0}")]
    Constraint(ConstraintFailure),

    #[error("{entity}: {constraint} (\"{first}\" and \"{second}\")")]
    NameCollision {
        constraint: Constraint,
        first: String,
        second: String,
        /// Type whose names collided.
        entity: String,
        context: Vec<String>,
    },

    #[error("class `{name}` not found")]
    ClassNotFound { name: String, context: Vec<String> },

    /// Every mapping category declined the root without reporting a rule.
    #[error("no mapping applies to `{name}`")]
    Unmappable { name: String },
}

impl MappingError {
    pub fn class_not_found(missing: &ClassNotFound, context: Vec<String>) -> Self {
        MappingError::ClassNotFound {
            name: missing.name.clone(),
            context,
        }
    }

    /// The violated rule, for constraint failures and collisions.
    pub fn constraint(&self) -> Option<Constraint> {
        match self {
            MappingError::Constraint(failure) => Some(failure.constraint),
            MappingError::NameCollision { constraint, .. } => Some(*constraint),
            MappingError::ClassNotFound { .. } | MappingError::Unmappable { .. } => None,
        }
    }

    pub fn context(&self) -> &[String] {
        match self {
            MappingError::Constraint(failure) => &failure.context,
            MappingError::NameCollision { context, .. }
            | MappingError::ClassNotFound { context, .. } => context,
            MappingError::Unmappable { .. } => &[],
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            MappingError::Constraint(failure) => Diagnostic::from(failure),
            MappingError::NameCollision {
                constraint,
                first,
                second,
                entity,
                context,
            } => Diagnostic::error(*constraint)
                .with_message(constraint.description())
                .with_subject(entity.clone())
                .with_context(context.clone())
                .with_note(format!("\"{first}\" and \"{second}\"")),
            MappingError::ClassNotFound { name, context } => {
                Diagnostic::error(ErrorCode::ClassNotFound)
                    .with_message(format!("class `{name}` not found"))
                    .with_subject(name.clone())
                    .with_context(context.clone())
            }
            MappingError::Unmappable { name } => Diagnostic::error(ErrorCode::Unmappable)
                .with_message(format!("no mapping applies to `{name}`"))
                .with_subject(name.clone()),
        }
    }
}

/// Every loud failure recorded while classifying one root.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("cannot map `{root}` ({} error(s))", errors.len())]
pub struct ClassificationFailure {
    pub root: String,
    pub errors: Vec<MappingError>,
}

impl ClassificationFailure {
    /// Constraint numbers of the recorded failures, in report order.
    pub fn constraints(&self) -> Vec<Constraint> {
        self.errors.iter().filter_map(MappingError::constraint).collect()
    }

    pub fn has_constraint(&self, constraint: Constraint) -> bool {
        self.errors
            .iter()
            .any(|error| error.constraint() == Some(constraint))
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.errors.iter().map(MappingError::to_diagnostic)
    }
}
