//! Diagnostic codes.
//!
//! Format: `IDL###`:
//! - IDL001-IDL099: mapping constraints, numbered as [`Constraint`]
//! - IDL1xx: environment and output errors

use std::fmt;

use crate::Constraint;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// A numbered mapping constraint failed.
    Constraint(Constraint),
    /// A referenced class is missing from the class model.
    ClassNotFound,
    /// Two output types resolve to the same file.
    OutputCollision,
    /// No mapping category accepted a type, and no rule explained why.
    Unmappable,
}

impl ErrorCode {
    /// Numeric part of the code.
    pub fn number(&self) -> u16 {
        match self {
            ErrorCode::Constraint(constraint) => u16::from(constraint.number()),
            ErrorCode::ClassNotFound => 100,
            ErrorCode::OutputCollision => 101,
            ErrorCode::Unmappable => 102,
        }
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, ErrorCode::Constraint(_))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IDL{:03}", self.number())
    }
}

impl From<Constraint> for ErrorCode {
    fn from(constraint: Constraint) -> Self {
        ErrorCode::Constraint(constraint)
    }
}

#[cfg(test)]
mod tests;
