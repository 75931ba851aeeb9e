//! Diagnostic records.

use std::fmt;

use crate::{ConstraintFailure, ErrorCode};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A reportable problem.
///
/// There are no source spans: the subject of a mapping diagnostic is a
/// class, method or member, named in `subject`, and the nesting it was
/// reached through is listed in `context`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    /// Qualified name of the class, method or member concerned.
    pub subject: String,
    /// Classification frames, outermost first.
    pub context: Vec<String>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(code: impl Into<ErrorCode>) -> Self {
        Diagnostic {
            code: code.into(),
            severity: Severity::Error,
            message: String::new(),
            subject: String::new(),
            context: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn warning(code: impl Into<ErrorCode>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Self::error(code)
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: Vec<String>) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<&ConstraintFailure> for Diagnostic {
    fn from(failure: &ConstraintFailure) -> Self {
        let mut diagnostic = Diagnostic::error(failure.constraint)
            .with_message(failure.constraint.description())
            .with_subject(failure.entity.clone())
            .with_context(failure.context.clone());
        if let Some(detail) = &failure.detail {
            diagnostic = diagnostic.with_note(detail.clone());
        }
        diagnostic
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: ", self.severity, self.code)?;
        if !self.subject.is_empty() {
            write!(f, "{}: ", self.subject)?;
        }
        f.write_str(&self.message)?;
        for frame in &self.context {
            write!(f, "\n  in {frame}")?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        Ok(())
    }
}
