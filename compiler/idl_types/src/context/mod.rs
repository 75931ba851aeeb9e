//! The classification context stack.
//!
//! Every classification step pushes a [`Frame`] naming what is being
//! classified and how it relates to the frame below (a method's return
//! type, a member, an implemented interface, ...). The stack answers two
//! kinds of question:
//! - mapping decisions that depend on the enclosing element, such as
//!   "is this a constant" or "are we inside a value type"
//! - diagnostics: [`ContextStack::snapshot`] lists the path to a failure
//!
//! # Design
//!
//! Frames are plain values. [`ContextStack::scoped`] pushes a frame, runs
//! the step and pops again on every path, so the depth at exit always
//! equals the depth at entry.

use std::fmt;

use crate::TypeId;

/// How a frame relates to the frame below it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum ContextCode {
    Top = 1,
    Method = 2,
    MethodReturn = 3,
    MethodArgument = 4,
    MethodException = 5,
    Member = 6,
    MemberConstant = 7,
    MemberStatic = 8,
    MemberTransient = 9,
    Implements = 10,
    Extends = 11,
}

impl ContextCode {
    pub const fn label(self) -> &'static str {
        match self {
            ContextCode::Top => "",
            ContextCode::Method => "Method",
            ContextCode::MethodReturn => "Return parameter type",
            ContextCode::MethodArgument => "Parameter type",
            ContextCode::MethodException => "Exception type",
            ContextCode::Member => "Member",
            ContextCode::MemberConstant => "Constant member",
            ContextCode::MemberStatic => "Static member",
            ContextCode::MemberTransient => "Transient member",
            ContextCode::Implements => "Implements",
            ContextCode::Extends => "Extends",
        }
    }
}

/// What a frame is about.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FrameSubject {
    Type {
        id: TypeId,
        /// e.g. `Remote com.acme.Account`.
        label: String,
        is_value: bool,
    },
    Method(String),
    Member(String),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Frame {
    pub code: ContextCode,
    pub subject: FrameSubject,
}

impl Frame {
    pub fn is_value(&self) -> bool {
        matches!(self.subject, FrameSubject::Type { is_value: true, .. })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = match &self.subject {
            FrameSubject::Type { label, .. } => label.as_str(),
            FrameSubject::Method(name) | FrameSubject::Member(name) => name.as_str(),
        };
        match self.code {
            ContextCode::Top => f.write_str(subject),
            code => write!(f, "{}: {subject}", code.label()),
        }
    }
}

/// Explicit stack of classification frames.
#[derive(Clone, Debug)]
pub struct ContextStack {
    frames: Vec<Frame>,
    /// Code the next pushed frame will carry.
    next_code: ContextCode,
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStack {
    pub fn new() -> Self {
        ContextStack {
            frames: Vec::new(),
            next_code: ContextCode::Top,
        }
    }

    /// Set the code of the next pushed frame. Codes are not reset by
    /// pushes or pops, so every push site sets its own.
    pub fn set_next_code(&mut self, code: ContextCode) {
        self.next_code = code;
    }

    pub fn next_code(&self) -> ContextCode {
        self.next_code
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn push(&mut self, subject: FrameSubject) {
        let frame = Frame {
            code: self.next_code,
            subject,
        };
        tracing::trace!(depth = self.frames.len(), frame = %frame, "push");
        self.frames.push(frame);
    }

    /// Pop the top frame; `success` is reported to the trace only.
    pub fn pop(&mut self, success: bool) {
        if let Some(frame) = self.frames.pop() {
            tracing::trace!(depth = self.frames.len(), frame = %frame, failed = !success, "pop");
        }
    }

    /// Push `subject`, run `f`, and pop whatever `f` returned.
    pub fn scoped<T, E>(
        &mut self,
        subject: FrameSubject,
        f: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        let depth = self.frames.len();
        self.push(subject);
        let result = f(self);
        debug_assert_eq!(self.frames.len(), depth + 1, "unbalanced context frames");
        self.pop(result.is_ok());
        result
    }

    /// The top frame is a value type.
    pub fn top_is_value(&self) -> bool {
        self.top().is_some_and(Frame::is_value)
    }

    /// The frame below the top is a value type.
    pub fn parent_is_value(&self) -> bool {
        self.frames.len() >= 2 && self.frames[self.frames.len() - 2].is_value()
    }

    /// Either of the two innermost frames is a value type.
    pub fn in_value_context(&self) -> bool {
        self.top_is_value() || self.parent_is_value()
    }

    /// The innermost frame is a constant member.
    pub fn is_constant(&self) -> bool {
        self.top()
            .is_some_and(|frame| frame.code == ContextCode::MemberConstant)
    }

    /// Frames rendered outermost first.
    pub fn snapshot(&self) -> Vec<String> {
        self.frames.iter().map(ToString::to_string).collect()
    }
}
