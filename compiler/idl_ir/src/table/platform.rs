//! Platform classes every mapping run needs.

use crate::{known, ClassDef, JavaType, MemberDef, Modifiers};

pub(super) fn platform_classes() -> Vec<ClassDef> {
    let private = Modifiers::PRIVATE;
    vec![
        ClassDef::class(known::JAVA_LANG_OBJECT),
        ClassDef::class(known::JAVA_LANG_STRING)
            .implements(known::SERIALIZABLE)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
        ClassDef::class(known::JAVA_LANG_CLASS)
            .implements(known::SERIALIZABLE)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
        ClassDef::class(known::THROWABLE).implements(known::SERIALIZABLE),
        ClassDef::class(known::EXCEPTION).extends(known::THROWABLE),
        ClassDef::class(known::RUNTIME_EXCEPTION).extends(known::EXCEPTION),
        ClassDef::class(known::ERROR).extends(known::THROWABLE),
        ClassDef::interface(known::SERIALIZABLE),
        ClassDef::interface(known::EXTERNALIZABLE).extends(known::SERIALIZABLE),
        ClassDef::class(known::IO_EXCEPTION).extends(known::EXCEPTION),
        ClassDef::class(known::OBJECT_OUTPUT_STREAM),
        ClassDef::class(known::OBJECT_INPUT_STREAM),
        ClassDef::class(known::OBJECT_STREAM_FIELD),
        ClassDef::interface(known::REMOTE),
        ClassDef::class(known::REMOTE_EXCEPTION).extends(known::IO_EXCEPTION),
        ClassDef::interface(known::CORBA_OBJECT),
        ClassDef::interface(known::IDL_ENTITY).extends(known::SERIALIZABLE),
        ClassDef::interface(known::VALUE_BASE).extends(known::IDL_ENTITY),
        ClassDef::class(known::CORBA_USER_EXCEPTION)
            .extends(known::EXCEPTION)
            .implements(known::IDL_ENTITY),
        ClassDef::class(known::CLASS_DESC)
            .implements(known::SERIALIZABLE)
            .member(
                MemberDef::field("repid", JavaType::class(known::JAVA_LANG_STRING))
                    .with_modifiers(private),
            )
            .member(
                MemberDef::field("codebase", JavaType::class(known::JAVA_LANG_STRING))
                    .with_modifiers(private),
            ),
    ]
}
